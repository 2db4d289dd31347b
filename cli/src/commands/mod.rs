//! CLI Commands

pub mod auth;
pub mod config;
pub mod registry;
pub mod submissions;
pub mod submit;

use fieldform_sdk::{AdminSession, KeyStore};

/// Resolve the admin credential: an explicit `--api-key` wins, otherwise the
/// stored one. Admin commands fail fast with a hint when neither exists.
pub fn admin_session(
    api_key: Option<&str>,
    store: &dyn KeyStore,
) -> Result<AdminSession, String> {
    if let Some(key) = api_key {
        return Ok(AdminSession::new(key));
    }
    match AdminSession::restore(store) {
        Ok(Some(session)) => Ok(session),
        Ok(None) => Err("authentication required. Run `fieldform login <key>` first".into()),
        Err(e) => Err(e.to_string()),
    }
}
