//! File-backed key storage
//!
//! Persists the admin API key in the CLI config file. This is the injected
//! storage collaborator behind `AdminSession`; nothing else reads the key.

use fieldform_sdk::{Error, KeyStore};

use crate::config::Config;

pub struct FileKeyStore {
    profile: Option<String>,
}

impl FileKeyStore {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }

    fn load_config(&self) -> Result<Config, Error> {
        Config::load(self.profile.as_deref()).map_err(Error::KeyStore)
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Result<Option<String>, Error> {
        Ok(self.load_config()?.api_key)
    }

    fn save(&self, key: &str) -> Result<(), Error> {
        let mut config = self.load_config()?;
        config.api_key = Some(key.to_string());
        config.save(self.profile.as_deref()).map_err(Error::KeyStore)
    }

    fn clear(&self) -> Result<(), Error> {
        let mut config = self.load_config()?;
        config.api_key = None;
        config.save(self.profile.as_deref()).map_err(Error::KeyStore)
    }
}
