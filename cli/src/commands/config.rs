//! Config commands

use crate::config::Config;
use crate::ConfigCommands;

pub async fn handle(action: ConfigCommands) -> Result<(), String> {
    match action {
        ConfigCommands::Init => {
            let config = Config::default();
            config.save(None)?;
            println!("Configuration initialized at ~/.fieldform/config.toml");
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load(None).unwrap_or_default();
            match key.as_str() {
                "api_key" => config.api_key = Some(value),
                "api_url" => config.api_url = Some(value),
                "default_format" => config.default_format = Some(value),
                _ => return Err(format!("Unknown config key: {}", key)),
            }
            config.save(None)?;
            println!("Set {} successfully", key);
        }
        ConfigCommands::Get { key } => {
            let config = Config::load(None).unwrap_or_default();
            let value = match key.as_str() {
                "api_key" => config.api_key.map(|k| mask_key(&k)),
                "api_url" => config.api_url,
                "default_format" => config.default_format,
                _ => return Err(format!("Unknown config key: {}", key)),
            };
            println!("{}: {}", key, value.unwrap_or_else(|| "(not set)".into()));
        }
        ConfigCommands::List => {
            let config = Config::load(None).unwrap_or_default();
            println!("api_url: {}", config.api_url.unwrap_or_else(|| "(not set)".into()));
            println!(
                "api_key: {}",
                config
                    .api_key
                    .map(|k| mask_key(&k))
                    .unwrap_or_else(|| "(not set)".into())
            );
            println!(
                "default_format: {}",
                config.default_format.unwrap_or_else(|| "(not set)".into())
            );
        }
    }
    Ok(())
}

/// Show at most the first 8 characters of the key. Counted in chars, not
/// bytes, so a multibyte key cannot split mid-character.
fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(8).collect();
    format!("{}****", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_keeps_an_eight_char_prefix() {
        assert_eq!(mask_key("fk_live_abcdef"), "fk_live_****");
        assert_eq!(mask_key("short"), "short****");
    }

    #[test]
    fn masking_does_not_split_multibyte_keys() {
        assert_eq!(mask_key("ключ-доступа"), "ключ-дос****");
    }
}
