use crate::types::*;
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::PathBuf;

pub const APP_NAME: &str = "vaultknife";
pub const CONFIG_FILE_NAME: &str = "config.json";
pub const CONFIG_PATH_ENV: &str = "VAULTKNIFE_CONFIG";

pub const SETTING_KEYS: [&str; 4] = ["vault_path", "config_folder", "cors_relay", "use_cors_relay"];

pub fn get_config_file_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    let path = dirs::config_dir()
        .ok_or_else(|| anyhow!("Could not determine config directory"))?
        .join(APP_NAME)
        .join(CONFIG_FILE_NAME);
    tracing::debug!("Config file path: {}", path.display());
    Ok(path)
}

/// Settings from the config file with environment overrides applied.
pub fn load_config() -> Result<KnifeConfig> {
    let mut config = load_stored_config()?;
    apply_env_overrides(&mut config.settings);
    Ok(config)
}

fn apply_env_overrides(settings: &mut KnifeSettings) {
    if let Ok(vault) = std::env::var("VAULTKNIFE_VAULT") {
        settings.vault_path = vault;
    }
    if let Ok(folder) = std::env::var("VAULTKNIFE_CONFIG_FOLDER") {
        settings.config_folder = folder;
    }
    if let Ok(relay) = std::env::var("VAULTKNIFE_CORS_RELAY") {
        settings.cors_relay = relay;
    }
    if let Ok(use_relay) = std::env::var("VAULTKNIFE_USE_RELAY") {
        settings.use_cors_relay = parse_bool(&use_relay);
    }
}

/// Settings as stored on disk, without environment overrides applied.
pub fn load_stored_config() -> Result<KnifeConfig> {
    let config_path = get_config_file_path()?;
    if !config_path.exists() {
        return Ok(KnifeConfig::default());
    }
    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Could not read config file at {}", config_path.display()))?;
    serde_json::from_str(&content).with_context(|| "Could not parse config file as JSON")
}

pub fn save_config(config: &KnifeConfig) -> Result<()> {
    let config_path = get_config_file_path()?;
    let config_dir = config_path
        .parent()
        .ok_or_else(|| anyhow!("Invalid config path"))?;

    fs::create_dir_all(config_dir)?;

    let content = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, content)
        .with_context(|| format!("Could not write config file at {}", config_path.display()))?;

    Ok(())
}

pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

pub fn normalize_key(key: &str) -> String {
    key.replace('-', "_")
        .chars()
        .map(|c| {
            if c.is_ascii_uppercase() {
                format!("_{}", c.to_lowercase())
            } else {
                c.to_string()
            }
        })
        .collect::<String>()
        .to_lowercase()
}

pub fn get_setting(settings: &KnifeSettings, key: &str) -> Option<String> {
    match normalize_key(key).as_str() {
        "vault_path" => Some(settings.vault_path.clone()),
        "config_folder" => Some(settings.config_folder.clone()),
        "cors_relay" => Some(settings.cors_relay.clone()),
        "use_cors_relay" => Some(settings.use_cors_relay.to_string()),
        _ => None,
    }
}

pub fn set_setting(settings: &mut KnifeSettings, key: &str, value: &str) -> Result<()> {
    match normalize_key(key).as_str() {
        "vault_path" => settings.vault_path = value.to_string(),
        "config_folder" => settings.config_folder = value.to_string(),
        "cors_relay" => settings.cors_relay = value.to_string(),
        "use_cors_relay" => match value.to_lowercase().as_str() {
            "true" | "1" => settings.use_cors_relay = true,
            "false" | "0" => settings.use_cors_relay = false,
            _ => {
                return Err(anyhow!(
                    "Invalid value for use_cors_relay: '{}'. Use true or false",
                    value
                ))
            }
        },
        other => {
            return Err(anyhow!(
                "'{}' is not a valid configuration setting. Valid settings: {}",
                other,
                SETTING_KEYS.join(", ")
            ))
        }
    }
    Ok(())
}

pub fn unset_setting(settings: &mut KnifeSettings, key: &str) -> Result<()> {
    let defaults = KnifeSettings::default();
    let key = normalize_key(key);
    let value = get_setting(&defaults, &key).ok_or_else(|| {
        anyhow!(
            "'{}' is not a valid configuration setting. Valid settings: {}",
            key,
            SETTING_KEYS.join(", ")
        )
    })?;
    set_setting(settings, &key, &value)
}
