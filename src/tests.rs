use crate::config;
use crate::types::{KnifeConfig, KnifeSettings};

#[test]
fn test_normalize_key() {
    assert_eq!(config::normalize_key("vault-path"), "vault_path");
    assert_eq!(config::normalize_key("configFolder"), "config_folder");
    assert_eq!(config::normalize_key("use-cors-relay"), "use_cors_relay");
}

#[test]
fn test_config_default() {
    let config = KnifeConfig::default();
    assert_eq!(config.settings.vault_path, ".");
    assert_eq!(config.settings.config_folder, ".obsidian");
    assert!(!config.settings.use_cors_relay);
    assert!(config.settings.cors_relay.starts_with("https://"));
}

#[test]
fn test_config_parses_partial_file() {
    let config: KnifeConfig =
        serde_json::from_str(r#"{"settings": {"vault_path": "/notes"}}"#).unwrap();
    assert_eq!(config.settings.vault_path, "/notes");
    assert_eq!(config.settings.config_folder, ".obsidian");

    let config: KnifeConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, KnifeConfig::default());
}

#[test]
fn test_set_get_unset_setting() {
    let mut settings = KnifeSettings::default();
    config::set_setting(&mut settings, "use-cors-relay", "1").unwrap();
    config::set_setting(&mut settings, "vaultPath", "/notes").unwrap();
    assert_eq!(
        config::get_setting(&settings, "use_cors_relay").as_deref(),
        Some("true")
    );
    assert_eq!(settings.vault_path, "/notes");

    config::unset_setting(&mut settings, "vault-path").unwrap();
    assert_eq!(settings.vault_path, ".");
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut settings = KnifeSettings::default();
    assert!(config::set_setting(&mut settings, "use_cors_relay", "maybe").is_err());
    assert!(config::set_setting(&mut settings, "bin_dir", "/tmp").is_err());
    assert!(config::unset_setting(&mut settings, "bin_dir").is_err());
    assert_eq!(config::get_setting(&settings, "bin_dir"), None);
}

#[test]
fn test_parse_bool() {
    assert!(config::parse_bool("TRUE"));
    assert!(config::parse_bool("1"));
    assert!(!config::parse_bool("yes"));
}
