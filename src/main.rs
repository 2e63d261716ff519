mod cli;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use std::path::Path;
use vaultknife::config::{
    get_setting, load_config, load_stored_config, normalize_key, save_config, set_setting,
    unset_setting, SETTING_KEYS,
};
use vaultknife::document::Document;
use vaultknife::flow::install_flow;
use vaultknife::host::{PresetHost, TerminalHost};
use vaultknife::install::{DiskVault, Installer};
use vaultknife::release::{ReleaseFetcher, ReqwestClient};
use vaultknife::text::NormalizeCommand;
use vaultknife::types::{KnifeConfig, KnifeSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(&cli)?;

    match cli.command {
        Commands::Version => {
            println!("vaultknife v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::CollapseBlankLines { file, stdout } => {
            normalize_document(&file, NormalizeCommand::CollapseDoubledBlankLines, stdout)?;
        }

        Commands::RemoveBlankLines { file, stdout } => {
            normalize_document(&file, NormalizeCommand::RemoveBlankLines, stdout)?;
        }

        Commands::Install {
            url,
            tag,
            vault,
            relay,
        } => {
            let mut settings = load_config()?.settings;
            if let Some(vault) = vault {
                settings.vault_path = vault.to_string_lossy().to_string();
            }
            if relay {
                settings.use_cors_relay = true;
            }

            if !run_install(&settings, url, tag).await? {
                std::process::exit(1);
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Get { key } => {
                let config = load_config()?;
                if let Some(key) = key {
                    match get_setting(&config.settings, &key) {
                        Some(value) => println!("{}", value),
                        None => println!("Setting '{}' not found", key),
                    }
                } else {
                    print_settings(&config.settings);
                }
            }
            ConfigAction::Set { args } => {
                let (key, value) = parse_set_args(&args)?;
                let mut config = load_stored_config()?;
                set_setting(&mut config.settings, &key, &value)?;
                save_config(&config)?;
                tracing::info!("Setting '{}' updated to '{}'", normalize_key(&key), value);
            }
            ConfigAction::Unset { key } => {
                let mut config = load_stored_config()?;
                unset_setting(&mut config.settings, &key)?;
                save_config(&config)?;
                tracing::info!("Setting '{}' unset", normalize_key(&key));
            }
            ConfigAction::Show { format } => {
                let config = load_config()?;
                show_config(&config, &format)?;
            }
        },
    }

    Ok(())
}

fn setup_logging(cli: &Cli) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.quiet {
        "error"
    } else if cli.verbose == 0 {
        "warn"
    } else if cli.verbose == 1 {
        "info"
    } else {
        "debug"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    Ok(())
}

fn normalize_document(file: &Path, command: NormalizeCommand, to_stdout: bool) -> Result<()> {
    tracing::debug!("Running '{}' on {}", command.id(), file.display());
    let mut document = Document::load(file)?;
    let changed = document.apply(|text| command.apply(text));

    if to_stdout {
        print!("{}", document.text);
        return Ok(());
    }
    if !changed && file != Path::new("-") {
        tracing::info!("{}: nothing to change", command.name());
        return Ok(());
    }
    document.commit()
}

async fn run_install(settings: &KnifeSettings, url: Option<String>, tag: String) -> Result<bool> {
    let fetcher = ReleaseFetcher::new(ReqwestClient::new()?)
        .with_relay(settings.relay().map(str::to_string));
    let installer = Installer::new(DiskVault::new(settings.vault_root()), settings.plugins_dir());
    tracing::debug!(
        "Installing into {} under {}",
        settings.plugins_dir(),
        settings.vault_root().display()
    );

    let ok = match url {
        Some(url) => {
            let host = PresetHost::new(TerminalHost::new(), vec![url, tag]);
            install_flow(&host, &fetcher, &installer).await
        }
        None => install_flow(&TerminalHost::new(), &fetcher, &installer).await,
    };
    Ok(ok)
}

fn parse_set_args(args: &[String]) -> Result<(String, String)> {
    match args {
        [single] => single
            .split_once('=')
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .ok_or_else(|| anyhow!("Invalid format. Use 'key=value' or 'key value'")),
        [key, rest @ ..] => Ok((key.clone(), rest.join(" "))),
        [] => Err(anyhow!("Missing key and value")),
    }
}

fn print_settings(settings: &KnifeSettings) {
    println!("--- vaultknife Settings ---");
    for key in SETTING_KEYS {
        if let Some(value) = get_setting(settings, key) {
            println!("  {}: {}", key, value);
        }
    }
}

fn show_config(config: &KnifeConfig, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(config)?),
        "yaml" => print!("{}", serde_yaml::to_string(config)?),
        "plain" => print_settings(&config.settings),
        other => return Err(anyhow!("Unknown format '{}'. Use json, yaml or plain", other)),
    }
    Ok(())
}
