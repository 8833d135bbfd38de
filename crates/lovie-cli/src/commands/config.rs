use super::prompts;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color, Table};
use movie_log_config::{Config, CredentialStore, PathManager, API_KEY_ENV};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, config, paths, output),
        ConfigCommands::SetKey { key } => set_api_key(key, paths, output),
        ConfigCommands::Init { force } => init_config(force, paths, output),
    }
}

fn show_config(full: bool, config: &Config, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    let mut cred_store = CredentialStore::new(paths.credentials_file());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

    let api_key = cred_store.omdb_api_key().unwrap_or_default();
    let key_source = if std::env::var(API_KEY_ENV).map(|v| !v.trim().is_empty()).unwrap_or(false) {
        API_KEY_ENV.to_string()
    } else {
        paths.credentials_file().display().to_string()
    };
    let api_key_display = if full { api_key.clone() } else { mask_string(&api_key) };
    let storage_dir = config.storage_dir(paths);
    let log_file = config
        .logging
        .file
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "stderr".to_string());

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            if !config_file.exists() {
                output.warn(format!("No config file at {}; showing defaults", config_file.display()));
            }

            let rows: Vec<(&str, String)> = vec![
                ("Config File", config_file.display().to_string()),
                ("OMDb URL", config.omdb.base_url.clone()),
                ("API Key", api_key_display),
                ("API Key Source", key_source),
                ("Request Timeout", format!("{}s", config.omdb.request_timeout_secs)),
                ("Min Query Length", config.search.min_query_len.to_string()),
                ("Storage Dir", storage_dir.display().to_string()),
                ("Watched Key", config.storage.watched_key.clone()),
                ("Log Level", config.logging.level.clone()),
                ("Log File", log_file),
            ];

            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("Configuration").fg(Color::Cyan).add_attribute(Attribute::Bold)
            ]);
            for (label, value) in rows {
                table.add_row(vec![Cell::new(label), Cell::new(value)]);
            }
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            println!("{}", table);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": config_file,
                "omdb": {
                    "base_url": config.omdb.base_url,
                    "api_key": api_key_display,
                    "api_key_source": key_source,
                    "request_timeout_secs": config.omdb.request_timeout_secs,
                },
                "search": { "min_query_len": config.search.min_query_len },
                "storage": {
                    "dir": storage_dir,
                    "watched_key": config.storage.watched_key,
                },
                "logging": {
                    "level": config.logging.level,
                    "file": config.logging.file,
                },
            }));
        }
    }

    Ok(())
}

fn set_api_key(key_arg: Option<String>, paths: &PathManager, output: &Output) -> Result<()> {
    paths.ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;

    let key = match key_arg {
        Some(key) => key,
        None => {
            output.println(format!("{}", "OMDb API key".bold().bright_cyan()));
            output.println("Request a free key at https://www.omdbapi.com/apikey.aspx");
            prompts::prompt_password("API key")?
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key is required"));
    }

    let credentials_file = paths.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    cred_store.set_omdb_api_key(key.clone());
    cred_store.save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;

    output.success(format!("OMDb API key saved ({})", mask_string(&key)));
    if std::env::var(API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the stored key", API_KEY_ENV));
    }
    Ok(())
}

fn init_config(force: bool, paths: &PathManager, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!("Config already exists at {} (use --force to overwrite)", config_file.display()));
        return Ok(());
    }

    paths.ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create configuration directories: {}", e))?;
    let mut config = Config::default();
    config.logging.file = Some(paths.log_file());
    config.save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default config to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
