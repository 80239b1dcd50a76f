//! Config command implementation.
//!
//! Settings live in `~/.config/ftable/config.toml` (or `$XDG_CONFIG_HOME`),
//! and `FTABLE_CONFIG` points at a different file. Command line flags always
//! win over the file.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use ftable_core::filter::DEFAULT_DATE_PROPERTY;
use ftable_core::{SelectionType, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

use super::{CommandContext, CommandError, Result};

/// Schema version written to new files.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file path.
const CONFIG_ENV: &str = "FTABLE_CONFIG";

/// Keys accepted by `config set`.
const SETTABLE_KEYS: &[&str] = &[
    "records",
    "properties",
    "store",
    "table.page_size",
    "table.selection_type",
    "table.date_property",
    "output.color",
];

/// Contents of `config.toml`. Every setting is optional.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Schema version. Files without one are read as the current version.
    #[serde(default = "current_version")]
    pub version: u32,

    /// Records file used when `--records` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records: Option<String>,

    /// Property declarations file used when `--properties` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,

    /// Saved filters file used when `--store` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store: Option<String>,

    /// `[table]` section: paging, row selection and date filter defaults.
    #[serde(default)]
    pub table: TableConfig,

    /// `[output]` section: terminal rendering settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn current_version() -> u32 {
    CONFIG_VERSION
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            records: None,
            properties: None,
            store: None,
            table: TableConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// `[table]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_type: Option<SelectionType>,

    /// Property compared by `--date`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_property: Option<String>,
}

/// `[output]` section.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
}

impl Config {
    /// Reads `path`, returning the defaults when the file does not exist.
    fn load_from(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(CommandError::Config(format!(
                    "Cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let mut config: Self = toml::from_str(&content).map_err(|e| {
            CommandError::Config(format!("Invalid config file {}: {e}", path.display()))
        })?;

        // Only one schema exists so far; newer files are read as-is.
        config.version = CONFIG_VERSION;
        Ok(config)
    }

    /// Writes the config to `path`, creating parent directories.
    fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| {
                CommandError::Config(format!("Cannot create {}: {e}", dir.display()))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CommandError::Config(format!("Cannot encode config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| CommandError::Config(format!("Cannot write {}: {e}", path.display())))
    }

    /// Applies `config set KEY VALUE`.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "records" => self.records = Some(non_empty(key, value)?),
            "properties" => self.properties = Some(non_empty(key, value)?),
            "store" => self.store = Some(non_empty(key, value)?),
            "table.page_size" => {
                let size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| {
                        CommandError::Config(format!(
                            "table.page_size must be a positive integer, got '{value}'"
                        ))
                    })?;
                self.table.page_size = Some(size);
            }
            "table.selection_type" => {
                self.table.selection_type = Some(parse_selection_type(value)?);
            }
            "table.date_property" => {
                self.table.date_property = Some(non_empty(key, value)?);
            }
            "output.color" => self.output.color = Some(parse_flag(value)?),
            _ => {
                return Err(CommandError::Config(format!(
                    "Unknown config key '{key}'. Valid keys: {}",
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn non_empty(key: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CommandError::Config(format!("{key} cannot be empty")));
    }
    Ok(value.to_string())
}

fn parse_selection_type(value: &str) -> Result<SelectionType> {
    [SelectionType::None, SelectionType::Single, SelectionType::Multi]
        .into_iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            CommandError::Config(format!(
                "table.selection_type must be none, single or multi, got '{value}'"
            ))
        })
}

/// Parses an on/off setting.
fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Ok(true),
        "false" | "off" | "no" | "0" => Ok(false),
        _ => Err(CommandError::Config(format!(
            "Expected true/false, on/off, yes/no or 1/0, got '{value}'"
        ))),
    }
}

/// Returns the config file path.
///
/// `FTABLE_CONFIG` wins, then `$XDG_CONFIG_HOME/ftable/config.toml`, then
/// `~/.config/ftable/config.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_home = match env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(".config"))
            .ok_or_else(|| {
                CommandError::Config("Cannot locate the home directory".to_string())
            })?,
    };
    Ok(config_home.join("ftable").join("config.toml"))
}

/// Loads the configuration, or the defaults if no file exists.
pub fn load_config() -> Result<Config> {
    Config::load_from(&get_config_path()?)
}

/// Executes the config show command.
///
/// Unset settings are shown with the value that applies instead.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;
    let config = Config::load_from(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }
    if ctx.quiet {
        return Ok(());
    }

    use owo_colors::OwoColorize;

    let unset = |value: Option<&str>| match value {
        Some(v) => v.to_string(),
        None if ctx.use_colors => "(not set)".dimmed().to_string(),
        None => "(not set)".to_string(),
    };
    let fallback = |value: Option<String>, default: String| match value {
        Some(v) => v,
        None if ctx.use_colors => format!("{} {}", default, "(default)".dimmed()),
        None => format!("{default} (default)"),
    };

    println!("{}", path.display());
    if !path.exists() {
        println!("(file does not exist; 'ftable config set KEY VALUE' creates it)");
    }
    println!();
    println!("records              {}", unset(config.records.as_deref()));
    println!("properties           {}", unset(config.properties.as_deref()));
    println!("store                {}", unset(config.store.as_deref()));
    println!(
        "table.page_size      {}",
        fallback(
            config.table.page_size.map(|n| n.to_string()),
            DEFAULT_PAGE_SIZE.to_string()
        )
    );
    println!(
        "table.selection_type {}",
        fallback(
            config.table.selection_type.map(|t| t.as_str().to_string()),
            SelectionType::default().as_str().to_string()
        )
    );
    println!(
        "table.date_property  {}",
        fallback(
            config.table.date_property.clone(),
            DEFAULT_DATE_PROPERTY.to_string()
        )
    );
    println!(
        "output.color         {}",
        fallback(config.output.color.map(|c| c.to_string()), "true".to_string())
    );

    Ok(())
}

/// Options for the config set command.
pub struct ConfigSetOptions {
    /// Dotted setting name, e.g. `table.page_size`.
    pub key: String,
    /// New value.
    pub value: String,
}

/// Executes the config set command.
pub fn execute_set(ctx: &CommandContext, opts: &ConfigSetOptions) -> Result<()> {
    let path = get_config_path()?;
    let mut config = Config::load_from(&path)?;

    config.set(&opts.key, &opts.value)?;
    config.save_to(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "key": opts.key,
            "value": opts.value,
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{} = {}", opts.key, opts.value);
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path()?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}
