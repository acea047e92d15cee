//! Application configuration loading for CLI defaults.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use linkprobe_core::checker::CheckerEndpoints;
use linkprobe_core::transport::TransportConfig;

/// `key = value` file configuration for linkprobe defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Transport connect timeout in seconds.
    pub connect_timeout_secs: Option<u64>,
    /// Transport read timeout in seconds.
    pub read_timeout_secs: Option<u64>,
    /// Verify TLS certificates (`--insecure` overrides to false).
    pub verify_certificate: Option<bool>,
    /// Default report format.
    pub output: Option<OutputSetting>,
    /// MEGA API base URL.
    pub mega_api_url: Option<String>,
    /// Google Drive base URL used for probes.
    pub google_drive_url: Option<String>,
}

impl FileConfig {
    /// Validates config values against runtime constraints.
    pub fn validate(&self) -> Result<()> {
        validate_timeout_secs("connect_timeout_secs", self.connect_timeout_secs)?;
        validate_timeout_secs("read_timeout_secs", self.read_timeout_secs)?;
        validate_base_url("mega_api_url", self.mega_api_url.as_deref())?;
        validate_base_url("google_drive_url", self.google_drive_url.as_deref())?;
        Ok(())
    }

    /// Transport settings with unset values taken from the library defaults.
    #[must_use]
    pub fn transport_config(&self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            connect_timeout_secs: self
                .connect_timeout_secs
                .unwrap_or(defaults.connect_timeout_secs),
            read_timeout_secs: self.read_timeout_secs.unwrap_or(defaults.read_timeout_secs),
        }
    }

    /// Probe endpoints with unset values taken from the library defaults.
    #[must_use]
    pub fn endpoints(&self) -> CheckerEndpoints {
        let defaults = CheckerEndpoints::default();
        CheckerEndpoints {
            mega_api_url: self.mega_api_url.clone().unwrap_or(defaults.mega_api_url),
            google_drive_url: self
                .google_drive_url
                .clone()
                .unwrap_or(defaults.google_drive_url),
        }
    }
}

fn validate_timeout_secs(field: &str, value: Option<u64>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(1..=3600).contains(&value) {
        bail!("Invalid config value for `{field}`: {value}. Expected range: 1..=3600");
    }
    Ok(())
}

fn validate_base_url(field: &str, value: Option<&str>) -> Result<()> {
    let Some(value) = value else {
        return Ok(());
    };
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        bail!("Invalid config value for `{field}`: '{value}'. Expected an http:// or https:// URL");
    }
    Ok(())
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSetting {
    #[default]
    Table,
    Json,
}

impl OutputSetting {
    /// Returns the stable string label used in config files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
        }
    }
}

/// Loaded config metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Resolved config path if one is known.
    pub path: Option<PathBuf>,
    /// Parsed file config, or defaults when no file was read.
    pub config: FileConfig,
    /// Indicates whether configuration was loaded from disk.
    pub loaded_from_file: bool,
}

/// Resolves default config path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/linkprobe/config.toml`
/// 2. `$HOME/.config/linkprobe/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("linkprobe")
                .join("config.toml"),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("linkprobe")
            .join("config.toml"),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Loads config from `explicit` when given, otherwise from the default path
/// if a file exists there.
///
/// An explicit path that cannot be read is an error; a missing default file
/// is not.
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        let config = load_file_config(path)?;
        return Ok(LoadedConfig {
            path: Some(path.to_path_buf()),
            config,
            loaded_from_file: true,
        });
    }

    let path = resolve_default_config_path();
    let Some(path_ref) = path.as_deref().filter(|p| p.exists()) else {
        return Ok(LoadedConfig {
            path,
            config: FileConfig::default(),
            loaded_from_file: false,
        });
    };

    let config = load_file_config(path_ref)?;
    Ok(LoadedConfig {
        path,
        config,
        loaded_from_file: true,
    })
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_no = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_no}: expected key = value");
        };

        let key = raw_key.trim();
        let value = raw_value.trim();
        let invalid = || format!("Invalid `{key}` value on line {line_no}");

        match key {
            "connect_timeout_secs" => {
                cfg.connect_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "read_timeout_secs" => {
                cfg.read_timeout_secs = Some(parse_integer_u64(value).with_context(invalid)?);
            }
            "verify_certificate" => {
                cfg.verify_certificate = Some(parse_boolean(value).with_context(invalid)?);
            }
            "output" => {
                let parsed = parse_string_literal(value).with_context(invalid)?;
                cfg.output = Some(parse_output(&parsed).with_context(|| {
                    format!("Invalid `output` value '{parsed}' on line {line_no}")
                })?);
            }
            "mega_api_url" => {
                cfg.mega_api_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            "google_drive_url" => {
                cfg.google_drive_url = Some(parse_string_literal(value).with_context(invalid)?);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_no}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    let mut in_string = false;
    for (index, ch) in line.char_indices() {
        match ch {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..index],
            _ => {}
        }
    }
    line
}

fn parse_string_literal(raw_value: &str) -> Result<String> {
    if raw_value.len() < 2 || !raw_value.starts_with('"') || !raw_value.ends_with('"') {
        bail!("Expected double-quoted string");
    }
    Ok(raw_value[1..raw_value.len() - 1].to_string())
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    let value = token.parse::<i128>()?;
    if value < 0 {
        bail!("Expected non-negative integer");
    }
    u64::try_from(value).map_err(|_| anyhow::anyhow!("Integer value out of range for u64"))
}

fn parse_output(value: &str) -> Result<OutputSetting> {
    match value {
        "table" => Ok(OutputSetting::Table),
        "json" => Ok(OutputSetting::Json),
        _ => bail!("Expected one of: table, json"),
    }
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}
