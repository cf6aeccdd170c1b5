//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{str::FromStr, time::Duration};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::application::form::DEFAULT_MAX_UPLOAD_BYTES;
use crate::application::list::ListOptions;
use crate::domain::filter::DEFAULT_LIMIT;

mod cli;

pub use cli::{
    CliArgs, Command, DeleteArgs, EditArgs, GlobalOverrides, ListArgs, ListOverrides,
    PostFieldArgs, ShowArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "postboard";
const ENV_PREFIX: &str = "POSTBOARD";
const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api/";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_DESCRIPTION_MAX_CHARS: usize = 100;
const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/1280x900?text=thumbnail";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub list: ListSettings,
    pub display: DisplaySettings,
    pub form: FormSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Always ends with `/` so relative joins stay under it.
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ListSettings {
    pub default_limit: u32,
    pub search_debounce: Duration,
    pub clear_on_empty: bool,
    pub description_max_chars: usize,
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub placeholder_image: String,
}

#[derive(Debug, Clone)]
pub struct FormSettings {
    pub max_upload_bytes: u64,
}

impl Settings {
    pub fn list_options(&self) -> ListOptions {
        ListOptions {
            default_limit: self.list.default_limit,
            clear_on_empty: self.list.clear_on_empty,
            description_max_chars: self.list.description_max_chars,
            placeholder_image: self.display.placeholder_image.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_global_overrides(&cli.overrides);
    match cli.command.as_ref() {
        Some(Command::List(args)) | Some(Command::Browse(args)) => {
            raw.apply_list_overrides(&args.overrides)
        }
        Some(_) | None => {}
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    list: RawListSettings,
    display: RawDisplaySettings,
    form: RawFormSettings,
}

impl RawSettings {
    fn apply_global_overrides(&mut self, overrides: &GlobalOverrides) {
        if let Some(url) = overrides.api_url.as_ref() {
            self.api.base_url = Some(url.clone());
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_list_overrides(&mut self, overrides: &ListOverrides) {
        if let Some(clear) = overrides.clear_on_empty {
            self.list.clear_on_empty = Some(clear);
        }
        if let Some(millis) = overrides.search_debounce_ms {
            self.list.search_debounce_ms = Some(millis);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            list,
            display,
            form,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            list: build_list_settings(list)?,
            display: build_display_settings(display)?,
            form: build_form_settings(form)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let raw = api
        .base_url
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    let mut base_url = Url::parse(&raw)
        .map_err(|err| LoadError::invalid("api.base_url", format!("invalid URL `{raw}`: {err}")))?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "api.base_url",
            format!("unsupported scheme `{}`", base_url.scheme()),
        ));
    }
    if !base_url.path().ends_with('/') {
        let path = format!("{}/", base_url.path());
        base_url.set_path(&path);
    }

    Ok(ApiSettings { base_url })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_list_settings(list: RawListSettings) -> Result<ListSettings, LoadError> {
    let default_limit = list.default_limit.unwrap_or(DEFAULT_LIMIT);
    if default_limit == 0 {
        return Err(LoadError::invalid(
            "list.default_limit",
            "must be greater than zero",
        ));
    }

    let description_max_chars = list
        .description_max_chars
        .unwrap_or(DEFAULT_DESCRIPTION_MAX_CHARS);
    if description_max_chars == 0 {
        return Err(LoadError::invalid(
            "list.description_max_chars",
            "must be greater than zero",
        ));
    }

    Ok(ListSettings {
        default_limit,
        search_debounce: Duration::from_millis(
            list.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
        ),
        clear_on_empty: list.clear_on_empty.unwrap_or(false),
        description_max_chars,
    })
}

fn build_display_settings(display: RawDisplaySettings) -> Result<DisplaySettings, LoadError> {
    let placeholder_image = display
        .placeholder_image
        .unwrap_or_else(|| DEFAULT_PLACEHOLDER_IMAGE.to_string());
    if placeholder_image.trim().is_empty() {
        return Err(LoadError::invalid(
            "display.placeholder_image",
            "must not be empty",
        ));
    }

    Ok(DisplaySettings { placeholder_image })
}

fn build_form_settings(form: RawFormSettings) -> Result<FormSettings, LoadError> {
    let max_upload_bytes = form.max_upload_bytes.unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
    if max_upload_bytes == 0 {
        return Err(LoadError::invalid(
            "form.max_upload_bytes",
            "must be greater than zero",
        ));
    }

    Ok(FormSettings { max_upload_bytes })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListSettings {
    default_limit: Option<u32>,
    search_debounce_ms: Option<u64>,
    clear_on_empty: Option<bool>,
    description_max_chars: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDisplaySettings {
    placeholder_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawFormSettings {
    max_upload_bytes: Option<u64>,
}

#[cfg(test)]
mod tests;
