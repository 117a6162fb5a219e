use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Endpoint and credentials for the quoting service. Sourced from process
/// configuration, never hard-coded in the submission logic.
#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub endpoint_url: String,
    pub username: SecretString,
    pub password: SecretString,
}

/// Connection options handed to the invoker: the 10-second connection
/// timeout, response compression, and exchange tracing (tracing must stay on
/// for failure diagnostics to carry raw request/response captures).
#[derive(Clone, Debug)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub compression: bool,
    pub trace: bool,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub endpoint_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                endpoint_url:
                    "https://demo.pbs.first-quotes.com/ExternalServices/PBSWebService.asmx"
                        .to_string(),
                username: String::new().into(),
                password: String::new().into(),
            },
            http: HttpConfig { connect_timeout_secs: 10, compression: true, trace: true },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("quotewire.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(service) = patch.service {
            if let Some(endpoint_url) = service.endpoint_url {
                self.service.endpoint_url = endpoint_url;
            }
            if let Some(username_value) = service.username {
                self.service.username = secret_value(username_value);
            }
            if let Some(password_value) = service.password {
                self.service.password = secret_value(password_value);
            }
        }

        if let Some(http) = patch.http {
            if let Some(connect_timeout_secs) = http.connect_timeout_secs {
                self.http.connect_timeout_secs = connect_timeout_secs;
            }
            if let Some(compression) = http.compression {
                self.http.compression = compression;
            }
            if let Some(trace) = http.trace {
                self.http.trace = trace;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("QUOTEWIRE_SERVICE_ENDPOINT_URL") {
            self.service.endpoint_url = value;
        }
        if let Some(value) = read_env("QUOTEWIRE_SERVICE_USERNAME") {
            self.service.username = secret_value(value);
        }
        if let Some(value) = read_env("QUOTEWIRE_SERVICE_PASSWORD") {
            self.service.password = secret_value(value);
        }

        if let Some(value) = read_env("QUOTEWIRE_HTTP_CONNECT_TIMEOUT_SECS") {
            self.http.connect_timeout_secs =
                parse_u64("QUOTEWIRE_HTTP_CONNECT_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("QUOTEWIRE_HTTP_COMPRESSION") {
            self.http.compression = parse_bool("QUOTEWIRE_HTTP_COMPRESSION", &value)?;
        }
        if let Some(value) = read_env("QUOTEWIRE_HTTP_TRACE") {
            self.http.trace = parse_bool("QUOTEWIRE_HTTP_TRACE", &value)?;
        }

        let log_level =
            read_env("QUOTEWIRE_LOGGING_LEVEL").or_else(|| read_env("QUOTEWIRE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("QUOTEWIRE_LOGGING_FORMAT").or_else(|| read_env("QUOTEWIRE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint_url) = overrides.endpoint_url {
            self.service.endpoint_url = endpoint_url;
        }
        if let Some(username) = overrides.username {
            self.service.username = secret_value(username);
        }
        if let Some(password) = overrides.password {
            self.service.password = secret_value(password);
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_service(&self.service)?;
        validate_http(&self.http)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("quotewire.toml"), PathBuf::from("config/quotewire.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_service(service: &ServiceConfig) -> Result<(), ConfigError> {
    let url = service.endpoint_url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(
            "service.endpoint_url must start with http:// or https://".to_string(),
        ));
    }

    if service.username.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "service.username is required (ask the quoting service operator for credentials)"
                .to_string(),
        ));
    }

    if service.password.expose_secret().trim().is_empty() {
        return Err(ConfigError::Validation(
            "service.password is required (ask the quoting service operator for credentials)"
                .to_string(),
        ));
    }

    Ok(())
}

fn validate_http(http: &HttpConfig) -> Result<(), ConfigError> {
    if http.connect_timeout_secs == 0 || http.connect_timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "http.connect_timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    service: Option<ServicePatch>,
    http: Option<HttpPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct ServicePatch {
    endpoint_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct HttpPatch {
    connect_timeout_secs: Option<u64>,
    compression: Option<bool>,
    trace: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
