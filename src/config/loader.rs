//! Configuration overlay from the process environment.

use crate::config::schema::ProxyConfig;
use crate::config::validation::ValidationError;

/// Prefix shared by every recognised environment variable.
pub const ENV_PREFIX: &str = "PIXIV_PROXY_";

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: expected a boolean")]
    InvalidBool { var: String, value: String },

    #[error("validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Apply variables returned by `lookup` on top of `config`.
///
/// `lookup` receives the full variable name (including [`ENV_PREFIX`]).
/// Validation is left to the caller so CLI overrides can be applied first.
pub fn overlay<F>(mut config: ProxyConfig, lookup: F) -> Result<ProxyConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |suffix: &str| lookup(&format!("{ENV_PREFIX}{suffix}"));

    if let Some(v) = var("BIND_ADDRESS") {
        config.listener.bind_address = v;
    }
    if let Some(v) = var("MOUNT_PREFIX") {
        config.mount_prefix = v;
    }
    if let Some(v) = var("UPSTREAM_SCHEME") {
        config.upstream.scheme = v;
    }
    if let Some(v) = var("API_HOST") {
        config.upstream.api_host = v;
    }
    if let Some(v) = var("OAUTH_HOST") {
        config.upstream.oauth_host = v;
    }
    if let Some(v) = var("IMAGE_HOST") {
        config.upstream.image_host = v;
    }
    if let Some(v) = var("REFERER") {
        config.upstream.referer = v;
    }
    if let Some(v) = var("LOG_LEVEL") {
        config.observability.log_level = v;
    }

    let flag = |suffix: &str, current: bool| -> Result<bool, ConfigError> {
        match var(suffix) {
            Some(value) => parse_bool(&value).ok_or_else(|| ConfigError::InvalidBool {
                var: format!("{ENV_PREFIX}{suffix}"),
                value,
            }),
            None => Ok(current),
        }
    };
    config.features.api_proxy = flag("ENABLE_API_PROXY", config.features.api_proxy)?;
    config.features.image_proxy = flag("ENABLE_IMAGE_PROXY", config.features.image_proxy)?;
    config.features.oauth_proxy = flag("ENABLE_OAUTH_PROXY", config.features.oauth_proxy)?;

    Ok(config)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
