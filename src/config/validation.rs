//! Semantic configuration checks, run after deserialization.

use std::net::SocketAddr;

use crate::config::schema::ProbeConfig;

/// A single failed semantic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed config, collecting every problem rather than
/// stopping at the first.
pub fn validate_config(config: &ProbeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address".to_string(),
            message: format!("not a valid socket address: {}", config.listener.bind_address),
        });
    }

    let upstream = &config.upstream;
    for (field, secs) in [
        ("upstream.direct_timeout_secs", upstream.direct_timeout_secs),
        ("upstream.self_proxy_timeout_secs", upstream.self_proxy_timeout_secs),
        ("upstream.mirror_timeout_secs", upstream.mirror_timeout_secs),
        ("upstream.stream_timeout_secs", upstream.stream_timeout_secs),
    ] {
        if secs == 0 {
            errors.push(ValidationError {
                field: field.to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
    }

    for (i, mirror) in upstream.mirrors.iter().enumerate() {
        if !mirror.starts_with("http://") && !mirror.starts_with("https://") {
            errors.push(ValidationError {
                field: format!("upstream.mirrors[{}]", i),
                message: format!("not an http(s) URL prefix: {}", mirror),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&ProbeConfig::default()).is_ok());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let mut config = ProbeConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "listener.bind_address");
    }

    #[test]
    fn zero_timeout_and_bad_mirror_are_both_reported() {
        let mut config = ProbeConfig::default();
        config.upstream.direct_timeout_secs = 0;
        config.upstream.mirrors = vec!["ftp://mirror".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
