use anyhow::{Result, bail};

use crate::config::WidgetConfig;

/// Validate a loaded configuration.
/// Returns Ok(()) if valid, or Err with descriptive messages.
pub fn validate_config(config: &WidgetConfig) -> Result<()> {
    validate_remote(config)?;
    validate_sync(config)?;
    Ok(())
}

fn validate_remote(config: &WidgetConfig) -> Result<()> {
    let endpoint = config.remote.endpoint.trim();
    if endpoint.is_empty() {
        bail!("remote.endpoint cannot be empty");
    }
    if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
        bail!("remote.endpoint must be an http(s) URL (got '{endpoint}')");
    }
    if config.remote.batch_limit == 0 {
        bail!("remote.batch_limit must be > 0 (got 0)");
    }
    if config.remote.default_category.trim().is_empty() {
        bail!("remote.default_category cannot be empty");
    }
    if config.remote.timeout_seconds == 0 {
        bail!("remote.timeout_seconds must be > 0 (got 0)");
    }
    Ok(())
}

fn validate_sync(config: &WidgetConfig) -> Result<()> {
    if config.sync.interval_seconds == 0 {
        bail!("sync.interval_seconds must be > 0 (got 0)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        validate_config(&WidgetConfig::default()).unwrap();
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = WidgetConfig::default();
        config.remote.endpoint = "ftp://example.com/posts".into();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }

    #[test]
    fn test_rejects_empty_endpoint() {
        let mut config = WidgetConfig::default();
        config.remote.endpoint = "  ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_batch_limit() {
        let mut config = WidgetConfig::default();
        config.remote.batch_limit = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("batch_limit"));
    }

    #[test]
    fn test_rejects_blank_default_category() {
        let mut config = WidgetConfig::default();
        config.remote.default_category = " ".into();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = WidgetConfig::default();
        config.remote.timeout_seconds = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_rejects_zero_interval() {
        let mut config = WidgetConfig::default();
        config.sync.interval_seconds = 0;
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("interval_seconds"));
    }
}
