use crate::config::types::{
    CategoryConfig, Config, CrawlerConfig, MatcherConfig, OutputConfig, UserAgentConfig,
};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_matcher_config(&config.matcher)?;
    validate_category_config(&config.categories)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages_per_phase < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages_per_phase must be >= 1, got {}",
            config.max_pages_per_phase
        )));
    }

    if config.max_external_depth < 1 || config.max_external_depth > 10 {
        return Err(ConfigError::Validation(format!(
            "max_external_depth must be between 1 and 10, got {}",
            config.max_external_depth
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.value.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent value cannot be empty".to_string(),
        ));
    }

    // Header values cannot carry line breaks
    if config.value.contains(['\r', '\n']) {
        return Err(ConfigError::Validation(
            "user-agent value cannot contain line breaks".to_string(),
        ));
    }

    Ok(())
}

/// Validates keyword matching configuration
fn validate_matcher_config(config: &MatcherConfig) -> Result<(), ConfigError> {
    if config.keywords.is_empty() {
        return Err(ConfigError::Validation(
            "at least one keyword is required".to_string(),
        ));
    }

    for keyword in &config.keywords {
        if keyword.trim().is_empty() {
            return Err(ConfigError::InvalidKeyword(
                "keywords cannot be blank".to_string(),
            ));
        }
    }

    if config.fuzzy_threshold < 1 || config.fuzzy_threshold > 100 {
        return Err(ConfigError::Validation(format!(
            "fuzzy_threshold must be between 1 and 100, got {}",
            config.fuzzy_threshold
        )));
    }

    Ok(())
}

/// Validates category priority names
fn validate_category_config(config: &CategoryConfig) -> Result<(), ConfigError> {
    for name in &config.priority {
        validate_category_name(name)?;
    }
    Ok(())
}

/// Category names are compared against lower-cased hrefs, so they must be
/// lowercase path-segment text
fn validate_category_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "category name cannot be empty".to_string(),
        ));
    }

    if name.contains('/') {
        return Err(ConfigError::Validation(format!(
            "category name '{}' cannot contain '/'",
            name
        )));
    }

    if name.chars().any(|c| c.is_uppercase()) {
        return Err(ConfigError::Validation(format!(
            "category name '{}' must be lowercase",
            name
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.results_dir.is_empty() {
        return Err(ConfigError::Validation(
            "results_dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_category_name() {
        assert!(validate_category_name("travel").is_ok());
        assert!(validate_category_name("food-and-drink").is_ok());

        assert!(validate_category_name("").is_err());
        assert!(validate_category_name("travel/tips").is_err());
        assert!(validate_category_name("Travel").is_err());
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let mut config = Config::default();
        config.matcher.keywords.push("   ".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidKeyword(_))
        ));
    }

    #[test]
    fn test_no_keywords_rejected() {
        let mut config = Config::default();
        config.matcher.keywords.clear();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_threshold_bounds() {
        let mut config = Config::default();
        config.matcher.fuzzy_threshold = 0;
        assert!(validate(&config).is_err());

        config.matcher.fuzzy_threshold = 101;
        assert!(validate(&config).is_err());

        config.matcher.fuzzy_threshold = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_crawler_bounds() {
        let mut config = Config::default();
        config.crawler.max_external_depth = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.crawler.request_timeout_secs = 0;
        assert!(validate(&config).is_err());

        let mut config = Config::default();
        config.crawler.max_pages_per_phase = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_user_agent_rejects_line_breaks() {
        let mut config = Config::default();
        config.user_agent.value = "Bot\r\nX-Injected: 1".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.value = "  ".to_string();
        assert!(validate(&config).is_err());
    }
}
