use crate::config::types::{ComparisonConfig, Config, InputConfig, OutputConfig, ReportConfig};
use crate::{ConfigError, ConfigResult};

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_input_config(&config.input)?;
    validate_comparison_config(&config.comparison)?;
    validate_report_config(&config.report)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates input configuration
fn validate_input_config(config: &InputConfig) -> ConfigResult<()> {
    if config.visits_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "visits_path cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates the compared crawler pair
fn validate_comparison_config(config: &ComparisonConfig) -> ConfigResult<()> {
    validate_label("group_a", &config.group_a)?;
    validate_label("group_b", &config.group_b)?;

    if config.group_a == config.group_b {
        return Err(ConfigError::Validation(format!(
            "group_a and group_b must name different crawlers, both are '{}'",
            config.group_a
        )));
    }

    Ok(())
}

/// Validates report configuration
fn validate_report_config(config: &ReportConfig) -> ConfigResult<()> {
    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation("title cannot be empty".to_string()));
    }

    if config.low_traffic_threshold < 1 {
        return Err(ConfigError::Validation(format!(
            "low_traffic_threshold must be >= 1, got {}",
            config.low_traffic_threshold
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> ConfigResult<()> {
    if matches!(&config.report_path, Some(path) if path.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    if matches!(&config.summary_path, Some(path) if path.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a crawler label: non-empty, no surrounding whitespace
fn validate_label(field: &str, label: &str) -> ConfigResult<()> {
    if label.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} cannot be empty",
            field
        )));
    }

    if label.trim() != label {
        return Err(ConfigError::Validation(format!(
            "{} must not have leading or trailing whitespace, got '{}'",
            field, label
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            input: InputConfig {
                visits_path: "./visits.json".to_string(),
            },
            comparison: ComparisonConfig::default(),
            report: ReportConfig::default(),
            output: OutputConfig::default(),
        }
    }

    #[test]
    fn test_validate_defaults() {
        assert!(validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_validate_label() {
        assert!(validate_label("group_a", "Googlebot").is_ok());
        assert!(validate_label("group_a", "Generic Bot").is_ok());

        assert!(validate_label("group_a", "").is_err());
        assert!(validate_label("group_a", " GPTBot").is_err());
    }

    #[test]
    fn test_validate_same_groups() {
        let mut config = valid_config();
        config.comparison.group_b = config.comparison.group_a.clone();
        assert!(matches!(validate(&config), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_threshold() {
        let mut config = valid_config();
        config.report.low_traffic_threshold = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_validate_empty_paths() {
        let mut config = valid_config();
        config.input.visits_path = "  ".to_string();
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.output.report_path = Some(String::new());
        assert!(validate(&config).is_err());

        let mut config = valid_config();
        config.output.summary_path = Some("./summary.json".to_string());
        assert!(validate(&config).is_ok());
    }
}
