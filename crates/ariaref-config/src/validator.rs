//! Configuration validation.

use std::fmt;

use tracing::warn;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Fold the errors into one [`ConfigError::Invalid`], handing the
    /// warnings back on success.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.errors.is_empty() {
            return Ok(self.warnings);
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Err(ConfigError::Invalid(messages.join("; ")))
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_snapshot(config, &mut result);
        Self::validate_stabilization(config, &mut result);
        Self::validate_preflight(config, &mut result);

        result
    }

    /// Reject a configuration with errors; warnings are logged.
    pub fn ensure_valid(config: &Config) -> Result<(), ConfigError> {
        for warning in Self::validate(config).into_result()? {
            warn!(path = %warning.path, "{}", warning.message);
        }
        Ok(())
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "Endpoint must be an http(s) URL",
            ));
        }

        if config.browser.request_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "browser.request_timeout_ms",
                "request_timeout_ms must be greater than 0",
            ));
        }
    }

    fn validate_snapshot(config: &Config, result: &mut ValidationResult) {
        if config.snapshot.max_name_length == 0 {
            result.add_error(ValidationError::new(
                "snapshot.max_name_length",
                "max_name_length must be greater than 0",
            ));
        }

        if config.snapshot.max_iframe_depth > 10 {
            result.add_warning(ValidationWarning::new(
                "snapshot.max_iframe_depth",
                "max_iframe_depth is very high (>10), snapshots of framed pages may get large",
            ));
        }
    }

    fn validate_stabilization(config: &Config, result: &mut ValidationResult) {
        let stabilization = &config.stabilization;

        if stabilization.poll_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "stabilization.poll_interval_ms",
                "poll_interval_ms must be greater than 0",
            ));
        }

        if stabilization.load_timeout_ms == 0 {
            result.add_warning(ValidationWarning::new(
                "stabilization.load_timeout_ms",
                "load_timeout_ms is 0, the full-load wait will always time out",
            ));
        }

        if stabilization.settle_delay_ms > 10000 {
            result.add_warning(ValidationWarning::new(
                "stabilization.settle_delay_ms",
                "settle_delay_ms is above 10s, every navigating action will be slow",
            ));
        }
    }

    fn validate_preflight(config: &Config, result: &mut ValidationResult) {
        if config.preflight.max_wait_seconds == 0 {
            result.add_warning(ValidationWarning::new(
                "preflight.max_wait_seconds",
                "max_wait_seconds is 0, every non-zero wait will be rejected",
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
