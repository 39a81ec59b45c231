use crate::config::Config;
use crate::error::{Result, SchemaLinksError, ValidationError};

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration
    pub fn validate(config: &Config) -> Result<()> {
        let mut errors = Vec::new();

        Self::validate_schema_version(config, &mut errors);
        Self::validate_storage(config, &mut errors);
        Self::validate_integrations(config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaLinksError::ConfigValidation { errors })
        }
    }

    fn validate_schema_version(config: &Config, errors: &mut Vec<ValidationError>) {
        let version = &config.meta.schema_version;
        if version != "1.0.0" {
            errors.push(ValidationError::new(
                "_meta.schema_version",
                format!("Unsupported schema version: {}", version),
            ));
        }
    }

    fn validate_storage(config: &Config, errors: &mut Vec<ValidationError>) {
        if config.storage.data_dir.as_os_str().is_empty() {
            errors.push(ValidationError::new(
                "storage.data_dir",
                "Data directory path cannot be empty",
            ));
        }
    }

    fn validate_integrations(config: &Config, errors: &mut Vec<ValidationError>) {
        // An empty field name with the integration enabled is allowed: the
        // term scan degrades to "no links found" at render time. A field
        // name with whitespace can never match a field key.
        let field_name = &config.integrations.term_field_name;
        if field_name.trim() != field_name || field_name.contains(char::is_whitespace) {
            errors.push(ValidationError::new(
                "integrations.term_field_name",
                format!("Field name must not contain whitespace: '{}'", field_name),
            ));
        }
    }
}
