use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings read from `.lang-publisher.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublisherSettings {
    /// Directory holding vendor packages, relative to the workspace.
    pub vendor_path: String,
    /// Package that ships the translations (e.g., "laravel-lang/lang").
    pub package: String,
    /// Subdirectory of the package containing one directory per locale.
    /// Empty when locales sit directly in the package root.
    pub locales_dir: String,
    /// Application language directory, relative to the workspace.
    pub lang_path: String,

    /// Source files to publish, matched against the path inside a locale.
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,

    /// Prefer `name-inline.ext` over `name.ext` when the vendor ships both.
    pub inline: bool,

    /// Locales that `uninstall` refuses to remove.
    pub default_locale: String,
    pub fallback_locale: Option<String>,

    /// Spaces per level in written files.
    pub indent: usize,
}

impl PublisherSettings {
    /// Locales that must stay installed.
    #[must_use]
    pub fn protected_locales(&self) -> Vec<&str> {
        let mut locales = vec![self.default_locale.as_str()];
        if let Some(fallback) = &self.fallback_locale
            && fallback != &self.default_locale
        {
            locales.push(fallback);
        }
        locales
    }

    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Indent out of range
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("vendorPath", &self.vendor_path),
            ("package", &self.package),
            ("langPath", &self.lang_path),
        ] {
            if value.trim().is_empty() {
                errors.push(ValidationError::new(
                    field,
                    "The path cannot be empty. Please specify a directory relative to the workspace",
                ));
            }
        }

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.default_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(fallback) = &self.fallback_locale
            && fallback.trim().is_empty()
        {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The locale cannot be empty. Please specify a locale, or remove this field",
            ));
        }

        if self.indent == 0 || self.indent > 8 {
            errors.push(ValidationError::new(
                "indent",
                format!("Indent must be between 1 and 8 spaces, got {}", self.indent),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for PublisherSettings {
    fn default() -> Self {
        Self {
            vendor_path: "vendor".to_string(),
            package: "laravel-lang/lang".to_string(),
            locales_dir: "locales".to_string(),
            lang_path: "resources/lang".to_string(),
            file_pattern: "*.json".to_string(),
            exclude_patterns: vec![],
            inline: false,
            default_locale: "en".to_string(),
            fallback_locale: None,
            indent: 4,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn validate_valid_settings() {
        let settings = PublisherSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    fn deserialize_partial_settings() {
        let json = r#"{"package": "acme/translations", "inline": true}"#;

        let settings: PublisherSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.package, eq("acme/translations"));
        assert_that!(settings.inline, eq(true));
        assert_that!(settings.lang_path, eq("resources/lang"));
        assert_that!(settings.fallback_locale, none());
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let json = "{}";

        let settings: PublisherSettings = serde_json::from_str(json).unwrap();

        assert_that!(settings.vendor_path, eq("vendor"));
        assert_that!(settings.locales_dir, eq("locales"));
        assert_that!(settings.file_pattern, eq("*.json"));
        assert_that!(settings.exclude_patterns, len(eq(0)));
        assert_that!(settings.indent, eq(4));
    }

    #[rstest]
    fn validate_invalid_lang_path_empty() {
        let settings = PublisherSettings { lang_path: String::new(), ..PublisherSettings::default() };
        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("langPath")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_exclude_pattern_invalid_glob() {
        let settings = PublisherSettings {
            exclude_patterns: vec!["packages/**".to_string(), "invalid[pattern".to_string()],
            ..PublisherSettings::default()
        };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![all![
                field!(ValidationError.field_path, eq("excludePatterns[1]")),
                field!(ValidationError.message, contains_substring("Invalid glob pattern")),
                field!(ValidationError.message, contains_substring("invalid[pattern"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_file_pattern_invalid_glob() {
        let settings =
            PublisherSettings { file_pattern: "*.{json".to_string(), ..PublisherSettings::default() };

        let result = settings.validate();

        assert_that!(
            result,
            err(elements_are![field!(ValidationError.field_path, eq("filePattern"))])
        );
    }

    #[rstest]
    #[case(0)]
    #[case(9)]
    fn validate_invalid_indent(#[case] indent: usize) {
        let settings = PublisherSettings { indent, ..PublisherSettings::default() };

        assert_that!(
            settings.validate(),
            err(elements_are![field!(ValidationError.field_path, eq("indent"))])
        );
    }

    #[rstest]
    fn protected_locales_include_fallback_once() {
        let settings = PublisherSettings {
            default_locale: "en".to_string(),
            fallback_locale: Some("de".to_string()),
            ..PublisherSettings::default()
        };
        let same = PublisherSettings {
            fallback_locale: Some("en".to_string()),
            ..PublisherSettings::default()
        };

        assert_eq!(settings.protected_locales(), vec!["en", "de"]);
        assert_eq!(same.protected_locales(), vec!["en"]);
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let settings = PublisherSettings {
            package: String::new(),
            default_locale: String::new(),
            ..PublisherSettings::default()
        };

        let errors = settings.validate().unwrap_err();
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. package"));
        assert_that!(error_message, contains_substring("2. defaultLocale"));
    }
}
