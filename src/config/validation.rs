//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use std::collections::HashSet;

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("channels.restricted_language_mode must be 0..=3, got {0}")]
    InvalidLanguageMode(u8),
    #[error("channels.gm_level_in_who_list must be 0..=3, got {0}")]
    InvalidWhoListLevel(u8),
    #[error("limits.mailbox_capacity must be non-zero")]
    ZeroMailboxCapacity,
    #[error("limits.max_channel_name_length must be non-zero")]
    ZeroNameLength,
    #[error("catalog entry '{0}' has id 0; built-in ids must be non-zero")]
    ZeroCatalogId(String),
    #[error("catalog id {0} is used more than once")]
    DuplicateCatalogId(u32),
    #[error("catalog entry with id {0} has an empty name")]
    EmptyCatalogName(u32),
    #[error("catalog name '{0}' is used more than once")]
    DuplicateCatalogName(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let channels = &config.channels;
    if channels.restricted_language_mode > 3 {
        errors.push(ValidationError::InvalidLanguageMode(
            channels.restricted_language_mode,
        ));
    }
    if channels.gm_level_in_who_list > 3 {
        errors.push(ValidationError::InvalidWhoListLevel(
            channels.gm_level_in_who_list,
        ));
    }

    if config.limits.mailbox_capacity == 0 {
        errors.push(ValidationError::ZeroMailboxCapacity);
    }
    if config.limits.max_channel_name_length == 0 {
        errors.push(ValidationError::ZeroNameLength);
    }

    // Catalog identity checks
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for entry in &config.catalog {
        if entry.id == 0 {
            errors.push(ValidationError::ZeroCatalogId(entry.name.clone()));
        } else if !ids.insert(entry.id) {
            errors.push(ValidationError::DuplicateCatalogId(entry.id));
        }

        if entry.name.trim().is_empty() {
            errors.push(ValidationError::EmptyCatalogName(entry.id));
        } else if !names.insert(entry.name.to_lowercase()) {
            errors.push(ValidationError::DuplicateCatalogName(entry.name.clone()));
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
    use crate::config::CatalogEntry;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = Config::default();
        config.channels.restricted_language_mode = 7;
        config.channels.gm_level_in_who_list = 4;
        config.limits.mailbox_capacity = 0;

        let errors = validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::InvalidLanguageMode(7),
                ValidationError::InvalidWhoListLevel(4),
                ValidationError::ZeroMailboxCapacity,
            ]
        );
    }

    #[test]
    fn catalog_conflicts_are_reported() {
        let mut config = Config::default();
        config.catalog = vec![
            CatalogEntry::new("General", 1),
            CatalogEntry::new("general", 2),
            CatalogEntry::new("Trade", 2),
            CatalogEntry::new("", 0),
        ];

        let errors = validate(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::DuplicateCatalogName("general".into())));
        assert!(errors.contains(&ValidationError::DuplicateCatalogId(2)));
        assert!(errors.contains(&ValidationError::ZeroCatalogId(String::new())));
        assert!(errors.contains(&ValidationError::EmptyCatalogName(0)));
    }
}
