//! Full configuration validation.
//!
//! Each check pushes onto one error list; the caller gets every problem
//! in a single `ConfigError::ValidationError`.

mod helpers;


use std::collections::HashSet;

use taskdock_common::ConfigError;

use crate::schema::DockConfig;
use helpers::validate_not_empty;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &DockConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_pinned(&mut errors, config);
    validate_launchers(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_pinned(errors: &mut Vec<String>, config: &DockConfig) {
    let mut seen = HashSet::new();
    for (i, id) in config.pinned.apps.iter().enumerate() {
        validate_not_empty(errors, &format!("pinned.apps[{i}]"), id);
        if !id.trim().is_empty() && !seen.insert(id.as_str()) {
            errors.push(format!("pinned.apps[{i}] = '{id}' is pinned twice"));
        }
    }
}

fn validate_launchers(errors: &mut Vec<String>, config: &DockConfig) {
    for (i, launcher) in config.launchers.iter().enumerate() {
        validate_not_empty(errors, &format!("launchers[{i}].identity"), &launcher.identity);
        validate_not_empty(
            errors,
            &format!("launchers[{i}].path"),
            &launcher.path.to_string_lossy(),
        );
    }
}
