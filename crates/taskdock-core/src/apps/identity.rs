//! Turning raw window metadata into the lowercase identity string the
//! resolver matches on.

use crate::provider::WindowIdentity;

/// Generic class ids some toolkits report in place of the real application
/// class. When one of these comes first, the second class id is used.
const GENERIC_CLASS_IDS: &[&str] = &["wine"];

/// Interpreters whose own basename says nothing about the program; the
/// script they run is used instead.
const INTERPRETERS: &[&str] = &["python", "python3"];

/// Derive the identity string for a window.
///
/// Order: declared class id, executable basename from the process command
/// line, window title. The result is trimmed and lowercased.
pub fn identity_key(identity: &WindowIdentity) -> String {
    let raw = class_name(&identity.class_ids)
        .or_else(|| executable_name(&identity.command_line))
        .unwrap_or(identity.title.as_str());
    raw.trim().to_lowercase()
}

fn class_name(class_ids: &[String]) -> Option<&str> {
    let first = class_ids.first().map(|s| s.trim()).filter(|s| !s.is_empty())?;
    let second = class_ids.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

    match second {
        Some(second) if GENERIC_CLASS_IDS.contains(&first.to_lowercase().as_str()) => Some(second),
        _ => Some(first),
    }
}

fn executable_name(command_line: &[String]) -> Option<&str> {
    let mut args = command_line.iter().map(|arg| basename(arg)).filter(|a| !a.is_empty());
    let exe = args.next()?;
    if INTERPRETERS.contains(&exe) {
        return args.next();
    }
    Some(exe)
}

/// Final path component of `path`, without trailing slashes.
pub(crate) fn basename(path: &str) -> &str {
    let trimmed = path.trim().trim_end_matches('/');
    trimmed.rsplit('/').next().unwrap_or(trimmed)
}
