use taskdock_common::DirectoryError;

/// Field codes that expand to file, URL or entry arguments. A launch with
/// nothing to open drops them.
const FIELD_CODES: &[&str] = &[
    "%f", "%F", "%u", "%U", "%d", "%D", "%n", "%N", "%i", "%c", "%k", "%v", "%m",
];

/// Split an `Exec` value into argv with field codes removed.
pub fn command_line(app: &str, exec: &str) -> Result<Vec<String>, DirectoryError> {
    let failed = |reason: &str| DirectoryError::LaunchFailed {
        app: app.to_string(),
        reason: reason.to_string(),
    };

    let words = shlex::split(exec).ok_or_else(|| failed("unbalanced quotes in Exec"))?;
    let argv: Vec<String> = words
        .into_iter()
        .filter(|w| !FIELD_CODES.contains(&w.as_str()))
        .map(|w| w.replace("%%", "%"))
        .collect();

    if argv.is_empty() {
        return Err(failed("empty Exec"));
    }
    Ok(argv)
}
