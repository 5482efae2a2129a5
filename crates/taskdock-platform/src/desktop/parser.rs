use std::collections::HashMap;
use std::path::Path;

use taskdock_common::DirectoryError;
use taskdock_core::Application;

const MAIN_GROUP: &str = "Desktop Entry";
const ACTION_PREFIX: &str = "Desktop Action ";

/// One parsed `.desktop` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopEntry {
    pub app: Application,
    /// `Type=`, when present.
    pub entry_type: Option<String>,
    /// `Hidden=true` marks an entry as deleted.
    pub hidden: bool,
    action_execs: HashMap<String, String>,
}

impl DesktopEntry {
    /// Whether the entry describes something the dock can group windows
    /// under.
    pub fn is_listed(&self) -> bool {
        !self.hidden && !matches!(self.entry_type.as_deref(), Some(t) if t != "Application")
    }

    pub fn action_exec(&self, action: &str) -> Option<&str> {
        self.action_execs.get(action).map(String::as_str)
    }
}

/// Parse the text of a desktop entry whose id is `id`.
pub fn parse_desktop_entry(
    id: &str,
    path: &Path,
    content: &str,
) -> Result<DesktopEntry, DirectoryError> {
    let invalid = |reason: &str| DirectoryError::InvalidEntry {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let mut groups: HashMap<String, HashMap<String, String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or_else(|| invalid(&format!("malformed group header '{line}'")))?;
            groups.entry(name.to_string()).or_default();
            current = Some(name.to_string());
            continue;
        }
        let Some(group) = current.as_ref() else {
            return Err(invalid("key outside of any group"));
        };
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        // Localized variants such as Name[de] are not used.
        if key.contains('[') {
            continue;
        }
        if let Some(keys) = groups.get_mut(group) {
            keys.entry(key.to_string())
                .or_insert_with(|| unescape(value.trim()));
        }
    }

    let main = groups
        .get(MAIN_GROUP)
        .ok_or_else(|| invalid("missing [Desktop Entry] group"))?;
    let name = main
        .get("Name")
        .filter(|n| !n.is_empty())
        .ok_or_else(|| invalid("missing Name"))?;

    let mut app = Application::new(id, name.clone()).with_path(path);
    app.icon = non_empty(main.get("Icon"));
    app.exec = non_empty(main.get("Exec"));
    app.startup_wm_class = non_empty(main.get("StartupWMClass"));
    app.no_display = is_true(main.get("NoDisplay"));

    let mut action_execs = HashMap::new();
    for action in list(main.get("Actions")) {
        let Some(keys) = groups.get(&format!("{ACTION_PREFIX}{action}")) else {
            continue;
        };
        let Some(action_name) = keys.get("Name").filter(|n| !n.is_empty()) else {
            continue;
        };
        app = app.with_action(action, action_name.clone());
        if let Some(exec) = non_empty(keys.get("Exec")) {
            action_execs.insert(action.to_string(), exec);
        }
    }

    Ok(DesktopEntry {
        app,
        entry_type: non_empty(main.get("Type")),
        hidden: is_true(main.get("Hidden")),
        action_execs,
    })
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

fn is_true(value: Option<&String>) -> bool {
    value.is_some_and(|v| v == "true")
}

fn list(value: Option<&String>) -> impl Iterator<Item = &str> {
    value
        .into_iter()
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Resolve the string escapes desktop entries allow.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
