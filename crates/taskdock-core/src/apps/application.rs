//! Application records and the keys groups refer to them by.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How a group refers to its application.
///
/// Desktop entries are keyed by their lowercase id. Placeholders synthesized
/// for unmatched windows are keyed by the identity string that missed, so
/// every window of one unknown program lands in the same group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AppKey {
    Entry(String),
    Unresolved(String),
}

impl AppKey {
    pub fn entry(id: impl Into<String>) -> Self {
        Self::Entry(id.into().to_lowercase())
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Unresolved(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Entry(id) | Self::Unresolved(id) => id,
        }
    }
}

impl fmt::Display for AppKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry(id) => write!(f, "{id}"),
            Self::Unresolved(identity) => write!(f, "?{identity}"),
        }
    }
}

/// A named desktop action (`[Desktop Action <id>]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppAction {
    pub id: String,
    pub name: String,
}

/// Identity of a launchable program. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Desktop entry id as found on disk (file basename without `.desktop`).
    /// Empty for placeholders.
    pub id: String,
    pub name: String,
    pub icon: Option<String>,
    pub path: Option<PathBuf>,
    pub exec: Option<String>,
    pub startup_wm_class: Option<String>,
    #[serde(default)]
    pub actions: Vec<AppAction>,
    #[serde(default)]
    pub no_display: bool,
}

impl Application {
    /// A bare desktop entry with only an id and a display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: None,
            path: None,
            exec: None,
            startup_wm_class: None,
            actions: Vec::new(),
            no_display: false,
        }
    }

    /// Stand-in for an identity no desktop entry matched.
    pub fn placeholder(identity: impl Into<String>) -> Self {
        Self::new(String::new(), identity)
    }

    pub fn with_exec(mut self, exec: impl Into<String>) -> Self {
        self.exec = Some(exec.into());
        self
    }

    pub fn with_wm_class(mut self, class: impl Into<String>) -> Self {
        self.startup_wm_class = Some(class.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_action(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.actions.push(AppAction {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_empty()
    }

    pub fn key(&self) -> AppKey {
        if self.is_placeholder() {
            AppKey::Unresolved(self.name.clone())
        } else {
            AppKey::entry(&self.id)
        }
    }

    pub fn action(&self, id: &str) -> Option<&AppAction> {
        self.actions.iter().find(|a| a.id == id)
    }
}
