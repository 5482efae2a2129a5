use std::path::PathBuf;

/// Fallback for an unset or empty `$XDG_DATA_DIRS`.
const DEFAULT_DATA_DIRS: &str = "/usr/local/share:/usr/share";

/// Directories desktop entries are read from, highest priority first:
/// `$XDG_DATA_HOME/applications`, then each `$XDG_DATA_DIRS` entry's
/// `applications/`.
pub fn application_dirs() -> Vec<PathBuf> {
    let data_dirs = std::env::var("XDG_DATA_DIRS").ok();
    application_dirs_from(dirs::data_dir(), data_dirs.as_deref())
}

pub(crate) fn application_dirs_from(
    data_home: Option<PathBuf>,
    data_dirs: Option<&str>,
) -> Vec<PathBuf> {
    let data_dirs = data_dirs
        .filter(|dirs| !dirs.trim().is_empty())
        .unwrap_or(DEFAULT_DATA_DIRS);

    let mut result: Vec<PathBuf> = Vec::new();
    let candidates = data_home.into_iter().chain(
        data_dirs
            .split(':')
            .filter(|d| !d.is_empty())
            .map(PathBuf::from),
    );
    for base in candidates {
        let dir = base.join("applications");
        if !result.contains(&dir) {
            result.push(dir);
        }
    }
    result
}
