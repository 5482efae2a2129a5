//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Taskdock Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[behavior]
# show_all_workspaces = true       # false: only windows on the active workspace
# show_all_monitors = true         # false: only windows on the panel's monitor
# middle_click = "close-all"       # close-all | launch-new | nothing
# no_window_list_if_single = false
# show_window_count = false

[pinned]
# Desktop entry ids, in button order.
apps = []

# Force an identity onto a specific desktop entry.
# [[launchers]]
# identity = "code-oss"
# path = "/usr/share/applications/code.desktop"

[directory]
# extra_dirs = []                  # searched after the XDG application dirs
# watch = true                     # rebuild groups when entries change

[logging]
# level = "INFO"                   # DEBUG | INFO | WARNING | ERROR
"##
    .to_string()
}
