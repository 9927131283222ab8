use std::path::PathBuf;

/// XDG app name used for every path the widget touches.
pub const APP_NAME: &str = "quote-widget";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

fn runtime_dir_for(runtime_root: Option<&str>, uid: u32) -> PathBuf {
    if let Some(runtime_root) = runtime_root {
        return PathBuf::from(runtime_root).join(APP_NAME);
    }
    PathBuf::from("/tmp").join(format!("{APP_NAME}-{uid}"))
}

fn effective_uid() -> u32 {
    #[cfg(unix)]
    {
        // SAFETY: `geteuid` has no preconditions and returns caller effective UID.
        unsafe { libc::geteuid() }
    }
    #[cfg(not(unix))]
    {
        0
    }
}

/// Directory holding `config.toml`.
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Durable storage directory (survives across sessions).
pub fn data_dir() -> PathBuf {
    if let Some(dirs) = project_dirs() {
        return dirs.data_dir().to_path_buf();
    }
    std::env::temp_dir().join(format!("{APP_NAME}-data"))
}

/// Session-scoped storage directory.
///
/// Lives under `$XDG_RUNTIME_DIR`, which the login manager wipes when the
/// user session ends. Falls back to a per-uid directory in `/tmp`.
pub fn session_dir() -> PathBuf {
    let runtime_root = std::env::var("XDG_RUNTIME_DIR").ok();
    runtime_dir_for(runtime_root.as_deref(), effective_uid())
}
