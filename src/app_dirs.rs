//! Where CardioAI keeps its files.
//!
//! Config, logs and the report storage share one `.cardioai` folder under the
//! OS config directory. Setting `CARDIOAI_CONFIG_HOME` moves that folder's
//! parent, which tests and portable installs rely on. Generated PDFs and JSON
//! go to the user's download folder unless the base was redirected.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};
use thiserror::Error;

/// Name of the application directory that lives under the config root.
pub const APP_DIR_NAME: &str = ".cardioai";
/// Environment variable that replaces the OS config root.
pub const CONFIG_HOME_ENV: &str = "CARDIOAI_CONFIG_HOME";

/// Folders created inside the application directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppSubdir {
    /// Per-launch log files.
    Logs,
    /// One file per persisted key (report, history, theme).
    Storage,
    /// Fallback target for downloads.
    Exports,
}

impl AppSubdir {
    pub const ALL: [AppSubdir; 3] = [AppSubdir::Logs, AppSubdir::Storage, AppSubdir::Exports];

    pub const fn name(self) -> &'static str {
        match self {
            AppSubdir::Logs => "logs",
            AppSubdir::Storage => "storage",
            AppSubdir::Exports => "exports",
        }
    }
}

#[derive(Debug, Error)]
pub enum AppDirError {
    #[error("No config directory found; set {CONFIG_HOME_ENV} to choose one")]
    NoBaseDir,
    #[error("Failed to create application directory at {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A resolved `.cardioai` location. Directories are created on first use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppDirs {
    root: PathBuf,
    redirected: bool,
}

impl AppDirs {
    /// Resolve from `CARDIOAI_CONFIG_HOME`, else the OS config directory.
    pub fn locate() -> Result<Self, AppDirError> {
        if let Some(base) = std::env::var_os(CONFIG_HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(Self::under(PathBuf::from(base)));
        }
        let dirs = BaseDirs::new().ok_or(AppDirError::NoBaseDir)?;
        Ok(Self {
            root: dirs.config_dir().join(APP_DIR_NAME),
            redirected: false,
        })
    }

    /// Anchor the application directory under an explicit base.
    pub fn under(base: impl AsRef<Path>) -> Self {
        Self {
            root: base.as_ref().join(APP_DIR_NAME),
            redirected: true,
        }
    }

    pub fn root(&self) -> Result<PathBuf, AppDirError> {
        create(&self.root)
    }

    pub fn subdir(&self, kind: AppSubdir) -> Result<PathBuf, AppDirError> {
        create(&self.root.join(kind.name()))
    }

    /// Download folder for a normal install; `exports/` when redirected or
    /// when the platform has no download folder.
    pub fn export_dir(&self) -> Result<PathBuf, AppDirError> {
        if !self.redirected
            && let Some(downloads) = UserDirs::new().and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        {
            return Ok(downloads);
        }
        self.subdir(AppSubdir::Exports)
    }
}

/// Return the root `.cardioai` directory, creating it if needed.
pub fn app_root_dir() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.root()
}

pub fn logs_dir() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.subdir(AppSubdir::Logs)
}

pub fn storage_dir() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.subdir(AppSubdir::Storage)
}

/// Where downloads land when `export.directory` is not configured.
pub fn default_export_dir() -> Result<PathBuf, AppDirError> {
    AppDirs::locate()?.export_dir()
}

fn create(path: &Path) -> Result<PathBuf, AppDirError> {
    std::fs::create_dir_all(path).map_err(|source| AppDirError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn redirected_base_holds_every_subdirectory() {
        let base = tempdir().unwrap();
        let dirs = AppDirs::under(base.path());
        let root = dirs.root().unwrap();
        assert_eq!(root, base.path().join(".cardioai"));
        for kind in AppSubdir::ALL {
            let path = dirs.subdir(kind).unwrap();
            assert_eq!(path, root.join(kind.name()));
            assert!(path.is_dir());
        }
    }

    #[test]
    fn redirected_exports_stay_out_of_the_download_folder() {
        let base = tempdir().unwrap();
        let exports = AppDirs::under(base.path()).export_dir().unwrap();
        assert_eq!(exports, base.path().join(".cardioai").join("exports"));
        assert!(exports.is_dir());
    }

    #[test]
    fn unwritable_base_reports_the_failing_path() {
        let base = tempdir().unwrap();
        let blocker = base.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let err = AppDirs::under(&blocker).root().unwrap_err();
        let AppDirError::CreateDir { path, .. } = err else {
            panic!("expected CreateDir, got {err:?}");
        };
        assert_eq!(path, blocker.join(".cardioai"));
    }
}
