use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

pub struct Config {
    pub db_path: PathBuf,
}

impl Config {
    /// Resolve the database location, creating its parent directory.
    ///
    /// `db_override` (from `--db`) takes precedence over the platform data dir.
    pub fn load(db_override: Option<&Path>) -> Result<Self> {
        let db_path = match db_override {
            Some(path) => path.to_path_buf(),
            None => {
                let proj_dirs = ProjectDirs::from("", "", "calopal")
                    .context("Could not determine home directory")?;
                proj_dirs.data_dir().join("calopal.db")
            }
        };

        if let Some(data_dir) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(data_dir).with_context(|| {
                format!("Failed to create data directory: {}", data_dir.display())
            })?;
        }

        Ok(Config { db_path })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_with_override_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("log.db");

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.db_path, path);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_load_with_bare_filename() {
        let config = Config::load(Some(Path::new("calopal.db"))).unwrap();
        assert_eq!(config.db_path, PathBuf::from("calopal.db"));
    }
}
