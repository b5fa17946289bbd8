use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::config::DirectoryConfig;

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub logs_dir: PathBuf,
    pub static_dir: PathBuf,
}

pub fn ensure_directories(cfg: &DirectoryConfig) -> Result<ResolvedPaths> {
    let logs_dir = ensure_dir(&cfg.logs_dir)?;

    let probe_file = logs_dir.join(".write-test");
    fs::write(&probe_file, b"ok")
        .with_context(|| format!("logs directory {} is not writable", logs_dir.display()))?;
    fs::remove_file(&probe_file)?;

    let static_dir = PathBuf::from(&cfg.static_dir);
    Ok(ResolvedPaths {
        logs_dir,
        static_dir: static_dir.canonicalize().unwrap_or(static_dir),
    })
}

fn ensure_dir(path: &str) -> Result<PathBuf> {
    let dir = PathBuf::from(path);
    if !dir.exists() {
        fs::create_dir_all(&dir).with_context(|| format!("failed to create directory {}", path))?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = fs::metadata(&dir) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o755);
            let _ = fs::set_permissions(&dir, perms);
        }
    }
    Ok(dir.canonicalize().unwrap_or(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_logs_dir() {
        let root = tempfile::tempdir().unwrap();
        let logs = root.path().join("nested/logs");
        let cfg = DirectoryConfig {
            logs_dir: logs.to_string_lossy().into_owned(),
            static_dir: root.path().join("static").to_string_lossy().into_owned(),
        };

        let paths = ensure_directories(&cfg).unwrap();
        assert!(paths.logs_dir.is_dir());
        assert!(!paths.logs_dir.join(".write-test").exists());
        assert!(paths.static_dir.ends_with("static"));
    }
}
