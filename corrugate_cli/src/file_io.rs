//! # Workbook Files
//!
//! - **Atomic saves**: write a sibling `.tmp`, fsync, rename over the target
//! - **Locking**: an OS-level exclusive lock plus a `.lock` file naming the holder
//! - **Version validation**: workbooks from a newer schema are refused
//!
//! ```rust,no_run
//! use std::path::Path;
//! use corrugate_cli::file_io::{load_workbook, save_workbook, FileLock};
//!
//! let path = Path::new("plant.json");
//! let lock = FileLock::acquire(path, "costing@plant")?;
//! let mut workbook = load_workbook(path)?;
//! workbook.touch();
//! save_workbook(&workbook, path)?;
//! drop(lock);
//! # Ok::<(), corrugate_core::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use corrugate_core::errors::{CalcError, CalcResult};

use crate::workbook::{Workbook, SCHEMA_VERSION};

/// Locks older than this are taken over regardless of holder
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.lock` file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// Whether the holder is gone or the lock has simply been left behind
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    if cfg!(windows) {
        std::env::var("COMPUTERNAME").ok()
    } else {
        std::env::var("HOSTNAME").or_else(|_| std::env::var("HOST")).ok()
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a workbook, released on drop.
pub struct FileLock {
    workbook_path: PathBuf,
    lock_path: PathBuf,
    // Holds the OS lock
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Lock a workbook for editing.
    ///
    /// Fails with [`CalcError::FileLocked`] while another live process holds
    /// it; a stale lock is taken over.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = sibling_path(path, "lock");

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            warn!(holder = %existing.user_id, path = %path.display(), "taking over stale workbook lock");
        }

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| io_error("create lock", &lock_path, e))?;

        handle.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_vec_pretty(&info)?;
        handle
            .write_all(&json)
            .and_then(|_| handle.sync_all())
            .map_err(|e| io_error("write lock", &lock_path, e))?;

        debug!(path = %path.display(), "workbook locked");
        Ok(FileLock {
            workbook_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Current live lock on a workbook, if any
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&sibling_path(path, "lock")).filter(|info| !info.is_stale())
    }

    pub fn workbook_path(&self) -> &Path {
        &self.workbook_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn io_error(operation: &str, path: &Path, error: std::io::Error) -> CalcError {
    CalcError::file_error(operation, path.display().to_string(), error.to_string())
}

/// `plant.json` → `plant.json.<suffix>`
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

/// Unreadable or malformed lock files count as no lock
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a workbook atomically.
pub fn save_workbook(workbook: &Workbook, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(workbook)?;
    let tmp_path = sibling_path(path, "tmp");

    let write_tmp = || -> std::io::Result<()> {
        let mut tmp = File::create(&tmp_path)?;
        tmp.write_all(json.as_bytes())?;
        tmp.sync_all()
    };
    write_tmp().map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("write temp file", &tmp_path, e)
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        io_error("rename to final", path, e)
    })?;

    debug!(path = %path.display(), requests = workbook.requests.len(), "workbook saved");
    Ok(())
}

/// Load a workbook and check its schema version.
pub fn load_workbook(path: &Path) -> CalcResult<Workbook> {
    let contents = fs::read_to_string(path).map_err(|e| io_error("read", path, e))?;

    let workbook: Workbook = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid workbook {}: {}", path.display(), e),
    })?;

    validate_version(&workbook.meta.version)?;
    Ok(workbook)
}

/// Load a workbook along with whoever currently holds its lock.
pub fn load_workbook_with_lock_check(path: &Path) -> CalcResult<(Workbook, Option<LockInfo>)> {
    let workbook = load_workbook(path)?;
    Ok((workbook, FileLock::check(path)))
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>().ok());
    let major = parts.next()??;
    let minor = parts.next().flatten().unwrap_or(0);
    Some((major, minor))
}

/// Major versions must match; during 0.x a newer minor is also refused.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse_version(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corrugate_core::boxes::BoxRecord;
    use corrugate_core::repository::BoxRepository;
    use tempfile::TempDir;

    fn workbook_path(dir: &TempDir) -> PathBuf {
        dir.path().join("plant.json")
    }

    fn sample_box() -> BoxRecord {
        serde_json::from_str(r#"{"id":"BOX-1","length":300,"width":200,"height":150}"#).unwrap()
    }

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/data/plant.json");
        assert_eq!(sibling_path(path, "lock"), Path::new("/data/plant.json.lock"));
        assert_eq!(sibling_path(path, "tmp"), Path::new("/data/plant.json.tmp"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = workbook_path(&dir);

        let mut workbook = Workbook::new("Acme Packaging");
        workbook.master.boxes.push(sample_box());
        save_workbook(&workbook, &path).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.meta.company, "Acme Packaging");
        assert!(loaded.find_box("BOX-1").unwrap().is_some());
        assert!(!sibling_path(&path, "tmp").exists());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_workbook(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = workbook_path(&dir);
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_workbook(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let dir = TempDir::new().unwrap();
        let path = workbook_path(&dir);
        let mut workbook = Workbook::new("Acme");
        workbook.meta.version = "0.9.0".to_string();
        save_workbook(&workbook, &path).unwrap();
        assert_eq!(load_workbook(&path).unwrap_err().error_code(), "VERSION_MISMATCH");
    }

    #[test]
    fn test_lock_acquire_and_release() {
        let dir = TempDir::new().unwrap();
        let path = workbook_path(&dir);
        save_workbook(&Workbook::default(), &path).unwrap();

        let lock = FileLock::acquire(&path, "costing@plant").unwrap();
        assert_eq!(lock.info.user_id, "costing@plant");
        assert!(sibling_path(&path, "lock").exists());

        let (_, holder) = load_workbook_with_lock_check(&path).unwrap();
        assert_eq!(holder.map(|h| h.user_id).as_deref(), Some("costing@plant"));

        drop(lock);
        assert!(!sibling_path(&path, "lock").exists());
        assert!(FileLock::check(&path).is_none());
    }

    #[test]
    fn test_stale_lock_is_taken_over() {
        let dir = TempDir::new().unwrap();
        let path = workbook_path(&dir);
        let mut old = LockInfo::new("someone@else");
        old.locked_at = Utc::now() - chrono::Duration::hours(STALE_LOCK_HOURS + 1);
        fs::write(sibling_path(&path, "lock"), serde_json::to_string(&old).unwrap()).unwrap();

        assert!(FileLock::check(&path).is_none());
        let lock = FileLock::acquire(&path, "me@plant").unwrap();
        assert_eq!(lock.info.user_id, "me@plant");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
