//! # Job File I/O
//!
//! Reading and writing job books with:
//! - **Atomic saves**: write to .tmp, fsync, rename over the original
//! - **File locking**: a van laptop and the office PC sharing one folder
//!   should not both write the same book
//! - **Version checks**: refuse files from a newer schema
//!
//! ## File Format
//!
//! Job books are `.tcj` files containing pretty-printed JSON. The lock sits
//! beside it as `.tcj.lock`, holding who took it and when.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trade_core::file_io::{save_job_book, load_job_book, FileLock};
//! use trade_core::job::JobBook;
//! use std::path::Path;
//!
//! let book = JobBook::new("Acme Electrical");
//! let path = Path::new("jobs.tcj");
//!
//! let lock = FileLock::acquire(path, "office")?;
//! save_job_book(&book, path)?;
//! drop(lock);
//!
//! let loaded = load_job_book(path)?;
//! # Ok::<(), trade_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::job::{JobBook, SCHEMA_VERSION};

/// Extension used for job book files
pub const JOB_BOOK_EXTENSION: &str = "tcj";

/// Locks older than this are taken over regardless of owner
const STALE_LOCK_HOURS: i64 = 24;

/// Contents of a `.tcj.lock` file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who took the lock (name, device, email)
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

    /// A lock is stale when its process is gone from this machine, or when
    /// it is older than a day.
    fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > STALE_LOCK_HOURS
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    fs::metadata(format!("/proc/{}", pid)).is_ok()
}

#[cfg(windows)]
fn process_alive(pid: u32) -> bool {
    use std::process::Command;
    match Command::new("tasklist")
        .args(["/FI", &format!("PID eq {}", pid), "/NH"])
        .output()
    {
        Ok(output) => String::from_utf8_lossy(&output.stdout).contains(&pid.to_string()),
        Err(_) => true,
    }
}

#[cfg(not(any(unix, windows)))]
fn process_alive(_pid: u32) -> bool {
    true
}

/// Exclusive lock on a job book, released on drop.
///
/// Combines an OS-level lock (fs2) on the lock file with the JSON
/// [`LockInfo`] inside it, so other users can see who has the book open.
pub struct FileLock {
    book_path: PathBuf,
    lock_path: PathBuf,
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Take the lock on `path`.
    ///
    /// Fails with [`CalcError::FileLocked`] when someone else holds a live lock.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let info = LockInfo::new(user_id);

        if let Some(existing) = read_lock_info(&lock_path) {
            if !existing.is_stale() {
                return Err(CalcError::file_locked(
                    path.display().to_string(),
                    format!("{} ({})", existing.user_id, existing.machine),
                    existing.locked_at.to_rfc3339(),
                ));
            }
            warn!(
                path = %path.display(),
                holder = %existing.user_id,
                "taking over stale lock"
            );
        }

        let mut lock_file = OpenOptions::new()
            .write(true)
            .read(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("create lock", lock_path.display().to_string(), e.to_string()))?;

        lock_file.try_lock_exclusive().map_err(|_| {
            CalcError::file_locked(path.display().to_string(), "another process", "unknown")
        })?;

        let lock_json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })?;
        lock_file
            .write_all(lock_json.as_bytes())
            .and_then(|_| lock_file.sync_all())
            .map_err(|e| CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string()))?;

        debug!(path = %path.display(), user = %info.user_id, "job book locked");

        Ok(FileLock {
            book_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Who holds a live lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path)).filter(|info| !info.is_stale())
    }

    pub fn book_path(&self) -> &Path {
        &self.book_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
    }
}

/// `jobs.tcj` -> `jobs.tcj.lock`
fn lock_path_for(book_path: &Path) -> PathBuf {
    let mut lock_path = book_path.to_path_buf();
    let extension = lock_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    lock_path.set_extension(extension);
    lock_path
}

/// Unreadable or malformed lock files count as no lock.
fn read_lock_info(lock_path: &Path) -> Option<LockInfo> {
    let contents = fs::read_to_string(lock_path).ok()?;
    serde_json::from_str(&contents).ok()
}

/// Save a job book atomically.
///
/// Serializes to `<path>.tmp`, syncs it to disk, then renames it over
/// `path`, so an interrupted save leaves the previous file intact.
pub fn save_job_book(book: &JobBook, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(book).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension(format!("{}.tmp", JOB_BOOK_EXTENSION));

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;
    tmp_file
        .sync_all()
        .map_err(|e| CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    debug!(path = %path.display(), jobs = book.job_count(), "job book saved");
    Ok(())
}

/// Load a job book, checking its schema version.
pub fn load_job_book(path: &Path) -> CalcResult<JobBook> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let book: JobBook = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&book.meta.version)?;

    debug!(path = %path.display(), jobs = book.job_count(), "job book loaded");
    Ok(book)
}

/// Load a job book, or start an empty one when the file does not exist yet.
pub fn load_or_create_job_book(path: &Path, owner: &str) -> CalcResult<JobBook> {
    if path.exists() {
        load_job_book(path)
    } else {
        Ok(JobBook::new(owner))
    }
}

/// Load a job book along with whoever currently holds its lock.
pub fn load_job_book_with_lock_check(path: &Path) -> CalcResult<(JobBook, Option<LockInfo>)> {
    let book = load_job_book(path)?;
    Ok((book, FileLock::check(path)))
}

/// Same major version required; under 0.x a newer minor is also refused.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version);
    let current_parts = parse(SCHEMA_VERSION);

    let (Some(&file_major), Some(&current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };
    if file_major != current_major {
        return Err(mismatch());
    }

    if current_major == 0 {
        if let (Some(&file_minor), Some(&current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CalculationItem, SkirtingInput};
    use crate::job::SavedJob;
    use crate::pricing::DEFAULT_PRICE_LIST;
    use std::env::temp_dir;

    fn temp_book_path(name: &str) -> PathBuf {
        temp_dir().join(format!("tradecalc_test_{}_{}.tcj", name, std::process::id()))
    }

    fn sample_book() -> JobBook {
        let mut book = JobBook::new("Test Joinery");
        let item = CalculationItem::Skirting(SkirtingInput {
            label: "Hallway".to_string(),
            perimeter_m: 12.0,
            doors: 3,
            door_width_m: 0.8,
            stock_length_m: 4.2,
            waste_percent: 10.0,
        });
        book.add_job(SavedJob::run(item, &DEFAULT_PRICE_LIST).unwrap());
        book
    }

    #[test]
    fn test_lock_path_generation() {
        let lock_path = lock_path_for(Path::new("/jobs/2025.tcj"));
        assert_eq!(lock_path, Path::new("/jobs/2025.tcj.lock"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_book_path("roundtrip");
        save_job_book(&sample_book(), &path).unwrap();

        let loaded = load_job_book(&path).unwrap();
        assert_eq!(loaded.meta.owner, "Test Joinery");
        assert_eq!(loaded.job_count(), 1);
        let job = loaded.jobs.values().next().unwrap();
        assert_eq!(job.label, "Hallway");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_leaves_no_tmp_file() {
        let path = temp_book_path("atomic");
        let tmp_path = path.with_extension("tcj.tmp");
        save_job_book(&sample_book(), &path).unwrap();
        assert!(!tmp_path.exists());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_lock_acquire_and_release() {
        let path = temp_book_path("lock");
        File::create(&path).unwrap();

        let lock = FileLock::acquire(&path, "van-laptop").unwrap();
        assert_eq!(lock.info.user_id, "van-laptop");
        let lock_path = lock_path_for(&path);
        assert!(lock_path.exists());

        drop(lock);
        assert!(!lock_path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_old_lock_is_stale() {
        let mut info = LockInfo::new("someone");
        info.machine = "another-machine".to_string();
        assert!(!info.is_stale());
        info.locked_at = Utc::now() - chrono::Duration::hours(25);
        assert!(info.is_stale());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }

    #[test]
    fn test_newer_schema_refused_on_load() {
        let path = temp_book_path("newer");
        let mut book = sample_book();
        book.meta.version = "0.9.0".to_string();
        save_job_book(&book, &path).unwrap();

        let err = load_job_book(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_or_create_missing_file() {
        let path = temp_book_path("missing");
        let _ = fs::remove_file(&path);
        let book = load_or_create_job_book(&path, "New Owner").unwrap();
        assert_eq!(book.job_count(), 0);
        assert_eq!(book.meta.owner, "New Owner");
    }

    #[test]
    fn test_load_with_lock_check() {
        let path = temp_book_path("lock_check");
        save_job_book(&sample_book(), &path).unwrap();

        let (loaded, lock_info) = load_job_book_with_lock_check(&path).unwrap();
        assert_eq!(loaded.job_count(), 1);
        assert!(lock_info.is_none());
        let _ = fs::remove_file(&path);
    }
}
