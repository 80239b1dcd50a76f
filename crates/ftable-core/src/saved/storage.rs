//! Backing storage for saved filter sets.
//!
//! The persisted layout is a single JSON array of [`SavedFilter`] objects.
//! [`JsonFileStorage`] keeps it in one file under the XDG data directory,
//! by default `~/.local/share/ftable/saved-filters.json`.
//! [`MemoryStorage`] keeps the same JSON text in process memory.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use super::model::SavedFilter;

/// Default storage filename.
const STORAGE_FILENAME: &str = "saved-filters.json";

/// Application qualifier (for XDG paths).
const QUALIFIER: &str = "";

/// Application organization (for XDG paths).
const ORGANIZATION: &str = "";

/// Application name (for XDG paths).
const APPLICATION: &str = "ftable";

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to determine XDG data directory.
    #[error("failed to determine data directory: no valid home directory found")]
    NoDataDir,

    /// I/O error during file read.
    #[error("failed to read saved filters '{path}': {source}")]
    ReadError {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file write.
    #[error("failed to write saved filters '{path}': {source}")]
    WriteError {
        /// The path that failed to write.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during directory creation.
    #[error("failed to create data directory '{path}': {source}")]
    CreateDirError {
        /// The directory path that failed to create.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// I/O error during file delete.
    #[error("failed to delete saved filters '{path}': {source}")]
    DeleteError {
        /// The path that failed to delete.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A place saved filter sets are read from and written to.
pub trait FilterStorage {
    /// Reads the persisted collection.
    ///
    /// Returns `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<Vec<SavedFilter>>>;

    /// Replaces the persisted collection.
    fn save(&self, filters: &[SavedFilter]) -> Result<()>;
}

/// Saved filters stored as a JSON file.
///
/// File operations are not coordinated between processes; two processes
/// saving at once may overwrite each other's changes.
///
/// # Example
///
/// ```no_run
/// use ftable_core::{FilterStorage, JsonFileStorage};
///
/// let storage = JsonFileStorage::new()?;
/// let filters = storage.load()?.unwrap_or_default();
/// storage.save(&filters)?;
/// # Ok::<(), ftable_core::StorageError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    /// Path to the JSON file.
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage at the default XDG data path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoDataDir` if the home directory cannot be determined.
    pub fn new() -> Result<Self> {
        let path = Self::default_path()?;
        Ok(Self { path })
    }

    /// Creates storage at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the default XDG path for the storage file.
    ///
    /// On Unix: `~/.local/share/ftable/saved-filters.json`
    /// On macOS: `~/Library/Application Support/ftable/saved-filters.json`
    /// On Windows: `C:\Users\<User>\AppData\Roaming\ftable\data\saved-filters.json`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NoDataDir` if the home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
            .ok_or(StorageError::NoDataDir)?;

        Ok(project_dirs.data_dir().join(STORAGE_FILENAME))
    }

    /// Returns the path to the storage file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns true if the storage file exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Deletes the storage file, so the next load seeds defaults again.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::DeleteError` if the file cannot be deleted.
    /// Does not return an error if the file doesn't exist.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteError {
                path: self.path.clone(),
                source: e,
            }),
        }
    }
}

impl FilterStorage for JsonFileStorage {
    /// # Errors
    ///
    /// - Returns `StorageError::ReadError` for I/O errors other than "file not found".
    /// - Returns `StorageError::Json` if the file contains invalid JSON.
    fn load(&self) -> Result<Option<Vec<SavedFilter>>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    /// Writes pretty-printed JSON atomically (temp file + rename), creating
    /// the parent directory if needed.
    ///
    /// # Errors
    ///
    /// - Returns `StorageError::CreateDirError` if the directory cannot be created.
    /// - Returns `StorageError::WriteError` if the file cannot be written.
    /// - Returns `StorageError::Json` if serialization fails.
    fn save(&self, filters: &[SavedFilter]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(filters)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).map_err(|e| StorageError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;
        fs::rename(&temp_path, &self.path).map_err(|e| StorageError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(())
    }
}

/// Saved filters kept in memory as JSON text.
///
/// Useful for tests and for embedding the store where no file system is
/// available. Seeding it with arbitrary text exercises the same parse path
/// as the file backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Creates empty storage (nothing persisted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage holding the given raw JSON text.
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
        }
    }

    /// Returns the raw persisted text, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl FilterStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<SavedFilter>>> {
        match self.contents.borrow().as_deref() {
            None => Ok(None),
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
        }
    }

    fn save(&self, filters: &[SavedFilter]) -> Result<()> {
        let json = serde_json::to_string(filters)?;
        *self.contents.borrow_mut() = Some(json);
        Ok(())
    }
}
