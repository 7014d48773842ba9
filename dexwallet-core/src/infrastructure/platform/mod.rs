//! Platform-specific storage implementations
//!
//! Key-value persistence used by the application state store. Keys are
//! plain identifiers (`dexwallet_app_state`), values are opaque bytes.

use crate::shared::constants::STORAGE_DIR_NAME;
use crate::shared::error::WalletError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Platform-specific storage implementation
pub trait PlatformStorage: Send + Sync {
    /// Store data
    fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError>;

    /// Retrieve data
    fn retrieve(&self, key: &str) -> Result<Vec<u8>, WalletError>;

    /// Delete data
    fn delete(&self, key: &str) -> Result<(), WalletError>;

    /// Check if data exists
    fn exists(&self, key: &str) -> Result<bool, WalletError>;
}

/// File-per-key storage under the OS data directory
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    /// Storage rooted at `<data_dir>/dexwallet`
    pub fn new() -> Result<Self, WalletError> {
        let base_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("./storage"));
        Self::with_dir(base_dir.join(STORAGE_DIR_NAME))
    }

    pub fn with_dir(dir: impl AsRef<Path>) -> Result<Self, WalletError> {
        let base_dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .map_err(|e| WalletError::storage(format!("Failed to create dir {}: {}", base_dir.display(), e)))?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    // Helper: reject keys that could escape the storage directory
    fn file_path(&self, key: &str) -> Result<PathBuf, WalletError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(WalletError::validation(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.base_dir.join(format!("{}.json", key)))
    }
}

impl PlatformStorage for FileStorage {
    fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError> {
        let path = self.file_path(key)?;
        let tmp_path = path.with_extension("json.tmp");
        {
            let mut file = File::create(&tmp_path)?;
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
            file.write_all(data)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Vec<u8>, WalletError> {
        let path = self.file_path(key)?;
        fs::read(&path).map_err(|e| WalletError::storage(format!("Failed to read {}: {}", key, e)))
    }

    fn delete(&self, key: &str) -> Result<(), WalletError> {
        let _ = fs::remove_file(self.file_path(key)?);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, WalletError> {
        Ok(self.file_path(key)?.exists())
    }
}

/// Volatile storage for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, WalletError> {
        self.data
            .lock()
            .map_err(|_| WalletError::internal("Memory storage lock poisoned"))
    }
}

impl PlatformStorage for MemoryStorage {
    fn store(&self, key: &str, data: &[u8]) -> Result<(), WalletError> {
        self.lock()?.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> Result<Vec<u8>, WalletError> {
        self.lock()?
            .get(key)
            .cloned()
            .ok_or_else(|| WalletError::storage(format!("Key not found: {}", key)))
    }

    fn delete(&self, key: &str) -> Result<(), WalletError> {
        self.lock()?.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> Result<bool, WalletError> {
        Ok(self.lock()?.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_operations() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::with_dir(dir.path()).expect("Failed to create storage");

        storage.store("app_state", b"{\"slippage\":1.0}")
            .expect("Failed to store data");
        assert!(storage.exists("app_state").expect("Failed to check key"));
        assert_eq!(
            storage.retrieve("app_state").expect("Failed to retrieve data"),
            b"{\"slippage\":1.0}"
        );
        assert!(dir.path().join("app_state.json").exists());

        storage.delete("app_state").expect("Failed to delete data");
        assert!(!storage.exists("app_state").expect("Failed to check key"));
        assert!(storage.retrieve("app_state").is_err());
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = FileStorage::with_dir(dir.path()).expect("Failed to create storage");

        assert!(storage.store("../escape", b"x").is_err());
        assert!(storage.store("", b"x").is_err());
    }

    #[test]
    fn test_memory_storage_operations() {
        let storage = MemoryStorage::new();
        storage.store("b", b"2").expect("Failed to store data");
        storage.store("a", b"1").expect("Failed to store data");

        assert!(storage.exists("b").expect("Failed to check key"));
        assert_eq!(storage.retrieve("a").expect("Failed to retrieve data"), b"1");

        storage.delete("a").expect("Failed to delete data");
        assert!(matches!(storage.retrieve("a"), Err(WalletError::Storage(_))));
    }
}
