//! Wallet persistence layer
//!
//! Provides save/load functionality for the wallet and its treasury.

use crate::multisig::TreasuryManager;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub wallet_file: String,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".multisig_data"),
            wallet_file: "wallet.json".to_string(),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Wallet storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Get the wallet file path
    fn wallet_path(&self) -> PathBuf {
        self.config.data_dir.join(&self.config.wallet_file)
    }

    /// Get a backup file path
    fn backup_path(&self, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.backup.{}", self.config.wallet_file, index))
    }

    /// Save the wallet to disk
    pub fn save(&self, manager: &TreasuryManager) -> Result<(), StorageError> {
        let path = self.wallet_path();

        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("wallet.tmp");
        write_json(manager, &temp_path)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::debug!("Saved wallet to {:?}", path);
        Ok(())
    }

    /// Load the wallet from disk
    pub fn load(&self) -> Result<TreasuryManager, StorageError> {
        let path = self.wallet_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Wallet file not found".to_string(),
            ));
        }

        load_from_file(&path)
    }

    /// Check if a saved wallet exists
    pub fn exists(&self) -> bool {
        self.wallet_path().exists()
    }

    /// Rotate backup files
    fn rotate_backups(&self) -> Result<(), StorageError> {
        // Delete oldest backup
        let oldest = self.backup_path(self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }

        Ok(())
    }

    /// Restore from a backup
    pub fn restore_backup(&self, backup_index: usize) -> Result<TreasuryManager, StorageError> {
        let backup_path = self.backup_path(backup_index);

        if !backup_path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} not found",
                backup_index
            )));
        }

        load_from_file(&backup_path)
    }

    /// List available backups
    pub fn list_backups(&self) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|i| self.backup_path(*i).exists())
            .collect()
    }

    /// Get storage statistics
    pub fn stats(&self) -> Result<StorageStats, StorageError> {
        let path = self.wallet_path();

        let file_size = if path.exists() {
            fs::metadata(&path)?.len()
        } else {
            0
        };

        Ok(StorageStats {
            file_size,
            backup_count: self.list_backups().len(),
            data_dir: self.config.data_dir.clone(),
        })
    }
}

/// Storage statistics
#[derive(Debug)]
pub struct StorageStats {
    pub file_size: u64,
    pub backup_count: usize,
    pub data_dir: PathBuf,
}

fn write_json(manager: &TreasuryManager, path: &Path) -> Result<(), StorageError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, manager)?;
    Ok(())
}

/// Save a wallet to a specific file path
pub fn save_to_file(manager: &TreasuryManager, path: &Path) -> Result<(), StorageError> {
    write_json(manager, path)
}

/// Load a wallet from a specific file path
///
/// The owner configuration is validated while deserializing; the remaining
/// cross-structure invariants are checked afterwards.
pub fn load_from_file(path: &Path) -> Result<TreasuryManager, StorageError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let manager: TreasuryManager = serde_json::from_reader(reader)?;

    manager
        .wallet()
        .check_integrity()
        .map_err(StorageError::InvalidData)?;

    Ok(manager)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::Treasury;
    use crate::multisig::MultisigConfig;

    fn sample_manager() -> TreasuryManager {
        let config = MultisigConfig::new(
            vec!["alice".to_string(), "bob".to_string(), "carol".to_string()],
            2,
        )
        .unwrap();
        let mut manager = TreasuryManager::new(config, Treasury::with_balance(100)).unwrap();
        let (id, _) = manager
            .submit_and_confirm("alice", "shop", 40, vec![0xbe, 0xef])
            .unwrap();
        manager.confirm("bob", id).unwrap();
        manager.submit_and_confirm("carol", "cafe", 5, vec![]).unwrap();
        manager
    }

    fn temp_storage(temp_dir: &tempfile::TempDir, max_backups: usize) -> Storage {
        let config = StorageConfig {
            data_dir: temp_dir.path().to_path_buf(),
            max_backups,
            ..Default::default()
        };
        Storage::new(config).unwrap()
    }

    #[test]
    fn test_save_load_wallet() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 5);
        let manager = sample_manager();

        storage.save(&manager).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.balance(), 60);
        assert_eq!(loaded.wallet().transaction_count(true, true), 2);
        assert!(loaded.wallet().get(0).unwrap().executed);
        assert_eq!(loaded.wallet().get(0).unwrap().payload, vec![0xbe, 0xef]);
        assert_eq!(loaded.wallet().confirmations(1), vec!["carol"]);
        assert!(loaded.wallet().is_owner("bob"));
        assert_eq!(
            loaded.wallet().trail().last_hash(),
            manager.wallet().trail().last_hash()
        );
    }

    #[test]
    fn test_loaded_wallet_keeps_working() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 5);
        storage.save(&sample_manager()).unwrap();

        let mut loaded = storage.load().unwrap();
        assert!(loaded.confirm("alice", 1).unwrap().attempted());
        assert_eq!(loaded.submit("bob", "x", 0, vec![]).unwrap(), 2);
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 5);

        assert!(!storage.exists());
        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 3);
        let mut manager = sample_manager();

        for _ in 0..5 {
            storage.save(&manager).unwrap();
            manager.submit("alice", "shop", 1, vec![]).unwrap();
        }

        let backups = storage.list_backups();
        assert_eq!(backups, vec![0, 1, 2]);

        // Backup 0 is the state before the most recent save
        let restored = storage.restore_backup(0).unwrap();
        assert_eq!(restored.wallet().transaction_count(true, true), 5);
        assert!(storage.restore_backup(7).is_err());
    }

    #[test]
    fn test_invalid_owner_set_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 5);
        storage.save(&sample_manager()).unwrap();

        let path = temp_dir.path().join("wallet.json");
        let mut json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        json["wallet"]["registry"]["required"] = serde_json::json!(4);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        assert!(matches!(
            storage.load(),
            Err(StorageError::SerializationError(_))
        ));
    }

    #[test]
    fn test_tampered_trail_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = temp_storage(&temp_dir, 5);
        storage.save(&sample_manager()).unwrap();

        let path = temp_dir.path().join("wallet.json");
        let mut json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        json["wallet"]["trail"]["records"][0]["event"]["data"]["id"] = serde_json::json!(9);
        fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

        assert!(matches!(storage.load(), Err(StorageError::InvalidData(_))));
    }

    #[test]
    fn test_export_import() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("export.json");
        let manager = sample_manager();

        save_to_file(&manager, &path).unwrap();
        let imported = load_from_file(&path).unwrap();
        assert_eq!(imported.balance(), manager.balance());
    }
}
