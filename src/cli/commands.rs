//! CLI commands for the multisig wallet
//!
//! Implements all command handlers for the CLI interface. Every mutating
//! command loads the wallet, applies one operation and saves it again.

use crate::events::EventRecord;
use crate::executor::{ExecutionOutcome, Treasury};
use crate::multisig::{MultisigConfig, TreasuryManager, TxId};
use crate::storage::{Storage, StorageConfig};
use std::path::{Path, PathBuf};

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub manager: TreasuryManager,
    pub storage: Storage,
    pub data_dir: PathBuf,
}

impl AppState {
    /// Load application state from an initialized data directory
    pub fn new(data_dir: PathBuf) -> CliResult<Self> {
        let storage = open_storage(&data_dir)?;

        if !storage.exists() {
            return Err(format!(
                "no wallet found in {:?}; run `multisig init` first",
                data_dir
            )
            .into());
        }

        let manager = storage.load()?;
        log::debug!("Loaded wallet from {:?}", data_dir);

        Ok(Self {
            manager,
            storage,
            data_dir,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.manager)?;
        Ok(())
    }
}

fn open_storage(data_dir: &Path) -> CliResult<Storage> {
    let storage_config = StorageConfig {
        data_dir: data_dir.to_path_buf(),
        ..Default::default()
    };
    Ok(Storage::new(storage_config)?)
}

/// Parse hex call data, accepting an optional `0x` prefix
pub fn parse_payload(data: Option<&str>) -> CliResult<Vec<u8>> {
    match data {
        None => Ok(Vec::new()),
        Some(hex_str) => {
            let trimmed = hex_str.strip_prefix("0x").unwrap_or(hex_str);
            Ok(hex::decode(trimmed)?)
        }
    }
}

/// Split a comma-separated owner list
pub fn parse_owners(owners: &str) -> Vec<String> {
    owners
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn print_outcome(id: TxId, outcome: ExecutionOutcome) {
    match outcome {
        ExecutionOutcome::NotReady => {
            println!("   ⏳ Transaction {} is waiting for more confirmations", id)
        }
        ExecutionOutcome::Executed => println!("   ✅ Transaction {} executed", id),
        ExecutionOutcome::Failed => {
            println!("   ❌ Transaction {} failed to execute; it can be retried", id)
        }
    }
}

/// Initialize a new wallet
pub fn cmd_init(data_dir: &Path, owners: &str, required: usize) -> CliResult<()> {
    let storage = open_storage(data_dir)?;

    if storage.exists() {
        println!("⚠️  Wallet already exists at {:?}", data_dir);
        return Ok(());
    }

    let config = MultisigConfig::new(parse_owners(owners), required)?;
    let manager = TreasuryManager::new(config, Treasury::new())?;
    storage.save(&manager)?;

    println!("✅ Multisig wallet initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   🔐 Policy: {}", manager.wallet().registry().description());
    for owner in manager.wallet().owners() {
        println!("   👤 {}", owner);
    }

    Ok(())
}

/// Send value to the wallet
pub fn cmd_deposit(state: &mut AppState, from: &str, amount: u64) -> CliResult<()> {
    if !state.manager.deposit(from, amount) {
        println!("❌ Deposit rejected: balance would overflow");
        return Ok(());
    }
    state.save()?;

    println!("💰 Deposited {} from {}", amount, from);
    println!("   Balance: {}", state.manager.balance());

    Ok(())
}

/// Propose a transaction
pub fn cmd_submit(
    state: &mut AppState,
    caller: &str,
    to: &str,
    value: u64,
    data: Option<&str>,
    no_confirm: bool,
) -> CliResult<()> {
    let payload = parse_payload(data)?;

    if no_confirm {
        let id = state.manager.submit(caller, to, value, payload)?;
        state.save()?;
        println!("📝 Transaction {} submitted (not confirmed)", id);
        return Ok(());
    }

    let (id, outcome) = state.manager.submit_and_confirm(caller, to, value, payload)?;
    state.save()?;

    println!("📝 Transaction {} submitted and confirmed by {}", id, caller);
    print_outcome(id, outcome);

    Ok(())
}

/// Confirm a transaction
pub fn cmd_confirm(state: &mut AppState, caller: &str, id: TxId) -> CliResult<()> {
    let outcome = state.manager.confirm(caller, id)?;
    state.save()?;

    println!("✍️  {} confirmed transaction {}", caller, id);
    print_outcome(id, outcome);

    Ok(())
}

/// Revoke a confirmation
pub fn cmd_revoke(state: &mut AppState, caller: &str, id: TxId) -> CliResult<()> {
    state.manager.revoke(caller, id)?;
    state.save()?;

    println!("↩️  {} revoked confirmation of transaction {}", caller, id);

    Ok(())
}

/// Attempt execution of a transaction
pub fn cmd_execute(state: &mut AppState, id: TxId) -> CliResult<()> {
    let outcome = state.manager.execute(id)?;
    state.save()?;

    print_outcome(id, outcome);

    Ok(())
}

/// Show a single transaction
pub fn cmd_show(state: &AppState, id: TxId) -> CliResult<()> {
    let wallet = state.manager.wallet();
    let tx = wallet.get(id)?;

    println!("📄 Transaction {}", tx.id);
    println!("   ├─ Destination: {}", tx.destination);
    println!("   ├─ Value: {}", tx.value);
    println!("   ├─ Data: 0x{}", hex::encode(&tx.payload));
    println!("   ├─ Submitted by: {}", tx.submitter);
    println!(
        "   ├─ Submitted at: {}",
        tx.submitted_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!("   ├─ Status: {:?}", wallet.status(id)?);
    println!(
        "   └─ Confirmations ({}/{}): {}",
        wallet.confirmation_count(id),
        wallet.required(),
        wallet.confirmations(id).join(", ")
    );

    Ok(())
}

/// List transactions
pub fn cmd_list(state: &AppState, pending: bool, executed: bool) -> CliResult<()> {
    let wallet = state.manager.wallet();
    // No filter flag means everything
    let (pending, executed) = if !pending && !executed {
        (true, true)
    } else {
        (pending, executed)
    };

    let ids = wallet.transaction_ids(0, usize::MAX, pending, executed);
    if ids.is_empty() {
        println!("📭 No transactions found.");
        return Ok(());
    }

    println!("📋 Transactions ({}):", ids.len());
    for id in ids {
        let tx = wallet.get(id)?;
        println!(
            "   #{} | {} → {} | {}/{} | {:?}",
            tx.id,
            tx.value,
            tx.destination,
            wallet.confirmation_count(id),
            wallet.required(),
            wallet.status(id)?
        );
    }

    Ok(())
}

/// Show the owner set and balance
pub fn cmd_owners(state: &AppState) -> CliResult<()> {
    let wallet = state.manager.wallet();

    println!("🔐 Policy: {}", wallet.registry().description());
    for owner in wallet.owners() {
        println!("   👤 {}", owner);
    }
    println!("💰 Balance: {}", state.manager.balance());

    let stats = state.storage.stats()?;
    println!(
        "💾 Storage: {} bytes, {} backup(s) in {:?}",
        stats.file_size, stats.backup_count, stats.data_dir
    );

    Ok(())
}

fn print_record(record: &EventRecord) {
    println!(
        "   #{} | {} | {} | {}…",
        record.seq,
        record.timestamp.format("%Y-%m-%d %H:%M:%S"),
        record.event,
        &record.hash[..16]
    );
}

/// Print audit trail records from a cursor onwards
pub fn cmd_events(state: &AppState, since: u64) -> CliResult<()> {
    let records = state.manager.wallet().trail().since(since);

    if records.is_empty() {
        println!("📭 No events since #{}", since);
        return Ok(());
    }

    println!("📜 Events:");
    for record in records {
        print_record(record);
    }

    Ok(())
}

/// Verify the audit trail hash chain
pub fn cmd_verify(state: &AppState) -> CliResult<()> {
    println!("🔍 Verifying audit trail...");

    let trail = state.manager.wallet().trail();
    if trail.verify() {
        println!("✅ Audit trail is intact!");
        println!("   {} records verified", trail.len());
        println!("   Head: {}", trail.last_hash());
    } else {
        println!("❌ Audit trail verification FAILED!");
        println!("   The wallet file may have been tampered with.");
    }

    Ok(())
}

/// Export the wallet to a file
pub fn cmd_export(state: &AppState, path: &Path) -> CliResult<()> {
    crate::storage::save_to_file(&state.manager, path)?;
    println!("📦 Wallet exported to {:?}", path);
    Ok(())
}

/// Import a wallet from a file, replacing the current one
pub fn cmd_import(state: &mut AppState, path: &Path) -> CliResult<()> {
    state.manager = crate::storage::load_from_file(path)?;
    state.save()?;

    println!("📥 Wallet imported from {:?}", path);
    println!(
        "   Transactions: {}",
        state.manager.wallet().transaction_count(true, true)
    );

    Ok(())
}

/// Replace the wallet with a numbered backup
pub fn cmd_restore(state: &mut AppState, backup: usize) -> CliResult<()> {
    let available = state.storage.list_backups();
    if !available.contains(&backup) {
        println!("❌ Backup {} not found. Available: {:?}", backup, available);
        return Ok(());
    }

    state.manager = state.storage.restore_backup(backup)?;
    state.save()?;

    println!("♻️  Wallet restored from backup {}", backup);
    println!(
        "   Transactions: {}",
        state.manager.wallet().transaction_count(true, true)
    );

    Ok(())
}
