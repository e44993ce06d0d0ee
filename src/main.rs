//! Multisig Wallet CLI Application
//!
//! A command-line interface for operating a multi-owner wallet.

use clap::{Parser, Subcommand};
use multisig_engine::cli::{self, AppState};
use multisig_engine::multisig::TxId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "multisig")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "An M-of-N multi-owner wallet in Rust", long_about = None)]
struct Cli {
    /// Data directory for wallet storage
    #[arg(short, long, default_value = ".multisig_data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new wallet
    Init {
        /// Owner addresses (comma-separated)
        #[arg(short, long)]
        owners: String,

        /// Confirmations required to execute
        #[arg(short, long)]
        required: usize,
    },

    /// Send value to the wallet
    Deposit {
        /// Sender's address
        #[arg(short, long)]
        from: String,

        /// Amount to deposit
        #[arg(short, long)]
        amount: u64,
    },

    /// Propose a transaction
    Submit {
        /// Proposing owner
        #[arg(short, long)]
        caller: String,

        /// Destination address
        #[arg(short, long)]
        to: String,

        /// Value to transfer
        #[arg(short, long, default_value = "0")]
        value: u64,

        /// Call data (hex)
        #[arg(long)]
        data: Option<String>,

        /// Submit without recording the proposer's confirmation
        #[arg(long)]
        no_confirm: bool,
    },

    /// Confirm a transaction
    Confirm {
        /// Confirming owner
        #[arg(short, long)]
        caller: String,

        /// Transaction id
        #[arg(short, long)]
        id: TxId,
    },

    /// Revoke a confirmation
    Revoke {
        /// Revoking owner
        #[arg(short, long)]
        caller: String,

        /// Transaction id
        #[arg(short, long)]
        id: TxId,
    },

    /// Attempt execution of a confirmed transaction
    Execute {
        /// Transaction id
        #[arg(short, long)]
        id: TxId,
    },

    /// Show a transaction
    Show {
        /// Transaction id
        #[arg(short, long)]
        id: TxId,
    },

    /// List transactions
    List {
        /// Only pending transactions
        #[arg(long)]
        pending: bool,

        /// Only executed transactions
        #[arg(long)]
        executed: bool,
    },

    /// Show owners and balance
    Owners,

    /// Show the audit trail
    Events {
        /// First sequence number to show
        #[arg(short, long, default_value = "0")]
        since: u64,
    },

    /// Verify the audit trail
    Verify,

    /// Export wallet to file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import wallet from file
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Restore wallet from a backup
    Restore {
        /// Backup index (0 is the most recent)
        #[arg(short, long, default_value = "0")]
        backup: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Handle init command separately (doesn't need loaded state)
    if let Commands::Init { owners, required } = &cli.command {
        return cli::cmd_init(&cli.data_dir, owners, *required);
    }

    let mut state = AppState::new(cli.data_dir.clone())?;

    match cli.command {
        Commands::Init { .. } => unreachable!(),

        Commands::Deposit { from, amount } => {
            cli::cmd_deposit(&mut state, &from, amount)?;
        }

        Commands::Submit {
            caller,
            to,
            value,
            data,
            no_confirm,
        } => {
            cli::cmd_submit(&mut state, &caller, &to, value, data.as_deref(), no_confirm)?;
        }

        Commands::Confirm { caller, id } => {
            cli::cmd_confirm(&mut state, &caller, id)?;
        }

        Commands::Revoke { caller, id } => {
            cli::cmd_revoke(&mut state, &caller, id)?;
        }

        Commands::Execute { id } => {
            cli::cmd_execute(&mut state, id)?;
        }

        Commands::Show { id } => {
            cli::cmd_show(&state, id)?;
        }

        Commands::List { pending, executed } => {
            cli::cmd_list(&state, pending, executed)?;
        }

        Commands::Owners => {
            cli::cmd_owners(&state)?;
        }

        Commands::Events { since } => {
            cli::cmd_events(&state, since)?;
        }

        Commands::Verify => {
            cli::cmd_verify(&state)?;
        }

        Commands::Export { output } => {
            cli::cmd_export(&state, &output)?;
        }

        Commands::Import { input } => {
            cli::cmd_import(&mut state, &input)?;
        }

        Commands::Restore { backup } => {
            cli::cmd_restore(&mut state, backup)?;
        }
    }

    Ok(())
}
