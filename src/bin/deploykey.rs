//! Creates and inspects the deployer wallet

use clap::{Parser, Subcommand};
use deploykey::store::WalletStore;
use deploykey::wallet::DerivationPath;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deploykey")]
#[command(about = "Deterministic deployer wallet management")]
#[command(version)]
struct Args {
    /// Directory holding the wallet records
    #[arg(long, env = "DEPLOYKEY_DIR", default_value = ".")]
    dir: PathBuf,
    /// Account index in m/44'/60'/0'/0/<index>
    #[arg(long, env = "DEPLOYKEY_ACCOUNT_INDEX", default_value_t = 0)]
    account_index: u32,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new wallet and make it the current one
    Generate,
    /// Show the address of the current wallet
    Account,
    /// Print the current mnemonic, or an empty line if there is none
    Mnemonic {
        /// Network the mnemonic is requested for
        #[arg(long, env = "DEPLOYKEY_NETWORK", default_value = "localhost")]
        network: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> deploykey::util::Result<()> {
    let path = DerivationPath::ethereum(args.account_index)?;
    let store = WalletStore::new(args.dir).with_derivation_path(path);

    match args.command {
        Commands::Generate => {
            let wallet = store.create_and_persist()?;
            println!("Generated account {}", wallet.address());
            println!("Derivation path: {}", wallet.path());
            println!("Mnemonic saved to {}", store.current_record_path().display());
            println!("Backup saved to {}", store.backup_record_path(&wallet.address()).display());
        }
        Commands::Account => match store.load() {
            Ok(wallet) => {
                println!("Address: {}", wallet.address());
                println!("Derivation path: {}", wallet.path());
            }
            Err(e) if e.is_no_wallet() => {
                println!("No wallet in {}. Run `deploykey generate` first.", store.dir().display());
            }
            Err(e) => return Err(e),
        },
        Commands::Mnemonic { network } => {
            println!("{}", store.current_mnemonic_or_empty(&network)?);
        }
    }
    Ok(())
}
