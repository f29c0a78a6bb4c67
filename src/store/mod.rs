//! Persistence of the deployer wallet
//!
//! Two plain-text records live in the storage directory:
//!
//! * `mnemonic.txt` holds the phrase of the current wallet. It is the only record
//!   that wallets are rebuilt from.
//! * `<address>.txt` holds the phrase and the 0x-prefixed private key on two lines. It
//!   is an operator backup and is read only to cross-check a loaded wallet.
//!
//! # Examples
//!
//! ```rust,no_run
//! use deploykey::store::WalletStore;
//!
//! let store = WalletStore::new("./accounts");
//! let wallet = match store.load() {
//!     Ok(wallet) => wallet,
//!     Err(e) if e.is_no_wallet() => store.create_and_persist().unwrap(),
//!     Err(e) => panic!("{}", e),
//! };
//! println!("{}", wallet.address());
//! ```
//!
//! Creating a wallet overwrites `mnemonic.txt`. Two processes creating wallets in the
//! same directory race and the last writer wins. Calls through one `WalletStore` are
//! serialized.

use crate::address::{derive_address, Address};
use crate::util::{Error, Result};
use crate::wallet::{generate_mnemonic, DerivationPath, Mnemonic, PrivateKey, Wallet};
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use zeroize::Zeroizing;

/// File name of the current wallet record
pub const CURRENT_RECORD: &str = "mnemonic.txt";

/// Network on which running without a wallet is normal
pub const LOCAL_NETWORK: &str = "localhost";

/// Reads and writes wallet records in one directory
pub struct WalletStore {
    dir: PathBuf,
    derivation_path: DerivationPath,
    write_lock: Mutex<()>,
}

impl WalletStore {
    /// Creates a store over `dir` using the default Ethereum path
    pub fn new<P: Into<PathBuf>>(dir: P) -> WalletStore {
        WalletStore {
            dir: dir.into(),
            derivation_path: DerivationPath::default(),
            write_lock: Mutex::new(()),
        }
    }

    /// Derives wallets at another path
    pub fn with_derivation_path(mut self, path: DerivationPath) -> WalletStore {
        self.derivation_path = path;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn derivation_path(&self) -> &DerivationPath {
        &self.derivation_path
    }

    pub fn current_record_path(&self) -> PathBuf {
        self.dir.join(CURRENT_RECORD)
    }

    pub fn backup_record_path(&self, address: &Address) -> PathBuf {
        self.dir.join(format!("{}.txt", address.encode()))
    }

    /// Generates a new wallet and makes it the current one
    pub fn create_and_persist(&self) -> Result<Wallet> {
        let wallet = Wallet::from_mnemonic(generate_mnemonic()?, &self.derivation_path)?;
        self.persist(&wallet)?;
        info!("Generated wallet {} and set it as current", wallet.address());
        Ok(wallet)
    }

    /// Writes the backup record of a wallet, then points the current record at it
    pub fn persist(&self, wallet: &Wallet) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(&self.dir).map_err(|e| Error::StorageWrite {
            path: self.dir.clone(),
            partial: false,
            source: e,
        })?;

        let phrase = Zeroizing::new(wallet.mnemonic().phrase());
        let backup = Zeroizing::new(format!("{}\n{}", *phrase, wallet.private_key().to_hex()));
        let backup_path = self.backup_record_path(&wallet.address());
        write_record(&backup_path, backup.as_bytes()).map_err(|e| Error::StorageWrite {
            path: backup_path.clone(),
            partial: false,
            source: e,
        })?;
        debug!("Wrote backup record {}", backup_path.display());

        let current_path = self.current_record_path();
        if let Err(e) = write_record(&current_path, phrase.as_bytes()) {
            warn!(
                "Wrote {} but not {}, the current wallet is unchanged",
                backup_path.display(),
                current_path.display()
            );
            return Err(Error::StorageWrite {
                path: current_path,
                partial: true,
                source: e,
            });
        }
        debug!("Wrote current record {}", current_path.display());
        Ok(())
    }

    /// Rebuilds the current wallet from its mnemonic
    ///
    /// Returns `Error::NoWallet` when no wallet has been created yet.
    pub fn load(&self) -> Result<Wallet> {
        let current_path = self.current_record_path();
        let phrase = match self.read_current()? {
            Some(phrase) => phrase,
            None => return Err(Error::NoWallet(current_path)),
        };
        let mnemonic = Mnemonic::parse(&phrase).map_err(|e| {
            let msg = format!("{} does not hold a valid mnemonic ({})", current_path.display(), e);
            Error::StorageCorruption(msg)
        })?;
        let wallet = Wallet::from_mnemonic(mnemonic, &self.derivation_path)?;
        self.verify_backup(&wallet)?;
        info!("Loaded wallet {} at {}", wallet.address(), wallet.path());
        Ok(wallet)
    }

    /// Cross-checks the backup record of a wallet against what its mnemonic derives
    ///
    /// A missing backup is only logged. A backup that exists must name the same mnemonic
    /// and a private key whose address is the wallet's.
    pub fn verify_backup(&self, wallet: &Wallet) -> Result<()> {
        let path = self.backup_record_path(&wallet.address());
        let contents = match read_record(&path)? {
            Some(contents) => contents,
            None => {
                warn!("No backup record {} for the current wallet", path.display());
                return Ok(());
            }
        };

        let mut lines = contents.lines().map(str::trim).filter(|line| !line.is_empty());
        let (phrase, key) = match (lines.next(), lines.next(), lines.next()) {
            (Some(phrase), Some(key), None) => (phrase, key),
            _ => {
                let msg = format!("{} is not a two-line backup record", path.display());
                return Err(Error::StorageCorruption(msg));
            }
        };

        let same_mnemonic = Mnemonic::parse(phrase)
            .map(|m| &m == wallet.mnemonic())
            .unwrap_or(false);
        if !same_mnemonic {
            let msg = format!("{} holds a different mnemonic", path.display());
            return Err(Error::StorageCorruption(msg));
        }

        let key = PrivateKey::from_hex(key).map_err(|e| {
            let msg = format!("{} holds an unreadable private key ({})", path.display(), e);
            Error::StorageCorruption(msg)
        })?;
        let address = derive_address(&key);
        if address != wallet.address() {
            let msg = format!(
                "{} holds the key of {}, expected {}",
                path.display(),
                address,
                wallet.address()
            );
            return Err(Error::StorageCorruption(msg));
        }
        Ok(())
    }

    /// Gets the current phrase, or an empty string when no wallet exists
    ///
    /// Missing wallets are expected on the local network. Anywhere else a warning is
    /// logged and callers carry on without credentials.
    pub fn current_mnemonic_or_empty(&self, network: &str) -> Result<String> {
        let current_path = self.current_record_path();
        match self.read_current()? {
            Some(phrase) => {
                let mnemonic = Mnemonic::parse(&phrase).map_err(|e| {
                    let msg = format!("{} does not hold a valid mnemonic ({})", current_path.display(), e);
                    Error::StorageCorruption(msg)
                })?;
                Ok(mnemonic.phrase())
            }
            None => {
                if network != LOCAL_NETWORK {
                    warn!(
                        "No mnemonic file {} for a deploy account on {}. Run `deploykey generate` first.",
                        current_path.display(),
                        network
                    );
                }
                Ok(String::new())
            }
        }
    }

    fn read_current(&self) -> Result<Option<Zeroizing<String>>> {
        let current_path = self.current_record_path();
        let contents = read_record(&current_path)?;
        trace_secret!("Read {:?} from {}", contents.as_ref().map(|c| c.trim()), current_path.display());
        Ok(contents.map(|c| Zeroizing::new(c.trim().to_string())))
    }
}

/// Reads a whole record, `None` if it does not exist
fn read_record(path: &Path) -> Result<Option<Zeroizing<String>>> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(Zeroizing::new(contents))),
        Err(ref e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::StorageRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replaces a record atomically through a temporary file in the same directory
fn write_record(path: &Path, contents: &[u8]) -> io::Result<()> {
    let tmp_path = path.with_extension("txt.tmp");
    let result = write_private_file(&tmp_path, contents).and_then(|_| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn write_private_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)?;
    file.sync_all()
}
