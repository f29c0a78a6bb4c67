use secp256k1;
use std;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Stage of wallet handling an error originated in
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Step {
    Generation,
    SeedDerivation,
    KeyDerivation,
    AddressDerivation,
    Persistence,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Step::Generation => "generation",
            Step::SeedDerivation => "seed derivation",
            Step::KeyDerivation => "key derivation",
            Step::AddressDerivation => "address derivation",
            Step::Persistence => "persistence",
        })
    }
}

/// Standard error type used in the library
#[derive(Debug)]
pub enum Error {
    /// The secure random source could not produce entropy
    Entropy(String),
    /// Unknown word, unsupported length or bad checksum
    InvalidMnemonic(String),
    /// Seed was not 64 bytes long
    InvalidSeedLength(usize),
    /// The derivation path cannot be walked with a private key
    InvalidPath(String),
    /// A derived or supplied key is outside the secp256k1 range
    InvalidKey(String),
    /// Error in the Secp256k1 library
    Secp256k1Error(secp256k1::Error),
    /// An address string is not 20 hex-encoded bytes
    InvalidAddress(String),
    /// No current wallet record exists yet
    NoWallet(PathBuf),
    /// A record exists but could not be read
    StorageRead { path: PathBuf, source: io::Error },
    /// A record could not be written. `partial` is set when an earlier
    /// record of the same wallet was already written.
    StorageWrite {
        path: PathBuf,
        partial: bool,
        source: io::Error,
    },
    /// Persisted data disagrees with what the mnemonic derives
    StorageCorruption(String),
}

impl Error {
    /// Gets the step that failed
    pub fn step(&self) -> Step {
        match self {
            Error::Entropy(_) => Step::Generation,
            Error::InvalidMnemonic(_) => Step::SeedDerivation,
            Error::InvalidSeedLength(_) => Step::KeyDerivation,
            Error::InvalidPath(_) => Step::KeyDerivation,
            Error::InvalidKey(_) => Step::KeyDerivation,
            Error::Secp256k1Error(_) => Step::KeyDerivation,
            Error::InvalidAddress(_) => Step::AddressDerivation,
            Error::NoWallet(_) => Step::Persistence,
            Error::StorageRead { .. } => Step::Persistence,
            Error::StorageWrite { .. } => Step::Persistence,
            Error::StorageCorruption(_) => Step::Persistence,
        }
    }

    /// Returns true if no wallet has been created yet, the only recoverable error
    pub fn is_no_wallet(&self) -> bool {
        match self {
            Error::NoWallet(_) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}: ", self.step())?;
        match self {
            Error::Entropy(s) => write!(f, "Entropy unavailable: {}", s),
            Error::InvalidMnemonic(s) => write!(f, "Invalid mnemonic: {}", s),
            Error::InvalidSeedLength(len) => {
                write!(f, "Invalid seed length: {} bytes, expected 64", len)
            }
            Error::InvalidPath(s) => write!(f, "Invalid path: {}", s),
            Error::InvalidKey(s) => write!(f, "Invalid key: {}", s),
            Error::Secp256k1Error(e) => write!(f, "Secp256k1 error: {}", e),
            Error::InvalidAddress(s) => write!(f, "Invalid address: {}", s),
            Error::NoWallet(path) => write!(f, "No wallet at {}", path.display()),
            Error::StorageRead { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            Error::StorageWrite {
                path,
                partial,
                source,
            } => {
                write!(f, "Failed to write {}: {}", path.display(), source)?;
                if *partial {
                    f.write_str(" (records are now inconsistent)")?;
                }
                Ok(())
            }
            Error::StorageCorruption(s) => write!(f, "Storage corruption: {}", s),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Secp256k1Error(e) => Some(e),
            Error::StorageRead { source, .. } => Some(source),
            Error::StorageWrite { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        Error::Secp256k1Error(e)
    }
}

/// Standard Result used in the library
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_step() {
        let e = Error::InvalidPath("Empty part".to_string());
        assert!(e.to_string() == "key derivation: Invalid path: Empty part");
        let e = Error::InvalidMnemonic("Invalid checksum".to_string());
        assert!(e.to_string().starts_with("seed derivation: "));
        let e = Error::NoWallet(PathBuf::from("/tmp/mnemonic.txt"));
        assert!(e.to_string().starts_with("persistence: "));
    }

    #[test]
    fn partial_write_is_reported() {
        let e = Error::StorageWrite {
            path: PathBuf::from("mnemonic.txt"),
            partial: true,
            source: io::Error::new(io::ErrorKind::Other, "disk full"),
        };
        assert!(e.to_string().contains("inconsistent"));
        assert!(e.step() == Step::Persistence);
    }

    #[test]
    fn only_no_wallet_is_recoverable() {
        assert!(Error::NoWallet(PathBuf::new()).is_no_wallet());
        assert!(!Error::StorageCorruption(String::new()).is_no_wallet());
        assert!(!Error::InvalidSeedLength(3).is_no_wallet());
    }
}
