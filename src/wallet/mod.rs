//! Wallet and key management

mod extended_key;
mod mnemonic;
mod path;
mod private_key;
mod seed;
#[allow(clippy::module_inception)]
mod wallet;

pub use self::extended_key::{derive_key, ChainCode, ExtendedPrivateKey};
pub use self::mnemonic::{
    generate_mnemonic, load_wordlist, mnemonic_decode, mnemonic_encode, Mnemonic,
    DEFAULT_WORD_COUNT, MNEMONIC_WORD_COUNTS,
};
pub use self::path::{ChildNumber, DerivationPath, ETHEREUM_DEFAULT_PATH, HARDENED_KEY};
pub use self::private_key::{is_private_key_valid, PrivateKey};
pub use self::seed::{derive_seed, Seed, SEED_LEN};
pub use self::wallet::Wallet;
