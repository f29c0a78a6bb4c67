//! Deterministic deployer wallet for Ethereum tooling.
//!
//! A wallet is a BIP-39 mnemonic. Its seed, the BIP-32 private key at a BIP-44 path
//! and the Ethereum address of that key are recomputed from the mnemonic every time.
//! The `store` module keeps the current mnemonic on disk along with a per-address
//! backup.
//!
//! # Examples
//!
//! ```rust
//! use deploykey::wallet::{DerivationPath, Wallet};
//!
//! let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
//! let wallet = Wallet::from_phrase(phrase, &DerivationPath::default()).unwrap();
//! assert_eq!(wallet.address().encode(), "0x9858effd232b4033e47d90003d41ec34ecaeda94");
//! ```

#[macro_use]
extern crate log;

#[macro_use]
pub mod util;
pub mod address;
pub mod store;
pub mod wallet;
