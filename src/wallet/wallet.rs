use crate::address::{derive_address, Address};
use crate::util::Result;
use crate::wallet::{
    derive_key, derive_seed, generate_mnemonic, ChainCode, DerivationPath, Mnemonic, PrivateKey,
    Seed,
};
use std::fmt;
use zeroize::Zeroize;

/// Deployer account recomputed from its mnemonic
///
/// Only the mnemonic is authoritative. The seed, key and address are derived again
/// every time a wallet is built and are never trusted from storage.
#[derive(Clone)]
pub struct Wallet {
    mnemonic: Mnemonic,
    seed: Seed,
    path: DerivationPath,
    private_key: PrivateKey,
    chain_code: ChainCode,
    address: Address,
}

impl Wallet {
    /// Creates a wallet from a fresh 12-word mnemonic at the default Ethereum path
    pub fn generate() -> Result<Wallet> {
        Wallet::from_mnemonic(generate_mnemonic()?, &DerivationPath::default())
    }

    /// Derives the wallet of a mnemonic at a path, with an empty passphrase
    pub fn from_mnemonic(mnemonic: Mnemonic, path: &DerivationPath) -> Result<Wallet> {
        let seed = derive_seed(&mnemonic, "");
        let (private_key, chain_code) = derive_key(seed.as_bytes(), path)?;
        let address = derive_address(&private_key);
        Ok(Wallet {
            mnemonic,
            seed,
            path: path.clone(),
            private_key,
            chain_code,
            address,
        })
    }

    /// Parses a phrase and derives its wallet
    pub fn from_phrase(phrase: &str, path: &DerivationPath) -> Result<Wallet> {
        Wallet::from_mnemonic(Mnemonic::parse(phrase)?, path)
    }

    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn path(&self) -> &DerivationPath {
        &self.path
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

impl Drop for Wallet {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl fmt::Debug for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .field("path", &self.path.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Error;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn known_vector() {
        let w = Wallet::from_phrase(ABANDON_ABOUT, &DerivationPath::default()).unwrap();
        assert!(w.address().encode() == "0x9858effd232b4033e47d90003d41ec34ecaeda94");
        assert!(w.private_key().to_hex() == "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727");
        assert!(w.seed().to_hex().starts_with("5eb00bbddcf06908"));
        assert!(w.path().to_string() == "m/44'/60'/0'/0/0");
    }

    #[test]
    fn deterministic() {
        let w = Wallet::generate().unwrap();
        assert!(w.mnemonic().word_count() == 12);
        let again = Wallet::from_phrase(&w.mnemonic().phrase(), w.path()).unwrap();
        assert!(again.private_key() == w.private_key());
        assert!(again.address() == w.address());
        assert!(again.chain_code() == w.chain_code());
    }

    #[test]
    fn account_index_changes_key() {
        let a = Wallet::from_phrase(ABANDON_ABOUT, &DerivationPath::ethereum(0).unwrap()).unwrap();
        let b = Wallet::from_phrase(ABANDON_ABOUT, &DerivationPath::ethereum(1).unwrap()).unwrap();
        assert!(a.address() != b.address());
        assert!(a.private_key() != b.private_key());
    }

    #[test]
    fn invalid_phrase() {
        let r = Wallet::from_phrase("abandon abandon abandon", &DerivationPath::default());
        assert!(matches!(r, Err(Error::InvalidMnemonic(_))));
    }

    #[test]
    fn debug_hides_secrets() {
        let w = Wallet::from_phrase(ABANDON_ABOUT, &DerivationPath::default()).unwrap();
        let s = format!("{:?}", w);
        assert!(s.contains("0x9858effd232b4033e47d90003d41ec34ecaeda94"));
        assert!(!s.contains("abandon"));
        assert!(!s.contains("1ab42cc4"));
    }
}
