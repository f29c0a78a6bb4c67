use crate::wallet::Mnemonic;
use hex;
use ring::pbkdf2;
use std::fmt;
use std::num::NonZeroU32;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of a BIP-39 seed in bytes
pub const SEED_LEN: usize = 64;

const PBKDF2_ROUNDS: NonZeroU32 = match NonZeroU32::new(2048) {
    Some(rounds) => rounds,
    None => panic!("PBKDF2 rounds must be non-zero"),
};

/// 512-bit seed derived from a mnemonic
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Seed([u8; SEED_LEN]);

impl Seed {
    pub fn as_bytes(&self) -> &[u8; SEED_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0[..])
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Seed(redacted)")
    }
}

/// Stretches a mnemonic into a seed with PBKDF2-HMAC-SHA512
///
/// The password is the normalized phrase and the salt is `"mnemonic"` followed by the
/// passphrase. Deployer wallets always use an empty passphrase.
pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    let phrase = zeroize::Zeroizing::new(mnemonic.phrase());
    let salt = zeroize::Zeroizing::new(format!("mnemonic{}", passphrase));
    let mut seed = Seed([0; SEED_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA512,
        PBKDF2_ROUNDS,
        salt.as_bytes(),
        phrase.as_bytes(),
        &mut seed.0,
    );
    trace_secret!("Derived seed {}", seed.to_hex());
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON_ABOUT: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn empty_passphrase() {
        let m = Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let seed = derive_seed(&m, "");
        assert!(seed.to_hex() == "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4");
    }

    #[test]
    fn trezor_passphrase() {
        let m = Mnemonic::parse(ABANDON_ABOUT).unwrap();
        let seed = derive_seed(&m, "TREZOR");
        assert!(seed.to_hex() == "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04");
    }

    #[test]
    fn deterministic() {
        let m = Mnemonic::generate(24).unwrap();
        assert!(derive_seed(&m, "") == derive_seed(&m, ""));
        assert!(derive_seed(&m, "") != derive_seed(&m, "x"));
        assert!(format!("{:?}", derive_seed(&m, "")) == "Seed(redacted)");
    }
}
