use crate::util::{Error, Result};
use crate::wallet::private_key::{is_private_key_valid, SECP256K1_CURVE_ORDER};
use crate::wallet::{ChildNumber, DerivationPath, PrivateKey, SEED_LEN};
use byteorder::{BigEndian, ByteOrder};
use ring::hmac;
use secp256k1::Scalar;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Extra 256 bits of entropy carried alongside each extended key
pub type ChainCode = [u8; 32];

/// HMAC key for the master node, shared by Bitcoin and Ethereum wallets
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// A private key in an hierarchial deterministic wallet
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ExtendedPrivateKey {
    private_key: PrivateKey,
    chain_code: ChainCode,
    depth: u8,
    index: u32,
}

impl ExtendedPrivateKey {
    /// Computes the master key of a seed
    ///
    /// BIP-32 allows seeds from 128 to 512 bits. Mnemonic seeds are always 512.
    pub fn master(seed: &[u8]) -> Result<ExtendedPrivateKey> {
        if seed.len() < 16 || seed.len() > SEED_LEN {
            return Err(Error::InvalidSeedLength(seed.len()));
        }
        let key = hmac::Key::new(hmac::HMAC_SHA512, MASTER_HMAC_KEY);
        let hmac = hmac::sign(&key, seed);
        let (il, ir) = hmac.as_ref().split_at(32);
        if !is_private_key_valid(il) {
            let msg = "Invalid master key. Try another seed.".to_string();
            return Err(Error::InvalidKey(msg));
        }
        let mut chain_code = [0; 32];
        chain_code.copy_from_slice(ir);
        Ok(ExtendedPrivateKey {
            private_key: PrivateKey::from_bytes(il)?,
            chain_code,
            depth: 0,
            index: 0,
        })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn chain_code(&self) -> &ChainCode {
        &self.chain_code
    }

    /// Gets the depth, 0 for the master key
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// Get the index of this key as derived from the parent
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Derives the child private key at one path segment
    pub fn derive_child(&self, child: ChildNumber) -> Result<ExtendedPrivateKey> {
        if self.depth == u8::max_value() {
            let msg = "Cannot derive extended key. Depth already at max.";
            return Err(Error::InvalidPath(msg.to_string()));
        }

        // Hardened: 0x00 || k_par || i, normal: serP(K_par) || i
        let mut data = [0; 37];
        if child.is_hardened() {
            data[1..33].copy_from_slice(self.private_key.as_bytes());
        } else {
            data[..33].copy_from_slice(&self.private_key.public_key_compressed());
        }
        BigEndian::write_u32(&mut data[33..], child.index());

        let key = hmac::Key::new(hmac::HMAC_SHA512, &self.chain_code);
        let hmac = hmac::sign(&key, &data);
        data.zeroize();
        let (il, ir) = hmac.as_ref().split_at(32);

        if il >= &SECP256K1_CURVE_ORDER[..] {
            let msg = format!("Invalid key at {}. Try next index.", child);
            return Err(Error::InvalidKey(msg));
        }
        let mut tweak = [0; 32];
        tweak.copy_from_slice(il);
        let tweak = Scalar::from_be_bytes(tweak)
            .map_err(|_| Error::InvalidKey(format!("Invalid key at {}. Try next index.", child)))?;
        let child_secret_key = self
            .private_key
            .secret_key()?
            .add_tweak(&tweak)
            .map_err(|_| Error::InvalidKey(format!("Invalid key at {}. Try next index.", child)))?;

        let mut chain_code = [0; 32];
        chain_code.copy_from_slice(ir);
        Ok(ExtendedPrivateKey {
            private_key: PrivateKey::from_bytes(&child_secret_key.secret_bytes())?,
            chain_code,
            depth: self.depth + 1,
            index: child.index(),
        })
    }

    /// Walks every segment of a path, left to right
    pub fn derive_path(&self, path: &DerivationPath) -> Result<ExtendedPrivateKey> {
        let mut key = self.clone();
        for child in path.children() {
            key = key.derive_child(*child)?;
        }
        Ok(key)
    }
}

/// Derives the private key and chain code at `path` from a 64-byte mnemonic seed
pub fn derive_key(seed: &[u8], path: &DerivationPath) -> Result<(PrivateKey, ChainCode)> {
    if seed.len() != SEED_LEN {
        return Err(Error::InvalidSeedLength(seed.len()));
    }
    let key = ExtendedPrivateKey::master(seed)?.derive_path(path)?;
    debug!("Derived key at {}", path);
    trace_secret!("Private key at {} is {}", path, key.private_key().to_hex());
    Ok((key.private_key.clone(), key.chain_code))
}
