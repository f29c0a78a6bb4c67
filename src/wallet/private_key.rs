use crate::util::{Error, Result};
use hex;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum private key value (exclusive)
pub(crate) const SECP256K1_CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Checks that a private key is in valid SECP256K1 range
pub fn is_private_key_valid(key: &[u8]) -> bool {
    key.len() == 32 && key.iter().any(|b| *b != 0) && key < &SECP256K1_CURVE_ORDER[..]
}

/// A secp256k1 secret scalar, 0 < k < n
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Creates a private key from 32 big-endian bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<PrivateKey> {
        if !is_private_key_valid(bytes) {
            let msg = format!("Private key must be 32 bytes in curve range, got {} bytes", bytes.len());
            return Err(Error::InvalidKey(msg));
        }
        let mut key = [0; 32];
        key.copy_from_slice(bytes);
        Ok(PrivateKey(key))
    }

    /// Decodes a hex private key, with or without a 0x prefix
    pub fn from_hex(s: &str) -> Result<PrivateKey> {
        let s = s.trim();
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(digits)
            .map_err(|e| Error::InvalidKey(format!("Bad private key hex: {}", e)))?;
        let key = PrivateKey::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Encodes the key as 0x-prefixed lowercase hex
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub(crate) fn secret_key(&self) -> Result<SecretKey> {
        Ok(SecretKey::from_slice(&self.0)?)
    }

    fn public_key(&self) -> Result<PublicKey> {
        let secp = Secp256k1::signing_only();
        Ok(PublicKey::from_secret_key(&secp, &self.secret_key()?))
    }

    /// Gets the 33-byte SEC1 compressed public key
    pub fn public_key_compressed(&self) -> [u8; 33] {
        match self.public_key() {
            Ok(public_key) => public_key.serialize(),
            Err(_) => unreachable!("range checked on construction"),
        }
    }

    /// Gets the 65-byte SEC1 uncompressed public key, 0x04 prefix included
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        match self.public_key() {
            Ok(public_key) => public_key.serialize_uncompressed(),
            Err(_) => unreachable!("range checked on construction"),
        }
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PrivateKey(redacted)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_range() {
        // Valid
        let mut max = SECP256K1_CURVE_ORDER.clone();
        max[31] = max[31] - 1;
        assert!(is_private_key_valid(&max));
        assert!(is_private_key_valid(&[0x01; 32]));
        let mut one = [0; 32];
        one[31] = 1;
        assert!(is_private_key_valid(&one));

        // Invalid
        assert!(!is_private_key_valid(&[0x00; 32]));
        assert!(!is_private_key_valid(&[0xff; 32]));
        assert!(!is_private_key_valid(&SECP256K1_CURVE_ORDER));
        assert!(!is_private_key_valid(&[0x01; 31]));

        // Above the order even though a later byte is smaller
        let mut above = SECP256K1_CURVE_ORDER.clone();
        above[15] = 0xff;
        above[16] = 0x00;
        assert!(!is_private_key_valid(&above));
    }

    #[test]
    fn hex_encoding() {
        let s = "0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727";
        let k = PrivateKey::from_hex(s).unwrap();
        assert!(k.to_hex() == s);
        assert!(PrivateKey::from_hex(&s[2..]).unwrap() == k);
        assert!(PrivateKey::from_hex("0x1234").is_err());
        assert!(PrivateKey::from_hex("0xzz").is_err());
        assert!(matches!(PrivateKey::from_bytes(&[0; 32]), Err(Error::InvalidKey(_))));
    }

    #[test]
    fn public_keys() {
        let mut one = [0; 32];
        one[31] = 1;
        let k = PrivateKey::from_bytes(&one).unwrap();
        // Generator point G
        let g = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        assert!(hex::encode(&k.public_key_compressed()[..]) == g);
        let u = k.public_key_uncompressed();
        assert!(u[0] == 0x04);
        assert!(u[1..33] == k.public_key_compressed()[1..]);
        assert!(format!("{:?}", k) == "PrivateKey(redacted)");
    }
}
