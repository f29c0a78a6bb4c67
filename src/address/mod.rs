//! Ethereum address derivation and encoding
//!
//! # Examples
//!
//! Derive the address of a private key:
//!
//! ```rust
//! use deploykey::address::derive_address;
//! use deploykey::wallet::PrivateKey;
//!
//! let key = PrivateKey::from_hex("0x0000000000000000000000000000000000000000000000000000000000000001").unwrap();
//! let addr = derive_address(&key);
//! assert_eq!(addr.encode(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
//! ```
//!
use crate::util::{keccak256, Error, Result};
use crate::wallet::PrivateKey;
use hex;
use std::fmt;
use std::str::FromStr;

/// 160-bit account identifier
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 20]);

impl Address {
    /// Encodes the address as 0x-prefixed lowercase hex
    pub fn encode(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Decodes 40 hex characters with an optional 0x prefix, in any case
    pub fn decode(s: &str) -> Result<Address> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(digits)
            .map_err(|e| Error::InvalidAddress(format!("Bad address {:?}: {}", s, e)))?;
        if bytes.len() != 20 {
            let msg = format!("Address {:?} is {} bytes, expected 20", s, bytes.len());
            return Err(Error::InvalidAddress(msg));
        }
        let mut address = [0; 20];
        address.copy_from_slice(&bytes);
        Ok(Address(address))
    }
}

/// Computes the address of a private key
///
/// The uncompressed public key is hashed with Keccak-256 without its 0x04 prefix and
/// the last 20 bytes of the hash are kept.
pub fn derive_address(key: &PrivateKey) -> Address {
    let public_key = key.public_key_uncompressed();
    let hash = keccak256(&public_key[1..]);
    let mut address = [0; 20];
    address.copy_from_slice(&hash[12..]);
    Address(address)
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Address> {
        Address::decode(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(last: u8) -> PrivateKey {
        let mut bytes = [0; 32];
        bytes[31] = last;
        PrivateKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn to_addr() {
        assert!(derive_address(&key(1)).encode() == "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
        assert!(derive_address(&key(2)).encode() == "0x2b5ad5c4795c026514f8317c7a215e218dccd6cf");

        let k = PrivateKey::from_hex("0x1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727").unwrap();
        assert!(derive_address(&k).to_string() == "0x9858effd232b4033e47d90003d41ec34ecaeda94");
    }

    #[test]
    fn idempotent() {
        let k = key(9);
        assert!(derive_address(&k).0 == derive_address(&k).0);
    }

    #[test]
    fn from_addr() {
        let a = Address::decode("0x9858EfFD232B4033E47d90003D41EC34EcaEda94").unwrap();
        assert!(a.encode() == "0x9858effd232b4033e47d90003d41ec34ecaeda94");
        assert!("9858effd232b4033e47d90003d41ec34ecaeda94".parse::<Address>().unwrap() == a);
    }

    #[test]
    fn from_addr_errors() {
        assert!(Address::decode("0x").is_err());
        assert!(Address::decode("0x9858effd").is_err());
        assert!(Address::decode("0x9858effd232b4033e47d90003d41ec34ecaeda9g").is_err());
        assert!(Address::decode("0x9858effd232b4033e47d90003d41ec34ecaeda9400").is_err());
    }
}
