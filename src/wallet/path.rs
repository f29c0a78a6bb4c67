//! BIP-32 derivation paths

use crate::util::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Index which begins the derived hardened keys
pub const HARDENED_KEY: u32 = 2147483648;

/// BIP-44 path of the first external Ethereum account
pub const ETHEREUM_DEFAULT_PATH: &str = "m/44'/60'/0'/0/0";

/// One segment of a derivation path
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ChildNumber {
    /// Derivable from the parent public key
    Normal(u32),
    /// Requires the parent private key
    Hardened(u32),
}

impl ChildNumber {
    /// Creates a normal child number, failing if `index` is in the hardened range
    pub fn normal(index: u32) -> Result<ChildNumber> {
        if index >= HARDENED_KEY {
            let msg = format!("Index {} is already hardened", index);
            return Err(Error::InvalidPath(msg));
        }
        Ok(ChildNumber::Normal(index))
    }

    /// Creates a hardened child number from its unhardened index
    pub fn hardened(index: u32) -> Result<ChildNumber> {
        if index >= HARDENED_KEY {
            let msg = format!("Index {} is already hardened", index);
            return Err(Error::InvalidPath(msg));
        }
        Ok(ChildNumber::Hardened(index))
    }

    /// Gets the raw BIP-32 index, with the hardened offset applied
    pub fn index(&self) -> u32 {
        match self {
            ChildNumber::Normal(i) => *i,
            ChildNumber::Hardened(i) => *i + HARDENED_KEY,
        }
    }

    pub fn is_hardened(&self) -> bool {
        match self {
            ChildNumber::Normal(_) => false,
            ChildNumber::Hardened(_) => true,
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChildNumber::Normal(i) => write!(f, "{}", i),
            ChildNumber::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

/// Ordered child numbers walked from the master private key
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// Path of an external Ethereum account, m/44'/60'/0'/0/<index>
    pub fn ethereum(account_index: u32) -> Result<DerivationPath> {
        Ok(DerivationPath(vec![
            ChildNumber::Hardened(44),
            ChildNumber::Hardened(60),
            ChildNumber::Hardened(0),
            ChildNumber::Normal(0),
            ChildNumber::normal(account_index)?,
        ]))
    }

    /// Parses a path in the BIP-32 shortened key notation
    ///
    /// Hardened segments may be marked with `'`, `h` or `H`. Paths must start from the
    /// private master `m`: a public master `M` cannot reach hardened children.
    pub fn parse(path: &str) -> Result<DerivationPath> {
        let parts: Vec<&str> = path.trim().split('/').collect();

        if parts[0] == "M" {
            let msg = "Cannot derive private key from public master";
            return Err(Error::InvalidPath(msg.to_string()));
        } else if parts[0] != "m" {
            let msg = "Path must start with m";
            return Err(Error::InvalidPath(msg.to_string()));
        }

        let mut children = Vec::with_capacity(parts.len() - 1);
        for part in parts[1..].iter() {
            if part.is_empty() {
                let msg = "Empty part";
                return Err(Error::InvalidPath(msg.to_string()));
            }
            let (digits, hardened) = match part.strip_suffix(|c: char| c == '\'' || c == 'h' || c == 'H') {
                Some(digits) => (digits, true),
                None => (*part, false),
            };
            let index: u32 = digits
                .parse()
                .map_err(|e| Error::InvalidPath(format!("Bad index {:?}: {}", part, e)))?;
            children.push(if hardened {
                ChildNumber::hardened(index)?
            } else {
                ChildNumber::normal(index)?
            });
        }
        if children.len() > 255 {
            let msg = "Path is deeper than 255 levels";
            return Err(Error::InvalidPath(msg.to_string()));
        }
        Ok(DerivationPath(children))
    }

    pub fn children(&self) -> &[ChildNumber] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for DerivationPath {
    fn default() -> Self {
        DerivationPath(vec![
            ChildNumber::Hardened(44),
            ChildNumber::Hardened(60),
            ChildNumber::Hardened(0),
            ChildNumber::Normal(0),
            ChildNumber::Normal(0),
        ])
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<DerivationPath> {
        DerivationPath::parse(s)
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("m")?;
        for child in self.0.iter() {
            write!(f, "/{}", child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ethereum_default() {
        let path = DerivationPath::parse(ETHEREUM_DEFAULT_PATH).unwrap();
        assert!(path == DerivationPath::default());
        assert!(path == DerivationPath::ethereum(0).unwrap());
        assert!(path.to_string() == ETHEREUM_DEFAULT_PATH);
        assert!(DerivationPath::ethereum(7).unwrap().to_string() == "m/44'/60'/0'/0/7");
        assert!(DerivationPath::ethereum(HARDENED_KEY).is_err());
    }

    #[test]
    fn segments_in_order() {
        let path = DerivationPath::parse("m/44'/60'/0'/0/0").unwrap();
        let c = path.children();
        assert!(c.len() == 5);
        assert!(c[0] == ChildNumber::Hardened(44) && c[0].index() == HARDENED_KEY + 44);
        assert!(c[1] == ChildNumber::Hardened(60));
        assert!(c[2].is_hardened());
        assert!(!c[3].is_hardened() && c[4].index() == 0);
    }

    #[test]
    fn hardened_markers() {
        let a = DerivationPath::parse("m/0'/1h/2H/3").unwrap();
        assert!(a.to_string() == "m/0'/1'/2'/3");
        assert!(DerivationPath::parse("m").unwrap().is_empty());
        assert!(DerivationPath::parse("m/2147483647'").unwrap().children()[0].index() == u32::max_value());
    }

    #[test]
    fn invalid() {
        assert!(matches!(DerivationPath::parse("M/0/1"), Err(Error::InvalidPath(_))));
        assert!(DerivationPath::parse("").is_err());
        assert!(DerivationPath::parse("x/0").is_err());
        assert!(DerivationPath::parse("m/").is_err());
        assert!(DerivationPath::parse("m//1").is_err());
        assert!(DerivationPath::parse("m/a'").is_err());
        assert!(DerivationPath::parse("m/1''").is_err());
        assert!(DerivationPath::parse("m/-1").is_err());
        assert!(DerivationPath::parse("m/2147483648'").is_err());
        assert!(DerivationPath::parse("m/2147483648").is_err());
        assert!(DerivationPath::parse("m/4294967296").is_err());
    }
}
