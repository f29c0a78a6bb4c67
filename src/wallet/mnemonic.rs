//! Functions to convert data to and from mnemonic words

use crate::util::{Bits, Error, Result};
use rand::rngs::OsRng;
use rand::RngCore;
use ring::digest::{digest, SHA256};
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Word counts allowed by BIP-39
pub const MNEMONIC_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// Word count used for freshly generated wallets
pub const DEFAULT_WORD_COUNT: usize = 12;

static ENGLISH: &str = include_str!("wordlists/english.txt");

/// Loads the English BIP-39 word list
pub fn load_wordlist() -> Vec<String> {
    ENGLISH.lines().map(|s| s.to_string()).collect()
}

/// Encodes data into a mnemonic using BIP-39
///
/// The data length must be a multiple of 4 bytes for every bit to land in a word.
pub fn mnemonic_encode(data: &[u8], word_list: &[String]) -> Vec<String> {
    let hash = digest(&SHA256, data);
    let mut bits = Bits::from_slice(data, data.len() * 8);
    bits.append(&Bits::from_slice(hash.as_ref(), data.len() / 4));
    (0..bits.len / 11)
        .map(|i| word_list[bits.extract(i * 11, 11) as usize].clone())
        .collect()
}

/// Decodes a mnemonic into data using BIP-39
pub fn mnemonic_decode(mnemonic: &[String], word_list: &[String]) -> Result<Vec<u8>> {
    let mut bits = Bits::with_capacity(mnemonic.len() * 11);
    for (i, word) in mnemonic.iter().enumerate() {
        let value = match word_list.binary_search(word) {
            Ok(value) => value,
            // Report the position only
            Err(_) => return Err(Error::InvalidMnemonic(format!("Unknown word #{}", i + 1))),
        };
        bits.push(value as u32, 11);
    }
    let data_len = bits.len * 32 / 33;
    let cs_len = bits.len / 33;
    let mut data = bits.data[0..data_len / 8].to_vec();
    let cs = digest(&SHA256, &data);
    let cs_bits = Bits::from_slice(cs.as_ref(), cs_len);
    let valid = cs_bits.extract(0, cs_len) == bits.extract(data_len, cs_len);
    bits.data.zeroize();
    if !valid {
        data.zeroize();
        return Err(Error::InvalidMnemonic("Invalid checksum".to_string()));
    }
    Ok(data)
}

/// A validated BIP-39 mnemonic phrase with the entropy it encodes
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Mnemonic {
    words: Vec<String>,
    entropy: Vec<u8>,
}

impl Mnemonic {
    /// Generates a mnemonic from fresh OS entropy
    pub fn generate(word_count: usize) -> Result<Mnemonic> {
        if !MNEMONIC_WORD_COUNTS.contains(&word_count) {
            let msg = format!("Unsupported word count {}", word_count);
            return Err(Error::InvalidMnemonic(msg));
        }
        let mut entropy = Zeroizing::new(vec![0; word_count * 4 / 3]);
        OsRng
            .try_fill_bytes(entropy.as_mut_slice())
            .map_err(|e| Error::Entropy(e.to_string()))?;
        Mnemonic::from_entropy(&entropy)
    }

    /// Encodes 128 to 256 bits of entropy
    pub fn from_entropy(entropy: &[u8]) -> Result<Mnemonic> {
        if entropy.len() % 4 != 0 || entropy.len() < 16 || entropy.len() > 32 {
            let msg = format!("Entropy must be 16 to 32 bytes in steps of 4, got {}", entropy.len());
            return Err(Error::InvalidMnemonic(msg));
        }
        let words = mnemonic_encode(entropy, &load_wordlist());
        Ok(Mnemonic {
            words,
            entropy: entropy.to_vec(),
        })
    }

    /// Parses and validates a phrase
    ///
    /// Surrounding and repeated whitespace is ignored and words are lowercased.
    pub fn parse(phrase: &str) -> Result<Mnemonic> {
        let words: Vec<String> = phrase.split_whitespace().map(|w| w.to_lowercase()).collect();
        if !MNEMONIC_WORD_COUNTS.contains(&words.len()) {
            let msg = format!("Bad word count {}", words.len());
            return Err(Error::InvalidMnemonic(msg));
        }
        let entropy = mnemonic_decode(&words, &load_wordlist())?;
        Ok(Mnemonic { words, entropy })
    }

    /// Gets the normalized phrase, words separated by single spaces
    pub fn phrase(&self) -> String {
        self.words.join(" ")
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Generates a 12-word mnemonic
pub fn generate_mnemonic() -> Result<Mnemonic> {
    Mnemonic::generate(DEFAULT_WORD_COUNT)
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Mnemonic> {
        Mnemonic::parse(s)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mnemonic({} words, redacted)", self.words.len())
    }
}
