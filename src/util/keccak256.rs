use digest::Digest;
use sha3::Keccak256;

/// Hashes a data array once with the original Keccak-256 (not NIST SHA3-256)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let mut hash = [0; 32];
    hash.copy_from_slice(&hasher.finalize());
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex;

    #[test]
    fn empty() {
        let e = hex::encode(keccak256(&[]));
        assert!(e == "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
    }
}
