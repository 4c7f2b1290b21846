use sha2::{Sha256, Digest};

/// Calculate the SHA-256 digest of a byte slice
pub fn digest_bytes(content: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hasher.finalize().into()
}

/// Hex form of a digest, for logging
pub fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Expand `seed || input` into a deterministic stream of at least `len` bytes.
///
/// Block `i` of the stream is `SHA-256(seed || input || i as u64 LE)`.
pub fn expand(seed: &[u8], input: &[u8], len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len + 32);
    let mut counter: u64 = 0;
    while out.len() < len {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(input);
        hasher.update(counter.to_le_bytes());
        out.extend_from_slice(&hasher.finalize());
        counter += 1;
    }
    out.truncate(len);
    out
}
