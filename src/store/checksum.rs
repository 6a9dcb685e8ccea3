//! CRC32 checksum over the persisted records array
//!
//! Every load verifies the checksum; a mismatch aborts startup rather
//! than serving a silently damaged collection.

use crc32fast::Hasher;

/// Computes a CRC32 (IEEE) checksum over the provided bytes.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Verifies that the computed checksum matches the expected checksum.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}
