/// FNV-1a, 32-bit, folded over a string's UTF-16 code units.
///
/// This is a derivation key, not a general-purpose hasher: the same input
/// must produce the same word in every process that touches the dataset.
/// Folding UTF-16 code units (rather than UTF-8 bytes) keeps derived fields
/// in agreement with JavaScript consumers of the same seed assets.
pub fn fnv1a_32(s: &str) -> u32 {
    let mut h: u32 = 0x811c_9dc5;
    for unit in s.encode_utf16() {
        h ^= u32::from(unit);
        h = h.wrapping_mul(0x0100_0193);
    }
    h
}
