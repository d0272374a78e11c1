//! Secret token strings.
//!
//! Tokens are two proquints (pronounceable encodings of 16-bit words) joined by
//! a dash, e.g. `"lusab-bavig"`, so people can read them out and type them.

const CONSONANTS: &[u8; 16] = b"bdfghjklmnprstvz";
const VOWELS: &[u8; 4] = b"aiou";

/// Encode one 16-bit word as a five-letter proquint (`cvcvc`).
pub fn proquint(word: u16) -> String {
    let w = word as usize;
    let letters = [
        CONSONANTS[(w >> 12) & 0xf],
        VOWELS[(w >> 10) & 0x3],
        CONSONANTS[(w >> 6) & 0xf],
        VOWELS[(w >> 4) & 0x3],
        CONSONANTS[w & 0xf],
    ];
    letters.iter().map(|&b| b as char).collect()
}

/// Fresh random token string.
pub fn generate() -> String {
    let bytes = uuid::Uuid::new_v4().into_bytes();
    let first = u16::from_be_bytes([bytes[0], bytes[1]]);
    // Bytes 6 and 8 carry the version and variant bits.
    let second = u16::from_be_bytes([bytes[10], bytes[11]]);
    format!("{}-{}", proquint(first), proquint(second))
}
