//! Hex hash-word parsing.

use anyhow::Result;

/// Parse a 32-bit hash word (with or without 0x prefix)
pub fn parse_hex_word(s: &str) -> Result<u32> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    u32::from_str_radix(digits, 16)
        .map_err(|e| anyhow::anyhow!("Invalid hex hash word {:?}: {}", s, e))
}
