use anyhow::{Context, Result};
use std::path::Path;

/// One word from a hex listing, with the 1-based line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingWord {
    pub line: usize,
    pub word: u32,
}

/// Parses assembler output: one hex word per line, `0x` optional, blank lines skipped.
pub fn parse_listing(text: &str) -> Result<Vec<ListingWord>> {
    let mut words = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let s = raw.trim();
        if s.is_empty() {
            continue;
        }
        let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        anyhow::ensure!(!hex.is_empty(), "line {}: empty hex word", idx + 1);
        let word = u32::from_str_radix(hex, 16)
            .with_context(|| format!("line {}: bad hex word `{s}`", idx + 1))?;
        words.push(ListingWord { line: idx + 1, word });
    }
    Ok(words)
}

pub fn load_listing(path: &Path) -> Result<Vec<ListingWord>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read listing {}", path.display()))?;
    parse_listing(&text)
}
