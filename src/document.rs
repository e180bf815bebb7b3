// document module - reads a pattern note from disk as text

use anyhow::{anyhow, Context, Result};
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

/// read the whole note at `path` and decode it to text
pub fn load_document(path: &Path) -> Result<String> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read pattern document {}", path.display()))?;

    decode_document(&bytes)
        .with_context(|| format!("failed to decode pattern document {}", path.display()))
}

/// decode raw note bytes, honouring a byte order mark and normalising line endings
pub fn decode_document(bytes: &[u8]) -> Result<String> {
    // no bom means utf-8, and malformed input is an error rather than replaced
    let (encoding, bom_length) = Encoding::for_bom(bytes).unwrap_or((UTF_8, 0));

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or_else(|| anyhow!("document is not valid {}", encoding.name()))?;

    Ok(normalise_newlines(&text))
}

/// fold `\r\n` and lone `\r` into `\n`, as text-mode reads do
fn normalise_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    text.replace("\r\n", "\n").replace('\r', "\n")
}
