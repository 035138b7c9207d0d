use std::collections::HashSet;

use crate::error::LoadError;
use crate::models::IndexEntry;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse the `search_index.json` payload into an ordered list of entries
///
/// The payload must be a JSON array of entry objects. Unlike the line-based
/// parsers this is all-or-nothing: a single malformed entry fails the whole
/// index, so no partial index is ever exposed.
///
/// # Errors
///
/// Returns an error if:
/// - The payload is not valid JSON or its top level is not an array
/// - Any entry is missing `slug`, has a blank slug, or has mistyped fields
/// - Two entries share the same slug
pub fn parse_index(bytes: &[u8]) -> Result<Vec<IndexEntry>, LoadError> {
    let payload = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let entries: Vec<IndexEntry> = serde_json::from_slice(payload)?;

    let mut seen = HashSet::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        if !seen.insert(entry.slug.as_str()) {
            return Err(LoadError::Invalid(format!(
                "duplicate slug '{}' at position {}",
                entry.slug, position
            )));
        }
    }

    Ok(entries)
}
