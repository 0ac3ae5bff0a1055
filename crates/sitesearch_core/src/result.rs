use std::collections::HashMap;
use std::fmt;

use sha2::{Digest, Sha256};

/// One matched content fragment as returned by the search service.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultItem {
    /// Service-assigned identifier, when the service provides one.
    pub id: Option<String>,
    pub path: String,
    /// Text excerpt of the match.
    pub chunk: String,
    /// Raw markup of the match. Only ever displayed as literal text.
    pub html: String,
    /// Relevance in `[0, 1]`.
    pub score: f64,
}

/// Stable identity of a result within one result set.
///
/// Disclosure state is keyed by this rather than by list position, so a key
/// can never point at an entry of a different result set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResultKey(String);

impl ResultKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derives one key per item, in order.
///
/// Uses the service id when present, otherwise a digest of path and chunk.
/// Repeats within the same set get an occurrence suffix so every position
/// keeps its own key.
pub(crate) fn assign_keys(items: &[ResultItem]) -> Vec<ResultKey> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(items.len());
    items
        .iter()
        .map(|item| {
            let base = match item.id.as_deref() {
                Some(id) if !id.is_empty() => format!("id:{id}"),
                _ => format!("sha:{}", content_digest(&item.path, &item.chunk)),
            };
            let occurrence = seen.entry(base.clone()).or_insert(0);
            *occurrence += 1;
            if *occurrence == 1 {
                ResultKey(base)
            } else {
                ResultKey(format!("{base}#{occurrence}"))
            }
        })
        .collect()
}

fn content_digest(path: &str, chunk: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    hasher.update([0u8]);
    hasher.update(chunk.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(16);
    for byte in digest.iter().take(8) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
