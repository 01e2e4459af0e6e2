use thiserror::Error;

pub const DEFAULT_MARKER: &str = "</script>";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    #[error("{marker} not found")]
    MarkerNotFound { marker: String },
}

/// A document with the payload spliced in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    /// Byte offset of the last marker in the original document.
    pub index: usize,
    pub inserted: usize,
    pub document: String,
}

pub fn find_last_marker(document: &str, marker: &str) -> Option<usize> {
    if marker.is_empty() {
        return None;
    }
    document.rfind(marker)
}

/// Inserts `payload` immediately before the rightmost `marker`.
///
/// Everything else in the document is kept byte for byte. Calling this twice
/// with a payload that does not itself contain the marker inserts it twice.
pub fn splice_before_last(
    document: &str,
    marker: &str,
    payload: &str,
) -> Result<Splice, PatchError> {
    let index = find_last_marker(document, marker).ok_or_else(|| PatchError::MarkerNotFound {
        marker: marker.to_string(),
    })?;

    let mut out = String::with_capacity(document.len() + payload.len());
    out.push_str(&document[..index]);
    out.push_str(payload);
    out.push_str(&document[index..]);

    Ok(Splice {
        index,
        inserted: payload.len(),
        document: out,
    })
}

pub fn contains_payload(document: &str, payload: &str) -> bool {
    !payload.is_empty() && document.contains(payload)
}
