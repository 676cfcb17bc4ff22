//! URL acceptance checks for queue submissions.
//!
//! The host check is a deliberately loose substring match against the two
//! known YouTube domain markers, not a URL parser.

use crate::download::ValidationError;

/// Domain markers a candidate must contain to be accepted.
pub const ACCEPTED_HOST_MARKERS: [&str; 2] = ["youtube.com", "youtu.be"];

/// Trimmed form of a candidate; this is what the queue stores as the key.
#[must_use]
pub fn normalize_candidate(candidate: &str) -> &str {
    candidate.trim()
}

/// Check whether `candidate` may join a queue holding `existing` URLs.
///
/// Checks run in order: empty input, unsupported host, duplicate. The
/// duplicate check is an exact match on the trimmed candidate.
///
/// # Examples
///
/// ```rust
/// use tunegrab_core::{ValidationError, can_add};
///
/// let queued = ["https://youtu.be/abc123"];
/// assert!(can_add("https://www.youtube.com/watch?v=xyz", queued).is_ok());
/// assert_eq!(can_add("   ", queued), Err(ValidationError::EmptyInput));
/// assert!(matches!(
///     can_add("https://youtu.be/abc123", queued),
///     Err(ValidationError::DuplicateUrl { .. })
/// ));
/// ```
pub fn can_add<I, S>(candidate: &str, existing: I) -> Result<(), ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let url = normalize_candidate(candidate);

    if url.is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    if !is_supported_host(url) {
        return Err(ValidationError::unsupported_host(url));
    }

    if existing.into_iter().any(|queued| queued.as_ref() == url) {
        return Err(ValidationError::duplicate(url));
    }

    Ok(())
}

/// Whether `url` contains one of the accepted domain markers.
#[must_use]
pub fn is_supported_host(url: &str) -> bool {
    ACCEPTED_HOST_MARKERS
        .into_iter()
        .any(|marker| url.contains(marker))
}
