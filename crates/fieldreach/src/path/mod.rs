//! Field paths: how an object was reached from the walk root.
//!
//! A path is an immutable sequence of field identifiers (field names or
//! stringified array indices). Appending never mutates; it produces a new
//! path that shares nothing mutable with its parent, so paths can be cloned
//! freely into result entries.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Separator used when rendering a concrete path.
pub const SEGMENT_SEPARATOR: &str = " -> ";

/// Rendering of [`FieldPath::unknown`].
pub const UNKNOWN_MARKER: &str = "<unknown>";

/// Sequence of field identifiers leading from the root to an object, or the
/// "unknown" sentinel.
///
/// `PartialEq` is structural. Ranking uses [`FieldPath::compare`], which only
/// looks at length: two different paths of equal length rank equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<Vec<String>>", into = "Option<Vec<String>>")]
pub struct FieldPath {
    segments: Option<Arc<[String]>>,
}

impl FieldPath {
    /// The path of the root itself.
    pub fn empty() -> Self {
        Self {
            segments: Some(Arc::from(Vec::new())),
        }
    }

    /// The sentinel for "reachable, but no attributable path".
    pub fn unknown() -> Self {
        Self { segments: None }
    }

    /// Returns a new path with `segment` appended.
    ///
    /// Appending to the unknown sentinel yields the sentinel again.
    pub fn append(&self, segment: impl Into<String>) -> Self {
        match &self.segments {
            Some(segments) => {
                let mut next = Vec::with_capacity(segments.len() + 1);
                next.extend(segments.iter().cloned());
                next.push(segment.into());
                Self {
                    segments: Some(Arc::from(next)),
                }
            }
            None => Self::unknown(),
        }
    }

    /// Returns a new path with an array index appended.
    pub fn append_index(&self, index: usize) -> Self {
        self.append(index.to_string())
    }

    /// Total order by length; the unknown sentinel sorts after every
    /// concrete path.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (&self.segments, &other.segments) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => a.len().cmp(&b.len()),
        }
    }

    /// The shorter of two paths, keeping `first` on ties.
    pub fn shortest(first: Self, second: Self) -> Self {
        if second.compare(&first) == Ordering::Less {
            second
        } else {
            first
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.segments.is_none()
    }

    /// Number of segments. The unknown sentinel has none.
    pub fn len(&self) -> usize {
        self.segments.as_ref().map_or(0, |s| s.len())
    }

    /// True for the root path. The unknown sentinel is not empty.
    pub fn is_empty(&self) -> bool {
        self.segments.as_ref().is_some_and(|s| s.is_empty())
    }

    /// The segments, or `None` for the unknown sentinel.
    pub fn segments(&self) -> Option<&[String]> {
        self.segments.as_deref()
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.segments {
            Some(segments) => f.write_str(&segments.join(SEGMENT_SEPARATOR)),
            None => f.write_str(UNKNOWN_MARKER),
        }
    }
}

impl From<Vec<String>> for FieldPath {
    fn from(segments: Vec<String>) -> Self {
        Self {
            segments: Some(Arc::from(segments)),
        }
    }
}

impl From<Option<Vec<String>>> for FieldPath {
    fn from(segments: Option<Vec<String>>) -> Self {
        segments.map_or_else(Self::unknown, Self::from)
    }
}

impl From<FieldPath> for Option<Vec<String>> {
    fn from(path: FieldPath) -> Self {
        path.segments.map(|s| s.to_vec())
    }
}

impl<S: Into<String>> FromIterator<S> for FieldPath {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::from(iter.into_iter().map(Into::into).collect::<Vec<String>>())
    }
}
