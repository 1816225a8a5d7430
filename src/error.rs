//! Error type shared by the map and its cursors.

use thiserror::Error;

/// Failures reported by [`LinkedHashMap`](crate::LinkedHashMap) operations.
///
/// Every check runs before the map is touched, so an `Err` always leaves the
/// map exactly as it was.
#[derive(Error, Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Bounds-checked lookup on a key that is not in the map.
    #[error("key not found")]
    KeyNotFound,

    /// The cursor is `end()`, belongs to another map, points at an erased
    /// entry, or would step past either end of the map.
    #[error("invalid iterator")]
    InvalidIterator,
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn display_messages() {
        assert_eq!(Error::KeyNotFound.to_string(), "key not found");
        assert_eq!(Error::InvalidIterator.to_string(), "invalid iterator");
    }
}
