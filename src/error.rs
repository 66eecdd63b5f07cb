//! Closed result taxonomy shared by every container operation.

use thiserror::Error;

/// Everything a container operation can report besides success.
///
/// All conditions are recoverable by the caller; nothing in this crate
/// retries, logs, or aborts. A failed mutation leaves the container exactly
/// as it was before the call.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// An index or range argument fell outside the container, or range
    /// arithmetic overflowed.
    #[error("invalid argument: index or range out of bounds")]
    InvalidArgument,
    /// The allocation policy refused to reserve more slots.
    #[error("out of memory: allocation policy exhausted")]
    OutOfMemory,
    /// The addressed item does not exist.
    #[error("item not found")]
    ItemNotFound,
    /// The map never acquired its bucket array and rejects mutation.
    #[error("invalid state: map has no bucket storage")]
    InvalidState,
    /// The key is already present in the map.
    #[error("duplicate key")]
    DuplicateKey,
}

pub type Result<T> = core::result::Result<T, Error>;
