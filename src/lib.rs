//! bucket-map: a single-threaded, fixed-bucket chained hash map built on an
//! allocator-aware singly linked list.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: small container building blocks for callers who control memory
//!   provenance (arena, pool, heap), built in layers so each piece can be
//!   reasoned about independently.
//! - Layers:
//!   - Allocator (`Heap`, `Quota`): slot-granular allocation policy. Cloned
//!     into every part of a container so one budget governs the whole
//!     structure; a refused reservation surfaces as `OutOfMemory` and never
//!     leaves partial mutations behind.
//!   - LinkedList<T, A>: singly linked chain whose nodes live in a `SlotMap`
//!     behind generational keys, so stale links are structurally
//!     unreachable. Positional insert/remove/get, bulk copy-out, and
//!     insertion-order iteration.
//!   - BucketMap<K, V, P, A>: a fixed array of LinkedList buckets. A key
//!     hashes into one bucket and lives there as a key-value entry.
//!     Duplicate-rejecting insert, upsert/update, idempotent remove, and a
//!     flattening iterator over all buckets.
//!
//! Constraints
//! - Single-threaded: `Quota` is `Rc`-based, keeping budgeted containers
//!   `!Send`/`!Sync`; unshared containers rely on the borrow rules alone.
//! - No rehashing: the bucket count is fixed at construction. Worst-case
//!   lookup is bounded by the caller's bucket-count choice, on purpose.
//! - Key policies (`KeyPolicy`) are type-level: every instance of a map type
//!   shares the same hashing and equality semantics.
//! - Containers are not `Clone`; a chain has one owner and moves whole.
//!
//! Failure model
//! - One closed `Error` enum for every operation. Absence on read is
//!   `Option::None`, not an error; mutation failures are precise
//!   (`InvalidArgument`, `OutOfMemory`, `DuplicateKey`, `ItemNotFound`,
//!   `InvalidState`) and always leave the container as it was.
//! - A map whose bucket array could not be reserved comes up degraded:
//!   reads report absence, mutations fail fast with `InvalidState`.
//!
//! Notes and non-goals
//! - No thread safety, no persistence, no iterator-invalidation detection
//!   beyond what the borrow checker already enforces.
//! - Iteration is plain `Iterator` + `FusedIterator`: exhaustion is terminal
//!   and uniform regardless of where iteration finished.

mod alloc;
pub mod bucket_map;
mod error;
pub mod linked_list;
mod linked_list_proptest;
mod policy;

// Public surface
pub use alloc::{Allocator, Heap, Quota};
pub use bucket_map::{BucketMap, MIN_BUCKETS};
pub use error::{Error, Result};
pub use linked_list::LinkedList;
pub use policy::{Djb2, Djb2IgnoreCase, KeyPolicy, NaturalOrder};
