//! Key policies: type-level hash and ordering for [`BucketMap`] keys.
//!
//! A policy is fixed when the map *type* is written, not when an instance is
//! built, so every instance of a given map type agrees on hashing and
//! equality. Policies are zero-sized and consulted through associated
//! functions only.
//!
//! [`BucketMap`]: crate::BucketMap

use core::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Hashing and ordering for a key type, fixed at the type level.
///
/// `cmp` returning [`Ordering::Equal`] is what makes two keys the same key;
/// `hash` must agree with it (equal keys hash identically).
pub trait KeyPolicy<K: ?Sized> {
    fn hash(key: &K) -> u64;
    fn cmp(a: &K, b: &K) -> Ordering;
}

/// The default policy: the key's own `Hash` and `Ord` implementations.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<K: Hash + Ord> KeyPolicy<K> for NaturalOrder {
    fn hash(key: &K) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish()
    }

    fn cmp(a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// djb2 over the key's bytes, case-sensitive byte ordering.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djb2;

impl<K: AsRef<str>> KeyPolicy<K> for Djb2 {
    fn hash(key: &K) -> u64 {
        let mut hash: u64 = 5381;
        for byte in key.as_ref().bytes() {
            // hash * 33 + byte
            hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
        }
        hash
    }

    fn cmp(a: &K, b: &K) -> Ordering {
        a.as_ref().cmp(b.as_ref())
    }
}

/// djb2 over ASCII-lowercased bytes; keys differing only in ASCII case are
/// the same key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Djb2IgnoreCase;

impl<K: AsRef<str>> KeyPolicy<K> for Djb2IgnoreCase {
    fn hash(key: &K) -> u64 {
        let mut hash: u64 = 5381;
        for byte in key.as_ref().bytes() {
            hash = hash
                .wrapping_mul(33)
                .wrapping_add(u64::from(byte.to_ascii_lowercase()));
        }
        hash
    }

    fn cmp(a: &K, b: &K) -> Ordering {
        let lhs = a.as_ref().bytes().map(|b| b.to_ascii_lowercase());
        let rhs = b.as_ref().bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}
