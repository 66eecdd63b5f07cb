//! Slot-granular allocation policy.
//!
//! Containers in this crate never talk to the global allocator directly for
//! capacity decisions; they charge an [`Allocator`] policy one slot per node
//! (or per bucket) and return the charge when the node is released. The
//! policy is injected at construction and cloned into every part of a
//! container, so one budget can govern a whole map and all of its buckets.

use core::cell::Cell;
use std::rc::Rc;

use crate::error::{Error, Result};

/// Allocation policy consulted before any storage grows.
///
/// Clones of a policy share the same underlying budget; a container hands a
/// clone to each of its parts rather than owning the policy exclusively.
pub trait Allocator: Clone {
    /// Reserves `slots` storage slots.
    ///
    /// Returns [`Error::OutOfMemory`] when the budget cannot cover the
    /// request, in which case nothing is charged.
    fn allocate(&self, slots: usize) -> Result<()>;

    /// Returns `slots` previously reserved slots to the budget.
    fn deallocate(&self, slots: usize);
}

/// Unbounded policy backed by the process heap. The default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Heap;

impl Allocator for Heap {
    #[inline]
    fn allocate(&self, _slots: usize) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn deallocate(&self, _slots: usize) {}
}

/// Fixed slot budget shared by every clone.
///
/// Single-threaded by construction: the budget lives behind `Rc`, which keeps
/// the policy (and any container built on it) `!Send` and `!Sync`.
#[derive(Clone, Debug)]
pub struct Quota {
    remaining: Rc<Cell<usize>>,
}

impl Quota {
    /// A budget of `slots` slots.
    pub fn new(slots: usize) -> Self {
        Self {
            remaining: Rc::new(Cell::new(slots)),
        }
    }

    /// Slots still available across all clones of this budget.
    pub fn remaining(&self) -> usize {
        self.remaining.get()
    }
}

impl Allocator for Quota {
    fn allocate(&self, slots: usize) -> Result<()> {
        let left = self.remaining.get();
        if left < slots {
            return Err(Error::OutOfMemory);
        }
        self.remaining.set(left - slots);
        Ok(())
    }

    fn deallocate(&self, slots: usize) {
        self.remaining.set(self.remaining.get().saturating_add(slots));
    }
}
