//! Node identity.
//!
//! A [`NodeKey`] names one node of one list. It combines:
//!
//! - the id of the list that created the node,
//! - the slab slot holding the node,
//! - the generation of that slot when the node was created.
//!
//! Slots are recycled after removal, but their generation is bumped first, so
//! a key to a removed node never resolves again. The list id keeps keys from
//! one list from resolving in another.

use core::sync::atomic::{AtomicU32, Ordering};

/// Opaque handle identifying a node in a [`BlockList`](crate::BlockList).
///
/// Keys are cheap to copy and compare. Two nodes that wrap equal blocks
/// still have distinct keys.
///
/// # Example
///
/// ```
/// use nexus_blocklist::{BlockList, MemoryBlock};
///
/// let mut list = BlockList::new();
/// let a = list.add_last(MemoryBlock::new(0, 16));
/// let b = list.add_last(MemoryBlock::new(0, 16));
///
/// assert_ne!(a, b);
/// assert_eq!(list.block(a), list.block(b));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    list: ListId,
    slot: u32,
    generation: u32,
}

impl NodeKey {
    #[inline]
    pub(crate) const fn new(list: ListId, slot: u32, generation: u32) -> Self {
        Self {
            list,
            slot,
            generation,
        }
    }

    #[inline]
    pub(crate) const fn list(&self) -> ListId {
        self.list
    }

    #[inline]
    pub(crate) const fn slot(&self) -> u32 {
        self.slot
    }

    #[inline]
    pub(crate) const fn generation(&self) -> u32 {
        self.generation
    }
}

/// Process-unique id of a list instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ListId(u32);

static NEXT_LIST_ID: AtomicU32 = AtomicU32::new(0);

impl ListId {
    /// Allocates a fresh id.
    ///
    /// Ids wrap after `u32::MAX` lists; a collision then needs two live lists
    /// created four billion allocations apart.
    #[inline]
    pub(crate) fn next() -> Self {
        ListId(NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}
