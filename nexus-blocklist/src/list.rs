//! Singly-linked list of memory blocks.
//!
//! Nodes live in a slab owned by the list, with the chain threaded through
//! slot links. The list caches both ends, so [`add_first`](BlockList::add_first)
//! and [`add_last`](BlockList::add_last) are O(1). Positional operations walk
//! the chain from the head.
//!
//! # Node Identity
//!
//! Every insertion returns a [`NodeKey`]. Keys identify nodes, not blocks:
//! two nodes that wrap equal blocks have different keys, and a key goes stale
//! as soon as its node is removed. Stale keys and keys from other lists are
//! rejected with [`InvalidArgument::NodeNotFound`].
//!
//! # Example
//!
//! ```
//! use nexus_blocklist::{BlockList, MemoryBlock};
//!
//! let a = MemoryBlock::new(0, 100);
//! let b = MemoryBlock::new(100, 50);
//! let c = MemoryBlock::new(150, 25);
//!
//! let mut free_list = BlockList::new();
//! free_list.add_last(a);
//! free_list.add_last(b);
//! free_list.add_last(c);
//!
//! assert_eq!(free_list.index_of(&b), Some(1));
//! assert_eq!(free_list.block_at(2), Ok(&c));
//!
//! free_list.remove_at(1).unwrap();
//! assert_eq!(free_list.len(), 2);
//! assert_eq!(free_list.index_of(&b), None);
//! assert_eq!(free_list.block_at(1), Ok(&c));
//! ```
//!
//! # Use Case: Moving Blocks Between Lists
//!
//! An allocator keeps a free list and an allocated list. Allocation takes a
//! block out of one and appends it to the other:
//!
//! ```
//! use nexus_blocklist::{BlockList, MemoryBlock};
//!
//! let mut free: BlockList = [MemoryBlock::new(0, 64), MemoryBlock::new(64, 128)]
//!     .into_iter()
//!     .collect();
//! let mut allocated = BlockList::new();
//!
//! // First fit for 100 bytes
//! let index = free.iter().position(|block| block.length() >= 100).unwrap();
//! let block = free.remove_at(index).unwrap();
//! allocated.add_last(block);
//!
//! assert_eq!(free.len(), 1);
//! assert_eq!(allocated.block_at(0), Ok(&MemoryBlock::new(64, 128)));
//! ```

use core::fmt;
use core::iter::FusedIterator;

use log::{debug, trace};

use crate::error::{InvalidArgument, ListError, Result};
use crate::key::ListId;
use crate::link::Link;
use crate::storage::NodeSlab;
use crate::{MemoryBlock, Node, NodeKey};

/// A singly-linked list of [`MemoryBlock`]s.
///
/// The list tracks head, tail, and length, and owns every node through an
/// internal slab.
///
/// # Invariants
///
/// After every successful mutation:
///
/// - `len == 0` iff there is no head iff there is no tail
/// - following `next` from the head `len - 1` times reaches the tail
/// - the tail has no `next`
/// - no node appears twice in the chain
///
/// A failed operation leaves the list untouched.
pub struct BlockList {
    id: ListId,
    head: Link,
    tail: Link,
    len: usize,
    nodes: NodeSlab,
}

impl Default for BlockList {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Construction and inspection
// =============================================================================

impl BlockList {
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self {
            id: ListId::next(),
            head: Link::NONE,
            tail: Link::NONE,
            len: 0,
            nodes: NodeSlab::new(),
        }
    }

    /// Creates an empty list with room for `capacity` nodes.
    ///
    /// The first `capacity` insertions do not reallocate.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id: ListId::next(),
            head: Link::NONE,
            tail: Link::NONE,
            len: 0,
            nodes: NodeSlab::with_capacity(capacity),
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of nodes the list can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the head node's key, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<NodeKey> {
        self.head.slot().map(|slot| self.key_for(slot))
    }

    /// Returns the tail node's key, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<NodeKey> {
        self.tail.slot().map(|slot| self.key_for(slot))
    }

    /// Returns the node for `key`.
    ///
    /// Returns `None` if the key is stale or belongs to another list.
    #[inline]
    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        if key.list() != self.id {
            return None;
        }
        self.nodes.resolve(key.slot(), key.generation())
    }

    /// Returns the block wrapped by the node for `key`.
    #[inline]
    pub fn block(&self, key: NodeKey) -> Option<&MemoryBlock> {
        self.get(key).map(Node::block)
    }

    /// Returns the key of the node following `key`.
    ///
    /// Returns `None` if `key` is the tail, stale, or foreign.
    #[inline]
    pub fn next_key(&self, key: NodeKey) -> Option<NodeKey> {
        let next = self.get(key)?.next;
        next.slot().map(|slot| self.key_for(slot))
    }

    /// Returns the key of the node at `index`.
    ///
    /// `index == len` is the one-past-the-end position and yields `Ok(None)`,
    /// including on an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index > len`.
    pub fn node_at(&self, index: usize) -> Result<Option<NodeKey>> {
        if index > self.len {
            debug!("node_at: index {index} out of range (len {})", self.len);
            return Err(ListError::out_of_range(index, self.len));
        }
        Ok(self.link_at(index).slot().map(|slot| self.key_for(slot)))
    }

    /// Returns the block stored at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn block_at(&self, index: usize) -> Result<&MemoryBlock> {
        if index >= self.len {
            debug!("block_at: index {index} out of range (len {})", self.len);
            return Err(ListError::out_of_range(index, self.len));
        }
        Ok(self.node_in(self.link_at(index)).block())
    }

    /// Returns the position of the first node wrapping `block`.
    ///
    /// Scans from the head; returns `None` if no node matches.
    pub fn index_of(&self, block: &MemoryBlock) -> Option<usize> {
        self.iter().position(|candidate| candidate == block)
    }

    /// Returns `true` if some node wraps `block`.
    #[inline]
    pub fn contains(&self, block: &MemoryBlock) -> bool {
        self.index_of(block).is_some()
    }

    /// Renders every node in list order, for diagnostics.
    ///
    /// ```
    /// use nexus_blocklist::{BlockList, MemoryBlock};
    ///
    /// let list: BlockList = [MemoryBlock::new(0, 10), MemoryBlock::new(10, 5)]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(list.describe(), "(0 , 10) (10 , 5) ");
    /// ```
    pub fn describe(&self) -> String {
        self.to_string()
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    #[inline]
    fn key_for(&self, slot: u32) -> NodeKey {
        NodeKey::new(self.id, slot, self.nodes.generation(slot))
    }

    /// Returns the slot for `key` if it names a live node of this list.
    #[inline]
    fn slot_of(&self, key: NodeKey) -> Option<u32> {
        self.get(key).map(|_| key.slot())
    }

    /// Returns the node a non-sentinel link points at.
    #[inline]
    fn node_in(&self, link: Link) -> &Node {
        match link.slot() {
            Some(slot) => self.nodes.node(slot),
            None => unreachable!("followed a link past the tail"),
        }
    }

    /// Walks `index` links from the head.
    ///
    /// Callers guarantee `index <= len`; `index == len` yields the sentinel.
    fn link_at(&self, index: usize) -> Link {
        debug_assert!(index <= self.len);
        let mut current = self.head;
        for _ in 0..index {
            current = self.node_in(current).next;
        }
        current
    }

    /// Returns the slot whose `next` is `target`, scanning from the head.
    fn predecessor_of(&self, target: u32) -> Option<u32> {
        let target = Link::to(target);
        let mut previous = self.head.slot()?;
        loop {
            let next = self.nodes.node(previous).next;
            if next == target {
                return Some(previous);
            }
            previous = next.slot()?;
        }
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl BlockList {
    /// Inserts `block` so that it becomes the element at `index`.
    ///
    /// Inserting at `0` or at `len` is O(1); anything in between walks to
    /// `index - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index > len`.
    pub fn insert_at(&mut self, index: usize, block: MemoryBlock) -> Result<NodeKey> {
        if index > self.len {
            debug!("insert_at: index {index} out of range (len {})", self.len);
            return Err(ListError::out_of_range(index, self.len));
        }

        let key = if index == 0 {
            self.link_front(block)
        } else if index == self.len {
            self.link_back(block)
        } else {
            match self.link_at(index - 1).slot() {
                Some(previous) => self.link_after(previous, block),
                None => unreachable!("index {index} below len {} has no predecessor", self.len),
            }
        };

        trace!("inserted {block:?} at {index}");
        Ok(key)
    }

    /// Appends `block` as the new tail. O(1).
    pub fn add_last(&mut self, block: MemoryBlock) -> NodeKey {
        let key = self.link_back(block);
        trace!("appended {block:?} at {}", self.len - 1);
        key
    }

    /// Prepends `block` as the new head. O(1).
    pub fn add_first(&mut self, block: MemoryBlock) -> NodeKey {
        let key = self.link_front(block);
        trace!("prepended {block:?}");
        key
    }

    fn link_front(&mut self, block: MemoryBlock) -> NodeKey {
        let mut node = Node::new(block);
        node.next = self.head;

        let (slot, generation) = self.nodes.insert(node);
        let link = Link::to(slot);

        if self.tail.is_none() {
            self.tail = link;
        }
        self.head = link;
        self.len += 1;

        NodeKey::new(self.id, slot, generation)
    }

    fn link_back(&mut self, block: MemoryBlock) -> NodeKey {
        let (slot, generation) = self.nodes.insert(Node::new(block));
        let link = Link::to(slot);

        match self.tail.slot() {
            Some(tail) => self.nodes.node_mut(tail).next = link,
            None => self.head = link,
        }
        self.tail = link;
        self.len += 1;

        NodeKey::new(self.id, slot, generation)
    }

    fn link_after(&mut self, previous: u32, block: MemoryBlock) -> NodeKey {
        let mut node = Node::new(block);
        node.next = self.nodes.node(previous).next;

        let (slot, generation) = self.nodes.insert(node);
        let link = Link::to(slot);

        self.nodes.node_mut(previous).next = link;
        if self.tail == Link::to(previous) {
            self.tail = link;
        }
        self.len += 1;

        NodeKey::new(self.id, slot, generation)
    }
}

// =============================================================================
// Removal
// =============================================================================

impl BlockList {
    /// Removes the node identified by `key`, returning its block.
    ///
    /// Removing the head is O(1); any other node is found by scanning from
    /// the head for its predecessor.
    ///
    /// # Errors
    ///
    /// - [`InvalidArgument::EmptyList`] if the list is empty.
    /// - [`InvalidArgument::NodeNotFound`] if `key` is stale, belongs to
    ///   another list, or is not reachable from the head.
    pub fn remove_node(&mut self, key: NodeKey) -> Result<MemoryBlock> {
        if self.is_empty() {
            debug!("remove_node: list is empty");
            return Err(InvalidArgument::EmptyList.into());
        }

        let Some(target) = self.slot_of(key) else {
            debug!("remove_node: {key:?} is not in the list");
            return Err(InvalidArgument::NodeNotFound.into());
        };
        let target_link = Link::to(target);
        let next = self.nodes.node(target).next;

        if target_link == self.head {
            self.head = next;
            if next.is_none() {
                self.tail = Link::NONE;
            }
        } else {
            let Some(previous) = self.predecessor_of(target) else {
                debug!("remove_node: {key:?} is not reachable from the head");
                return Err(InvalidArgument::NodeNotFound.into());
            };
            self.nodes.node_mut(previous).next = next;
            if target_link == self.tail {
                self.tail = Link::to(previous);
            }
        }

        let block = match self.nodes.remove(target) {
            Some(node) => node.into_block(),
            None => unreachable!("resolved slot {target} vanished"),
        };
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);

        trace!("removed {block:?}");
        Ok(block)
    }

    /// Removes the node at `index`, returning its block.
    ///
    /// # Errors
    ///
    /// Returns [`ListError::OutOfRange`] if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<MemoryBlock> {
        if index >= self.len {
            debug!("remove_at: index {index} out of range (len {})", self.len);
            return Err(ListError::out_of_range(index, self.len));
        }

        match self.node_at(index)? {
            Some(key) => self.remove_node(key),
            None => unreachable!("index {index} below len {} has no node", self.len),
        }
    }

    /// Removes the first node wrapping `block`, returning the index it held.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument::BlockNotFound`] if no node wraps `block`.
    pub fn remove_block(&mut self, block: &MemoryBlock) -> Result<usize> {
        let Some(index) = self.index_of(block) else {
            debug!("remove_block: {block:?} is not in the list");
            return Err(InvalidArgument::BlockNotFound.into());
        };
        self.remove_at(index)?;
        Ok(index)
    }

    /// Removes the head, returning its block. O(1).
    ///
    /// Returns `None` if the list is empty.
    pub fn pop_first(&mut self) -> Option<MemoryBlock> {
        let key = self.first()?;
        self.remove_node(key).ok()
    }

    /// Removes every node.
    ///
    /// All keys handed out so far become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = Link::NONE;
        self.tail = Link::NONE;
        self.len = 0;
        trace!("cleared");
    }
}

// =============================================================================
// Traversal
// =============================================================================

impl BlockList {
    /// Returns a forward cursor positioned at the head.
    #[inline]
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor {
            list: self,
            current: self.head,
        }
    }

    /// Returns an iterator over blocks, head to tail.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            nodes: &self.nodes,
            next: self.head,
            remaining: self.len,
        }
    }

    /// Returns an iterator over node keys, head to tail.
    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a MemoryBlock;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<MemoryBlock> for BlockList {
    fn extend<I: IntoIterator<Item = MemoryBlock>>(&mut self, iter: I) {
        for block in iter {
            self.add_last(block);
        }
    }
}

impl FromIterator<MemoryBlock> for BlockList {
    fn from_iter<I: IntoIterator<Item = MemoryBlock>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = BlockList::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl fmt::Display for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in self {
            fmt::Display::fmt(block, f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// =============================================================================
// Cursor
// =============================================================================

/// A forward-only cursor over a [`BlockList`].
///
/// The cursor borrows the list, so the list cannot change while the cursor
/// is alive.
///
/// # Example
///
/// ```
/// use nexus_blocklist::{BlockList, MemoryBlock};
///
/// let list: BlockList = (0..4).map(|i| MemoryBlock::new(i * 16, 16)).collect();
///
/// let mut total = 0;
/// let mut cursor = list.cursor();
/// while let Some(block) = cursor.current() {
///     total += block.length();
///     cursor.move_next();
/// }
/// assert_eq!(total, 64);
/// assert!(cursor.is_exhausted());
/// ```
pub struct Cursor<'a> {
    list: &'a BlockList,
    current: Link,
}

impl<'a> Cursor<'a> {
    /// Returns the current block.
    ///
    /// Returns `None` if the cursor is exhausted (past end of list).
    #[inline]
    pub fn current(&self) -> Option<&'a MemoryBlock> {
        let slot = self.current.slot()?;
        Some(self.list.nodes.node(slot).block())
    }

    /// Returns the key of the current node.
    ///
    /// Returns `None` if the cursor is exhausted.
    #[inline]
    pub fn key(&self) -> Option<NodeKey> {
        self.current.slot().map(|slot| self.list.key_for(slot))
    }

    /// Advances the cursor to the next node.
    ///
    /// If already at end, cursor remains exhausted.
    #[inline]
    pub fn move_next(&mut self) {
        if let Some(slot) = self.current.slot() {
            self.current = self.list.nodes.node(slot).next;
        }
    }

    /// Peeks at the next block without advancing.
    ///
    /// Returns `None` if at end or cursor is exhausted.
    #[inline]
    pub fn peek_next(&self) -> Option<&'a MemoryBlock> {
        let slot = self.current.slot()?;
        let next = self.list.nodes.node(slot).next.slot()?;
        Some(self.list.nodes.node(next).block())
    }

    /// Returns `true` if the cursor is exhausted (no current node).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over the blocks of a [`BlockList`], head to tail.
pub struct Iter<'a> {
    nodes: &'a NodeSlab,
    next: Link,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MemoryBlock;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next.slot()?;
        let node = self.nodes.node(slot);
        self.next = node.next;
        self.remaining -= 1;
        Some(node.block())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

/// Iterator over the node keys of a [`BlockList`], head to tail.
pub struct Keys<'a> {
    list: &'a BlockList,
    next: Link,
    remaining: usize,
}

impl Iterator for Keys<'_> {
    type Item = NodeKey;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.next.slot()?;
        self.next = self.list.nodes.node(slot).next;
        self.remaining -= 1;
        Some(self.list.key_for(slot))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Keys<'_> {}

impl FusedIterator for Keys<'_> {}

// =============================================================================
// Structural checks
// =============================================================================

#[cfg(test)]
impl BlockList {
    /// Walks the chain and the slab, panicking on any broken invariant.
    pub(crate) fn check_invariants(&self) {
        use std::collections::HashSet;

        assert_eq!(self.len == 0, self.head.is_none(), "len/head disagree");
        assert_eq!(self.len == 0, self.tail.is_none(), "len/tail disagree");

        let mut seen = HashSet::new();
        let mut last = Link::NONE;
        let mut current = self.head;
        while let Some(slot) = current.slot() {
            assert!(seen.insert(slot), "cycle through slot {slot}");
            assert!(seen.len() <= self.len, "chain longer than len");
            last = current;
            current = self.nodes.node(slot).next;
        }

        assert_eq!(seen.len(), self.len, "reachable count differs from len");
        assert_eq!(last, self.tail, "walk does not end at tail");
        if let Some(tail) = self.tail.slot() {
            assert!(self.nodes.node(tail).next.is_none(), "tail has a successor");
        }

        assert_eq!(self.nodes.len(), self.len, "slab holds unlinked nodes");
        let occupied: HashSet<u32> = self.nodes.occupied().collect();
        assert_eq!(occupied, seen, "slab occupancy differs from chain");
    }
}


// =============================================================================
// Latency probes
// =============================================================================
