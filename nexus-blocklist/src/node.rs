//! A single cell of the chain.

use core::fmt;

use crate::MemoryBlock;
use crate::link::Link;

/// One node of a [`BlockList`](crate::BlockList).
///
/// Holds a [`MemoryBlock`] and a link to the next node. The block is fixed at
/// construction; the link is only spliced by the list that owns the node.
#[derive(Debug)]
pub struct Node {
    block: MemoryBlock,
    pub(crate) next: Link,
}

impl Node {
    /// Creates an unlinked node.
    #[inline]
    pub(crate) const fn new(block: MemoryBlock) -> Self {
        Self {
            block,
            next: Link::NONE,
        }
    }

    /// Returns the block this node references.
    #[inline]
    pub const fn block(&self) -> &MemoryBlock {
        &self.block
    }

    /// Consumes the node, returning its block.
    #[inline]
    pub(crate) const fn into_block(self) -> MemoryBlock {
        self.block
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.block, f)
    }
}
