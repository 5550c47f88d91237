//! Memory block descriptor.

use core::fmt;

/// A region of memory: a base address plus a length in bytes.
///
/// Blocks are plain values. The list compares them with `==` and never
/// mutates them.
///
/// # Example
///
/// ```
/// use nexus_blocklist::MemoryBlock;
///
/// let block = MemoryBlock::new(0x1000, 256);
/// assert_eq!(block.base_address(), 0x1000);
/// assert_eq!(block.end_address(), 0x1100);
/// assert_eq!(block.to_string(), "(4096 , 256) ");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryBlock {
    base_address: usize,
    length: usize,
}

impl MemoryBlock {
    /// Creates a block covering `length` bytes starting at `base_address`.
    #[inline]
    pub const fn new(base_address: usize, length: usize) -> Self {
        Self {
            base_address,
            length,
        }
    }

    /// Returns the first address of the block.
    #[inline]
    pub const fn base_address(&self) -> usize {
        self.base_address
    }

    /// Returns the length of the block in bytes.
    #[inline]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the address one past the end of the block.
    ///
    /// Saturates at `usize::MAX`.
    #[inline]
    pub const fn end_address(&self) -> usize {
        self.base_address.saturating_add(self.length)
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} , {}) ", self.base_address, self.length)
    }
}
