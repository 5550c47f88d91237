//! Sentinel-based slot links.
//!
//! Uses a reserved sentinel value (`u32::MAX`) instead of `Option<u32>`
//! to keep node cells small.

/// A link to a slot in the node slab, or the "none" sentinel.
///
/// Links are internal to the list; callers identify nodes by
/// [`NodeKey`](crate::NodeKey), which also carries a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Link(u32);

impl Link {
    /// Sentinel value representing "no node".
    pub(crate) const NONE: Self = Link(u32::MAX);

    /// Creates a link to `slot`.
    ///
    /// The slab never hands out `u32::MAX` as a slot, so the result is
    /// never the sentinel.
    #[inline]
    pub(crate) const fn to(slot: u32) -> Self {
        debug_assert!(slot != u32::MAX, "slot index collides with sentinel");
        Link(slot)
    }

    /// Returns `true` if this is the sentinel value.
    #[inline]
    pub(crate) const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Returns the linked slot, or `None` for the sentinel.
    #[inline]
    pub(crate) const fn slot(self) -> Option<u32> {
        if self.is_none() { None } else { Some(self.0) }
    }
}

impl Default for Link {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel() {
        assert!(Link::NONE.is_none());
        assert_eq!(Link::NONE.slot(), None);
        assert_eq!(Link::default(), Link::NONE);
    }

    #[test]
    fn valid_links() {
        for slot in [0u32, 1, 1000, u32::MAX - 1] {
            let link = Link::to(slot);
            assert!(!link.is_none());
            assert_eq!(link.slot(), Some(slot));
        }
    }
}
