//! Slab storage for list nodes.
//!
//! Nodes live in a growable array of slots. Freed slots go on a free stack and
//! are reused by later inserts. Each slot carries a generation that is bumped
//! whenever its node is removed, so a [`NodeKey`](crate::NodeKey) minted for
//! an earlier occupant no longer resolves.

use crate::Node;

/// One cell of the slab.
#[derive(Debug)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Growable node storage with stable slot indices and generation checks.
///
/// # Requirements upheld
///
/// - **Stable slots**: a slot index stays valid until its node is removed
/// - **O(1)** insert, remove, get (amortized for insert when growing)
/// - **Slot reuse**: removed slots are reused LIFO by future inserts
#[derive(Debug, Default)]
pub(crate) struct NodeSlab {
    slots: Vec<Slot>,
    /// Vacant slot indices, most recently freed on top.
    free: Vec<u32>,
    len: usize,
}

impl NodeSlab {
    /// Creates an empty slab.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Creates an empty slab with room for `capacity` nodes before growing.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            len: 0,
        }
    }

    /// Returns the number of occupied slots.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of nodes the slab can hold without reallocating.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Stores `node`, returning its slot and the slot's current generation.
    ///
    /// # Panics
    ///
    /// Panics if the slab already holds `u32::MAX` slots (the last index is
    /// reserved for the link sentinel).
    pub(crate) fn insert(&mut self, node: Node) -> (u32, u32) {
        self.len += 1;

        if let Some(slot) = self.free.pop() {
            let cell = &mut self.slots[slot as usize];
            debug_assert!(cell.node.is_none(), "free stack holds occupied slot");
            cell.node = Some(node);
            return (slot, cell.generation);
        }

        assert!(self.slots.len() < u32::MAX as usize, "node slab exhausted");
        let slot = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        (slot, 0)
    }

    /// Removes and returns the node in `slot`, if occupied.
    ///
    /// The slot's generation is bumped before it is made available again.
    pub(crate) fn remove(&mut self, slot: u32) -> Option<Node> {
        let cell = self.slots.get_mut(slot as usize)?;
        let node = cell.node.take()?;

        cell.generation = cell.generation.wrapping_add(1);
        self.free.push(slot);
        self.len -= 1;
        Some(node)
    }

    /// Returns the node in `slot`, if occupied.
    #[inline]
    pub(crate) fn get(&self, slot: u32) -> Option<&Node> {
        self.slots.get(slot as usize)?.node.as_ref()
    }

    /// Returns the node in `slot` if it is occupied and at `generation`.
    #[inline]
    pub(crate) fn resolve(&self, slot: u32, generation: u32) -> Option<&Node> {
        let cell = self.slots.get(slot as usize)?;
        if cell.generation != generation {
            return None;
        }
        cell.node.as_ref()
    }

    /// Returns the current generation of `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` was never allocated.
    #[inline]
    pub(crate) fn generation(&self, slot: u32) -> u32 {
        self.slots[slot as usize].generation
    }

    /// Returns the node in an occupied slot.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant. Links inside a list always point at
    /// occupied slots, so this only fires on a corrupted chain.
    #[inline]
    pub(crate) fn node(&self, slot: u32) -> &Node {
        match self.get(slot) {
            Some(node) => node,
            None => unreachable!("link to vacant slot {slot}"),
        }
    }

    /// Mutable counterpart of [`node`](Self::node).
    #[inline]
    pub(crate) fn node_mut(&mut self, slot: u32) -> &mut Node {
        match self.slots.get_mut(slot as usize).and_then(|cell| cell.node.as_mut()) {
            Some(node) => node,
            None => unreachable!("link to vacant slot {slot}"),
        }
    }

    /// Drops every node and makes all slots available again.
    ///
    /// Generations of occupied slots are bumped, so every outstanding key
    /// goes stale.
    pub(crate) fn clear(&mut self) {
        self.free.clear();
        for (slot, cell) in self.slots.iter_mut().enumerate().rev() {
            if cell.node.take().is_some() {
                cell.generation = cell.generation.wrapping_add(1);
            }
            self.free.push(slot as u32);
        }
        self.len = 0;
    }

    /// Returns the indices of all occupied slots, in slot order.
    #[cfg(test)]
    pub(crate) fn occupied(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.node.is_some())
            .map(|(slot, _)| slot as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBlock;

    fn node(base: usize) -> Node {
        Node::new(MemoryBlock::new(base, 8))
    }

    #[test]
    fn new_is_empty() {
        let slab = NodeSlab::new();
        assert_eq!(slab.len(), 0);
        assert!(slab.get(0).is_none());
    }

    #[test]
    fn with_capacity_preallocates() {
        let slab = NodeSlab::with_capacity(100);
        assert!(slab.capacity() >= 100);
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn insert_get_remove() {
        let mut slab = NodeSlab::new();

        let (slot, generation) = slab.insert(node(0));
        assert_eq!(slab.len(), 1);
        assert_eq!(slab.get(slot).map(|n| n.block().base_address()), Some(0));
        assert!(slab.resolve(slot, generation).is_some());

        let removed = slab.remove(slot).unwrap();
        assert_eq!(removed.block().base_address(), 0);
        assert!(slab.get(slot).is_none());
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn remove_vacant_is_none() {
        let mut slab = NodeSlab::new();
        assert!(slab.remove(0).is_none());

        let (slot, _) = slab.insert(node(0));
        slab.remove(slot).unwrap();
        assert!(slab.remove(slot).is_none());
        assert_eq!(slab.len(), 0);
    }

    #[test]
    fn slot_reuse_bumps_generation() {
        let mut slab = NodeSlab::new();

        let (slot, old_gen) = slab.insert(node(0));
        slab.remove(slot).unwrap();

        let (reused, new_gen) = slab.insert(node(1));
        assert_eq!(reused, slot);
        assert_ne!(new_gen, old_gen);

        // The old generation no longer resolves
        assert!(slab.resolve(slot, old_gen).is_none());
        assert_eq!(
            slab.resolve(slot, new_gen).map(|n| n.block().base_address()),
            Some(1)
        );
    }

    #[test]
    fn free_stack_is_lifo() {
        let mut slab = NodeSlab::new();

        let (a, _) = slab.insert(node(0));
        let (b, _) = slab.insert(node(1));
        let (_c, _) = slab.insert(node(2));

        slab.remove(a).unwrap();
        slab.remove(b).unwrap();

        assert_eq!(slab.insert(node(3)).0, b);
        assert_eq!(slab.insert(node(4)).0, a);
    }

    #[test]
    fn clear_stales_every_generation() {
        let mut slab = NodeSlab::new();

        let a = slab.insert(node(0));
        let b = slab.insert(node(1));
        slab.clear();

        assert_eq!(slab.len(), 0);
        assert!(slab.resolve(a.0, a.1).is_none());
        assert!(slab.resolve(b.0, b.1).is_none());

        // Slots are handed out again from the lowest index
        assert_eq!(slab.insert(node(2)).0, 0);
        assert_eq!(slab.insert(node(3)).0, 1);
        assert_eq!(slab.occupied().count(), 2);
    }

    #[test]
    #[should_panic(expected = "link to vacant slot")]
    fn node_on_vacant_slot_panics() {
        let slab = NodeSlab::new();
        let _ = slab.node(0);
    }
}
