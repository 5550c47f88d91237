//! Singly-linked list of memory-block descriptors.
//!
//! This crate provides the bookkeeping structure behind a memory allocator or
//! memory-management simulator: a list whose nodes each reference a region of
//! memory (a base address plus a length). Allocator policy (first-fit,
//! best-fit, coalescing) lives in the caller; this crate keeps the list
//! consistent.
//!
//! # Design
//!
//! ```text
//! BlockList
//!   head ──► [slot 2] ──► [slot 0] ──► [slot 5] ──► none
//!   tail ─────────────────────────────────┘
//!   nodes: NodeSlab (owns every node, recycles slots)
//! ```
//!
//! - **Slab-owned nodes**: the list owns its nodes through an internal slab;
//!   links are slot indices, not pointers.
//! - **Cached ends**: `add_first` and `add_last` are O(1).
//! - **Handle identity**: insertions return a [`NodeKey`]. Keys carry a
//!   generation and the id of their list, so stale or foreign keys are
//!   rejected instead of aliasing a reused slot.
//! - **No partial mutation**: a failed call leaves the list unchanged.
//!
//! # Quick Start
//!
//! ```
//! use nexus_blocklist::{BlockList, InvalidArgument, ListError, MemoryBlock};
//!
//! let mut list = BlockList::new();
//!
//! let a = list.add_last(MemoryBlock::new(0, 64));
//! list.add_last(MemoryBlock::new(64, 64));
//! list.add_first(MemoryBlock::new(128, 32));
//!
//! assert_eq!(list.len(), 3);
//! assert_eq!(list.index_of(&MemoryBlock::new(0, 64)), Some(1));
//!
//! // Remove by identity
//! assert_eq!(list.remove_node(a), Ok(MemoryBlock::new(0, 64)));
//!
//! // The key is dead now
//! assert_eq!(
//!     list.remove_node(a),
//!     Err(ListError::InvalidArgument(InvalidArgument::NodeNotFound))
//! );
//! ```
//!
//! # Bounds
//!
//! | Operation | Valid indices |
//! |-----------|---------------|
//! | [`node_at`](BlockList::node_at), [`insert_at`](BlockList::insert_at) | `0..=len` |
//! | [`block_at`](BlockList::block_at), [`remove_at`](BlockList::remove_at) | `0..len` |
//!
//! `node_at(len)` is the one-past-the-end position and returns `Ok(None)`.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `add_first`, `add_last`, `pop_first` | O(1) |
//! | `insert_at(0 or len)` | O(1) |
//! | `insert_at`, `node_at`, `block_at`, `remove_at` | O(index) |
//! | `index_of`, `remove_block`, `remove_node` | O(n) |
//!
//! # Logging
//!
//! Mutations are reported through the [`log`] facade: successful structural
//! changes at `trace`, rejected calls at `debug`. The crate never installs a
//! logger.

#![warn(missing_docs)]

mod block;
mod error;
mod key;
mod link;
mod list;
mod node;
mod storage;

pub use block::MemoryBlock;
pub use error::{InvalidArgument, ListError, Result};
pub use key::NodeKey;
pub use list::{BlockList, Cursor, Iter, Keys};
pub use node::Node;
