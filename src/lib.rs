//! A mergeable priority queue built on a skew heap
//!
//! This crate provides [`SkewHeap`], a heap-ordered binary tree container
//! whose distinctive operation is merging two independent queues in
//! amortized logarithmic time, transferring ownership of every node rather
//! than copying elements.
//!
//! # Features
//!
//! - **Mergeable**: `merge` absorbs another queue in amortized O(log n)
//! - **No balance metadata**: the skew heap stays efficient purely by
//!   swapping children after each merge step along the right spine
//! - **Fallible comparators**: ordering is supplied via [`TryCompare`],
//!   which may fail on any invocation
//! - **Strong rollback guarantee**: a failed `push`, `pop`, or `merge`
//!   leaves every queue involved exactly as it was before the call
//! - **No recursion**: merge, deep copy, and bulk free all run on explicit
//!   stacks, so worst-case chain-shaped trees cannot exhaust the call stack
//!
//! # Example
//!
//! ```rust
//! use skew_priority_queue::SkewHeap;
//!
//! let mut a = SkewHeap::new();
//! a.push(5)?;
//! a.push(8)?;
//!
//! let mut b = SkewHeap::new();
//! b.push(3)?;
//! b.push(13)?;
//!
//! a.merge(&mut b)?;
//! assert!(b.is_empty());
//! assert_eq!(a.pop()?, 13);
//! assert_eq!(a.pop()?, 8);
//! # Ok::<(), skew_priority_queue::HeapError>(())
//! ```

pub mod skew;
pub mod traits;

// Re-export the main types for convenience
pub use skew::SkewHeap;
pub use traits::{HeapError, NaturalOrder, TryCompare};
