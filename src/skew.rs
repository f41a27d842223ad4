//! Skew heap implementation
//!
//! A skew heap is a self-adjusting heap-ordered binary tree that stores no
//! balance metadata at all. Its efficiency comes from one rule: after every
//! merge step along the right spine, the two children of the winning node
//! are unconditionally swapped.
//!
//! - O(1) peek
//! - O(log n) amortized push, pop, and merge
//!
//! What sets [`SkewHeap`] apart from the other obvious choices is that merge
//! moves whole trees in amortized logarithmic time, and that every mutating
//! operation is transactional with respect to comparator failure: if the
//! comparator reports an error mid-operation, the structure is restored to
//! exactly its pre-call shape before the error reaches the caller.

use crate::traits::{HeapError, NaturalOrder, TryCompare};
use std::mem;

type Link<T> = Option<Box<Node<T>>>;

/// One tree cell: an element plus two exclusively owned child slots.
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> Box<Self> {
        Box::new(Node {
            value,
            left: None,
            right: None,
        })
    }
}

/// Which input tree a spine node was taken from during a merge.
#[derive(Clone, Copy)]
enum Side {
    Lhs,
    Rhs,
}

/// A failed tree merge. Both input trees have already been restored to the
/// exact shape they had when the merge started; the caller puts them back
/// where they came from and surfaces the error.
struct MergeFailure<T> {
    lhs: Link<T>,
    rhs: Link<T>,
    error: HeapError,
}

/// Merges two heap-ordered trees, consuming both.
///
/// The walk is iterative. At each step the comparator picks the
/// higher-priority root; that node is pushed onto an explicit spine stack
/// with its right child detached, tagged with the side it came from, and
/// the walk continues with its old right child versus the loser. Once one
/// side runs out, the spine is replayed bottom-up: the partial result
/// becomes each node's right child and the node's children are then
/// swapped (the skew step). No comparator runs during replay, so the
/// commit phase cannot fail.
///
/// If the comparator fails mid-walk, the spine is replayed in reverse
/// instead, reattaching each node's original right child on its own side.
/// Since no swap has happened yet, this restores both input trees to their
/// pre-call shape, node for node.
fn merge_trees<T, C: TryCompare<T>>(
    cmp: &C,
    lhs: Link<T>,
    rhs: Link<T>,
) -> Result<Link<T>, MergeFailure<T>> {
    let mut spine: Vec<(Box<Node<T>>, Side)> = Vec::new();
    let mut lhs = lhs;
    let mut rhs = rhs;

    let remainder = loop {
        let (a, b) = match (lhs.take(), rhs.take()) {
            (None, rest) | (rest, None) => break rest,
            (Some(a), Some(b)) => (a, b),
        };
        match cmp.try_lt(&a.value, &b.value) {
            // Ties favor the receiving side.
            Ok(false) => {
                let mut winner = a;
                lhs = winner.right.take();
                rhs = Some(b);
                spine.push((winner, Side::Lhs));
            }
            Ok(true) => {
                let mut winner = b;
                rhs = winner.right.take();
                lhs = Some(a);
                spine.push((winner, Side::Rhs));
            }
            Err(error) => {
                lhs = Some(a);
                rhs = Some(b);
                while let Some((mut node, side)) = spine.pop() {
                    match side {
                        Side::Lhs => {
                            node.right = lhs;
                            lhs = Some(node);
                        }
                        Side::Rhs => {
                            node.right = rhs;
                            rhs = Some(node);
                        }
                    }
                }
                return Err(MergeFailure { lhs, rhs, error });
            }
        }
    };

    let mut merged = remainder;
    while let Some((mut node, _)) = spine.pop() {
        node.right = merged;
        mem::swap(&mut node.left, &mut node.right);
        merged = Some(node);
    }
    Ok(merged)
}

/// Deep-copies a tree with identical structure and values.
///
/// Builds the copy with an explicit work stack of (source, destination)
/// pairs, so arbitrarily deep chains copy without call-stack growth.
fn clone_tree<T: Clone>(src: &Node<T>) -> Box<Node<T>> {
    let mut root = Node::new(src.value.clone());
    let mut stack: Vec<(&Node<T>, &mut Node<T>)> = vec![(src, &mut *root)];
    while let Some((from, to)) = stack.pop() {
        if let Some(child) = from.left.as_deref() {
            to.left = Some(Node::new(child.value.clone()));
        }
        if let Some(child) = from.right.as_deref() {
            to.right = Some(Node::new(child.value.clone()));
        }
        let Node { left, right, .. } = to;
        if let (Some(from_child), Some(to_child)) = (from.left.as_deref(), left.as_deref_mut()) {
            stack.push((from_child, to_child));
        }
        if let (Some(from_child), Some(to_child)) = (from.right.as_deref(), right.as_deref_mut()) {
            stack.push((from_child, to_child));
        }
    }
    root
}

/// A mergeable priority queue backed by a skew heap
///
/// Elements are ordered by a [`TryCompare`] comparator; with the default
/// [`NaturalOrder`] the element with the largest `Ord` value is at the top.
/// Besides the usual push/pop/peek, two queues can be merged in amortized
/// O(log n): the receiving queue takes ownership of every node of the donor,
/// which is left empty.
///
/// Every mutating operation has the strong rollback guarantee: if the
/// comparator fails, the queue (and, for [`merge`](SkewHeap::merge), both
/// queues) is left exactly as it was before the call, and the caller may
/// retry or abandon the operation.
///
/// # Example
///
/// ```rust
/// use skew_priority_queue::SkewHeap;
///
/// let mut queue = SkewHeap::new();
/// queue.push(5)?;
/// queue.push(3)?;
/// queue.push(8)?;
/// queue.push(1)?;
///
/// assert_eq!(queue.peek()?, &8);
/// assert_eq!(queue.pop()?, 8);
/// assert_eq!(queue.peek()?, &5);
/// assert_eq!(queue.len(), 3);
/// # Ok::<(), skew_priority_queue::HeapError>(())
/// ```
pub struct SkewHeap<T, C: TryCompare<T> = NaturalOrder> {
    root: Link<T>,
    len: usize,
    cmp: C,
}

impl<T: Ord> SkewHeap<T, NaturalOrder> {
    /// Creates an empty queue ordered by `T`'s `Ord` instance, largest first
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C: TryCompare<T>> SkewHeap<T, C> {
    /// Creates an empty queue using `cmp` as the priority ordering
    ///
    /// `cmp.try_lt(a, b)` must implement a strict "a has lower priority
    /// than b" relation; the queue keeps the maximum element under that
    /// relation at the top.
    pub fn with_comparator(cmp: C) -> Self {
        Self {
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Returns the number of elements in the queue
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the queue holds no elements
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the highest-priority element
    ///
    /// O(1); never invokes the comparator.
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyContainer`] if the queue is empty.
    pub fn peek(&self) -> Result<&T, HeapError> {
        match self.root.as_deref() {
            Some(node) => Ok(&node.value),
            None => Err(HeapError::EmptyContainer),
        }
    }

    /// Inserts an element
    ///
    /// Allocates one node and merges it with the existing tree; amortized
    /// O(log n).
    ///
    /// # Errors
    ///
    /// If the comparator fails, the queue is unchanged, the new node is
    /// freed, and the comparator's error is returned
    /// ([`HeapError::OperationFailed`], or [`HeapError::EmptyContainer`]
    /// passed through unchanged if the comparator reported that).
    pub fn push(&mut self, value: T) -> Result<(), HeapError> {
        let node = Node::new(value);
        match merge_trees(&self.cmp, self.root.take(), Some(node)) {
            Ok(merged) => {
                self.root = merged;
                self.len += 1;
                Ok(())
            }
            Err(failure) => {
                // lhs is the old tree, already restored; rhs is the
                // detached new node, dropped here with the failed value.
                self.root = failure.lhs;
                Err(failure.error)
            }
        }
    }

    /// Removes and returns the highest-priority element
    ///
    /// Detaches the root's children and merges them; the old root is freed
    /// only once that merge has succeeded. Amortized O(log n).
    ///
    /// # Errors
    ///
    /// [`HeapError::EmptyContainer`] if the queue is empty. If the
    /// comparator fails during the merge, the old root and both children
    /// are reattached in their original slots, the count is unchanged, and
    /// the comparator's error is returned.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        let mut old_root = self.root.take().ok_or(HeapError::EmptyContainer)?;
        let left = old_root.left.take();
        let right = old_root.right.take();
        match merge_trees(&self.cmp, left, right) {
            Ok(merged) => {
                self.root = merged;
                self.len -= 1;
                let Node { value, .. } = *old_root;
                Ok(value)
            }
            Err(failure) => {
                old_root.left = failure.lhs;
                old_root.right = failure.rhs;
                self.root = Some(old_root);
                Err(failure.error)
            }
        }
    }

    /// Moves every element of `other` into `self`, leaving `other` empty
    ///
    /// Ownership of `other`'s entire tree is transferred; no element is
    /// copied and no node is reallocated. `other` remains usable and keeps
    /// its own comparator. Amortized O(log n).
    ///
    /// Merging a queue with itself cannot be expressed: the two `&mut`
    /// receivers may not alias.
    ///
    /// # Errors
    ///
    /// If `self`'s comparator fails, both queues are left exactly as they
    /// were before the call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use skew_priority_queue::SkewHeap;
    ///
    /// let mut a = SkewHeap::new();
    /// a.push(1)?;
    /// a.push(4)?;
    /// let mut b = SkewHeap::new();
    /// b.push(2)?;
    /// b.push(3)?;
    ///
    /// a.merge(&mut b)?;
    /// assert_eq!(a.len(), 4);
    /// assert!(b.is_empty());
    /// assert_eq!(a.pop()?, 4);
    /// # Ok::<(), skew_priority_queue::HeapError>(())
    /// ```
    pub fn merge(&mut self, other: &mut Self) -> Result<(), HeapError> {
        match merge_trees(&self.cmp, self.root.take(), other.root.take()) {
            Ok(merged) => {
                self.root = merged;
                self.len += other.len;
                other.len = 0;
                Ok(())
            }
            Err(failure) => {
                self.root = failure.lhs;
                other.root = failure.rhs;
                Err(failure.error)
            }
        }
    }

    /// Drops every element
    ///
    /// Frees the tree iteratively with an explicit stack, so worst-case
    /// chain-shaped trees are released without call-stack growth. Never
    /// fails; also used by `Drop`.
    pub fn clear(&mut self) {
        let mut stack = Vec::new();
        stack.extend(self.root.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl<T, C: TryCompare<T>> Drop for SkewHeap<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Ord> Default for SkewHeap<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: TryCompare<T> + Clone> Clone for SkewHeap<T, C> {
    fn clone(&self) -> Self {
        SkewHeap {
            root: self.root.as_deref().map(clone_tree),
            len: self.len,
            cmp: self.cmp.clone(),
        }
    }

    /// Mirrors copy assignment: the copy of `source` is built in full
    /// before the old contents of `self` are released, so `self` is never
    /// observed half-replaced.
    fn clone_from(&mut self, source: &Self) {
        let root = source.root.as_deref().map(clone_tree);
        self.clear();
        self.root = root;
        self.len = source.len;
        self.cmp = source.cmp.clone();
    }
}
