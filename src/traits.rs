//! Comparator trait and error type shared across the crate
//!
//! Ordering is supplied externally through [`TryCompare`], a fallible strict
//! "is lower priority than" relation. Any invocation of the comparator may
//! fail; every mutating queue operation treats such a failure
//! transactionally and rolls the structure back before reporting it.

use std::fmt;

/// Error type for priority queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `peek` or `pop` was called on an empty queue
    EmptyContainer,
    /// The comparator failed during a mutating operation; the queue (and,
    /// for queue-level merge, both queues) was rolled back to its pre-call
    /// state before the error was returned
    OperationFailed,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyContainer => write!(f, "container is empty"),
            HeapError::OperationFailed => {
                write!(f, "comparator failed; the operation was rolled back")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A fallible strict priority ordering between two elements
///
/// `try_lt(a, b)` returns `true` when `a` has strictly lower priority than
/// `b`. The relation must be a strict ordering; ties may resolve either way
/// and the queue breaks them in favor of the receiving side.
///
/// A comparator may fail on any invocation by returning an error. Mutating
/// queue operations surface such a failure as
/// [`HeapError::OperationFailed`], except that a comparator which itself
/// reports [`HeapError::EmptyContainer`] sees that exact value passed
/// through unchanged.
///
/// Comparators are held by value inside the queue and cloned whenever the
/// queue is cloned, so each queue instance's comparator state is
/// independent. A comparator that carries mutable state should use interior
/// mutability (`Cell`, `RefCell`), since it is invoked through `&self`.
pub trait TryCompare<T> {
    /// Returns `true` if `a` has strictly lower priority than `b`
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, HeapError>;
}

/// Orders elements by their `Ord` instance: smaller values have lower
/// priority, so the maximum element sits at the top of the queue
///
/// For a min-queue, wrap elements in [`std::cmp::Reverse`] or supply a
/// custom comparator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalOrder;

impl<T: Ord> TryCompare<T> for NaturalOrder {
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, HeapError> {
        Ok(a < b)
    }
}

/// Plain closures can serve as comparators directly
impl<T, F> TryCompare<T> for F
where
    F: Fn(&T, &T) -> Result<bool, HeapError>,
{
    fn try_lt(&self, a: &T, b: &T) -> Result<bool, HeapError> {
        self(a, b)
    }
}
