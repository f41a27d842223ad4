//! Property-based tests using proptest
//!
//! Random operation sequences are checked against simple reference models:
//! a sorted vector for ordering, a counter for size bookkeeping, and a
//! drained pre-state snapshot for the rollback guarantee.

use proptest::prelude::*;
use skew_priority_queue::{HeapError, SkewHeap, TryCompare};
use std::cell::Cell;
use std::rc::Rc;

/// Largest-first `i32` comparator that fails once its shared fuel runs out.
#[derive(Clone)]
struct FuelCompare {
    fuel: Rc<Cell<u64>>,
}

impl TryCompare<i32> for FuelCompare {
    fn try_lt(&self, a: &i32, b: &i32) -> Result<bool, HeapError> {
        let fuel = self.fuel.get();
        if fuel == 0 {
            return Err(HeapError::OperationFailed);
        }
        self.fuel.set(fuel - 1);
        Ok(a < b)
    }
}

fn fuel_queue(values: &[i32], fuel: &Rc<Cell<u64>>) -> SkewHeap<i32, FuelCompare> {
    let mut queue = SkewHeap::with_comparator(FuelCompare {
        fuel: Rc::clone(fuel),
    });
    for &v in values {
        queue.push(v).unwrap();
    }
    queue
}

/// Pops everything out of a clone of `queue`, leaving `queue` untouched.
fn drained_clone(queue: &SkewHeap<i32, FuelCompare>, fuel: &Rc<Cell<u64>>) -> Vec<i32> {
    let mut copy = queue.clone();
    fuel.set(u64::MAX);
    let mut out = Vec::with_capacity(copy.len());
    while let Ok(v) = copy.pop() {
        out.push(v);
    }
    out
}

fn sorted_descending(mut values: Vec<i32>) -> Vec<i32> {
    values.sort_unstable_by(|a, b| b.cmp(a));
    values
}

proptest! {
    #[test]
    fn pops_are_non_increasing(values in prop::collection::vec(-1000i32..1000, 0..200)) {
        let mut queue = SkewHeap::new();
        for &v in &values {
            queue.push(v).unwrap();
        }

        let mut popped = Vec::with_capacity(values.len());
        while let Ok(v) = queue.pop() {
            popped.push(v);
        }
        prop_assert_eq!(popped, sorted_descending(values));
    }

    #[test]
    fn len_tracks_operations(ops in prop::collection::vec((prop::bool::ANY, -1000i32..1000), 0..200)) {
        let mut queue = SkewHeap::new();
        let mut expected_len = 0usize;

        for (should_pop, value) in ops {
            if should_pop && !queue.is_empty() {
                queue.pop().unwrap();
                expected_len -= 1;
            } else {
                queue.push(value).unwrap();
                expected_len += 1;
            }
            prop_assert_eq!(queue.len(), expected_len);
            prop_assert_eq!(queue.is_empty(), expected_len == 0);
        }
    }

    #[test]
    fn peek_always_returns_the_maximum(values in prop::collection::vec(-1000i32..1000, 1..100)) {
        let mut queue = SkewHeap::new();
        let mut max_so_far = i32::MIN;
        for &v in &values {
            queue.push(v).unwrap();
            max_so_far = max_so_far.max(v);
            prop_assert_eq!(queue.peek(), Ok(&max_so_far));
        }
    }

    #[test]
    fn merge_is_the_sorted_union(
        lhs in prop::collection::vec(-1000i32..1000, 0..100),
        rhs in prop::collection::vec(-1000i32..1000, 0..100),
    ) {
        let mut a = SkewHeap::new();
        let mut b = SkewHeap::new();
        for &v in &lhs {
            a.push(v).unwrap();
        }
        for &v in &rhs {
            b.push(v).unwrap();
        }

        a.merge(&mut b).unwrap();
        prop_assert_eq!(a.len(), lhs.len() + rhs.len());
        prop_assert!(b.is_empty());

        let mut popped = Vec::with_capacity(a.len());
        while let Ok(v) = a.pop() {
            popped.push(v);
        }
        let union: Vec<i32> = lhs.into_iter().chain(rhs).collect();
        prop_assert_eq!(popped, sorted_descending(union));
    }

    #[test]
    fn clone_is_independent(
        values in prop::collection::vec(-1000i32..1000, 0..100),
        extra in -1000i32..1000,
    ) {
        let mut original = SkewHeap::new();
        for &v in &values {
            original.push(v).unwrap();
        }

        let mut copy = original.clone();
        copy.push(extra).unwrap();
        if !copy.is_empty() {
            copy.pop().unwrap();
        }

        prop_assert_eq!(original.len(), values.len());
        let mut popped = Vec::with_capacity(original.len());
        while let Ok(v) = original.pop() {
            popped.push(v);
        }
        prop_assert_eq!(popped, sorted_descending(values));
    }

    /// Inject a comparator failure at a random depth into a random merge;
    /// on failure both queues must be observably identical to their
    /// pre-call state, on success the usual union postcondition holds.
    #[test]
    fn merge_failure_rolls_both_queues_back(
        lhs in prop::collection::vec(-1000i32..1000, 0..60),
        rhs in prop::collection::vec(-1000i32..1000, 0..60),
        budget in 0u64..12,
    ) {
        let fuel = Rc::new(Cell::new(u64::MAX));
        let mut a = fuel_queue(&lhs, &fuel);
        let mut b = fuel_queue(&rhs, &fuel);
        let before_a = drained_clone(&a, &fuel);
        let before_b = drained_clone(&b, &fuel);

        fuel.set(budget);
        let result = a.merge(&mut b);
        fuel.set(u64::MAX);

        match result {
            Ok(()) => {
                prop_assert_eq!(a.len(), lhs.len() + rhs.len());
                prop_assert!(b.is_empty());
                let union: Vec<i32> = lhs.into_iter().chain(rhs).collect();
                prop_assert_eq!(drained_clone(&a, &fuel), sorted_descending(union));
            }
            Err(err) => {
                prop_assert_eq!(err, HeapError::OperationFailed);
                prop_assert_eq!(a.len(), lhs.len());
                prop_assert_eq!(b.len(), rhs.len());
                prop_assert_eq!(drained_clone(&a, &fuel), before_a);
                prop_assert_eq!(drained_clone(&b, &fuel), before_b);
            }
        }
    }

    /// Same injection for push: the queue must be unchanged and the failed
    /// element must not appear.
    #[test]
    fn push_failure_rolls_back(
        values in prop::collection::vec(-1000i32..1000, 0..60),
        value in -1000i32..1000,
        budget in 0u64..12,
    ) {
        let fuel = Rc::new(Cell::new(u64::MAX));
        let mut queue = fuel_queue(&values, &fuel);
        let before = drained_clone(&queue, &fuel);

        fuel.set(budget);
        let result = queue.push(value);
        fuel.set(u64::MAX);

        match result {
            Ok(()) => {
                prop_assert_eq!(queue.len(), values.len() + 1);
                let mut expected = values;
                expected.push(value);
                prop_assert_eq!(drained_clone(&queue, &fuel), sorted_descending(expected));
            }
            Err(err) => {
                prop_assert_eq!(err, HeapError::OperationFailed);
                prop_assert_eq!(queue.len(), values.len());
                prop_assert_eq!(drained_clone(&queue, &fuel), before);
            }
        }
    }

    /// Same injection for pop: on failure the root and its children must
    /// still be in place.
    #[test]
    fn pop_failure_rolls_back(
        values in prop::collection::vec(-1000i32..1000, 1..60),
        budget in 0u64..12,
    ) {
        let fuel = Rc::new(Cell::new(u64::MAX));
        let mut queue = fuel_queue(&values, &fuel);
        let before = drained_clone(&queue, &fuel);
        let top = before[0];

        fuel.set(budget);
        let result = queue.pop();
        fuel.set(u64::MAX);

        match result {
            Ok(v) => {
                prop_assert_eq!(v, top);
                prop_assert_eq!(queue.len(), values.len() - 1);
                prop_assert_eq!(drained_clone(&queue, &fuel), before[1..].to_vec());
            }
            Err(err) => {
                prop_assert_eq!(err, HeapError::OperationFailed);
                prop_assert_eq!(queue.len(), values.len());
                prop_assert_eq!(queue.peek(), Ok(&top));
                prop_assert_eq!(drained_clone(&queue, &fuel), before);
            }
        }
    }
}
