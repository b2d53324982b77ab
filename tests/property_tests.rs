//! Property-based tests using proptest
//!
//! Random sequences of push / pop / decrease_key / delete are replayed
//! against a reference model. After every operation the heap must agree with
//! the model on its minimum and length, and its internal structure (rings,
//! parent links, degrees, marks, heap order) must verify.

use proptest::prelude::*;
use rust_fibonacci_heap::fibonacci::{FibonacciHandle, FibonacciHeap};
use rust_fibonacci_heap::{DecreaseKeyHeap, Heap, HeapError};

#[derive(Debug, Clone)]
enum Op {
    Push(i32),
    Pop,
    /// Decrease the element pushed `index`-th (modulo pushes) by `delta`
    Decrease(usize, i32),
    /// Raise it by `delta`, which must be rejected
    Increase(usize, i32),
    Delete(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-1000i32..1000).prop_map(Op::Push),
        2 => Just(Op::Pop),
        3 => (any::<usize>(), 0i32..500).prop_map(|(i, d)| Op::Decrease(i, d)),
        1 => (any::<usize>(), 1i32..500).prop_map(|(i, d)| Op::Increase(i, d)),
        1 => any::<usize>().prop_map(Op::Delete),
    ]
}

/// Reference model: one slot per push. The handle is kept after removal so
/// stale-handle use can be exercised.
struct Model {
    slots: Vec<(Option<i32>, FibonacciHandle)>,
}

impl Model {
    fn min(&self) -> Option<i32> {
        self.slots.iter().filter_map(|(p, _)| *p).min()
    }

    fn len(&self) -> usize {
        self.slots.iter().filter(|(p, _)| p.is_some()).count()
    }
}

fn run_ops(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut heap: FibonacciHeap<usize, i32> = FibonacciHeap::new();
    let mut model = Model { slots: Vec::new() };

    for op in ops {
        match op {
            Op::Push(priority) => {
                let index = model.slots.len();
                let handle = heap.push_with_handle(priority, index);
                model.slots.push((Some(priority), handle));
            }
            Op::Pop => {
                let expected = model.min();
                let popped = heap.pop();
                prop_assert_eq!(popped.map(|(p, _)| p), expected);
                if let Some((priority, index)) = popped {
                    let (slot, handle) = &mut model.slots[index];
                    prop_assert_eq!(slot.take(), Some(priority));
                    prop_assert!(!heap.contains(handle));
                }
            }
            Op::Decrease(i, delta) if !model.slots.is_empty() => {
                let index = i % model.slots.len();
                let (slot, handle) = &mut model.slots[index];
                match slot {
                    Some(priority) => {
                        *priority -= delta;
                        prop_assert_eq!(heap.decrease_key(handle, *priority), Ok(()));
                    }
                    None => {
                        prop_assert_eq!(
                            heap.decrease_key(handle, i32::MIN),
                            Err(HeapError::InvalidHandle)
                        );
                    }
                }
            }
            Op::Increase(i, delta) if !model.slots.is_empty() => {
                let index = i % model.slots.len();
                if let (Some(priority), handle) = model.slots[index] {
                    let before_min = heap.peek().map(|(p, i)| (*p, *i));
                    prop_assert_eq!(
                        heap.decrease_key(&handle, priority + delta),
                        Err(HeapError::PriorityIncreased)
                    );
                    prop_assert_eq!(heap.get(&handle), Some((&priority, &index)));
                    prop_assert_eq!(heap.peek().map(|(p, i)| (*p, *i)), before_min);
                }
            }
            Op::Delete(i) if !model.slots.is_empty() => {
                let index = i % model.slots.len();
                let (slot, handle) = &mut model.slots[index];
                match slot.take() {
                    Some(priority) => {
                        prop_assert_eq!(heap.delete(handle), Ok((priority, index)));
                    }
                    None => {
                        prop_assert_eq!(heap.delete(handle), Err(HeapError::InvalidHandle));
                    }
                }
            }
            Op::Decrease(..) | Op::Increase(..) | Op::Delete(_) => {}
        }

        prop_assert_eq!(heap.peek().map(|(p, _)| *p), model.min());
        prop_assert_eq!(heap.len(), model.len());
        prop_assert_eq!(heap.is_empty(), model.len() == 0);
        prop_assert!(heap.verify_structure());
    }

    Ok(())
}

/// Popping everything yields a non-decreasing sequence containing exactly
/// the pushed priorities.
fn run_sorted_extraction<H: Heap<(), i32>>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    for &v in &values {
        heap.push(v, ());
    }

    let mut popped = Vec::with_capacity(values.len());
    while let Some((priority, ())) = heap.pop() {
        popped.push(priority);
    }

    let mut expected = values;
    expected.sort_unstable();
    prop_assert_eq!(popped, expected);
    prop_assert_eq!(heap.pop(), None);
    Ok(())
}

/// Decreasing random keys then popping everything still yields sorted output
/// matching the decreased values.
fn run_decrease_then_drain<H: DecreaseKeyHeap<usize, i32>>(
    initial: Vec<i32>,
    decreases: Vec<(usize, i32)>,
) -> Result<(), TestCaseError> {
    let mut heap = H::new();
    let mut current = initial.clone();
    let handles: Vec<_> = initial
        .iter()
        .enumerate()
        .map(|(i, &p)| heap.push_with_handle(p, i))
        .collect();

    for (i, delta) in decreases {
        let index = i % handles.len();
        current[index] -= delta;
        prop_assert!(heap.decrease_key(&handles[index], current[index]).is_ok());
    }

    let mut last = i32::MIN;
    let mut count = 0;
    while let Some((priority, index)) = heap.pop() {
        prop_assert!(priority >= last);
        prop_assert_eq!(priority, current[index]);
        last = priority;
        count += 1;
    }
    prop_assert_eq!(count, initial.len());
    Ok(())
}

proptest! {
    #[test]
    fn test_random_operations_match_model(ops in prop::collection::vec(op_strategy(), 0..300)) {
        run_ops(ops)?;
    }

    #[test]
    fn test_sorted_extraction(values in prop::collection::vec(-100i32..100, 0..200)) {
        run_sorted_extraction::<FibonacciHeap<(), i32>>(values)?;
    }

    #[test]
    fn test_decrease_then_drain(
        initial in prop::collection::vec(-100i32..100, 1..100),
        decreases in prop::collection::vec((any::<usize>(), 0i32..50), 0..100)
    ) {
        run_decrease_then_drain::<FibonacciHeap<usize, i32>>(initial, decreases)?;
    }

    #[test]
    fn test_duplicate_keys_keep_structure(
        values in prop::collection::vec(0i32..4, 1..150),
        pops in 0usize..150
    ) {
        let mut heap = FibonacciHeap::new();
        for (i, &v) in values.iter().enumerate() {
            heap.push(v, i);
        }
        for _ in 0..pops.min(values.len()) {
            heap.pop();
            prop_assert!(heap.verify_structure());
        }
    }
}
