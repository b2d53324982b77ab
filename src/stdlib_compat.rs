//! Standard library compatibility layer
//!
//! Provides a key-only heap with the `std::collections::BinaryHeap` API.
//!
//! # Differences from BinaryHeap
//!
//! - **Min-heap vs Max-heap**: This is a min-heap, while `BinaryHeap` is a max-heap.
//!   Use `std::cmp::Reverse<T>` (or a heap built with
//!   [`ReverseOrder`](crate::compare::ReverseOrder)) to get max-heap behavior.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::stdlib_compat::StdHeap;
//!
//! let mut heap: StdHeap<i32> = StdHeap::new();
//! heap.push(5);
//! heap.push(3);
//! heap.push(7);
//! assert_eq!(heap.peek(), Some(&3)); // min-heap, unlike BinaryHeap's max-heap
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.into_sorted_vec(), vec![5, 7]);
//! ```

use crate::fibonacci::FibonacciHeap;
use crate::traits::Heap;

/// A key-only heap with the `std::collections::BinaryHeap` API
///
/// The item itself serves as the priority; the underlying heap stores `()`
/// as its payload.
///
/// # Type Parameters
/// - `T`: The item type, must implement `Ord`
/// - `H`: The underlying heap, a [`FibonacciHeap`] by default
pub struct StdHeap<T: Ord, H: Heap<(), T> = FibonacciHeap<(), T>> {
    heap: H,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Ord, H: Heap<(), T>> StdHeap<T, H> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            heap: H::new(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Pushes an item onto the heap
    pub fn push(&mut self, item: T) {
        self.heap.push(item, ())
    }

    /// Returns a reference to the smallest item without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.peek().map(|(priority, _)| priority)
    }

    /// Removes and returns the smallest item
    pub fn pop(&mut self) -> Option<T> {
        self.heap.pop().map(|(priority, _)| priority)
    }

    /// Consumes the heap, returning its items in ascending order
    ///
    /// Note that `BinaryHeap::into_sorted_vec` is also ascending.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(item) = self.pop() {
            out.push(item);
        }
        out
    }
}

impl<T: Ord, H: Heap<(), T>> Default for StdHeap<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord, H: Heap<(), T>> Extend<T> for StdHeap<T, H> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}

impl<T: Ord, H: Heap<(), T>> FromIterator<T> for StdHeap<T, H> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}
