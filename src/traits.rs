//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy:
//!
//! - [`Heap`]: push / peek / pop, compatible with `BinaryHeap`-style usage
//! - [`DecreaseKeyHeap`]: adds handle-based `decrease_key` and `delete`
//!
//! Generic code such as [`crate::pathfinding`] and [`crate::stdlib_compat`]
//! is written against these traits rather than a concrete heap.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The new priority is greater than the current priority
    PriorityIncreased,
    /// The handle is no longer valid (element was removed, or it belongs to another heap)
    InvalidHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::PriorityIncreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for `decrease_key` and `delete`
///
/// Handles are small `Copy` values. They stay valid until the element they
/// name is popped, deleted or cleared, after which every operation taking
/// the handle reports [`HeapError::InvalidHandle`].
pub trait Handle: Copy + PartialEq + Eq + fmt::Debug {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap`, which stores values directly, these heaps store
/// `(priority, item)` pairs so the ordering key is separate from the data,
/// and they are min-heaps under their ordering.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::Heap;
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<&str, i32> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    ///
    /// Returns `None` on an empty heap; this never mutates the heap.
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Extended heap trait with `decrease_key` and `delete` support
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{DecreaseKeyHeap, Heap};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    ///
    /// # Time Complexity
    /// O(1)
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Decreases the priority of the element identified by `handle`
    ///
    /// An equal priority is accepted and leaves the structure as it is.
    ///
    /// # Errors
    /// - [`HeapError::PriorityIncreased`] if `new_priority` is greater than
    ///   the current priority
    /// - [`HeapError::InvalidHandle`] if the element is no longer in the heap
    ///
    /// The heap is unchanged when an error is returned.
    ///
    /// # Time Complexity
    /// O(1) amortized
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by `handle`, returning it
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is no longer in the heap.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
