//! Fibonacci Heap for Rust
//!
//! This crate provides an arena-backed Fibonacci heap: a priority queue with
//! O(1) amortized insert and `decrease_key` and O(log n) amortized pop, the
//! classic building block for shortest-path and minimum-spanning-tree
//! algorithms.
//!
//! # Features
//!
//! - **Fibonacci Heap** ([`fibonacci::FibonacciHeap`]): insert, pop,
//!   decrease_key with cascading cuts, and delete of arbitrary elements
//! - **Checked handles**: nodes live in a generational arena, so using a
//!   handle after its element was removed returns [`HeapError::InvalidHandle`]
//!   instead of corrupting the heap
//! - **Custom orderings** ([`compare`]): natural, reversed, or any closure
//! - **Pathfinding** ([`pathfinding`]): Dijkstra and A* driven by `decrease_key`
//! - **`BinaryHeap`-style wrapper** ([`stdlib_compat::StdHeap`])
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.push_with_handle(5, "item1");
//! let _handle2 = heap.push_with_handle(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//! ```

pub mod compare;
mod degree;
pub mod fibonacci;
mod node;
pub mod pathfinding;
mod ring;
pub mod stdlib_compat;
pub mod traits;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
