//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a priority queue with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized pop (extract-min) and delete
//!
//! The structure is a forest of heap-ordered trees. Roots are linked in a
//! circular doubly linked list (the root list), and each node's children form
//! their own circular list. Insertion and decrease_key are lazy: they only add
//! trees to the root list. The cost is paid in `pop`, which merges trees of
//! equal degree until every root has a distinct degree (consolidation).
//!
//! Decrease_key cuts a node that became smaller than its parent and promotes
//! it to the root list. A non-root node that loses a second child is cut as
//! well (cascading cut), which keeps a node of degree `d` at least `F(d + 2)`
//! nodes large and therefore the maximum degree logarithmic.
//!
//! Nodes live in a generational arena. Handles are arena keys, so a handle to
//! an element that has been removed is detected and rejected with
//! [`HeapError::InvalidHandle`].

use crate::compare::{Compare, NaturalOrder};
use crate::degree::{checked_increment, saturating_decrement, table_size_hint};
use crate::node::{Arena, Node, NodeKey};
use crate::ring;
use crate::traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
use log::{debug, trace, warn};
use slotmap::SlotMap;
use smallvec::{smallvec, SmallVec};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an element in a Fibonacci heap
///
/// The handle is tied to the heap that issued it. Passing it to another heap,
/// or using it after its element was popped, deleted or cleared, yields
/// [`HeapError::InvalidHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    key: NodeKey,
    heap: u64,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// A min-heap of `(priority, item)` pairs ordered by the comparator `C`,
/// [`NaturalOrder`] by default.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// assert_eq!(heap.pop(), Some((1, "item")));
/// assert_eq!(heap.pop(), None);
/// ```
pub struct FibonacciHeap<T, P, C = NaturalOrder> {
    nodes: Arena<T, P>,
    /// Minimum root, also the root list's representative
    min: Option<NodeKey>,
    len: usize,
    cmp: C,
    id: u64,
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty heap ordered by `P`'s `Ord`.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, NaturalOrder)
    }
}

impl<T, P, C: Compare<P>> FibonacciHeap<T, P, C> {
    /// Creates an empty heap ordered by `cmp`.
    pub fn with_comparator(cmp: C) -> Self {
        Self::with_capacity_and_comparator(0, cmp)
    }

    /// Creates an empty heap ordered by `cmp` with room for `capacity` elements.
    pub fn with_capacity_and_comparator(capacity: usize, cmp: C) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            min: None,
            len: 0,
            cmp,
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
        }
    }

    /// Returns the comparator ordering this heap.
    pub fn comparator(&self) -> &C {
        &self.cmp
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Inserts an element, discarding its handle.
    pub fn push(&mut self, priority: P, item: T) {
        self.push_with_handle(priority, item);
    }

    /// Inserts an element and returns a handle for `decrease_key` / `delete`.
    ///
    /// The new node joins the root list as a single-node tree. No
    /// consolidation happens here.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn push_with_handle(&mut self, priority: P, item: T) -> FibonacciHandle {
        let key = self.nodes.insert(Node::new(priority, item));
        let rep = ring::insert_into_ring(&mut self.nodes, self.min, key);
        self.min = Some(rep);
        if self.less(key, rep) {
            self.min = Some(key);
        }
        self.len += 1;

        FibonacciHandle { key, heap: self.id }
    }

    /// Returns the minimum priority and its item without removing them.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn peek(&self) -> Option<(&P, &T)> {
        self.min.map(|min| {
            let node = &self.nodes[min];
            (&node.priority, &node.item)
        })
    }

    /// Removes and returns the minimum priority and its item.
    ///
    /// The minimum's children are promoted to the root list and the forest
    /// is consolidated. On an empty heap this returns `None` and changes
    /// nothing.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn pop(&mut self) -> Option<(P, T)> {
        let min = self.min?;
        self.detach_min(min);
        let node = self.nodes.remove(min)?;
        Some((node.priority, node.item))
    }

    /// Decreases the priority of the element behind `handle`.
    ///
    /// If the element now orders before its parent it is cut to the root
    /// list, and its former parent goes through a cascading cut.
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] for a stale or foreign handle
    /// - [`HeapError::PriorityIncreased`] if `new_priority` orders after the
    ///   current priority
    ///
    /// Nothing is modified when an error is returned.
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(
        &mut self,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        let key = self.resolve(handle)?;
        if self.cmp.compare(&new_priority, &self.nodes[key].priority) == Ordering::Greater {
            debug!("decrease_key rejected: new priority orders after the current one");
            return Err(HeapError::PriorityIncreased);
        }

        self.nodes[key].priority = new_priority;

        if let Some(parent) = self.nodes[key].parent {
            if self.less(key, parent) {
                self.cut(key, parent);
                self.cascading_cut(parent);
            }
        }

        // A node still below its parent cannot beat the minimum, so only a
        // root can become the new minimum here.
        if let Some(min) = self.min {
            if self.less(key, min) {
                self.min = Some(key);
            }
        }

        Ok(())
    }

    /// Removes the element behind `handle` and returns it.
    ///
    /// Behaves as a decrease to minus infinity followed by `pop`: a non-root
    /// node is cut (with cascading cut on its parent), forced to be the
    /// minimum, then extracted. No sentinel priority is needed, so the full
    /// priority domain stays usable.
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] for a stale or foreign handle.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(P, T), HeapError> {
        let key = self.resolve(handle)?;

        if let Some(parent) = self.nodes[key].parent {
            self.cut(key, parent);
            self.cascading_cut(parent);
        }

        self.min = Some(key);
        self.detach_min(key);
        let node = self.nodes.remove(key).ok_or(HeapError::InvalidHandle)?;
        Ok((node.priority, node.item))
    }

    /// Returns the priority and item behind `handle`, if it is still live.
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        if handle.heap != self.id {
            return None;
        }
        self.nodes
            .get(handle.key)
            .map(|node| (&node.priority, &node.item))
    }

    /// Returns the item behind `handle` mutably.
    ///
    /// The priority is not exposed: it may only move through
    /// [`FibonacciHeap::decrease_key`].
    pub fn get_item_mut(&mut self, handle: &FibonacciHandle) -> Option<&mut T> {
        if handle.heap != self.id {
            return None;
        }
        self.nodes.get_mut(handle.key).map(|node| &mut node.item)
    }

    /// Returns true if `handle` names an element still in this heap.
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        handle.heap == self.id && self.nodes.contains_key(handle.key)
    }

    /// Removes every element. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.min = None;
        self.len = 0;
    }

    /// Returns an iterator popping elements in ascending priority order.
    ///
    /// Elements not consumed by the iterator stay in the heap.
    pub fn drain_sorted(&mut self) -> DrainSorted<'_, T, P, C> {
        DrainSorted { heap: self }
    }

    /// Consumes the heap, returning its elements in ascending priority order.
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut out = Vec::with_capacity(self.len);
        out.extend(self.drain_sorted());
        out
    }

    /// Walks the whole forest and checks every structural invariant:
    ///
    /// - every ring is circular and `left`/`right` are mutual inverses
    /// - root-list members have no parent and are unmarked
    /// - every child ring member points at its parent
    /// - `degree` equals the length of the child ring
    /// - no child orders before its parent
    /// - `min` orders at or before every root
    /// - `len` equals the number of reachable nodes and of arena slots
    ///
    /// Each violation is logged at `warn` level before returning `false`.
    pub fn verify_structure(&self) -> bool {
        let Some(min) = self.min else {
            if self.len != 0 || !self.nodes.is_empty() {
                warn!(
                    "empty heap reports len {} with {} arena nodes",
                    self.len,
                    self.nodes.len()
                );
                return false;
            }
            return true;
        };

        if !self.nodes.contains_key(min) {
            warn!("min points at a removed node");
            return false;
        }

        let limit = self.nodes.len();
        let mut visited = 0usize;
        // (ring entry point, parent owning the ring)
        let mut pending: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];

        while let Some((start, parent)) = pending.pop() {
            let mut current = start;
            let mut ring_len = 0usize;

            loop {
                let Some(node) = self.nodes.get(current) else {
                    warn!("ring links to a removed node");
                    return false;
                };
                if self.nodes.get(node.right).map(|right| right.left) != Some(current) {
                    warn!("left/right links are not mutual inverses");
                    return false;
                }
                if node.parent != parent {
                    warn!("node's parent link disagrees with the ring holding it");
                    return false;
                }
                match parent {
                    None => {
                        if node.marked {
                            warn!("root-list member is marked");
                            return false;
                        }
                        if self.less(current, min) {
                            warn!("a root orders before min");
                            return false;
                        }
                    }
                    Some(parent) => {
                        if self.less(current, parent) {
                            warn!("child orders before its parent");
                            return false;
                        }
                    }
                }
                match node.child {
                    Some(child) => pending.push((child, Some(current))),
                    None if node.degree != 0 => {
                        warn!("childless node has degree {}", node.degree);
                        return false;
                    }
                    None => {}
                }

                visited += 1;
                ring_len += 1;
                if visited > limit {
                    warn!("ring does not close; visited more nodes than the arena holds");
                    return false;
                }

                current = node.right;
                if current == start {
                    break;
                }
            }

            if let Some(parent) = parent {
                let degree = usize::from(self.nodes[parent].degree);
                if degree != ring_len {
                    warn!("degree {} but child ring holds {} nodes", degree, ring_len);
                    return false;
                }
            }
        }

        if visited != self.len || self.len != self.nodes.len() {
            warn!(
                "len {} but {} reachable nodes and {} arena nodes",
                self.len,
                visited,
                self.nodes.len()
            );
            return false;
        }

        true
    }

    fn resolve(&self, handle: &FibonacciHandle) -> Result<NodeKey, HeapError> {
        if handle.heap != self.id || !self.nodes.contains_key(handle.key) {
            debug!("rejected stale or foreign handle {:?}", handle);
            return Err(HeapError::InvalidHandle);
        }
        Ok(handle.key)
    }

    #[inline]
    fn less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.cmp.less(&self.nodes[a].priority, &self.nodes[b].priority)
    }

    /// Unhooks the root `min` from the forest: promotes its children to the
    /// root list, removes it from the root list and consolidates what is left.
    /// The node stays in the arena for the caller to take.
    fn detach_min(&mut self, min: NodeKey) {
        if let Some(child) = self.nodes[min].child.take() {
            let mut current = child;
            loop {
                let node = &mut self.nodes[current];
                node.parent = None;
                node.marked = false;
                current = node.right;
                if current == child {
                    break;
                }
            }
            ring::splice(&mut self.nodes, min, child);
            self.nodes[min].degree = 0;
        }

        self.len -= 1;

        match ring::remove_from_ring(&mut self.nodes, min, min) {
            None => self.min = None,
            Some(next) => {
                self.min = Some(next);
                self.consolidate(next);
            }
        }
    }

    /// Links roots of equal degree until all root degrees are distinct, then
    /// recomputes `min`.
    ///
    /// On equal priorities the tree met first keeps the parent role.
    fn consolidate(&mut self, start: NodeKey) {
        let roots = ring::members(&self.nodes, start);
        let mut table: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; table_size_hint(self.len)];
        let mut links = 0usize;

        for &root in &roots {
            let mut tree = root;
            let mut degree = usize::from(self.nodes[tree].degree);

            loop {
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                let Some(other) = table[degree].take() else {
                    break;
                };

                let (parent, child) = if self.less(tree, other) {
                    (tree, other)
                } else {
                    (other, tree)
                };
                self.link(child, parent);
                links += 1;

                tree = parent;
                degree += 1;
            }

            table[degree] = Some(tree);
        }

        trace!(
            "consolidated {} roots with {} links, table size {}",
            roots.len(),
            links,
            table.len()
        );

        // Linking already took every child out of the root list, so the
        // remaining ring is exactly the trees left in the table.
        let mut min: Option<NodeKey> = None;
        for root in table.into_iter().flatten() {
            min = match min {
                Some(current) if !self.less(root, current) => Some(current),
                _ => Some(root),
            };
        }
        self.min = min;
    }

    /// Makes root `child` a child of root `parent`.
    ///
    /// The root list's representative is not maintained here; consolidation
    /// recomputes `min` once all links are done.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        ring::remove_from_ring(&mut self.nodes, parent, child);

        let siblings = self.nodes[parent].child;
        let rep = ring::insert_into_ring(&mut self.nodes, siblings, child);

        let p = &mut self.nodes[parent];
        p.child = Some(rep);
        p.degree = checked_increment(p.degree);

        let c = &mut self.nodes[child];
        c.parent = Some(parent);
        c.marked = false;
    }

    /// Moves `node` from `parent`'s child ring to the root list.
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        let rep = self.nodes[parent].child.unwrap_or(node);
        let remaining = ring::remove_from_ring(&mut self.nodes, rep, node);

        let p = &mut self.nodes[parent];
        p.child = remaining;
        p.degree = saturating_decrement(p.degree);

        let n = &mut self.nodes[node];
        n.parent = None;
        n.marked = false;

        self.min = Some(ring::insert_into_ring(&mut self.nodes, self.min, node));
    }

    /// Walks up from `node`: marks the first unmarked non-root and stops, cuts
    /// every marked non-root on the way.
    fn cascading_cut(&mut self, mut node: NodeKey) {
        let mut cuts = 0usize;

        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                break;
            }
            self.cut(node, parent);
            cuts += 1;
            node = parent;
        }

        if cuts > 0 {
            trace!("cascading cut promoted {} marked ancestors", cuts);
        }
    }
}

impl<T, P, C: Compare<P> + Default> Default for FibonacciHeap<T, P, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, P: fmt::Debug, C> fmt::Debug for FibonacciHeap<T, P, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min", &self.min.map(|min| &self.nodes[min].priority))
            .finish()
    }
}

impl<T, P, C: Compare<P>> Extend<(P, T)> for FibonacciHeap<T, P, C> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (priority, item) in iter {
            self.push(priority, item);
        }
    }
}

impl<T, P, C: Compare<P> + Default> FromIterator<(P, T)> for FibonacciHeap<T, P, C> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut heap = Self::default();
        heap.extend(iter);
        heap
    }
}

impl<T, P, C: Compare<P> + Default> Heap<T, P> for FibonacciHeap<T, P, C> {
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        FibonacciHeap::push(self, priority, item)
    }

    fn peek(&self) -> Option<(&P, &T)> {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        FibonacciHeap::pop(self)
    }
}

impl<T, P, C: Compare<P> + Default> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P, C> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        FibonacciHeap::push_with_handle(self, priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, new_priority)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        FibonacciHeap::delete(self, handle)
    }
}

/// Iterator returned by [`FibonacciHeap::drain_sorted`].
pub struct DrainSorted<'a, T, P, C: Compare<P>> {
    heap: &'a mut FibonacciHeap<T, P, C>,
}

impl<T, P, C: Compare<P>> Iterator for DrainSorted<'_, T, P, C> {
    type Item = (P, T);

    fn next(&mut self) -> Option<Self::Item> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T, P, C: Compare<P>> ExactSizeIterator for DrainSorted<'_, T, P, C> {}
