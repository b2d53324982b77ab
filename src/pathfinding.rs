//! Dijkstra's and A* pathfinding on top of `decrease_key`
//!
//! Each discovered graph node is pushed into the heap exactly once. When a
//! cheaper route to a node still in the open set is found, its entry is
//! updated in place with `decrease_key` instead of pushing a duplicate,
//! which is exactly the access pattern a Fibonacci heap makes O(1).
//!
//! Only small indices are stored in the heap. An `FxHashMap` maps node states
//! to their index, and a `Vec` indexed by it holds costs, handles and
//! back-pointers for path reconstruction.
//!
//! A* is Dijkstra with a heuristic; Dijkstra is A* with `h(n) = 0`.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::pathfinding::{SearchNode, dijkstra};
//! use rust_fibonacci_heap::fibonacci::FibonacciHeap;
//!
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct Step { at: u32, goal: u32 }
//!
//! impl SearchNode for Step {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, u32)> {
//!         vec![
//!             (Step { at: self.at + 1, goal: self.goal }, 1),
//!             (Step { at: self.at * 2, goal: self.goal }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.at == self.goal
//!     }
//! }
//!
//! let start = Step { at: 1, goal: 10 };
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // 1 -> 2 -> 4 -> 5 -> 10
//! assert_eq!(path.len(), 5);
//! ```

use crate::traits::{DecreaseKeyHeap, Handle};
use log::{debug, trace};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// Types usable as path costs: ordered, copyable, addable, `Default` as zero.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// A node of a search graph.
///
/// The node carries whatever context it needs to enumerate its neighbors and
/// to recognize a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// Edge weight type
    type Cost: Cost;

    /// Returns every neighbor along with the cost of the edge to it.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node ends the search.
    fn is_goal(&self) -> bool;
}

/// A node with a heuristic estimate of its remaining cost, for A*.
///
/// The heuristic must never overestimate for A* to return optimal paths. It
/// need not be consistent: a closed node reached again more cheaply is
/// reopened and expanded once more.
pub trait AStarNode: SearchNode {
    /// Estimated cost from this node to the nearest goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap priority for a search entry, ordered by f-score only.
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// g + h (h = 0 for Dijkstra)
    pub f_score: C,
    /// Cost from the start
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is what the heap stores as its item.
pub type NodeIndex = usize;

struct Entry<N: SearchNode, H> {
    node: N,
    g_score: N::Cost,
    /// Present while the node sits in the open set
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Bookkeeping for discovered nodes: state-to-index map plus per-index data.
struct Discovered<N: SearchNode, H> {
    entries: Vec<Entry<N, H>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H: Handle> Discovered<N, H> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Returns the node's index and whether it was seen for the first time.
    fn index(&mut self, node: N, g_score: N::Cost) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }
        let index = self.entries.len();
        self.index_of.insert(node.clone(), index);
        self.entries.push(Entry {
            node,
            g_score,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn path_to(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.entries[current].node.clone()];
        while let Some(prev) = self.entries[current].came_from {
            path.push(self.entries[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Limits on how far a search may go.
#[derive(Debug, Clone, Copy, Default)]
struct Limits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

/// Runs Dijkstra's algorithm from `start` until a node's `is_goal()` holds.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, |_| N::Cost::default(), Limits::default())
}

/// Runs A* from `start`, guided by the node's `heuristic()`.
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    search::<N, H>(start, |n| n.heuristic(), Limits::default())
}

fn search<N, H>(
    start: &N,
    heuristic: impl Fn(&N) -> N::Cost,
    limits: Limits<N::Cost>,
) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let zero = N::Cost::default();
    let mut heap = H::new();
    let mut seen: Discovered<N, H::Handle> = Discovered::new();
    let mut explored = 0usize;

    let (start_index, _) = seen.index(start.clone(), zero);
    let handle = heap.push_with_handle(
        PriorityCost {
            f_score: heuristic(start),
            g_score: zero,
        },
        start_index,
    );
    seen.entries[start_index].handle = Some(handle);

    while let Some((priority, current)) = heap.pop() {
        if limits.max_nodes.is_some_and(|max| explored >= max) {
            debug!("search stopped after exploring {} nodes", explored);
            return None;
        }
        explored += 1;

        let entry = &mut seen.entries[current];
        if entry.closed {
            continue;
        }
        entry.closed = true;
        entry.handle = None;
        let node = entry.node.clone();
        let g = priority.g_score;

        if node.is_goal() {
            trace!("goal reached after exploring {} nodes", explored);
            return Some((seen.path_to(current), g));
        }

        for (neighbor, edge_cost) in node.successors() {
            let tentative_g = g + edge_cost;
            if limits.max_cost.is_some_and(|max| tentative_g > max) {
                continue;
            }
            let f = tentative_g + heuristic(&neighbor);
            relax(&mut heap, &mut seen, current, neighbor, tentative_g, f);
        }
    }

    None
}

/// Records a route to `neighbor` costing `g` if it improves on the known one.
///
/// The node is pushed on first sight or when reopened, and its key is
/// decreased while it is still open.
fn relax<N, H>(
    heap: &mut H,
    seen: &mut Discovered<N, H::Handle>,
    from: NodeIndex,
    neighbor: N,
    g: N::Cost,
    f: N::Cost,
) where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let (index, is_new) = seen.index(neighbor, g);
    let entry = &mut seen.entries[index];
    if !is_new && g >= entry.g_score {
        return;
    }
    if entry.closed {
        // Only an inconsistent heuristic finds a cheaper route to a closed node
        trace!("reopening node {}", index);
        entry.closed = false;
    }

    entry.g_score = g;
    entry.came_from = Some(from);
    let priority = PriorityCost {
        f_score: f,
        g_score: g,
    };

    match entry.handle {
        Some(ref handle) => {
            if let Err(err) = heap.decrease_key(handle, priority) {
                debug!("decrease_key on open node {} failed: {}", index, err);
            }
        }
        None => entry.handle = Some(heap.push_with_handle(priority, index)),
    }
}

/// Builder for searches with cost or exploration limits.
///
/// ```rust
/// use rust_fibonacci_heap::pathfinding::{PathFinderBuilder, SearchNode};
/// use rust_fibonacci_heap::fibonacci::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Line(u32);
///
/// impl SearchNode for Line {
///     type Cost = u32;
///     fn successors(&self) -> Vec<(Self, u32)> { vec![(Line(self.0 + 1), 1)] }
///     fn is_goal(&self) -> bool { self.0 == 50 }
/// }
///
/// let found = PathFinderBuilder::new(Line(0))
///     .max_cost(10)
///     .dijkstra::<FibonacciHeap<_, _>>();
/// assert!(found.is_none());
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: Limits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Starts a search configuration at `start`.
    pub fn new(start: N) -> Self {
        Self {
            start,
            limits: Limits {
                max_cost: None,
                max_nodes: None,
            },
        }
    }

    /// Never follow a route costing more than `cost`.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Give up after popping `count` nodes from the heap.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm under the configured limits.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search::<N, H>(&self.start, |_| N::Cost::default(), self.limits)
    }

    /// Runs A* under the configured limits.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        search::<N, H>(&self.start, |n| n.heuristic(), self.limits)
    }
}

/// Returns every node reachable from `start` within `max_cost`, with its
/// cheapest cost, in non-decreasing cost order.
pub fn reachable_within<N, H>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    H: DecreaseKeyHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let zero = N::Cost::default();
    let mut heap = H::new();
    let mut seen: Discovered<N, H::Handle> = Discovered::new();
    let mut result = Vec::new();

    let (start_index, _) = seen.index(start.clone(), zero);
    let handle = heap.push_with_handle(
        PriorityCost {
            f_score: zero,
            g_score: zero,
        },
        start_index,
    );
    seen.entries[start_index].handle = Some(handle);

    while let Some((priority, current)) = heap.pop() {
        let entry = &mut seen.entries[current];
        if entry.closed || priority.g_score > max_cost {
            continue;
        }
        entry.closed = true;
        entry.handle = None;
        let node = entry.node.clone();
        let g = priority.g_score;

        for (neighbor, edge_cost) in node.successors() {
            let tentative_g = g + edge_cost;
            if tentative_g <= max_cost {
                relax(&mut heap, &mut seen, current, neighbor, tentative_g, tentative_g);
            }
        }
        result.push((node, g));
    }

    result
}
