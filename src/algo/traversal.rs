/*!
Depth-first traversal with explicit per-node state.

[`DepthFirstSearch`] is an iterator over [`DfsEvent`]s. Instead of recursing, it keeps all
state (including the partially consumed neighbor iterators) on an explicit call stack, so
arbitrarily deep graphs cannot overflow the program stack, and the search can be paused after
every event. Cycle detection, two-coloring and component counting are all built on these events.

The order of events is fully determined by the neighbor order of the representation.
*/

use std::iter::FusedIterator;

use super::*;

/// State of a node during a depth-first search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NodeState {
    /// Not discovered yet
    #[default]
    Unvisited,
    /// Discovered and still an ancestor on the active search path
    OnStack,
    /// All neighbors have been processed
    Visited,
}

/// Events emitted by [`DepthFirstSearch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DfsEvent {
    /// `node` is seen for the first time. `parent` is `None` for roots.
    Discover { node: Node, parent: Option<Node> },
    /// The edge `from -> to` leads to an already discovered node; `state` is the state of `to`
    /// at the time the edge was examined.
    Examine {
        from: Node,
        to: Node,
        state: NodeState,
    },
    /// All neighbors of the node have been processed
    Finish(Node),
}

#[derive(Debug, Clone)]
struct StackFrame<'a, G>
where
    G: AdjacencyList + 'a,
{
    node: Node,
    parent: Option<Node>,
    first_call: bool,
    parent_skipped: bool,
    neighbors: G::NeighborIter<'a>,
}

/// Iterative depth-first search producing [`DfsEvent`]s.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let g = AdjList::from_edges(3, [(0, 1), (1, 2)]);
/// let order: Vec<_> = g.dfs_order(0).collect();
/// assert_eq!(order, vec![0, 1, 2]);
/// ```
pub struct DepthFirstSearch<'a, G>
where
    G: AdjacencyList,
{
    graph: &'a G,
    states: Vec<NodeState>,
    call_stack: Vec<StackFrame<'a, G>>,
    potentially_unvisited: Node,
    skip_parent: bool,
    restart: bool,
}

impl<'a, G> DepthFirstSearch<'a, G>
where
    G: AdjacencyList,
{
    /// Creates a search that starts at `start` and stops once every node reachable from it is
    /// finished.
    /// ** Panics if `start >= n` **
    pub fn new(graph: &'a G, start: Node) -> Self {
        let mut search = Self::idle(graph);
        search.push_node(start, None);
        search
    }

    /// Creates a search that covers all nodes: after a tree is finished it restarts at the
    /// smallest unvisited node. Roots are discovered with `parent == None`.
    pub fn forest(graph: &'a G) -> Self {
        let mut search = Self::idle(graph);
        search.restart = true;
        search.try_restart_at_unvisited();
        search
    }

    fn idle(graph: &'a G) -> Self {
        Self {
            graph,
            states: vec![NodeState::Unvisited; graph.len()],
            call_stack: Vec::with_capacity(32),
            potentially_unvisited: 0,
            skip_parent: false,
            restart: false,
        }
    }

    /// If set, the first occurrence of the parent in a node's neighbors is ignored.
    /// This is the mirror entry of the tree edge in an undirected graph; further
    /// occurrences (parallel edges) are reported as usual.
    pub fn set_skip_parent(&mut self, skip: bool) {
        self.skip_parent = skip;
    }

    /// Builder variant of [`DepthFirstSearch::set_skip_parent`]
    pub fn skip_parent(mut self, skip: bool) -> Self {
        self.set_skip_parent(skip);
        self
    }

    /// If set, the search continues at the smallest unvisited node once a tree is finished
    pub fn set_restart(&mut self, restart: bool) {
        self.restart = restart;
    }

    /// Builder variant of [`DepthFirstSearch::set_restart`]
    pub fn restart(mut self, restart: bool) -> Self {
        self.set_restart(restart);
        self
    }

    /// Returns the current state of `u`
    /// ** Panics if `u >= n` **
    pub fn state_of(&self, u: Node) -> NodeState {
        self.states[u as usize]
    }

    /// Returns *true* if `u` was discovered
    /// ** Panics if `u >= n` **
    pub fn did_visit_node(&self, u: Node) -> bool {
        self.states[u as usize] != NodeState::Unvisited
    }

    /// Returns the nodes on the active search path, starting at the root
    pub fn active_path(&self) -> impl Iterator<Item = Node> + '_ {
        self.call_stack.iter().map(|frame| frame.node)
    }

    /// Returns the part of the active search path that starts at `u`.
    /// Empty if `u` is not [`NodeState::OnStack`].
    pub fn active_path_from(&self, u: Node) -> Vec<Node> {
        if self.states[u as usize] != NodeState::OnStack {
            return Vec::new();
        }

        self.call_stack
            .iter()
            .position(|frame| frame.node == u)
            .map_or_else(Vec::new, |pos| {
                self.call_stack[pos..]
                    .iter()
                    .map(|frame| frame.node)
                    .collect()
            })
    }

    /// Tries to restart the search at the smallest unvisited node.
    /// Returns *true* if such a node was found; it is discovered by the next call to `next`.
    pub fn try_restart_at_unvisited(&mut self) -> bool {
        if !self.call_stack.is_empty() {
            return false;
        }

        while (self.potentially_unvisited as usize) < self.states.len() {
            let u = self.potentially_unvisited;
            if self.states[u as usize] == NodeState::Unvisited {
                self.push_node(u, None);
                return true;
            }
            self.potentially_unvisited += 1;
        }

        false
    }

    /// Put a pristine stack frame on the call stack, i.e. the first step of a recursive call
    fn push_node(&mut self, node: Node, parent: Option<Node>) {
        debug_assert_eq!(self.states[node as usize], NodeState::Unvisited);
        self.states[node as usize] = NodeState::OnStack;
        self.call_stack.push(StackFrame {
            node,
            parent,
            first_call: true,
            parent_skipped: false,
            neighbors: self.graph.neighbors_of(node),
        });
    }
}

impl<G> Iterator for DepthFirstSearch<'_, G>
where
    G: AdjacencyList,
{
    type Item = DfsEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.call_stack.is_empty() && !(self.restart && self.try_restart_at_unvisited()) {
            return None;
        }

        let frame = self.call_stack.last_mut()?;
        let u = frame.node;

        if frame.first_call {
            frame.first_call = false;
            return Some(DfsEvent::Discover {
                node: u,
                parent: frame.parent,
            });
        }

        let mut next = None;
        while let Some(v) = frame.neighbors.next() {
            if self.skip_parent && !frame.parent_skipped && frame.parent == Some(v) {
                frame.parent_skipped = true;
                continue;
            }
            next = Some(v);
            break;
        }

        let Some(v) = next else {
            self.call_stack.pop();
            self.states[u as usize] = NodeState::Visited;
            return Some(DfsEvent::Finish(u));
        };

        match self.states[v as usize] {
            NodeState::Unvisited => {
                // descend; the new frame emits its `Discover`
                self.push_node(v, Some(u));
                self.next()
            }
            state => Some(DfsEvent::Examine {
                from: u,
                to: v,
                state,
            }),
        }
    }
}

impl<G> FusedIterator for DepthFirstSearch<'_, G> where G: AdjacencyList {}

/// Provides depth-first traversals directly on graphs
pub trait Traversal: AdjacencyList + Sized {
    /// Returns an event iterator of a DFS starting at `start`.
    /// ** Panics if `start >= n` **
    fn dfs(&self, start: Node) -> DepthFirstSearch<'_, Self> {
        DepthFirstSearch::new(self, start)
    }

    /// Returns an event iterator of a DFS covering all nodes, restarting at unvisited nodes
    /// in index order.
    fn dfs_forest(&self) -> DepthFirstSearch<'_, Self> {
        DepthFirstSearch::forest(self)
    }

    /// Returns the nodes reachable from `start` in DFS preorder.
    /// ** Panics if `start >= n` **
    ///
    /// # Examples
    /// ```
    /// use lgraphs::{prelude::*, algo::*};
    ///
    /// let g = AdjList::from_arcs(3, [(2, 0), (0, 1)]);
    /// assert_eq!(g.dfs_order(0).collect::<Vec<_>>(), vec![0, 1]);
    /// ```
    fn dfs_order(&self, start: Node) -> impl Iterator<Item = Node> + '_ {
        self.dfs(start).filter_map(|event| match event {
            DfsEvent::Discover { node, .. } => Some(node),
            _ => None,
        })
    }

    /// Returns *true* if there exists a path from `u` to `v`
    /// ** Panics if `u >= n || v >= n` **
    fn is_reachable(&self, u: Node, v: Node) -> bool {
        assert!(v < self.number_of_nodes());
        self.dfs_order(u).any(|w| w == v)
    }
}

impl<G> Traversal for G where G: AdjacencyList + Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn dfs_order() {
        //  / 2
        // 1         4 - 3
        //  \ 0 - 5 /
        let graph = AdjList::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);

        assert_eq!(graph.dfs_order(1).collect_vec(), vec![1, 2, 0, 5, 4, 3]);
        assert_eq!(graph.dfs_order(3).collect_vec(), vec![3, 4, 5, 0, 1, 2]);

        let matrix = AdjMatrix::from_edges(6, [(1, 2), (1, 0), (4, 3), (0, 5), (5, 4)]);
        assert_eq!(matrix.dfs_order(1).collect_vec(), vec![1, 0, 5, 4, 3, 2]);
    }

    #[test]
    fn events_of_triangle() {
        let graph = AdjList::from_edges(3, [(0, 1), (1, 2), (2, 0)]);
        let events = graph.dfs(0).skip_parent(true).collect_vec();

        use DfsEvent::*;
        assert_eq!(
            events,
            vec![
                Discover {
                    node: 0,
                    parent: None
                },
                Discover {
                    node: 1,
                    parent: Some(0)
                },
                Discover {
                    node: 2,
                    parent: Some(1)
                },
                Examine {
                    from: 2,
                    to: 0,
                    state: NodeState::OnStack
                },
                Finish(2),
                Finish(1),
                Examine {
                    from: 0,
                    to: 2,
                    state: NodeState::Visited
                },
                Finish(0),
            ]
        );
    }

    #[test]
    fn skip_parent_only_once() {
        let mut graph = AdjList::new(2);
        graph.try_add_edge(0, 1, false, 2).unwrap();

        let without = graph.dfs(0).collect_vec();
        let with = graph.dfs(0).skip_parent(true).collect_vec();

        let examined = |events: &[DfsEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, DfsEvent::Examine { .. }))
                .count()
        };

        // 0 -> 1 is a tree edge; 0 -> 1 again, 1 -> 0 twice are non-tree
        assert_eq!(examined(&without), 3);
        assert_eq!(examined(&with), 2);
    }

    #[test]
    fn forest_restarts_in_index_order() {
        let graph = AdjList::from_edges(5, [(3, 1), (4, 2)]);
        let roots = graph
            .dfs_forest()
            .filter_map(|e| match e {
                DfsEvent::Discover { node, parent: None } => Some(node),
                _ => None,
            })
            .collect_vec();
        assert_eq!(roots, vec![0, 1, 2]);

        assert_eq!(AdjList::new(0).dfs_forest().count(), 0);
    }

    #[test]
    fn states_and_active_path() {
        let graph = AdjList::from_arcs(4, [(0, 1), (1, 2), (2, 3)]);
        let mut dfs = graph.dfs(0);

        for _ in 0..4 {
            dfs.next();
        }
        assert_eq!(dfs.active_path().collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(dfs.active_path_from(1), vec![1, 2, 3]);
        assert_eq!(dfs.state_of(2), NodeState::OnStack);

        assert_eq!(dfs.next(), Some(DfsEvent::Finish(3)));
        assert_eq!(dfs.state_of(3), NodeState::Visited);
        assert!(dfs.active_path_from(3).is_empty());

        assert!(!dfs.try_restart_at_unvisited());
        assert_eq!(dfs.by_ref().count(), 3);
        assert!(!dfs.try_restart_at_unvisited());
        assert!(dfs.did_visit_node(0));
    }

    #[test]
    fn reachability() {
        let graph = AdjMatrix::from_arcs(4, [(0, 1), (1, 2), (3, 2)]);
        assert!(graph.is_reachable(0, 2));
        assert!(!graph.is_reachable(2, 0));
        assert!(!graph.is_reachable(0, 3));
    }

    #[test]
    fn deep_path_does_not_overflow() {
        let n = 200_000;
        let graph = AdjList::from_edges(n, (1..n).map(|u| (u - 1, u)));
        assert_eq!(graph.dfs_order(0).count(), n as usize);
        assert_eq!(
            graph.dfs(0).filter(|e| matches!(e, DfsEvent::Finish(_))).count(),
            n as usize
        );
    }
}
