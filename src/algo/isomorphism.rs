/*!
# Graph Isomorphism

Exact isomorphism test by backtracking. Nodes of the first graph are assigned in index order;
a node `v` may be mapped onto an unused target `t` iff for every already assigned node `w` the
adjacency between `v` and `w` (in both directions) equals the adjacency between `t` and the
image of `w`, and `v` has a self-loop iff `t` has one. Only the existence of edges matters,
multiplicities are ignored.

The search keeps its state (partial mapping, used targets and the next candidate per depth)
in explicit vectors, so no recursion is involved and every assignment is undone on backtrack.
*/

use tracing::{debug, instrument, trace};

use super::*;

/// A bijection between the nodes of two graphs preserving adjacency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isomorphism {
    mapping: Vec<Node>,
}

impl Isomorphism {
    /// Returns the identity on `n` nodes
    pub fn identity(n: NumNodes) -> Self {
        Self {
            mapping: (0..n).collect(),
        }
    }

    /// Returns the image of `u`
    /// ** Panics if `u >= n` **
    pub fn map(&self, u: Node) -> Node {
        self.mapping[u as usize]
    }

    /// Returns the mapping as slice where `as_slice()[u]` is the image of `u`
    pub fn as_slice(&self) -> &[Node] {
        &self.mapping
    }

    /// Returns the mapping, consuming the isomorphism
    pub fn into_mapping(self) -> Vec<Node> {
        self.mapping
    }

    /// Returns the number of mapped nodes
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Returns *true* if the mapping covers no node
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Returns the inverse bijection, mapping the second graph onto the first
    pub fn inverse(&self) -> Self {
        let mut mapping = vec![0; self.mapping.len()];
        for (u, &v) in self.mapping.iter().enumerate() {
            mapping[v as usize] = u as Node;
        }
        Self { mapping }
    }

    /// Returns *true* if this is a bijection between the nodes of `a` and `b` with
    /// `a.has_edge(u, v) == b.has_edge(map(u), map(v))` for all nodes `u, v`
    pub fn is_valid_between<A, B>(&self, a: &A, b: &B) -> bool
    where
        A: AdjacencyTest,
        B: AdjacencyTest,
    {
        let n = self.mapping.len();
        if a.len() != n || b.len() != n {
            return false;
        }

        let mut hit = vec![false; n];
        for &v in &self.mapping {
            if v as usize >= n || std::mem::replace(&mut hit[v as usize], true) {
                return false;
            }
        }

        a.vertices().all(|u| {
            a.vertices()
                .all(|v| a.has_edge(u, v) == b.has_edge(self.map(u), self.map(v)))
        })
    }

    /// Translates the mapping into pairs of labels
    pub fn label_pairs<'a, L1, L2>(
        &self,
        a: &'a VertexIndex<L1>,
        b: &'a VertexIndex<L2>,
    ) -> Vec<(&'a L1, &'a L2)>
    where
        L1: Clone + Eq + Hash + Display,
        L2: Clone + Eq + Hash + Display,
    {
        self.mapping
            .iter()
            .enumerate()
            .filter_map(|(u, &v)| Some((a.label_of(u as Node)?, b.label_of(v)?)))
            .collect()
    }
}

/// 0/1 degree information that every isomorphism preserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Signature {
    out_neighbors: NumNodes,
    in_neighbors: NumNodes,
    has_loop: bool,
}

fn signatures<G: AdjacencyTest>(graph: &G) -> Vec<Signature> {
    let mut sigs = vec![
        Signature {
            out_neighbors: 0,
            in_neighbors: 0,
            has_loop: false,
        };
        graph.len()
    ];

    for u in graph.vertices() {
        for v in graph.vertices().filter(|&v| graph.has_edge(u, v)) {
            sigs[u as usize].out_neighbors += 1;
            sigs[v as usize].in_neighbors += 1;
        }
        sigs[u as usize].has_loop = graph.has_edge(u, u);
    }

    sigs
}

/// Configurable isomorphism search.
///
/// # Examples
/// ```
/// use lgraphs::{prelude::*, algo::*};
///
/// let a = AdjList::from_edges(3, [(0, 1), (1, 2)]);
/// let b = AdjMatrix::from_edges(3, [(0, 2), (2, 1)]);
///
/// let ism = IsomorphismSearch::new().find(&a, &b).unwrap().unwrap();
/// assert!(ism.is_valid_between(&a, &b));
/// assert_eq!(ism.map(1), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct IsomorphismSearch {
    degree_filter: bool,
}

impl Default for IsomorphismSearch {
    fn default() -> Self {
        Self {
            degree_filter: true,
        }
    }
}

impl IsomorphismSearch {
    pub fn new() -> Self {
        Self::default()
    }

    /// If set (default), graphs with different degree sequences are rejected upfront and
    /// nodes are only mapped onto nodes with equal in-, out- and loop-degree.
    /// This never changes the result, only the running time.
    pub fn set_degree_filter(&mut self, filter: bool) {
        self.degree_filter = filter;
    }

    /// Builder variant of [`IsomorphismSearch::set_degree_filter`]
    pub fn degree_filter(mut self, filter: bool) -> Self {
        self.set_degree_filter(filter);
        self
    }

    /// Searches for an isomorphism from `a` onto `b`.
    /// Returns `Ok(None)` if the graphs are not isomorphic.
    ///
    /// # Errors
    /// Returns `SizeMismatch` if the graphs have a different number of nodes.
    #[instrument(level = "trace", skip_all)]
    pub fn find<A, B>(&self, a: &A, b: &B) -> Result<Option<Isomorphism>>
    where
        A: AdjacencyTest,
        B: AdjacencyTest,
    {
        if a.number_of_nodes() != b.number_of_nodes() {
            return Err(GraphError::SizeMismatch {
                left: a.number_of_nodes(),
                right: b.number_of_nodes(),
            });
        }

        let filter = self.degree_filter.then(|| (signatures(a), signatures(b)));
        if let Some((sa, sb)) = &filter {
            let mut sa = sa.clone();
            let mut sb = sb.clone();
            sa.sort_unstable();
            sb.sort_unstable();
            if sa != sb {
                debug!("degree sequences differ");
                return Ok(None);
            }
        }

        let mut search = Backtracking::new(a, b, filter);
        let result = search.run();
        debug!(
            steps = search.steps,
            isomorphic = result.is_some(),
            "isomorphism search finished"
        );
        Ok(result)
    }
}

struct Backtracking<'a, A, B> {
    a: &'a A,
    b: &'a B,
    signatures: Option<(Vec<Signature>, Vec<Signature>)>,
    mapping: Vec<Option<Node>>,
    used: Vec<bool>,
    next_candidate: Vec<Node>,
    steps: u64,
}

impl<'a, A, B> Backtracking<'a, A, B>
where
    A: AdjacencyTest,
    B: AdjacencyTest,
{
    fn new(a: &'a A, b: &'a B, signatures: Option<(Vec<Signature>, Vec<Signature>)>) -> Self {
        let n = a.len();
        Self {
            a,
            b,
            signatures,
            mapping: vec![None; n],
            used: vec![false; n],
            next_candidate: vec![0; n],
            steps: 0,
        }
    }

    /// Returns *true* if `v -> t` agrees with all assignments of nodes `< v`
    fn is_consistent(&self, v: Node, t: Node) -> bool {
        if let Some((sa, sb)) = &self.signatures {
            if sa[v as usize] != sb[t as usize] {
                return false;
            }
        }

        if self.a.has_edge(v, v) != self.b.has_edge(t, t) {
            return false;
        }

        (0..v).all(|w| {
            let Some(m) = self.mapping[w as usize] else {
                return false;
            };
            self.a.has_edge(v, w) == self.b.has_edge(t, m)
                && self.a.has_edge(w, v) == self.b.has_edge(m, t)
        })
    }

    fn run(&mut self) -> Option<Isomorphism> {
        let n = self.a.number_of_nodes();
        let mut depth: Node = 0;

        loop {
            if depth == n {
                return Some(Isomorphism {
                    mapping: self.mapping.iter().flatten().copied().collect(),
                });
            }

            self.steps += 1;
            let candidate = (self.next_candidate[depth as usize]..n)
                .find(|&t| !self.used[t as usize] && self.is_consistent(depth, t));

            match candidate {
                Some(t) => {
                    trace!(node = depth, target = t, "assign");
                    self.mapping[depth as usize] = Some(t);
                    self.used[t as usize] = true;
                    self.next_candidate[depth as usize] = t + 1;

                    depth += 1;
                    if depth < n {
                        self.next_candidate[depth as usize] = 0;
                    }
                }
                None => {
                    if depth == 0 {
                        return None;
                    }

                    // undo the assignment of the parent level and try its next candidate
                    depth -= 1;
                    if let Some(t) = self.mapping[depth as usize].take() {
                        self.used[t as usize] = false;
                    }
                }
            }
        }
    }
}

/// Isomorphism queries on graphs
pub trait IsomorphismTest: AdjacencyTest + Sized {
    /// Searches for an isomorphism from `self` onto `other` with the default configuration.
    ///
    /// # Errors
    /// Returns `SizeMismatch` if the graphs have a different number of nodes.
    fn find_isomorphism<G: AdjacencyTest>(&self, other: &G) -> Result<Option<Isomorphism>> {
        IsomorphismSearch::new().find(self, other)
    }

    /// Returns *true* if the graphs are isomorphic.
    ///
    /// # Errors
    /// Returns `SizeMismatch` if the graphs have a different number of nodes.
    fn is_isomorphic_to<G: AdjacencyTest>(&self, other: &G) -> Result<bool> {
        Ok(self.find_isomorphism(other)?.is_some())
    }
}

impl<G> IsomorphismTest for G where G: AdjacencyTest + Sized {}

/// Searches for an isomorphism between two labelled graphs.
/// The returned mapping is expressed in node indices, see [`Isomorphism::label_pairs`].
///
/// # Errors
/// Returns `SizeMismatch` if the graphs have a different number of vertices.
pub fn query_isomorphism<G1, G2, L1, L2>(
    a: &LabelledGraph<G1, L1>,
    b: &LabelledGraph<G2, L2>,
) -> Result<Option<Isomorphism>>
where
    G1: AdjacencyTest,
    G2: AdjacencyTest,
    L1: Clone + Eq + Hash + Display,
    L2: Clone + Eq + Hash + Display,
{
    a.graph().find_isomorphism(b.graph())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::gens::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng, seq::SliceRandom};
    use rand_pcg::Pcg64Mcg;

    fn random_graph<R: Rng>(rng: &mut R, n: NumNodes, m: NumEdges, directed: bool) -> AdjList {
        let mut graph = AdjList::new(n);
        for _ in 0..m {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            graph.try_add_edge(u, v, directed, 1).unwrap();
        }
        graph
    }

    fn permuted<R: Rng>(rng: &mut R, graph: &AdjList) -> (AdjMatrix, Vec<Node>) {
        let mut perm = graph.vertices().collect_vec();
        perm.shuffle(rng);

        let mut result = AdjMatrix::new(graph.number_of_nodes());
        for Edge(u, v) in graph.edges(false) {
            result.add_arc(perm[u as usize], perm[v as usize]);
        }
        (result, perm)
    }

    fn labelled(labels: &[&str], edges: &[(&str, &str)]) -> LabelledGraph<AdjMatrix> {
        build_graph(
            labels.iter().map(|l| l.to_string()),
            edges
                .iter()
                .map(|(a, b)| EdgeSpec::undirected(a.to_string(), b.to_string())),
        )
        .unwrap()
    }

    #[test]
    fn reflexive() {
        let rng = &mut Pcg64Mcg::seed_from_u64(1);
        for n in 0..12 {
            let graph = random_graph(rng, n, 2 * n, n % 2 == 0);
            let ism = graph.find_isomorphism(&graph).unwrap().unwrap();
            assert!(ism.is_valid_between(&graph, &graph));
        }
    }

    #[test]
    fn symmetric() {
        let rng = &mut Pcg64Mcg::seed_from_u64(4);
        for n in 1..12 {
            for directed in [false, true] {
                let a = random_graph(rng, n, 2 * n, directed);
                let (b, perm) = permuted(rng, &a);

                let forward = a.find_isomorphism(&b).unwrap().unwrap();
                assert!(forward.is_valid_between(&a, &b));
                assert!(forward.inverse().is_valid_between(&b, &a));

                let backward = b.find_isomorphism(&a).unwrap().unwrap();
                assert!(backward.is_valid_between(&b, &a));

                assert!(Isomorphism { mapping: perm }.is_valid_between(&a, &b));
            }
        }
    }

    #[test]
    fn filter_does_not_change_answer() {
        let rng = &mut Pcg64Mcg::seed_from_u64(8);
        for n in 1..8 {
            for _ in 0..10 {
                let a = random_graph(rng, n, n + 1, false);
                let b = random_graph(rng, n, n + 1, false);

                let with = IsomorphismSearch::new().find(&a, &b).unwrap();
                let without = IsomorphismSearch::new()
                    .degree_filter(false)
                    .find(&a, &b)
                    .unwrap();
                assert_eq!(with.is_some(), without.is_some());

                if let Some(ism) = without {
                    assert!(ism.is_valid_between(&a, &b));
                }
            }
        }
    }

    #[test]
    fn cycle_vs_path() {
        let cycle = labelled(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
        let relabelled = labelled(&["X", "Y", "Z"], &[("Z", "X"), ("Y", "Z"), ("X", "Y")]);
        let path = labelled(&["P", "Q", "R"], &[("P", "Q"), ("Q", "R")]);

        let ism = query_isomorphism(&cycle, &relabelled).unwrap().unwrap();
        assert!(ism.is_valid_between(cycle.graph(), relabelled.graph()));
        assert_eq!(
            ism.label_pairs(cycle.vertex_index(), relabelled.vertex_index())
                .len(),
            3
        );

        assert_eq!(query_isomorphism(&cycle, &path), Ok(None));
        assert_eq!(query_isomorphism(&path, &cycle), Ok(None));
    }

    #[test]
    fn size_mismatch() {
        let a = AdjList::new(3);
        let b = IncidenceMatrix::new(4);
        assert_eq!(
            a.find_isomorphism(&b),
            Err(GraphError::SizeMismatch { left: 3, right: 4 })
        );
        assert!(a.is_isomorphic_to(&AdjMatrix::new(3)).unwrap());
    }

    #[test]
    fn multiplicities_are_ignored() {
        let mut a = AdjMatrix::new(3);
        a.try_add_edge(0, 1, false, 3).unwrap();
        a.add_edge(1, 2);
        let b = IncidenceMatrix::from_edges(3, [(2, 0), (0, 1)]);

        let ism = a.find_isomorphism(&b).unwrap().unwrap();
        assert_eq!(ism.map(1), 0);
        assert!(ism.is_valid_between(&a, &b));
    }

    #[test]
    fn directed_and_loops() {
        let chain = AdjList::from_arcs(3, [(0, 1), (1, 2)]);
        let reversed = AdjList::from_arcs(3, [(2, 1), (1, 0)]);
        let ism = chain.find_isomorphism(&reversed).unwrap().unwrap();
        assert_eq!(ism.as_slice(), &[2, 1, 0]);

        let out_star = AdjList::from_arcs(3, [(0, 1), (0, 2)]);
        let in_star = AdjList::from_arcs(3, [(1, 0), (2, 0)]);
        for filter in [true, false] {
            let search = IsomorphismSearch::new().degree_filter(filter);
            assert_eq!(search.find(&out_star, &in_star), Ok(None));
        }

        let looped = AdjList::from_edges(2, [(0, 1), (0, 0)]);
        let plain = AdjList::from_edges(2, [(0, 1)]);
        assert!(!looped.is_isomorphic_to(&plain).unwrap());
        assert_eq!(
            looped
                .find_isomorphism(&AdjList::from_edges(2, [(1, 0), (1, 1)]))
                .unwrap()
                .map(|ism| ism.into_mapping()),
            Some(vec![1, 0])
        );
    }

    #[test]
    fn cliques_and_cycles() {
        let mut k4 = AdjList::new(4);
        k4.connect_clique(0..4, false);
        let mut c4 = AdjMatrix::new(4);
        c4.connect_cycle([0, 2, 1, 3]);
        let mut square = IncidenceMatrix::new(4);
        square.connect_cycle(0..4);

        assert!(!k4.is_isomorphic_to(&c4).unwrap());
        assert!(c4.is_isomorphic_to(&square).unwrap());
        assert!(k4.is_isomorphic_to(&k4).unwrap());
    }

    #[test]
    fn identity_and_inverse() {
        let id = Isomorphism::identity(4);
        assert_eq!(id.inverse(), id);

        let ism = Isomorphism {
            mapping: vec![2, 0, 1],
        };
        assert_eq!(ism.inverse().as_slice(), &[1, 2, 0]);
        let not_bijective = Isomorphism {
            mapping: vec![0, 0],
        };
        assert!(!not_bijective.is_valid_between(&AdjList::new(2), &AdjList::new(2)));
    }
}
