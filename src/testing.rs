/// Conformance tests every representation has to pass.
///
/// The graph under test is compared against a plain multiplicity table that is filled with the
/// same random multi-edges. Undirected stores receive at most one declaration per unordered pair
/// (with random multiplicity) so that the incidence matrix can take part as well.
macro_rules! test_graph_ops {
    ($env:ident, $graph:ident, ($($trait:ident),*)) => {
        test_graph_ops!(@env $env, $graph, false, ($($trait),*));
    };
    ($env:ident, $graph:ident, directed, ($($trait:ident),*)) => {
        test_graph_ops!(@env $env, $graph, true, ($($trait),*));
    };
    (@env $env:ident, $graph:ident, $directed:literal, ($($trait:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{ops::*, repr::*, testing::test_graph_ops, *};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;

            /// Creates a graph with random multi-edges together with its multiplicity table
            fn random_graph<R: Rng>(
                rng: &mut R,
                n: NumNodes,
                m_ub: NumEdges,
            ) -> ($graph, Vec<Vec<Multiplicity>>) {
                let mut table = vec![vec![0 as Multiplicity; n as usize]; n as usize];
                let mut graph = <$graph>::new(n);

                for _ in 0..m_ub {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    let mult = rng.random_range(1..4);

                    if $directed {
                        table[u as usize][v as usize] += mult;
                    } else {
                        if table[u as usize][v as usize] > 0 {
                            continue;
                        }
                        table[u as usize][v as usize] += mult;
                        if u != v {
                            table[v as usize][u as usize] += mult;
                        }
                    }

                    graph.try_add_edge(u, v, $directed, mult).unwrap();
                }

                (graph, table)
            }

            $(
                test_graph_ops!(@test $graph<$directed>: $trait);
            )*
        }
    };
    (@test $graph:ident<$directed:literal>: GraphNew) => {
        #[test]
        fn graph_new() {
            for n in 0..50 {
                let graph = <$graph>::new(n);

                assert_eq!(graph.number_of_edges(), 0);
                assert_eq!(graph.number_of_nodes(), n);
                assert_eq!(graph.is_empty(), n == 0);
                assert!(!graph.has_directed_edges());

                assert_eq!(graph.vertices().collect_vec(), (0..n).collect_vec());
                assert_eq!(graph.vertices_with_neighbors().count(), 0);
            }
        }
    };
    (@test $graph:ident<$directed:literal>: AdjacencyList) => {
        #[test]
        fn test_adjacency_list() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [10 as NumNodes, 20, 50] {
                for m_ub in [n * 2, n * 5] {
                    for _ in 0..5 {
                        let (graph, table) = random_graph(rng, n, m_ub);

                        assert_eq!(graph.number_of_nodes(), n);

                        for u in 0..n {
                            let expected = table[u as usize]
                                .iter()
                                .enumerate()
                                .flat_map(|(v, &m)| std::iter::repeat_n(v as Node, m as usize))
                                .collect_vec();

                            let neighbors = graph.neighbors_of(u).sorted().collect_vec();
                            assert_eq!(neighbors, expected);
                            assert_eq!(graph.degree_of(u) as usize, expected.len());
                            assert_eq!(graph.edges_of(u, false).count(), expected.len());
                        }

                        assert_eq!(
                            graph.degrees().sum::<NumNodes>() as usize,
                            table.iter().flatten().sum::<Multiplicity>() as usize
                        );
                    }
                }
            }
        }
    };
    (@test $graph:ident<$directed:literal>: AdjacencyTest) => {
        #[test]
        fn test_adjacency_test() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [5 as NumNodes, 15, 40] {
                let (graph, table) = random_graph(rng, n, n * 3);

                let mut m: NumEdges = 0;
                for u in 0..n {
                    for v in 0..n {
                        let mult = table[u as usize][v as usize];
                        assert_eq!(graph.multiplicity_of(u, v), mult);
                        assert_eq!(graph.has_edge(u, v), mult > 0);

                        if $directed || u <= v {
                            m += mult;
                        }
                    }
                }

                assert_eq!(graph.number_of_edges(), m);
                assert_eq!(graph.has_directed_edges(), $directed && m > 0);
            }
        }
    };
    (@test $graph:ident<$directed:literal>: GraphNodeEditing) => {
        #[test]
        fn test_node_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(7);
            let (mut graph, table) = random_graph(rng, 10, 30);

            for expected in 10..15 {
                assert_eq!(graph.add_node(), expected);
            }
            assert_eq!(graph.number_of_nodes(), 15);

            for u in 0..10 {
                for v in 0..10 {
                    assert_eq!(graph.multiplicity_of(u, v), table[u as usize][v as usize]);
                }
                assert_eq!(graph.multiplicity_of(u, 12), 0);
            }

            graph.add_edge(14, 3);
            assert!(graph.has_edge(3, 14));
            assert_eq!(graph.degree_of(14), 1);
        }
    };
}

pub(crate) use test_graph_ops;

/// Installs a `tracing` subscriber that forwards all events to the test output.
/// Safe to call from several tests; only the first call has an effect.
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
