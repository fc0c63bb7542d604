use fxroute::core::{Converter, RateEdge, Strategy as RoutingStrategy, UNAVAILABLE, Universe};
use proptest::prelude::*;

fn edge_sets() -> impl Strategy<Value = (u32, Vec<(u32, u32)>, Vec<f64>)> {
    (2u32..12).prop_flat_map(|n| {
        (
            Just(n),
            prop::collection::vec((0..n, 0..n), 0..30),
            prop::collection::vec(0.5f64..4.0, n as usize),
        )
    })
}

fn build(strategy: RoutingStrategy, n: u32, pairs: &[(u32, u32)], prices: &[f64]) -> Converter {
    // Quotes derived from per-currency prices agree around every cycle, so any
    // two shortest routes multiply out to the same rate.
    let edges = pairs
        .iter()
        .map(|&(from, to)| RateEdge::fixed(from, to, prices[from as usize] / prices[to as usize]))
        .collect();
    Converter::with_edges(strategy, Universe::new(n), edges).expect("edges are in range")
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs())
}

proptest! {
    #[test]
    fn dense_and_bfs_agree((n, pairs, prices) in edge_sets()) {
        let dense = build(RoutingStrategy::Dense, n, &pairs, &prices);
        let bfs = build(RoutingStrategy::Bfs, n, &pairs, &prices);

        for from in 0..n {
            for to in 0..n {
                let dense_hops = dense.hops(from, to).unwrap();
                prop_assert_eq!(dense_hops, bfs.hops(from, to).unwrap());

                let dense_value = dense.convert(10.0, from, to).unwrap();
                let bfs_value = bfs.convert(10.0, from, to).unwrap();
                prop_assert!(approx_eq(dense_value, bfs_value), "{} vs {}", dense_value, bfs_value);

                match dense_hops {
                    None => prop_assert_eq!(dense_value, UNAVAILABLE),
                    Some(_) => {
                        let expected = 10.0 * prices[from as usize] / prices[to as usize];
                        prop_assert!(approx_eq(dense_value, expected), "{} vs {}", dense_value, expected);
                    }
                }
            }
        }
    }

    #[test]
    fn routes_only_use_quoted_pairs((n, pairs, prices) in edge_sets()) {
        for strategy in RoutingStrategy::ALL {
            let converter = build(strategy, n, &pairs, &prices);
            for from in 0..n {
                for to in 0..n {
                    if let Some(route) = converter.route(from, to).unwrap() {
                        prop_assert_eq!(route.first(), Some(&from));
                        prop_assert_eq!(route.last(), Some(&to));
                        for step in route.windows(2) {
                            let quoted = pairs.iter().any(|&(a, b)| {
                                (a, b) == (step[0], step[1]) || (b, a) == (step[0], step[1])
                            });
                            prop_assert!(quoted, "{:?} is not a quoted pair", step);
                        }
                    }
                }
            }
        }
    }
}
