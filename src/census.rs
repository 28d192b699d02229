//! Enumeration of the graphs reachable from a seed by rewrite moves,
//! up to isomorphism.
use rayon::prelude::*;
use std::collections::HashSet;

use crate::{
    graph::Graph,
    moves::{Move, MoveKind},
};

/// Every graph obtained from `graph` by one move of the given kinds.
/// Locations where the move is refused are skipped.
pub fn successors(graph: &Graph, kinds: &[MoveKind]) -> Vec<Graph> {
    let locations: Vec<Move> = kinds
        .iter()
        .flat_map(|kind| kind.locations(graph))
        .collect();

    locations
        .into_par_iter()
        .filter_map(|change| {
            let mut next = graph.clone();
            match next.apply(change) {
                Ok(_) => Some(next),
                Err(err) => {
                    log::trace!("skipping {}: {}", change, err);
                    None
                }
            }
        })
        .collect()
}

/// Keeps the first graph of every isomorphism class, in input order.
pub fn deduplicate(graphs: Vec<Graph>) -> Vec<Graph> {
    graphs.par_iter().for_each(|graph| {
        graph.canonical_form();
    });

    let mut seen = HashSet::new();
    graphs
        .into_iter()
        .filter(|graph| seen.insert(graph.canonical_form().code.clone()))
        .collect()
}

/// Breadth-first closure of `successors` over all graphs with at most
/// `max_vertices` vertices. The seed comes first, followed by each
/// generation of new graphs.
pub fn grow(seed: &Graph, kinds: &[MoveKind], max_vertices: usize) -> Vec<Graph> {
    let mut seen: HashSet<Vec<usize>> = HashSet::new();
    seen.insert(seed.canonical_form().code.clone());
    let mut census = vec![seed.clone()];
    let mut frontier = vec![seed.clone()];
    let mut generation = 0;

    while !frontier.is_empty() {
        let candidates: Vec<Graph> = frontier
            .par_iter()
            .flat_map(|graph| successors(graph, kinds))
            .filter(|graph| graph.num_vert() <= max_vertices)
            .collect();

        frontier = deduplicate(candidates)
            .into_iter()
            .filter(|graph| seen.insert(graph.canonical_form().code.clone()))
            .collect();
        generation += 1;
        log::info!(
            "generation {}: {} new graphs, {} in total",
            generation,
            frontier.len(),
            census.len() + frontier.len()
        );
        census.extend(frontier.iter().cloned());
    }

    census
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{moves::test::k4, Error};

    #[test]
    fn test_successors() -> Result<(), Error> {
        let graph = k4()?;
        let grown = successors(&graph, &[MoveKind::One]);
        assert_eq!(6, grown.len());
        assert!(grown.iter().all(|next| next.num_vert() == 6));

        // Every flip of the tetrahedron creates a double edge.
        assert!(successors(&graph, &[MoveKind::Flip]).is_empty());
        Ok(())
    }

    #[test]
    fn test_deduplicate() -> Result<(), Error> {
        let graph = k4()?;
        // The tetrahedron looks the same from every dart.
        assert_eq!(1, deduplicate(successors(&graph, &[MoveKind::One])).len());

        let moved = graph.relabel(&[2, 0, 3, 1], &[3, 5, 0, 1, 4, 2])?;
        let doubled = Graph::from_edges(4, [[0, 1], [0, 1], [0, 2], [1, 3], [2, 3], [2, 3]])?;
        let unique = deduplicate(vec![graph.clone(), doubled, moved]);
        assert_eq!(2, unique.len());
        assert_eq!(graph.edge_list(), unique[0].edge_list());
        assert_eq!(graph.vertex(0)?.edge_order(), unique[0].vertex(0)?.edge_order());
        Ok(())
    }

    #[test]
    fn test_grow() -> Result<(), Error> {
        let graph = k4()?;
        assert_eq!(1, grow(&graph, &[MoveKind::Flip], 4).len());
        assert_eq!(1, grow(&graph, &[MoveKind::One], 2).len());

        let census = grow(&graph, &[MoveKind::One], 6);
        assert_eq!(2, census.len());
        assert_eq!(4, census[0].num_vert());
        assert_eq!(6, census[1].num_vert());
        Ok(())
    }
}
