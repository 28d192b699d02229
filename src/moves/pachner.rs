//! The 2-2 Pachner move, which only changes incidences.
use itertools::Itertools;

use crate::{
    debug::{Error, InvariantViolation},
    graph::{EdgeId, Graph, Slot, VertexIndex},
};

impl Graph {
    fn far_vertex(&self, slot: Slot) -> Result<VertexIndex, Error> {
        Ok(self.edge_data(slot.edge)?.endpoint(slot.side.other()))
    }

    /// Flips the edge `e = x - y` at `label`. With `x: (e, a, b)` and
    /// `y: (e, c, d)` the edge to `a` moves to `y` and the edge to `c`
    /// moves to `x`, giving `x: (e, b, c)` and `y: (e, d, a)`. The flipped
    /// edge loses its colour and orientation.
    ///
    /// With `forbid_multi` the flip is refused if it would create a multiple
    /// edge or a loop, or if both sides of `e` belong to the same face.
    pub fn pachner22(&mut self, label: usize, forbid_multi: bool) -> Result<Vec<EdgeId>, Error> {
        let (edge, start, end) = self.proper_edge_darts(label)?;
        let (x, y) = (start.vertex, end.vertex);
        let (first_x, second_x) = ((start.slot + 1) % 3, (start.slot + 2) % 3);
        let (first_y, second_y) = ((end.slot + 1) % 3, (end.slot + 2) % 3);

        let slots = self.vertex(x)?.slots();
        let (a, b) = (slots[first_x], slots[second_x]);
        let slots = self.vertex(y)?.slots();
        let (c, d) = (slots[first_y], slots[second_y]);

        if forbid_multi {
            let neighbours = [
                self.far_vertex(a)?,
                self.far_vertex(b)?,
                self.far_vertex(c)?,
                self.far_vertex(d)?,
            ];
            if !neighbours.iter().all_unique()
                || neighbours.iter().any(|&vertex| vertex == x || vertex == y)
            {
                return Err(InvariantViolation::MultiEdge(edge).into());
            }
            if self.trace_face(start).contains(end) {
                return Err(InvariantViolation::FaceCollision(edge).into());
            }
        }

        let earliest = [edge, a.edge, b.edge, c.edge, d.edge]
            .iter()
            .filter_map(|&touched| self.position_of(touched))
            .min()
            .unwrap_or(label);

        self.place(x, first_x, b.edge, b.side);
        self.place(x, second_x, c.edge, c.side);
        self.place(y, first_y, d.edge, d.side);
        self.place(y, second_y, a.edge, a.side);
        self.clear_attributes(edge);
        self.move_edge(edge, earliest);
        self.invalidate();

        log::debug!("flipped edge {} between {} and {}", label, x, y);
        Ok(vec![edge])
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        debug::InputError,
        graph::Orientation,
        moves::test::{k4, neighbours},
    };

    fn planar_prism() -> Result<Graph, Error> {
        Graph::from_edges(
            6,
            [
                [0, 1],
                [0, 2],
                [0, 3],
                [1, 4],
                [1, 2],
                [3, 5],
                [2, 5],
                [3, 4],
                [4, 5],
            ],
        )
    }

    #[test]
    fn test_flip() -> Result<(), Error> {
        let mut graph = planar_prism()?;
        assert_eq!(5, graph.find_faces().len());
        graph.set_orientation(EdgeId(2), Some(Orientation::Forward))?;

        let flipped = graph.pachner22(2, true)?;
        assert_eq!(vec![EdgeId(2)], flipped);
        assert_eq!(6, graph.num_vert());
        assert!(graph.is_complete());
        assert_eq!(vec![2, 5, 3], neighbours(&graph, 0));
        assert_eq!(vec![0, 4, 1], neighbours(&graph, 3));
        assert_eq!(vec![3, 4, 2], neighbours(&graph, 1));
        assert_eq!(vec![0, 2, 4], neighbours(&graph, 5));
        assert_eq!(None, graph.edge_data(EdgeId(2))?.orientation);
        assert_eq!(vec![0, 0, 0], graph.vertex(3)?.in_arrow());
        // The flipped edge moves in front of the touched ones.
        assert_eq!(EdgeId(2), graph.edge_id(0)?);
        assert_eq!(EdgeId(0), graph.edge_id(1)?);
        assert_eq!(5, graph.find_faces().len());
        Ok(())
    }

    #[test]
    fn test_flip_multi_edge() -> Result<(), Error> {
        let mut graph = k4()?;
        let before = graph.clone();
        assert!(matches!(
            graph.pachner22(0, true),
            Err(Error::Invariant(InvariantViolation::MultiEdge(EdgeId(0))))
        ));
        for vertex in 0..4 {
            assert_eq!(
                before.vertex(vertex)?.edge_order(),
                graph.vertex(vertex)?.edge_order()
            );
        }

        // Allowed without the check, giving two double edges.
        graph.pachner22(0, false)?;
        assert_eq!(vec![1, 2, 2], neighbours(&graph, 0));
        assert_eq!(vec![0, 3, 3], neighbours(&graph, 1));
        assert_eq!(vec![0, 0, 3], neighbours(&graph, 2));
        assert_eq!(vec![1, 1, 2], neighbours(&graph, 3));
        assert_eq!(before.edge_list(), graph.edge_list());
        Ok(())
    }

    #[test]
    fn test_flip_face_collision() -> Result<(), Error> {
        let mut graph = Graph::from_edges(
            6,
            [
                [0, 1],
                [1, 2],
                [2, 0],
                [3, 4],
                [4, 5],
                [5, 3],
                [0, 3],
                [1, 4],
                [2, 5],
            ],
        )?;
        let before = graph.vertex(0)?.edge_order();
        assert!(matches!(
            graph.pachner22(6, true),
            Err(Error::Invariant(InvariantViolation::FaceCollision(EdgeId(6))))
        ));
        assert_eq!(before, graph.vertex(0)?.edge_order());
        Ok(())
    }

    #[test]
    fn test_flip_rejections() -> Result<(), Error> {
        let mut graph = Graph::from_edges(2, [[0, 0], [0, 1], [1, 1]])?;
        assert!(matches!(
            graph.pachner22(2, false),
            Err(Error::Input(InputError::SelfLoop(2)))
        ));

        let mut graph = Graph::from_edges(4, [[0, 1], [0, 2], [0, 3]])?;
        assert!(matches!(
            graph.pachner22(0, false),
            Err(Error::Invariant(InvariantViolation::NotTrivalent(1)))
        ));
        Ok(())
    }
}
