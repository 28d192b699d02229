//! Local rewrite moves on trivalent rotation systems.
//! Every move validates its input completely before
//! touching the graph and then commits without failing.
use std::{fmt, str::FromStr};

use crate::{
    debug::{Error, InputError, InvariantViolation},
    graph::{Dart, EdgeId, Graph, Side, VertexIndex},
};

mod expansion;
mod pachner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    One(usize),
    Two(usize),
    Three(VertexIndex),
    Four(usize),
    Pachner22 { label: usize, forbid_multi: bool },
}

/// Moves without their location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    One,
    Two,
    Three,
    Four,
    Flip,
}

impl MoveKind {
    pub const ALL: [MoveKind; 5] = [
        MoveKind::One,
        MoveKind::Two,
        MoveKind::Three,
        MoveKind::Four,
        MoveKind::Flip,
    ];

    /// Every location of `graph` this kind may be tried at.
    /// Flips always forbid multiple edges.
    pub fn locations(self, graph: &Graph) -> Vec<Move> {
        let not_loop = |label: &usize| graph.edge(*label).map_or(false, |edge| !edge.is_loop());
        match self {
            MoveKind::One => (0..graph.num_edges()).map(Move::One).collect(),
            MoveKind::Two => (0..graph.num_edges()).map(Move::Two).collect(),
            MoveKind::Three => (0..graph.num_vert()).map(Move::Three).collect(),
            MoveKind::Four => (0..graph.num_edges())
                .filter(not_loop)
                .map(Move::Four)
                .collect(),
            MoveKind::Flip => (0..graph.num_edges())
                .filter(not_loop)
                .map(|label| Move::Pachner22 {
                    label,
                    forbid_multi: true,
                })
                .collect(),
        }
    }
}

impl FromStr for MoveKind {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "one" => Ok(MoveKind::One),
            "two" => Ok(MoveKind::Two),
            "three" => Ok(MoveKind::Three),
            "four" => Ok(MoveKind::Four),
            "flip" => Ok(MoveKind::Flip),
            _ => Err(InputError::UnknownMove(s.to_owned())),
        }
    }
}

/// `one:3`, `two:0`, `three:1`, `four:2`, `flip:4` or
/// `flip!:4`, the latter forbidding multiple edges.
impl FromStr for Move {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || InputError::UnknownMove(s.to_owned());
        let (name, label) = s.split_once(':').ok_or_else(unknown)?;
        let label: usize = label.trim().parse().map_err(|_| unknown())?;

        match name.trim() {
            "one" => Ok(Move::One(label)),
            "two" => Ok(Move::Two(label)),
            "three" => Ok(Move::Three(label)),
            "four" => Ok(Move::Four(label)),
            "flip" => Ok(Move::Pachner22 {
                label,
                forbid_multi: false,
            }),
            "flip!" => Ok(Move::Pachner22 {
                label,
                forbid_multi: true,
            }),
            _ => Err(unknown()),
        }
    }
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::One(label) => write!(f, "one:{}", label),
            Move::Two(label) => write!(f, "two:{}", label),
            Move::Three(label) => write!(f, "three:{}", label),
            Move::Four(label) => write!(f, "four:{}", label),
            Move::Pachner22 {
                label,
                forbid_multi: false,
            } => write!(f, "flip:{}", label),
            Move::Pachner22 {
                label,
                forbid_multi: true,
            } => write!(f, "flip!:{}", label),
        }
    }
}

impl Graph {
    /// Applies `change` and returns the edges it created or touched.
    pub fn apply(&mut self, change: Move) -> Result<Vec<EdgeId>, Error> {
        match change {
            Move::One(label) => self.one_move(label),
            Move::Two(label) => self.two_move(label),
            Move::Three(label) => self.three_move(label),
            Move::Four(label) => self.four_move(label),
            Move::Pachner22 {
                label,
                forbid_multi,
            } => self.pachner22(label, forbid_multi),
        }
    }

    /// Handle of the edge at position `label` and its darts at start and end.
    fn edge_darts(&self, label: usize) -> Result<(EdgeId, Dart, Dart), Error> {
        let edge = self.edge_id(label)?;
        let data = self.edge_data(edge)?;
        let dart = |side: Side| -> Result<Dart, Error> {
            let vertex = data.endpoint(side);
            let slot = self
                .vertex(vertex)?
                .position(edge, side)
                .ok_or(InvariantViolation::NotIncident { vertex, edge })?;
            Ok(Dart::new(vertex, slot))
        };
        Ok((edge, dart(Side::Start)?, dart(Side::End)?))
    }

    fn require_trivalent(&self, vertex: VertexIndex) -> Result<(), Error> {
        if self.vertex(vertex)?.degree() != 3 {
            return Err(InvariantViolation::NotTrivalent(vertex).into());
        }
        Ok(())
    }

    /// Rejects self-loops for moves that need two distinct endpoints.
    fn proper_edge_darts(&self, label: usize) -> Result<(EdgeId, Dart, Dart), Error> {
        let (edge, start, end) = self.edge_darts(label)?;
        if start.vertex == end.vertex {
            return Err(InputError::SelfLoop(label).into());
        }
        self.require_trivalent(start.vertex)?;
        self.require_trivalent(end.vertex)?;
        Ok((edge, start, end))
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) fn k4() -> Result<Graph, Error> {
        Graph::from_edges(4, [[0, 1], [1, 2], [0, 3], [0, 2], [1, 3], [2, 3]])
    }

    /// Rotation at `vertex` as the labels of the neighbours.
    pub(crate) fn neighbours(graph: &Graph, vertex: VertexIndex) -> Vec<VertexIndex> {
        (0..graph.vertices()[vertex].degree())
            .filter_map(|slot| graph.opposite(Dart::new(vertex, slot)))
            .map(|far| far.vertex)
            .collect()
    }

    #[test]
    fn test_parse_moves() {
        assert_eq!(Ok(Move::One(3)), "one:3".parse());
        assert_eq!(Ok(Move::Three(1)), "three:1".parse());
        assert_eq!(
            Ok(Move::Pachner22 {
                label: 4,
                forbid_multi: true
            }),
            "flip!:4".parse()
        );
        assert_eq!(
            Ok(Move::Pachner22 {
                label: 0,
                forbid_multi: false
            }),
            " flip : 0".parse()
        );
        assert_eq!(
            Err(InputError::UnknownMove("five:1".to_owned())),
            "five:1".parse::<Move>()
        );
        assert!("one".parse::<Move>().is_err());
        assert!("one:-1".parse::<Move>().is_err());
        assert_eq!(Ok(MoveKind::Flip), "flip".parse());
    }

    #[test]
    fn test_display_round_trip() {
        for change in [
            Move::Two(7),
            Move::Four(0),
            Move::Pachner22 {
                label: 2,
                forbid_multi: true,
            },
        ] {
            assert_eq!(Ok(change), change.to_string().parse());
        }
    }

    #[test]
    fn test_apply() -> Result<(), Error> {
        let mut graph = k4()?;
        let created = graph.apply(Move::Two(0))?;
        assert_eq!(3, created.len());
        assert_eq!(6, graph.num_vert());
        assert!(graph.is_complete());

        let before = graph.clone();
        assert!(matches!(
            graph.apply(Move::Three(6)),
            Err(Error::Input(InputError::VertexLabel { label: 6, .. }))
        ));
        assert!(matches!(
            graph.apply(Move::One(9)),
            Err(Error::Input(InputError::EdgeLabel { label: 9, .. }))
        ));
        assert_eq!(before.edge_list(), graph.edge_list());
        assert_eq!(6, graph.num_vert());
        Ok(())
    }

    #[test]
    fn test_locations() -> Result<(), Error> {
        let graph = Graph::from_edges(2, [[0, 0], [0, 1], [1, 1]])?;
        assert_eq!(3, MoveKind::One.locations(&graph).len());
        assert_eq!(2, MoveKind::Three.locations(&graph).len());
        assert_eq!(vec![Move::Four(1)], MoveKind::Four.locations(&graph));
        assert_eq!(
            vec![Move::Pachner22 {
                label: 1,
                forbid_multi: true
            }],
            MoveKind::Flip.locations(&graph)
        );
        Ok(())
    }

    #[test]
    fn test_detached_edge() -> Result<(), Error> {
        let mut graph = k4()?;
        graph.create_edge(crate::graph::EdgeSpec::new(0, 1))?;
        assert!(matches!(
            graph.one_move(6),
            Err(Error::Invariant(InvariantViolation::NotIncident { vertex: 0, .. }))
        ));
        assert_eq!(4, graph.num_vert());
        Ok(())
    }
}
