//! Representation of trivalent graphs as rotation systems:
//! every vertex keeps its incident edges in counterclockwise
//! order and the edges themselves live in an arena of the graph.
use custom_debug_derive::Debug;

use crate::{colour::Colour, debug::InputError};

mod rotation;
pub use rotation::Graph;

pub type VertexIndex = usize;
pub type Twist = i64;

/// Stable handle of an edge in the arena of its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Directed from start to end.
    Forward,
    /// Directed from end to start.
    Backward,
}

impl Orientation {
    pub fn sign(self) -> i8 {
        match self {
            Orientation::Forward => 1,
            Orientation::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Backward,
            Orientation::Backward => Orientation::Forward,
        }
    }
}

impl TryFrom<i64> for Orientation {
    type Error = InputError;

    fn try_from(sign: i64) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(Orientation::Forward),
            -1 => Ok(Orientation::Backward),
            _ => Err(InputError::Orientation(sign)),
        }
    }
}

/// The two sides of an edge. A rotation slot always
/// holds one side, so the two slots of a self-loop differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Start,
    End,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }
}

/// One slot of a rotation, i.e. one side of an edge at a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dart {
    pub vertex: VertexIndex,
    pub slot: usize,
}

impl Dart {
    pub fn new(vertex: VertexIndex, slot: usize) -> Self {
        Dart { vertex, slot }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub start: VertexIndex,
    pub end: VertexIndex,
    #[debug(with = "crate::debug::opt_fmt")]
    pub orientation: Option<Orientation>,
    #[debug(with = "crate::debug::opt_fmt")]
    pub colour: Option<Colour>,
    #[debug(with = "crate::debug::opt_fmt")]
    pub twist: Option<Twist>,
}

impl Edge {
    pub fn new(start: VertexIndex, end: VertexIndex) -> Self {
        Edge {
            start,
            end,
            orientation: None,
            colour: None,
            twist: None,
        }
    }

    pub fn endpoint(&self, side: Side) -> VertexIndex {
        match side {
            Side::Start => self.start,
            Side::End => self.end,
        }
    }

    fn set_endpoint(&mut self, side: Side, vertex: VertexIndex) {
        match side {
            Side::Start => self.start = vertex,
            Side::End => self.end = vertex,
        }
    }

    pub fn is_loop(&self) -> bool {
        self.start == self.end
    }

    /// `+1` if the edge points into the vertex holding `side`,
    /// `-1` if it points out of it and `0` if unoriented.
    pub fn arrow_at(&self, side: Side) -> i8 {
        match (self.orientation, side) {
            (None, _) => 0,
            (Some(orientation), Side::Start) => -orientation.sign(),
            (Some(orientation), Side::End) => orientation.sign(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub edge: EdgeId,
    pub side: Side,
    arrow: i8,
    colour: Colour,
}

impl Slot {
    fn of(edge: EdgeId, side: Side, data: &Edge) -> Self {
        Slot {
            edge,
            side,
            arrow: data.arrow_at(side),
            colour: data.colour.unwrap_or(0),
        }
    }

    pub fn arrow(&self) -> i8 {
        self.arrow
    }

    /// `0` if uncoloured.
    pub fn colour(&self) -> Colour {
        self.colour
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vertex {
    pub label: VertexIndex,
    #[debug(with = "crate::debug::slots_fmt")]
    slots: Vec<Slot>,
}

impl Vertex {
    pub fn new(label: VertexIndex) -> Self {
        Vertex {
            label,
            slots: Vec::with_capacity(3),
        }
    }

    pub fn degree(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Incident edges in counterclockwise order.
    pub fn edge_order(&self) -> Vec<EdgeId> {
        self.slots.iter().map(|slot| slot.edge).collect()
    }

    pub fn in_arrow(&self) -> Vec<i8> {
        self.slots.iter().map(|slot| slot.arrow).collect()
    }

    pub fn colour_list(&self) -> Vec<Colour> {
        self.slots.iter().map(|slot| slot.colour).collect()
    }

    pub fn position(&self, edge: EdgeId, side: Side) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.edge == edge && slot.side == side)
    }

    pub fn contains(&self, edge: EdgeId) -> bool {
        self.slots.iter().any(|slot| slot.edge == edge)
    }
}

/// Description of an edge to add, with independent optional attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub start: VertexIndex,
    pub end: VertexIndex,
    #[debug(with = "crate::debug::opt_fmt")]
    pub orientation: Option<Orientation>,
    #[debug(with = "crate::debug::opt_fmt")]
    pub colour: Option<Colour>,
    #[debug(with = "crate::debug::opt_fmt")]
    pub twist: Option<Twist>,
}

impl EdgeSpec {
    pub fn new(start: VertexIndex, end: VertexIndex) -> Self {
        EdgeSpec {
            start,
            end,
            orientation: None,
            colour: None,
            twist: None,
        }
    }

    pub fn oriented(mut self, orientation: Orientation) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub fn coloured(mut self, colour: Colour) -> Self {
        self.colour = Some(colour);
        self
    }

    pub fn twisted(mut self, twist: Twist) -> Self {
        self.twist = Some(twist);
        self
    }

    fn to_edge(self) -> Edge {
        Edge {
            start: self.start,
            end: self.end,
            orientation: self.orientation,
            colour: self.colour,
            twist: self.twist,
        }
    }
}

impl From<[VertexIndex; 2]> for EdgeSpec {
    fn from([start, end]: [VertexIndex; 2]) -> Self {
        EdgeSpec::new(start, end)
    }
}

impl From<(VertexIndex, VertexIndex)> for EdgeSpec {
    fn from((start, end): (VertexIndex, VertexIndex)) -> Self {
        EdgeSpec::new(start, end)
    }
}

/// Positional form `[start, end, orientation, colour, twist]`,
/// the last three being optional.
impl TryFrom<&[i64]> for EdgeSpec {
    type Error = InputError;

    fn try_from(fields: &[i64]) -> Result<Self, Self::Error> {
        if !(2..=5).contains(&fields.len()) {
            return Err(InputError::EdgeArity(fields.len()));
        }

        let label = |value: i64| {
            usize::try_from(value).map_err(|_| InputError::NegativeLabel(value))
        };
        let mut spec = EdgeSpec::new(label(fields[0])?, label(fields[1])?);

        if let Some(&sign) = fields.get(2) {
            spec.orientation = Some(Orientation::try_from(sign)?);
        }
        if let Some(&colour) = fields.get(3) {
            if colour < 1 || colour > Colour::MAX as i64 {
                return Err(InputError::Colour(colour));
            }
            spec.colour = Some(colour as Colour);
        }
        if let Some(&twist) = fields.get(4) {
            spec.twist = Some(twist);
        }

        Ok(spec)
    }
}
