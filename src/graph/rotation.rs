use custom_debug_derive::Debug;
use std::sync::{Arc, OnceLock};

use super::{Dart, Edge, EdgeId, EdgeSpec, Orientation, Side, Slot, Twist, Vertex, VertexIndex};
use crate::{
    canonical::CanonicalForm,
    colour::{Colour, ColourTable},
    debug::{Error, InputError, InvariantViolation},
};

/// Trivalent multigraph with a fixed counterclockwise
/// order of the incident edges at every vertex.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    arena: Vec<Edge>,
    /// Edge sequence in insertion order, addressed positionally.
    edges: Vec<EdgeId>,
    #[debug(skip)]
    colour_table: Option<Arc<ColourTable>>,
    #[debug(skip)]
    canonical_cache: OnceLock<CanonicalForm>,
}

impl Graph {
    pub fn new(num_vert: usize) -> Result<Self, InputError> {
        if num_vert == 0 || num_vert % 2 != 0 {
            return Err(InputError::VertexCount(num_vert));
        }

        let num_edges = (num_vert / 2).saturating_mul(3);
        let mut vertices = reserved(num_vert, num_vert)?;
        vertices.extend((0..num_vert).map(Vertex::new));

        Ok(Graph {
            vertices,
            arena: reserved(num_edges, num_vert)?,
            edges: reserved(num_edges, num_vert)?,
            colour_table: None,
            canonical_cache: OnceLock::new(),
        })
    }

    /// Same as `new`, but every completed coloured vertex
    /// has to carry an admissible triple of `table`.
    pub fn with_colour_table(num_vert: usize, table: Arc<ColourTable>) -> Result<Self, InputError> {
        let mut graph = Self::new(num_vert)?;
        graph.colour_table = Some(table);
        Ok(graph)
    }

    pub fn from_edges<I, E>(num_vert: usize, edges: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = E>,
        E: TryInto<EdgeSpec>,
        E::Error: Into<InputError>,
    {
        let mut graph = Self::new(num_vert)?;
        graph.add_edges(edges)?;
        Ok(graph)
    }

    pub fn num_vert(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_complete(&self) -> bool {
        self.vertices.iter().all(|vertex| vertex.degree() == 3)
    }

    pub fn colour_table(&self) -> Option<&Arc<ColourTable>> {
        self.colour_table.as_ref()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn vertex(&self, label: VertexIndex) -> Result<&Vertex, InputError> {
        self.vertices.get(label).ok_or(InputError::VertexLabel {
            label,
            num_vert: self.num_vert(),
        })
    }

    /// Handle of the edge at position `label` of the edge sequence.
    pub fn edge_id(&self, label: usize) -> Result<EdgeId, InputError> {
        self.edges
            .get(label)
            .copied()
            .ok_or(InputError::EdgeLabel {
                label,
                num_edges: self.num_edges(),
            })
    }

    pub fn edge(&self, label: usize) -> Result<&Edge, InputError> {
        self.edge_data(self.edge_id(label)?)
    }

    pub fn edge_data(&self, edge: EdgeId) -> Result<&Edge, InputError> {
        self.arena.get(edge.0).ok_or(InputError::EdgeHandle(edge))
    }

    pub fn edge_list(&self) -> Vec<EdgeId> {
        self.edges.clone()
    }

    pub fn position_of(&self, edge: EdgeId) -> Option<usize> {
        self.edges.iter().position(|&other| other == edge)
    }

    pub fn degree_sequence(&self) -> Vec<usize> {
        let mut degrees: Vec<_> = self.vertices.iter().map(Vertex::degree).collect();
        degrees.sort_unstable();
        degrees
    }

    pub fn slot(&self, dart: Dart) -> Option<&Slot> {
        self.vertices.get(dart.vertex)?.slots.get(dart.slot)
    }

    /// The dart holding the other side of the edge at `dart`,
    /// `None` if that side is not connected.
    pub fn opposite(&self, dart: Dart) -> Option<Dart> {
        let slot = self.slot(dart)?;
        let side = slot.side.other();
        let far = self.arena[slot.edge.0].endpoint(side);
        let position = self.vertices.get(far)?.position(slot.edge, side)?;
        Some(Dart::new(far, position))
    }

    pub fn next_ccw(&self, dart: Dart) -> Option<Dart> {
        let degree = self.vertices.get(dart.vertex)?.degree();
        if dart.slot >= degree {
            return None;
        }
        Some(Dart::new(dart.vertex, (dart.slot + 1) % degree))
    }

    pub fn prev_ccw(&self, dart: Dart) -> Option<Dart> {
        let degree = self.vertices.get(dart.vertex)?.degree();
        if dart.slot >= degree {
            return None;
        }
        Some(Dart::new(dart.vertex, (dart.slot + degree - 1) % degree))
    }

    pub fn add_vertices(&mut self, number: usize) -> Result<(), InputError> {
        if number == 0 {
            return Err(InputError::AddedVertices);
        }

        for _ in 0..number {
            self.new_vertex();
        }
        self.invalidate();
        Ok(())
    }

    /// Adds all edges or none. Each edge is connected at its start
    /// and then at its end, which fixes the rotation order.
    pub fn add_edges<I, E>(&mut self, edges: I) -> Result<Vec<EdgeId>, Error>
    where
        I: IntoIterator<Item = E>,
        E: TryInto<EdgeSpec>,
        E::Error: Into<InputError>,
    {
        let mut staged = self.clone();
        let mut added = Vec::new();

        for entry in edges {
            let spec: EdgeSpec = entry
                .try_into()
                .map_err(|err: E::Error| Error::Input(err.into()))?;
            let edge = staged.create_edge(spec)?;
            staged.connect_edge(spec.start, edge)?;
            staged.connect_edge(spec.end, edge)?;
            added.push(edge);
        }

        staged.invalidate();
        *self = staged;
        Ok(added)
    }

    /// Allocates an edge that is not yet connected at any vertex.
    pub fn create_edge(&mut self, spec: EdgeSpec) -> Result<EdgeId, InputError> {
        self.check_label(spec.start)?;
        self.check_label(spec.end)?;
        if spec.colour == Some(0) {
            return Err(InputError::Colour(0));
        }

        let edge = EdgeId(self.arena.len());
        self.arena.push(spec.to_edge());
        self.edges.push(edge);
        self.invalidate();
        Ok(edge)
    }

    pub fn connect_edge(&mut self, vertex: VertexIndex, edge: EdgeId) -> Result<(), Error> {
        self.check_label(vertex)?;
        let data = self.edge_data(edge)?;
        let side = self.free_side(vertex, edge, None)?;
        if self.vertices[vertex].degree() >= 3 {
            return Err(InvariantViolation::Trivalent(vertex).into());
        }

        let mut slots = self.vertices[vertex].slots.clone();
        slots.push(Slot::of(edge, side, data));
        self.check_slots(vertex, &slots)?;

        self.vertices[vertex].slots = slots;
        self.invalidate();
        Ok(())
    }

    /// Puts `new` into the slot of `old`, keeping its position.
    pub fn replace_edge(
        &mut self,
        vertex: VertexIndex,
        old: EdgeId,
        new: EdgeId,
    ) -> Result<(), Error> {
        self.check_label(vertex)?;
        let data = self.edge_data(new)?;
        let position = self.vertices[vertex]
            .slots
            .iter()
            .position(|slot| slot.edge == old)
            .ok_or(InvariantViolation::NotIncident { vertex, edge: old })?;
        let side = self.free_side(vertex, new, Some(position))?;

        let mut slots = self.vertices[vertex].slots.clone();
        slots[position] = Slot::of(new, side, data);
        self.check_slots(vertex, &slots)?;

        self.vertices[vertex].slots = slots;
        self.invalidate();
        Ok(())
    }

    /// Drops the first slot holding `old`. The edge itself stays in the arena.
    pub fn remove_edge(&mut self, vertex: VertexIndex, old: EdgeId) -> Result<(), Error> {
        self.check_label(vertex)?;
        let slots = &mut self.vertices[vertex].slots;
        if slots.is_empty() {
            return Err(InvariantViolation::Disconnected(vertex).into());
        }
        let position = slots
            .iter()
            .position(|slot| slot.edge == old)
            .ok_or(InvariantViolation::NotIncident { vertex, edge: old })?;

        slots.remove(position);
        self.invalidate();
        Ok(())
    }

    pub fn set_orientation(
        &mut self,
        edge: EdgeId,
        orientation: Option<Orientation>,
    ) -> Result<(), Error> {
        self.update_edge(edge, |data| data.orientation = orientation)
    }

    pub fn set_colour(&mut self, edge: EdgeId, colour: Option<Colour>) -> Result<(), Error> {
        if colour == Some(0) {
            return Err(InputError::Colour(0).into());
        }
        self.update_edge(edge, |data| data.colour = colour)
    }

    pub fn set_twist(&mut self, edge: EdgeId, twist: Option<Twist>) -> Result<(), Error> {
        self.update_edge(edge, |data| data.twist = twist)
    }

    /// Copy of the graph with vertex `v` renamed to `vertex_permutation[v]`
    /// and the edge at position `i` moved to position `edge_permutation[i]`.
    /// All rotations are kept.
    pub fn relabel(
        &self,
        vertex_permutation: &[usize],
        edge_permutation: &[usize],
    ) -> Result<Graph, InputError> {
        check_permutation(vertex_permutation, self.num_vert())?;
        check_permutation(edge_permutation, self.num_edges())?;

        // Every arena entry is part of the edge sequence,
        // so the new handles simply follow the new positions.
        let mut new_id = vec![EdgeId(0); self.arena.len()];
        for (position, edge) in self.edges.iter().enumerate() {
            new_id[edge.0] = EdgeId(edge_permutation[position]);
        }

        let mut arena = self.arena.clone();
        for (old, data) in self.arena.iter().enumerate() {
            let mut moved = data.clone();
            moved.start = vertex_permutation[data.start];
            moved.end = vertex_permutation[data.end];
            arena[new_id[old].0] = moved;
        }

        let mut vertices: Vec<_> = (0..self.num_vert()).map(Vertex::new).collect();
        for vertex in &self.vertices {
            let target = &mut vertices[vertex_permutation[vertex.label]];
            target.slots = vertex
                .slots
                .iter()
                .map(|slot| Slot {
                    edge: new_id[slot.edge.0],
                    ..*slot
                })
                .collect();
        }

        Ok(Graph {
            vertices,
            arena,
            edges: (0..self.num_edges()).map(EdgeId).collect(),
            colour_table: self.colour_table.clone(),
            canonical_cache: OnceLock::new(),
        })
    }

    /// Cyclically shifts the rotation at `vertex`, which describes the same map.
    #[cfg(test)]
    pub(crate) fn rotate_vertex(&mut self, vertex: VertexIndex, shift: usize) {
        let slots = &mut self.vertices[vertex].slots;
        if !slots.is_empty() {
            let shift = shift % slots.len();
            slots.rotate_left(shift);
        }
        self.invalidate();
    }

    pub(crate) fn canonical_cache(&self) -> &OnceLock<CanonicalForm> {
        &self.canonical_cache
    }

    // Raw building blocks for the rewrite moves. They neither check
    // invariants nor invalidate the cache; the caller validates first.

    pub(crate) fn new_vertex(&mut self) -> VertexIndex {
        let label = self.vertices.len();
        self.vertices.push(Vertex::new(label));
        label
    }

    /// Arena only, the caller decides the sequence position.
    pub(crate) fn new_edge(&mut self, start: VertexIndex, end: VertexIndex) -> EdgeId {
        let edge = EdgeId(self.arena.len());
        self.arena.push(Edge::new(start, end));
        edge
    }

    /// Overwrites slot `position` at `vertex` with `side` of `edge`.
    pub(crate) fn place(&mut self, vertex: VertexIndex, position: usize, edge: EdgeId, side: Side) {
        self.arena[edge.0].set_endpoint(side, vertex);
        self.vertices[vertex].slots[position] = Slot::of(edge, side, &self.arena[edge.0]);
    }

    pub(crate) fn push_slot(&mut self, vertex: VertexIndex, edge: EdgeId, side: Side) {
        self.arena[edge.0].set_endpoint(side, vertex);
        let slot = Slot::of(edge, side, &self.arena[edge.0]);
        self.vertices[vertex].slots.push(slot);
    }

    pub(crate) fn insert_edge(&mut self, position: usize, edge: EdgeId) {
        self.edges.insert(position, edge);
    }

    pub(crate) fn push_edge(&mut self, edge: EdgeId) {
        self.edges.push(edge);
    }

    /// Moves `edge` from its current position in the sequence to `position`.
    pub(crate) fn move_edge(&mut self, edge: EdgeId, position: usize) {
        if let Some(current) = self.position_of(edge) {
            self.edges.remove(current);
            self.edges.insert(position, edge);
        }
    }

    pub(crate) fn clear_attributes(&mut self, edge: EdgeId) {
        let data = &mut self.arena[edge.0];
        data.orientation = None;
        data.colour = None;
        self.refresh_slots(edge);
    }

    pub(crate) fn invalidate(&mut self) {
        self.canonical_cache.take();
    }

    fn refresh_slots(&mut self, edge: EdgeId) {
        let data = &self.arena[edge.0];
        for vertex in [data.start, data.end] {
            for slot in self.vertices[vertex].slots.iter_mut() {
                if slot.edge == edge {
                    *slot = Slot::of(edge, slot.side, data);
                }
            }
        }
    }

    fn check_label(&self, label: VertexIndex) -> Result<(), InputError> {
        self.vertex(label).map(|_| ())
    }

    /// Side of `edge` that may still be connected at `vertex`,
    /// ignoring the slot at `ignored`. A self-loop offers `Start` first.
    fn free_side(
        &self,
        vertex: VertexIndex,
        edge: EdgeId,
        ignored: Option<usize>,
    ) -> Result<Side, InvariantViolation> {
        let data = &self.arena[edge.0];
        let slots = &self.vertices[vertex].slots;
        let mut candidates = [Side::Start, Side::End]
            .into_iter()
            .filter(|&side| data.endpoint(side) == vertex)
            .peekable();
        if candidates.peek().is_none() {
            return Err(InvariantViolation::NotIncident { vertex, edge });
        }

        candidates
            .find(|&side| {
                !slots
                    .iter()
                    .enumerate()
                    .any(|(position, slot)| {
                        Some(position) != ignored && slot.edge == edge && slot.side == side
                    })
            })
            .ok_or(InvariantViolation::AlreadyConnected { vertex, edge })
    }

    /// Checks a prospective rotation of `vertex` against the invariants.
    fn check_slots(&self, vertex: VertexIndex, slots: &[Slot]) -> Result<(), InvariantViolation> {
        if slots.len() > 3 {
            return Err(InvariantViolation::Trivalent(vertex));
        }

        let arrows: i8 = slots.iter().map(Slot::arrow).sum();
        if arrows.abs() == 3 {
            return Err(InvariantViolation::SourceOrSink(vertex));
        }

        if let (Some(table), [first, second, third]) = (&self.colour_table, slots) {
            let colours = [first.colour(), second.colour(), third.colour()];
            if colours.iter().all(|&colour| colour > 0) && !table.contains(colours) {
                return Err(InvariantViolation::InadmissibleColours { vertex, colours });
            }
        }

        Ok(())
    }

    fn update_edge<F>(&mut self, edge: EdgeId, change: F) -> Result<(), Error>
    where
        F: FnOnce(&mut Edge),
    {
        let mut data = self.edge_data(edge)?.clone();
        change(&mut data);

        let endpoints = if data.is_loop() {
            vec![data.start]
        } else {
            vec![data.start, data.end]
        };
        let mut refreshed = Vec::with_capacity(endpoints.len());
        for vertex in endpoints {
            let slots: Vec<_> = self.vertices[vertex]
                .slots
                .iter()
                .map(|slot| {
                    if slot.edge == edge {
                        Slot::of(edge, slot.side, &data)
                    } else {
                        *slot
                    }
                })
                .collect();
            self.check_slots(vertex, &slots)?;
            refreshed.push((vertex, slots));
        }

        self.arena[edge.0] = data;
        for (vertex, slots) in refreshed {
            self.vertices[vertex].slots = slots;
        }
        self.invalidate();
        Ok(())
    }
}

fn reserved<T>(capacity: usize, num_vert: usize) -> Result<Vec<T>, InputError> {
    let mut items = Vec::new();
    items
        .try_reserve_exact(capacity)
        .map_err(|_| InputError::VertexAllocation(num_vert))?;
    Ok(items)
}

fn check_permutation(permutation: &[usize], size: usize) -> Result<(), InputError> {
    let mut seen = vec![false; size];
    if permutation.len() != size {
        return Err(InputError::Permutation(size));
    }
    for &image in permutation {
        match seen.get_mut(image) {
            Some(flag) if !*flag => *flag = true,
            _ => return Err(InputError::Permutation(size)),
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn k4() -> Result<Graph, Error> {
        Graph::from_edges(4, [[0, 1], [1, 2], [0, 3], [0, 2], [1, 3], [2, 3]])
    }

    #[test]
    fn test_vertex_count() {
        assert_eq!(Err(InputError::VertexCount(0)), Graph::new(0).map(|_| ()));
        assert_eq!(Err(InputError::VertexCount(3)), Graph::new(3).map(|_| ()));
        assert!(Graph::new(4).is_ok());
        assert_eq!(
            Err(InputError::VertexAllocation(usize::MAX - 1)),
            Graph::new(usize::MAX - 1).map(|_| ())
        );
    }

    #[test]
    fn test_add_vertices() -> Result<(), Error> {
        let mut graph = Graph::new(2)?;
        assert_eq!(Err(InputError::AddedVertices), graph.add_vertices(0));
        graph.add_vertices(3)?;
        assert_eq!(5, graph.num_vert());
        assert_eq!(4, graph.vertex(4)?.label);
        Ok(())
    }

    #[test]
    fn test_k4() -> Result<(), Error> {
        let graph = k4()?;
        assert!(graph.is_complete());
        assert_eq!(6, graph.num_edges());
        assert_eq!(vec![3, 3, 3, 3], graph.degree_sequence());
        assert_eq!(
            vec![EdgeId(0), EdgeId(2), EdgeId(3)],
            graph.vertex(0)?.edge_order()
        );
        assert_eq!(
            vec![EdgeId(1), EdgeId(3), EdgeId(5)],
            graph.vertex(2)?.edge_order()
        );
        assert_eq!(vec![0, 0, 0], graph.vertex(0)?.in_arrow());
        assert_eq!(vec![0, 0, 0], graph.vertex(0)?.colour_list());
        Ok(())
    }

    #[test]
    fn test_label_out_of_range() -> Result<(), Error> {
        let result = Graph::from_edges(4, [[0, 1], [0, 4]]);
        assert!(matches!(
            result,
            Err(Error::Input(InputError::VertexLabel {
                label: 4,
                num_vert: 4
            }))
        ));
        let graph = k4()?;
        assert!(graph.vertex(4).is_err());
        assert_eq!(
            Err(InputError::EdgeLabel {
                label: 6,
                num_edges: 6
            }),
            graph.edge_id(6)
        );
        Ok(())
    }

    #[test]
    fn test_self_loops() -> Result<(), Error> {
        let graph = Graph::from_edges(2, [[0, 0], [0, 1], [1, 1]])?;
        assert!(graph.is_complete());
        let sides: Vec<_> = graph.vertex(0)?.slots().iter().map(|slot| slot.side).collect();
        assert_eq!(vec![Side::Start, Side::End, Side::Start], sides);
        assert_eq!(Some(Dart::new(0, 1)), graph.opposite(Dart::new(0, 0)));
        assert_eq!(Some(Dart::new(0, 0)), graph.opposite(Dart::new(0, 1)));
        Ok(())
    }

    #[test]
    fn test_darts() -> Result<(), Error> {
        let graph = k4()?;
        assert_eq!(Some(Dart::new(1, 0)), graph.opposite(Dart::new(0, 0)));
        assert_eq!(Some(Dart::new(3, 0)), graph.opposite(Dart::new(0, 1)));
        assert_eq!(Some(Dart::new(0, 0)), graph.next_ccw(Dart::new(0, 2)));
        assert_eq!(Some(Dart::new(0, 2)), graph.prev_ccw(Dart::new(0, 0)));
        assert_eq!(None, graph.next_ccw(Dart::new(0, 3)));
        assert_eq!(None, graph.opposite(Dart::new(4, 0)));
        Ok(())
    }

    #[test]
    fn test_fourth_edge() -> Result<(), Error> {
        let mut graph = k4()?;
        let before = graph.vertex(0)?.edge_order();
        let extra = graph.create_edge(EdgeSpec::new(0, 1))?;

        let result = graph.connect_edge(0, extra);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::Trivalent(0)))
        ));
        assert_eq!(before, graph.vertex(0)?.edge_order());
        Ok(())
    }

    #[test]
    fn test_add_edges_atomic() -> Result<(), Error> {
        let mut graph = Graph::from_edges(4, [[0, 1], [0, 2]])?;
        let result = graph.add_edges([[1, 2], [0, 3], [0, 3]]);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::Trivalent(0)))
        ));
        assert_eq!(2, graph.num_edges());
        assert_eq!(2, graph.vertex(0)?.degree());
        assert_eq!(1, graph.vertex(1)?.degree());
        assert_eq!(0, graph.vertex(3)?.degree());
        Ok(())
    }

    #[test]
    fn test_source_or_sink() -> Result<(), Error> {
        let mut graph = Graph::from_edges(4, vec![&[1i64, 0, 1][..], &[2, 0, 1][..]])?;
        assert_eq!(vec![1, 1], graph.vertex(0)?.in_arrow());

        let result = graph.add_edges(vec![&[3i64, 0, 1][..]]);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::SourceOrSink(0)))
        ));
        assert_eq!(vec![EdgeId(0), EdgeId(1)], graph.vertex(0)?.edge_order());
        assert_eq!(2, graph.num_edges());

        graph.add_edges(vec![&[3i64, 0, -1][..]])?;
        assert_eq!(vec![1, 1, -1], graph.vertex(0)?.in_arrow());
        assert_eq!(vec![1], graph.vertex(3)?.in_arrow());
        Ok(())
    }

    #[test]
    fn test_replace_edge() -> Result<(), Error> {
        let mut graph =
            Graph::from_edges(4, vec![&[1i64, 0, 1][..], &[2, 0, 1][..], &[3, 0, -1][..]])?;
        let before = graph.vertex(0)?.edge_order();

        let sink = graph.create_edge(EdgeSpec::new(3, 0).oriented(Orientation::Forward))?;
        let result = graph.replace_edge(0, EdgeId(2), sink);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::SourceOrSink(0)))
        ));
        assert_eq!(before, graph.vertex(0)?.edge_order());

        let plain = graph.create_edge(EdgeSpec::new(0, 3))?;
        graph.replace_edge(0, EdgeId(1), plain)?;
        assert_eq!(
            vec![EdgeId(0), plain, EdgeId(2)],
            graph.vertex(0)?.edge_order()
        );
        assert_eq!(vec![1, 0, -1], graph.vertex(0)?.in_arrow());

        let result = graph.replace_edge(1, EdgeId(2), plain);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::NotIncident { vertex: 1, .. }))
        ));
        Ok(())
    }

    #[test]
    fn test_connect_errors() -> Result<(), Error> {
        let mut graph = Graph::from_edges(4, [[0, 1]])?;
        assert!(matches!(
            graph.connect_edge(0, EdgeId(0)),
            Err(Error::Invariant(InvariantViolation::AlreadyConnected { vertex: 0, .. }))
        ));
        assert!(matches!(
            graph.connect_edge(2, EdgeId(0)),
            Err(Error::Invariant(InvariantViolation::NotIncident { vertex: 2, .. }))
        ));
        assert!(matches!(
            graph.connect_edge(0, EdgeId(7)),
            Err(Error::Input(InputError::EdgeHandle(EdgeId(7))))
        ));
        Ok(())
    }

    #[test]
    fn test_remove_edge() -> Result<(), Error> {
        let mut graph = Graph::from_edges(4, [[0, 1], [0, 2]])?;
        graph.remove_edge(0, EdgeId(0))?;
        assert_eq!(vec![EdgeId(1)], graph.vertex(0)?.edge_order());
        assert_eq!(2, graph.num_edges());

        assert!(matches!(
            graph.remove_edge(0, EdgeId(0)),
            Err(Error::Invariant(InvariantViolation::NotIncident { vertex: 0, .. }))
        ));
        assert!(matches!(
            graph.remove_edge(3, EdgeId(0)),
            Err(Error::Invariant(InvariantViolation::Disconnected(3)))
        ));

        // The free side can be connected again.
        graph.connect_edge(0, EdgeId(0))?;
        assert_eq!(vec![EdgeId(1), EdgeId(0)], graph.vertex(0)?.edge_order());
        Ok(())
    }

    #[test]
    fn test_colour_admissibility() -> Result<(), Error> {
        let table = Arc::new(ColourTable::new(4)?);
        let mut graph = Graph::with_colour_table(2, table.clone())?;
        graph.add_edges([
            EdgeSpec::new(0, 1).coloured(1),
            EdgeSpec::new(0, 1).coloured(1),
            EdgeSpec::new(0, 1).coloured(2),
        ])?;
        assert_eq!(vec![1, 1, 2], graph.vertex(0)?.colour_list());

        let result = graph.set_colour(EdgeId(2), Some(1));
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::InadmissibleColours {
                vertex: 0,
                colours: [1, 1, 1]
            }))
        ));
        assert_eq!(vec![1, 1, 2], graph.vertex(0)?.colour_list());
        assert_eq!(Some(2), graph.edge(2)?.colour);

        assert!(matches!(
            graph.set_colour(EdgeId(2), Some(0)),
            Err(Error::Input(InputError::Colour(0)))
        ));

        graph.set_colour(EdgeId(2), None)?;
        assert_eq!(vec![1, 1, 0], graph.vertex(1)?.colour_list());

        let mut other = Graph::with_colour_table(2, table)?;
        let result = other.add_edges([
            EdgeSpec::new(0, 1).coloured(1),
            EdgeSpec::new(0, 1).coloured(1),
            EdgeSpec::new(0, 1).coloured(1),
        ]);
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::InadmissibleColours { vertex: 0, .. }))
        ));
        assert_eq!(0, other.num_edges());
        Ok(())
    }

    #[test]
    fn test_set_orientation() -> Result<(), Error> {
        let mut graph = Graph::from_edges(4, [[1, 0], [2, 0], [3, 0]])?;
        graph.set_orientation(EdgeId(0), Some(Orientation::Forward))?;
        graph.set_orientation(EdgeId(1), Some(Orientation::Forward))?;
        let result = graph.set_orientation(EdgeId(2), Some(Orientation::Forward));
        assert!(matches!(
            result,
            Err(Error::Invariant(InvariantViolation::SourceOrSink(0)))
        ));
        assert_eq!(vec![1, 1, 0], graph.vertex(0)?.in_arrow());
        assert_eq!(None, graph.edge(2)?.orientation);

        graph.set_orientation(EdgeId(2), Some(Orientation::Backward))?;
        assert_eq!(vec![1, 1, -1], graph.vertex(0)?.in_arrow());
        assert_eq!(vec![1], graph.vertex(3)?.in_arrow());

        graph.set_twist(EdgeId(2), Some(-3))?;
        assert_eq!(Some(-3), graph.edge(2)?.twist);
        Ok(())
    }

    #[test]
    fn test_relabel() -> Result<(), Error> {
        let graph = k4()?;
        assert_eq!(
            Err(InputError::Permutation(4)),
            graph.relabel(&[0, 1, 1, 2], &[0, 1, 2, 3, 4, 5]).map(|_| ())
        );
        assert_eq!(
            Err(InputError::Permutation(6)),
            graph.relabel(&[0, 1, 2, 3], &[0, 1, 2]).map(|_| ())
        );

        let moved = graph.relabel(&[3, 2, 1, 0], &[5, 4, 3, 2, 1, 0])?;
        // Old edge 0 = 0-1 is now edge 5 = 3-2, first at the old vertex 0.
        assert_eq!(3, moved.edge(5)?.start);
        assert_eq!(2, moved.edge(5)?.end);
        assert_eq!(
            vec![EdgeId(5), EdgeId(3), EdgeId(2)],
            moved.vertex(3)?.edge_order()
        );
        assert!(moved.is_complete());
        Ok(())
    }
}
