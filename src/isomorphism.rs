//! Decides whether two rotation systems are the same
//! combinatorial map up to relabeling. Only maps that keep
//! the rotational sense at every vertex are considered.
use itertools::Itertools;

use crate::{
    canonical::components,
    graph::{Dart, EdgeId, Graph, Side, VertexIndex},
};

/// Correspondence found between two equal graphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Isomorphism {
    /// `vertices[v]` is the image of vertex `v`.
    pub vertices: Vec<VertexIndex>,
    /// `edges[i]` is the sequence position of the image
    /// of the edge at sequence position `i`.
    pub edges: Vec<usize>,
}

/// Partial dart matching that can be rolled back.
struct Matching<'a> {
    left: &'a Graph,
    right: &'a Graph,
    images: Vec<Option<Dart>>,
    used: Vec<bool>,
    trail: Vec<Dart>,
}

// Vertices have at most three slots.
fn dart_index(dart: Dart) -> usize {
    3 * dart.vertex + dart.slot
}

impl<'a> Matching<'a> {
    fn new(left: &'a Graph, right: &'a Graph) -> Self {
        Matching {
            left,
            right,
            images: vec![None; 3 * left.num_vert()],
            used: vec![false; 3 * right.num_vert()],
            trail: Vec::new(),
        }
    }

    fn image(&self, dart: Dart) -> Option<Dart> {
        self.images[dart_index(dart)]
    }

    fn record(&mut self, left: Dart, right: Dart) {
        self.images[dart_index(left)] = Some(right);
        self.used[dart_index(right)] = true;
        self.trail.push(left);
    }

    fn undo(&mut self, mark: usize) {
        for left in self.trail.drain(mark..) {
            if let Some(right) = self.images[dart_index(left)].take() {
                self.used[dart_index(right)] = false;
            }
        }
    }

    /// Connected dart of the first edge in sequence order that
    /// has a side in `members`, `Start` side first.
    fn anchor(&self, members: &[VertexIndex]) -> Option<Dart> {
        let mut member = vec![false; self.left.num_vert()];
        members.iter().for_each(|&vertex| member[vertex] = true);

        self.left.edge_list().into_iter().find_map(|edge| {
            let data = self.left.edge_data(edge).ok()?;
            [Side::Start, Side::End].into_iter().find_map(|side| {
                let vertex = data.endpoint(side);
                if !member.get(vertex).copied().unwrap_or(false) {
                    return None;
                }
                let slot = self.left.vertices()[vertex].position(edge, side)?;
                Some(Dart::new(vertex, slot))
            })
        })
    }

    fn candidates(&self, anchor: Dart, members: &[VertexIndex]) -> Vec<Dart> {
        let degree = self.left.vertices()[anchor.vertex].degree();
        members
            .iter()
            .map(|&vertex| &self.right.vertices()[vertex])
            .filter(|vertex| vertex.degree() == degree)
            .flat_map(|vertex| (0..degree).map(move |slot| Dart::new(vertex.label, slot)))
            .filter(|&dart| !self.used[dart_index(dart)])
            .collect()
    }

    /// Grows the matching from the pair `(left, right)`
    /// through rotations and edges. Leaves a partial
    /// trail behind on failure.
    fn pair(&mut self, left: Dart, right: Dart) -> bool {
        let mut work = vec![(left, right)];

        while let Some((left, right)) = work.pop() {
            if let Some(image) = self.image(left) {
                if image == right {
                    continue;
                }
                return false;
            }
            if self.used[dart_index(right)] {
                return false;
            }

            let (left_vertex, right_vertex) = (
                &self.left.vertices()[left.vertex],
                &self.right.vertices()[right.vertex],
            );
            if left_vertex.degree() != right_vertex.degree() {
                return false;
            }
            let (left_slot, right_slot) = (
                left_vertex.slots()[left.slot],
                right_vertex.slots()[right.slot],
            );
            if !compatible(left_slot.arrow(), right_slot.arrow())
                || !compatible(left_slot.colour(), right_slot.colour())
            {
                return false;
            }

            self.record(left, right);

            if let (Some(left_next), Some(right_next)) =
                (self.left.next_ccw(left), self.right.next_ccw(right))
            {
                work.push((left_next, right_next));
            }
            match (self.left.opposite(left), self.right.opposite(right)) {
                (Some(left_far), Some(right_far)) => work.push((left_far, right_far)),
                (None, None) => (),
                _ => return false,
            }
        }

        true
    }

    /// Maps the connected component `left` onto `right`. A map of a
    /// connected component is fixed by the image of one dart, so
    /// only the anchor is tried against every candidate.
    fn match_component(&mut self, left: &[VertexIndex], right: &[VertexIndex]) -> bool {
        let anchor = match self.anchor(left) {
            Some(anchor) => anchor,
            None => return false,
        };

        for candidate in self.candidates(anchor, right) {
            let mark = self.trail.len();
            if self.pair(anchor, candidate) {
                return true;
            }
            log::trace!("anchor {:?} cannot be mapped to {:?}", anchor, candidate);
            self.undo(mark);
        }

        false
    }

    /// Tests every pair of components on its own and then looks
    /// for a perfect assignment between the two sides.
    fn match_components(&mut self) -> bool {
        let left = proper_components(self.left);
        let right = proper_components(self.right);
        if left.len() != right.len() {
            return false;
        }

        let mut fits: Vec<Vec<usize>> = vec![Vec::new(); left.len()];
        for (index, members) in left.iter().enumerate() {
            for (other, candidates) in right.iter().enumerate() {
                if members.len() != candidates.len() {
                    continue;
                }
                let mark = self.trail.len();
                if self.match_component(members, candidates) {
                    fits[index].push(other);
                }
                self.undo(mark);
            }
        }

        let mut owner: Vec<Option<usize>> = vec![None; right.len()];
        for index in 0..left.len() {
            let mut seen = vec![false; right.len()];
            if !assign(index, &fits, &mut seen, &mut owner) {
                log::trace!("component {} of the left graph has no partner", index);
                return false;
            }
        }

        owner.iter().enumerate().all(|(other, index)| match index {
            Some(index) => self.match_component(&left[*index], &right[other]),
            None => false,
        })
    }

    fn into_isomorphism(self) -> Isomorphism {
        let (left, right) = (self.left, self.right);

        let isolated_right = right
            .vertices()
            .iter()
            .filter(|vertex| vertex.degree() == 0)
            .map(|vertex| vertex.label)
            .collect_vec();
        let mut isolated_right = isolated_right.into_iter();
        let vertices = left
            .vertices()
            .iter()
            .map(|vertex| match self.image(Dart::new(vertex.label, 0)) {
                Some(image) if vertex.degree() > 0 => image.vertex,
                _ => isolated_right.next().unwrap_or_default(),
            })
            .collect();

        let edge_image = |edge: EdgeId| -> Option<usize> {
            let data = left.edge_data(edge).ok()?;
            [Side::Start, Side::End].into_iter().find_map(|side| {
                let vertex = data.endpoint(side);
                let slot = left.vertex(vertex).ok()?.position(edge, side)?;
                let image = self.image(Dart::new(vertex, slot))?;
                right.position_of(right.slot(image)?.edge)
            })
        };
        let images = left.edge_list().into_iter().map(edge_image).collect_vec();

        // Detached edges have no darts, they are paired in sequence order.
        let mut taken = vec![false; right.num_edges()];
        images.iter().flatten().for_each(|&position| taken[position] = true);
        let mut detached_right = (0..right.num_edges()).filter(|&position| !taken[position]);
        let edges = images
            .into_iter()
            .map(|image| image.unwrap_or_else(|| detached_right.next().unwrap_or_default()))
            .collect();

        Isomorphism { vertices, edges }
    }
}

/// Augmenting path search for component `index`.
fn assign(
    index: usize,
    fits: &[Vec<usize>],
    seen: &mut [bool],
    owner: &mut [Option<usize>],
) -> bool {
    for &other in &fits[index] {
        if seen[other] {
            continue;
        }
        seen[other] = true;
        let free = match owner[other] {
            Some(previous) => assign(previous, fits, seen, owner),
            None => true,
        };
        if free {
            owner[other] = Some(index);
            return true;
        }
    }
    false
}

/// Components that carry at least one dart.
fn proper_components(graph: &Graph) -> Vec<Vec<VertexIndex>> {
    components(graph)
        .into_iter()
        .filter(|members| {
            members
                .iter()
                .any(|&vertex| graph.vertices()[vertex].degree() > 0)
        })
        .collect()
}

/// Unset attributes (`0`) are compatible with everything.
fn compatible<T: Default + PartialEq>(left: T, right: T) -> bool {
    left == T::default() || right == T::default() || left == right
}

fn detached_edges(graph: &Graph) -> usize {
    graph
        .edge_list()
        .into_iter()
        .filter(|&edge| {
            !graph
                .vertices()
                .iter()
                .any(|vertex| vertex.contains(edge))
        })
        .count()
}

impl Graph {
    pub fn isomorphism(&self, other: &Graph) -> Option<Isomorphism> {
        if self.num_vert() != other.num_vert()
            || self.num_edges() != other.num_edges()
            || self.degree_sequence() != other.degree_sequence()
            || detached_edges(self) != detached_edges(other)
        {
            log::debug!("graphs differ in their counts");
            return None;
        }

        let mut matching = Matching::new(self, other);
        if matching.match_components() {
            log::debug!("graphs are isomorphic");
            Some(matching.into_isomorphism())
        } else {
            log::debug!("graphs are not isomorphic");
            None
        }
    }
}

/// Equality up to relabeling. Attributes set on only
/// one side match anything, so this is not transitive for
/// partially attributed graphs and `Eq` is not implemented.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.isomorphism(other).is_some()
    }
}
