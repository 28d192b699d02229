//! Face tracing on rotation systems.
use crate::graph::{Dart, EdgeId, Graph};

/// Cyclic sequence of darts bounding one face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    darts: Vec<Dart>,
    edges: Vec<EdgeId>,
}

impl Face {
    pub fn len(&self) -> usize {
        self.darts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.darts.is_empty()
    }

    pub fn darts(&self) -> &[Dart] {
        &self.darts
    }

    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges.iter().copied()
    }

    pub fn contains(&self, dart: Dart) -> bool {
        self.darts.contains(&dart)
    }
}

impl Graph {
    /// The face successor of `dart`: cross the edge,
    /// then turn clockwise around the far vertex.
    fn face_step(&self, dart: Dart) -> Option<Dart> {
        self.prev_ccw(self.opposite(dart)?)
    }

    /// Walks from `start` until it comes back or hits an unconnected side.
    pub fn trace_face(&self, start: Dart) -> Face {
        let mut face = Face {
            darts: Vec::new(),
            edges: Vec::new(),
        };
        let mut current = Some(start);

        while let Some(dart) = current {
            let slot = match self.slot(dart) {
                Some(slot) => slot,
                None => break,
            };
            face.darts.push(dart);
            face.edges.push(slot.edge);
            current = self
                .face_step(dart)
                .filter(|&next| next != start && !face.darts.contains(&next));
        }

        face
    }

    /// All faces, each dart in exactly one of them on a complete graph.
    pub fn find_faces(&self) -> Vec<Face> {
        let mut seen = vec![[false; 3]; self.num_vert()];
        let mut faces = Vec::new();

        for vertex in self.vertices() {
            for slot in 0..vertex.degree() {
                if seen[vertex.label][slot] {
                    continue;
                }
                let face = self.trace_face(Dart::new(vertex.label, slot));
                for dart in face.darts() {
                    seen[dart.vertex][dart.slot] = true;
                }
                faces.push(face);
            }
        }

        faces
    }

    /// Index into `find_faces` of the face containing `dart`.
    pub fn face_of(&self, dart: Dart) -> Option<usize> {
        self.find_faces().iter().position(|face| face.contains(dart))
    }
}
