//! Canonical relabeling of a rotation system, used to hash
//! and deduplicate graphs up to isomorphism.
use std::{
    collections::{hash_map::DefaultHasher, HashMap, VecDeque},
    hash::{Hash, Hasher},
};

use crate::graph::{Dart, EdgeId, Graph, VertexIndex};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalForm {
    /// `[num_vert, detached edges]` followed by the
    /// length-prefixed code of every component.
    pub code: Vec<usize>,
    /// Vertices in canonical order.
    pub vertex_order: Vec<VertexIndex>,
    /// Edges in canonical order, detached ones last.
    pub edge_order: Vec<EdgeId>,
}

#[derive(Debug)]
struct Labeling {
    code: Vec<usize>,
    vertex_order: Vec<VertexIndex>,
    edge_order: Vec<EdgeId>,
}

/// Breadth-first relabeling from `root`. Every vertex is read
/// counterclockwise starting at the dart it was reached through.
/// Each vertex contributes its degree followed by
/// `edge label, arrow + 1, colour` for each of its slots.
fn label_from(graph: &Graph, root: Dart) -> Labeling {
    let mut visited = vec![false; graph.num_vert()];
    let mut edge_labels: HashMap<EdgeId, usize> = HashMap::new();
    let mut labeling = Labeling {
        code: Vec::new(),
        vertex_order: Vec::new(),
        edge_order: Vec::new(),
    };
    let mut queue = VecDeque::from([root]);

    while let Some(entry) = queue.pop_front() {
        if visited[entry.vertex] {
            continue;
        }
        visited[entry.vertex] = true;
        labeling.vertex_order.push(entry.vertex);

        let slots = graph.vertices()[entry.vertex].slots();
        labeling.code.push(slots.len());
        for offset in 0..slots.len() {
            let position = (entry.slot + offset) % slots.len();
            let slot = slots[position];

            let next_label = edge_labels.len();
            let label = *edge_labels.entry(slot.edge).or_insert_with(|| {
                labeling.edge_order.push(slot.edge);
                next_label
            });
            labeling.code.push(label);
            labeling.code.push((slot.arrow() + 1) as usize);
            labeling.code.push(slot.colour() as usize);

            if let Some(far) = graph.opposite(Dart::new(entry.vertex, position)) {
                if !visited[far.vertex] {
                    queue.push_back(far);
                }
            }
        }
    }

    labeling
}

/// Vertex sets of the connected components, ordered by their smallest vertex.
pub(crate) fn components(graph: &Graph) -> Vec<Vec<VertexIndex>> {
    let mut component_of = vec![None; graph.num_vert()];
    let mut components = Vec::new();

    for start in 0..graph.num_vert() {
        if component_of[start].is_some() {
            continue;
        }
        let index = components.len();
        component_of[start] = Some(index);
        let mut members = vec![start];
        let mut stack = vec![start];

        while let Some(vertex) = stack.pop() {
            for slot in 0..graph.vertices()[vertex].degree() {
                if let Some(far) = graph.opposite(Dart::new(vertex, slot)) {
                    if component_of[far.vertex].is_none() {
                        component_of[far.vertex] = Some(index);
                        members.push(far.vertex);
                        stack.push(far.vertex);
                    }
                }
            }
        }
        components.push(members);
    }

    components
}

fn compute(graph: &Graph) -> CanonicalForm {
    let mut labelings: Vec<Labeling> = components(graph)
        .into_iter()
        .map(|members| {
            let mut best: Option<Labeling> = None;
            for &vertex in &members {
                for slot in 0..graph.vertices()[vertex].degree() {
                    let candidate = label_from(graph, Dart::new(vertex, slot));
                    if best.as_ref().map_or(true, |best| candidate.code < best.code) {
                        best = Some(candidate);
                    }
                }
            }
            best.unwrap_or_else(|| Labeling {
                code: vec![0],
                vertex_order: members,
                edge_order: Vec::new(),
            })
        })
        .collect();
    labelings.sort_by(|a, b| a.code.cmp(&b.code));

    let mut edge_order: Vec<EdgeId> = labelings
        .iter()
        .flat_map(|labeling| labeling.edge_order.iter().copied())
        .collect();
    let detached = graph
        .edge_list()
        .into_iter()
        .filter(|edge| !edge_order.contains(edge))
        .collect::<Vec<_>>();

    let mut code = vec![graph.num_vert(), detached.len()];
    let mut vertex_order = Vec::with_capacity(graph.num_vert());
    for labeling in labelings {
        code.push(labeling.code.len());
        code.extend(labeling.code);
        vertex_order.extend(labeling.vertex_order);
    }
    edge_order.extend(detached);

    CanonicalForm {
        code,
        vertex_order,
        edge_order,
    }
}

impl Graph {
    /// Computed on first use and cached until the next mutation.
    pub fn canonical_form(&self) -> &CanonicalForm {
        self.canonical_cache().get_or_init(|| compute(self))
    }

    pub fn canonical_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.canonical_form().code.hash(&mut hasher);
        hasher.finish()
    }
}
