//! Moves that grow the graph by two vertices.
use crate::{
    debug::Error,
    graph::{EdgeId, Graph, Side, VertexIndex},
};

impl Graph {
    fn insert_after(&mut self, anchor: EdgeId, edges: &[EdgeId]) {
        let position = self.position_of(anchor).map_or(self.num_edges(), |p| p + 1);
        for (offset, &edge) in edges.iter().enumerate() {
            self.insert_edge(position + offset, edge);
        }
    }

    /// Splits the edge `a -> b` at `label` with a new vertex `x`
    /// that carries a pendant loop through the new vertex `y`.
    pub fn one_move(&mut self, label: usize) -> Result<Vec<EdgeId>, Error> {
        let (edge, _, end) = self.edge_darts(label)?;

        let x = self.new_vertex();
        let y = self.new_vertex();
        let f = self.new_edge(x, end.vertex);
        let g = self.new_edge(x, y);
        let h = self.new_edge(y, y);

        self.place(end.vertex, end.slot, f, Side::End);
        self.push_slot(x, edge, Side::End);
        self.push_slot(x, f, Side::Start);
        self.push_slot(x, g, Side::Start);
        self.push_slot(y, g, Side::End);
        self.push_slot(y, h, Side::Start);
        self.push_slot(y, h, Side::End);

        self.insert_after(edge, &[f]);
        self.push_edge(g);
        self.push_edge(h);
        self.invalidate();

        log::debug!("one move on edge {} created vertices {} and {}", label, x, y);
        Ok(vec![f, g, h])
    }

    /// Replaces the edge `a -> b` at `label` by `a - x = y - b`
    /// with a double edge between the new vertices `x` and `y`.
    pub fn two_move(&mut self, label: usize) -> Result<Vec<EdgeId>, Error> {
        let (edge, _, end) = self.edge_darts(label)?;

        let x = self.new_vertex();
        let y = self.new_vertex();
        let p = self.new_edge(x, y);
        let f = self.new_edge(y, end.vertex);
        let q = self.new_edge(x, y);

        self.place(end.vertex, end.slot, f, Side::End);
        self.push_slot(x, edge, Side::End);
        self.push_slot(x, p, Side::Start);
        self.push_slot(x, q, Side::Start);
        self.push_slot(y, p, Side::End);
        self.push_slot(y, f, Side::Start);
        self.push_slot(y, q, Side::End);

        self.insert_after(edge, &[p, f, q]);
        self.invalidate();

        log::debug!("two move on edge {} created vertices {} and {}", label, x, y);
        Ok(vec![p, f, q])
    }

    /// Blows vertex `vertex` with rotation `(a, b, c)` up into the
    /// triangle `x = vertex, y, z` with `x: (a, y, z)`, `y: (x, b, z)`
    /// and `z: (x, y, c)`.
    pub fn three_move(&mut self, vertex: VertexIndex) -> Result<Vec<EdgeId>, Error> {
        self.require_trivalent(vertex)?;
        let slots = self.vertex(vertex)?.slots().to_vec();
        let (first, second, third) = (slots[0], slots[1], slots[2]);

        let y = self.new_vertex();
        let z = self.new_vertex();
        let xy = self.new_edge(vertex, y);
        let xz = self.new_edge(vertex, z);
        let yz = self.new_edge(y, z);

        self.place(vertex, 1, xy, Side::Start);
        self.place(vertex, 2, xz, Side::Start);
        self.push_slot(y, xy, Side::End);
        self.push_slot(y, second.edge, second.side);
        self.push_slot(y, yz, Side::Start);
        self.push_slot(z, xz, Side::End);
        self.push_slot(z, yz, Side::End);
        self.push_slot(z, third.edge, third.side);

        self.insert_after(first.edge, &[xy, xz]);
        self.insert_after(second.edge, &[yz]);
        self.invalidate();

        log::debug!("three move on vertex {} created vertices {} and {}", vertex, y, z);
        Ok(vec![xy, xz, yz])
    }

    /// For `x: (e, a, b)` and `y: (e, c, d)` around the edge `e = x - y`
    /// at `label`, inserts the new vertices `w` and `z` such that
    /// `x: (y, a, z)`, `y: (x, w, d)`, `z: (x, b, w)` and `w: (c, y, z)`.
    /// Only slot sides move, so loops and parallel edges at `x` or `y`
    /// keep the rotation of the vertex at their other side.
    pub fn four_move(&mut self, label: usize) -> Result<Vec<EdgeId>, Error> {
        let (_, start, end) = self.proper_edge_darts(label)?;
        let (x, y) = (start.vertex, end.vertex);
        let b_slot = (start.slot + 2) % 3;
        let c_slot = (end.slot + 1) % 3;
        let b = self.vertex(x)?.slots()[b_slot];
        let c = self.vertex(y)?.slots()[c_slot];

        let w = self.new_vertex();
        let z = self.new_vertex();
        let xz = self.new_edge(x, z);
        let wy = self.new_edge(w, y);
        let wz = self.new_edge(w, z);

        self.place(x, b_slot, xz, Side::Start);
        self.place(y, c_slot, wy, Side::End);
        self.push_slot(z, xz, Side::End);
        self.push_slot(z, b.edge, b.side);
        self.push_slot(z, wz, Side::End);
        self.push_slot(w, c.edge, c.side);
        self.push_slot(w, wy, Side::Start);
        self.push_slot(w, wz, Side::Start);

        let before_b = self.position_of(b.edge).unwrap_or(0);
        self.insert_edge(before_b, xz);
        self.insert_after(c.edge, &[wy]);
        self.push_edge(wz);
        self.invalidate();

        log::debug!(
            "four move on edge {} ({} - {}) created vertices {} and {}",
            label,
            x,
            y,
            w,
            z
        );
        Ok(vec![xz, wy, wz])
    }
}
