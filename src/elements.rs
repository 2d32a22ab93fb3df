//! The three element kinds stored in a mesh: vertices, edges and triangles.
//!
//! Elements refer to each other only via handles. The forward references
//! (edge → vertices, triangle → vertices and edges) define the topology. The
//! back references (vertex → edges and triangles, edge → triangles) are kept
//! in sync by the [`Mesh`][crate::Mesh] and answer "is this used?" and
//! adjacency queries without scanning the stores.
//!
//! The methods in this module only ever look at a single element. Checks that
//! need to resolve handles (e.g. "does this vertex still exist?") live on the
//! mesh.

use smallvec::SmallVec;

use crate::{
    handle::{EdgeHandle, TriangleHandle, VertexHandle},
    math::Point3,
};


// ===============================================================================================
// ===== Vertex
// ===============================================================================================

#[derive(Debug, Clone)]
pub struct Vertex {
    pub position: Point3,
    pub selected: bool,
    pub(crate) edges: SmallVec<[EdgeHandle; 6]>,
    pub(crate) triangles: SmallVec<[TriangleHandle; 6]>,
}

impl Vertex {
    pub(crate) fn new(position: Point3) -> Self {
        Self {
            position,
            selected: false,
            edges: SmallVec::new(),
            triangles: SmallVec::new(),
        }
    }

    /// All edges that have this vertex as one endpoint.
    pub fn edges(&self) -> &[EdgeHandle] {
        &self.edges
    }

    /// All triangles that have this vertex as one corner.
    pub fn triangles(&self) -> &[TriangleHandle] {
        &self.triangles
    }

    /// A vertex is used if at least one edge or triangle refers to it.
    pub fn is_used(&self) -> bool {
        !self.edges.is_empty() || !self.triangles.is_empty()
    }
}


// ===============================================================================================
// ===== Edge
// ===============================================================================================

#[derive(Debug, Clone)]
pub struct Edge {
    pub(crate) vertices: [VertexHandle; 2],
    pub(crate) triangles: SmallVec<[TriangleHandle; 2]>,
    pub selected: bool,
}

impl Edge {
    pub(crate) fn new(vertices: [VertexHandle; 2]) -> Self {
        Self {
            vertices,
            triangles: SmallVec::new(),
            selected: false,
        }
    }

    pub fn vertices(&self) -> [VertexHandle; 2] {
        self.vertices
    }

    /// The triangles this edge belongs to. In a manifold mesh there are at
    /// most two.
    pub fn triangles(&self) -> &[TriangleHandle] {
        &self.triangles
    }

    /// Returns `true` if the edge is adjacent to exactly one triangle, i.e.
    /// it lies on the boundary of the mesh.
    pub fn is_not_shared(&self) -> bool {
        self.triangles.len() == 1
    }

    pub fn connects(&self, a: VertexHandle, b: VertexHandle) -> bool {
        self.vertices == [a, b] || self.vertices == [b, a]
    }

    /// The order independent identity of this edge.
    pub(crate) fn key(&self) -> [VertexHandle; 2] {
        edge_key(self.vertices[0], self.vertices[1])
    }

    pub(crate) fn has_duplicate_vertex(&self) -> bool {
        self.vertices[0] == self.vertices[1]
    }

    /// Replaces all occurrences of `old` with `new`. Returns whether anything
    /// was replaced.
    pub(crate) fn replace_vertex(&mut self, old: VertexHandle, new: VertexHandle) -> bool {
        replace_in(&mut self.vertices, old, new)
    }
}

/// Returns the vertex pair ordered by handle, so that both directions of an
/// edge map to the same key.
pub(crate) fn edge_key(a: VertexHandle, b: VertexHandle) -> [VertexHandle; 2] {
    if a <= b { [a, b] } else { [b, a] }
}


// ===============================================================================================
// ===== Triangle
// ===============================================================================================

/// A triangle with counter clockwise winding.
///
/// The edge in slot `i` connects the vertices in slot `i` and `(i + 1) % 3`.
#[derive(Debug, Clone)]
pub struct Triangle {
    pub(crate) vertices: [VertexHandle; 3],
    pub(crate) edges: [EdgeHandle; 3],
    pub selected: bool,
    pub color_index: u32,
}

impl Triangle {
    pub(crate) fn new(vertices: [VertexHandle; 3], edges: [EdgeHandle; 3]) -> Self {
        Self {
            vertices,
            edges,
            selected: false,
            color_index: 0,
        }
    }

    pub fn vertices(&self) -> [VertexHandle; 3] {
        self.vertices
    }

    pub fn edges(&self) -> [EdgeHandle; 3] {
        self.edges
    }

    pub fn contains_vertex(&self, v: VertexHandle) -> bool {
        self.vertices.contains(&v)
    }

    /// The two vertices the edge in slot `slot` connects, in winding order.
    pub fn edge_vertices(&self, slot: usize) -> [VertexHandle; 2] {
        [self.vertices[slot], self.vertices[(slot + 1) % 3]]
    }

    /// Returns the slot of the edge connecting `a` and `b` (in any order), if
    /// both are corners of this triangle.
    pub fn edge_slot(&self, a: VertexHandle, b: VertexHandle) -> Option<usize> {
        (0..3).find(|&slot| {
            let [p, q] = self.edge_vertices(slot);
            (p == a && q == b) || (p == b && q == a)
        })
    }

    /// Returns `(a, b)` if `b` directly follows `a` in this triangle's winding
    /// order and `(b, a)` otherwise.
    pub fn sort_vertices(&self, a: VertexHandle, b: VertexHandle) -> (VertexHandle, VertexHandle) {
        let follows = (0..3).any(|i| self.vertices[i] == a && self.vertices[(i + 1) % 3] == b);
        if follows { (a, b) } else { (b, a) }
    }

    /// Returns the corner that is neither `a` nor `b`.
    pub fn opposite_vertex(&self, a: VertexHandle, b: VertexHandle) -> Option<VertexHandle> {
        self.vertices.iter().cloned().find(|&v| v != a && v != b)
    }

    /// Reverses the winding order (flips the face normal).
    ///
    /// `[a, b, c]` becomes `[a, c, b]`. The edge slots are swapped accordingly
    /// so that slot `i` still connects vertex `i` and `i + 1`.
    pub(crate) fn flip(&mut self) {
        self.vertices.swap(1, 2);
        self.edges.swap(0, 2);
    }

    pub(crate) fn has_duplicate_vertex(&self) -> bool {
        let [a, b, c] = self.vertices;
        a == b || b == c || a == c
    }

    /// Replaces all occurrences of `old` with `new`. Returns whether anything
    /// was replaced.
    pub(crate) fn replace_vertex(&mut self, old: VertexHandle, new: VertexHandle) -> bool {
        replace_in(&mut self.vertices, old, new)
    }
}

fn replace_in(handles: &mut [VertexHandle], old: VertexHandle, new: VertexHandle) -> bool {
    let mut replaced = false;
    for h in handles.iter_mut().filter(|h| **h == old) {
        *h = new;
        replaced = true;
    }
    replaced
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Handle;

    fn v(idx: u32) -> VertexHandle {
        VertexHandle::new(idx as _)
    }

    fn e(idx: u32) -> EdgeHandle {
        EdgeHandle::new(idx as _)
    }

    fn triangle() -> Triangle {
        Triangle::new([v(0), v(1), v(2)], [e(0), e(1), e(2)])
    }

    #[test]
    fn flip_reverses_winding() {
        let mut t = triangle();
        t.color_index = 3;
        t.flip();

        assert_eq!(t.vertices(), [v(0), v(2), v(1)]);
        assert_eq!(t.edges(), [e(2), e(1), e(0)]);
        assert_eq!(t.color_index, 3);

        // Edge slots still connect the right vertices
        assert_eq!(t.edge_vertices(0), [v(0), v(2)]);
        assert_eq!(t.edge_slot(v(0), v(2)), Some(0));
        assert_eq!(t.edge_slot(v(2), v(1)), Some(1));
        assert_eq!(t.edge_slot(v(1), v(0)), Some(2));

        t.flip();
        assert_eq!(t.vertices(), [v(0), v(1), v(2)]);
        assert_eq!(t.edges(), [e(0), e(1), e(2)]);
    }

    #[test]
    fn sort_vertices_follows_winding() {
        let t = triangle();
        assert_eq!(t.sort_vertices(v(0), v(1)), (v(0), v(1)));
        assert_eq!(t.sort_vertices(v(1), v(0)), (v(0), v(1)));
        assert_eq!(t.sort_vertices(v(2), v(0)), (v(2), v(0)));
        assert_eq!(t.sort_vertices(v(0), v(2)), (v(2), v(0)));
    }

    #[test]
    fn opposite_vertex() {
        let t = triangle();
        assert_eq!(t.opposite_vertex(v(0), v(1)), Some(v(2)));
        assert_eq!(t.opposite_vertex(v(2), v(1)), Some(v(0)));
        assert_eq!(t.edge_slot(v(0), v(5)), None);
    }

    #[test]
    fn replace_vertex_creates_degenerate_triangle() {
        let mut t = triangle();
        assert!(!t.has_duplicate_vertex());
        assert!(!t.replace_vertex(v(7), v(8)));
        assert!(t.replace_vertex(v(1), v(0)));
        assert!(t.has_duplicate_vertex());
        assert!(t.contains_vertex(v(2)));
        assert!(!t.contains_vertex(v(1)));
    }

    #[test]
    fn edge_basics() {
        let mut edge = Edge::new([v(4), v(1)]);
        assert!(edge.connects(v(1), v(4)));
        assert!(edge.connects(v(4), v(1)));
        assert!(!edge.connects(v(4), v(2)));
        assert_eq!(edge.key(), [v(1), v(4)]);
        assert_eq!(edge_key(v(1), v(4)), edge_key(v(4), v(1)));

        assert!(!edge.is_not_shared());
        edge.triangles.push(TriangleHandle::new(0));
        assert!(edge.is_not_shared());
        edge.triangles.push(TriangleHandle::new(1));
        assert!(!edge.is_not_shared());

        assert!(edge.replace_vertex(v(4), v(1)));
        assert!(edge.has_duplicate_vertex());
    }

    #[test]
    fn vertex_usage() {
        let mut vertex = Vertex::new(Point3::new(1.0, 2.0, 3.0));
        assert!(!vertex.is_used());
        vertex.edges.push(e(0));
        assert!(vertex.is_used());
        assert_eq!(vertex.edges(), &[e(0)]);
    }
}
