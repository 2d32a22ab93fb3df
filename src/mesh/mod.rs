//! The [`Mesh`] type: element stores, construction, queries and the edge
//! adjacency bookkeeping.
//!
//! The selection API lives in `select.rs`, the topology changing editing
//! operations in `ops.rs`.

use std::fmt;

use fxhash::FxHashMap;

use crate::{
    elements::{edge_key, Edge, Triangle, Vertex},
    handle::{hsize, EdgeHandle, TriangleHandle, VertexHandle},
    math::Point3,
    selection::{SelectionCache, SelectionMode},
    store::{Handles, NodeList},
};


mod ops;
mod select;


/// The default color of a new mesh (opaque light gray).
pub const DEFAULT_COLOR: [f32; 4] = [0.7, 0.7, 0.7, 1.0];


/// A triangle mesh with explicit edges and per element selection state.
///
/// The mesh owns three stores (vertices, edges and triangles) and keeps
/// the following invariants between public method calls:
///
/// - Every handle stored inside an element refers to a live element.
/// - The vertices of each triangle are pairwise distinct and its edge in slot
///   `i` connects its vertices `i` and `(i + 1) % 3`.
/// - There is exactly one edge per unordered vertex pair used by a triangle,
///   and every edge belongs to at least one triangle.
/// - Back references (vertex → edges/triangles, edge → triangles) mirror the
///   forward references exactly.
/// - The selection cache lists all elements of the current selection mode in
///   store order.
///
/// [`Mesh::check_integrity`] verifies all of these.
#[derive(Clone)]
pub struct Mesh {
    vertices: NodeList<VertexHandle, Vertex>,
    edges: NodeList<EdgeHandle, Edge>,
    triangles: NodeList<TriangleHandle, Triangle>,
    cache: SelectionCache,
    color: [f32; 4],
}

impl Mesh {
    /// Creates an empty mesh in [`SelectionMode::Vertices`].
    pub fn new() -> Self {
        Self::with_color(DEFAULT_COLOR)
    }

    /// Creates an empty mesh with the given RGBA color.
    pub fn with_color(color: [f32; 4]) -> Self {
        Self {
            vertices: NodeList::new(),
            edges: NodeList::new(),
            triangles: NodeList::new(),
            cache: SelectionCache::empty(SelectionMode::default()),
            color,
        }
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("selection_mode", &self.selection_mode())
            .field("vertices", &self.vertices)
            .field("edges", &self.edges)
            .field("triangles", &self.triangles)
            .finish()
    }
}


// ===============================================================================================
// ===== Queries
// ===============================================================================================

impl Mesh {
    pub fn num_vertices(&self) -> hsize {
        self.vertices.len()
    }

    pub fn num_edges(&self) -> hsize {
        self.edges.len()
    }

    pub fn num_triangles(&self) -> hsize {
        self.triangles.len()
    }

    /// Returns `true` if the mesh has no vertices (and thus no edges or
    /// triangles either).
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over all vertex handles in creation order.
    pub fn vertex_handles(&self) -> Handles<'_, VertexHandle, Vertex> {
        self.vertices.handles()
    }

    /// Iterates over all edge handles in creation order.
    pub fn edge_handles(&self) -> Handles<'_, EdgeHandle, Edge> {
        self.edges.handles()
    }

    /// Iterates over all triangle handles in creation order.
    pub fn triangle_handles(&self) -> Handles<'_, TriangleHandle, Triangle> {
        self.triangles.handles()
    }

    pub fn vertex(&self, handle: VertexHandle) -> Option<&Vertex> {
        self.vertices.get(handle)
    }

    pub fn edge(&self, handle: EdgeHandle) -> Option<&Edge> {
        self.edges.get(handle)
    }

    pub fn triangle(&self, handle: TriangleHandle) -> Option<&Triangle> {
        self.triangles.get(handle)
    }

    pub fn contains_vertex(&self, handle: VertexHandle) -> bool {
        self.vertices.contains(handle)
    }

    pub fn contains_edge(&self, handle: EdgeHandle) -> bool {
        self.edges.contains(handle)
    }

    pub fn contains_triangle(&self, handle: TriangleHandle) -> bool {
        self.triangles.contains(handle)
    }

    /// Returns the position of the given vertex. Panics if the vertex does not
    /// exist.
    pub fn position(&self, handle: VertexHandle) -> Point3 {
        self.vertices[handle].position
    }

    /// Returns the edge connecting `a` and `b`, if there is one.
    pub fn find_edge(&self, a: VertexHandle, b: VertexHandle) -> Option<EdgeHandle> {
        self.vertices.get(a)?
            .edges
            .iter()
            .cloned()
            .find(|&eh| self.edges[eh].connects(a, b))
    }

    /// Sets the material/color index of a triangle. Panics if the triangle
    /// does not exist.
    pub fn set_color_index(&mut self, triangle: TriangleHandle, color_index: u32) {
        self.triangles[triangle].color_index = color_index;
    }
}


// ===============================================================================================
// ===== Construction
// ===============================================================================================

impl Mesh {
    /// Adds an isolated vertex at the given position.
    ///
    /// Note that isolated vertices count as unused and are removed by the
    /// cleanup step of the next removing or merging operation.
    pub fn add_vertex(&mut self, position: Point3) -> VertexHandle {
        let vh = self.add_vertex_raw(position);
        self.rebuild_selection_cache();
        vh
    }

    /// Adds a triangle with the given vertices in counter clockwise order.
    /// Edges that do not exist yet are created.
    ///
    /// Panics if the vertices are not pairwise distinct or one of them does
    /// not exist.
    pub fn add_triangle(&mut self, vertices: [VertexHandle; 3]) -> TriangleHandle {
        let th = self.add_triangle_raw(vertices);
        self.rebuild_selection_cache();
        th
    }

    /// Adds the quad `[a, b, c, d]` (counter clockwise) as the two triangles
    /// `[a, b, c]` and `[a, c, d]`.
    pub fn add_quad(&mut self, vertices: [VertexHandle; 4]) -> [TriangleHandle; 2] {
        let out = self.add_quad_raw(vertices);
        self.rebuild_selection_cache();
        out
    }

    pub(crate) fn add_vertex_raw(&mut self, position: Point3) -> VertexHandle {
        self.vertices.push(Vertex::new(position))
    }

    pub(crate) fn add_triangle_raw(&mut self, vertices: [VertexHandle; 3]) -> TriangleHandle {
        let [a, b, c] = vertices;
        assert!(
            a != b && b != c && a != c,
            "vertices of new triangle are not unique: {:?}",
            vertices,
        );
        for &v in &vertices {
            assert!(self.vertices.contains(v), "vertex {:?} of new triangle does not exist", v);
        }

        let edges = [
            self.find_or_add_edge(a, b),
            self.find_or_add_edge(b, c),
            self.find_or_add_edge(c, a),
        ];
        let th = self.triangles.push(Triangle::new(vertices, edges));

        for &v in &vertices {
            self.vertices[v].triangles.push(th);
        }
        for &eh in &edges {
            self.edges[eh].triangles.push(th);
        }

        th
    }

    pub(crate) fn add_quad_raw(&mut self, [a, b, c, d]: [VertexHandle; 4]) -> [TriangleHandle; 2] {
        [
            self.add_triangle_raw([a, b, c]),
            self.add_triangle_raw([a, c, d]),
        ]
    }

    fn find_or_add_edge(&mut self, a: VertexHandle, b: VertexHandle) -> EdgeHandle {
        if let Some(eh) = self.find_edge(a, b) {
            return eh;
        }

        let eh = self.edges.push(Edge::new([a, b]));
        self.vertices[a].edges.push(eh);
        self.vertices[b].edges.push(eh);
        eh
    }
}


// ===============================================================================================
// ===== Raw removal and cleanup
// ===============================================================================================
//
// The `remove_*_raw` methods only unlink the removed element from the back
// references of *live* elements. Forward references of other elements to the
// removed one may dangle afterwards; the `remove_degenerate_*` passes below
// take care of those. Every public method runs the passes in this order:
//
//   mutate → degenerate triangles → degenerate edges → unused vertices → cache

impl Mesh {
    fn remove_vertex_raw(&mut self, vh: VertexHandle) {
        self.vertices.remove(vh);
    }

    fn remove_edge_raw(&mut self, eh: EdgeHandle) {
        if let Some(edge) = self.edges.remove(eh) {
            for &v in &edge.vertices {
                if let Some(vertex) = self.vertices.get_mut(v) {
                    vertex.edges.retain(|e| *e != eh);
                }
            }
        }
    }

    fn remove_triangle_raw(&mut self, th: TriangleHandle) {
        if let Some(triangle) = self.triangles.remove(th) {
            for &v in &triangle.vertices {
                if let Some(vertex) = self.vertices.get_mut(v) {
                    vertex.triangles.retain(|t| *t != th);
                }
            }
            for &eh in &triangle.edges {
                if let Some(edge) = self.edges.get_mut(eh) {
                    edge.triangles.retain(|t| *t != th);
                }
            }
        }
    }

    /// A triangle is degenerate if two of its vertex handles are equal or one
    /// of its vertices or edges does not exist anymore.
    ///
    /// This only compares handles. Geometrically degenerate triangles (e.g.
    /// three colinear or coincident positions) are kept.
    fn is_degenerate_triangle(&self, triangle: &Triangle) -> bool {
        triangle.has_duplicate_vertex()
            || triangle.vertices.iter().any(|&v| !self.vertices.contains(v))
            || triangle.edges.iter().any(|&e| !self.edges.contains(e))
    }

    /// An edge is degenerate if both its vertex handles are equal, one of its
    /// vertices does not exist anymore or it is not part of any triangle.
    fn is_degenerate_edge(&self, edge: &Edge) -> bool {
        edge.has_duplicate_vertex()
            || edge.triangles.is_empty()
            || edge.vertices.iter().any(|&v| !self.vertices.contains(v))
    }

    pub(crate) fn remove_degenerate_triangles(&mut self) -> usize {
        let degenerate = self.triangles.handles_where(|t| self.is_degenerate_triangle(t));
        for &th in &degenerate {
            self.remove_triangle_raw(th);
        }
        degenerate.len()
    }

    pub(crate) fn remove_degenerate_edges(&mut self) -> usize {
        let degenerate = self.edges.handles_where(|e| self.is_degenerate_edge(e));
        for &eh in &degenerate {
            self.remove_edge_raw(eh);
        }
        degenerate.len()
    }

    pub(crate) fn remove_degenerate_triangles_and_edges(&mut self) -> usize {
        self.remove_degenerate_triangles() + self.remove_degenerate_edges()
    }

    pub(crate) fn remove_unused_vertices(&mut self) -> usize {
        let unused = self.vertices.handles_where(|v| !v.is_used());
        for &vh in &unused {
            self.remove_vertex_raw(vh);
        }
        unused.len()
    }
}


// ===============================================================================================
// ===== Edge re-derivation
// ===============================================================================================

impl Mesh {
    /// Re-derives the edge store from the triangle store.
    ///
    /// Afterwards there is exactly one edge per unordered vertex pair used by
    /// some triangle. Existing edges for such a pair are kept (with their
    /// handle and selection state); if several exist, the oldest one wins.
    /// All other edges are removed and missing ones are appended. Triangle
    /// edge slots, edge adjacency and vertex → edge back references are all
    /// rebuilt.
    ///
    /// Must not be called while degenerate triangles exist.
    pub(crate) fn make_edges(&mut self) {
        let mut by_key = FxHashMap::default();
        for (eh, edge) in self.edges.iter() {
            by_key.entry(edge.key()).or_insert(eh);
        }

        for edge in self.edges.values_mut() {
            edge.triangles.clear();
        }
        for vertex in self.vertices.values_mut() {
            vertex.edges.clear();
        }

        let triangles: Vec<_> = self.triangles.handles().collect();
        for th in triangles {
            debug_assert!(!self.is_degenerate_triangle(&self.triangles[th]));

            for slot in 0..3 {
                let [a, b] = self.triangles[th].edge_vertices(slot);
                let edges = &mut self.edges;
                let eh = *by_key.entry(edge_key(a, b)).or_insert_with(|| edges.push(Edge::new([a, b])));

                self.edges[eh].triangles.push(th);
                self.triangles[th].edges[slot] = eh;
            }
        }

        let orphaned = self.edges.handles_where(|e| e.triangles.is_empty());
        for eh in orphaned {
            self.edges.remove(eh);
        }

        let vertices = &mut self.vertices;
        for (eh, edge) in self.edges.iter() {
            for &v in &edge.vertices {
                vertices[v].edges.push(eh);
            }
        }
    }
}


// ===============================================================================================
// ===== Integrity check
// ===============================================================================================

impl Mesh {
    /// Checks all invariants of this mesh and panics with a descriptive
    /// message if one of them is violated. This is slow and mostly useful
    /// for tests and debugging.
    pub fn check_integrity(&self) {
        for (th, t) in self.triangles.iter() {
            assert!(!t.has_duplicate_vertex(), "{:?} has duplicate vertices {:?}", th, t.vertices);
            for &v in &t.vertices {
                let vertex = self.vertices.get(v)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", th, v));
                assert!(
                    vertex.triangles.contains(&th),
                    "{:?} is not registered at its vertex {:?}",
                    th, v,
                );
            }
            for slot in 0..3 {
                let eh = t.edges[slot];
                let edge = self.edges.get(eh)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", th, eh));
                let [a, b] = t.edge_vertices(slot);
                assert!(
                    edge.connects(a, b),
                    "edge {:?} in slot {} of {:?} does not connect {:?} and {:?}",
                    eh, slot, th, a, b,
                );
                assert!(edge.triangles.contains(&th), "{:?} is not registered at {:?}", th, eh);
            }
        }

        let mut keys = FxHashMap::default();
        for (eh, e) in self.edges.iter() {
            assert!(!e.has_duplicate_vertex(), "{:?} connects a vertex with itself", eh);
            assert!(!e.triangles.is_empty(), "{:?} is not part of any triangle", eh);
            if let Some(other) = keys.insert(e.key(), eh) {
                panic!("{:?} and {:?} connect the same vertices", other, eh);
            }
            for &v in &e.vertices {
                let vertex = self.vertices.get(v)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", eh, v));
                assert!(vertex.edges.contains(&eh), "{:?} is not registered at {:?}", eh, v);
            }
            for &th in &e.triangles {
                let t = self.triangles.get(th)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", eh, th));
                assert!(t.edges.contains(&eh), "{:?} lists {:?}, but not vice versa", eh, th);
            }
        }

        for (vh, v) in self.vertices.iter() {
            for &eh in &v.edges {
                let e = self.edges.get(eh)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", vh, eh));
                assert!(e.vertices.contains(&vh), "{:?} lists {:?}, but not vice versa", vh, eh);
            }
            for &th in &v.triangles {
                let t = self.triangles.get(th)
                    .unwrap_or_else(|| panic!("{:?} refers to non-existing {:?}", vh, th));
                assert!(t.contains_vertex(vh), "{:?} lists {:?}, but not vice versa", vh, th);
            }
        }

        let expected = self.collect_selection_cache(self.selection_mode());
        assert_eq!(self.cache, expected, "selection cache is stale");
    }
}
