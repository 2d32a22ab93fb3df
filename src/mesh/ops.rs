//! Editing operations: transforming, merging, removing, flipping, turning,
//! extruding and splitting the current selection.
//!
//! All operations are no-ops when nothing suitable is selected. Every
//! operation that adds or removes elements reconciles the mesh before
//! returning (degenerate cleanup, unused vertex removal, selection cache
//! rebuild), so callers never observe dangling handles or a stale cache.

use fxhash::FxHashMap;
use tracing::{debug, trace};

use crate::{
    handle::{EdgeHandle, TriangleHandle, VertexHandle},
    math::{self, Matrix4},
    selection::SelectionMode,
};
use super::Mesh;




// ===============================================================================================
// ===== Transformations
// ===============================================================================================

impl Mesh {
    /// Applies `matrix` to the position of every vertex.
    pub fn transform_all(&mut self, matrix: &Matrix4) {
        for vertex in self.vertices.values_mut() {
            vertex.position = math::transform_point(matrix, vertex.position);
        }

        self.rebuild_selection_cache();
    }

    /// Applies `matrix` to the position of every selected vertex. In triangle
    /// and edge mode, these are the vertices of the selected triangles/edges.
    ///
    /// The set of elements does not change, so the selection cache stays as
    /// it is.
    pub fn transform_selected(&mut self, matrix: &Matrix4) {
        for vertex in self.vertices.values_mut().filter(|v| v.selected) {
            vertex.position = math::transform_point(matrix, vertex.position);
        }
    }
}


// ===============================================================================================
// ===== Merge
// ===============================================================================================

impl Mesh {
    /// Merges the selection. Only implemented for vertex mode; in the other
    /// modes this does nothing.
    pub fn merge_selected(&mut self) {
        match self.selection_mode() {
            SelectionMode::Vertices => self.merge_selected_vertices(),
            mode => trace!(%mode, "merging is only supported in vertex mode"),
        }
    }

    /// Merges all selected vertices into one new vertex at their centroid.
    ///
    /// Every edge and triangle referring to a merged vertex is repointed to
    /// the new vertex. Triangles and edges that collapse in the process are
    /// removed, as are all vertices that end up unused (this includes all
    /// merged vertices). Does nothing if fewer than two vertices are
    /// selected.
    pub fn merge_selected_vertices(&mut self) {
        let selected = self.selected_vertices();
        let center = math::centroid(selected.iter().map(|&vh| self.vertices[vh].position));
        let center = match center {
            Some(center) if selected.len() >= 2 => center,
            _ => {
                trace!(selected = selected.len(), "not enough selected vertices to merge");
                return;
            }
        };

        let merged = self.add_vertex_raw(center);

        for &vh in &selected {
            self.replace_vertex(vh, merged);
        }

        let removed_triangles = self.remove_degenerate_triangles();
        self.make_edges();
        let removed_vertices = self.remove_unused_vertices();
        self.rebuild_selection_cache();

        debug!(
            merged = selected.len(),
            removed_triangles,
            removed_vertices,
            "merged selected vertices"
        );
    }

    /// Repoints all edges and triangles from `old` to `new` and moves the
    /// back references over. Edge slots of repointed triangles are not
    /// updated; callers have to run `make_edges` afterwards.
    fn replace_vertex(&mut self, old: VertexHandle, new: VertexHandle) {
        let vertex = &mut self.vertices[old];
        let triangles = std::mem::take(&mut vertex.triangles);
        let edges = std::mem::take(&mut vertex.edges);

        for th in triangles {
            self.triangles[th].replace_vertex(old, new);
            if !self.vertices[new].triangles.contains(&th) {
                self.vertices[new].triangles.push(th);
            }
        }
        for eh in edges {
            self.edges[eh].replace_vertex(old, new);
            if !self.vertices[new].edges.contains(&eh) {
                self.vertices[new].edges.push(eh);
            }
        }
    }
}


// ===============================================================================================
// ===== Removal
// ===============================================================================================

impl Mesh {
    /// Removes the selected elements of the kind addressed by the current
    /// selection mode.
    pub fn remove_selected(&mut self) {
        match self.selection_mode() {
            SelectionMode::Vertices => self.remove_selected_vertices(),
            SelectionMode::Triangles => self.remove_selected_triangles(),
            SelectionMode::Edges => self.remove_selected_edges(),
        }
    }

    /// Removes all selected vertices, all edges and triangles using them and
    /// then all vertices left unused.
    pub fn remove_selected_vertices(&mut self) {
        let selected = self.selected_vertices();
        for &vh in &selected {
            self.remove_vertex_raw(vh);
        }

        let degenerate = self.remove_degenerate_triangles_and_edges();
        let unused = self.remove_unused_vertices();
        self.rebuild_selection_cache();

        debug!(removed = selected.len(), degenerate, unused, "removed selected vertices");
    }

    /// Removes all selected triangles, then all edges that are not part of a
    /// triangle anymore and finally all unused vertices.
    pub fn remove_selected_triangles(&mut self) {
        let selected = self.selected_triangles();
        for &th in &selected {
            self.remove_triangle_raw(th);
        }

        let degenerate = self.remove_degenerate_edges();
        let unused = self.remove_unused_vertices();
        self.rebuild_selection_cache();

        debug!(removed = selected.len(), degenerate, unused, "removed selected triangles");
    }

    /// Removes all selected edges together with the triangles they belong
    /// to. Edges and vertices left without triangles are removed as well.
    pub fn remove_selected_edges(&mut self) {
        let selected = self.selected_edges();
        for &eh in &selected {
            self.remove_edge_raw(eh);
        }

        // A triangle that lost an edge is degenerate. It has to be gone
        // before edges and vertices are checked for usage.
        let degenerate = self.remove_degenerate_triangles_and_edges();
        let unused = self.remove_unused_vertices();
        self.rebuild_selection_cache();

        debug!(removed = selected.len(), degenerate, unused, "removed selected edges");
    }
}


// ===============================================================================================
// ===== Flip and turn
// ===============================================================================================

impl Mesh {
    /// Triangle mode: flips the selected triangles. Edge mode: turns the
    /// selected edges. Vertex mode: does nothing.
    pub fn flip_selected(&mut self) {
        match self.selection_mode() {
            SelectionMode::Triangles => self.flip_selected_triangles(),
            SelectionMode::Edges => self.turn_selected_edges(),
            SelectionMode::Vertices => trace!("nothing to flip in vertex mode"),
        }
    }

    /// Reverses the winding order of every selected triangle. No element is
    /// added or removed.
    pub fn flip_selected_triangles(&mut self) {
        let mut flipped = 0;
        for triangle in self.triangles.values_mut().filter(|t| t.selected) {
            triangle.flip();
            flipped += 1;
        }

        debug!(flipped, "flipped selected triangles");
    }

    /// Turns every selected edge that is shared by exactly two consistently
    /// oriented triangles: the edge is replaced by the other diagonal of the
    /// quad formed by both triangles. Other selected edges are left as they
    /// are.
    pub fn turn_selected_edges(&mut self) {
        let selected = self.selected_edges();
        let turned = selected.iter().filter(|&&eh| self.turn_edge(eh)).count();

        self.make_edges();
        self.rebuild_selection_cache();

        debug!(selected = selected.len(), turned, "turned selected edges");
    }

    /// Turns a single edge. Returns `false` (and does nothing) if the edge
    /// cannot be turned.
    fn turn_edge(&mut self, eh: EdgeHandle) -> bool {
        //          Before           |            After
        //          ------           |            -----
        //                           |
        //            (C)            |             (C)
        //           /   ^           |            / | ^
        //          /     \          |           /  |  \
        //         /  [X]  \         |          /   |   \
        //        v         \        |         v    |    \
        //   (A) ----------> (B)     |   (A)  [X]   |  [Y]  (B)
        //        \         ^        |         \    |    ^
        //         \  [Y]  /         |          \   |   /
        //          \     /          |           \  |  /
        //           v   /           |            v v /
        //            (D)            |             (D)
        //
        // [X] = t_above, [Y] = t_below, (A) = v_left, (B) = v_right,
        // (C) = v_above, (D) = v_below. The turned edge keeps its handle.
        let (t_above, t_below) = match self.edges[eh].triangles.as_slice() {
            &[a, b] => (a, b),
            _ => {
                trace!(edge = ?eh, "edge is not shared by exactly two triangles, cannot turn");
                return false;
            }
        };

        let [a, b] = self.edges[eh].vertices;
        let (v_left, v_right) = self.triangles[t_above].sort_vertices(a, b);
        if self.triangles[t_below].sort_vertices(v_left, v_right) != (v_right, v_left) {
            trace!(edge = ?eh, "adjacent triangles are not consistently oriented, cannot turn");
            return false;
        }

        let v_above = self.triangles[t_above].opposite_vertex(v_left, v_right);
        let v_below = self.triangles[t_below].opposite_vertex(v_left, v_right);
        let (v_above, v_below) = match (v_above, v_below) {
            (Some(above), Some(below)) if above != below => (above, below),
            _ => return false,
        };
        if self.find_edge(v_above, v_below).is_some() {
            trace!(edge = ?eh, "turned edge would already exist, cannot turn");
            return false;
        }

        let e_above_left = self.edge_of_triangle(t_above, v_above, v_left);
        let e_above_right = self.edge_of_triangle(t_above, v_right, v_above);
        let e_below_left = self.edge_of_triangle(t_below, v_left, v_below);
        let e_below_right = self.edge_of_triangle(t_below, v_below, v_right);

        {
            let t = &mut self.triangles[t_above];
            t.vertices = [v_above, v_left, v_below];
            t.edges = [e_above_left, e_below_left, eh];
        }
        {
            let t = &mut self.triangles[t_below];
            t.vertices = [v_below, v_right, v_above];
            t.edges = [e_below_right, e_above_right, eh];
        }

        self.edges[eh].vertices = [v_above, v_below];
        replace_handle(&mut self.edges[e_below_left].triangles, t_below, t_above);
        replace_handle(&mut self.edges[e_above_right].triangles, t_above, t_below);

        self.vertices[v_left].triangles.retain(|t| *t != t_below);
        self.vertices[v_right].triangles.retain(|t| *t != t_above);
        self.vertices[v_above].triangles.push(t_below);
        self.vertices[v_below].triangles.push(t_above);

        self.vertices[v_left].edges.retain(|e| *e != eh);
        self.vertices[v_right].edges.retain(|e| *e != eh);
        self.vertices[v_above].edges.push(eh);
        self.vertices[v_below].edges.push(eh);

        true
    }

    fn edge_of_triangle(&self, th: TriangleHandle, a: VertexHandle, b: VertexHandle) -> EdgeHandle {
        let t = &self.triangles[th];
        match t.edge_slot(a, b) {
            Some(slot) => t.edges[slot],
            None => panic!("{:?} has no edge between {:?} and {:?}", th, a, b),
        }
    }
}

fn replace_handle<H: PartialEq + Copy>(handles: &mut [H], old: H, new: H) {
    for h in handles.iter_mut().filter(|h| **h == old) {
        *h = new;
    }
}


// ===============================================================================================
// ===== Extrude
// ===============================================================================================

impl Mesh {
    /// Extrudes the selection. Only implemented for triangle mode; in the
    /// other modes this does nothing.
    pub fn extrude_selected(&mut self) {
        match self.selection_mode() {
            SelectionMode::Triangles => self.extrude_selected_triangles(),
            mode => trace!(%mode, "extruding is only supported in triangle mode"),
        }
    }

    /// Extrudes the selected triangles.
    ///
    /// For every boundary edge (an edge with exactly one adjacent triangle) of
    /// a selected triangle, each endpoint gets an extruded twin vertex at the
    /// same position, and a quad connecting the original edge with the edge
    /// between both twins is added. Twins are created once per original
    /// vertex and shared between all boundary edges touching it. Finally, the
    /// selected triangles are moved onto the twins, so that they form a cap
    /// that can be translated away from the side quads.
    ///
    /// The side quads get the color index of the triangle they were extruded
    /// from and are not selected.
    pub fn extrude_selected_triangles(&mut self) {
        let selected = self.selected_triangles();

        // Collect the boundary edges first: adding quads changes adjacency.
        let mut boundary = Vec::new();
        for &th in &selected {
            let triangle = &self.triangles[th];
            for slot in 0..3 {
                if self.edges[triangle.edges[slot]].is_not_shared() {
                    let [original0, original1] = triangle.edge_vertices(slot);
                    boundary.push((original0, original1, triangle.color_index));
                }
            }
        }

        let mut twins = ExtrudeTwins::default();
        for &(original0, original1, color_index) in &boundary {
            let extruded0 = twins.find_or_create(self, original0);
            let extruded1 = twins.find_or_create(self, original1);

            let quad = self.add_quad_raw([original0, original1, extruded1, extruded0]);
            for &th in &quad {
                self.triangles[th].color_index = color_index;
            }
        }

        for &(original, twin) in &twins.pairs {
            self.replace_vertex_in_selected_triangles(original, twin);
        }

        self.make_edges();
        self.rebuild_selection_cache();

        debug!(
            triangles = selected.len(),
            boundary_edges = boundary.len(),
            new_vertices = twins.pairs.len(),
            "extruded selected triangles"
        );
    }

    /// Repoints all selected triangles using `original` to `twin`. Edge slots
    /// are fixed up later by `make_edges`.
    fn replace_vertex_in_selected_triangles(&mut self, original: VertexHandle, twin: VertexHandle) {
        let candidates = self.vertices[original].triangles.clone();
        for th in candidates {
            if self.triangles[th].selected && self.triangles[th].replace_vertex(original, twin) {
                self.vertices[original].triangles.retain(|t| *t != th);
                self.vertices[twin].triangles.push(th);
            }
        }
    }
}


/// The extruded twin of every original vertex touched by an extrusion, in
/// creation order.
#[derive(Default)]
struct ExtrudeTwins {
    pairs: Vec<(VertexHandle, VertexHandle)>,
    by_original: FxHashMap<VertexHandle, VertexHandle>,
}

impl ExtrudeTwins {
    fn find_or_create(&mut self, mesh: &mut Mesh, original: VertexHandle) -> VertexHandle {
        if let Some(&twin) = self.by_original.get(&original) {
            return twin;
        }

        let twin = mesh.add_vertex_raw(mesh.vertices[original].position);
        self.by_original.insert(original, twin);
        self.pairs.push((original, twin));
        twin
    }
}


// ===============================================================================================
// ===== Split
// ===============================================================================================

impl Mesh {
    /// Splits the selection. Splitting is not implemented for any element
    /// kind yet, so this never changes the mesh.
    pub fn split_selected(&mut self) {
        match self.selection_mode() {
            SelectionMode::Triangles => self.split_selected_triangles(),
            SelectionMode::Edges => self.split_selected_edges(),
            SelectionMode::Vertices => trace!("nothing to split in vertex mode"),
        }
    }

    /// Not implemented: leaves the mesh unchanged.
    pub fn split_selected_triangles(&mut self) {
        trace!("splitting triangles is not implemented");
    }

    /// Not implemented: leaves the mesh unchanged.
    pub fn split_selected_edges(&mut self) {
        trace!("splitting edges is not implemented");
    }
}
