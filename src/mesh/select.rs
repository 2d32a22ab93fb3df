//! Selection state and the index based selection API used by picking layers.

use crate::{
    error::Error,
    handle::{EdgeHandle, TriangleHandle, VertexHandle},
    math::{self, CenterRotationScale, Point3},
    selection::{SelectedElement, SelectionCache, SelectionMode},
};
use super::Mesh;


impl Mesh {
    pub fn selection_mode(&self) -> SelectionMode {
        self.cache.mode()
    }

    /// Switches to the given selection mode and rebuilds the selection cache.
    ///
    /// In triangle and edge mode, vertex selection is re-derived: all vertex
    /// flags are cleared, then the vertices of each selected triangle (or
    /// edge) are marked as selected. Code working on vertices (transforms,
    /// the selection center) can thus always look at vertex flags only.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        if mode != SelectionMode::Vertices {
            for vertex in self.vertices.values_mut() {
                vertex.selected = false;
            }
        }

        match mode {
            SelectionMode::Vertices => {}
            SelectionMode::Triangles => {
                let vertices = &mut self.vertices;
                for t in self.triangles.values().filter(|t| t.selected) {
                    for &v in &t.vertices {
                        vertices[v].selected = true;
                    }
                }
            }
            SelectionMode::Edges => {
                let vertices = &mut self.vertices;
                for e in self.edges.values().filter(|e| e.selected) {
                    for &v in &e.vertices {
                        vertices[v].selected = true;
                    }
                }
            }
        }

        self.cache = self.collect_selection_cache(mode);
    }

    /// Rebuilds the selection cache for the current mode. Every public method
    /// changing the set of elements calls this before returning.
    pub(crate) fn rebuild_selection_cache(&mut self) {
        self.set_selection_mode(self.selection_mode());
    }

    pub(crate) fn collect_selection_cache(&self, mode: SelectionMode) -> SelectionCache {
        match mode {
            SelectionMode::Vertices => SelectionCache::Vertices(self.vertices.handles().collect()),
            SelectionMode::Triangles => SelectionCache::Triangles(self.triangles.handles().collect()),
            SelectionMode::Edges => SelectionCache::Edges(self.edges.handles().collect()),
        }
    }

    /// Number of elements that can be selected in the current mode. Valid
    /// selection indices are `0..selectable_count()`.
    pub fn selectable_count(&self) -> usize {
        self.cache.len()
    }

    /// Number of selected elements of the kind addressed by the current
    /// selection mode.
    pub fn selected_count(&self) -> usize {
        (0..self.cache.len())
            .filter_map(|i| self.cache.get(i))
            .filter(|&elem| self.element_selected(elem))
            .count()
    }

    /// Returns the element at the given selection index.
    pub fn selected_element_at(&self, index: usize) -> Result<SelectedElement, Error> {
        self.cache.get(index).ok_or_else(|| Error::IndexOutOfRange {
            index,
            len: self.cache.len(),
            mode: self.selection_mode(),
        })
    }

    pub fn is_selected_at_index(&self, index: usize) -> Result<bool, Error> {
        self.selected_element_at(index).map(|elem| self.element_selected(elem))
    }

    /// Sets the selection flag of the element at the given index. In triangle
    /// and edge mode, the flag is also written to the element's vertices.
    pub fn set_selected_at_index(&mut self, selected: bool, index: usize) -> Result<(), Error> {
        let elem = self.selected_element_at(index)?;
        self.select_element(elem, selected);
        Ok(())
    }

    /// Panics if the vertex does not exist.
    pub fn select_vertex(&mut self, vh: VertexHandle, selected: bool) {
        self.vertices[vh].selected = selected;
    }

    /// Sets the flag of the triangle and of its three vertices. Panics if the
    /// triangle does not exist.
    pub fn select_triangle(&mut self, th: TriangleHandle, selected: bool) {
        let triangle = &mut self.triangles[th];
        triangle.selected = selected;
        for &v in &triangle.vertices {
            self.vertices[v].selected = selected;
        }
    }

    /// Sets the flag of the edge and of its two vertices. Panics if the edge
    /// does not exist.
    pub fn select_edge(&mut self, eh: EdgeHandle, selected: bool) {
        let edge = &mut self.edges[eh];
        edge.selected = selected;
        for &v in &edge.vertices {
            self.vertices[v].selected = selected;
        }
    }

    /// Sets the flag of every element addressed by the current mode.
    pub fn select_all(&mut self, selected: bool) {
        for i in 0..self.cache.len() {
            if let Some(elem) = self.cache.get(i) {
                self.select_element(elem, selected);
            }
        }
    }

    /// Inverts the flag of every element addressed by the current mode.
    ///
    /// In triangle and edge mode, vertex flags are re-derived afterwards: a
    /// vertex is selected iff it belongs to a selected triangle (or edge).
    pub fn invert_selection(&mut self) {
        for i in 0..self.cache.len() {
            if let Some(elem) = self.cache.get(i) {
                let selected = !self.element_selected(elem);
                match elem {
                    SelectedElement::Vertex(vh) => self.vertices[vh].selected = selected,
                    SelectedElement::Triangle(th) => self.triangles[th].selected = selected,
                    SelectedElement::Edge(eh) => self.edges[eh].selected = selected,
                }
            }
        }

        self.rebuild_selection_cache();
    }

    fn select_element(&mut self, elem: SelectedElement, selected: bool) {
        match elem {
            SelectedElement::Vertex(vh) => self.select_vertex(vh, selected),
            SelectedElement::Triangle(th) => self.select_triangle(th, selected),
            SelectedElement::Edge(eh) => self.select_edge(eh, selected),
        }
    }

    fn element_selected(&self, elem: SelectedElement) -> bool {
        match elem {
            SelectedElement::Vertex(vh) => self.vertices[vh].selected,
            SelectedElement::Triangle(th) => self.triangles[th].selected,
            SelectedElement::Edge(eh) => self.edges[eh].selected,
        }
    }

    pub(crate) fn selected_vertices(&self) -> Vec<VertexHandle> {
        self.vertices.handles_where(|v| v.selected)
    }

    pub(crate) fn selected_triangles(&self) -> Vec<TriangleHandle> {
        self.triangles.handles_where(|t| t.selected)
    }

    pub(crate) fn selected_edges(&self) -> Vec<EdgeHandle> {
        self.edges.handles_where(|e| e.selected)
    }

    /// Returns the center of all selected vertices (the origin if nothing is
    /// selected) together with an identity rotation and unit scale.
    ///
    /// Rotation and scale are not derived from the selection.
    pub fn selection_center_rotation_scale(&self) -> CenterRotationScale {
        let center = math::centroid(self.vertices.values().filter(|v| v.selected).map(|v| v.position))
            .unwrap_or_else(|| Point3::new(0.0, 0.0, 0.0));

        CenterRotationScale::around(center)
    }
}
