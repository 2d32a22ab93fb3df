//! Selection modes and the cached list of selectable elements.

use std::fmt;

use crate::handle::{EdgeHandle, TriangleHandle, VertexHandle};


/// The kind of element the index based selection API currently addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    Vertices,
    Triangles,
    Edges,
}

impl Default for SelectionMode {
    fn default() -> Self {
        SelectionMode::Vertices
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SelectionMode::Vertices => "vertices",
            SelectionMode::Triangles => "triangles",
            SelectionMode::Edges => "edges",
        }.fmt(f)
    }
}

/// All selectable elements of the active selection mode, in store order.
///
/// This is a derived view over the mesh stores and never the source of truth
/// for selection state: the flags live on the elements. The mesh rebuilds
/// this cache whenever the set of elements changes, so that a selection index
/// handed out to a picking layer always refers to the same element until the
/// next structural edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectionCache {
    Vertices(Vec<VertexHandle>),
    Triangles(Vec<TriangleHandle>),
    Edges(Vec<EdgeHandle>),
}

/// A single entry of the selection cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedElement {
    Vertex(VertexHandle),
    Triangle(TriangleHandle),
    Edge(EdgeHandle),
}

impl SelectionCache {
    pub(crate) fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Vertices => SelectionCache::Vertices(Vec::new()),
            SelectionMode::Triangles => SelectionCache::Triangles(Vec::new()),
            SelectionMode::Edges => SelectionCache::Edges(Vec::new()),
        }
    }

    pub(crate) fn mode(&self) -> SelectionMode {
        match self {
            SelectionCache::Vertices(_) => SelectionMode::Vertices,
            SelectionCache::Triangles(_) => SelectionMode::Triangles,
            SelectionCache::Edges(_) => SelectionMode::Edges,
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            SelectionCache::Vertices(v) => v.len(),
            SelectionCache::Triangles(v) => v.len(),
            SelectionCache::Edges(v) => v.len(),
        }
    }

    pub(crate) fn get(&self, index: usize) -> Option<SelectedElement> {
        match self {
            SelectionCache::Vertices(v) => v.get(index).map(|&h| SelectedElement::Vertex(h)),
            SelectionCache::Triangles(v) => v.get(index).map(|&h| SelectedElement::Triangle(h)),
            SelectionCache::Edges(v) => v.get(index).map(|&h| SelectedElement::Edge(h)),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::Handle;

    #[test]
    fn display() {
        assert_eq!(SelectionMode::Vertices.to_string(), "vertices");
        assert_eq!(SelectionMode::Triangles.to_string(), "triangles");
        assert_eq!(SelectionMode::Edges.to_string(), "edges");
    }

    #[test]
    fn cache_lookup() {
        let cache = SelectionCache::Edges(vec![EdgeHandle::new(4), EdgeHandle::new(9)]);
        assert_eq!(cache.mode(), SelectionMode::Edges);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(1), Some(SelectedElement::Edge(EdgeHandle::new(9))));
        assert_eq!(cache.get(2), None);

        let empty = SelectionCache::empty(SelectionMode::Triangles);
        assert_eq!(empty.mode(), SelectionMode::Triangles);
        assert_eq!(empty.len(), 0);
    }
}
