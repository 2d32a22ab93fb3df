//! The topology and selection core of an interactive triangle mesh editor.
//!
//! A [`Mesh`] stores vertices, edges and triangles in three stores and keeps
//! them consistent across destructive edits: merging vertices, removing
//! elements, flipping triangles, turning edges and extruding triangles. Every
//! element carries a selection flag. What "the selection" means depends on
//! the current [`SelectionMode`]: the index based selection API
//! ([`Mesh::set_selected_at_index`] and friends) addresses vertices, triangles
//! or edges in creation order, which is what an external picking layer needs
//! to map a picked color index back to an element.
//!
//! Rendering, file formats and undo are not part of this crate.
//!
//! ```
//! use editmesh::{prelude::*, shape::Cube};
//!
//! let mut mesh = Cube::default().build();
//! mesh.set_selection_mode(SelectionMode::Triangles);
//! mesh.set_selected_at_index(true, 0).unwrap();
//! mesh.remove_selected();
//!
//! assert_eq!(mesh.num_triangles(), 11);
//! mesh.check_integrity();
//! ```

pub mod elements;
pub mod handle;
pub mod math;
pub mod selection;
pub mod shape;
pub mod store;

mod error;
mod mesh;

#[cfg(test)]
mod test_utils;

pub use self::{
    error::Error,
    handle::{hsize, EdgeHandle, Handle, TriangleHandle, VertexHandle},
    mesh::{Mesh, DEFAULT_COLOR},
    selection::{SelectedElement, SelectionMode},
};


/// Reexports the most commonly used items.
pub mod prelude {
    pub use crate::{
        Mesh, SelectionMode,
        handle::{Handle, EdgeHandle, TriangleHandle, VertexHandle},
        shape::Shape,
    };
}
