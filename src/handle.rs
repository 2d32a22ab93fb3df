//! Handles to refer to the elements of a [`Mesh`][crate::Mesh].
//!
//! A handle is just a strongly typed index into one of the mesh's element
//! stores. Handles are only meaningful together with the mesh that created
//! them. A handle stays valid until the element it refers to is removed;
//! removing other elements never invalidates it.

use std::{fmt, hash::Hash};

use static_assertions::assert_eq_size;


/// The integer type used as index inside all handles.
///
/// This is `u32` by default. With the `large-handle` feature enabled, this is
/// `u64` instead, which allows for meshes with more than 4 billion elements
/// of one kind.
#[cfg(not(feature = "large-handle"))]
#[allow(non_camel_case_types)]
pub type hsize = u32;

#[cfg(feature = "large-handle")]
#[allow(non_camel_case_types)]
pub type hsize = u64;


/// Types that can be used to refer to some element in a mesh.
pub trait Handle: 'static + Copy + fmt::Debug + Eq + Ord + Hash {
    /// Creates a handle from the given index.
    fn new(idx: hsize) -> Self;

    /// Returns the index of this handle.
    fn idx(&self) -> hsize;

    /// Helper method to create a handle directly from a `usize`.
    ///
    /// Panics if `raw` does not fit into `hsize`.
    #[inline(always)]
    fn from_usize(raw: usize) -> Self {
        assert!(
            raw <= hsize::max_value() as usize,
            "handle index {} does not fit into `hsize` (enable the `large-handle` feature)",
            raw,
        );

        Self::new(raw as hsize)
    }

    /// Helper method to get the index as `usize` directly from a handle.
    #[inline(always)]
    fn to_usize(&self) -> usize {
        self.idx() as usize
    }
}

macro_rules! make_handle_type {
    ($(#[$attr:meta])* $name:ident = $short:expr;) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(hsize);

        impl Handle for $name {
            #[inline(always)]
            fn new(id: hsize) -> Self {
                $name(id)
            }

            #[inline(always)]
            fn idx(&self) -> hsize {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}{}", $short, self.idx())
            }
        }
    }
}

make_handle_type! {
    /// A handle that is associated with a vertex.
    VertexHandle = "V";
}
make_handle_type! {
    /// A handle that is associated with an edge.
    EdgeHandle = "E";
}
make_handle_type! {
    /// A handle that is associated with a triangle.
    TriangleHandle = "T";
}

assert_eq_size!(VertexHandle, hsize);
assert_eq_size!(EdgeHandle, hsize);
assert_eq_size!(TriangleHandle, hsize);


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", VertexHandle::new(3)), "V3");
        assert_eq!(format!("{:?}", EdgeHandle::new(0)), "E0");
        assert_eq!(format!("{:?}", TriangleHandle::new(27)), "T27");
    }

    #[test]
    fn usize_conversion() {
        let h = TriangleHandle::from_usize(12);
        assert_eq!(h.idx(), 12);
        assert_eq!(h.to_usize(), 12);
    }

    #[test]
    #[cfg(not(feature = "large-handle"))]
    #[should_panic(expected = "does not fit")]
    fn too_large_index() {
        VertexHandle::from_usize(u32::max_value() as usize + 1);
    }
}
