//! Small hand built meshes shared by the unit tests.

use crate::{
    handle::{TriangleHandle, VertexHandle},
    math::Point3,
    mesh::Mesh,
};


pub(crate) fn p(x: f32, y: f32, z: f32) -> Point3 {
    Point3::new(x, y, z)
}

/// A single triangle.
///
/// ```text
///     c
///     | \
///     |   \
///     a --- b
/// ```
pub(crate) struct SingleTriangle {
    pub mesh: Mesh,
    pub a: VertexHandle,
    pub b: VertexHandle,
    pub c: VertexHandle,
    pub t: TriangleHandle,
}

pub(crate) fn single_triangle() -> SingleTriangle {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let t = mesh.add_triangle([a, b, c]);

    SingleTriangle { mesh, a, b, c, t }
}

/// A unit square split along the diagonal `a-c`.
///
/// ```text
///     d --- c
///     |  Y/ |
///     | / X |
///     a --- b
/// ```
pub(crate) struct Quad {
    pub mesh: Mesh,
    pub a: VertexHandle,
    pub b: VertexHandle,
    pub c: VertexHandle,
    pub d: VertexHandle,
    pub x: TriangleHandle,
    pub y: TriangleHandle,
}

pub(crate) fn quad() -> Quad {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(1.0, 1.0, 0.0));
    let d = mesh.add_vertex(p(0.0, 1.0, 0.0));
    let [x, y] = mesh.add_quad([a, b, c, d]);

    Quad { mesh, a, b, c, d, x, y }
}

/// Three triangles around `c`: `t = [a, b, c]` in the middle, `n1` sharing
/// edge `b-c` and `n2` sharing edge `c-a`. Only `a-b` is a boundary edge of
/// `t`.
///
/// ```text
///     e --- c --- d
///      \ n2/ \ n1/
///       \ / t \ /
///        a --- b
/// ```
pub(crate) struct Fan {
    pub mesh: Mesh,
    pub a: VertexHandle,
    pub b: VertexHandle,
    pub c: VertexHandle,
    pub t: TriangleHandle,
    pub n1: TriangleHandle,
    pub n2: TriangleHandle,
}

pub(crate) fn fan() -> Fan {
    let mut mesh = Mesh::new();
    let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
    let b = mesh.add_vertex(p(2.0, 0.0, 0.0));
    let c = mesh.add_vertex(p(1.0, 2.0, 0.0));
    let d = mesh.add_vertex(p(3.0, 2.0, 0.0));
    let e = mesh.add_vertex(p(-1.0, 2.0, 0.0));
    let t = mesh.add_triangle([a, b, c]);
    let n1 = mesh.add_triangle([c, b, d]);
    let n2 = mesh.add_triangle([a, c, e]);

    Fan { mesh, a, b, c, t, n1, n2 }
}
