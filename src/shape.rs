//! Simple primitive shapes to seed a mesh with.
//!
//! All shapes produce counter clockwise wound triangles (looking at the front
//! side). Closed shapes have their front side facing outwards.

use std::f32::consts::PI;

use crate::{
    math::{Point3, Vector3},
    mesh::Mesh,
};


/// Something that can add its geometry to a mesh.
pub trait Shape {
    /// Adds the vertices and triangles of this shape to `mesh`. Existing
    /// elements of the mesh are not touched.
    fn add_to(self, mesh: &mut Mesh);

    /// Creates a new mesh containing only this shape.
    fn build(self) -> Mesh
    where
        Self: Sized,
    {
        let mut mesh = Mesh::new();
        self.add_to(&mut mesh);
        mesh
    }
}


/// A flat round disc that lies in the XY-plane and which normals point upwards
/// (+z).
#[derive(Debug, Clone)]
pub struct Disc {
    /// The number of triangles generated for the disc. Has to be at least 3
    /// or else adding the disc will panic. *Default*: 16.
    pub faces: u32,

    /// The center point of the disc. *Default*: `[0, 0, 0]`.
    pub center: Point3,

    /// The outer radius (with ∞ faces, this would be the real radius).
    /// *Default*: 1.0.
    pub radius: f32,
}

impl Default for Disc {
    fn default() -> Self {
        Self {
            faces: 16,
            center: Point3::new(0.0, 0.0, 0.0),
            radius: 1.0,
        }
    }
}

impl Shape for Disc {
    fn add_to(self, mesh: &mut Mesh) {
        assert!(
            self.faces >= 3,
            "trying to build a disc with {} faces (minimum is 3)",
            self.faces,
        );

        // Vertices are created counter clockwise around the center, the first
        // outer one at [r, 0, 0]. Looking top down onto the disc:
        //
        //      3 _
        //      |   ‾ – _
        //      |         2
        //      |  B    ⋰  \
        //      |     ⋰     \
        //      |   ⋰   A    \
        //      | ⋰           \
        //      0 ------------ 1
        //
        // Vertex 0 is the center, triangle A is the first one.
        let center = mesh.add_vertex_raw(self.center);
        let first = mesh.add_vertex_raw(self.center + Vector3::new(self.radius, 0.0, 0.0));
        let mut last = first;

        for i in 1..self.faces {
            let angle = (i as f32 / self.faces as f32) * 2.0 * PI;
            let position = self.center + Vector3::new(
                self.radius * angle.cos(),
                self.radius * angle.sin(),
                0.0,
            );

            let v = mesh.add_vertex_raw(position);
            mesh.add_triangle_raw([center, last, v]);
            last = v;
        }

        mesh.add_triangle_raw([center, last, first]);
        mesh.rebuild_selection_cache();
    }
}


/// A square made of two triangles, lying in the XZ-plane centered around the
/// origin, front side facing up (+y).
#[derive(Debug, Clone)]
pub struct Plane {
    /// Length of each side. *Default*: 1.0.
    pub size: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl Shape for Plane {
    fn add_to(self, mesh: &mut Mesh) {
        let h = self.size / 2.0;
        let corners = [
            mesh.add_vertex_raw(Point3::new(-h, 0.0, -h)),
            mesh.add_vertex_raw(Point3::new(-h, 0.0, h)),
            mesh.add_vertex_raw(Point3::new(h, 0.0, h)),
            mesh.add_vertex_raw(Point3::new(h, 0.0, -h)),
        ];
        mesh.add_quad_raw(corners);
        mesh.rebuild_selection_cache();
    }
}


/// An axis aligned cube centered around the origin, made of 12 triangles.
#[derive(Debug, Clone)]
pub struct Cube {
    /// Length of each side. *Default*: 1.0.
    pub size: f32,
}

impl Default for Cube {
    fn default() -> Self {
        Self { size: 1.0 }
    }
}

impl Shape for Cube {
    fn add_to(self, mesh: &mut Mesh) {
        //
        //        3 -------- 2
        //       /|         /|         y
        //      / |        / |         |
        //     7 -------- 6  |         o-- x
        //     |  0 ------|- 1        /
        //     | /        | /        z
        //     |/         |/
        //     4 -------- 5
        //
        let h = self.size / 2.0;
        let mut v = Vec::with_capacity(8);
        for &z in &[-h, h] {
            for &(x, y) in &[(-h, -h), (h, -h), (h, h), (-h, h)] {
                v.push(mesh.add_vertex_raw(Point3::new(x, y, z)));
            }
        }

        mesh.add_quad_raw([v[0], v[3], v[2], v[1]]); // -z
        mesh.add_quad_raw([v[4], v[5], v[6], v[7]]); // +z
        mesh.add_quad_raw([v[0], v[1], v[5], v[4]]); // -y
        mesh.add_quad_raw([v[3], v[7], v[6], v[2]]); // +y
        mesh.add_quad_raw([v[0], v[4], v[7], v[3]]); // -x
        mesh.add_quad_raw([v[1], v[2], v[6], v[5]]); // +x
        mesh.rebuild_selection_cache();
    }
}


/// A closed cylinder along the y axis, centered around the origin. The side
/// is made of `steps` quads, each cap of `steps` triangles fanning out from a
/// center vertex.
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// Number of segments around the axis. Has to be at least 3 or else
    /// adding the cylinder will panic. *Default*: 16.
    pub steps: u32,

    /// *Default*: 1.0.
    pub radius: f32,

    /// Distance between both caps. *Default*: 1.0.
    pub height: f32,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            steps: 16,
            radius: 1.0,
            height: 1.0,
        }
    }
}

impl Shape for Cylinder {
    fn add_to(self, mesh: &mut Mesh) {
        assert!(
            self.steps >= 3,
            "trying to build a cylinder with {} steps (minimum is 3)",
            self.steps,
        );

        let h = self.height / 2.0;
        let bottom_center = mesh.add_vertex_raw(Point3::new(0.0, -h, 0.0));
        let top_center = mesh.add_vertex_raw(Point3::new(0.0, h, 0.0));

        let rings: Vec<_> = ring_points(self.steps, self.radius)
            .map(|(x, z)| (
                mesh.add_vertex_raw(Point3::new(x, -h, z)),
                mesh.add_vertex_raw(Point3::new(x, h, z)),
            ))
            .collect();

        for i in 0..rings.len() {
            let (b0, t0) = rings[i];
            let (b1, t1) = rings[(i + 1) % rings.len()];

            mesh.add_quad_raw([b0, t0, t1, b1]);
            mesh.add_triangle_raw([top_center, t1, t0]);
            mesh.add_triangle_raw([bottom_center, b0, b1]);
        }

        mesh.rebuild_selection_cache();
    }
}


/// A UV sphere centered around the origin with its poles on the y axis.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Number of bands from pole to pole. Has to be at least 2. *Default*: 8.
    pub num_latitudes: u32,

    /// Number of segments around the y axis. Has to be at least 3.
    /// *Default*: 16.
    pub num_longitudes: u32,

    /// *Default*: 1.0.
    pub radius: f32,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            num_latitudes: 8,
            num_longitudes: 16,
            radius: 1.0,
        }
    }
}

impl Shape for Sphere {
    fn add_to(self, mesh: &mut Mesh) {
        assert!(
            self.num_latitudes >= 2,
            "trying to build a sphere with {} latitudes (minimum is 2)",
            self.num_latitudes,
        );
        assert!(
            self.num_longitudes >= 3,
            "trying to build a sphere with {} longitudes (minimum is 3)",
            self.num_longitudes,
        );

        let north = mesh.add_vertex_raw(Point3::new(0.0, self.radius, 0.0));
        let south = mesh.add_vertex_raw(Point3::new(0.0, -self.radius, 0.0));

        // Rings from north to south, without the poles.
        let rings: Vec<Vec<_>> = (1..self.num_latitudes)
            .map(|j| {
                let theta = (j as f32 / self.num_latitudes as f32) * PI;
                let y = self.radius * theta.cos();
                ring_points(self.num_longitudes, self.radius * theta.sin())
                    .map(|(x, z)| mesh.add_vertex_raw(Point3::new(x, y, z)))
                    .collect()
            })
            .collect();

        let n = self.num_longitudes as usize;
        for i in 0..n {
            let next = (i + 1) % n;

            for pair in rings.windows(2) {
                let (upper, lower) = (&pair[0], &pair[1]);
                mesh.add_quad_raw([lower[i], upper[i], upper[next], lower[next]]);
            }

            // `rings` has at least one entry.
            let (first, last) = (&rings[0], &rings[rings.len() - 1]);
            mesh.add_triangle_raw([north, first[next], first[i]]);
            mesh.add_triangle_raw([south, last[i], last[next]]);
        }

        mesh.rebuild_selection_cache();
    }
}


/// A regular icosahedron centered around the origin: 12 vertices and 20
/// triangles.
#[derive(Debug, Clone)]
pub struct Icosahedron {
    /// Distance of all vertices to the origin. *Default*: 1.0.
    pub radius: f32,
}

impl Default for Icosahedron {
    fn default() -> Self {
        Self { radius: 1.0 }
    }
}

impl Shape for Icosahedron {
    fn add_to(self, mesh: &mut Mesh) {
        use cgmath::InnerSpace;

        // Corners of three orthogonal golden rectangles.
        let t = (1.0 + 5f32.sqrt()) / 2.0;
        let corners = [
            (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
            (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
            (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
        ];
        const FACES: [[usize; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        let v: Vec<_> = corners.iter()
            .map(|&(x, y, z)| {
                let dir = Vector3::new(x, y, z).normalize_to(self.radius);
                mesh.add_vertex_raw(Point3::new(dir.x, dir.y, dir.z))
            })
            .collect();

        for &[a, b, c] in FACES.iter() {
            mesh.add_triangle_raw([v[a], v[b], v[c]]);
        }

        mesh.rebuild_selection_cache();
    }
}

/// Yields `steps` points `(x, z)` on a circle in the XZ-plane, starting at
/// `[radius, 0]` and going from +x towards +z.
fn ring_points(steps: u32, radius: f32) -> impl Iterator<Item = (f32, f32)> {
    (0..steps).map(move |i| {
        let angle = (i as f32 / steps as f32) * 2.0 * PI;
        (radius * angle.cos(), radius * angle.sin())
    })
}
