//! Owned triangle storage.
//!
//! The polygonizer only lends its vertex slots for the duration of an `emit`
//! call. [`TriangleMesh`] is the sink that copies them out.

use isomesh_core::{Point3, TriangleSink, Vector3};

/// A triangle represented by three vertices, in emission (winding) order.
pub type Triangle = [Point3; 3];

/// Triangles and their cube normals, in the order they were emitted.
///
/// `normals()[i]` is the normal that came with `triangles()[i]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    triangles: Vec<Triangle>,
    normals: Vec<Vector3>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for `capacity` triangles.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            normals: Vec::with_capacity(capacity),
        }
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// True if no triangle has been collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Drop all triangles, keeping the allocation.
    pub fn clear(&mut self) {
        self.triangles.clear();
        self.normals.clear();
    }

    /// Collected triangles.
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Per-triangle normals.
    #[inline]
    pub fn normals(&self) -> &[Vector3] {
        &self.normals
    }

    /// Iterate over `(triangle, normal)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&Triangle, &Vector3)> + '_ {
        self.triangles.iter().zip(self.normals.iter())
    }

    /// Append every triangle of `other`.
    pub fn append(&mut self, other: &mut TriangleMesh) {
        self.triangles.append(&mut other.triangles);
        self.normals.append(&mut other.normals);
    }
}

impl TriangleSink for TriangleMesh {
    #[inline]
    fn emit(&mut self, a: &Point3, b: &Point3, c: &Point3, normal: &Vector3) {
        self.triangles.push([*a, *b, *c]);
        self.normals.push(*normal);
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices (triangle_count * 3).
    pub vertex_count: usize,
    /// Approximate surface area (sum of triangle areas).
    pub surface_area: f32,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics for a mesh.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        Self::from_triangles(mesh.triangles())
    }

    /// Compute statistics from a set of triangles.
    ///
    /// An empty set yields an inverted bounding box (`bbox_min` at `f32::MAX`).
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        let triangle_count = triangles.len();
        let vertex_count = triangle_count * 3;

        let mut surface_area = 0.0;
        let mut bbox_min = Point3::splat(f32::MAX);
        let mut bbox_max = Point3::splat(f32::MIN);

        for tri in triangles {
            for &v in tri {
                bbox_min = bbox_min.min(v);
                bbox_max = bbox_max.max(v);
            }

            let e1 = tri[1] - tri[0];
            let e2 = tri[2] - tri[0];
            surface_area += e1.cross(e2).length() * 0.5;
        }

        Self {
            triangle_count,
            vertex_count,
            surface_area,
            bbox_min,
            bbox_max,
        }
    }

    /// True if the bounding box is non-empty.
    pub fn has_bounds(&self) -> bool {
        self.bbox_min.x <= self.bbox_max.x
    }
}
