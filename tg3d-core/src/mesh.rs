//! Triangle-soup mesh container: bulk transforms, merging and vertex welding
use std::collections::HashMap;

use crate::geometry::{Line, Point, Triangle};

/// Integer cell key of a vertex quantized to a `merge_radius` grid.
///
/// Rounding is `f64::round` (half away from zero), applied uniformly; two
/// vertices weld exactly when all three rounded quotients match.
type CellKey = (i64, i64, i64);

fn cell_key(point: &Point, merge_radius: f64) -> CellKey {
    (
        (point.x / merge_radius).round() as i64,
        (point.y / merge_radius).round() as i64,
        (point.z / merge_radius).round() as i64,
    )
}

/// An ordered collection of triangles.
///
/// Triangles are stored by value with no shared-vertex topology; adjacency
/// only appears after [`Mesh::optimize`] welds coincident vertices.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn from_triangles(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn set_triangles(&mut self, triangles: Vec<Triangle>) {
        self.triangles = triangles;
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Midpoint of the axis-aligned bounding box over all vertices.
    pub fn center(&self) -> Point {
        let mut bounds = Line::new(
            Point::new(f64::MAX, f64::MAX, f64::MAX),
            Point::new(-f64::MAX, -f64::MAX, -f64::MAX),
        );

        for triangle in &self.triangles {
            for vertex in [&triangle.point_a, &triangle.point_b, &triangle.point_c] {
                bounds.point_a.x = bounds.point_a.x.min(vertex.x);
                bounds.point_a.y = bounds.point_a.y.min(vertex.y);
                bounds.point_a.z = bounds.point_a.z.min(vertex.z);

                bounds.point_b.x = bounds.point_b.x.max(vertex.x);
                bounds.point_b.y = bounds.point_b.y.max(vertex.y);
                bounds.point_b.z = bounds.point_b.z.max(vertex.z);
            }
        }

        bounds.center()
    }

    /// Append copies of another mesh's triangles. No deduplication.
    pub fn merge(&mut self, other: &Mesh) -> &mut Self {
        self.triangles.extend_from_slice(&other.triangles);
        self
    }

    /// Weld vertices that fall into the same `merge_radius` quantization cell.
    ///
    /// Triangles whose three vertices quantize to fewer than three distinct
    /// cells are dropped as degenerate. Surviving triangles are deduplicated
    /// by their ordered key triple (a later duplicate replaces the earlier
    /// one in place). Every remaining vertex is then rewritten to one
    /// canonical point per cell, so triangles that shared a quantized
    /// position end up with bit-identical corner points.
    pub fn optimize(&mut self, merge_radius: f64) -> &mut Self {
        let mut kept: Vec<Triangle> = Vec::with_capacity(self.triangles.len());
        let mut slots: HashMap<[CellKey; 3], usize> = HashMap::new();

        for triangle in &self.triangles {
            let key_a = cell_key(&triangle.point_a, merge_radius);
            let key_b = cell_key(&triangle.point_b, merge_radius);
            let key_c = cell_key(&triangle.point_c, merge_radius);

            if key_a != key_b && key_b != key_c && key_a != key_c {
                match slots.get(&[key_a, key_b, key_c]) {
                    Some(&slot) => kept[slot] = *triangle,
                    None => {
                        slots.insert([key_a, key_b, key_c], kept.len());
                        kept.push(*triangle);
                    }
                }
            }
        }

        let mut canonical: HashMap<CellKey, Point> = HashMap::new();

        for triangle in &kept {
            canonical.insert(cell_key(&triangle.point_a, merge_radius), triangle.point_a);
            canonical.insert(cell_key(&triangle.point_b, merge_radius), triangle.point_b);
            canonical.insert(cell_key(&triangle.point_c, merge_radius), triangle.point_c);
        }

        for triangle in &mut kept {
            triangle.point_a = canonical[&cell_key(&triangle.point_a, merge_radius)];
            triangle.point_b = canonical[&cell_key(&triangle.point_b, merge_radius)];
            triangle.point_c = canonical[&cell_key(&triangle.point_c, merge_radius)];
        }

        self.triangles = kept;
        self
    }

    pub fn flip_x(&mut self, center_offset: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.flip_x(center_offset);
        }
        self
    }

    pub fn flip_y(&mut self, center_offset: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.flip_y(center_offset);
        }
        self
    }

    pub fn flip_z(&mut self, center_offset: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.flip_z(center_offset);
        }
        self
    }

    pub fn rotate(&mut self, axis: &Line, angle: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.rotate(axis, angle);
        }
        self
    }

    pub fn rotate_x(&mut self, angle: f64, pivot_y: f64, pivot_z: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.rotate_x(angle, pivot_y, pivot_z);
        }
        self
    }

    pub fn rotate_y(&mut self, angle: f64, pivot_x: f64, pivot_z: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.rotate_y(angle, pivot_x, pivot_z);
        }
        self
    }

    pub fn rotate_z(&mut self, angle: f64, pivot_x: f64, pivot_y: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.rotate_z(angle, pivot_x, pivot_y);
        }
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.translate(dx, dy, dz);
        }
        self
    }

    /// Scale uniformly around the mesh's own center, computed once.
    pub fn scale(&mut self, ratio: f64) -> &mut Self {
        self.scale_about(ratio, self.center())
    }

    pub fn scale_about(&mut self, ratio: f64, center: Point) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.scale_about(ratio, center);
        }
        self
    }

    /// Scale per axis around the mesh's own center, computed once.
    pub fn scale_xyz(&mut self, rx: f64, ry: f64, rz: f64) -> &mut Self {
        self.scale_xyz_about(rx, ry, rz, self.center())
    }

    pub fn scale_xyz_about(&mut self, rx: f64, ry: f64, rz: f64, center: Point) -> &mut Self {
        for triangle in &mut self.triangles {
            triangle.scale_xyz_about(rx, ry, rz, center);
        }
        self
    }
}
