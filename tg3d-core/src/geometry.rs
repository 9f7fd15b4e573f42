//! Geometry primitives: points, lines and triangles with in-place transforms
use nalgebra::Vector3;

/// A point in 3D space.
///
/// Every transform mutates the point in place and returns `&mut Self`, so
/// transforms can be chained: `p.rotate_x(a, 0.0, 0.0).translate(1.0, 0.0, 0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Reflect across the YZ plane offset by `center_offset` along X.
    pub fn flip_x(&mut self, center_offset: f64) -> &mut Self {
        self.x = 2.0 * center_offset - self.x;
        self
    }

    /// Reflect across the XZ plane offset by `center_offset` along Y.
    pub fn flip_y(&mut self, center_offset: f64) -> &mut Self {
        self.y = 2.0 * center_offset - self.y;
        self
    }

    /// Reflect across the XY plane offset by `center_offset` along Z.
    pub fn flip_z(&mut self, center_offset: f64) -> &mut Self {
        self.z = 2.0 * center_offset - self.z;
        self
    }

    /// Rotate around the X axis through `(pivot_y, pivot_z)` by `angle` radians.
    pub fn rotate_x(&mut self, angle: f64, pivot_y: f64, pivot_z: f64) -> &mut Self {
        let y = self.y - pivot_y;
        let z = self.z - pivot_z;
        let (sin, cos) = angle.sin_cos();
        self.y = y * cos - z * sin + pivot_y;
        self.z = y * sin + z * cos + pivot_z;
        self
    }

    /// Rotate around the Y axis through `(pivot_x, pivot_z)` by `angle` radians.
    pub fn rotate_y(&mut self, angle: f64, pivot_x: f64, pivot_z: f64) -> &mut Self {
        let x = self.x - pivot_x;
        let z = self.z - pivot_z;
        let (sin, cos) = angle.sin_cos();
        self.x = x * cos - z * sin + pivot_x;
        self.z = x * sin + z * cos + pivot_z;
        self
    }

    /// Rotate around the Z axis through `(pivot_x, pivot_y)` by `angle` radians.
    pub fn rotate_z(&mut self, angle: f64, pivot_x: f64, pivot_y: f64) -> &mut Self {
        let x = self.x - pivot_x;
        let y = self.y - pivot_y;
        let (sin, cos) = angle.sin_cos();
        self.x = x * cos - y * sin + pivot_x;
        self.y = x * sin + y * cos + pivot_y;
        self
    }

    /// Rotate around an arbitrary axis by `angle` radians.
    ///
    /// The axis is `axis.point_a -> axis.point_b`. The rotation is composed
    /// from the axis-aligned primitives: rotate around X and Y to align the
    /// axis with Z, rotate around Z by `angle`, then undo the alignment in
    /// reverse order. The sense follows the right-hand rule with respect to
    /// the axis direction, so `angle` is negated when the aligned axis ends
    /// up pointing down the Z axis.
    pub fn rotate(&mut self, axis: &Line, angle: f64) -> &mut Self {
        let mut end = axis.point_b;
        end.translate(-axis.point_a.x, -axis.point_a.y, -axis.point_a.z);

        // atan(0/0) is undefined; an axis already in the XZ plane needs no
        // X alignment.
        let angle_x = if end.y != 0.0 || end.z != 0.0 {
            (end.y / end.z).atan()
        } else {
            0.0
        };

        if angle_x != 0.0 {
            self.rotate_x(angle_x, axis.point_a.y, axis.point_a.z);
            end.rotate_x(angle_x, 0.0, 0.0);
        }

        let angle_y = if end.x != 0.0 || end.z != 0.0 {
            (end.x / end.z).atan()
        } else {
            0.0
        };

        if angle_y != 0.0 {
            self.rotate_y(angle_y, axis.point_a.x, axis.point_a.z);
            end.rotate_y(angle_y, 0.0, 0.0);
        }

        let signed = if end.z >= 0.0 { angle } else { -angle };
        self.rotate_z(signed, axis.point_a.x, axis.point_a.y);

        if angle_y != 0.0 {
            self.rotate_y(-angle_y, axis.point_a.x, axis.point_a.z);
        }

        if angle_x != 0.0 {
            self.rotate_x(-angle_x, axis.point_a.y, axis.point_a.z);
        }

        self
    }

    /// Translate by the given offsets.
    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.x += dx;
        self.y += dy;
        self.z += dz;
        self
    }

    /// Scale uniformly around the world origin.
    pub fn scale(&mut self, ratio: f64) -> &mut Self {
        self.scale_about(ratio, Self::ORIGIN)
    }

    /// Scale uniformly around `center`.
    pub fn scale_about(&mut self, ratio: f64, center: Point) -> &mut Self {
        self.scale_xyz_about(ratio, ratio, ratio, center)
    }

    /// Scale per axis around the world origin.
    pub fn scale_xyz(&mut self, rx: f64, ry: f64, rz: f64) -> &mut Self {
        self.scale_xyz_about(rx, ry, rz, Self::ORIGIN)
    }

    /// Scale per axis around `center`.
    pub fn scale_xyz_about(&mut self, rx: f64, ry: f64, rz: f64, center: Point) -> &mut Self {
        self.x = (self.x - center.x) * rx + center.x;
        self.y = (self.y - center.y) * ry + center.y;
        self.z = (self.z - center.z) * rz + center.z;
        self
    }

    /// Coordinates as a nalgebra vector.
    pub fn coords(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// A line segment between two points.
///
/// Also serves as a rotation axis (direction `point_a -> point_b`) and as a
/// bounding-box diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Line {
    pub point_a: Point,
    pub point_b: Point,
}

impl Line {
    pub fn new(point_a: Point, point_b: Point) -> Self {
        Self { point_a, point_b }
    }

    pub fn from_coordinates(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Self {
        Self::new(Point::new(x1, y1, z1), Point::new(x2, y2, z2))
    }

    /// Midpoint of the segment.
    pub fn center(&self) -> Point {
        Point::new(
            (self.point_a.x + self.point_b.x) / 2.0,
            (self.point_a.y + self.point_b.y) / 2.0,
            (self.point_a.z + self.point_b.z) / 2.0,
        )
    }

    pub fn flip_x(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_x(center_offset);
        self.point_b.flip_x(center_offset);
        self
    }

    pub fn flip_y(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_y(center_offset);
        self.point_b.flip_y(center_offset);
        self
    }

    pub fn flip_z(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_z(center_offset);
        self.point_b.flip_z(center_offset);
        self
    }

    pub fn rotate(&mut self, axis: &Line, angle: f64) -> &mut Self {
        self.point_a.rotate(axis, angle);
        self.point_b.rotate(axis, angle);
        self
    }

    pub fn rotate_x(&mut self, angle: f64, pivot_y: f64, pivot_z: f64) -> &mut Self {
        self.point_a.rotate_x(angle, pivot_y, pivot_z);
        self.point_b.rotate_x(angle, pivot_y, pivot_z);
        self
    }

    pub fn rotate_y(&mut self, angle: f64, pivot_x: f64, pivot_z: f64) -> &mut Self {
        self.point_a.rotate_y(angle, pivot_x, pivot_z);
        self.point_b.rotate_y(angle, pivot_x, pivot_z);
        self
    }

    pub fn rotate_z(&mut self, angle: f64, pivot_x: f64, pivot_y: f64) -> &mut Self {
        self.point_a.rotate_z(angle, pivot_x, pivot_y);
        self.point_b.rotate_z(angle, pivot_x, pivot_y);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.point_a.translate(dx, dy, dz);
        self.point_b.translate(dx, dy, dz);
        self
    }

    /// Scale uniformly around the segment's own midpoint.
    pub fn scale(&mut self, ratio: f64) -> &mut Self {
        self.scale_about(ratio, self.center())
    }

    pub fn scale_about(&mut self, ratio: f64, center: Point) -> &mut Self {
        self.point_a.scale_about(ratio, center);
        self.point_b.scale_about(ratio, center);
        self
    }

    /// Scale per axis around the segment's own midpoint.
    pub fn scale_xyz(&mut self, rx: f64, ry: f64, rz: f64) -> &mut Self {
        self.scale_xyz_about(rx, ry, rz, self.center())
    }

    pub fn scale_xyz_about(&mut self, rx: f64, ry: f64, rz: f64, center: Point) -> &mut Self {
        self.point_a.scale_xyz_about(rx, ry, rz, center);
        self.point_b.scale_xyz_about(rx, ry, rz, center);
        self
    }
}

/// A triangle with vertices A, B and C.
///
/// Vertex order is the winding; it decides which side of the gradient ramp
/// the rasterizer shades the face with.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Triangle {
    pub point_a: Point,
    pub point_b: Point,
    pub point_c: Point,
}

impl Triangle {
    pub fn new(point_a: Point, point_b: Point, point_c: Point) -> Self {
        Self {
            point_a,
            point_b,
            point_c,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_coordinates(
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
        x3: f64,
        y3: f64,
        z3: f64,
    ) -> Self {
        Self::new(
            Point::new(x1, y1, z1),
            Point::new(x2, y2, z2),
            Point::new(x3, y3, z3),
        )
    }

    /// Centroid of the three vertices.
    pub fn center(&self) -> Point {
        Point::new(
            (self.point_a.x + self.point_b.x + self.point_c.x) / 3.0,
            (self.point_a.y + self.point_b.y + self.point_c.y) / 3.0,
            (self.point_a.z + self.point_b.z + self.point_c.z) / 3.0,
        )
    }

    /// Unit face normal from the winding order.
    pub fn normal(&self) -> Vector3<f64> {
        let edge1 = self.point_b.coords() - self.point_a.coords();
        let edge2 = self.point_c.coords() - self.point_a.coords();
        edge1.cross(&edge2).normalize()
    }

    pub fn flip_x(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_x(center_offset);
        self.point_b.flip_x(center_offset);
        self.point_c.flip_x(center_offset);
        self
    }

    pub fn flip_y(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_y(center_offset);
        self.point_b.flip_y(center_offset);
        self.point_c.flip_y(center_offset);
        self
    }

    pub fn flip_z(&mut self, center_offset: f64) -> &mut Self {
        self.point_a.flip_z(center_offset);
        self.point_b.flip_z(center_offset);
        self.point_c.flip_z(center_offset);
        self
    }

    pub fn rotate(&mut self, axis: &Line, angle: f64) -> &mut Self {
        self.point_a.rotate(axis, angle);
        self.point_b.rotate(axis, angle);
        self.point_c.rotate(axis, angle);
        self
    }

    pub fn rotate_x(&mut self, angle: f64, pivot_y: f64, pivot_z: f64) -> &mut Self {
        self.point_a.rotate_x(angle, pivot_y, pivot_z);
        self.point_b.rotate_x(angle, pivot_y, pivot_z);
        self.point_c.rotate_x(angle, pivot_y, pivot_z);
        self
    }

    pub fn rotate_y(&mut self, angle: f64, pivot_x: f64, pivot_z: f64) -> &mut Self {
        self.point_a.rotate_y(angle, pivot_x, pivot_z);
        self.point_b.rotate_y(angle, pivot_x, pivot_z);
        self.point_c.rotate_y(angle, pivot_x, pivot_z);
        self
    }

    pub fn rotate_z(&mut self, angle: f64, pivot_x: f64, pivot_y: f64) -> &mut Self {
        self.point_a.rotate_z(angle, pivot_x, pivot_y);
        self.point_b.rotate_z(angle, pivot_x, pivot_y);
        self.point_c.rotate_z(angle, pivot_x, pivot_y);
        self
    }

    pub fn translate(&mut self, dx: f64, dy: f64, dz: f64) -> &mut Self {
        self.point_a.translate(dx, dy, dz);
        self.point_b.translate(dx, dy, dz);
        self.point_c.translate(dx, dy, dz);
        self
    }

    /// Scale uniformly around the triangle's own centroid.
    pub fn scale(&mut self, ratio: f64) -> &mut Self {
        self.scale_about(ratio, self.center())
    }

    pub fn scale_about(&mut self, ratio: f64, center: Point) -> &mut Self {
        self.point_a.scale_about(ratio, center);
        self.point_b.scale_about(ratio, center);
        self.point_c.scale_about(ratio, center);
        self
    }

    /// Scale per axis around the triangle's own centroid.
    pub fn scale_xyz(&mut self, rx: f64, ry: f64, rz: f64) -> &mut Self {
        self.scale_xyz_about(rx, ry, rz, self.center())
    }

    pub fn scale_xyz_about(&mut self, rx: f64, ry: f64, rz: f64, center: Point) -> &mut Self {
        self.point_a.scale_xyz_about(rx, ry, rz, center);
        self.point_b.scale_xyz_about(rx, ry, rz, center);
        self.point_c.scale_xyz_about(rx, ry, rz, center);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_point_eq(p: &Point, x: f64, y: f64, z: f64) {
        assert_relative_eq!(p.x, x, epsilon = 1e-9);
        assert_relative_eq!(p.y, y, epsilon = 1e-9);
        assert_relative_eq!(p.z, z, epsilon = 1e-9);
    }

    #[test]
    fn flip_is_an_involution() {
        let mut p = Point::new(1.5, -2.0, 3.25);
        p.flip_x(0.75).flip_x(0.75);
        p.flip_y(-1.0).flip_y(-1.0);
        p.flip_z(2.0).flip_z(2.0);
        assert_point_eq(&p, 1.5, -2.0, 3.25);
    }

    #[test]
    fn flip_reflects_about_offset_plane() {
        let mut p = Point::new(3.0, 0.0, 0.0);
        p.flip_x(1.0);
        assert_point_eq(&p, -1.0, 0.0, 0.0);
    }

    #[test]
    fn axis_rotation_round_trips() {
        let mut p = Point::new(0.3, -1.7, 2.9);
        p.rotate_x(0.8, 1.0, -2.0).rotate_x(-0.8, 1.0, -2.0);
        p.rotate_y(1.3, 0.5, 0.25).rotate_y(-1.3, 0.5, 0.25);
        p.rotate_z(-2.1, -1.0, 4.0).rotate_z(2.1, -1.0, 4.0);
        assert_point_eq(&p, 0.3, -1.7, 2.9);
    }

    #[test]
    fn quarter_turn_around_z() {
        let mut p = Point::new(1.0, 0.0, 5.0);
        p.rotate_z(FRAC_PI_2, 0.0, 0.0);
        assert_point_eq(&p, 0.0, 1.0, 5.0);
    }

    #[test]
    fn line_rotation_round_trips() {
        let axis = Line::from_coordinates(1.0, 2.0, 3.0, 4.0, 0.0, -2.0);
        let mut p = Point::new(0.4, -0.9, 1.6);
        p.rotate(&axis, 0.7).rotate(&axis, -0.7);
        assert_point_eq(&p, 0.4, -0.9, 1.6);
    }

    #[test]
    fn rotation_around_z_parallel_axis_matches_rotate_z() {
        // Both alignment angles degenerate to zero here.
        let axis = Line::from_coordinates(0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        let mut p = Point::new(2.0, 1.0, -3.0);
        let mut q = p;
        p.rotate(&axis, 1.1);
        q.rotate_z(1.1, 0.0, 0.0);
        assert_point_eq(&p, q.x, q.y, q.z);
    }

    #[test]
    fn rotation_around_x_parallel_axis_matches_rotate_x() {
        let axis = Line::from_coordinates(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let mut p = Point::new(0.5, 2.0, -1.0);
        let mut q = p;
        p.rotate(&axis, 0.9);
        q.rotate_x(0.9, 0.0, 0.0);
        assert_point_eq(&p, q.x, q.y, q.z);
    }

    #[test]
    fn rotation_sense_is_consistent_with_axis_direction() {
        // Reversing the axis reverses the rotation sense.
        let up = Line::from_coordinates(0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let down = Line::from_coordinates(0.0, 0.0, 0.0, 0.0, -1.0, 0.0);
        let mut p = Point::new(1.0, 0.0, 0.0);
        let mut q = p;
        p.rotate(&up, FRAC_PI_2);
        q.rotate(&down, -FRAC_PI_2);
        assert_point_eq(&p, q.x, q.y, q.z);
    }

    #[test]
    fn full_turn_is_identity() {
        let axis = Line::from_coordinates(0.2, -0.4, 0.6, -1.0, 2.0, 0.5);
        let mut p = Point::new(3.0, 1.0, -2.0);
        p.rotate(&axis, 2.0 * PI);
        assert_point_eq(&p, 3.0, 1.0, -2.0);
    }

    #[test]
    fn scale_round_trips() {
        let center = Point::new(1.0, -1.0, 2.0);
        let mut p = Point::new(4.0, 5.0, -6.0);
        p.scale_about(2.5, center).scale_about(1.0 / 2.5, center);
        assert_point_eq(&p, 4.0, 5.0, -6.0);

        p.scale_xyz_about(2.0, 3.0, 4.0, center)
            .scale_xyz_about(0.5, 1.0 / 3.0, 0.25, center);
        assert_point_eq(&p, 4.0, 5.0, -6.0);
    }

    #[test]
    fn point_scale_defaults_to_world_origin() {
        let mut p = Point::new(1.0, 2.0, 3.0);
        p.scale(2.0);
        assert_point_eq(&p, 2.0, 4.0, 6.0);
    }

    #[test]
    fn shape_scale_defaults_to_own_center() {
        // A bare scale leaves the shape's center where it was.
        let mut line = Line::from_coordinates(1.0, 1.0, 1.0, 3.0, 3.0, 3.0);
        line.scale(2.0);
        assert_point_eq(&line.center(), 2.0, 2.0, 2.0);
        assert_point_eq(&line.point_a, 0.0, 0.0, 0.0);
        assert_point_eq(&line.point_b, 4.0, 4.0, 4.0);

        let mut tri = Triangle::from_coordinates(0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0, 0.0);
        let before = tri.center();
        tri.scale(3.0);
        assert_point_eq(&tri.center(), before.x, before.y, before.z);
    }

    #[test]
    fn line_center_is_midpoint() {
        let line = Line::from_coordinates(0.0, 0.0, 0.0, 2.0, 4.0, 6.0);
        assert_point_eq(&line.center(), 1.0, 2.0, 3.0);
    }

    #[test]
    fn triangle_center_is_centroid() {
        let tri = Triangle::from_coordinates(0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 3.0, 3.0);
        assert_point_eq(&tri.center(), 1.0, 1.0, 1.0);
    }

    #[test]
    fn triangle_normal_follows_winding() {
        let tri = Triangle::from_coordinates(0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let n = tri.normal();
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);

        let flipped = Triangle::new(tri.point_a, tri.point_c, tri.point_b);
        assert_relative_eq!(flipped.normal().z, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn shape_transforms_hit_every_vertex() {
        let mut tri = Triangle::from_coordinates(1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 3.0, 0.0, 0.0);
        tri.translate(0.0, 1.0, 0.0).flip_x(0.0);
        assert_point_eq(&tri.point_a, -1.0, 1.0, 0.0);
        assert_point_eq(&tri.point_b, -2.0, 1.0, 0.0);
        assert_point_eq(&tri.point_c, -3.0, 1.0, 0.0);
    }
}
