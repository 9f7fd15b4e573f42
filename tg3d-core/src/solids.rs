//! Parametric mesh factories: box, sphere, cylinder and cone
use std::f64::consts::PI;

use crate::geometry::{Line, Point, Triangle};
use crate::mesh::Mesh;

/// Which world plane a cylinder or cone base lies in.
///
/// The generators work in a local frame where the base circle spans local
/// x/y and the height runs along local z; the plane selects how that frame
/// is permuted into world coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasePlane {
    Xy,
    Xz,
    Yz,
}

impl BasePlane {
    fn point(self, x: f64, y: f64, z: f64) -> Point {
        match self {
            BasePlane::Xy => Point::new(x, y, z),
            BasePlane::Xz => Point::new(x, z, y),
            BasePlane::Yz => Point::new(z, x, y),
        }
    }
}

impl Mesh {
    /// Axis-aligned box whose opposite corners are the diagonal's endpoints.
    ///
    /// Six faces, two triangles each, sharing a face diagonal.
    pub fn cuboid(diagonal: &Line) -> Mesh {
        let a = diagonal.point_a;
        let b = diagonal.point_b;

        Mesh::from_triangles(vec![
            Triangle::new(a, Point::new(b.x, a.y, a.z), Point::new(a.x, b.y, a.z)),
            Triangle::new(a, Point::new(b.x, a.y, a.z), Point::new(a.x, a.y, b.z)),
            Triangle::new(a, Point::new(a.x, b.y, a.z), Point::new(a.x, a.y, b.z)),
            Triangle::new(b, Point::new(a.x, b.y, b.z), Point::new(b.x, a.y, b.z)),
            Triangle::new(b, Point::new(a.x, b.y, b.z), Point::new(b.x, b.y, a.z)),
            Triangle::new(b, Point::new(b.x, a.y, b.z), Point::new(b.x, b.y, a.z)),
            Triangle::new(
                Point::new(a.x, a.y, b.z),
                Point::new(b.x, a.y, b.z),
                Point::new(a.x, b.y, b.z),
            ),
            Triangle::new(
                Point::new(a.x, b.y, a.z),
                Point::new(b.x, b.y, a.z),
                Point::new(a.x, b.y, b.z),
            ),
            Triangle::new(
                Point::new(b.x, a.y, a.z),
                Point::new(b.x, b.y, a.z),
                Point::new(b.x, a.y, b.z),
            ),
            Triangle::new(
                Point::new(b.x, b.y, a.z),
                Point::new(a.x, b.y, a.z),
                Point::new(b.x, a.y, a.z),
            ),
            Triangle::new(
                Point::new(b.x, a.y, b.z),
                Point::new(a.x, a.y, b.z),
                Point::new(b.x, a.y, a.z),
            ),
            Triangle::new(
                Point::new(a.x, b.y, b.z),
                Point::new(a.x, a.y, b.z),
                Point::new(a.x, b.y, a.z),
            ),
        ])
    }

    /// UV sphere from latitude rings (step over `0..=π`) and longitude
    /// segments (step over `0..=2π`), both clamped at the end of their range.
    ///
    /// A ring cell normally yields two triangles; at the poles the collapsed
    /// ring radius leaves only one.
    pub fn sphere(center: Point, radius: f64, step: f64) -> Mesh {
        assert!(step > 0.0, "angular step must be positive");

        let mut sphere = Mesh::new();
        let mut outer = 0.0_f64;

        loop {
            let next_outer = (outer + step).min(PI);

            let r1 = radius * outer.sin();
            let r2 = radius * next_outer.sin();
            let z1 = radius * outer.cos();
            let z2 = radius * next_outer.cos();

            let mut inner = 0.0_f64;

            loop {
                let next_inner = (inner + step).min(2.0 * PI);

                let pa = Point::new(r1 * inner.cos(), r1 * inner.sin(), z1);
                let pb = Point::new(r1 * next_inner.cos(), r1 * next_inner.sin(), z1);
                let pc = Point::new(r2 * next_inner.cos(), r2 * next_inner.sin(), z2);
                let pd = Point::new(r2 * inner.cos(), r2 * inner.sin(), z2);

                if r1 > 0.0 {
                    sphere.add_triangle(Triangle::new(pa, pb, pc));
                }

                if r2 > 0.0 {
                    sphere.add_triangle(Triangle::new(pa, pc, pd));
                }

                inner = next_inner;
                if inner >= 2.0 * PI {
                    break;
                }
            }

            outer = next_outer;
            if outer >= PI {
                break;
            }
        }

        sphere.translate(center.x, center.y, center.z);
        sphere
    }

    /// Cylinder with its base in the XY plane.
    pub fn cylinder(base_center: Point, base_radius: f64, height: f64, step: f64) -> Mesh {
        Self::cylinder_on(BasePlane::Xy, base_center, base_radius, height, step)
    }

    /// Cylinder with its base in the chosen plane.
    pub fn cylinder_on(
        plane: BasePlane,
        base_center: Point,
        base_radius: f64,
        height: f64,
        step: f64,
    ) -> Mesh {
        assert!(step > 0.0, "angular step must be positive");

        let mut cylinder = Mesh::new();
        let top_center = plane.point(0.0, 0.0, height);
        let bottom_center = plane.point(0.0, 0.0, 0.0);
        let mut angle = 0.0_f64;

        loop {
            let next = (angle + step).min(2.0 * PI);
            let top_a = plane.point(base_radius * angle.cos(), base_radius * angle.sin(), height);
            let top_b = plane.point(base_radius * next.cos(), base_radius * next.sin(), height);
            let bottom_b = plane.point(base_radius * next.cos(), base_radius * next.sin(), 0.0);
            let bottom_a = plane.point(base_radius * angle.cos(), base_radius * angle.sin(), 0.0);

            cylinder.add_triangle(Triangle::new(top_a, top_b, top_center));
            cylinder.add_triangle(Triangle::new(bottom_b, bottom_a, bottom_center));
            cylinder.add_triangle(Triangle::new(top_a, top_b, bottom_b));
            cylinder.add_triangle(Triangle::new(bottom_b, bottom_a, top_a));

            angle = next;
            if angle >= 2.0 * PI {
                break;
            }
        }

        cylinder.translate(base_center.x, base_center.y, base_center.z);
        cylinder
    }

    /// Cone with its base in the XY plane.
    pub fn cone(base_center: Point, base_radius: f64, height: f64, step: f64) -> Mesh {
        Self::cone_on(BasePlane::Xy, base_center, base_radius, height, step)
    }

    /// Cone with its base in the chosen plane.
    ///
    /// Only two fans per step: one to the apex, one to the base center. The
    /// wall is the apex fan itself.
    pub fn cone_on(
        plane: BasePlane,
        base_center: Point,
        base_radius: f64,
        height: f64,
        step: f64,
    ) -> Mesh {
        assert!(step > 0.0, "angular step must be positive");

        let mut cone = Mesh::new();
        let apex = plane.point(0.0, 0.0, height);
        let bottom_center = plane.point(0.0, 0.0, 0.0);
        let mut angle = 0.0_f64;

        loop {
            let next = (angle + step).min(2.0 * PI);
            let rim_a = plane.point(base_radius * angle.cos(), base_radius * angle.sin(), 0.0);
            let rim_b = plane.point(base_radius * next.cos(), base_radius * next.sin(), 0.0);

            cone.add_triangle(Triangle::new(rim_a, rim_b, apex));
            cone.add_triangle(Triangle::new(rim_a, rim_b, bottom_center));

            angle = next;
            if angle >= 2.0 * PI {
                break;
            }
        }

        cone.translate(base_center.x, base_center.y, base_center.z);
        cone
    }
}
