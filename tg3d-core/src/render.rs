//! Character-grid renderer: projection, scanline fill, z-buffer and shading
use crate::geometry::{Point, Triangle};
use crate::mesh::Mesh;

/// Shading ramp, lightest to darkest.
const GRADIENT: [char; 7] = ['.', '"', '?', '%', '%', '#', '@'];

/// Bound on projected screen coordinates, far outside any drawable cell.
///
/// Projections of extreme but finite coordinates are clamped here instead
/// of saturating at the `i64` limits, where the edge-walking subtractions
/// would overflow.
const SCREEN_LIMIT: f64 = 1e6;

/// A projected vertex in screen space.
///
/// `x`/`y` are rounded character-cell coordinates; `z` keeps the depth used
/// by the z-buffer test.
#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    x: i64,
    y: i64,
    z: f64,
}

/// Software rasterizer writing triangle meshes into a character grid.
///
/// The renderer owns a depth buffer (empty = `-∞`) and a glyph buffer
/// (empty = space) sized to the viewport. [`Renderer::render`] accumulates
/// every triangle of every input mesh into those buffers, serializes the
/// glyph buffer to a string and clears both buffers for the next frame.
#[derive(Debug, Clone)]
pub struct Renderer {
    width: usize,
    height: usize,
    view_point: Point,
    depth_buffer: Vec<f64>,
    glyph_buffer: Vec<char>,
}

impl Renderer {
    /// Renderer with the camera at the world origin.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_view_point(width, height, Point::ORIGIN)
    }

    pub fn with_view_point(width: usize, height: usize, view_point: Point) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            view_point,
            depth_buffer: vec![f64::NEG_INFINITY; size],
            glyph_buffer: vec![' '; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn view_point(&self) -> Point {
        self.view_point
    }

    /// Resize the viewport. Buffers are reallocated only when the size
    /// actually changes; the camera is kept unless a new one is supplied.
    pub fn resize(&mut self, width: usize, height: usize, view_point: Option<Point>) {
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            let size = width * height;
            self.depth_buffer = vec![f64::NEG_INFINITY; size];
            self.glyph_buffer = vec![' '; size];
        }

        if let Some(view_point) = view_point {
            self.view_point = view_point;
        }
    }

    pub fn move_view_point(&mut self, dx: f64, dy: f64, dz: f64) {
        self.view_point.translate(dx, dy, dz);
    }

    pub fn set_view_point(&mut self, view_point: Point) {
        self.view_point = view_point;
    }

    /// Render one frame from the given meshes.
    ///
    /// Returns `height` lines of `2 * width` characters (every glyph is
    /// doubled to compensate for the character cell aspect ratio), each
    /// newline-terminated. Both buffers are cleared afterwards.
    pub fn render(&mut self, meshes: &[Mesh]) -> String {
        for mesh in meshes {
            for triangle in mesh.triangles() {
                self.render_triangle(triangle);
            }
        }

        let mut frame = String::with_capacity(self.height * (2 * self.width + 1));

        for row in 0..self.height {
            for col in 0..self.width {
                let glyph = self.glyph_buffer[row * self.width + col];
                frame.push(glyph);
                frame.push(glyph);
            }
            frame.push('\n');
        }

        self.depth_buffer.fill(f64::NEG_INFINITY);
        self.glyph_buffer.fill(' ');

        frame
    }

    /// Convenience for a single mesh.
    pub fn render_mesh(&mut self, mesh: &Mesh) -> String {
        self.render(std::slice::from_ref(mesh))
    }

    /// Project a vertex into screen space.
    ///
    /// Depth attenuation uses `|view.z - z| + 1` instead of a projective
    /// matrix; `None` means the projection did not produce finite screen
    /// coordinates and the whole triangle is skipped.
    fn project(&self, point: &Point) -> Option<ScreenVertex> {
        let view = &self.view_point;
        let spread = (self.width + self.height) as f64;
        let attenuation = (view.z - point.z).abs() + 1.0;

        let x = ((point.x - view.x) * spread / attenuation - view.x + self.width as f64 / 2.0)
            .round();
        let y = ((point.y - view.y) * spread / attenuation - view.y + self.height as f64 / 2.0)
            .round();

        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        Some(ScreenVertex {
            x: x.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i64,
            y: y.clamp(-SCREEN_LIMIT, SCREEN_LIMIT) as i64,
            z: point.z + 1.0,
        })
    }

    /// Pick a ramp glyph for a whole triangle (flat shading).
    ///
    /// The two slope ratios approximate the face normal's tilt; a 0/0 ratio
    /// is treated as 0, while an infinite ratio flows through and simply
    /// drives the bounded coefficient toward 1/2.
    fn shade(triangle: &Triangle) -> char {
        let edge1 = triangle.point_b.coords() - triangle.point_a.coords();
        let edge2 = triangle.point_c.coords() - triangle.point_a.coords();
        let normal = edge1.cross(&edge2);

        let mut x_to_y = normal.y / normal.x;
        let mut x_to_z = normal.z / normal.x;
        if x_to_y.is_nan() {
            x_to_y = 0.0;
        }
        if x_to_z.is_nan() {
            x_to_z = 0.0;
        }

        let ratio = 1.0 / (1.0 + x_to_y * x_to_y + x_to_z * x_to_z).sqrt();
        let coefficient = if x_to_z >= 0.0 {
            (1.0 + ratio) / 2.0
        } else {
            (1.0 - ratio) / 2.0
        };

        let index = (coefficient * GRADIENT.len() as f64).floor() as usize;
        GRADIENT
            .get(index)
            .copied()
            .unwrap_or(GRADIENT[GRADIENT.len() - 1])
    }

    /// Scanline-fill one triangle against the depth and glyph buffers.
    ///
    /// The projected vertices are sorted by screen Y and the triangle is
    /// walked as two trapezoids: top vertex to middle vertex, then middle
    /// to bottom, with the long edge (top to bottom) shared by both. X and
    /// Z advance per row by `delta / (rows + 1)` increments, so single-row
    /// spans never divide by zero.
    fn render_triangle(&mut self, triangle: &Triangle) {
        let (Some(v0), Some(v1), Some(v2)) = (
            self.project(&triangle.point_a),
            self.project(&triangle.point_b),
            self.project(&triangle.point_c),
        ) else {
            return;
        };

        let mut vertices = [v0, v1, v2];
        vertices.sort_by_key(|v| v.y);
        let [a, b, c] = vertices;

        let glyph = Self::shade(triangle);

        let x_long_inc = (c.x - a.x) as f64 / (c.y - a.y + 1) as f64;
        let x_short_inc1 = (b.x - a.x) as f64 / (b.y - a.y + 1) as f64;
        let x_short_inc2 = (c.x - b.x) as f64 / (c.y - b.y + 1) as f64;

        let z_long_inc = (c.z - a.z) / (c.y - a.y + 1) as f64;
        let z_short_inc1 = (b.z - a.z) / (b.y - a.y + 1) as f64;
        let z_short_inc2 = (c.z - b.z) / (c.y - b.y + 1) as f64;

        let mut x_start = a.x as f64;
        let mut x_end = a.x as f64;
        let mut z_start = a.z;
        let mut z_end = a.z;

        // Top trapezoid: the smaller-sloped edge leads the span start.
        let (mut start_inc, mut end_inc, mut start_z_inc, mut end_z_inc) =
            if x_long_inc < x_short_inc1 {
                (x_long_inc, x_short_inc1, z_long_inc, z_short_inc1)
            } else {
                (x_short_inc1, x_long_inc, z_short_inc1, z_long_inc)
            };

        for y in a.y..=b.y {
            self.fill_span(y, x_start, x_end, z_start, z_end, glyph);
            x_start += start_inc;
            x_end += end_inc;
            z_start += start_z_inc;
            z_end += end_z_inc;
        }

        // Bottom trapezoid continues from the accumulated span edges.
        (start_inc, end_inc, start_z_inc, end_z_inc) = if x_long_inc > x_short_inc2 {
            (x_long_inc, x_short_inc2, z_long_inc, z_short_inc2)
        } else {
            (x_short_inc2, x_long_inc, z_short_inc2, z_long_inc)
        };

        for y in (b.y + 1)..=c.y {
            self.fill_span(y, x_start, x_end, z_start, z_end, glyph);
            x_start += start_inc;
            x_end += end_inc;
            z_start += start_z_inc;
            z_end += end_z_inc;
        }
    }

    /// Fill one row span, interpolating Z across X.
    ///
    /// A pixel is written only when its depth is strictly nearer than the
    /// buffered one and strictly behind the camera plane; under the
    /// projection's sign convention "nearer" means a larger Z that is still
    /// below the view point's Z.
    fn fill_span(&mut self, y: i64, x_start: f64, x_end: f64, z_start: f64, z_end: f64, glyph: char) {
        if y < 0 || y >= self.height as i64 {
            return;
        }

        let start = (x_start.round() as i64).max(0);
        let end = (x_end.round() as i64).min(self.width as i64 - 1);
        if end < start {
            return;
        }

        let mut z = z_start;
        let z_inc = (z_end - z_start) / (end - start + 1) as f64;

        for x in start..=end {
            let index = y as usize * self.width + x as usize;
            if z < self.view_point.z && z > self.depth_buffer[index] {
                self.depth_buffer[index] = z;
                self.glyph_buffer[index] = glyph;
            }
            z += z_inc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    /// Glyph at a buffer cell of a rendered frame (cells are doubled).
    fn glyph_at(frame: &str, row: usize, col: usize) -> char {
        frame.lines().nth(row).unwrap().chars().nth(2 * col).unwrap()
    }

    #[test]
    fn empty_scene_renders_blank_frame() {
        let mut renderer = Renderer::new(10, 5);
        let frame = renderer.render(&[]);

        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 5);
        for line in lines {
            assert_eq!(line, " ".repeat(20));
        }
        assert!(frame.ends_with('\n'));
    }

    #[test]
    fn buffers_clear_between_frames() {
        let mut renderer = Renderer::new(20, 10);
        let mesh = Mesh::from_triangles(vec![Triangle::from_coordinates(
            -1.0, -1.0, -5.0, 1.0, -1.0, -5.0, 0.0, 1.0, -5.0,
        )]);

        let first = renderer.render_mesh(&mesh);
        assert!(first.chars().any(|c| c != ' ' && c != '\n'));

        let second = renderer.render(&[]);
        assert!(second.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn nearer_triangle_wins_regardless_of_input_order() {
        // Both triangles cover the viewport center; the tilted one sits
        // nearer the camera and shades with a different ramp glyph.
        let far = Mesh::from_triangles(vec![Triangle::from_coordinates(
            -1.0, -1.0, -5.0, 1.0, -1.0, -5.0, 0.0, 1.0, -5.0,
        )]);
        let near = Mesh::from_triangles(vec![Triangle::from_coordinates(
            -1.0, -1.0, -3.0, 1.0, -1.0, -2.6, 0.0, 1.0, -3.0,
        )]);

        let mut renderer = Renderer::new(20, 10);
        let frame_a = renderer.render(&[far.clone(), near.clone()]);
        let frame_b = renderer.render(&[near.clone(), far.clone()]);

        let center_a = glyph_at(&frame_a, 5, 10);
        let center_b = glyph_at(&frame_b, 5, 10);
        assert_eq!(center_a, center_b);

        let mut solo = Renderer::new(20, 10);
        let near_glyph = glyph_at(&solo.render_mesh(&near), 5, 10);
        let far_glyph = glyph_at(&solo.render_mesh(&far), 5, 10);
        assert_ne!(near_glyph, far_glyph);
        assert_eq!(center_a, near_glyph);
    }

    #[test]
    fn triangles_in_front_of_the_camera_are_invisible() {
        // Depth test rejects anything not strictly behind the camera plane.
        let mesh = Mesh::from_triangles(vec![Triangle::from_coordinates(
            -1.0, -1.0, 2.0, 1.0, -1.0, 2.0, 0.0, 1.0, 2.0,
        )]);
        let mut renderer = Renderer::new(20, 10);
        let frame = renderer.render_mesh(&mesh);
        assert!(frame.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn non_finite_projection_skips_the_triangle() {
        let mesh = Mesh::from_triangles(vec![Triangle::from_coordinates(
            f64::INFINITY, 0.0, -5.0, 1.0, 0.0, -5.0, 0.0, 1.0, -5.0,
        )]);
        let mut renderer = Renderer::new(20, 10);
        let frame = renderer.render_mesh(&mesh);
        assert!(frame.chars().all(|c| c == ' ' || c == '\n'));
    }

    #[test]
    fn extreme_finite_coordinates_still_produce_a_frame() {
        // Screen coordinates overflow the drawable area by many orders of
        // magnitude; the projection clamp keeps the edge walk in range.
        let mesh = Mesh::from_triangles(vec![Triangle::from_coordinates(
            1e19, 1e19, -2.0, -1e19, -1e19, -2.0, 1e19, -1e19, -3.0,
        )]);
        let mut renderer = Renderer::new(20, 10);
        let frame = renderer.render_mesh(&mesh);

        let lines: Vec<&str> = frame.lines().collect();
        assert_eq!(lines.len(), 10);
        for line in lines {
            assert_eq!(line.chars().count(), 20);
        }
        for c in frame.chars() {
            assert!(c == ' ' || c == '\n' || GRADIENT.contains(&c));
        }
    }

    #[test]
    fn frame_glyphs_come_from_the_ramp() {
        let mut renderer = Renderer::new(30, 15);
        let sphere = Mesh::sphere(Point::new(0.0, 0.0, -8.0), 2.0, 0.4);
        let frame = renderer.render_mesh(&sphere);

        assert!(frame.chars().any(|c| c != ' ' && c != '\n'));
        for c in frame.chars() {
            assert!(c == ' ' || c == '\n' || GRADIENT.contains(&c));
        }
    }

    #[test]
    fn resize_keeps_camera_unless_replaced() {
        let mut renderer = Renderer::with_view_point(10, 5, Point::new(0.0, 0.0, 2.0));
        renderer.resize(8, 4, None);
        assert_eq!(renderer.width(), 8);
        assert_eq!(renderer.height(), 4);
        assert_eq!(renderer.view_point(), Point::new(0.0, 0.0, 2.0));

        renderer.resize(8, 4, Some(Point::new(1.0, 0.0, 2.0)));
        assert_eq!(renderer.view_point(), Point::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn moving_the_view_point_translates_the_camera() {
        let mut renderer = Renderer::new(10, 5);
        renderer.move_view_point(1.0, -2.0, 3.0);
        assert_eq!(renderer.view_point(), Point::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn cuboid_scene_renders_something() {
        let mut cuboid = Mesh::cuboid(&Line::from_coordinates(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0));
        cuboid.translate(0.0, 0.0, -8.0);
        let mut renderer = Renderer::new(40, 20);
        let frame = renderer.render_mesh(&cuboid);
        assert!(frame.chars().any(|c| c != ' ' && c != '\n'));
    }
}
