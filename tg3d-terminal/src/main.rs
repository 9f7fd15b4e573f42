//! TG3D Terminal Demo - Rotating Composite Solid
//!
//! Demonstrates the character-grid rasterizer with a box, a cone and a
//! sphere merged into one mesh and welded with `optimize`.
//! Controls:
//!   - WASD / Arrow Keys: Rotate the scene
//!   - E/R: Roll rotation
//!   - +/-: Scale
//!   - J/K: Dolly the camera
//!   - Q/ESC: Quit

use std::io;
use tg3d_core::{Line, Mesh, Point};
use tg3d_terminal::TerminalApp;

fn build_scene() -> Mesh {
    let mut scene = Mesh::cuboid(&Line::from_coordinates(-1.0, -1.0, -1.0, 1.0, 1.0, 1.0));

    // Cone sitting on top of the box, sphere floating beside it.
    scene.merge(&Mesh::cone(Point::new(0.0, 0.0, 1.0), 0.8, 1.2, 0.3));
    scene.merge(&Mesh::sphere(Point::new(2.4, 0.0, 0.0), 0.7, 0.4));

    // Weld the seams the generators leave behind, then push the scene
    // behind the camera plane.
    scene.optimize(0.02);
    scene.translate(0.0, 0.0, -8.0);
    scene
}

fn main() -> io::Result<()> {
    let mut app = TerminalApp::new(build_scene())?;
    app.run()
}
