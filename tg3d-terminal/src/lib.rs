//! Interactive terminal viewer for TG3D scenes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tg3d_core::{Line, Mesh, Renderer};

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    renderer: Renderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            mesh,
            // Glyphs are doubled horizontally, so the grid is half as wide
            // as the terminal. One row is reserved for the status line.
            renderer: Renderer::new(cols as usize / 2, rows.saturating_sub(1) as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => {
                let center = self.mesh.center();
                match code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        self.running = false;
                    }
                    KeyCode::Char('w') | KeyCode::Up => {
                        self.mesh.rotate_x(0.1, center.y, center.z);
                    }
                    KeyCode::Char('s') | KeyCode::Down => {
                        self.mesh.rotate_x(-0.1, center.y, center.z);
                    }
                    KeyCode::Char('a') | KeyCode::Left => {
                        self.mesh.rotate_y(-0.1, center.x, center.z);
                    }
                    KeyCode::Char('d') | KeyCode::Right => {
                        self.mesh.rotate_y(0.1, center.x, center.z);
                    }
                    KeyCode::Char('e') => {
                        self.mesh.rotate_z(0.1, center.x, center.y);
                    }
                    KeyCode::Char('r') => {
                        self.mesh.rotate_z(-0.1, center.x, center.y);
                    }
                    KeyCode::Char('+') => {
                        self.mesh.scale(1.1);
                    }
                    KeyCode::Char('-') => {
                        self.mesh.scale(1.0 / 1.1);
                    }
                    KeyCode::Char('j') => {
                        self.renderer.move_view_point(0.0, 0.0, -0.5);
                    }
                    KeyCode::Char('k') => {
                        self.renderer.move_view_point(0.0, 0.0, 0.5);
                    }
                    _ => {}
                }
            }
            Event::Resize(cols, rows) => {
                self.renderer
                    .resize(cols as usize / 2, rows.saturating_sub(1) as usize, None);
            }
            _ => {}
        }
        Ok(())
    }

    fn update(&mut self) {
        // Continuous slow rotation around a tilted axis through the center
        let center = self.mesh.center();
        let mut tip = center;
        tip.translate(0.35, 1.0, 0.2);
        self.mesh.rotate(&Line::new(center, tip), 0.02);
    }

    fn render(&mut self) -> io::Result<()> {
        let frame = self.renderer.render_mesh(&self.mesh);

        let mut stdout = stdout();

        for (row, line) in frame.lines().enumerate() {
            queue!(stdout, cursor::MoveTo(0, row as u16 + 1), Print(line))?;
        }

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "TG3D Terminal Renderer | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll +/-=Scale J/K=Dolly Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
