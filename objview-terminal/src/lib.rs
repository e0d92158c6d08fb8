/// Terminal wireframe viewer for objview meshes
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use objview_core::{MeshHolder, Transform};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::debug;

pub mod config;
pub mod projection;
pub mod renderer;

pub use config::ViewerConfig;
pub use projection::{Camera, ProjectionMode};
pub use renderer::WireframeRenderer;

/// Rows reserved for the status line
const STATUS_ROWS: u16 = 1;

/// Main application struct for terminal mesh viewing
pub struct TerminalApp {
    holder: MeshHolder,
    title: String,
    config: ViewerConfig,
    camera: Camera,
    renderer: WireframeRenderer,
    show_vertices: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(holder: MeshHolder, title: impl Into<String>, config: ViewerConfig) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let height = height.saturating_sub(STATUS_ROWS);

        Ok(Self {
            holder,
            title: title.into(),
            camera: Camera::new(width, height, config.projection),
            renderer: WireframeRenderer::new(width as usize, height as usize),
            show_vertices: config.show_vertices,
            config,
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
        let target_frame_time = Duration::from_millis(1000 / u64::from(self.config.fps));

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press | KeyEventKind::Repeat,
                ..
            }) => self.handle_key(code),
            Event::Resize(width, height) => {
                let height = height.saturating_sub(STATUS_ROWS);
                self.camera.resize(width, height);
                self.renderer = WireframeRenderer::new(width as usize, height as usize);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('p') => self.camera.mode = self.camera.mode.toggled(),
            KeyCode::Char('v') => self.show_vertices = !self.show_vertices,
            code => {
                if let Some(op) = transform_for_key(code, &self.config) {
                    debug!(?op, "applying transform");
                    self.holder.apply(op);
                }
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.renderer.clear();
        if let Some(mesh) = self.holder.current_mesh() {
            self.renderer
                .render_mesh(mesh, &self.camera, self.show_vertices);
        }

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(self.status_line()),
            ResetColor,
            cursor::MoveTo(0, STATUS_ROWS)
        )?;
        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn status_line(&self) -> String {
        let projection = match self.camera.mode {
            ProjectionMode::Parallel => "parallel",
            ProjectionMode::Central => "central",
        };
        let status = format!(
            "{} | vertices: {} | edges: {} | {} | FPS: {:.1} | Arrows/WASD=Rotate IJKL/UO=Move +/-=Scale P=Projection V=Vertices Q=Quit",
            self.title,
            self.holder.vertex_count(),
            self.holder.edge_count(),
            projection,
            self.fps
        );
        status.chars().take(self.renderer.width()).collect()
    }
}

/// Map a key to the transform it issues, if any.
pub fn transform_for_key(code: KeyCode, config: &ViewerConfig) -> Option<Transform> {
    let angle = config.rotate_step;
    let step = config.move_step;
    let op = match code {
        KeyCode::Up | KeyCode::Char('w') => Transform::rotate(-angle, 0.0, 0.0),
        KeyCode::Down | KeyCode::Char('s') => Transform::rotate(angle, 0.0, 0.0),
        KeyCode::Left | KeyCode::Char('a') => Transform::rotate(0.0, -angle, 0.0),
        KeyCode::Right | KeyCode::Char('d') => Transform::rotate(0.0, angle, 0.0),
        KeyCode::Char('e') => Transform::rotate(0.0, 0.0, angle),
        KeyCode::Char('r') => Transform::rotate(0.0, 0.0, -angle),
        KeyCode::Char('l') => Transform::translate(step, 0.0, 0.0),
        KeyCode::Char('j') => Transform::translate(-step, 0.0, 0.0),
        KeyCode::Char('i') => Transform::translate(0.0, step, 0.0),
        KeyCode::Char('k') => Transform::translate(0.0, -step, 0.0),
        KeyCode::Char('u') => Transform::translate(0.0, 0.0, step),
        KeyCode::Char('o') => Transform::translate(0.0, 0.0, -step),
        KeyCode::Char('+') | KeyCode::Char('=') => Transform::scale(config.scale_step),
        KeyCode::Char('-') => Transform::scale(1.0 / config.scale_step),
        _ => return None,
    };
    Some(op)
}
