/// Terminal viewer for text-mode 3D rendering
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tm3d_core::{Mesh, RenderStyle, Renderer, RotationState};

/// Rows reserved above the render grid for the status line.
const STATUS_ROWS: u16 = 1;

/// Interactive viewer: fixed-tick auto-rotation with manual keyboard
/// override.
pub struct TerminalApp {
    mesh: Mesh,
    rotation: RotationState,
    style: RenderStyle,
    auto_rotate: bool,
    rotation_speed: f64,
    renderer: Renderer,
    running: bool,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, style: RenderStyle, rotation_speed: f64) -> io::Result<Self> {
        if mesh.is_empty() || mesh.max_extent() <= 0.0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "mesh has no renderable geometry",
            ));
        }
        let (width, height) = terminal::size()?;

        Ok(Self {
            mesh,
            rotation: RotationState::zero(),
            style,
            auto_rotate: true,
            rotation_speed,
            renderer: grid_renderer(width, height),
            running: true,
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
        let tick = Duration::from_millis(50);

        while self.running {
            let frame_start = Instant::now();

            self.render()?;

            while frame_start.elapsed() < tick {
                let remaining = tick.saturating_sub(frame_start.elapsed());
                if event::poll(remaining)? {
                    self.handle_event(event::read()?);
                }
            }

            if self.auto_rotate {
                self.rotation.rotate(0.0, self.rotation_speed, 0.0);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent {
                code, modifiers, ..
            }) => self.handle_key(code, modifiers),
            Event::Resize(width, height) => {
                self.renderer = grid_renderer(width, height);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }
        match code {
            KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.auto_rotate = !self.auto_rotate;
            }
            KeyCode::Char('w') | KeyCode::Up => self.manual_rotate(0.1, 0.0, 0.0),
            KeyCode::Char('s') | KeyCode::Down => self.manual_rotate(-0.1, 0.0, 0.0),
            KeyCode::Char('a') | KeyCode::Left => self.manual_rotate(0.0, 0.1, 0.0),
            KeyCode::Char('d') | KeyCode::Right => self.manual_rotate(0.0, -0.1, 0.0),
            KeyCode::Char('q') => self.manual_rotate(0.0, 0.0, 0.1),
            KeyCode::Char('e') => self.manual_rotate(0.0, 0.0, -0.1),
            KeyCode::Char('v') => {
                self.style = match self.style {
                    RenderStyle::Solid => RenderStyle::Wireframe,
                    RenderStyle::Wireframe => RenderStyle::Solid,
                };
            }
            KeyCode::Char('r') => {
                self.rotation.reset();
                self.auto_rotate = true;
            }
            _ => {}
        }
    }

    /// Manual rotation takes over from the auto-rotate ticker.
    fn manual_rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.auto_rotate = false;
        self.rotation.rotate(dx, dy, dz);
    }

    fn render(&mut self) -> io::Result<()> {
        // A shrunken terminal can leave no room for the grid; skip the
        // frame until the next resize event.
        let Ok(grid) = self.renderer.render(&self.mesh, &self.rotation, self.style) else {
            return Ok(());
        };

        let mut stdout = stdout();

        let style_name = match self.style {
            RenderStyle::Solid => "solid",
            RenderStyle::Wireframe => "wireframe",
        };
        let rotation_status = if self.auto_rotate {
            "auto-rotating"
        } else {
            "manual"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | {} | {} | X:{:.1} Y:{:.1} Z:{:.1} | space=pause v=style r=reset esc=quit",
                self.mesh.name, style_name, rotation_status,
                self.rotation.x, self.rotation.y, self.rotation.z
            )),
            ResetColor
        )?;

        for (row, line) in grid.lines().enumerate() {
            queue!(
                stdout,
                cursor::MoveTo(0, STATUS_ROWS + row as u16),
                Print(line)
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}

/// Size a renderer to the terminal, leaving room for the status line.
fn grid_renderer(width: u16, height: u16) -> Renderer {
    Renderer::new(width as usize, height.saturating_sub(STATUS_ROWS) as usize)
}
