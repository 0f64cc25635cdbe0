/// Terminal front end: frame scheduler, input and ASCII wireframe output
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use wirecube_core::{Camera, Frame, SceneModel};

pub mod config;
pub mod error;
pub mod renderer;

pub use config::{Cli, RunSettings};
pub use error::{AppError, Result};
pub use renderer::LineRenderer;

/// Terminal cells are roughly twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;

fn camera_for(width: usize, height: usize) -> Camera {
    Camera::with_aspect(width as f32 / (height.max(1) as f32 * CELL_ASPECT))
}

/// Main application struct for the terminal wireframe cube
pub struct TerminalApp {
    scene: SceneModel,
    camera: Camera,
    renderer: LineRenderer,
    settings: RunSettings,
    frame: Option<Frame>,
    running: bool,
    paused: bool,
    last_fps_check: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: SceneModel, settings: RunSettings) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(scene, settings, width as usize, height as usize))
    }

    pub fn with_size(scene: SceneModel, settings: RunSettings, width: usize, height: usize) -> Self {
        Self {
            scene,
            camera: camera_for(width, height),
            renderer: LineRenderer::new(width, height),
            settings,
            frame: None,
            running: true,
            paused: false,
            last_fps_check: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn scene(&self) -> &SceneModel {
        &self.scene
    }

    pub fn renderer(&self) -> &LineRenderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        log::info!(
            "starting frame loop, interval {:?}",
            self.settings.frame_interval
        );

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;
        log::info!("stopped after {} frames", self.scene.frames());

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Drain pending input without blocking the frame
            while event::poll(Duration::from_millis(0))? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.update();
            self.compose();
            self.present()?;

            let elapsed = frame_start.elapsed();
            if elapsed < self.settings.frame_interval {
                std::thread::sleep(self.settings.frame_interval - elapsed);
            }

            self.frame_count += 1;
            let since = self.last_fps_check.elapsed();
            if since.as_secs() >= 1 {
                self.fps = self.frame_count as f32 / since.as_secs_f32();
                self.frame_count = 0;
                self.last_fps_check = Instant::now();
            }
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                    log::debug!("paused: {}", self.paused);
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer.resize(width as usize, height as usize);
                self.camera = camera_for(width as usize, height as usize);
            }
            _ => {}
        }
    }

    /// Advance the scene one frame unless paused
    pub fn update(&mut self) {
        if self.paused {
            return;
        }
        self.frame = Some(self.scene.advance());

        if let Some(limit) = self.settings.frame_limit {
            if self.scene.frames() >= limit {
                self.running = false;
            }
        }
    }

    /// Rasterize the latest frame into the character buffer
    pub fn compose(&mut self) {
        self.renderer.clear();
        if let Some(frame) = &self.frame {
            self.renderer.render_frame(frame, &self.camera);
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let state = match (self.paused, self.scene.is_settled()) {
            (true, _) => "paused",
            (false, Ok(true)) => "settled",
            (false, Ok(false)) => "moving",
            (false, Err(_)) => "malformed",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Transform 3D | angle {:>3.0} | {} | FPS: {:.1} | Space=Pause Q=Quit",
                self.scene.angle(),
                state,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Advance `frames` frames without a terminal and print each primitive's final points
pub fn run_headless<W: Write>(scene: &mut SceneModel, frames: u64, out: &mut W) -> Result<()> {
    let mut last = None;
    for _ in 0..frames {
        last = Some(scene.advance());
    }

    if let Some(frame) = last {
        writeln!(out, "frame {} angle {}", scene.frames(), frame.angle)?;
        for primitive in &frame.primitives {
            let points: Vec<String> = primitive
                .points
                .iter()
                .map(|p| format!("({:.3}, {:.3}, {:.3})", p.x, p.y, p.z))
                .collect();
            writeln!(out, "{:?} {:?}: {}", primitive.role, primitive.kind, points.join(" "))?;
        }
        for role in &frame.skipped {
            writeln!(out, "{:?}: skipped", role)?;
        }
    }
    writeln!(
        out,
        "settled: {} max deviation: {:.4}",
        scene.is_settled()?,
        scene.max_deviation()?
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn app() -> TerminalApp {
        let scene = SceneModel::reference().unwrap();
        TerminalApp::with_size(scene, RunSettings::default(), 80, 24)
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_update_and_compose() {
        let mut app = app();
        app.compose();
        assert_eq!(app.renderer().filled(), 0);

        app.update();
        app.compose();
        assert_eq!(app.scene().frames(), 1);
        assert!(app.renderer().filled() > 0);
    }

    #[test]
    fn test_pause_and_quit() {
        let mut app = app();
        app.handle_event(key(' '));
        assert!(app.is_paused());
        app.update();
        assert_eq!(app.scene().frames(), 0);

        app.handle_event(key(' '));
        app.update();
        assert_eq!(app.scene().frames(), 1);

        app.handle_event(key('q'));
        assert!(!app.is_running());
    }

    #[test]
    fn test_frame_limit_stops_loop() {
        let scene = SceneModel::reference().unwrap();
        let settings = RunSettings {
            frame_limit: Some(3),
            ..RunSettings::default()
        };
        let mut app = TerminalApp::with_size(scene, settings, 80, 24);
        app.update();
        app.update();
        assert!(app.is_running());
        app.update();
        assert!(!app.is_running());
    }

    #[test]
    fn test_resize() {
        let mut app = app();
        app.handle_event(Event::Resize(40, 10));
        assert_eq!(app.renderer().width(), 40);
        assert_eq!(app.renderer().height(), 10);
    }

    #[test]
    fn test_headless_output() {
        let mut scene = SceneModel::reference().unwrap();
        let mut out = Vec::new();
        run_headless(&mut scene, 600, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("frame 600 angle"));
        assert!(text.contains("FrontFace LineLoop"));
        assert!(text.contains("Edge(BottomRight) Lines"));
        assert!(text.contains("settled: true"));
    }
}
