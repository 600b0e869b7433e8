use std::sync::Arc;

use log::{info, warn};
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowAttributes, WindowId},
};

use crate::{
    config::AppConfig,
    error::{LanternError, Result},
    gfx::rendering::RenderEngine,
    input::{FrameTimer, KeyboardState},
    lessons::{Lesson, LessonContext},
};

/// Runs the configured lesson in its own window until it is closed
pub struct LanternApp {
    config: AppConfig,
}

/// The window, the renderer and the lesson drawn into it
struct Running {
    window: Arc<Window>,
    engine: RenderEngine,
    lesson: Box<dyn Lesson>,
}

struct AppState {
    config: AppConfig,
    running: Option<Running>,
    keys: KeyboardState,
    timer: FrameTimer,
    error: Option<LanternError>,
}

impl LanternApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Runs the event loop. An error raised by any callback stops the loop and
    /// is returned here.
    pub fn run(self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut state = AppState {
            config: self.config,
            running: None,
            keys: KeyboardState::new(),
            timer: FrameTimer::new(),
            error: None,
        };
        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let kind = self.config.lesson;
        let window = Arc::new(
            event_loop.create_window(
                WindowAttributes::default()
                    .with_title(format!("{}: {}", self.config.window.title, kind))
                    .with_inner_size(LogicalSize::new(
                        self.config.window.width,
                        self.config.window.height,
                    )),
            )?,
        );

        let (width, height) = window.inner_size().into();
        let engine = pollster::block_on(RenderEngine::new(
            Arc::clone(&window),
            width,
            height,
            self.config.vsync,
        ))?;

        let ctx = LessonContext {
            device: engine.device(),
            queue: engine.queue(),
            surface_format: engine.surface_format(),
            config: &self.config,
        };
        let lesson = kind.init(&ctx)?;
        info!("Started lesson {}", lesson.name());

        if self.config.capture_cursor && kind.uses_camera() {
            capture_cursor(&window);
        }

        Ok(Running {
            window,
            engine,
            lesson,
        })
    }

    /// Records the first error and asks the loop to stop
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: LanternError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
        event_loop.exit();
    }

    fn handle_window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<()> {
        let Some(running) = self.running.as_mut() else {
            return Ok(());
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if is_escape_press(&event) {
                    event_loop.exit();
                }
                self.keys.handle_event(&event);
            }
            WindowEvent::Focused(false) => {
                self.keys.clear();
                running.lesson.on_focus_lost();
            }
            WindowEvent::CursorMoved { position, .. } => {
                running.lesson.on_mouse_move(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => running.lesson.on_scroll(&delta),
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                running.engine.resize(width, height);
            }
            WindowEvent::RedrawRequested => {
                let delta_time = self.timer.tick();
                running.lesson.on_keys(&self.keys, delta_time);

                let lesson = &mut running.lesson;
                running
                    .engine
                    .render_frame(self.timer.elapsed(), |frame| lesson.draw(frame))?;
            }
            _ => (),
        }
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() || self.error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => {
                self.timer = FrameTimer::new();
                self.running = Some(running);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        if let Err(err) = self.handle_window_event(event_loop, event) {
            self.fail(event_loop, err);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = &self.running {
            running.window.request_redraw();
        }
    }
}

fn is_escape_press(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
}

/// Hides the cursor and keeps it inside the window. Platforms without grab
/// support keep a free cursor.
fn capture_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grabbed {
        warn!("Could not capture the cursor: {err}");
    }
    window.set_cursor_visible(false);
}
