use winit::{dpi::PhysicalPosition, event::MouseScrollDelta, keyboard::KeyCode};

use super::fly_camera::{CameraMovement, FlyCamera};
use crate::input::KeyboardState;

/// Pixels of trackpad scroll that count as one wheel notch
const PIXELS_PER_LINE: f32 = 20.0;

const KEY_BINDINGS: [(KeyCode, CameraMovement); 6] = [
    (KeyCode::KeyW, CameraMovement::Forward),
    (KeyCode::KeyS, CameraMovement::Backward),
    (KeyCode::KeyA, CameraMovement::Left),
    (KeyCode::KeyD, CameraMovement::Right),
    (KeyCode::Space, CameraMovement::Up),
    (KeyCode::ControlLeft, CameraMovement::Down),
];

/// Turns window input into camera movement
///
/// Cursor positions are absolute, so the controller remembers the previous
/// position and feeds the difference to the camera. The first position after
/// creation (or after [`CameraController::reset_cursor`]) only primes that
/// memory, which keeps the view from jumping when the cursor enters the window.
pub struct CameraController {
    pub constrain_pitch: bool,
    first_mouse: bool,
    last_x: f64,
    last_y: f64,
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            constrain_pitch: true,
            first_mouse: true,
            last_x: 0.0,
            last_y: 0.0,
        }
    }

    pub fn process_cursor_position(&mut self, x: f64, y: f64, camera: &mut FlyCamera) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
        }

        let x_offset = (x - self.last_x) as f32;
        // window y grows downward
        let y_offset = (self.last_y - y) as f32;
        self.last_x = x;
        self.last_y = y;

        camera.process_mouse_movement(x_offset, y_offset, self.constrain_pitch);
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta, camera: &mut FlyCamera) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(_, y) => *y,
            MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / PIXELS_PER_LINE,
        };
        camera.process_mouse_scroll(scroll);
    }

    /// Applies every held movement key for this frame
    pub fn process_keyboard(&self, keys: &KeyboardState, delta_time: f32, camera: &mut FlyCamera) {
        for (code, movement) in KEY_BINDINGS {
            if keys.is_pressed(code) {
                camera.process_keyboard(movement, delta_time);
            }
        }
    }

    /// Forgets the last cursor position so the next one re-primes it
    pub fn reset_cursor(&mut self) {
        self.first_mouse = true;
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
