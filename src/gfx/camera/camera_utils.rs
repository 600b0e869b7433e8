use cgmath::{Matrix4, Point3, SquareMatrix};
use winit::event::MouseScrollDelta;

use super::{camera_controller::CameraController, fly_camera::FlyCamera};
use crate::input::KeyboardState;

/// Maps OpenGL clip-space depth (-1..1) onto the 0..1 range wgpu expects
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Owns the lesson camera together with the controller that feeds it input
pub struct CameraManager {
    pub camera: FlyCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: FlyCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Manager for a camera starting at `position` with default orientation
    pub fn at(position: Point3<f32>) -> Self {
        Self::new(FlyCamera::at(position), CameraController::new())
    }

    pub fn process_cursor(&mut self, x: f64, y: f64) {
        self.controller.process_cursor_position(x, y, &mut self.camera);
    }

    /// Re-primes the cursor so the next position does not turn the camera
    pub fn reset_cursor(&mut self) {
        self.controller.reset_cursor();
    }

    pub fn process_scroll(&mut self, delta: &MouseScrollDelta) {
        self.controller.process_scroll(delta, &mut self.camera);
    }

    pub fn process_keys(&mut self, keys: &KeyboardState, delta_time: f32) {
        self.controller.process_keyboard(keys, delta_time, &mut self.camera);
    }

    /// Per-frame uniform for the current camera state
    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        self.camera.uniform(aspect)
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],

    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],
}

impl CameraUniform {
    pub fn from_matrices(
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        position: Point3<f32>,
    ) -> Self {
        Self {
            view: view.into(),
            projection: projection.into(),
            view_position: [position.x, position.y, position.z, 1.0],
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::from_matrices(
            Matrix4::identity(),
            Matrix4::identity(),
            Point3::new(0.0, 0.0, 0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
    }

    #[test]
    fn test_depth_is_remapped_to_unit_range() {
        let near = OPENGL_TO_WGPU_MATRIX * cgmath::Vector4::new(0.0, 0.0, -1.0, 1.0);
        let far = OPENGL_TO_WGPU_MATRIX * cgmath::Vector4::new(0.0, 0.0, 1.0, 1.0);
        assert_eq!(near.z, 0.0);
        assert_eq!(far.z, 1.0);
    }

    #[test]
    fn test_depth_remap_keeps_perspective_divide() {
        let projection = cgmath::perspective(cgmath::Deg(45.0), 1.0, 0.1, 100.0);
        let point = cgmath::Vector4::new(10.0, 0.0, -50.0, 1.0);
        let gl = projection * point;
        let wgpu = OPENGL_TO_WGPU_MATRIX * gl;
        assert_eq!(wgpu.w, gl.w);
        assert!((wgpu.x / wgpu.w - gl.x / gl.w).abs() < 1e-6);

        // just past the near plane must stay inside the 0..1 depth range
        let close = OPENGL_TO_WGPU_MATRIX * projection * cgmath::Vector4::new(0.0, 0.0, -0.15, 1.0);
        let depth = close.z / close.w;
        assert!(depth > 0.0 && depth < 1.0, "depth {depth}");
    }

    #[test]
    fn test_reset_cursor_ignores_jump_after_focus_returns() {
        let mut manager = CameraManager::at(Point3::new(0.0, 0.0, 3.0));
        manager.process_cursor(400.0, 300.0);
        let front = manager.camera.front();

        manager.reset_cursor();
        manager.process_cursor(10.0, 580.0);
        assert_eq!(manager.camera.front(), front);

        manager.process_cursor(20.0, 580.0);
        assert_ne!(manager.camera.front(), front);
    }

    #[test]
    fn test_uniform_carries_eye_position() {
        let manager = CameraManager::at(Point3::new(0.5, 1.0, 4.0));
        let uniform = manager.uniform(800.0 / 600.0);
        assert_eq!(uniform.view_position, [0.5, 1.0, 4.0, 1.0]);
    }
}
