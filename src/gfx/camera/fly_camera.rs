//! Free-fly camera driven by Euler angles
//!
//! Orientation is stored as yaw and pitch in degrees. The front, right and up
//! vectors are always derived from those angles, so they form a right-handed
//! orthonormal basis after every orientation change.

use cgmath::*;

use super::camera_utils::{CameraUniform, OPENGL_TO_WGPU_MATRIX};

/// Default yaw, looking down -Z
pub const YAW: f32 = -90.0;
pub const PITCH: f32 = 0.0;
pub const SPEED: f32 = 2.5;
pub const SENSITIVITY: f32 = 0.1;
pub const ZOOM: f32 = 45.0;

/// Pitch limit that keeps the basis away from the world-up singularity
pub const MAX_PITCH: f32 = 89.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 45.0;

const Z_NEAR: f32 = 0.1;
const Z_FAR: f32 = 100.0;

/// Direction of a keyboard-driven camera translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy)]
pub struct FlyCamera {
    pub position: Point3<f32>,
    front: Vector3<f32>,
    up: Vector3<f32>,
    right: Vector3<f32>,
    world_up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    pub movement_speed: f32,
    pub mouse_sensitivity: f32,
    zoom: f32,
}

impl FlyCamera {
    /// Creates a camera at `position` looking along the direction given by `yaw` and `pitch`
    pub fn new(position: Point3<f32>, world_up: Vector3<f32>, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: -Vector3::unit_z(),
            up: world_up,
            right: Vector3::unit_x(),
            world_up,
            yaw,
            pitch,
            movement_speed: SPEED,
            mouse_sensitivity: SENSITIVITY,
            zoom: ZOOM,
        };
        camera.update_camera_vectors();
        camera
    }

    /// Camera at `position` with +Y up and the default orientation
    pub fn at(position: Point3<f32>) -> Self {
        Self::new(position, Vector3::unit_y(), YAW, PITCH)
    }

    pub fn front(&self) -> Vector3<f32> {
        self.front
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn right(&self) -> Vector3<f32> {
        self.right
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Vertical field of view in degrees
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Look-at transform from the camera position toward `position + front`
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection using the current zoom, in wgpu clip space
    pub fn projection_matrix(&self, aspect: f32) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(Deg(self.zoom), aspect, Z_NEAR, Z_FAR)
    }

    /// Moves the camera along its basis, scaled by speed and elapsed seconds
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
            CameraMovement::Up => self.position += self.up * velocity,
            CameraMovement::Down => self.position -= self.up * velocity,
        }
    }

    /// Applies a cursor offset in pixels to yaw and pitch
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }

        self.update_camera_vectors();
    }

    /// Narrows or widens the field of view from a vertical scroll offset
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform::from_matrices(
            self.view_matrix(),
            self.projection_matrix(aspect),
            self.position,
        )
    }

    fn update_camera_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        let front = Vector3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.front = front.normalize();
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::at(Point3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    const EPS: f32 = 1e-5;

    fn assert_vec_eq(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual - expected).magnitude() < EPS,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_basis_is_orthonormal() {
        let mut rng = StdRng::seed_from_u64(0x1a57);
        for _ in 0..2000 {
            let yaw = rng.random_range(0.0..360.0);
            let pitch = rng.random_range(-89.0..=89.0);
            let camera = FlyCamera::new(Point3::origin(), Vector3::unit_y(), yaw, pitch);

            let (f, r, u) = (camera.front(), camera.right(), camera.up());
            assert!((f.magnitude() - 1.0).abs() < EPS);
            assert!((r.magnitude() - 1.0).abs() < EPS);
            assert!((u.magnitude() - 1.0).abs() < EPS);
            assert!(f.dot(r).abs() < EPS, "yaw {yaw} pitch {pitch}");
            assert!(f.dot(u).abs() < EPS, "yaw {yaw} pitch {pitch}");
            assert!(r.dot(u).abs() < EPS, "yaw {yaw} pitch {pitch}");
            // right-handed: right x up points backwards
            assert_vec_eq(r.cross(u), -f);
        }
    }

    #[test]
    fn test_default_orientation_has_no_rotation() {
        let camera = FlyCamera::new(Point3::origin(), Vector3::unit_y(), YAW, PITCH);
        assert_vec_eq(camera.front(), Vector3::new(0.0, 0.0, -1.0));
        assert_vec_eq(camera.right(), Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(camera.up(), Vector3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_forward_moves_along_front() {
        let mut camera = FlyCamera::new(Point3::origin(), Vector3::unit_y(), YAW, PITCH);
        camera.process_keyboard(CameraMovement::Forward, 1.0);
        assert_vec_eq(camera.position.to_vec(), Vector3::new(0.0, 0.0, -2.5));
    }

    #[test]
    fn test_movement_directions_cancel() {
        let start = Point3::new(1.0, 2.0, 3.0);
        let mut camera = FlyCamera::at(start);
        for (there, back) in [
            (CameraMovement::Forward, CameraMovement::Backward),
            (CameraMovement::Left, CameraMovement::Right),
            (CameraMovement::Up, CameraMovement::Down),
        ] {
            camera.process_keyboard(there, 0.4);
            camera.process_keyboard(back, 0.4);
        }
        assert_vec_eq(camera.position.to_vec(), start.to_vec());

        camera.process_keyboard(CameraMovement::Up, 2.0);
        assert_vec_eq(camera.position.to_vec(), Vector3::new(1.0, 7.0, 3.0));
    }

    #[test]
    fn test_zero_delta_time_does_not_move() {
        let mut camera = FlyCamera::default();
        let before = camera.position;
        camera.process_keyboard(CameraMovement::Left, 0.0);
        assert_eq!(camera.position, before);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::default();
        // 1200 px * 0.1 sensitivity would put pitch at 120 degrees
        camera.process_mouse_movement(0.0, 1200.0, true);
        assert_eq!(camera.pitch(), 89.0);

        camera.process_mouse_movement(0.0, -5000.0, true);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn test_unconstrained_pitch_accumulates() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(0.0, 1200.0, false);
        assert!((camera.pitch() - 120.0).abs() < 1e-3);
    }

    #[test]
    fn test_mouse_movement_scales_by_sensitivity() {
        let mut camera = FlyCamera::default();
        camera.process_mouse_movement(900.0, 0.0, true);
        assert!((camera.yaw() - 0.0).abs() < 1e-3);
        // yaw 0 looks down +X
        assert_vec_eq(camera.front(), Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = FlyCamera::default();
        for _ in 0..10 {
            camera.process_mouse_scroll(-3.0);
        }
        assert_eq!(camera.zoom(), MAX_ZOOM);

        for _ in 0..100 {
            camera.process_mouse_scroll(1.0);
        }
        assert_eq!(camera.zoom(), MIN_ZOOM);

        camera.process_mouse_scroll(-4.0);
        assert_eq!(camera.zoom(), 5.0);
    }

    #[test]
    fn test_view_matrix_looks_down_front() {
        let camera = FlyCamera::at(Point3::new(0.0, 0.0, 3.0));
        let view = camera.view_matrix();

        let eye = view * camera.position.to_homogeneous();
        assert_vec_eq(eye.truncate(), Vector3::zero());

        let ahead = view * (camera.position + camera.front()).to_homogeneous();
        assert_vec_eq(ahead.truncate(), Vector3::new(0.0, 0.0, -1.0));
    }
}
