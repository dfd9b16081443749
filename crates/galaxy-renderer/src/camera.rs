//! Free-flying camera for 3D visualization

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Camera uniform for GPU. Field names match the `Camera` block in the shader.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub projection: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub _padding: [f32; 2],
}

impl CameraUniform {
    pub fn new(view: Mat4, projection: Mat4, viewport: Vec2) -> Self {
        Self {
            projection: projection.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            viewport: viewport.to_array(),
            _padding: [0.0; 2],
        }
    }
}

/// Direction keys for [`FlyCamera::translate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

/// First-person camera: a position plus yaw/pitch look direction.
pub struct FlyCamera {
    pub position: Vec3,
    /// Degrees, -90 looks down -Z
    pub yaw: f32,
    /// Degrees, clamped to ±89
    pub pitch: f32,
    pub up: Vec3,
    /// Units per second
    pub speed: f32,
    pub aspect: f32,
    pub fovy: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl FlyCamera {
    const MAX_PITCH: f32 = 89.0;

    /// Camera above and in front of the galaxy, looking down at the center.
    pub fn new(width: u32, height: u32, galaxy_size: f32) -> Self {
        Self {
            position: Vec3::new(0.0, galaxy_size / 4.0, galaxy_size / 4.0),
            yaw: -90.0,
            pitch: -45.0,
            up: Vec3::Y,
            speed: 1000.0,
            aspect: width as f32 / height.max(1) as f32,
            fovy: 45.0_f32.to_radians(),
            znear: 0.1,
            zfar: galaxy_size * 2.0,
        }
    }

    /// Unit look direction
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(self.up).normalize()
    }

    pub fn translate(&mut self, movement: CameraMovement, dt: f32) {
        let distance = self.speed * dt;
        let offset = match movement {
            CameraMovement::Forward => self.front() * distance,
            CameraMovement::Backward => -self.front() * distance,
            CameraMovement::Left => -self.right() * distance,
            CameraMovement::Right => self.right() * distance,
        };
        self.position += offset;
    }

    /// Turn by the given yaw/pitch deltas in degrees.
    pub fn rotate(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch = (self.pitch + delta_pitch).clamp(-Self::MAX_PITCH, Self::MAX_PITCH);
    }

    /// Scale the movement speed, keeping it within sane bounds.
    pub fn scale_speed(&mut self, factor: f32) {
        self.speed = (self.speed * factor).clamp(1.0, self.zfar);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front(), self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy, self.aspect, self.znear, self.zfar)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_view_faces_center() {
        let camera = FlyCamera::new(1366, 768, 100_000.0);
        let expected = Vec3::new(0.0, -1.0, -1.0).normalize();
        assert!(camera.front().abs_diff_eq(expected, 1e-5));
        assert_eq!(camera.position, Vec3::new(0.0, 25_000.0, 25_000.0));
        assert_eq!(camera.zfar, 200_000.0);
    }

    #[test]
    fn test_translate() {
        let mut camera = FlyCamera::new(800, 600, 1000.0);
        let start = camera.position;
        camera.translate(CameraMovement::Forward, 0.5);
        assert!((camera.position - start).abs_diff_eq(camera.front() * 500.0, 1e-2));

        camera.position = start;
        camera.translate(CameraMovement::Right, 1.0);
        camera.translate(CameraMovement::Left, 1.0);
        assert!(camera.position.abs_diff_eq(start, 1e-2));
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = FlyCamera::new(800, 600, 1000.0);
        camera.rotate(0.0, 500.0);
        assert_eq!(camera.pitch, 89.0);
        camera.rotate(0.0, -500.0);
        assert_eq!(camera.pitch, -89.0);
    }

    #[test]
    fn test_attractor_in_front_of_camera() {
        let camera = FlyCamera::new(800, 600, 1000.0);
        let clip = camera.projection_matrix() * camera.view_matrix() * Vec3::ZERO.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.x.abs() < 1e-3 && ndc.y.abs() < 1e-3);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }
}
