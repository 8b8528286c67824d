use glam::{Mat4, Vec3};

/// Field of view in degrees.
pub const FOV_DEFAULT: f32 = 45.0;
pub const FOV_MIN: f32 = 1.0;
pub const FOV_MAX: f32 = 60.0;
pub const Z_NEAR: f32 = 0.1;
pub const Z_FAR: f32 = 100.0;
/// Uniform scale applied to the model.
pub const MODEL_SCALE: f32 = 0.2;
/// Initial rotation of the model about `-Z`, in degrees.
pub const MODEL_ANGLE: f32 = 20.0;
/// Rotation added to the model every frame while rotating, in degrees.
pub const ROTATION_INCREMENT: f32 = 0.4;
/// Number of increments in a full turn.
pub const ROTATION_STEPS: u32 = 900;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, -3.0);

/// Receives the matrices of a [`Transformations`]. Usually a shader program
/// with `projection`, `view` and `model` uniforms.
pub trait UniformSink {
    fn set_mat4(&mut self, name: &str, value: &Mat4);
}

/// Width over height. A zero height falls back to 1, so a minimized window
/// doesn't produce a degenerate projection.
pub fn aspect_ratio(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

/// The projection, view and model matrices of a viewer, and the state needed
/// to update them from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformations {
    projection: Mat4,
    view: Mat4,
    model: Mat4,
    view_rotation: Mat4,
    camera_pos: Vec3,
    fov: f32,
    step: u32,
}

impl Transformations {
    pub fn new(aspect: f32) -> Self {
        let mut xf = Transformations {
            projection: Mat4::IDENTITY,
            view: Mat4::from_translation(CAMERA_POSITION),
            model: Mat4::IDENTITY,
            view_rotation: Mat4::IDENTITY,
            camera_pos: CAMERA_POSITION,
            fov: FOV_DEFAULT,
            step: 0,
        };
        xf.update_projection(aspect);
        xf.model = Self::model_matrix(MODEL_ANGLE);
        xf
    }

    fn model_matrix(angle: f32) -> Mat4 {
        Mat4::from_translation(Vec3::ZERO)
            * Mat4::from_axis_angle(-Vec3::Z, angle.to_radians())
            * Mat4::from_scale(Vec3::splat(MODEL_SCALE))
    }

    pub fn update_projection(&mut self, aspect: f32) {
        self.projection = Mat4::perspective_rh_gl(self.fov.to_radians(), aspect, Z_NEAR, Z_FAR);
    }

    /// Zoom in by `delta` degrees. The projection is not updated.
    pub fn update_fov(&mut self, delta: f32) {
        self.fov = (self.fov - delta).clamp(FOV_MIN, FOV_MAX);
    }

    /// Advance the model rotation by one increment.
    pub fn update_model(&mut self) {
        let angle = MODEL_ANGLE + ROTATION_INCREMENT * self.step as f32;
        self.model = Self::model_matrix(angle);
        self.step = (self.step + 1) % ROTATION_STEPS;
    }

    pub fn update_view(&mut self) {
        self.view = Mat4::from_translation(self.camera_pos) * self.view_rotation.inverse();
    }

    /// Rotate the camera about the `X` and `Y` axes, angles in radians. The
    /// view matrix is not updated.
    pub fn rotate_view(&mut self, x_angle: f32, y_angle: f32) {
        self.view_rotation = self.view_rotation
            * Mat4::from_rotation_x(-x_angle)
            * Mat4::from_rotation_y(-y_angle);
    }

    /// Spin both the model and the camera a little.
    pub fn constant_rotation(&mut self) {
        self.update_model();
        self.rotate_view(0.01, 0.0);
        self.update_view();
    }

    pub fn apply(&self, sink: &mut impl UniformSink) {
        sink.set_mat4("projection", &self.projection);
        sink.set_mat4("view", &self.view);
        sink.set_mat4("model", &self.model);
    }

    /// Camera position, a point it looks at, and its up direction, in world
    /// space.
    pub fn eye(&self) -> (Vec3, Vec3, Vec3) {
        let inv = self.view.inverse();
        let pos = inv.transform_point3(Vec3::ZERO);
        let target = pos + inv.transform_vector3(Vec3::NEG_Z);
        let up = inv.transform_vector3(Vec3::Y);
        (pos, target, up)
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn step(&self) -> u32 {
        self.step
    }
}

impl Default for Transformations {
    fn default() -> Self {
        Self::new(aspect_ratio(800, 600))
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;

    use glam::{Mat4, Vec3, vec3};

    use super::{
        CAMERA_POSITION, FOV_MAX, FOV_MIN, ROTATION_STEPS, Transformations, UniformSink,
        aspect_ratio,
    };
    use crate::macros::{assert_f32_eq, assert_mat4_eq, assert_vec3_eq};

    impl UniformSink for HashMap<String, Mat4> {
        fn set_mat4(&mut self, name: &str, value: &Mat4) {
            self.insert(name.to_string(), *value);
        }
    }

    #[test]
    fn t_initial_matrices() {
        let xf = Transformations::new(aspect_ratio(800, 600));
        assert_mat4_eq!(
            xf.projection(),
            Mat4::perspective_rh_gl(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
        );
        assert_mat4_eq!(xf.view(), Mat4::from_translation(CAMERA_POSITION));
        // Scaled down, then turned clockwise when seen from +Z.
        let a = 20f32.to_radians();
        assert_vec3_eq!(
            xf.model().transform_point3(Vec3::X),
            vec3(0.2 * a.cos(), -0.2 * a.sin(), 0.0)
        );
        assert_eq!(xf.step(), 0);
    }

    #[test]
    fn t_fov_clamp() {
        let mut xf = Transformations::default();
        xf.update_fov(10.0);
        assert_f32_eq!(xf.fov(), 35.0);
        xf.update_fov(-100.0);
        assert_f32_eq!(xf.fov(), FOV_MAX);
        xf.update_fov(100.0);
        assert_f32_eq!(xf.fov(), FOV_MIN);
        xf.update_projection(1.0);
        assert_mat4_eq!(
            xf.projection(),
            Mat4::perspective_rh_gl(1f32.to_radians(), 1.0, 0.1, 100.0)
        );
    }

    #[test]
    fn t_model_rotation_wraps() {
        let mut xf = Transformations::default();
        let initial = xf.model();
        xf.update_model();
        // The first update uses the initial angle.
        assert_mat4_eq!(xf.model(), initial);
        assert_eq!(xf.step(), 1);
        for _ in 1..ROTATION_STEPS {
            xf.update_model();
        }
        assert_eq!(xf.step(), 0);
        // Steps are per instance.
        assert_eq!(Transformations::default().step(), 0);
    }

    #[test]
    fn t_rotate_view() {
        let mut xf = Transformations::default();
        xf.rotate_view(0.3, 0.7);
        // The view only changes when updated.
        assert_mat4_eq!(xf.view(), Mat4::from_translation(CAMERA_POSITION));
        xf.update_view();
        let (pos, target, up) = xf.eye();
        assert_f32_eq!(pos.length(), 3.0, 1e-5);
        // Still looking at the origin.
        assert_vec3_eq!((target - pos).normalize(), -pos.normalize(), 1e-5);
        assert_f32_eq!(up.length(), 1.0, 1e-5);
        assert_f32_eq!(up.dot(target - pos), 0.0, 1e-5);
    }

    #[test]
    fn t_constant_rotation() {
        let mut xf = Transformations::default();
        xf.constant_rotation();
        let mut expected = Transformations::default();
        expected.update_model();
        expected.rotate_view(0.01, 0.0);
        expected.update_view();
        assert_eq!(xf, expected);
        assert_ne!(xf.view(), Transformations::default().view());
    }

    #[test]
    fn t_apply() {
        let xf = Transformations::default();
        let mut uniforms = HashMap::new();
        xf.apply(&mut uniforms);
        assert_eq!(uniforms.len(), 3);
        assert_eq!(uniforms["projection"], xf.projection());
        assert_eq!(uniforms["view"], xf.view());
        assert_eq!(uniforms["model"], xf.model());
    }

    #[test]
    fn t_aspect_ratio() {
        assert_f32_eq!(aspect_ratio(800, 400), 2.0);
        assert_f32_eq!(aspect_ratio(800, 0), 1.0);
    }
}
