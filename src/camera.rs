use glam::{Mat4, Vec3};
use log::debug;

/// Scale applied to raw pixel deltas before they move the camera.
pub const GESTURE_SENSITIVITY: f32 = 0.01;

const FOV_Y_DEGREES: f32 = 45.0;
const NEAR_PLANE: f32 = 0.001;
const FAR_PLANE: f32 = 100.0;

const INITIAL_EYE: Vec3 = Vec3::new(0.0, 0.0, -5.0);
const INITIAL_CENTER: Vec3 = Vec3::ZERO;
const INITIAL_UP: Vec3 = Vec3::Y;

/// Look-at camera driven by multi-touch gesture deltas.
///
/// Every mutator recomputes the view matrix synchronously; there is no
/// deferred state. Matrices are column-major `glam` matrices with a GL
/// depth range, ready for uniform upload.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    center: Vec3,
    up: Vec3,
    aspect: f32,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Creates the camera in its reset configuration with a square
    /// projection; callers pass the real ratio via [`set_aspect_ratio`].
    ///
    /// [`set_aspect_ratio`]: Self::set_aspect_ratio
    pub fn new() -> Self {
        let mut camera = Self {
            eye: INITIAL_EYE,
            center: INITIAL_CENTER,
            up: INITIAL_UP,
            aspect: 1.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.set_aspect_ratio(1.0);
        camera.refresh_view();
        camera
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Shifts eye and center together in X/Y so the look direction is
    /// unchanged; a translation of the whole rig.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.eye.x -= delta_x * GESTURE_SENSITIVITY;
        self.eye.y += delta_y * GESTURE_SENSITIVITY;
        self.center.x -= delta_x * GESTURE_SENSITIVITY;
        self.center.y += delta_y * GESTURE_SENSITIVITY;
        self.refresh_view();
        debug!("pan dx={delta_x} dy={delta_y}");
    }

    /// Moves the eye along Z toward or away from the center. The
    /// distance is not clamped; the degeneracy fallback in
    /// `refresh_view` absorbs an eye passing through the center.
    pub fn zoom(&mut self, delta_distance: f32) {
        self.eye.z += delta_distance * GESTURE_SENSITIVITY;
        self.refresh_view();
        debug!("zoom dd={delta_distance}");
    }

    /// Shifts the look target in X/Y, approximating an orbit by turning
    /// the view rather than moving the eye.
    pub fn rotate(&mut self, delta_x: f32, delta_y: f32) {
        self.center.x -= delta_x * GESTURE_SENSITIVITY;
        self.center.y += delta_y * GESTURE_SENSITIVITY;
        self.refresh_view();
        debug!("rotate dx={delta_x} dy={delta_y}");
    }

    /// Restores the initial eye/center/up configuration.
    pub fn reset(&mut self) {
        self.eye = INITIAL_EYE;
        self.center = INITIAL_CENTER;
        self.up = INITIAL_UP;
        self.refresh_view();
        debug!("reset camera");
    }

    /// Rebuilds the projection for a new viewport width/height ratio.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect = aspect_ratio.max(0.01);
        self.projection = Mat4::perspective_rh_gl(
            FOV_Y_DEGREES.to_radians(),
            self.aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
    }

    /// Recomputes the view matrix from the current state without
    /// changing any value; called once per render tick.
    pub fn update(&mut self) {
        self.refresh_view();
    }

    /// Rebuilds the look-at matrix, keeping the previous one when the
    /// configuration is degenerate (eye on center, or up parallel to the
    /// view direction) so NaNs never reach the rasterizer.
    fn refresh_view(&mut self) {
        let candidate = Mat4::look_at_rh(self.eye, self.center, self.up);
        if candidate.is_finite() {
            self.view = candidate;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
