use std::sync::Arc;

use anyhow::Result;
use log::debug;

use crate::camera::Camera;
use crate::gesture::{map_gesture, CameraAction, GestureEvent, GestureQueue};
use crate::render::{FrameParams, Rasterizer};
use crate::scene::Scene;

/// Owning context for one viewer instance: the camera, the scene and the
/// pending-gesture queue. Callers hold exactly one `Viewer` per surface;
/// there is no ambient shared state.
#[derive(Debug)]
pub struct Viewer {
    camera: Camera,
    scene: Scene,
    gestures: Arc<GestureQueue>,
}

impl Viewer {
    /// Creates a viewer showing the default five-solid arrangement.
    pub fn new() -> Result<Self> {
        Ok(Self::with_scene(Scene::default_arrangement()?))
    }

    /// Creates a viewer over a prepared scene.
    pub fn with_scene(scene: Scene) -> Self {
        Self {
            camera: Camera::new(),
            scene,
            gestures: Arc::new(GestureQueue::new()),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Handle for the input side: touch callbacks push events through
    /// this clone while the viewer drains them on the render thread.
    pub fn gesture_queue(&self) -> Arc<GestureQueue> {
        Arc::clone(&self.gestures)
    }

    /// Applies a single gesture event to the camera.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Begin { position } => {
                debug!("gesture began at ({}, {})", position.x, position.y);
            }
            GestureEvent::Move { pointers, delta } => match map_gesture(pointers, delta) {
                Some(CameraAction::Pan { delta }) => self.camera.pan(delta.x, delta.y),
                Some(CameraAction::Zoom { delta_distance }) => self.camera.zoom(delta_distance),
                Some(CameraAction::ZoomAndRotate { delta }) => {
                    self.camera.zoom(delta.y);
                    self.camera.rotate(delta.x, delta.y);
                }
                Some(CameraAction::Reset) => self.camera.reset(),
                None => debug!("ignoring gesture with {pointers} pointer(s)"),
            },
        }
    }

    /// Drains every pending gesture into the camera, in arrival order.
    pub fn drain_gestures(&mut self) {
        for event in self.gestures.drain() {
            self.handle_gesture(event);
        }
    }

    /// Propagates a viewport resize to the projection.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        let height = height.max(1);
        self.camera.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Runs one render tick: refreshes the camera's derived state, draws
    /// the scene in insertion order and returns the frame matrices.
    pub fn render(&mut self, rasterizer: &mut dyn Rasterizer) -> FrameParams {
        self.camera.update();
        self.scene.draw(rasterizer);
        FrameParams {
            view: self.camera.view_matrix(),
            projection: self.camera.projection_matrix(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use glam::{Vec2, Vec3};

    #[derive(Default)]
    struct CountingRasterizer {
        draw_calls: usize,
    }

    impl Rasterizer for CountingRasterizer {
        fn draw_mesh(&mut self, _mesh: &Mesh) {
            self.draw_calls += 1;
        }
    }

    fn move_event(pointers: u8, dx: f32, dy: f32) -> GestureEvent {
        GestureEvent::Move {
            pointers,
            delta: Vec2::new(dx, dy),
        }
    }

    #[test]
    fn one_finger_pans_and_four_fingers_reset() {
        let mut viewer = Viewer::new().unwrap();
        viewer.handle_gesture(move_event(1, 200.0, 0.0));
        assert!(viewer
            .camera()
            .eye()
            .abs_diff_eq(Vec3::new(-2.0, 0.0, -5.0), 1e-5));

        viewer.handle_gesture(move_event(4, 0.0, 0.0));
        assert_eq!(viewer.camera().eye(), Vec3::new(0.0, 0.0, -5.0));
    }

    #[test]
    fn three_fingers_zoom_and_rotate_together() {
        let mut viewer = Viewer::new().unwrap();
        viewer.handle_gesture(move_event(3, 50.0, 100.0));
        assert!(viewer
            .camera()
            .eye()
            .abs_diff_eq(Vec3::new(0.0, 0.0, -4.0), 1e-5));
        assert!(viewer
            .camera()
            .center()
            .abs_diff_eq(Vec3::new(-0.5, 1.0, 0.0), 1e-5));
    }

    #[test]
    fn queued_gestures_apply_in_arrival_order_on_drain() {
        let mut viewer = Viewer::new().unwrap();
        let queue = viewer.gesture_queue();
        queue.push(move_event(1, 100.0, 0.0));
        queue.push(move_event(2, 0.0, 50.0));
        queue.push(GestureEvent::Begin {
            position: Vec2::ZERO,
        });

        viewer.drain_gestures();
        assert!(queue.is_empty());
        assert!(viewer
            .camera()
            .eye()
            .abs_diff_eq(Vec3::new(-1.0, 0.0, -4.5), 1e-5));
    }

    #[test]
    fn render_draws_the_scene_and_reports_matrices() {
        let mut viewer = Viewer::new().unwrap();
        viewer.set_viewport(1920, 1080);
        let mut rasterizer = CountingRasterizer::default();
        let frame = viewer.render(&mut rasterizer);
        assert_eq!(rasterizer.draw_calls, 5);
        assert!(frame.view.is_finite());
        assert!(frame.projection.is_finite());
        assert_eq!(frame.view, viewer.camera().view_matrix());
    }

    #[test]
    fn zero_height_viewport_does_not_break_the_projection() {
        let mut viewer = Viewer::new().unwrap();
        viewer.set_viewport(800, 0);
        assert!(viewer.camera().projection_matrix().is_finite());
    }
}
