use glam::Vec2;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// One touch callback worth of gesture input.
///
/// Deltas are raw pixel values; the camera applies its own sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureEvent {
    /// A new gesture started at the given reference point.
    Begin { position: Vec2 },
    /// The tracked pointers moved by `delta` since the last callback.
    Move { pointers: u8, delta: Vec2 },
}

/// Camera operation selected for a move event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CameraAction {
    Pan { delta: Vec2 },
    Zoom { delta_distance: f32 },
    ZoomAndRotate { delta: Vec2 },
    Reset,
}

/// Maps a move event's pointer count onto a camera operation.
///
/// One finger pans, two fingers zoom (the `y` component carries the
/// inter-finger distance change), three fingers zoom and rotate
/// together, four fingers reset. Anything else is ignored.
pub fn map_gesture(pointers: u8, delta: Vec2) -> Option<CameraAction> {
    match pointers {
        1 => Some(CameraAction::Pan { delta }),
        2 => Some(CameraAction::Zoom {
            delta_distance: delta.y,
        }),
        3 => Some(CameraAction::ZoomAndRotate { delta }),
        4 => Some(CameraAction::Reset),
        _ => None,
    }
}

/// Thread-safe queue carrying gesture events from the input callback
/// thread to the render thread.
///
/// Producers push from whichever thread delivers touch events; the
/// render thread drains every pending event before its tick, keeping the
/// camera single-writer.
#[derive(Debug, Default)]
pub struct GestureQueue {
    events: Mutex<Vec<GestureEvent>>,
}

impl GestureQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues one event from the input side.
    pub fn push(&self, event: GestureEvent) {
        self.events.lock().push(event);
    }

    /// Removes and returns every pending event in arrival order.
    pub fn drain(&self) -> Vec<GestureEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn pointer_counts_select_the_documented_actions() {
        let delta = Vec2::new(3.0, -7.0);
        assert_eq!(map_gesture(1, delta), Some(CameraAction::Pan { delta }));
        assert_eq!(
            map_gesture(2, delta),
            Some(CameraAction::Zoom {
                delta_distance: -7.0
            })
        );
        assert_eq!(
            map_gesture(3, delta),
            Some(CameraAction::ZoomAndRotate { delta })
        );
        assert_eq!(map_gesture(4, delta), Some(CameraAction::Reset));
    }

    #[test]
    fn unsupported_pointer_counts_are_ignored() {
        assert_eq!(map_gesture(0, Vec2::ONE), None);
        assert_eq!(map_gesture(5, Vec2::ONE), None);
    }

    #[test]
    fn queue_drains_in_arrival_order() {
        let queue = GestureQueue::new();
        queue.push(GestureEvent::Begin {
            position: Vec2::ZERO,
        });
        queue.push(GestureEvent::Move {
            pointers: 1,
            delta: Vec2::X,
        });
        queue.push(GestureEvent::Move {
            pointers: 4,
            delta: Vec2::ZERO,
        });

        let drained = queue.drain();
        assert_eq!(drained.len(), 3);
        assert!(matches!(drained[0], GestureEvent::Begin { .. }));
        assert!(matches!(drained[1], GestureEvent::Move { pointers: 1, .. }));
        assert!(matches!(drained[2], GestureEvent::Move { pointers: 4, .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn queue_accepts_events_from_another_thread() {
        let queue = Arc::new(GestureQueue::new());
        let producer = Arc::clone(&queue);
        let handle = std::thread::spawn(move || {
            for i in 0..8 {
                producer.push(GestureEvent::Move {
                    pointers: 1,
                    delta: Vec2::new(i as f32, 0.0),
                });
            }
        });
        handle.join().unwrap();

        let drained = queue.drain();
        assert_eq!(drained.len(), 8);
        assert_eq!(
            drained[7],
            GestureEvent::Move {
                pointers: 1,
                delta: Vec2::new(7.0, 0.0),
            }
        );
    }
}
