use anyhow::{Context, Result};

use crate::render::Rasterizer;
use crate::shape::{Shape, ShapeKind};

/// Spacing between consecutive solids in the default arrangement.
const ARRANGEMENT_SPACING: f32 = 2.0;

/// Ordered collection of placed shapes.
///
/// The scene owns its shapes exclusively; insertion order is draw order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the default five-solid scene: cube, sphere, pyramid,
    /// cylinder and cone, offset along an alternating +Z/-Z chain.
    pub fn default_arrangement() -> Result<Self> {
        let kinds = [
            ShapeKind::Cube { size: 0.5 },
            ShapeKind::Sphere {
                radius: 0.75,
                slices: 20,
                stacks: 20,
            },
            ShapeKind::Pyramid { size: 0.5 },
            ShapeKind::Cylinder {
                radius: 0.5,
                height: 1.0,
                slices: 20,
            },
            ShapeKind::Cone {
                radius: 0.5,
                height: 1.0,
                slices: 20,
            },
        ];

        let mut scene = Self::new();
        for (slot, kind) in kinds.into_iter().enumerate() {
            let mut shape = Shape::new(kind)
                .with_context(|| format!("failed to generate the default {}", kind.name()))?;
            shape.translate(0.0, 0.0, arrangement_offset(slot));
            scene.push(shape);
        }
        Ok(scene)
    }

    /// Appends a shape; the scene takes exclusive ownership.
    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Draws every shape exactly once, in insertion order.
    pub fn draw(&self, rasterizer: &mut dyn Rasterizer) {
        for shape in &self.shapes {
            shape.draw(rasterizer);
        }
    }
}

/// Z offset for the arrangement slot: +2, -2, +4, -4, +6, ...
fn arrangement_offset(slot: usize) -> f32 {
    let distance = ARRANGEMENT_SPACING * (1 + slot / 2) as f32;
    if slot % 2 == 0 {
        distance
    } else {
        -distance
    }
}
