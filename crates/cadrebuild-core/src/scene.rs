//! Output primitives and the sink that receives them.
//!
//! The reconstruction never owns the scene: it hands each primitive to a
//! [`SceneSink`] as soon as it is classified, one call per primitive.

use crate::geom::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("scene rejected {primitive}: {reason}")]
    Rejected {
        primitive: &'static str,
        reason: String,
    },
}

/// Creation API of the document that receives reconstructed geometry.
pub trait SceneSink {
    fn create_line(&mut self, start: Vec3, end: Vec3, color_index: i16) -> Result<(), SceneError>;

    /// `sweep_deg` is signed; positive turns counter-clockwise about `normal`.
    fn create_arc(
        &mut self,
        normal: Vec3,
        center: Vec3,
        start: Vec3,
        sweep_deg: f64,
    ) -> Result<(), SceneError>;

    fn create_circle(&mut self, normal: Vec3, center: Vec3, radius: f64) -> Result<(), SceneError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line3D {
    pub start: Vec3,
    pub end: Vec3,
    pub color_index: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arc3D {
    pub normal: Vec3,
    pub center: Vec3,
    pub start: Vec3,
    pub sweep_deg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle3D {
    pub normal: Vec3,
    pub center: Vec3,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive3D {
    Line(Line3D),
    Arc(Arc3D),
    Circle(Circle3D),
}

impl Primitive3D {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Primitive3D::Line(_) => "line",
            Primitive3D::Arc(_) => "arc",
            Primitive3D::Circle(_) => "circle",
        }
    }

    pub fn emit_into<S: SceneSink + ?Sized>(&self, scene: &mut S) -> Result<(), SceneError> {
        match self {
            Primitive3D::Line(l) => scene.create_line(l.start, l.end, l.color_index),
            Primitive3D::Arc(a) => scene.create_arc(a.normal, a.center, a.start, a.sweep_deg),
            Primitive3D::Circle(c) => scene.create_circle(c.normal, c.center, c.radius),
        }
    }
}

/// Scene that just keeps every primitive it is given, in call order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingScene {
    pub primitives: Vec<Primitive3D>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &Line3D> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive3D::Line(l) => Some(l),
            _ => None,
        })
    }

    pub fn arcs(&self) -> impl Iterator<Item = &Arc3D> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive3D::Arc(a) => Some(a),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle3D> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive3D::Circle(c) => Some(c),
            _ => None,
        })
    }
}

impl SceneSink for RecordingScene {
    fn create_line(&mut self, start: Vec3, end: Vec3, color_index: i16) -> Result<(), SceneError> {
        self.primitives.push(Primitive3D::Line(Line3D {
            start,
            end,
            color_index,
        }));
        Ok(())
    }

    fn create_arc(
        &mut self,
        normal: Vec3,
        center: Vec3,
        start: Vec3,
        sweep_deg: f64,
    ) -> Result<(), SceneError> {
        self.primitives.push(Primitive3D::Arc(Arc3D {
            normal,
            center,
            start,
            sweep_deg,
        }));
        Ok(())
    }

    fn create_circle(&mut self, normal: Vec3, center: Vec3, radius: f64) -> Result<(), SceneError> {
        self.primitives.push(Primitive3D::Circle(Circle3D {
            normal,
            center,
            radius,
        }));
        Ok(())
    }
}
