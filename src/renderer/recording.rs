//! Draw-call recorder for tests and headless runs

use glam::DVec2;

use super::{Backdrop, CanvasSize, DrawSurface, Look};
use crate::sim::Color;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear(CanvasSize),
    Backdrop(Backdrop),
    Grid(f64),
    Road(f64),
    Sprite {
        pos: DVec2,
        look: Look,
        color: Color,
        label: String,
    },
    Vector {
        origin: DVec2,
        v: DVec2,
        color: Color,
        label: String,
    },
    DashedLine {
        from: DVec2,
        to: DVec2,
    },
    Path {
        points: Vec<DVec2>,
        color: Color,
    },
    Rain {
        around: DVec2,
        slant: f64,
    },
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCmd>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded sprites, in draw order
    pub fn sprites(&self) -> impl Iterator<Item = (&DVec2, &Look, &str)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCmd::Sprite {
                pos, look, label, ..
            } => Some((pos, look, label.as_str())),
            _ => None,
        })
    }

    /// Labels of recorded vectors
    pub fn vector_labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCmd::Vector { label, .. } => Some(label.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self, canvas: CanvasSize) {
        self.commands.clear();
        self.commands.push(DrawCmd::Clear(canvas));
    }

    fn backdrop(&mut self, backdrop: Backdrop) {
        self.commands.push(DrawCmd::Backdrop(backdrop));
    }

    fn grid(&mut self, spacing: f64) {
        self.commands.push(DrawCmd::Grid(spacing));
    }

    fn road(&mut self, y: f64) {
        self.commands.push(DrawCmd::Road(y));
    }

    fn sprite(&mut self, pos: DVec2, look: Look, color: Color, label: &str) {
        self.commands.push(DrawCmd::Sprite {
            pos,
            look,
            color,
            label: label.to_owned(),
        });
    }

    fn vector(&mut self, origin: DVec2, v: DVec2, color: Color, label: &str) {
        self.commands.push(DrawCmd::Vector {
            origin,
            v,
            color,
            label: label.to_owned(),
        });
    }

    fn dashed_line(&mut self, from: DVec2, to: DVec2) {
        self.commands.push(DrawCmd::DashedLine { from, to });
    }

    fn path(&mut self, points: &[DVec2], color: Color) {
        self.commands.push(DrawCmd::Path {
            points: points.to_vec(),
            color,
        });
    }

    fn rain(&mut self, around: DVec2, slant: f64, _time: f64) {
        self.commands.push(DrawCmd::Rain { around, slant });
    }
}
