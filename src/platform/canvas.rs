//! Draw submission
//!
//! Coordinates are world units; the backend maps them through the active
//! [`View`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::assets::{FontId, TextureId};
use crate::sim::View;
use crate::sim::collision::Aabb;

/// RGBA color (8 bits per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Render target the level draws into each frame
pub trait Canvas {
    /// Start a frame looking through `view`
    fn begin_frame(&mut self, view: &View);

    fn fill_rect(&mut self, rect: Aabb, color: Color);

    fn draw_sprite(&mut self, rect: Aabb, texture: TextureId);

    fn draw_text(&mut self, text: &str, position: Vec2, size: u32, color: Color, font: FontId);

    /// Present the frame
    fn end_frame(&mut self);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Rect {
        rect: Aabb,
        color: Color,
    },
    Sprite {
        rect: Aabb,
        texture: TextureId,
    },
    Text {
        text: String,
        position: Vec2,
        size: u32,
        color: Color,
        font: FontId,
    },
}

/// Headless canvas that keeps the last frame's draw calls
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub view: Option<View>,
    pub commands: Vec<DrawCommand>,
    pub frames: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sprites drawn with `texture` in the last frame
    pub fn sprites_with(&self, texture: TextureId) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Sprite { texture: t, .. } if *t == texture))
            .count()
    }

    /// Text strings drawn in the last frame, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn begin_frame(&mut self, view: &View) {
        self.view = Some(*view);
        self.commands.clear();
    }

    fn fill_rect(&mut self, rect: Aabb, color: Color) {
        self.commands.push(DrawCommand::Rect { rect, color });
    }

    fn draw_sprite(&mut self, rect: Aabb, texture: TextureId) {
        self.commands.push(DrawCommand::Sprite { rect, texture });
    }

    fn draw_text(&mut self, text: &str, position: Vec2, size: u32, color: Color, font: FontId) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            size,
            color,
            font,
        });
    }

    fn end_frame(&mut self) {
        self.frames += 1;
    }
}
