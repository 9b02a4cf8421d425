//! Drawing surface abstraction
//!
//! The engine renders through [`Surface`], a minimal immediate-mode 2D API
//! (clear, alpha-blended filled circles, styled text). Hosts adapt it to
//! whatever canvas or GPU pipeline they draw with.

mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use serde::{Deserialize, Serialize};

/// Horizontal text anchoring
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical text anchoring
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
}

/// Font and glow styling for captions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f32,
    pub bold: bool,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Fill color (RGBA)
    pub color: [f32; 4],
    /// Glow (shadow) color (RGBA)
    pub glow_color: [f32; 4],
    /// Glow blur radius in pixels
    pub glow_blur: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 56.0,
            bold: true,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
            color: [1.0, 1.0, 1.0, 1.0],
            glow_color: [1.0, 1.0, 1.0, 0.8],
            glow_blur: 20.0,
        }
    }
}

/// 2D drawing target
///
/// Calls are synchronous and must not block; the engine issues them from its
/// per-frame step.
pub trait Surface {
    /// Current `(width, height)` in pixels. May change between frames.
    fn size(&self) -> (f32, f32);

    /// Clear the whole surface
    fn clear(&mut self);

    /// Fill a circle with `color` modulated by `alpha` (0 = transparent)
    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: [f32; 4], alpha: f32);

    /// Draw `text` anchored at `position` according to `style`
    fn draw_text(&mut self, text: &str, position: [f32; 2], style: &TextStyle);

    /// Center point of the surface
    fn center(&self) -> [f32; 2] {
        let (width, height) = self.size();
        [width / 2.0, height / 2.0]
    }
}
