//! Surface that records draw calls instead of rasterizing them.

use serde::Serialize;

use super::{Surface, TextStyle};

/// One recorded draw call
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Circle {
        center: [f32; 2],
        radius: f32,
        color: [f32; 4],
        alpha: f32,
    },
    Text {
        text: String,
        position: [f32; 2],
        font_size: f32,
        glow_blur: f32,
    },
}

/// Headless surface keeping a log of draw calls
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Change the reported size, as a window resize would
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the log, e.g. once per frame
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of circles drawn since the last clear
    pub fn circles_since_clear(&self) -> usize {
        self.since_clear()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Text drawn since the last clear
    pub fn texts_since_clear(&self) -> Vec<&str> {
        self.since_clear()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn since_clear(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear))
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.commands[start..]
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, center: [f32; 2], radius: f32, color: [f32; 4], alpha: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
            alpha,
        });
    }

    fn draw_text(&mut self, text: &str, position: [f32; 2], style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            position,
            font_size: style.font_size,
            glow_blur: style.glow_blur,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        surface.fill_circle([1.0, 1.0], 2.0, [1.0; 4], 1.0);
        surface.clear();
        surface.fill_circle([5.0, 5.0], 3.0, [1.0; 4], 0.5);
        surface.draw_text("HI", [100.0, 50.0], &TextStyle::default());

        assert_eq!(surface.commands().len(), 4);
        assert_eq!(surface.circles_since_clear(), 1);
        assert_eq!(surface.texts_since_clear(), vec!["HI"]);
    }

    #[test]
    fn test_center_follows_resize() {
        let mut surface = RecordingSurface::new(200.0, 100.0);
        assert_eq!(surface.center(), [100.0, 50.0]);
        surface.resize(640.0, 480.0);
        assert_eq!(surface.center(), [320.0, 240.0]);
    }

    #[test]
    fn test_take_commands_drains() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.clear();
        assert_eq!(surface.take_commands(), vec![DrawCommand::Clear]);
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn test_serializes_commands() {
        let json = serde_json::to_string(&DrawCommand::Clear).unwrap();
        assert_eq!(json, r#"{"op":"clear"}"#);
    }
}
