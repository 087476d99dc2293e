//! Frame settings
//!
//! Configuration for frame creation.

use crate::event::Key;

/// Which surfaces are redrawn on a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawPolicy {
    /// Redraw the canvas and the control panel every tick.
    #[default]
    Both,
    /// Alternate between the control panel and the canvas on successive
    /// ticks. Frames without a control panel redraw the canvas every tick.
    Alternate,
}

/// Settings for creating a frame.
#[derive(Debug, Clone)]
pub struct FrameSettings {
    /// Window title.
    pub title: String,
    /// Canvas size (width, height) in pixels.
    pub size: (u32, u32),
    /// Control panel width in pixels; 0 means no control panel.
    pub control_panel_width: u32,
    /// Target ticks per second.
    pub fps: u32,
    /// Initial canvas background color name.
    pub canvas_color: String,
    /// Control panel background color name.
    pub control_panel_color: String,
    /// Redraw scheduling.
    pub redraw_policy: RedrawPolicy,
    /// Key that saves a screenshot.
    pub screenshot_key: Key,
}

impl Default for FrameSettings {
    fn default() -> Self {
        Self {
            title: "easel".to_string(),
            size: (640, 480),
            control_panel_width: 0,
            fps: 60,
            canvas_color: "Black".to_string(),
            control_panel_color: "Gray".to_string(),
            redraw_policy: RedrawPolicy::Both,
            screenshot_key: Key::PrintScreen,
        }
    }
}

impl FrameSettings {
    /// Create new frame settings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the window title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the canvas size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    /// Set the control panel width.
    pub fn control_panel_width(mut self, width: u32) -> Self {
        self.control_panel_width = width;
        self
    }

    /// Set the target frame rate. Clamped to at least 1.
    pub fn fps(mut self, fps: u32) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Set the canvas background color.
    pub fn canvas_color(mut self, color: impl Into<String>) -> Self {
        self.canvas_color = color.into();
        self
    }

    /// Set the control panel background color.
    pub fn control_panel_color(mut self, color: impl Into<String>) -> Self {
        self.control_panel_color = color.into();
        self
    }

    /// Set the redraw policy.
    pub fn redraw_policy(mut self, policy: RedrawPolicy) -> Self {
        self.redraw_policy = policy;
        self
    }

    /// Set the screenshot hotkey.
    pub fn screenshot_key(mut self, key: Key) -> Self {
        self.screenshot_key = key;
        self
    }

    /// Window size: the canvas plus the control panel beside it.
    pub fn window_size(&self) -> (u32, u32) {
        (self.size.0 + self.control_panel_width, self.size.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = FrameSettings::default();
        assert_eq!(settings.size, (640, 480));
        assert_eq!(settings.control_panel_width, 0);
        assert_eq!(settings.fps, 60);
        assert_eq!(settings.redraw_policy, RedrawPolicy::Both);
        assert_eq!(settings.screenshot_key, Key::PrintScreen);
    }

    #[test]
    fn test_builder() {
        let settings = FrameSettings::new()
            .title("demo")
            .size(300, 200)
            .control_panel_width(100)
            .fps(0)
            .redraw_policy(RedrawPolicy::Alternate);
        assert_eq!(settings.title, "demo");
        assert_eq!(settings.window_size(), (400, 200));
        assert_eq!(settings.fps, 1);
        assert_eq!(settings.redraw_policy, RedrawPolicy::Alternate);
    }
}
