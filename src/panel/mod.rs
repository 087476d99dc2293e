//! Control panel
//!
//! A canvas beside the main one holding a vertical stack of controls.
//! Controls are laid out top to bottom in the order they were added and
//! never move afterwards.

pub mod control;

pub use control::{Button, ButtonHandler, Control, ImageSprite, Label, Sprite, SpriteContainer};

use crate::canvas::Canvas;
use crate::color::ColorRef;
use crate::error::Result;
use crate::resources::Resources;
use glam::Vec2;
use std::rc::Rc;
use tracing::debug;

/// Vertical gap above every control.
pub const SPACING: f32 = 5.0;

/// Handle to a control added to a [`ControlPanel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(usize);

impl ControlId {
    /// Position of the control in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Canvas plus an ordered list of controls.
#[derive(Debug)]
pub struct ControlPanel {
    canvas: Canvas,
    controls: Vec<Control>,
    spacing: f32,
}

impl ControlPanel {
    pub fn new<'a>(
        width: u32,
        height: u32,
        background: impl Into<ColorRef<'a>>,
        resources: Rc<Resources>,
    ) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(width, height, background, resources)?,
            controls: Vec::new(),
            spacing: SPACING,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Anchor for the next control: horizontally centered, below
    /// everything added so far.
    pub fn offset(&self) -> Vec2 {
        let y = self
            .controls
            .iter()
            .map(|c| self.spacing + c.size().y)
            .sum::<f32>();
        Vec2::new(self.canvas.width() as f32 / 2.0, y)
    }

    fn push(&mut self, control: Control) -> ControlId {
        debug!("Control panel: added {:?}", control);
        self.controls.push(control);
        ControlId(self.controls.len() - 1)
    }

    /// Append a button `width` pixels wide whose text is `font_height`
    /// pixels high.
    pub fn add_button(
        &mut self,
        text: impl Into<String>,
        handler: impl FnMut() + 'static,
        width: f32,
        font_height: u32,
    ) -> ControlId {
        let pos = self.offset();
        let button = Button::new(text, Box::new(handler), pos, width, font_height);
        self.push(Control::Button(button))
    }

    /// Append a label. Width defaults to the panel width and the font
    /// height to the canvas default.
    pub fn add_label(
        &mut self,
        text: impl Into<String>,
        width: Option<f32>,
        font_height: Option<u32>,
    ) -> ControlId {
        let pos = self.offset();
        let width = width.unwrap_or(self.canvas.width() as f32);
        let font_height = font_height.unwrap_or(self.canvas.default_font_height());
        self.push(Control::Label(Label::new(text, pos, width, font_height)))
    }

    /// Append a container, optionally holding a sprite.
    pub fn add_sprite_container(
        &mut self,
        sprite: Option<Box<dyn Sprite>>,
        size: Option<Vec2>,
    ) -> ControlId {
        let pos = self.offset();
        self.push(Control::SpriteContainer(SpriteContainer::new(
            sprite, pos, size,
        )))
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn control(&self, id: ControlId) -> Option<&Control> {
        self.controls.get(id.0)
    }

    pub fn control_mut(&mut self, id: ControlId) -> Option<&mut Control> {
        self.controls.get_mut(id.0)
    }

    pub fn button_mut(&mut self, id: ControlId) -> Option<&mut Button> {
        self.control_mut(id).and_then(Control::as_button_mut)
    }

    pub fn label_mut(&mut self, id: ControlId) -> Option<&mut Label> {
        self.control_mut(id).and_then(Control::as_label_mut)
    }

    pub fn sprite_container_mut(&mut self, id: ControlId) -> Option<&mut SpriteContainer> {
        self.control_mut(id).and_then(Control::as_sprite_container_mut)
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Clear to the background and draw every control.
    pub fn redraw(&mut self) -> Result<()> {
        self.canvas.draw_background();
        for control in &self.controls {
            control.draw(&mut self.canvas)?;
        }
        Ok(())
    }

    /// Press every button under `pos`, given relative to the panel
    /// origin. Returns how many were pressed.
    pub fn click(&mut self, pos: Vec2) -> usize {
        let mut pressed = 0;
        for control in &mut self.controls {
            if let Control::Button(button) = control {
                if button.contains(pos) {
                    button.press();
                    pressed += 1;
                }
            }
        }
        pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn panel() -> ControlPanel {
        ControlPanel::new(200, 300, "Gray", Resources::new()).unwrap()
    }

    #[test]
    fn test_empty_offset() {
        let panel = panel();
        assert_eq!(panel.offset(), Vec2::new(100.0, 0.0));
        assert!(panel.is_empty());
    }

    #[test]
    fn test_offset_accumulates_spacing_and_heights() {
        let mut panel = panel();
        let mut previous = panel.offset().y;
        let mut heights = 0.0;

        panel.add_button("a", || {}, 120.0, 10);
        heights += 20.0;
        panel.add_label("b", None, Some(8));
        heights += 16.0;
        panel.add_sprite_container(None, Some(Vec2::new(30.0, 40.0)));
        heights += 40.0;
        panel.add_sprite_container(None, None);

        assert_eq!(panel.len(), 4);
        assert_eq!(panel.offset().y, SPACING * 4.0 + heights);

        let mut seen = 0.0;
        for control in panel.controls() {
            seen += SPACING + control.size().y;
            assert!(seen >= previous);
            previous = seen;
        }
    }

    #[test]
    fn test_controls_stack_without_overlap() {
        let mut panel = panel();
        let first = panel.add_button("a", || {}, 120.0, 10);
        let second = panel.add_label("b", None, None);

        let a = panel.control(first).unwrap();
        let b = panel.control(second).unwrap();
        assert_eq!(a.pos(), Vec2::new(100.0, 0.0));
        assert_eq!(b.pos().y, a.pos().y + a.size().y + SPACING);
        assert_eq!(b.size(), Vec2::new(200.0, 32.0));
    }

    #[test]
    fn test_click_presses_matching_buttons() {
        let hits = Rc::new(Cell::new(0));
        let mut panel = panel();
        let counter = hits.clone();
        let id = panel.add_button("go", move || counter.set(counter.get() + 1), 100.0, 10);
        let button = panel.button_mut(id).unwrap();
        let center = button.pos() + Vec2::new(0.0, button.size().y / 2.0);

        assert_eq!(panel.click(center), 1);
        assert_eq!(hits.get(), 1);

        assert_eq!(panel.click(Vec2::new(0.0, 0.0)), 0);
        assert_eq!(panel.click(center + Vec2::new(51.0, 0.0)), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_stacked_buttons_pressed_separately() {
        let hits = Rc::new(Cell::new(0));
        let mut panel = panel();
        let a = hits.clone();
        let b = hits.clone();
        panel.add_button("a", move || a.set(a.get() + 1), 200.0, 10);
        panel.add_button("b", move || b.set(b.get() + 10), 200.0, 10);

        assert_eq!(panel.click(Vec2::new(100.0, 10.0)), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(panel.click(Vec2::new(100.0, 40.0)), 1);
        assert_eq!(hits.get(), 11);
    }

    #[test]
    fn test_labels_are_not_clickable() {
        let mut panel = panel();
        let id = panel.add_label("title", None, None);
        let label = panel.label_mut(id).unwrap();
        let inside = label.pos() + Vec2::new(0.0, 5.0);
        assert_eq!(panel.click(inside), 0);
        assert!(panel.button_mut(id).is_none());
    }

    #[test]
    fn test_label_text_can_change() {
        let mut panel = panel();
        let id = panel.add_label("before", None, None);
        panel.label_mut(id).unwrap().set_text("after");
        match panel.control(id) {
            Some(Control::Label(label)) => assert_eq!(label.text(), "after"),
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn test_redraw_clears_to_background() {
        let mut panel = panel();
        panel.add_sprite_container(None, None);
        panel.redraw().unwrap();
        let gray = panel.canvas().background_color();
        assert_eq!(panel.canvas().surface().pixel(0, 0), Some(gray));
        assert_eq!(panel.canvas().surface().pixel(199, 299), Some(gray));
    }
}
