//! Control panel elements
//!
//! Each control is anchored at the horizontal center of its top edge.

use crate::canvas::{Align, Canvas, Image};
use crate::color::Color;
use crate::error::Result;
use glam::Vec2;
use std::fmt;
use std::rc::Rc;

/// Handler invoked when a button is clicked.
pub type ButtonHandler = Box<dyn FnMut()>;

/// Something that can be shown inside a [`SpriteContainer`].
pub trait Sprite {
    /// Size in pixels.
    fn size(&self) -> Vec2;

    /// Move the sprite so that its top-center sits at `pos`.
    fn set_position(&mut self, pos: Vec2);

    /// Draw the sprite.
    fn draw(&self, canvas: &mut Canvas) -> Result<()>;
}

/// A sprite showing an image.
#[derive(Debug, Clone)]
pub struct ImageSprite {
    image: Rc<Image>,
    pos: Vec2,
    angle: f32,
}

impl ImageSprite {
    pub fn new(image: Rc<Image>) -> Self {
        Self {
            image,
            pos: Vec2::ZERO,
            angle: 0.0,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn set_angle(&mut self, degrees: f32) {
        self.angle = degrees;
    }
}

impl Sprite for ImageSprite {
    fn size(&self) -> Vec2 {
        let (w, h) = self.image.dimensions();
        Vec2::new(w as f32, h as f32)
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        let top_left = self.pos - Vec2::new(self.size().x / 2.0, 0.0);
        canvas.draw_image(&self.image, top_left, self.angle);
        Ok(())
    }
}

/// A clickable button.
pub struct Button {
    text: String,
    handler: ButtonHandler,
    pos: Vec2,
    size: Vec2,
    font_height: u32,
    color: Color,
}

impl Button {
    /// Fill color of buttons.
    pub const COLOR: Color = Color::rgb(190, 190, 190);

    pub fn new(
        text: impl Into<String>,
        handler: ButtonHandler,
        pos: Vec2,
        width: f32,
        font_height: u32,
    ) -> Self {
        Self {
            text: text.into(),
            handler,
            pos,
            size: Vec2::new(width, 2.0 * font_height as f32),
            font_height,
            color: Self::COLOR,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn font_height(&self) -> u32 {
        self.font_height
    }

    /// Whether `point` falls on the button: within half the width either
    /// side of the anchor and between the top and bottom edges.
    pub fn contains(&self, point: Vec2) -> bool {
        let d = point - self.pos;
        -self.size.x / 2.0 <= d.x && d.x <= self.size.x / 2.0 && 0.0 <= d.y && d.y <= self.size.y
    }

    /// Invoke the click handler.
    pub fn press(&mut self) {
        (self.handler)();
    }

    fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        let top_left = Vec2::new(self.pos.x - self.size.x / 2.0, self.pos.y);
        canvas.draw_rect(top_left, self.size, 1, "black", Some(self.color.into()))?;
        canvas.draw_text(
            &self.text,
            Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0),
            self.font_height,
            "black",
            "sans-serif",
            Align::CENTER,
        )
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("pos", &self.pos)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// A line of static text.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    pos: Vec2,
    size: Vec2,
    font_height: u32,
}

impl Label {
    pub fn new(text: impl Into<String>, pos: Vec2, width: f32, font_height: u32) -> Self {
        Self {
            text: text.into(),
            pos,
            size: Vec2::new(width, 2.0 * font_height as f32),
            font_height,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        canvas.draw_text(
            &self.text,
            Vec2::new(self.pos.x, self.pos.y + self.size.y / 2.0),
            self.font_height,
            "black",
            "sans-serif",
            Align::CENTER,
        )
    }
}

/// A slot holding an optional sprite.
pub struct SpriteContainer {
    pos: Vec2,
    sprite: Option<Box<dyn Sprite>>,
    size: Option<Vec2>,
}

impl SpriteContainer {
    pub fn new(sprite: Option<Box<dyn Sprite>>, pos: Vec2, size: Option<Vec2>) -> Self {
        let mut container = Self {
            pos,
            sprite: None,
            size,
        };
        container.set_sprite(sprite);
        container
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Replace the sprite, moving the new one to the container position.
    pub fn set_sprite(&mut self, sprite: Option<Box<dyn Sprite>>) {
        self.sprite = sprite.map(|mut sprite| {
            sprite.set_position(self.pos);
            sprite
        });
    }

    pub fn sprite(&self) -> Option<&dyn Sprite> {
        self.sprite.as_deref()
    }

    pub fn sprite_mut(&mut self) -> Option<&mut (dyn Sprite + 'static)> {
        self.sprite.as_deref_mut()
    }

    /// The explicit size, else the sprite's size, else zero.
    pub fn size(&self) -> Vec2 {
        self.size
            .or_else(|| self.sprite.as_ref().map(|s| s.size()))
            .unwrap_or(Vec2::ZERO)
    }

    fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        match &self.sprite {
            Some(sprite) => sprite.draw(canvas),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for SpriteContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpriteContainer")
            .field("pos", &self.pos)
            .field("has_sprite", &self.sprite.is_some())
            .field("size", &self.size())
            .finish()
    }
}

/// An element of the control panel.
#[derive(Debug)]
pub enum Control {
    Button(Button),
    Label(Label),
    SpriteContainer(SpriteContainer),
}

impl Control {
    pub fn pos(&self) -> Vec2 {
        match self {
            Control::Button(b) => b.pos(),
            Control::Label(l) => l.pos(),
            Control::SpriteContainer(c) => c.pos(),
        }
    }

    pub fn size(&self) -> Vec2 {
        match self {
            Control::Button(b) => b.size(),
            Control::Label(l) => l.size(),
            Control::SpriteContainer(c) => c.size(),
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) -> Result<()> {
        match self {
            Control::Button(b) => b.draw(canvas),
            Control::Label(l) => l.draw(canvas),
            Control::SpriteContainer(c) => c.draw(canvas),
        }
    }

    pub fn as_button_mut(&mut self) -> Option<&mut Button> {
        match self {
            Control::Button(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_label_mut(&mut self) -> Option<&mut Label> {
        match self {
            Control::Label(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_sprite_container_mut(&mut self) -> Option<&mut SpriteContainer> {
        match self {
            Control::SpriteContainer(c) => Some(c),
            _ => None,
        }
    }
}
