//! Text alignment

use crate::error::{Error, Result};
use glam::Vec2;

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl HAlign {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(HAlign::Left),
            "center" => Some(HAlign::Center),
            "right" => Some(HAlign::Right),
            _ => None,
        }
    }

    fn index(self) -> f32 {
        match self {
            HAlign::Left => 0.0,
            HAlign::Center => 1.0,
            HAlign::Right => 2.0,
        }
    }
}

impl VAlign {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(VAlign::Top),
            "middle" => Some(VAlign::Middle),
            "bottom" => Some(VAlign::Bottom),
            _ => None,
        }
    }

    fn index(self) -> f32 {
        match self {
            VAlign::Top => 0.0,
            VAlign::Middle => 1.0,
            VAlign::Bottom => 2.0,
        }
    }
}

/// Where the anchor position sits on the rendered text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Align {
    pub horizontal: HAlign,
    pub vertical: VAlign,
}

impl Align {
    pub const TOP_LEFT: Align = Align::new(HAlign::Left, VAlign::Top);
    pub const CENTER: Align = Align::new(HAlign::Center, VAlign::Middle);

    pub const fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parse a `(horizontal, vertical)` name pair such as
    /// `("center", "middle")`.
    pub fn parse(horizontal: &str, vertical: &str) -> Result<Self> {
        match (HAlign::from_name(horizontal), VAlign::from_name(vertical)) {
            (Some(h), Some(v)) => Ok(Self::new(h, v)),
            _ => Err(Error::InvalidAlignment {
                horizontal: horizontal.to_string(),
                vertical: vertical.to_string(),
            }),
        }
    }

    /// Shift from the anchor to the top-left corner of a box of `size`.
    pub fn offset(self, size: Vec2) -> Vec2 {
        Vec2::new(
            self.horizontal.index() * 0.5 * size.x,
            self.vertical.index() * 0.5 * size.y,
        )
    }

    /// Top-left corner of a box of `size` anchored at `pos`.
    pub fn origin(self, pos: Vec2, size: Vec2) -> Vec2 {
        pos - self.offset(size)
    }
}

/// Values accepted as a text alignment.
pub trait IntoAlign {
    fn into_align(self) -> Result<Align>;
}

impl IntoAlign for Align {
    fn into_align(self) -> Result<Align> {
        Ok(self)
    }
}

impl IntoAlign for (&str, &str) {
    fn into_align(self) -> Result<Align> {
        Align::parse(self.0, self.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_pairs() {
        for h in ["left", "center", "right"] {
            for v in ["top", "middle", "bottom"] {
                assert!(Align::parse(h, v).is_ok(), "{h}/{v}");
            }
        }
        assert_eq!(Align::parse("center", "middle").unwrap(), Align::CENTER);
        assert_eq!(Align::default(), Align::TOP_LEFT);
    }

    #[test]
    fn test_invalid_pairs_fail_every_time() {
        for (h, v) in [("middle", "center"), ("left", "left"), ("", "top"), ("Left", "top")] {
            for _ in 0..2 {
                assert!(matches!(
                    (h, v).into_align(),
                    Err(Error::InvalidAlignment { .. })
                ));
            }
        }
    }

    #[test]
    fn test_center_middle_box_is_centered_on_anchor() {
        let pos = Vec2::new(100.0, 40.0);
        let size = Vec2::new(37.0, 19.0);
        let origin = Align::CENTER.origin(pos, size);
        assert_eq!(origin + size / 2.0, pos);
    }

    #[test]
    fn test_offsets() {
        let size = Vec2::new(20.0, 10.0);
        assert_eq!(Align::TOP_LEFT.offset(size), Vec2::ZERO);
        let bottom_right = Align::parse("right", "bottom").unwrap();
        assert_eq!(bottom_right.offset(size), size);
        assert_eq!(bottom_right.origin(Vec2::new(50.0, 50.0), size), Vec2::new(30.0, 40.0));
    }
}
