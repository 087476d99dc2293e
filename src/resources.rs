//! Shared drawing resources
//!
//! Every canvas of a frame resolves colors and fonts through the same
//! [`Resources`], held behind an `Rc`. The frame clears it on quit.

use crate::color::{Color, ColorRef, Palette};
use crate::error::Result;
use crate::font::FontCache;
use std::cell::{RefCell, RefMut};
use std::rc::Rc;

/// Palette and font cache shared by the canvases of one frame.
pub struct Resources {
    palette: Palette,
    fonts: RefCell<FontCache>,
}

impl Resources {
    /// Create a fresh set of resources.
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            palette: Palette::new(),
            fonts: RefCell::new(FontCache::new()),
        })
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Resolve a color through the palette.
    pub fn color<'a>(&self, color: impl Into<ColorRef<'a>>) -> Result<Color> {
        self.palette.resolve(color)
    }

    /// Borrow the font cache.
    ///
    /// Panics if the cache is already borrowed, which can only happen when
    /// a drawing call re-enters itself.
    pub fn fonts(&self) -> RefMut<'_, FontCache> {
        self.fonts.borrow_mut()
    }

    /// Release cached fonts.
    pub fn clear(&self) {
        self.fonts.borrow_mut().clear();
    }
}

impl std::fmt::Debug for Resources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resources")
            .field("fonts", &self.fonts.borrow().len())
            .finish()
    }
}
