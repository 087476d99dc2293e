//! easel
//!
//! A small 2D drawing and event framework: a window with a canvas,
//! an optional control panel of buttons and labels beside it, and input
//! events dispatched to user handlers at a fixed frame rate.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **color** / **font** / **resources** - palette, font cache and the
//!    bundle shared by a frame's canvases
//! 2. **canvas** - pixel surfaces and the drawing primitives
//! 3. **panel** - control panel layout and click dispatch
//! 4. **frame** - handlers, event dispatch, redraw scheduling, screenshots
//! 5. **context** / **present** - wgpu device and screen presentation
//! 6. **window** - winit event loop (feature = "window")
//!
//! Everything up to **frame** runs without a window, so a [`Frame`] can
//! be driven from tests with [`Frame::tick`].

pub mod canvas;
pub mod color;
pub mod context;
pub mod error;
pub mod event;
pub mod font;
pub mod frame;
pub mod panel;
pub mod present;
pub mod resources;
pub mod sound;

#[cfg(feature = "window")]
pub mod window;

// Re-export commonly used types
pub use canvas::{Align, Canvas, Image, ImageInfo, Surface};
pub use color::{Color, ColorRef, Palette};
pub use error::{Error, Result};
pub use event::{Event, Key, MouseButton};
pub use font::{Font, FontCache, FontFace};
pub use frame::{Frame, FrameSettings, RedrawPolicy, StopHandle};
pub use panel::{Control, ControlId, ControlPanel, ImageSprite, Sprite};
pub use resources::Resources;
pub use sound::Sound;

// Re-export glam for convenience
pub use glam;
