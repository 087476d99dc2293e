//! Error types
//!
//! Drawing and frame operations report failures through [`Error`]. The
//! window and GPU layer uses `anyhow` instead.

use thiserror::Error;

/// Errors raised by canvas, control panel and frame operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested font family is not registered.
    #[error("not a valid font face: {0:?} (expected \"serif\" or \"sans-serif\")")]
    InvalidFontFace(String),

    /// The text alignment pair is not one of the recognized values.
    #[error("invalid alignment ({horizontal:?}, {vertical:?}): expected (left|center|right, top|middle|bottom)")]
    InvalidAlignment {
        horizontal: String,
        vertical: String,
    },

    /// A color name that is neither a palette entry, a known color name
    /// nor a `#rrggbb` literal.
    #[error("unknown color: {0:?}")]
    UnknownColor(String),

    /// A control panel operation on a frame created without a panel.
    #[error("frame has no control panel (control panel width is 0)")]
    NoControlPanel,

    /// Image decoding or encoding failed.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Result alias for drawing and frame operations.
pub type Result<T> = std::result::Result<T, Error>;
