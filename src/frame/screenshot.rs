//! Numbered screenshot files

use crate::canvas::Surface;
use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Default screenshot file extension.
pub const DEFAULT_EXTENSION: &str = ".png";

/// Where screenshots go and how many have been taken.
#[derive(Debug, Clone, Default)]
pub struct Screenshot {
    file: Option<String>,
    ext: String,
    count: u32,
}

impl Screenshot {
    /// Unconfigured; saving does nothing until [`Self::configure`] is called.
    pub fn new() -> Self {
        Self::default()
    }

    /// Save future screenshots as `<file>_<n><ext>`, counting from 0.
    pub fn configure(&mut self, file: impl Into<String>, ext: Option<&str>) {
        self.file = Some(file.into());
        self.ext = ext.unwrap_or(DEFAULT_EXTENSION).to_string();
        self.count = 0;
    }

    pub fn is_configured(&self) -> bool {
        self.file.is_some()
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Path the next screenshot will be written to.
    pub fn next_path(&self) -> Option<PathBuf> {
        self.file
            .as_ref()
            .map(|file| PathBuf::from(format!("{}_{}{}", file, self.count, self.ext)))
    }

    /// Write `surface` to the next numbered file. Returns the path, or
    /// `None` when no file is configured.
    pub fn save(&mut self, surface: &Surface) -> Result<Option<PathBuf>> {
        let Some(path) = self.next_path() else {
            return Ok(None);
        };
        surface.save(&path)?;
        self.count += 1;
        info!("Screenshot saved to {}", path.display());
        Ok(Some(path))
    }
}
