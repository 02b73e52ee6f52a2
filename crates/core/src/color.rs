//! Hash-derived tile colors.
//!
//! The color is the first six hex digits of the MD5 digest of the code's
//! UTF-8 bytes. MD5 is only a display aid here; two codes sharing a color is
//! acceptable.

use md5::{Digest, Md5};
use sectorgrid_domain::{Result, SectorGridError, TileColor};

use crate::ports::TileColorizer;

/// Default [`TileColorizer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Md5TileColorizer;

impl TileColorizer for Md5TileColorizer {
    fn color_for(&self, code: &str) -> Result<TileColor> {
        color_for(code)
    }
}

/// Derive the tile color for a code.
///
/// # Errors
/// Returns `SectorGridError::InvalidInput` if `code` is empty.
pub fn color_for(code: &str) -> Result<TileColor> {
    if code.is_empty() {
        return Err(SectorGridError::InvalidInput("cannot derive a color for an empty code".into()));
    }

    let digest = Md5::digest(code.as_bytes());
    TileColor::from_hex(&hex::encode(&digest[..3]))
}
