//! The skin blob substrate operations (`getSkin`/`putSkin`) delegate to.
//!
//! `spec.md` leaves the skin value type "specified only by the substrate
//! operations that produce/consume them" (see `spec.md` §1). This module
//! defines the minimal shape those operations need: enough structure for
//! the player-list codec's legacy reconstruction path to be meaningful, and
//! no more — no image decoding, no geometry schema validation.

use crate::codec::{Decode, Encode};
use crate::error::CodecError;
use crate::reader::PacketReader;
use crate::writer::PacketWriter;

/// A raw RGBA pixel buffer plus its declared dimensions.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SkinImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SkinImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Reconstructs dimensions for a legacy (pre-1.13.0) skin pixel blob,
    /// which carried no explicit width/height on the wire. The classic
    /// formats are a fixed set of known buffer lengths.
    pub fn from_legacy(pixels: Vec<u8>) -> Self {
        let (width, height) = match pixels.len() {
            8192 => (64, 32),
            16384 => (64, 64),
            65536 => (128, 128),
            other => {
                // Unknown legacy size: treat as a single row so round-trip
                // through `SkinData` still preserves every byte.
                ((other / 4).max(1) as u32, 1)
            }
        };
        Self::new(width, height, pixels)
    }
}

impl Encode for SkinImage {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_lint(self.width as i32);
        w.put_lint(self.height as i32);
        self.pixels.encode(w)
    }
}

impl Decode<'_> for SkinImage {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        let width = r.get_lint()? as u32;
        let height = r.get_lint()? as u32;
        let pixels = Vec::decode(r)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// The canonical, version-independent skin value. `getSkin` always returns
/// a complete value of this shape regardless of which wire form (modern
/// struct or legacy five-string) produced it — no post-fixup by callers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SkinData {
    pub skin_id: String,
    /// Empty for skins reconstructed from the legacy wire form.
    pub resource_patch: String,
    pub skin_image: SkinImage,
    pub cape_image: SkinImage,
    pub geometry_name: String,
    pub geometry_data: String,
}

impl SkinData {
    /// Builds a [`SkinData`] from the pre-1.13.0 wire fields: an empty
    /// resource patch and pixel blobs reconstructed via
    /// [`SkinImage::from_legacy`].
    pub fn from_legacy(
        skin_id: String,
        skin_pixels: Vec<u8>,
        cape_pixels: Vec<u8>,
        geometry_name: String,
        geometry_json: String,
    ) -> Self {
        Self {
            skin_id,
            resource_patch: String::new(),
            skin_image: SkinImage::from_legacy(skin_pixels),
            cape_image: SkinImage::from_legacy(cape_pixels),
            geometry_name,
            geometry_data: geometry_json,
        }
    }
}

impl Encode for SkinData {
    fn encode(&self, w: &mut PacketWriter) -> Result<(), CodecError> {
        w.put_string(&self.skin_id);
        w.put_string(&self.resource_patch);
        self.skin_image.encode(w)?;
        self.cape_image.encode(w)?;
        w.put_string(&self.geometry_name);
        w.put_string(&self.geometry_data);
        Ok(())
    }
}

impl Decode<'_> for SkinData {
    fn decode(r: &mut PacketReader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            skin_id: r.get_string()?,
            resource_patch: r.get_string()?,
            skin_image: SkinImage::decode(r)?,
            cape_image: SkinImage::decode(r)?,
            geometry_name: r.get_string()?,
            geometry_data: r.get_string()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_reconstruction_picks_classic_dimensions() {
        let skin = SkinData::from_legacy(
            "geometry.humanoid.custom".into(),
            vec![0u8; 8192],
            vec![0u8; 16384],
            "geometry.humanoid.custom".into(),
            "{}".into(),
        );

        assert_eq!((skin.skin_image.width, skin.skin_image.height), (64, 32));
        assert_eq!((skin.cape_image.width, skin.cape_image.height), (64, 64));
        assert!(skin.resource_patch.is_empty());
    }
}
