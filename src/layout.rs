//! Byte layout of a packed 6-face cube image.

use crate::device::{ChannelFormat, CubeFace, SampleType};
use crate::error::TextureError;

/// Alignments accepted by the transfer engine, mirroring device pixel-store
/// rules.
pub const VALID_ALIGNMENTS: [u32; 4] = [1, 2, 4, 8];

fn align_up(value: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    value.checked_add(alignment - 1).map(|v| v & !(alignment - 1))
}

/// Derived byte layout for one cube image at a caller-chosen row alignment.
///
/// The alignment is a per-call choice, so the layout is recomputed on every
/// transfer and never cached on the handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeLayout {
    pub bytes_per_pixel: usize,
    pub unpadded_row_bytes: usize,
    /// Row stride after padding to the alignment boundary.
    pub padded_row_bytes: usize,
    /// One face: `padded_row_bytes * height`.
    pub face_bytes: usize,
    /// Whole image: `face_bytes * 6`, face-major in [`CubeFace::ALL`] order.
    pub total_bytes: usize,
}

impl CubeLayout {
    /// Computes the layout, validating `alignment` first.
    ///
    /// Fails with [`TextureError::InvalidAlignment`] before doing any
    /// arithmetic, and with [`TextureError::LayoutOverflow`] if the image
    /// does not fit the address space.
    pub fn new(
        width: u32,
        height: u32,
        format: ChannelFormat,
        sample: SampleType,
        alignment: u32,
    ) -> Result<Self, TextureError> {
        if !VALID_ALIGNMENTS.contains(&alignment) {
            return Err(TextureError::InvalidAlignment(alignment));
        }

        let bytes_per_pixel = format.component_count() * sample.bytes_per_sample();
        let unpadded_row_bytes = (width as usize)
            .checked_mul(bytes_per_pixel)
            .ok_or(TextureError::LayoutOverflow)?;
        let padded_row_bytes =
            align_up(unpadded_row_bytes, alignment as usize).ok_or(TextureError::LayoutOverflow)?;
        let face_bytes = padded_row_bytes
            .checked_mul(height as usize)
            .ok_or(TextureError::LayoutOverflow)?;
        let total_bytes = face_bytes.checked_mul(6).ok_or(TextureError::LayoutOverflow)?;

        Ok(Self {
            bytes_per_pixel,
            unpadded_row_bytes,
            padded_row_bytes,
            face_bytes,
            total_bytes,
        })
    }

    /// Byte offset of `face` within the packed image.
    ///
    /// Kept in the exact-division form: `total_bytes` is a whole multiple of
    /// 6 by construction, so this equals `face_bytes * face.index()` without
    /// any rounding.
    pub fn face_offset(&self, face: CubeFace) -> usize {
        debug_assert_eq!(self.total_bytes % 6, 0);
        self.total_bytes * face.index() / 6
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_total(width: u64, height: u64, components: u64, bytes: u64, alignment: u64) -> u64 {
        let row = width * components * bytes;
        let padded = row.div_ceil(alignment) * alignment;
        6 * height * padded
    }

    #[test]
    fn total_bytes_matches_reference_across_shapes() {
        let widths = [1u32, 3, 4, 5, 7, 16, 63, 255];
        let heights = [1u32, 2, 4, 5, 33, 128];
        let samples = [SampleType::U8, SampleType::F32];

        for &width in &widths {
            for &height in &heights {
                for components in 1..=4u8 {
                    let format = ChannelFormat::from_component_count(components).unwrap();
                    for &sample in &samples {
                        for &alignment in &VALID_ALIGNMENTS {
                            let layout =
                                CubeLayout::new(width, height, format, sample, alignment).unwrap();
                            let expected = reference_total(
                                width as u64,
                                height as u64,
                                components as u64,
                                sample.bytes_per_sample() as u64,
                                alignment as u64,
                            );
                            assert_eq!(
                                layout.total_bytes as u64, expected,
                                "w={width} h={height} c={components} s={sample:?} a={alignment}"
                            );
                            assert_eq!(layout.padded_row_bytes % alignment as usize, 0);
                            assert!(layout.padded_row_bytes >= layout.unpadded_row_bytes);
                            assert_eq!(layout.face_bytes * 6, layout.total_bytes);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn face_offset_equals_face_bytes_times_index() {
        let layout =
            CubeLayout::new(5, 5, ChannelFormat::Rgb, SampleType::U8, 4).unwrap();
        for face in CubeFace::ALL {
            assert_eq!(layout.face_offset(face), layout.face_bytes * face.index());
        }
    }

    #[test]
    fn rejects_alignments_outside_the_valid_set() {
        for alignment in [0u32, 3, 5, 6, 7, 9, 16, 255] {
            let err = CubeLayout::new(4, 4, ChannelFormat::R, SampleType::U8, alignment)
                .unwrap_err();
            assert_eq!(err, TextureError::InvalidAlignment(alignment));
        }
    }

    #[test]
    fn known_shapes_have_pinned_sizes() {
        // 4x4, one u8 component: no padding at any valid alignment.
        let layout = CubeLayout::new(4, 4, ChannelFormat::R, SampleType::U8, 1).unwrap();
        assert_eq!(layout.total_bytes, 96);
        let layout = CubeLayout::new(4, 4, ChannelFormat::R, SampleType::U8, 4).unwrap();
        assert_eq!(layout.total_bytes, 96);

        // 5-wide RGB rows are 15 bytes, padded to 16 at alignment 4.
        let layout = CubeLayout::new(5, 4, ChannelFormat::Rgb, SampleType::U8, 4).unwrap();
        assert_eq!(layout.unpadded_row_bytes, 15);
        assert_eq!(layout.padded_row_bytes, 16);
        assert_eq!(layout.face_bytes, 64);
        assert_eq!(layout.total_bytes, 384);
    }

    #[test]
    fn oversized_images_fail_instead_of_wrapping() {
        let err = CubeLayout::new(u32::MAX, u32::MAX, ChannelFormat::Rgba, SampleType::F32, 8)
            .unwrap_err();
        assert_eq!(err, TextureError::LayoutOverflow);
    }
}
