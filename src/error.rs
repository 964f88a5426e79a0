//! Error type shared by the handle lifecycle and the transfer engine.

/// Errors reported by cube-map texture operations.
///
/// Every validation failure is raised before the first device call of the
/// failing operation, so an `Err` never leaves device state (or a caller's
/// destination buffer) half-updated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    /// Row alignments mirror device pixel-store conventions.
    #[error("the alignment must be 1, 2, 4 or 8 (found {0})")]
    InvalidAlignment(u32),

    #[error("the component count must be 1, 2, 3 or 4 (found {0})")]
    InvalidComponentCount(u8),

    /// Cube faces are square and non-empty.
    #[error("invalid cube face dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("cube image layout overflows the addressable size")]
    LayoutOverflow,

    /// The `read_into` destination offers no writable byte region.
    #[error("the destination does not expose writable memory")]
    UnsupportedBuffer,

    #[error("the destination is too small ({required} bytes required, found {len})")]
    BufferTooSmall { required: usize, len: usize },

    /// The handle was invalidated; only a repeat `release` is accepted.
    #[error("the texture has been released")]
    Released,
}
