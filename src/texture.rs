//! Cube-map texture handle: lifecycle state machine and pixel transfers.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::context::GpuContext;
use crate::device::{ChannelFormat, CubeFace, SampleType, TextureId};
use crate::error::TextureError;
use crate::layout::CubeLayout;
use crate::target::ReadTarget;

/// Shape metadata for [`TextureCube::from_raw_parts`], in the units the
/// texture-creation path speaks: per-face pixel dimensions, channel count,
/// and whether samples are 4-byte floats (1-byte unsigned otherwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureCubeDesc {
    pub width: u32,
    pub height: u32,
    pub components: u8,
    pub floats: bool,
}

#[derive(Debug)]
enum State {
    Active {
        context: Rc<GpuContext>,
        texture: TextureId,
    },
    Released,
}

/// Handle to one cube-map texture bound to a device context.
///
/// The handle keeps its context alive (a strong reference) for as long as it
/// is itself alive and unreleased. [`release`](Self::release) is one-way and
/// idempotent: the first call deletes the device texture, every later call is
/// a no-op, and every *other* operation on a released handle fails uniformly
/// with [`TextureError::Released`] without touching the device. Dropping a
/// still-active handle releases the device resource first.
#[derive(Debug)]
pub struct TextureCube {
    width: u32,
    height: u32,
    format: ChannelFormat,
    sample: SampleType,
    state: State,
}

impl TextureCube {
    /// Wraps an existing device texture in a handle.
    ///
    /// This is the sanctioned construction path, meant for the texture
    /// creation layer: `texture` must name a live cube-map allocated on
    /// `context`. The descriptor is validated before the handle exists.
    pub fn from_raw_parts(
        context: Rc<GpuContext>,
        texture: TextureId,
        desc: TextureCubeDesc,
    ) -> Result<Self, TextureError> {
        let format = ChannelFormat::from_component_count(desc.components)
            .ok_or(TextureError::InvalidComponentCount(desc.components))?;
        if desc.width == 0 || desc.height == 0 || desc.width != desc.height {
            return Err(TextureError::InvalidDimensions {
                width: desc.width,
                height: desc.height,
            });
        }
        let sample = if desc.floats {
            SampleType::F32
        } else {
            SampleType::U8
        };

        Ok(Self {
            width: desc.width,
            height: desc.height,
            format,
            sample,
            state: State::Active { context, texture },
        })
    }

    fn active(&self) -> Result<(&Rc<GpuContext>, TextureId), TextureError> {
        match &self.state {
            State::Active { context, texture } => Ok((context, *texture)),
            State::Released => Err(TextureError::Released),
        }
    }

    pub fn is_released(&self) -> bool {
        matches!(self.state, State::Released)
    }

    /// A new strong reference to the owning context.
    pub fn context(&self) -> Result<Rc<GpuContext>, TextureError> {
        self.active().map(|(context, _)| Rc::clone(context))
    }

    /// The raw device texture name. Diagnostics and interop only.
    pub fn texture_id(&self) -> Result<TextureId, TextureError> {
        self.active().map(|(_, texture)| texture)
    }

    /// The byte layout a transfer at `alignment` will use.
    pub fn layout(&self, alignment: u32) -> Result<CubeLayout, TextureError> {
        CubeLayout::new(self.width, self.height, self.format, self.sample, alignment)
    }

    /// Reads the whole cube image into a new buffer.
    ///
    /// The buffer is exactly [`CubeLayout::total_bytes`] long: six faces
    /// packed in [`CubeFace::ALL`] order, each face's rows padded to
    /// `alignment`. Callers decode it from the matching [`layout`](Self::layout).
    pub fn read(&self, alignment: u32) -> Result<Vec<u8>, TextureError> {
        let (context, texture) = self.active()?;
        let layout = self.layout(alignment)?;

        let mut data = vec![0u8; layout.total_bytes];

        let fns = context.fns();
        fns.active_texture(context.default_texture_unit());
        fns.bind_texture_cube(texture);
        fns.set_pack_alignment(alignment);
        fns.set_unpack_alignment(alignment);
        for face in CubeFace::ALL {
            let start = layout.face_offset(face);
            fns.read_face(
                face,
                self.format,
                self.sample,
                &mut data[start..start + layout.face_bytes],
            );
        }

        Ok(data)
    }

    /// Reads the whole cube image into `target`, starting `offset` bytes in.
    ///
    /// All validation happens before the first device call: a failed
    /// alignment, capability or bounds check leaves both the device and the
    /// destination untouched. The pack-buffer target is always unbound again
    /// after the face reads.
    pub fn read_into(
        &self,
        target: ReadTarget<'_>,
        alignment: u32,
        offset: usize,
    ) -> Result<(), TextureError> {
        let (context, texture) = self.active()?;
        let layout = self.layout(alignment)?;
        let end = offset
            .checked_add(layout.total_bytes)
            .ok_or(TextureError::LayoutOverflow)?;

        let fns = context.fns();
        match target {
            ReadTarget::PackBuffer(buffer) => {
                fns.bind_pack_buffer(Some(buffer.id()));
                fns.active_texture(context.default_texture_unit());
                fns.bind_texture_cube(texture);
                fns.set_pack_alignment(alignment);
                fns.set_unpack_alignment(alignment);
                for face in CubeFace::ALL {
                    fns.read_face_to_pack_buffer(
                        face,
                        self.format,
                        self.sample,
                        offset + layout.face_offset(face),
                    );
                }
                fns.bind_pack_buffer(None);
            }
            ReadTarget::Host(storage) => {
                let region = storage.writable().ok_or(TextureError::UnsupportedBuffer)?;
                if region.len() < end {
                    return Err(TextureError::BufferTooSmall {
                        required: end,
                        len: region.len(),
                    });
                }
                fns.active_texture(context.default_texture_unit());
                fns.bind_texture_cube(texture);
                fns.set_pack_alignment(alignment);
                fns.set_unpack_alignment(alignment);
                for face in CubeFace::ALL {
                    let start = offset + layout.face_offset(face);
                    fns.read_face(
                        face,
                        self.format,
                        self.sample,
                        &mut region[start..start + layout.face_bytes],
                    );
                }
            }
        }

        Ok(())
    }

    /// Binds the texture as the active cube-map on `unit`.
    pub fn bind_to_unit(&self, unit: u32) -> Result<(), TextureError> {
        let (context, texture) = self.active()?;
        let fns = context.fns();
        fns.active_texture(unit);
        fns.bind_texture_cube(texture);
        Ok(())
    }

    /// Releases the device resource.
    ///
    /// One-way and idempotent: the first call deletes the device texture and
    /// drops the strong context reference; repeat calls return immediately
    /// without touching the device.
    pub fn release(&mut self) {
        match std::mem::replace(&mut self.state, State::Released) {
            State::Active { context, texture } => {
                debug!(texture = texture.raw(), "releasing cube texture");
                context.fns().delete_texture(texture);
            }
            State::Released => {
                trace!("cube texture already released");
            }
        }
    }
}

impl Drop for TextureCube {
    fn drop(&mut self) {
        self.release();
    }
}
