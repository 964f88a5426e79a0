//! Device-side vocabulary for cube-map transfers.
//!
//! The GPU is an external collaborator: the embedder hands this crate a
//! [`DeviceFns`] function table wrapping whatever driver actually services
//! the calls. Resource names are opaque ids allocated elsewhere; the only
//! operations modeled are the ones the transfer engine and the handle
//! lifecycle issue.

use std::cell::RefCell;
use std::rc::Rc;

/// Opaque device-side texture object name.
///
/// Valid only for the device context it was allocated on, and only while the
/// owning handle is unreleased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(u32);

impl TextureId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw device name. Diagnostics and interop only.
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Opaque device-side buffer object name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(u32);

impl BufferId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

/// The six cube-map faces, in transfer order.
///
/// Every packed cube image produced by this crate is face-major in
/// [`CubeFace::ALL`] order: the `index()`-th face occupies the `index()`-th
/// face-sized region of the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CubeFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PositiveX,
        CubeFace::NegativeX,
        CubeFace::PositiveY,
        CubeFace::NegativeY,
        CubeFace::PositiveZ,
        CubeFace::NegativeZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-pixel channel layout, selected by component count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelFormat {
    R,
    Rg,
    Rgb,
    Rgba,
}

impl ChannelFormat {
    pub fn from_component_count(components: u8) -> Option<Self> {
        match components {
            1 => Some(ChannelFormat::R),
            2 => Some(ChannelFormat::Rg),
            3 => Some(ChannelFormat::Rgb),
            4 => Some(ChannelFormat::Rgba),
            _ => None,
        }
    }

    pub fn component_count(self) -> usize {
        match self {
            ChannelFormat::R => 1,
            ChannelFormat::Rg => 2,
            ChannelFormat::Rgb => 3,
            ChannelFormat::Rgba => 4,
        }
    }
}

/// Per-channel sample representation: 1-byte unsigned or 4-byte float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleType {
    U8,
    F32,
}

impl SampleType {
    pub fn bytes_per_sample(self) -> usize {
        match self {
            SampleType::U8 => 1,
            SampleType::F32 => 4,
        }
    }
}

/// Function table exposed by the owning device context.
///
/// The table is always passed explicitly via [`GpuContext`]; nothing in
/// this crate reaches for ambient global state. All methods take `&self`;
/// implementations with host-visible bookkeeping use interior mutability.
/// Calls must be issued from the thread that owns the device context.
///
/// [`GpuContext`]: crate::GpuContext
pub trait DeviceFns {
    /// Select the active texture unit.
    fn active_texture(&self, unit: u32);

    /// Bind `texture` as the cube-map texture on the active unit.
    fn bind_texture_cube(&self, texture: TextureId);

    /// Row alignment applied when packing pixels out of the device.
    fn set_pack_alignment(&self, alignment: u32);

    /// Row alignment applied when unpacking pixels into the device.
    fn set_unpack_alignment(&self, alignment: u32);

    /// Read back one face of the bound cube-map into host memory.
    ///
    /// `dst` is exactly one face worth of bytes, rows padded to the current
    /// pack alignment.
    fn read_face(&self, face: CubeFace, format: ChannelFormat, sample: SampleType, dst: &mut [u8]);

    /// Read back one face of the bound cube-map into the bound pack buffer,
    /// starting `offset` bytes into it.
    fn read_face_to_pack_buffer(
        &self,
        face: CubeFace,
        format: ChannelFormat,
        sample: SampleType,
        offset: usize,
    );

    /// Bind a buffer as the pixel-pack target; `None` unbinds.
    fn bind_pack_buffer(&self, buffer: Option<BufferId>);

    /// Delete a texture object.
    fn delete_texture(&self, texture: TextureId);
}

/// One recorded [`SimulatedDevice`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCall {
    ActiveTexture(u32),
    BindTextureCube(TextureId),
    SetPackAlignment(u32),
    SetUnpackAlignment(u32),
    ReadFace {
        face: CubeFace,
        format: ChannelFormat,
        sample: SampleType,
        len: usize,
    },
    ReadFaceToPackBuffer {
        face: CubeFace,
        format: ChannelFormat,
        sample: SampleType,
        offset: usize,
    },
    BindPackBuffer(Option<BufferId>),
    DeleteTexture(TextureId),
}

/// A deterministic device for tests and embedder bring-up.
///
/// Records every call so callers can assert exact sequences, and fills
/// `read_face` destinations with a per-face byte pattern so face placement is
/// observable. Clones share the call log.
#[derive(Debug, Default, Clone)]
pub struct SimulatedDevice {
    calls: Rc<RefCell<Vec<DeviceCall>>>,
}

impl SimulatedDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call issued so far, in order.
    pub fn calls(&self) -> Vec<DeviceCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Number of `delete_texture` calls issued so far.
    pub fn delete_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, DeviceCall::DeleteTexture(_)))
            .count()
    }

    /// The byte `read_face` writes across a destination for `face`.
    pub fn face_fill_byte(face: CubeFace) -> u8 {
        face.index() as u8 + 1
    }

    fn record(&self, call: DeviceCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl DeviceFns for SimulatedDevice {
    fn active_texture(&self, unit: u32) {
        self.record(DeviceCall::ActiveTexture(unit));
    }

    fn bind_texture_cube(&self, texture: TextureId) {
        self.record(DeviceCall::BindTextureCube(texture));
    }

    fn set_pack_alignment(&self, alignment: u32) {
        self.record(DeviceCall::SetPackAlignment(alignment));
    }

    fn set_unpack_alignment(&self, alignment: u32) {
        self.record(DeviceCall::SetUnpackAlignment(alignment));
    }

    fn read_face(&self, face: CubeFace, format: ChannelFormat, sample: SampleType, dst: &mut [u8]) {
        dst.fill(Self::face_fill_byte(face));
        self.record(DeviceCall::ReadFace {
            face,
            format,
            sample,
            len: dst.len(),
        });
    }

    fn read_face_to_pack_buffer(
        &self,
        face: CubeFace,
        format: ChannelFormat,
        sample: SampleType,
        offset: usize,
    ) {
        self.record(DeviceCall::ReadFaceToPackBuffer {
            face,
            format,
            sample,
            offset,
        });
    }

    fn bind_pack_buffer(&self, buffer: Option<BufferId>) {
        self.record(DeviceCall::BindPackBuffer(buffer));
    }

    fn delete_texture(&self, texture: TextureId) {
        self.record(DeviceCall::DeleteTexture(texture));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_order_matches_indices() {
        for (i, face) in CubeFace::ALL.iter().enumerate() {
            assert_eq!(face.index(), i);
        }
    }

    #[test]
    fn channel_format_round_trips_component_counts() {
        for components in 1..=4u8 {
            let format = ChannelFormat::from_component_count(components).unwrap();
            assert_eq!(format.component_count(), components as usize);
        }
        assert_eq!(ChannelFormat::from_component_count(0), None);
        assert_eq!(ChannelFormat::from_component_count(5), None);
    }

    #[test]
    fn simulated_device_records_and_fills() {
        let device = SimulatedDevice::new();
        let shared = device.clone();

        let mut dst = [0u8; 8];
        device.read_face(
            CubeFace::NegativeY,
            ChannelFormat::Rgba,
            SampleType::U8,
            &mut dst,
        );

        assert_eq!(dst, [SimulatedDevice::face_fill_byte(CubeFace::NegativeY); 8]);
        // Clones observe the same log.
        assert_eq!(
            shared.calls(),
            vec![DeviceCall::ReadFace {
                face: CubeFace::NegativeY,
                format: ChannelFormat::Rgba,
                sample: SampleType::U8,
                len: 8,
            }]
        );
    }
}
