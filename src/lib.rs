//! Cube-map texture handles and their pixel-transfer engine.
//!
//! This crate is the resource-lifecycle and read-back core for cube-map GPU
//! textures. It does not create textures and it does not own a GPU: the
//! embedder supplies a [`GpuContext`] wrapping a [`DeviceFns`] function
//! table, and a texture-creation layer wraps live device objects in
//! [`TextureCube`] handles via [`TextureCube::from_raw_parts`].
//!
//! What lives here:
//! - [`TextureCube`]: a handle that keeps its context alive, can be bound
//!   to a texture unit, and is invalidated exactly once by
//!   [`release`](TextureCube::release) (idempotent; afterwards every other
//!   operation fails with [`TextureError::Released`]).
//! - The transfer engine: [`read`](TextureCube::read) into a fresh buffer,
//!   or [`read_into`](TextureCube::read_into) a [`ReadTarget`], which is
//!   either a device pack buffer or caller-owned [`HostStorage`]. The byte
//!   layout is computed per call from the caller-chosen row alignment (see
//!   [`CubeLayout`]).
//! - [`SimulatedDevice`]: a deterministic recording device for tests and
//!   embedder bring-up.

mod context;
mod device;
mod error;
mod layout;
mod target;
mod texture;

pub use context::GpuContext;
pub use device::{
    BufferId, ChannelFormat, CubeFace, DeviceCall, DeviceFns, SampleType, SimulatedDevice,
    TextureId,
};
pub use error::TextureError;
pub use layout::{CubeLayout, VALID_ALIGNMENTS};
pub use target::{DeviceBuffer, HostStorage, ReadTarget};
pub use texture::{TextureCube, TextureCubeDesc};
