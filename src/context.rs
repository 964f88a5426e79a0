//! The owning device context.

use std::fmt;

use crate::device::DeviceFns;

/// The device context a cube-map handle is bound to.
///
/// Owns the device function table and the default texture unit transfers
/// bind on. Handles hold a strong [`Rc`](std::rc::Rc) reference, so a context
/// outlives every live handle that references it; tearing down the device
/// when the last reference drops is the embedder's concern.
///
/// The context is single-thread affine by construction (`Rc`, no `Send`):
/// all device calls must come from the thread that owns it. The default
/// texture unit is a single shared slot, so callers sharing one context must
/// serialize access to it.
pub struct GpuContext {
    fns: Box<dyn DeviceFns>,
    default_texture_unit: u32,
}

impl GpuContext {
    pub fn new(fns: Box<dyn DeviceFns>, default_texture_unit: u32) -> Self {
        Self {
            fns,
            default_texture_unit,
        }
    }

    /// The device function table.
    pub fn fns(&self) -> &dyn DeviceFns {
        self.fns.as_ref()
    }

    /// The texture unit transfer operations bind on.
    pub fn default_texture_unit(&self) -> u32 {
        self.default_texture_unit
    }
}

impl fmt::Debug for GpuContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuContext")
            .field("default_texture_unit", &self.default_texture_unit)
            .finish_non_exhaustive()
    }
}
