//! Library门面
//!
//! Gives M-mode code the scratch pointers the bridge resolved at boot. Only
//! meaningful when the bridge shares the machine mode with the SBI
//! implementation.

use crate::config::VENDOR_FACADE_VERSION;
use crate::trap::infrastructure::{ScratchLookup, ScratchPtr};
use crate::util::sbi::error::{BridgeError, SbiResult};

pub struct LibraryFacade {
    pub version: usize,
    harts: &'static dyn ScratchLookup,
}

impl LibraryFacade {
    pub const fn new(harts: &'static dyn ScratchLookup) -> Self {
        Self { version: VENDOR_FACADE_VERSION, harts }
    }

    /// Scratch pointer of the calling hart. `DeviceError` if the hart was
    /// never recorded.
    pub fn scratch_this_hart(&self) -> SbiResult<ScratchPtr> {
        self.harts.scratch_this_hart().ok_or(BridgeError::DeviceError)
    }

    /// Scratch pointer of `hartid`. `InvalidParameter` for an unknown hart.
    pub fn hartid_to_scratch(&self, hartid: usize) -> SbiResult<ScratchPtr> {
        self.harts.hartid_to_scratch(hartid).ok_or(BridgeError::InvalidParameter)
    }
}
