//! Legacy扩展门面 (EID 0x00-0x0F)
//!
//! Only a0 is meaningful on return. Hart masks are passed by reference and
//! only the first word is used.

use core::convert::Infallible;
use crate::config::FACADE_VERSION;
use crate::util::sbi::api::SbiService;
use crate::util::sbi::error::{BridgeError, SbiResult};

pub struct LegacyFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl LegacyFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    pub fn set_timer(&self, stime: u64) -> SbiResult<()> {
        self.service.legacy_set_timer(stime).into_unit()
    }

    pub fn console_putchar(&self, ch: u8) -> SbiResult<()> {
        self.service.legacy_console_putchar(ch).into_unit()
    }

    /// `Ok(None)` when no byte is pending.
    pub fn console_getchar(&self) -> SbiResult<Option<u8>> {
        match self.service.legacy_console_getchar()? {
            -1 => Ok(None),
            ch @ 0..=0xFF => Ok(Some(ch as u8)),
            other => Err(BridgeError::from_status(other).unwrap_or(BridgeError::Failure(other))),
        }
    }

    pub fn clear_ipi(&self) -> SbiResult<()> {
        self.service.legacy_clear_ipi().into_unit()
    }

    pub fn send_ipi(&self, hart_mask: &usize) -> SbiResult<()> {
        self.service.legacy_send_ipi(hart_mask).into_unit()
    }

    pub fn remote_fence_i(&self, hart_mask: &usize) -> SbiResult<()> {
        self.service.legacy_remote_fence_i(hart_mask).into_unit()
    }

    pub fn remote_sfence_vma(&self, hart_mask: &usize, start: usize, size: usize) -> SbiResult<()> {
        self.service.legacy_remote_sfence_vma(hart_mask, start, size).into_unit()
    }

    pub fn remote_sfence_vma_asid(&self, hart_mask: &usize, start: usize, size: usize, asid: usize) -> SbiResult<()> {
        self.service.legacy_remote_sfence_vma_asid(hart_mask, start, size, asid).into_unit()
    }

    /// 关机
    ///
    /// Never returns on success. A success status that still came back is
    /// reported as [`BridgeError::DeviceError`].
    pub fn shutdown(&self) -> Result<Infallible, BridgeError> {
        match self.service.legacy_shutdown().into_unit() {
            Ok(()) => {
                log::error!("sbi shutdown reported success but returned");
                Err(BridgeError::DeviceError)
            }
            Err(err) => Err(err),
        }
    }

    /// Write every byte of `s`, stopping at the first failure.
    pub fn console_write(&self, s: &str) -> SbiResult<()> {
        s.bytes().try_for_each(|b| self.console_putchar(b))
    }
}
