//! SBI服务接口
//!
//! [`SbiService`] is the one interface every facade calls through. Two
//! strategies implement it with identical observable results:
//!
//! * [`super::direct::DirectLink`] calls the procedures of an SBI
//!   implementation linked into the same image ([`SbiImplementation`]);
//! * [`super::trapped::Trapped`] builds a trap frame and hands it to the
//!   implementation's trap entry.

use core::fmt;
use crate::trap::ds::CallArgs;
use crate::trap::infrastructure::CallerContext;
use super::error::{SbiResult, SbiRet};
use super::ids::ExtensionId;

/// Set of harts: bit `i` of `mask` selects hart `base + i`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HartMask {
    mask: usize,
    base: usize,
}

impl HartMask {
    /// Base value that selects every hart and ignores `mask`
    pub const ALL_BASE: usize = usize::MAX;

    pub const fn from_mask_base(mask: usize, base: usize) -> Self {
        Self { mask, base }
    }

    /// 所有hart
    pub const fn all() -> Self {
        Self { mask: 0, base: Self::ALL_BASE }
    }

    /// 单个hart
    pub const fn single(hartid: usize) -> Self {
        Self { mask: 1, base: hartid }
    }

    pub const fn mask(&self) -> usize {
        self.mask
    }

    pub const fn base(&self) -> usize {
        self.base
    }

    pub const fn is_all(&self) -> bool {
        self.base == Self::ALL_BASE
    }

    /// Whether `hartid` is selected by this mask
    pub fn contains(&self, hartid: usize) -> bool {
        if self.is_all() {
            return true;
        }
        match hartid.checked_sub(self.base) {
            Some(bit) if bit < usize::BITS as usize => self.mask & (1 << bit) != 0,
            _ => false,
        }
    }
}

impl fmt::Debug for HartMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            write!(f, "HartMask(all)")
        } else {
            write!(f, "HartMask({:#b} << {})", self.mask, self.base)
        }
    }
}

/// Virtual address range of a remote fence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    pub start: usize,
    pub size: usize,
}

impl AddressRange {
    /// The whole address space
    pub const ALL: Self = Self { start: 0, size: 0 };

    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// `(0, 0)` and a size of 2^XLEN-1 both mean "flush everything".
    pub fn is_full_flush(&self) -> bool {
        (self.start == 0 && self.size == 0) || self.size == usize::MAX
    }
}

/// Fence requested from remote harts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFence {
    FenceI,
    SfenceVma(AddressRange),
    SfenceVmaAsid(AddressRange, usize),
    HfenceGvmaVmid(AddressRange, usize),
    HfenceGvma(AddressRange),
    HfenceVvmaAsid(AddressRange, usize),
    HfenceVvma(AddressRange),
}

/// Procedures of an SBI implementation linked into the same image.
///
/// This is what the direct-link strategy calls instead of trapping. Each
/// procedure returns the status the implementation's trap handler would have
/// put in a0/a1.
pub trait SbiImplementation: Sync {
    /// Encoded spec version (minor in bits 0-23, major in bits 24-30)
    fn spec_version(&self) -> usize;
    fn impl_id(&self) -> usize;
    fn impl_version(&self) -> usize;
    /// 0 if absent, otherwise an extension-defined non-zero value
    fn probe_extension(&self, eid: ExtensionId) -> usize;
    fn mvendorid(&self, caller: CallerContext) -> usize;
    fn marchid(&self, caller: CallerContext) -> usize;
    fn mimpid(&self, caller: CallerContext) -> usize;

    fn set_timer(&self, caller: CallerContext, stime: u64) -> SbiRet;
    fn console_putchar(&self, ch: u8);
    /// `None` when no byte is pending
    fn console_getchar(&self) -> Option<u8>;
    fn clear_ipi(&self, caller: CallerContext) -> SbiRet;
    fn send_ipi(&self, caller: CallerContext, harts: HartMask) -> SbiRet;
    fn remote_fence(&self, caller: CallerContext, harts: HartMask, fence: RemoteFence) -> SbiRet;

    fn hart_start(&self, caller: CallerContext, hartid: usize, start_addr: usize, opaque: usize) -> SbiRet;
    /// Returns only if the hart could not be stopped
    fn hart_stop(&self, caller: CallerContext) -> SbiRet;
    fn hart_get_status(&self, hartid: usize) -> SbiRet;

    /// Returns only if the system could not be shut down
    fn system_shutdown(&self, caller: CallerContext) -> SbiRet;

    fn vendor_call(&self, caller: CallerContext, eid: ExtensionId, fid: usize, args: &CallArgs) -> SbiRet;
}

/// The call interface the facades are written against.
///
/// Legacy calls follow the legacy convention: only `error` (a0) is
/// meaningful and `value` is always 0.
pub trait SbiService: Sync {
    // Base
    fn get_spec_version(&self) -> SbiRet;
    fn get_impl_id(&self) -> SbiRet;
    fn get_impl_version(&self) -> SbiRet;
    fn probe_extension(&self, eid: ExtensionId) -> SbiRet;
    fn get_mvendorid(&self) -> SbiRet;
    fn get_marchid(&self) -> SbiRet;
    fn get_mimpid(&self) -> SbiRet;

    // Legacy
    fn legacy_set_timer(&self, stime: u64) -> SbiRet;
    fn legacy_console_putchar(&self, ch: u8) -> SbiRet;
    /// Raw a0: the byte, -1 when nothing is pending, or a status. A call
    /// that never reached the implementation is `Err(DeviceError)`.
    fn legacy_console_getchar(&self) -> SbiResult<isize>;
    fn legacy_clear_ipi(&self) -> SbiRet;
    fn legacy_send_ipi(&self, hart_mask: &usize) -> SbiRet;
    fn legacy_remote_fence_i(&self, hart_mask: &usize) -> SbiRet;
    fn legacy_remote_sfence_vma(&self, hart_mask: &usize, start: usize, size: usize) -> SbiRet;
    fn legacy_remote_sfence_vma_asid(&self, hart_mask: &usize, start: usize, size: usize, asid: usize) -> SbiRet;
    fn legacy_shutdown(&self) -> SbiRet;

    // TIME
    fn set_timer(&self, stime: u64) -> SbiRet;

    // sPI
    fn send_ipi(&self, harts: HartMask) -> SbiRet;

    // RFNC
    fn remote_fence(&self, harts: HartMask, fence: RemoteFence) -> SbiRet;

    // HSM
    fn hart_start(&self, hartid: usize, start_addr: usize, opaque: usize) -> SbiRet;
    fn hart_stop(&self) -> SbiRet;
    fn hart_get_status(&self, hartid: usize) -> SbiRet;

    // Vendor
    fn vendor_call(&self, eid: ExtensionId, fid: usize, args: &CallArgs) -> SbiRet;
}
