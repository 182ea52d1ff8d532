//! 直接链接调用策略
//!
//! Used when the SBI implementation is linked into the same image: each call
//! resolves the caller's hart id and scratch pointer and then invokes the
//! implementation's procedure directly, with no trap frame involved.

use crate::trap::ds::CallArgs;
use crate::trap::infrastructure::{CallerContext, HartContext, HartIdentity};
use super::api::{AddressRange, HartMask, RemoteFence, SbiImplementation, SbiService};
use super::error::{BridgeError, SbiResult, SbiRet};
use super::ids::ExtensionId;

pub struct DirectLink<I, H> {
    imp: I,
    harts: HartContext<H>,
}

impl<I: SbiImplementation, H: HartIdentity> DirectLink<I, H> {
    pub fn new(imp: I, harts: HartContext<H>) -> Self {
        Self { imp, harts }
    }

    pub fn harts(&self) -> &HartContext<H> {
        &self.harts
    }

    pub fn implementation(&self) -> &I {
        &self.imp
    }

    /// Resolve the caller, then run `f` if the implementation provides `eid`.
    ///
    /// Mirrors what a trap handler does before it reaches the procedure, so
    /// both strategies fail the same way.
    fn call(&self, eid: ExtensionId, f: impl FnOnce(&I, CallerContext) -> SbiRet) -> SbiRet {
        self.try_call(eid, f).unwrap_or_else(|_| SbiRet::failed())
    }

    /// A caller without scratch is `Err(DeviceError)` rather than a0 = -1.
    fn try_call(&self, eid: ExtensionId, f: impl FnOnce(&I, CallerContext) -> SbiRet) -> SbiResult<SbiRet> {
        let Some(caller) = self.harts.caller() else {
            log::warn!(
                "sbi direct: hart {} has no scratch pointer (eid {:#x})",
                self.harts.current_hartid(),
                eid.raw()
            );
            return Err(BridgeError::DeviceError);
        };
        if eid != ExtensionId::BASE && self.imp.probe_extension(eid) == 0 {
            return Ok(SbiRet::not_supported());
        }
        let ret = f(&self.imp, caller);
        if eid.is_legacy() {
            Ok(SbiRet::new(ret.error, 0))
        } else {
            Ok(ret)
        }
    }

    fn legacy_fence(&self, eid: ExtensionId, hart_mask: &usize, fence: RemoteFence) -> SbiRet {
        let harts = HartMask::from_mask_base(*hart_mask, 0);
        self.call(eid, |imp, caller| imp.remote_fence(caller, harts, fence))
    }
}

impl<I: SbiImplementation, H: HartIdentity> SbiService for DirectLink<I, H> {
    fn get_spec_version(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, _| SbiRet::success(imp.spec_version()))
    }

    fn get_impl_id(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, _| SbiRet::success(imp.impl_id()))
    }

    fn get_impl_version(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, _| SbiRet::success(imp.impl_version()))
    }

    fn probe_extension(&self, eid: ExtensionId) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, _| SbiRet::success(imp.probe_extension(eid)))
    }

    fn get_mvendorid(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, caller| SbiRet::success(imp.mvendorid(caller)))
    }

    fn get_marchid(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, caller| SbiRet::success(imp.marchid(caller)))
    }

    fn get_mimpid(&self) -> SbiRet {
        self.call(ExtensionId::BASE, |imp, caller| SbiRet::success(imp.mimpid(caller)))
    }

    fn legacy_set_timer(&self, stime: u64) -> SbiRet {
        self.call(ExtensionId::LEGACY_SET_TIMER, |imp, caller| imp.set_timer(caller, stime))
    }

    fn legacy_console_putchar(&self, ch: u8) -> SbiRet {
        self.call(ExtensionId::LEGACY_CONSOLE_PUTCHAR, |imp, _| {
            imp.console_putchar(ch);
            SbiRet::success(0)
        })
    }

    fn legacy_console_getchar(&self) -> SbiResult<isize> {
        let ret = self.try_call(ExtensionId::LEGACY_CONSOLE_GETCHAR, |imp, _| {
            SbiRet::new(imp.console_getchar().map_or(-1, |ch| ch as isize), 0)
        })?;
        Ok(ret.error)
    }

    fn legacy_clear_ipi(&self) -> SbiRet {
        self.call(ExtensionId::LEGACY_CLEAR_IPI, |imp, caller| imp.clear_ipi(caller))
    }

    fn legacy_send_ipi(&self, hart_mask: &usize) -> SbiRet {
        let harts = HartMask::from_mask_base(*hart_mask, 0);
        self.call(ExtensionId::LEGACY_SEND_IPI, |imp, caller| imp.send_ipi(caller, harts))
    }

    fn legacy_remote_fence_i(&self, hart_mask: &usize) -> SbiRet {
        self.legacy_fence(ExtensionId::LEGACY_REMOTE_FENCE_I, hart_mask, RemoteFence::FenceI)
    }

    fn legacy_remote_sfence_vma(&self, hart_mask: &usize, start: usize, size: usize) -> SbiRet {
        let fence = RemoteFence::SfenceVma(AddressRange::new(start, size));
        self.legacy_fence(ExtensionId::LEGACY_REMOTE_SFENCE_VMA, hart_mask, fence)
    }

    fn legacy_remote_sfence_vma_asid(&self, hart_mask: &usize, start: usize, size: usize, asid: usize) -> SbiRet {
        let fence = RemoteFence::SfenceVmaAsid(AddressRange::new(start, size), asid);
        self.legacy_fence(ExtensionId::LEGACY_REMOTE_SFENCE_VMA_ASID, hart_mask, fence)
    }

    fn legacy_shutdown(&self) -> SbiRet {
        self.call(ExtensionId::LEGACY_SHUTDOWN, |imp, caller| imp.system_shutdown(caller))
    }

    fn set_timer(&self, stime: u64) -> SbiRet {
        self.call(ExtensionId::TIME, |imp, caller| imp.set_timer(caller, stime))
    }

    fn send_ipi(&self, harts: HartMask) -> SbiRet {
        self.call(ExtensionId::IPI, |imp, caller| imp.send_ipi(caller, harts))
    }

    fn remote_fence(&self, harts: HartMask, fence: RemoteFence) -> SbiRet {
        self.call(ExtensionId::RFENCE, |imp, caller| imp.remote_fence(caller, harts, fence))
    }

    fn hart_start(&self, hartid: usize, start_addr: usize, opaque: usize) -> SbiRet {
        self.call(ExtensionId::HSM, |imp, caller| imp.hart_start(caller, hartid, start_addr, opaque))
    }

    fn hart_stop(&self) -> SbiRet {
        self.call(ExtensionId::HSM, |imp, caller| imp.hart_stop(caller))
    }

    fn hart_get_status(&self, hartid: usize) -> SbiRet {
        self.call(ExtensionId::HSM, |imp, _| imp.hart_get_status(hartid))
    }

    fn vendor_call(&self, eid: ExtensionId, fid: usize, args: &CallArgs) -> SbiRet {
        self.call(eid, |imp, caller| imp.vendor_call(caller, eid, fid, args))
    }
}
