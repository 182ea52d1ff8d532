//! 陷阱仿真调用策略
//!
//! Every call is encoded as the register image of an `ecall` and delivered
//! through [`EcallDispatcher`]. The SBI implementation sees exactly what a
//! real supervisor-mode environment call would have produced.

use crate::trap::ds::{time_args, CallArgs, TrapFrame};
use crate::trap::infrastructure::{EcallDispatcher, HartIdentity, SbiTrapEntry};
use super::api::{HartMask, RemoteFence, SbiService};
use super::error::{SbiResult, SbiRet};
use super::ids::{base_fid, hsm_fid, ipi_fid, rfence_fid, timer_fid, ExtensionId};

pub struct Trapped<E, H> {
    dispatcher: EcallDispatcher<E, H>,
}

impl<E: SbiTrapEntry, H: HartIdentity> Trapped<E, H> {
    pub fn new(dispatcher: EcallDispatcher<E, H>) -> Self {
        Self { dispatcher }
    }

    pub fn dispatcher(&self) -> &EcallDispatcher<E, H> {
        &self.dispatcher
    }

    fn ecall(&self, eid: ExtensionId, fid: usize, args: &CallArgs) -> SbiRet {
        let mut frame = TrapFrame::for_ecall(eid.raw(), fid, args);
        self.dispatcher.dispatch(&mut frame)
    }

    fn ecall0(&self, eid: ExtensionId, fid: usize) -> SbiRet {
        self.ecall(eid, fid, &CallArgs::none())
    }

    fn try_ecall0(&self, eid: ExtensionId, fid: usize) -> SbiResult<SbiRet> {
        let mut frame = TrapFrame::for_ecall(eid.raw(), fid, &CallArgs::none());
        self.dispatcher.try_dispatch(&mut frame)
    }
}

/// Legacy calls take the address of the hart mask, not its value.
fn mask_address(hart_mask: &usize) -> usize {
    hart_mask as *const usize as usize
}

impl<E: SbiTrapEntry, H: HartIdentity> SbiService for Trapped<E, H> {
    fn get_spec_version(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_SPEC_VERSION)
    }

    fn get_impl_id(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_SBI_IMPL_ID)
    }

    fn get_impl_version(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_SBI_IMPL_VERSION)
    }

    fn probe_extension(&self, eid: ExtensionId) -> SbiRet {
        self.ecall(ExtensionId::BASE, base_fid::PROBE_EXTENSION, &CallArgs::from_array([eid.raw()]))
    }

    fn get_mvendorid(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_MVENDORID)
    }

    fn get_marchid(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_MARCHID)
    }

    fn get_mimpid(&self) -> SbiRet {
        self.ecall0(ExtensionId::BASE, base_fid::GET_MIMPID)
    }

    fn legacy_set_timer(&self, stime: u64) -> SbiRet {
        self.ecall(ExtensionId::LEGACY_SET_TIMER, 0, &time_args(stime))
    }

    fn legacy_console_putchar(&self, ch: u8) -> SbiRet {
        self.ecall(ExtensionId::LEGACY_CONSOLE_PUTCHAR, 0, &CallArgs::from_array([ch as usize]))
    }

    fn legacy_console_getchar(&self) -> SbiResult<isize> {
        self.try_ecall0(ExtensionId::LEGACY_CONSOLE_GETCHAR, 0).map(|ret| ret.error)
    }

    fn legacy_clear_ipi(&self) -> SbiRet {
        self.ecall0(ExtensionId::LEGACY_CLEAR_IPI, 0)
    }

    fn legacy_send_ipi(&self, hart_mask: &usize) -> SbiRet {
        let args = CallArgs::from_array([mask_address(hart_mask)]);
        self.ecall(ExtensionId::LEGACY_SEND_IPI, 0, &args)
    }

    fn legacy_remote_fence_i(&self, hart_mask: &usize) -> SbiRet {
        let args = CallArgs::from_array([mask_address(hart_mask)]);
        self.ecall(ExtensionId::LEGACY_REMOTE_FENCE_I, 0, &args)
    }

    fn legacy_remote_sfence_vma(&self, hart_mask: &usize, start: usize, size: usize) -> SbiRet {
        let args = CallArgs::from_array([mask_address(hart_mask), start, size]);
        self.ecall(ExtensionId::LEGACY_REMOTE_SFENCE_VMA, 0, &args)
    }

    fn legacy_remote_sfence_vma_asid(&self, hart_mask: &usize, start: usize, size: usize, asid: usize) -> SbiRet {
        let args = CallArgs::from_array([mask_address(hart_mask), start, size, asid]);
        self.ecall(ExtensionId::LEGACY_REMOTE_SFENCE_VMA_ASID, 0, &args)
    }

    fn legacy_shutdown(&self) -> SbiRet {
        self.ecall0(ExtensionId::LEGACY_SHUTDOWN, 0)
    }

    fn set_timer(&self, stime: u64) -> SbiRet {
        self.ecall(ExtensionId::TIME, timer_fid::SET_TIMER, &time_args(stime))
    }

    fn send_ipi(&self, harts: HartMask) -> SbiRet {
        let args = CallArgs::from_array([harts.mask(), harts.base()]);
        self.ecall(ExtensionId::IPI, ipi_fid::SEND_IPI, &args)
    }

    fn remote_fence(&self, harts: HartMask, fence: RemoteFence) -> SbiRet {
        let (mask, base) = (harts.mask(), harts.base());
        let (fid, args) = match fence {
            RemoteFence::FenceI => (rfence_fid::REMOTE_FENCE_I, CallArgs::from_array([mask, base])),
            RemoteFence::SfenceVma(r) => (
                rfence_fid::REMOTE_SFENCE_VMA,
                CallArgs::from_array([mask, base, r.start, r.size]),
            ),
            RemoteFence::SfenceVmaAsid(r, asid) => (
                rfence_fid::REMOTE_SFENCE_VMA_ASID,
                CallArgs::from_array([mask, base, r.start, r.size, asid]),
            ),
            RemoteFence::HfenceGvmaVmid(r, vmid) => (
                rfence_fid::REMOTE_HFENCE_GVMA_VMID,
                CallArgs::from_array([mask, base, r.start, r.size, vmid]),
            ),
            RemoteFence::HfenceGvma(r) => (
                rfence_fid::REMOTE_HFENCE_GVMA,
                CallArgs::from_array([mask, base, r.start, r.size]),
            ),
            RemoteFence::HfenceVvmaAsid(r, asid) => (
                rfence_fid::REMOTE_HFENCE_VVMA_ASID,
                CallArgs::from_array([mask, base, r.start, r.size, asid]),
            ),
            RemoteFence::HfenceVvma(r) => (
                rfence_fid::REMOTE_HFENCE_VVMA,
                CallArgs::from_array([mask, base, r.start, r.size]),
            ),
        };
        self.ecall(ExtensionId::RFENCE, fid, &args)
    }

    fn hart_start(&self, hartid: usize, start_addr: usize, opaque: usize) -> SbiRet {
        let args = CallArgs::from_array([hartid, start_addr, opaque]);
        self.ecall(ExtensionId::HSM, hsm_fid::HART_START, &args)
    }

    fn hart_stop(&self) -> SbiRet {
        self.ecall0(ExtensionId::HSM, hsm_fid::HART_STOP)
    }

    fn hart_get_status(&self, hartid: usize) -> SbiRet {
        self.ecall(ExtensionId::HSM, hsm_fid::HART_GET_STATUS, &CallArgs::from_array([hartid]))
    }

    fn vendor_call(&self, eid: ExtensionId, fid: usize, args: &CallArgs) -> SbiRet {
        self.ecall(eid, fid, args)
    }
}
