//! Ecall分发器
//!
//! Delivers a synthesized trap frame to the SBI implementation's trap entry
//! as if the supervisor had executed `ecall`, then reads the (error, value)
//! pair back out of a0/a1.

use crate::trap::ds::{TrapCause, TrapFrame};
use crate::util::sbi::error::{BridgeError, SbiResult, SbiRet};
use crate::util::sbi::ids::ExtensionId;
use super::hart::{HartContext, HartIdentity};
use super::scratch::ScratchPtr;

/// Trap entry of an SBI implementation (OpenSBI's `sbi_ecall_handler`).
///
/// Returns 0 when the trap was handled, in which case a0/a1 of `regs` hold
/// the call result. Any other value means the implementation declined.
pub trait SbiTrapEntry: Sync {
    fn handle_trap(
        &self,
        hartid: usize,
        cause: TrapCause,
        regs: &mut TrapFrame,
        scratch: ScratchPtr,
    ) -> isize;
}

impl<T: SbiTrapEntry + ?Sized> SbiTrapEntry for &T {
    fn handle_trap(&self, hartid: usize, cause: TrapCause, regs: &mut TrapFrame, scratch: ScratchPtr) -> isize {
        (**self).handle_trap(hartid, cause, regs, scratch)
    }
}

/// Pairs a trap entry with the hart context used to resolve the caller.
///
/// Runs synchronously on the calling hart. The caller must not let an
/// interrupt re-enter the trap entry while a dispatch is in flight.
pub struct EcallDispatcher<E, H> {
    entry: E,
    harts: HartContext<H>,
}

impl<E: SbiTrapEntry, H: HartIdentity> EcallDispatcher<E, H> {
    pub fn new(entry: E, harts: HartContext<H>) -> Self {
        Self { entry, harts }
    }

    pub fn harts(&self) -> &HartContext<H> {
        &self.harts
    }

    pub fn entry(&self) -> &E {
        &self.entry
    }

    /// Hand `frame` to the trap entry and return what it left in a0/a1.
    ///
    /// A hart without a scratch pointer, or a trap the implementation did not
    /// handle, yields [`SbiRet::failed`]. Nothing is retried.
    pub fn dispatch(&self, frame: &mut TrapFrame) -> SbiRet {
        self.try_dispatch(frame).unwrap_or_else(|_| SbiRet::failed())
    }

    /// Like [`dispatch`](Self::dispatch), but a failed delivery is
    /// `Err(DeviceError)` instead of being folded into a0. Legacy calls whose
    /// a0 is a value rather than a status need the difference.
    pub fn try_dispatch(&self, frame: &mut TrapFrame) -> SbiResult<SbiRet> {
        let Some(caller) = self.harts.caller() else {
            log::warn!(
                "sbi dispatch: hart {} has no scratch pointer (eid {:#x} fid {})",
                self.harts.current_hartid(),
                frame.extension_id(),
                frame.function_id()
            );
            return Err(BridgeError::DeviceError);
        };

        let handled = self.entry.handle_trap(caller.hartid, TrapCause::SUPERVISOR_ECALL, frame, caller.scratch);
        if handled != 0 {
            log::warn!(
                "sbi dispatch: trap entry declined eid {:#x} fid {} on hart {} ({})",
                frame.extension_id(),
                frame.function_id(),
                caller.hartid,
                handled
            );
            return Err(BridgeError::DeviceError);
        }

        // Legacy extensions only define a0.
        if ExtensionId::new(frame.extension_id()).is_legacy() {
            Ok(SbiRet::new(frame.a0() as isize, 0))
        } else {
            Ok(SbiRet::new(frame.a0() as isize, frame.a1()))
        }
    }
}

/// Trap entry that crosses a real privilege boundary with `ecall`.
///
/// Used when the bridge runs in S-mode beneath a separate SBI firmware; the
/// hart id and scratch arguments are ignored because the firmware finds both
/// on its own side of the trap.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeEcall;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
impl SbiTrapEntry for NativeEcall {
    fn handle_trap(&self, _hartid: usize, _cause: TrapCause, regs: &mut TrapFrame, _scratch: ScratchPtr) -> isize {
        use crate::trap::ds::context::reg;

        let (error, value): (usize, usize);
        unsafe {
            core::arch::asm!(
                "ecall",
                inlateout("a0") regs.x[reg::A0] => error,
                inlateout("a1") regs.x[reg::A1] => value,
                in("a2") regs.x[reg::A2],
                in("a3") regs.x[reg::A3],
                in("a4") regs.x[reg::A4],
                in("a5") regs.x[reg::A5],
                in("a6") regs.x[reg::A6],
                in("a7") regs.x[reg::A7],
                options(nostack)
            );
        }
        regs.x[reg::A0] = error;
        regs.x[reg::A1] = value;
        0
    }
}
