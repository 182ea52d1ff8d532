//! 当前hart识别
//!
//! Every bridged call needs to know which hart it runs on, both to pass the
//! hart id to the trap entry and to pick the matching scratch pointer.

use super::scratch::{ScratchPtr, ScratchTable};

/// Source of the calling hart's id.
pub trait HartIdentity: Sync {
    /// Id of the hart executing this call
    fn current_hartid(&self) -> usize;
}

/// Reads `mhartid`; only usable in M-mode.
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct Mhartid;

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
impl HartIdentity for Mhartid {
    #[inline]
    fn current_hartid(&self) -> usize {
        riscv::register::mhartid::read()
    }
}

/// Identity of the caller as the SBI implementation sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerContext {
    pub hartid: usize,
    pub scratch: ScratchPtr,
}

/// Hart id source paired with the boot-time scratch table. Both call
/// strategies resolve their caller through this, so they agree on which
/// hart is asking.
pub struct HartContext<H> {
    identity: H,
    scratch: ScratchTable,
}

impl<H: HartIdentity> HartContext<H> {
    pub fn new(identity: H, scratch: ScratchTable) -> Self {
        Self { identity, scratch }
    }

    /// Resolve the calling hart. `None` if the hart has no scratch entry,
    /// which the strategies report as a device failure.
    pub fn caller(&self) -> Option<CallerContext> {
        let hartid = self.identity.current_hartid();
        self.scratch
            .lookup(hartid)
            .map(|scratch| CallerContext { hartid, scratch })
    }

    pub fn current_hartid(&self) -> usize {
        self.identity.current_hartid()
    }

    pub fn scratch_table(&self) -> &ScratchTable {
        &self.scratch
    }
}

/// Object-safe view of the scratch lookups, for code that must not be
/// generic over the hart identity source.
pub trait ScratchLookup: Sync {
    /// Scratch pointer of the calling hart
    fn scratch_this_hart(&self) -> Option<ScratchPtr>;
    /// Scratch pointer of an arbitrary hart
    fn hartid_to_scratch(&self, hartid: usize) -> Option<ScratchPtr>;
}

impl<H: HartIdentity> ScratchLookup for HartContext<H> {
    fn scratch_this_hart(&self) -> Option<ScratchPtr> {
        self.caller().map(|caller| caller.scratch)
    }

    fn hartid_to_scratch(&self, hartid: usize) -> Option<ScratchPtr> {
        self.scratch.lookup(hartid)
    }
}
