//! 每个hart的scratch指针表
//!
//! The SBI implementation identifies a hart's private state through the
//! value it keeps in `mscratch`. The bridge never reads that register on the
//! call path: the values are captured once at boot into a table indexed by
//! hart id and looked up per call, so a pointer is never carried across a
//! hart-id boundary.

use core::fmt;
use crate::config::MAX_HARTS;

/// Opaque per-hart token understood only by the SBI implementation.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchPtr(usize);

impl ScratchPtr {
    pub const NULL: Self = Self(0);

    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn as_usize(self) -> usize {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ScratchPtr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScratchPtr({:#x})", self.0)
    }
}

/// Errors raised while building a [`ScratchTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScratchError {
    /// Hart id does not fit in the table
    HartOutOfRange(usize),
    /// A null pointer cannot identify a hart
    NullScratch(usize),
    /// The hart already has a scratch pointer
    Duplicate(usize),
}

impl fmt::Display for ScratchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HartOutOfRange(id) => write!(f, "hart {} exceeds the scratch table capacity {}", id, MAX_HARTS),
            Self::NullScratch(id) => write!(f, "null scratch pointer for hart {}", id),
            Self::Duplicate(id) => write!(f, "hart {} already has a scratch pointer", id),
        }
    }
}

/// Hart id -> scratch pointer table. Filled during boot, read-only once it
/// is handed to a dispatcher.
#[derive(Clone)]
pub struct ScratchTable {
    slots: [ScratchPtr; MAX_HARTS],
}

impl ScratchTable {
    /// 创建空表
    pub const fn new() -> Self {
        Self { slots: [ScratchPtr::NULL; MAX_HARTS] }
    }

    /// Record the scratch pointer of one hart.
    pub fn insert(&mut self, hartid: usize, scratch: ScratchPtr) -> Result<(), ScratchError> {
        let slot = self.slots.get_mut(hartid).ok_or(ScratchError::HartOutOfRange(hartid))?;
        if scratch.is_null() {
            return Err(ScratchError::NullScratch(hartid));
        }
        if !slot.is_null() {
            return Err(ScratchError::Duplicate(hartid));
        }
        *slot = scratch;
        Ok(())
    }

    /// Builder form of [`ScratchTable::insert`].
    pub fn with(mut self, hartid: usize, scratch: ScratchPtr) -> Result<Self, ScratchError> {
        self.insert(hartid, scratch)?;
        Ok(self)
    }

    /// Scratch pointer of `hartid`, `None` for unknown harts.
    pub fn lookup(&self, hartid: usize) -> Option<ScratchPtr> {
        self.slots.get(hartid).copied().filter(|p| !p.is_null())
    }

    /// Number of harts with a recorded pointer
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|p| !p.is_null()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Capture the current hart's `mscratch` into the table.
    ///
    /// Must run on each hart once, in M-mode, before the table is sealed.
    #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
    pub fn record_current_hart(&mut self) -> Result<usize, ScratchError> {
        let hartid = riscv::register::mhartid::read();
        let scratch = ScratchPtr::new(riscv::register::mscratch::read());
        self.insert(hartid, scratch)?;
        Ok(hartid)
    }
}

impl Default for ScratchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScratchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().enumerate().filter(|(_, p)| !p.is_null()))
            .finish()
    }
}
