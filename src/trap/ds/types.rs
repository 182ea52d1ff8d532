//! Trap system type definitions
//!
//! Defines the cause codes used when a trap is synthesized for the SBI
//! implementation's trap entry.

use core::fmt;

/// Exception type enum (mcause codes with the interrupt bit clear)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exception {
    InstructionMisaligned = 0,
    InstructionFault = 1,
    IllegalInstruction = 2,
    Breakpoint = 3,
    LoadMisaligned = 4,
    LoadFault = 5,
    StoreMisaligned = 6,
    StoreFault = 7,
    UserEnvCall = 8,
    SupervisorEnvCall = 9,
    MachineEnvCall = 11,
    InstructionPageFault = 12,
    LoadPageFault = 13,
    StorePageFault = 15,
}

/// Trap cause wrapper
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TrapCause {
    bits: usize,
}

impl TrapCause {
    /// Environment call from S-mode, the cause every bridged call uses
    pub const SUPERVISOR_ECALL: Self = Self::from_exception(Exception::SupervisorEnvCall);

    /// Create trap cause from raw bits
    pub const fn from_bits(bits: usize) -> Self {
        Self { bits }
    }

    /// Create a synchronous (exception) cause
    pub const fn from_exception(exception: Exception) -> Self {
        Self { bits: exception as usize }
    }

    /// Get raw bits
    pub const fn bits(&self) -> usize {
        self.bits
    }

    /// Check if this is an interrupt (vs exception)
    pub fn is_interrupt(&self) -> bool {
        self.bits & (1 << (usize::BITS - 1)) != 0
    }

    /// Get the interrupt/exception code
    pub fn code(&self) -> usize {
        self.bits & !(1 << (usize::BITS - 1))
    }

    /// 是否为环境调用（任意特权级）
    pub fn is_ecall(&self) -> bool {
        !self.is_interrupt() && matches!(self.code(), 8 | 9 | 11)
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrapCause {{ interrupt: {}, code: {} }}", self.is_interrupt(), self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supervisor_ecall_cause_is_synchronous_code_9() {
        let cause = TrapCause::SUPERVISOR_ECALL;
        assert!(!cause.is_interrupt());
        assert_eq!(cause.code(), 9);
        assert!(cause.is_ecall());
    }

    #[test]
    fn interrupt_bit_is_not_an_ecall() {
        let timer = TrapCause::from_bits((1 << (usize::BITS - 1)) | 9);
        assert!(timer.is_interrupt());
        assert_eq!(timer.code(), 9);
        assert!(!timer.is_ecall());
    }
}
