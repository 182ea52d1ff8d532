//! SBI extension and function identifiers
//!
//! The numeric values are fixed by the SBI specification.

use core::fmt;

/// SBI extension ID (the value in a7)
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExtensionId(usize);

impl ExtensionId {
    /// `sbi_set_timer`
    pub const LEGACY_SET_TIMER: Self = Self(0x00);
    /// `sbi_console_putchar`
    pub const LEGACY_CONSOLE_PUTCHAR: Self = Self(0x01);
    /// `sbi_console_getchar`
    pub const LEGACY_CONSOLE_GETCHAR: Self = Self(0x02);
    /// `sbi_clear_ipi`
    pub const LEGACY_CLEAR_IPI: Self = Self(0x03);
    /// `sbi_send_ipi`
    pub const LEGACY_SEND_IPI: Self = Self(0x04);
    /// `sbi_remote_fence_i`
    pub const LEGACY_REMOTE_FENCE_I: Self = Self(0x05);
    /// `sbi_remote_sfence_vma`
    pub const LEGACY_REMOTE_SFENCE_VMA: Self = Self(0x06);
    /// `sbi_remote_sfence_vma_asid`
    pub const LEGACY_REMOTE_SFENCE_VMA_ASID: Self = Self(0x07);
    /// `sbi_shutdown`
    pub const LEGACY_SHUTDOWN: Self = Self(0x08);

    /// Base Extension (EID #0x10)
    pub const BASE: Self = Self(0x10);
    /// Timer Extension (EID #0x54494D45 "TIME")
    pub const TIME: Self = Self(0x5449_4D45);
    /// IPI Extension (EID #0x735049 "sPI")
    pub const IPI: Self = Self(0x0073_5049);
    /// RFENCE Extension (EID #0x52464E43 "RFNC")
    pub const RFENCE: Self = Self(0x5246_4E43);
    /// Hart State Management Extension (EID #0x48534D "HSM")
    pub const HSM: Self = Self(0x0048_534D);
    /// System Reset Extension (EID #0x53525354 "SRST")
    pub const SYSTEM_RESET: Self = Self(0x5352_5354);

    /// First id of the experimental extension space
    pub const EXPERIMENTAL_START: Self = Self(0x0800_0000);
    /// Last id of the experimental extension space
    pub const EXPERIMENTAL_END: Self = Self(0x08FF_FFFF);
    /// First id of the vendor-specific extension space
    pub const VENDOR_START: Self = Self(0x0900_0000);
    /// Last id of the vendor-specific extension space
    pub const VENDOR_END: Self = Self(0x09FF_FFFF);

    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }

    /// Legacy extensions (0x00-0x0F) return a single value in a0.
    pub const fn is_legacy(self) -> bool {
        self.0 <= 0x0F
    }

    /// Vendor-specific extension space
    pub const fn is_vendor(self) -> bool {
        self.0 >= Self::VENDOR_START.0 && self.0 <= Self::VENDOR_END.0
    }

    pub const fn is_experimental(self) -> bool {
        self.0 >= Self::EXPERIMENTAL_START.0 && self.0 <= Self::EXPERIMENTAL_END.0
    }
}

impl fmt::Debug for ExtensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtensionId({:#x})", self.0)
    }
}

impl From<usize> for ExtensionId {
    fn from(raw: usize) -> Self {
        Self(raw)
    }
}

/// Base extension function ids
pub mod base_fid {
    pub const GET_SPEC_VERSION: usize = 0x0;
    pub const GET_SBI_IMPL_ID: usize = 0x1;
    pub const GET_SBI_IMPL_VERSION: usize = 0x2;
    pub const PROBE_EXTENSION: usize = 0x3;
    pub const GET_MVENDORID: usize = 0x4;
    pub const GET_MARCHID: usize = 0x5;
    pub const GET_MIMPID: usize = 0x6;
}

/// Timer extension function ids
pub mod timer_fid {
    pub const SET_TIMER: usize = 0x0;
}

/// IPI extension function ids
pub mod ipi_fid {
    pub const SEND_IPI: usize = 0x0;
}

/// RFENCE extension function ids
pub mod rfence_fid {
    pub const REMOTE_FENCE_I: usize = 0x0;
    pub const REMOTE_SFENCE_VMA: usize = 0x1;
    pub const REMOTE_SFENCE_VMA_ASID: usize = 0x2;
    pub const REMOTE_HFENCE_GVMA_VMID: usize = 0x3;
    pub const REMOTE_HFENCE_GVMA: usize = 0x4;
    pub const REMOTE_HFENCE_VVMA_ASID: usize = 0x5;
    pub const REMOTE_HFENCE_VVMA: usize = 0x6;
}

/// HSM extension function ids
pub mod hsm_fid {
    pub const HART_START: usize = 0x0;
    pub const HART_STOP: usize = 0x1;
    pub const HART_GET_STATUS: usize = 0x2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_ids_spell_their_names() {
        assert_eq!(ExtensionId::TIME.raw(), u32::from_be_bytes(*b"TIME") as usize);
        assert_eq!(ExtensionId::RFENCE.raw(), u32::from_be_bytes(*b"RFNC") as usize);
        assert_eq!(ExtensionId::HSM.raw(), u32::from_be_bytes(*b"\0HSM") as usize);
        assert_eq!(ExtensionId::IPI.raw(), u32::from_be_bytes(*b"\0sPI") as usize);
    }

    #[test]
    fn ranges() {
        assert!(ExtensionId::LEGACY_SHUTDOWN.is_legacy());
        assert!(!ExtensionId::BASE.is_legacy());
        assert!(ExtensionId::new(0x0900_0000).is_vendor());
        assert!(ExtensionId::new(0x09FF_FFFF).is_vendor());
        assert!(!ExtensionId::new(0x0A00_0000).is_vendor());
        assert!(!ExtensionId::new(0x08FF_FFFF).is_vendor());
        assert!(ExtensionId::new(0x08FF_FFFF).is_experimental());
    }
}
