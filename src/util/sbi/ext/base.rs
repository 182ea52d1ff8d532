//! Base扩展门面
//!
//! Version and capability queries. None of these change state, so repeated
//! calls return the same values.

use core::fmt;
use crate::config::FACADE_VERSION;
use crate::util::sbi::api::SbiService;
use crate::util::sbi::error::SbiResult;
use crate::util::sbi::ids::ExtensionId;

/// SBI规范版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecVersion {
    pub major: usize,
    pub minor: usize,
}

impl SpecVersion {
    const MINOR_MASK: usize = 0x00FF_FFFF;
    const MAJOR_SHIFT: usize = 24;
    const MAJOR_MASK: usize = 0x7F;

    /// Decode the raw value of `sbi_get_spec_version`; bit 31 is reserved.
    pub const fn from_raw(raw: usize) -> Self {
        Self {
            major: (raw >> Self::MAJOR_SHIFT) & Self::MAJOR_MASK,
            minor: raw & Self::MINOR_MASK,
        }
    }

    pub const fn raw(&self) -> usize {
        ((self.major & Self::MAJOR_MASK) << Self::MAJOR_SHIFT) | (self.minor & Self::MINOR_MASK)
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// 固件信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareInfo {
    pub spec_version: SpecVersion,
    pub impl_id: usize,
    pub impl_version: usize,
    pub mvendorid: usize,
    pub marchid: usize,
    pub mimpid: usize,
}

impl FirmwareInfo {
    /// 打印固件信息
    pub fn print(&self) {
        crate::println!("==== SBI Firmware ====");
        crate::println!("Spec version: {}", self.spec_version);
        crate::println!("Implementation: {} (version {:#x})", self.impl_id, self.impl_version);
        crate::println!("mvendorid: {:#x}", self.mvendorid);
        crate::println!("marchid: {:#x}", self.marchid);
        crate::println!("mimpid: {:#x}", self.mimpid);
        crate::println!("======================");
    }
}

pub struct BaseFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl BaseFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    pub fn get_spec_version(&self) -> SbiResult<SpecVersion> {
        self.service.get_spec_version().into_result().map(SpecVersion::from_raw)
    }

    pub fn get_impl_id(&self) -> SbiResult<usize> {
        self.service.get_impl_id().into_result()
    }

    pub fn get_impl_version(&self) -> SbiResult<usize> {
        self.service.get_impl_version().into_result()
    }

    /// 0 when the extension is absent. An unknown id is not an error.
    pub fn probe_extension(&self, eid: ExtensionId) -> SbiResult<usize> {
        self.service.probe_extension(eid).into_result()
    }

    /// Convenience wrapper over [`Self::probe_extension`].
    pub fn has_extension(&self, eid: ExtensionId) -> SbiResult<bool> {
        Ok(self.probe_extension(eid)? != 0)
    }

    pub fn get_mvendorid(&self) -> SbiResult<usize> {
        self.service.get_mvendorid().into_result()
    }

    pub fn get_marchid(&self) -> SbiResult<usize> {
        self.service.get_marchid().into_result()
    }

    pub fn get_mimpid(&self) -> SbiResult<usize> {
        self.service.get_mimpid().into_result()
    }

    /// Collect every Base query into one record.
    pub fn firmware_info(&self) -> SbiResult<FirmwareInfo> {
        Ok(FirmwareInfo {
            spec_version: self.get_spec_version()?,
            impl_id: self.get_impl_id()?,
            impl_version: self.get_impl_version()?,
            mvendorid: self.get_mvendorid()?,
            marchid: self.get_marchid()?,
            mimpid: self.get_mimpid()?,
        })
    }
}
