//! RISC-V SBI 桥接层
//!
//! Lets early boot stages call SBI services (console, timer, IPIs, remote
//! fences, hart lifecycle) through versioned facades, independent of whether
//! the SBI implementation is linked in directly or reached with a trapped
//! `ecall`.
//!
//! A boot stage picks a strategy once, wraps it in facades and publishes
//! them:
//!
//! ```ignore
//! let harts = HartContext::new(Mhartid, scratch_table);
//! let service: &'static dyn SbiService = /* DirectLink or Trapped */;
//! static BASE: BaseFacade = ...;
//! registry::install(facade_set)?;
//! ```

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod trap;
pub mod util;

#[cfg(test)]
mod test;

pub use trap::{CallerContext, HartContext, HartIdentity, ScratchPtr, ScratchTable};
pub use util::registry::{Facade, FacadeId, FacadeRegistry, FacadeSet, RegistryError};
pub use util::sbi::ext::{
    BaseFacade, HartState, HsmFacade, IpiFacade, LegacyFacade, LibraryFacade, RfenceFacade, SpecVersion,
    TimerFacade, VendorFacade,
};
pub use util::sbi::{
    AddressRange, BridgeError, DirectLink, ExtensionId, HartMask, SbiImplementation, SbiResult, SbiRet,
    SbiService, Trapped,
};
