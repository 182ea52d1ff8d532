//! SBI 扩展门面模块
//!
//! One facade per SBI extension group. Every facade is an immutable struct
//! holding its version and the [`SbiService`](super::api::SbiService) it
//! calls through, so a single instance can be shared by all harts.

pub mod base;
pub mod hsm;
pub mod ipi;
pub mod legacy;
pub mod library;
pub mod rfence;
pub mod timer;
pub mod vendor;

pub use base::{BaseFacade, FirmwareInfo, SpecVersion};
pub use hsm::{HartState, HsmFacade};
pub use ipi::IpiFacade;
pub use legacy::LegacyFacade;
pub use library::LibraryFacade;
pub use rfence::RfenceFacade;
pub use timer::TimerFacade;
pub use vendor::VendorFacade;
