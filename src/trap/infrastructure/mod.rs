//! 陷阱基础设施
//!
//! Hart identification, the per-hart scratch table and the ecall dispatcher.

pub mod dispatcher;
pub mod hart;
pub mod scratch;

pub use dispatcher::{EcallDispatcher, SbiTrapEntry};
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub use dispatcher::NativeEcall;
pub use hart::{CallerContext, HartContext, HartIdentity, ScratchLookup};
#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
pub use hart::Mhartid;
pub use scratch::{ScratchError, ScratchPtr, ScratchTable};
