//! 陷阱仿真模块
//!
//! Everything needed to present a bridged call to an SBI implementation as
//! a supervisor-mode environment call trap.

pub mod ds;
pub mod infrastructure;

pub use ds::{CallArgs, TrapCause, TrapFrame};
pub use infrastructure::{
    CallerContext, EcallDispatcher, HartContext, HartIdentity, SbiTrapEntry, ScratchLookup, ScratchPtr, ScratchTable,
};
