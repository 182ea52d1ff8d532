//! 陷阱数据结构模块
//!
//! Register image and cause codes shared by the dispatcher and by the SBI
//! implementations it calls into.

pub mod context;
pub mod types;

pub use context::{time_args, time_from_frame, CallArgs, TrapFrame, MAX_CALL_ARGS};
pub use types::{Exception, TrapCause};
