//! SBI接口封装模块
//!
//! 本模块把RISC-V SBI调用封装成带版本的门面 (facade)，调用者不需要知道底层
//! 是直接链接的SBI实现还是经由 `ecall` 陷入的独立固件。

pub mod api;
pub mod direct;
pub mod error;
pub mod ext;
pub mod ids;
pub mod trapped;

pub use api::{AddressRange, HartMask, RemoteFence, SbiImplementation, SbiService};
pub use direct::DirectLink;
pub use error::{BridgeError, SbiResult, SbiRet};
pub use ids::ExtensionId;
pub use trapped::Trapped;
