//! 编译期配置
//!
//! Build-time constants shared by the dispatcher, the facades and the registry.

/// 支持的最大hart数量（scratch表的容量）
pub const MAX_HARTS: usize = 32;

/// Version reported by every standard facade (SBI spec v0.2 encoding).
pub const FACADE_VERSION: usize = 0x02;

/// Version reported by the vendor and library facades.
pub const VENDOR_FACADE_VERSION: usize = 0x00;

/// 注册表可发布的最大facade数量
pub const MAX_PUBLISHED_FACADES: usize = 16;

/// Level used by [`crate::console::init_logger`] when none is given.
pub const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
