pub mod registry;
pub mod sbi;
