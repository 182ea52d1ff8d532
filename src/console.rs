//! 控制台输出
//!
//! `print!`/`println!` and the `log` backend. Output goes through the
//! published Legacy facade; before one is published it falls back to a raw
//! SBI legacy call on RISC-V and is dropped elsewhere.
//!
//! A facade call that fails logs a warning, and the logger prints here. So
//! only one write at a time goes through the facade; a write that finds it
//! busy, nested or from another hart, takes the early path.

use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, Ordering};
use crate::util::registry;

// 控制台正在经由门面输出
static FACADE_BUSY: AtomicBool = AtomicBool::new(false);

struct Stdout;

impl Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let Ok(legacy) = registry::global().locate_legacy() else {
            return early_write(s);
        };
        if FACADE_BUSY
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return early_write(s);
        }
        let result = legacy.console_write(s).map_err(|_| fmt::Error);
        FACADE_BUSY.store(false, Ordering::Release);
        result
    }
}

#[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
#[allow(deprecated)]
fn early_write(s: &str) -> fmt::Result {
    for byte in s.bytes() {
        sbi_rt::legacy::console_putchar(byte as usize);
    }
    Ok(())
}

#[cfg(not(any(target_arch = "riscv32", target_arch = "riscv64")))]
fn early_write(_s: &str) -> fmt::Result {
    Ok(())
}

pub fn print(args: fmt::Arguments) {
    // Nowhere to report a console failure.
    let _ = Stdout.write_fmt(args);
}

#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

/// `log` backend writing one line per record to the SBI console
#[cfg(feature = "log-console")]
pub struct ConsoleLogger;

#[cfg(feature = "log-console")]
impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            print(format_args!("[{:>5}] {}\n", record.level(), record.args()));
        }
    }

    fn flush(&self) {}
}

#[cfg(feature = "log-console")]
static LOGGER: ConsoleLogger = ConsoleLogger;

/// Install [`ConsoleLogger`] as the global logger. `None` selects
/// [`crate::config::DEFAULT_LOG_LEVEL`].
#[cfg(feature = "log-console")]
pub fn init_logger(level: Option<log::LevelFilter>) -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level.unwrap_or(crate::config::DEFAULT_LOG_LEVEL));
    Ok(())
}
