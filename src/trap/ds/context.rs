//! 陷阱帧数据结构模块
//!
//! Defines the register image handed to an SBI implementation's trap entry
//! and the fixed-capacity argument list used to fill it.

use core::fmt;
use static_assertions::const_assert_eq;

/// Number of argument registers (a0-a5) an SBI call may use
pub const MAX_CALL_ARGS: usize = 6;

/// 寄存器编号
pub mod reg {
    pub const RA: usize = 1;
    pub const SP: usize = 2;
    pub const A0: usize = 10;
    pub const A1: usize = 11;
    pub const A2: usize = 12;
    pub const A3: usize = 13;
    pub const A4: usize = 14;
    pub const A5: usize = 15;
    pub const A6: usize = 16;
    pub const A7: usize = 17;
}

/// Up to six machine-word arguments, bound positionally to a0-a5.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct CallArgs {
    words: [usize; MAX_CALL_ARGS],
    len: usize,
}

impl CallArgs {
    /// An empty argument list
    pub const fn none() -> Self {
        Self { words: [0; MAX_CALL_ARGS], len: 0 }
    }

    /// Build an argument list from a slice, `None` if it holds more than
    /// [`MAX_CALL_ARGS`] words.
    pub fn from_slice(args: &[usize]) -> Option<Self> {
        if args.len() > MAX_CALL_ARGS {
            return None;
        }
        let mut words = [0; MAX_CALL_ARGS];
        words[..args.len()].copy_from_slice(args);
        Some(Self { words, len: args.len() })
    }

    /// Build a full argument list; trailing zeros still count.
    pub const fn from_array<const N: usize>(args: [usize; N]) -> Self {
        assert!(N <= MAX_CALL_ARGS);
        let mut words = [0; MAX_CALL_ARGS];
        let mut i = 0;
        while i < N {
            words[i] = args[i];
            i += 1;
        }
        Self { words, len: N }
    }

    /// Number of arguments supplied by the caller
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The supplied arguments
    pub fn as_slice(&self) -> &[usize] {
        &self.words[..self.len]
    }

    /// All six register values; unused slots are zero.
    pub fn registers(&self) -> [usize; MAX_CALL_ARGS] {
        self.words
    }
}

impl fmt::Debug for CallArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// 陷阱帧结构体，与OpenSBI `sbi_trap_regs` 的布局对应
///
/// Holds x0-x31 followed by the machine-mode trap CSRs. A bridged call only
/// fills a0-a7; every other field stays zero.
#[repr(C)]
#[derive(Clone, PartialEq, Eq)]
pub struct TrapFrame {
    // 通用寄存器
    pub x: [usize; 32],
    // 特权寄存器
    pub mepc: usize,
    pub mstatus: usize,
    pub mstatush: usize,
}

const_assert_eq!(core::mem::size_of::<TrapFrame>(), 35 * core::mem::size_of::<usize>());

impl TrapFrame {
    /// 创建一个全零的陷阱帧
    pub const fn new() -> Self {
        Self {
            x: [0; 32],
            mepc: 0,
            mstatus: 0,
            mstatush: 0,
        }
    }

    /// Build the register image of an `ecall` per the SBI calling convention:
    /// a7 = extension id, a6 = function id, a0-a5 = arguments.
    pub fn for_ecall(eid: usize, fid: usize, args: &CallArgs) -> Self {
        let mut frame = Self::new();
        frame.x[reg::A0..=reg::A5].copy_from_slice(&args.registers());
        frame.x[reg::A6] = fid;
        frame.x[reg::A7] = eid;
        frame
    }

    /// Extension id register (a7)
    pub fn extension_id(&self) -> usize {
        self.x[reg::A7]
    }

    /// Function id register (a6)
    pub fn function_id(&self) -> usize {
        self.x[reg::A6]
    }

    /// Argument registers a0-a5
    pub fn args(&self) -> &[usize] {
        &self.x[reg::A0..reg::A0 + MAX_CALL_ARGS]
    }

    /// Argument register a`n`
    ///
    /// # Panics
    ///
    /// If `n >= 6`; a6 and a7 carry the function and extension ids.
    pub fn arg(&self, n: usize) -> usize {
        self.args()[n]
    }

    /// a0 on return: the SBI status code
    pub fn a0(&self) -> usize {
        self.x[reg::A0]
    }

    /// a1 on return: the SBI value
    pub fn a1(&self) -> usize {
        self.x[reg::A1]
    }

    /// Write the (error, value) pair the way a trap handler returns it.
    pub fn set_return(&mut self, error: isize, value: usize) {
        self.x[reg::A0] = error as usize;
        self.x[reg::A1] = value;
    }

    /// Write only a0, as legacy extensions do.
    pub fn set_legacy_return(&mut self, value: isize) {
        self.x[reg::A0] = value as usize;
    }
}

impl Default for TrapFrame {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TrapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrapFrame")
            .field("a0", &format_args!("0x{:x}", self.x[reg::A0]))
            .field("a1", &format_args!("0x{:x}", self.x[reg::A1]))
            .field("a2", &format_args!("0x{:x}", self.x[reg::A2]))
            .field("a3", &format_args!("0x{:x}", self.x[reg::A3]))
            .field("a4", &format_args!("0x{:x}", self.x[reg::A4]))
            .field("a5", &format_args!("0x{:x}", self.x[reg::A5]))
            .field("a6", &format_args!("0x{:x}", self.x[reg::A6]))
            .field("a7", &format_args!("0x{:x}", self.x[reg::A7]))
            .field("mepc", &format_args!("0x{:x}", self.mepc))
            .finish()
    }
}

/// Split a 64-bit time value into argument words. RV64 passes it whole in
/// a0; RV32 passes the low half in a0 and the high half in a1.
#[cfg(target_pointer_width = "64")]
pub fn time_args(stime: u64) -> CallArgs {
    CallArgs::from_array([stime as usize])
}

#[cfg(target_pointer_width = "32")]
pub fn time_args(stime: u64) -> CallArgs {
    CallArgs::from_array([stime as usize, (stime >> 32) as usize])
}

/// Reassemble the time value produced by [`time_args`].
#[cfg(target_pointer_width = "64")]
pub fn time_from_frame(frame: &TrapFrame) -> u64 {
    frame.arg(0) as u64
}

#[cfg(target_pointer_width = "32")]
pub fn time_from_frame(frame: &TrapFrame) -> u64 {
    (frame.arg(0) as u64) | ((frame.arg(1) as u64) << 32)
}
