//! HSM扩展门面：hart生命周期控制
//!
//! Start, stop and status of harts. The bridge never caches hart state:
//! every answer comes from the SBI implementation at the time of the call,
//! which is also what makes concurrent `hart_start` calls for the same hart
//! safe. The implementation accepts exactly one and reports
//! [`BridgeError::AlreadyStarted`] to the others.

use core::convert::Infallible;
use core::fmt;
use crate::config::FACADE_VERSION;
use crate::util::sbi::api::SbiService;
use crate::util::sbi::error::{BridgeError, SbiResult};

/// Hart状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum HartState {
    Started = 0,
    Stopped = 1,
    StartPending = 2,
    StopPending = 3,
}

impl HartState {
    pub fn from_raw(value: usize) -> Option<Self> {
        match value {
            0 => Some(Self::Started),
            1 => Some(Self::Stopped),
            2 => Some(Self::StartPending),
            3 => Some(Self::StopPending),
            _ => None,
        }
    }

    pub fn raw(self) -> usize {
        self as usize
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Started)
    }

    pub fn is_stopped(self) -> bool {
        matches!(self, Self::Stopped)
    }

    /// A transition is in flight
    pub fn is_pending(self) -> bool {
        matches!(self, Self::StartPending | Self::StopPending)
    }

    /// `hart_start` is only accepted for a stopped hart
    pub fn can_start(self) -> bool {
        self.is_stopped()
    }
}

impl fmt::Display for HartState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Started => "started",
            Self::Stopped => "stopped",
            Self::StartPending => "start pending",
            Self::StopPending => "stop pending",
        };
        f.write_str(name)
    }
}

pub struct HsmFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl HsmFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    /// 启动hart
    ///
    /// `Ok` means the request was accepted, not that the hart is running;
    /// the target moves through `StartPending` and then jumps to
    /// `start_addr` in S-mode with a0 = `hartid` and a1 = `opaque`.
    ///
    /// Errors: `AlreadyStarted` if the hart is not stopped,
    /// `InvalidParameter` for an unknown hart, `LoadError` for an
    /// unusable start address.
    pub fn hart_start(&self, hartid: usize, start_addr: usize, opaque: usize) -> SbiResult<()> {
        let ret = self.service.hart_start(hartid, start_addr, opaque);
        log::debug!("hsm: hart_start({}, {:#x}) -> {}", hartid, start_addr, ret.error);
        ret.into_unit()
    }

    /// 停止当前hart
    ///
    /// Never returns on success. Any return is an error; a success status
    /// that still came back is reported as [`BridgeError::DeviceError`].
    pub fn hart_stop(&self) -> Result<Infallible, BridgeError> {
        match self.service.hart_stop().into_unit() {
            Ok(()) => {
                log::error!("hsm: hart_stop reported success but returned");
                Err(BridgeError::DeviceError)
            }
            Err(err) => Err(err),
        }
    }

    /// Current state of `hartid`. May be stale by the time the caller
    /// looks at it.
    pub fn hart_get_status(&self, hartid: usize) -> SbiResult<HartState> {
        let raw = self.service.hart_get_status(hartid).into_result()?;
        HartState::from_raw(raw).ok_or_else(|| {
            log::warn!("hsm: hart {} reported undefined state {}", hartid, raw);
            BridgeError::DeviceError
        })
    }

    /// Poll until `hartid` reaches `expected`.
    ///
    /// Re-queries the implementation every iteration. `max_polls = None`
    /// waits forever. Returns `Ok(false)` on timeout; a failing query is
    /// returned as its error.
    pub fn wait_for_state(&self, hartid: usize, expected: HartState, max_polls: Option<usize>) -> SbiResult<bool> {
        let mut remaining = max_polls;
        loop {
            if self.hart_get_status(hartid)? == expected {
                return Ok(true);
            }
            if let Some(ref mut n) = remaining {
                if *n == 0 {
                    return Ok(false);
                }
                *n -= 1;
            }
            core::hint::spin_loop();
        }
    }

    /// Lowest hart id below `max_harts` that reports `Stopped`.
    ///
    /// Harts the implementation rejects as `InvalidParameter` are skipped;
    /// any other query error ends the search and is returned.
    pub fn find_stopped_hart(&self, max_harts: usize) -> SbiResult<Option<usize>> {
        for hartid in 0..max_harts {
            match self.hart_get_status(hartid) {
                Ok(HartState::Stopped) => return Ok(Some(hartid)),
                Ok(_) | Err(BridgeError::InvalidParameter) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::HartState;

    #[test]
    fn state_values() {
        for raw in 0..4 {
            assert_eq!(HartState::from_raw(raw).map(HartState::raw), Some(raw));
        }
        assert_eq!(HartState::from_raw(4), None);
        assert!(HartState::StartPending.is_pending());
        assert!(HartState::StopPending.is_pending());
        assert!(HartState::Stopped.can_start());
        assert!(!HartState::Started.can_start());
    }
}
