//! SBI状态码与错误翻译
//!
//! Maps the small signed status codes an SBI implementation returns in a0
//! onto the bridge's own error vocabulary.

use core::fmt;

/// SBI status codes
pub mod status {
    pub const SUCCESS: isize = 0;
    pub const ERR_FAILED: isize = -1;
    pub const ERR_NOT_SUPPORTED: isize = -2;
    pub const ERR_INVALID_PARAM: isize = -3;
    pub const ERR_DENIED: isize = -4;
    pub const ERR_INVALID_ADDRESS: isize = -5;
    pub const ERR_ALREADY_AVAILABLE: isize = -6;
}

/// SBI call return value: a0 = error, a1 = value
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SbiRet {
    /// Error code (0 = success)
    pub error: isize,
    /// Return value, meaningful only on success
    pub value: usize,
}

impl SbiRet {
    pub const fn new(error: isize, value: usize) -> Self {
        Self { error, value }
    }

    /// Successful return carrying `value`
    pub const fn success(value: usize) -> Self {
        Self::new(status::SUCCESS, value)
    }

    /// Generic failure, used when a trap was not handled
    pub const fn failed() -> Self {
        Self::new(status::ERR_FAILED, 0)
    }

    pub const fn not_supported() -> Self {
        Self::new(status::ERR_NOT_SUPPORTED, 0)
    }

    pub const fn invalid_param() -> Self {
        Self::new(status::ERR_INVALID_PARAM, 0)
    }

    pub const fn denied() -> Self {
        Self::new(status::ERR_DENIED, 0)
    }

    pub const fn invalid_address() -> Self {
        Self::new(status::ERR_INVALID_ADDRESS, 0)
    }

    pub const fn already_available() -> Self {
        Self::new(status::ERR_ALREADY_AVAILABLE, 0)
    }

    /// Check if the call succeeded
    pub fn is_success(&self) -> bool {
        self.error == status::SUCCESS
    }

    /// Translate the status, copying the value out on success.
    pub fn into_result(self) -> Result<usize, BridgeError> {
        match BridgeError::from_status(self.error) {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }

    /// Translate the status for calls that declare no output.
    pub fn into_unit(self) -> Result<(), BridgeError> {
        match BridgeError::from_status(self.error) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

/// Errors surfaced to bridge callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeError {
    /// SBI_ERR_FAILED, or the implementation did not handle the trap
    DeviceError,
    /// SBI_ERR_NOT_SUPPORTED
    Unsupported,
    /// SBI_ERR_INVALID_PARAM
    InvalidParameter,
    /// SBI_ERR_DENIED
    AccessDenied,
    /// SBI_ERR_INVALID_ADDRESS
    LoadError,
    /// SBI_ERR_ALREADY_AVAILABLE
    AlreadyStarted,
    /// Any other non-zero status, kept for diagnostics
    Failure(isize),
}

impl BridgeError {
    /// `None` for success, otherwise the matching error.
    pub fn from_status(code: isize) -> Option<Self> {
        let err = match code {
            status::SUCCESS => return None,
            status::ERR_FAILED => Self::DeviceError,
            status::ERR_NOT_SUPPORTED => Self::Unsupported,
            status::ERR_INVALID_PARAM => Self::InvalidParameter,
            status::ERR_DENIED => Self::AccessDenied,
            status::ERR_INVALID_ADDRESS => Self::LoadError,
            status::ERR_ALREADY_AVAILABLE => Self::AlreadyStarted,
            other => Self::Failure(other),
        };
        Some(err)
    }

    /// The SBI status code this error came from
    pub fn code(&self) -> isize {
        match self {
            Self::DeviceError => status::ERR_FAILED,
            Self::Unsupported => status::ERR_NOT_SUPPORTED,
            Self::InvalidParameter => status::ERR_INVALID_PARAM,
            Self::AccessDenied => status::ERR_DENIED,
            Self::LoadError => status::ERR_INVALID_ADDRESS,
            Self::AlreadyStarted => status::ERR_ALREADY_AVAILABLE,
            Self::Failure(code) => *code,
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceError => write!(f, "device error"),
            Self::Unsupported => write!(f, "operation not supported"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::AccessDenied => write!(f, "access denied"),
            Self::LoadError => write!(f, "invalid address"),
            Self::AlreadyStarted => write!(f, "already started"),
            Self::Failure(code) => write!(f, "sbi failure (status {})", code),
        }
    }
}

/// Result of a facade operation
pub type SbiResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    const NAMED: [(isize, BridgeError); 6] = [
        (status::ERR_FAILED, BridgeError::DeviceError),
        (status::ERR_NOT_SUPPORTED, BridgeError::Unsupported),
        (status::ERR_INVALID_PARAM, BridgeError::InvalidParameter),
        (status::ERR_DENIED, BridgeError::AccessDenied),
        (status::ERR_INVALID_ADDRESS, BridgeError::LoadError),
        (status::ERR_ALREADY_AVAILABLE, BridgeError::AlreadyStarted),
    ];

    #[test]
    fn named_codes_map_one_to_one() {
        for (code, expected) in NAMED {
            assert_eq!(BridgeError::from_status(code), Some(expected));
            assert_eq!(expected.code(), code);
        }
        for (i, (_, a)) in NAMED.iter().enumerate() {
            for (_, b) in NAMED.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn unnamed_codes_keep_their_value() {
        for code in [-7isize, -13, -1000, 5] {
            let err = BridgeError::from_status(code).unwrap();
            assert_eq!(err, BridgeError::Failure(code));
            assert_eq!(err.code(), code);
            assert!(NAMED.iter().all(|(_, named)| *named != err));
        }
    }

    #[test]
    fn value_is_copied_out_only_on_success() {
        assert_eq!(SbiRet::success(0x2a).into_result(), Ok(0x2a));
        assert_eq!(SbiRet::new(status::ERR_DENIED, 0x2a).into_result(), Err(BridgeError::AccessDenied));
        assert_eq!(SbiRet::success(99).into_unit(), Ok(()));
        assert_eq!(SbiRet::failed().into_unit(), Err(BridgeError::DeviceError));
    }
}
