//! 厂商扩展门面
//!
//! Pass-through for extension ids in the vendor range. Arguments are bound
//! positionally to a0-a5.

use crate::config::VENDOR_FACADE_VERSION;
use crate::trap::ds::CallArgs;
use crate::util::sbi::api::SbiService;
use crate::util::sbi::error::{BridgeError, SbiResult};
use crate::util::sbi::ids::ExtensionId;

pub struct VendorFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl VendorFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: VENDOR_FACADE_VERSION, service }
    }

    /// Invoke `fid` of vendor extension `eid`.
    ///
    /// An id outside 0x0900_0000..=0x09FF_FFFF, or more than six arguments,
    /// is rejected with `InvalidParameter` without reaching the
    /// implementation.
    pub fn call(&self, eid: ExtensionId, fid: usize, args: &[usize]) -> SbiResult<usize> {
        if !eid.is_vendor() {
            log::warn!("vendor call with non-vendor extension {:?}", eid);
            return Err(BridgeError::InvalidParameter);
        }
        let args = CallArgs::from_slice(args).ok_or(BridgeError::InvalidParameter)?;
        self.service.vendor_call(eid, fid, &args).into_result()
    }
}
