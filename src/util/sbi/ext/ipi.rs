//! IPI扩展门面

use crate::config::FACADE_VERSION;
use crate::util::sbi::api::{HartMask, SbiService};
use crate::util::sbi::error::SbiResult;

pub struct IpiFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl IpiFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    /// Raise a supervisor software interrupt on every hart in `harts`.
    pub fn send_ipi(&self, harts: HartMask) -> SbiResult<()> {
        self.service.send_ipi(harts).into_unit()
    }

    /// 发送处理器间中断到指定核心
    pub fn send_ipi_to_hart(&self, hartid: usize) -> SbiResult<()> {
        self.send_ipi(HartMask::single(hartid))
    }

    /// 发送处理器间中断到所有核心
    pub fn send_ipi_to_all(&self) -> SbiResult<()> {
        self.send_ipi(HartMask::all())
    }
}
