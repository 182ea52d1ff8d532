//! Timer扩展门面

use crate::config::FACADE_VERSION;
use crate::util::sbi::api::SbiService;
use crate::util::sbi::error::SbiResult;

pub struct TimerFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl TimerFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    /// 设置下一次定时器事件的绝对时间
    ///
    /// A time already in the past still succeeds; the timer interrupt
    /// becomes pending at once.
    pub fn set_timer(&self, stime: u64) -> SbiResult<()> {
        self.service.set_timer(stime).into_unit()
    }

    /// Push the next event out to the end of time.
    pub fn disarm(&self) -> SbiResult<()> {
        self.set_timer(u64::MAX)
    }
}
