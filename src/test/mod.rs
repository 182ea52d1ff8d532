//! 桥接层测试模块
//!
//! Every suite runs against both call strategies, each wrapped around its
//! own instance of the [`firmware::TestFirmware`] model.


mod facade_test;

use crate::trap::infrastructure::{EcallDispatcher, HartContext, ScratchLookup, ScratchTable};
use crate::util::registry::FacadeSet;
use crate::util::sbi::ext::{
    BaseFacade, HsmFacade, IpiFacade, LegacyFacade, LibraryFacade, RfenceFacade, TimerFacade, VendorFacade,
};
use crate::util::sbi::{DirectLink, SbiService, Trapped};
use firmware::{scratch_of, TestFirmware, TestHart, NUM_HARTS};

pub type TestDirect = DirectLink<TestFirmware, TestHart>;
pub type TestTrapped = Trapped<TestFirmware, TestHart>;

pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// Scratch table as boot code would leave it: every model hart recorded.
pub fn boot_harts() -> HartContext<TestHart> {
    let mut table = ScratchTable::new();
    for hartid in 0..NUM_HARTS {
        table.insert(hartid, scratch_of(hartid)).unwrap();
    }
    HartContext::new(TestHart, table)
}

/// One strategy wired to its own firmware model
pub struct Bridge {
    pub name: &'static str,
    pub service: &'static dyn SbiService,
    pub firmware: &'static TestFirmware,
    pub harts: &'static dyn ScratchLookup,
}

pub fn direct_bridge(firmware: TestFirmware) -> Bridge {
    let direct: &'static TestDirect = leak(DirectLink::new(firmware, boot_harts()));
    Bridge {
        name: "direct",
        service: direct,
        firmware: direct.implementation(),
        harts: direct.harts(),
    }
}

pub fn trapped_bridge(firmware: TestFirmware) -> Bridge {
    let trapped: &'static TestTrapped = leak(Trapped::new(EcallDispatcher::new(firmware, boot_harts())));
    Bridge {
        name: "trapped",
        service: trapped,
        firmware: trapped.dispatcher().entry(),
        harts: trapped.dispatcher().harts(),
    }
}

/// Both strategies, each over a fresh model built by `make`.
pub fn bridges_with(make: impl Fn() -> TestFirmware) -> [Bridge; 2] {
    [direct_bridge(make()), trapped_bridge(make())]
}

pub fn bridges() -> [Bridge; 2] {
    bridges_with(TestFirmware::new)
}

/// A complete facade set over `bridge`.
pub fn facade_set(bridge: &Bridge) -> FacadeSet {
    FacadeSet {
        base: leak(BaseFacade::new(bridge.service)),
        legacy: leak(LegacyFacade::new(bridge.service)),
        timer: leak(TimerFacade::new(bridge.service)),
        ipi: leak(IpiFacade::new(bridge.service)),
        rfence: leak(RfenceFacade::new(bridge.service)),
        hsm: leak(HsmFacade::new(bridge.service)),
        vendor: leak(VendorFacade::new(bridge.service)),
        library: Some(leak(LibraryFacade::new(bridge.harts))),
    }
}
