//! 扩展门面测试

use super::firmware::{scratch_of, run_on_hart, TestFirmware, VENDOR_EXT};
use super::{bridges, bridges_with, facade_set};
use crate::util::sbi::api::{AddressRange, HartMask, RemoteFence};
use crate::util::sbi::error::BridgeError;
use crate::util::sbi::ids::ExtensionId;

#[test]
fn legacy_console_round_trip() {
    for bridge in bridges() {
        let legacy = facade_set(&bridge).legacy;
        legacy.console_write("ok\n").unwrap();
        assert_eq!(bridge.firmware.console_output(), b"ok\n", "{}", bridge.name);

        assert_eq!(legacy.console_getchar(), Ok(None));
        bridge.firmware.push_input(&[0x00, 0xff]);
        assert_eq!(legacy.console_getchar(), Ok(Some(0x00)), "{}", bridge.name);
        assert_eq!(legacy.console_getchar(), Ok(Some(0xff)), "{}", bridge.name);
        assert_eq!(legacy.console_getchar(), Ok(None));
    }
}

#[test]
fn legacy_hart_mask_uses_the_first_word() {
    for bridge in bridges() {
        let legacy = facade_set(&bridge).legacy;
        let mask = 0b0110usize;
        legacy.send_ipi(&mask).unwrap();
        assert!(!bridge.firmware.ipi_pending(0));
        assert!(bridge.firmware.ipi_pending(1), "{}", bridge.name);
        assert!(bridge.firmware.ipi_pending(2), "{}", bridge.name);

        legacy.remote_sfence_vma_asid(&mask, 0x4000, 0x1000, 9).unwrap();
        assert_eq!(
            bridge.firmware.fences(),
            vec![(
                HartMask::from_mask_base(mask, 0),
                RemoteFence::SfenceVmaAsid(AddressRange::new(0x4000, 0x1000), 9)
            )]
        );
    }
}

#[test]
fn legacy_timer_and_ipi_clear() {
    for bridge in bridges() {
        let legacy = facade_set(&bridge).legacy;
        legacy.set_timer(77).unwrap();
        assert_eq!(bridge.firmware.timer_events(), vec![(0, 77)]);
        legacy.clear_ipi().unwrap();
        legacy.remote_fence_i(&1).unwrap();
        legacy.remote_sfence_vma(&1, 0, 0).unwrap();
        assert_eq!(bridge.firmware.fences().len(), 2, "{}", bridge.name);
    }
}

#[test]
fn legacy_shutdown_that_returns_is_reported() {
    for bridge in bridges() {
        let legacy = facade_set(&bridge).legacy;
        // the model firmware records the request and comes back
        assert_eq!(legacy.shutdown(), Err(BridgeError::DeviceError), "{}", bridge.name);
        assert_eq!(bridge.firmware.shutdowns(), 1);
    }
    for bridge in bridges_with(|| TestFirmware::new().without(ExtensionId::LEGACY_SHUTDOWN)) {
        let legacy = facade_set(&bridge).legacy;
        assert_eq!(legacy.shutdown(), Err(BridgeError::Unsupported), "{}", bridge.name);
        assert_eq!(bridge.firmware.shutdowns(), 0);
    }
}

#[test]
fn timer_accepts_past_deadlines() {
    for bridge in bridges() {
        let timer = facade_set(&bridge).timer;
        timer.set_timer(0).unwrap();
        timer.set_timer(1).unwrap();
        timer.disarm().unwrap();
        assert_eq!(bridge.firmware.timer_events(), vec![(0, 0), (0, 1), (0, u64::MAX)], "{}", bridge.name);
    }
}

#[test]
fn timer_value_is_not_truncated() {
    for bridge in bridges() {
        let timer = facade_set(&bridge).timer;
        let stime = 0x0000_0001_2345_6789u64;
        run_on_hart(3, || timer.set_timer(stime)).unwrap();
        assert_eq!(bridge.firmware.timer_events(), vec![(3, stime)], "{}", bridge.name);
    }
}

#[test]
fn ipi_targets() {
    for bridge in bridges() {
        let ipi = facade_set(&bridge).ipi;
        ipi.send_ipi_to_hart(3).unwrap();
        assert!(bridge.firmware.ipi_pending(3));
        assert!(!bridge.firmware.ipi_pending(1));

        ipi.send_ipi_to_all().unwrap();
        assert!((0..4).all(|hartid| bridge.firmware.ipi_pending(hartid)), "{}", bridge.name);

        assert_eq!(ipi.send_ipi_to_hart(40), Err(BridgeError::InvalidParameter), "{}", bridge.name);
    }
}

#[test]
fn supervisor_fences_reach_the_implementation() {
    for bridge in bridges() {
        let rfence = facade_set(&bridge).rfence;
        let range = AddressRange::new(0x9000_0000, 0x3000);
        rfence.remote_fence_i(HartMask::all()).unwrap();
        rfence.remote_sfence_vma(HartMask::single(1), AddressRange::ALL).unwrap();
        rfence.remote_sfence_vma_asid(HartMask::single(2), range, 4).unwrap();

        assert_eq!(
            bridge.firmware.fences(),
            vec![
                (HartMask::all(), RemoteFence::FenceI),
                (HartMask::single(1), RemoteFence::SfenceVma(AddressRange::ALL)),
                (HartMask::single(2), RemoteFence::SfenceVmaAsid(range, 4)),
            ],
            "{}",
            bridge.name
        );
    }
}

#[test]
fn hypervisor_fences_use_their_own_function_ids() {
    for bridge in bridges_with(|| TestFirmware::new().with_hypervisor()) {
        let rfence = facade_set(&bridge).rfence;
        let range = AddressRange::new(0x1000, 0x1000);
        rfence.remote_hfence_gvma_vmid(HartMask::single(1), range, 5).unwrap();
        rfence.remote_hfence_gvma(HartMask::single(1), range).unwrap();
        rfence.remote_hfence_vvma_asid(HartMask::single(1), range, 6).unwrap();
        rfence.remote_hfence_vvma(HartMask::single(1), range).unwrap();

        let fences: Vec<RemoteFence> = bridge.firmware.fences().into_iter().map(|(_, f)| f).collect();
        assert_eq!(
            fences,
            vec![
                RemoteFence::HfenceGvmaVmid(range, 5),
                RemoteFence::HfenceGvma(range),
                RemoteFence::HfenceVvmaAsid(range, 6),
                RemoteFence::HfenceVvma(range),
            ],
            "{}",
            bridge.name
        );
    }
}

#[test]
fn hypervisor_fences_without_h_extension() {
    for bridge in bridges() {
        let rfence = facade_set(&bridge).rfence;
        assert_eq!(
            rfence.remote_hfence_vvma(HartMask::all(), AddressRange::ALL),
            Err(BridgeError::Unsupported),
            "{}",
            bridge.name
        );
        assert!(bridge.firmware.fences().is_empty());
    }
}

#[test]
fn vendor_calls() {
    for bridge in bridges() {
        let vendor = facade_set(&bridge).vendor;
        assert_eq!(vendor.version, 0x00);
        assert_eq!(vendor.call(VENDOR_EXT, 0, &[10, 20, 30, 40, 50, 60]), Ok(210), "{}", bridge.name);
        assert_eq!(vendor.call(VENDOR_EXT, 0, &[]), Ok(0));
        assert_eq!(vendor.call(VENDOR_EXT, 1, &[]), Err(BridgeError::AccessDenied));
        assert_eq!(vendor.call(VENDOR_EXT, 9, &[]), Err(BridgeError::Unsupported));
        assert_eq!(vendor.call(ExtensionId::new(0x0900_0000), 0, &[]), Err(BridgeError::Unsupported));
    }
}

#[test]
fn vendor_rejects_bad_requests_before_dispatch() {
    for bridge in bridges() {
        let vendor = facade_set(&bridge).vendor;
        assert_eq!(vendor.call(ExtensionId::HSM, 0, &[]), Err(BridgeError::InvalidParameter));
        assert_eq!(vendor.call(ExtensionId::new(0x0A00_0000), 0, &[]), Err(BridgeError::InvalidParameter));
        assert_eq!(vendor.call(VENDOR_EXT, 0, &[0; 7]), Err(BridgeError::InvalidParameter));
        // nothing reached the implementation
        assert_eq!(bridge.firmware.last_caller(), None, "{}", bridge.name);
    }
}

#[test]
fn library_lookups() {
    for bridge in bridges() {
        let library = facade_set(&bridge).library.unwrap();
        assert_eq!(library.scratch_this_hart(), Ok(scratch_of(0)));
        assert_eq!(run_on_hart(2, || library.scratch_this_hart()), Ok(scratch_of(2)));
        assert_eq!(run_on_hart(9, || library.scratch_this_hart()), Err(BridgeError::DeviceError));
        assert_eq!(library.hartid_to_scratch(3), Ok(scratch_of(3)));
        assert_eq!(library.hartid_to_scratch(31), Err(BridgeError::InvalidParameter));
        assert_eq!(library.hartid_to_scratch(usize::MAX), Err(BridgeError::InvalidParameter));
    }
}

#[test]
fn facade_versions() {
    for bridge in bridges() {
        let set = facade_set(&bridge);
        assert_eq!(set.base.version, 0x02);
        assert_eq!(set.legacy.version, 0x02);
        assert_eq!(set.timer.version, 0x02);
        assert_eq!(set.ipi.version, 0x02);
        assert_eq!(set.rfence.version, 0x02);
        assert_eq!(set.hsm.version, 0x02);
        assert_eq!(set.library.map(|l| l.version), Some(0x00));
    }
}
