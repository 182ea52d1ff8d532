//! RFENCE扩展门面
//!
//! Asks remote harts to execute fence instructions. Hypervisor fences are
//! only meaningful on harts with the H extension; the implementation reports
//! `Unsupported` otherwise.

use crate::config::FACADE_VERSION;
use crate::util::sbi::api::{AddressRange, HartMask, RemoteFence, SbiService};
use crate::util::sbi::error::SbiResult;

pub struct RfenceFacade {
    pub version: usize,
    service: &'static dyn SbiService,
}

impl RfenceFacade {
    pub const fn new(service: &'static dyn SbiService) -> Self {
        Self { version: FACADE_VERSION, service }
    }

    fn fence(&self, harts: HartMask, fence: RemoteFence) -> SbiResult<()> {
        self.service.remote_fence(harts, fence).into_unit()
    }

    /// `fence.i`
    pub fn remote_fence_i(&self, harts: HartMask) -> SbiResult<()> {
        self.fence(harts, RemoteFence::FenceI)
    }

    /// `sfence.vma` over `range`
    pub fn remote_sfence_vma(&self, harts: HartMask, range: AddressRange) -> SbiResult<()> {
        self.fence(harts, RemoteFence::SfenceVma(range))
    }

    /// `sfence.vma` over `range`, limited to `asid`
    pub fn remote_sfence_vma_asid(&self, harts: HartMask, range: AddressRange, asid: usize) -> SbiResult<()> {
        self.fence(harts, RemoteFence::SfenceVmaAsid(range, asid))
    }

    /// `hfence.gvma` over guest physical `range`, limited to `vmid`
    pub fn remote_hfence_gvma_vmid(&self, harts: HartMask, range: AddressRange, vmid: usize) -> SbiResult<()> {
        self.fence(harts, RemoteFence::HfenceGvmaVmid(range, vmid))
    }

    /// `hfence.gvma` over guest physical `range`, all VMIDs
    pub fn remote_hfence_gvma(&self, harts: HartMask, range: AddressRange) -> SbiResult<()> {
        self.fence(harts, RemoteFence::HfenceGvma(range))
    }

    /// `hfence.vvma` over guest virtual `range`, limited to `asid`
    pub fn remote_hfence_vvma_asid(&self, harts: HartMask, range: AddressRange, asid: usize) -> SbiResult<()> {
        self.fence(harts, RemoteFence::HfenceVvmaAsid(range, asid))
    }

    /// `hfence.vvma` over guest virtual `range`
    pub fn remote_hfence_vvma(&self, harts: HartMask, range: AddressRange) -> SbiResult<()> {
        self.fence(harts, RemoteFence::HfenceVvma(range))
    }
}
