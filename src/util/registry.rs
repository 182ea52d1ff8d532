//! 门面注册表
//!
//! Publishes each facade under a stable GUID so later boot stages can find
//! it. The lock only guards the slot array; a located facade is a
//! `&'static` reference and is called without holding it.

use core::fmt;
use spin::Mutex;
use crate::config::MAX_PUBLISHED_FACADES;
use crate::util::sbi::ext::{
    BaseFacade, HsmFacade, IpiFacade, LegacyFacade, LibraryFacade, RfenceFacade, TimerFacade, VendorFacade,
};

/// 128位GUID
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FacadeId {
    pub data1: u32,
    pub data2: u16,
    pub data3: u16,
    pub data4: [u8; 8],
}

impl FacadeId {
    pub const fn new(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
        Self { data1, data2, data3, data4 }
    }

    pub const BASE: Self = Self::new(0x9af5_b3c3, 0x1e8c, 0x4219, [0xa4, 0xfb, 0x3f, 0xb8, 0xb2, 0xb8, 0xfe, 0xa1]);
    pub const LEGACY: Self = Self::new(0xc80a_737c, 0x566b, 0x4709, [0x8f, 0x74, 0x58, 0x30, 0xee, 0x2a, 0xd7, 0x36]);
    pub const HSM: Self = Self::new(0x1342_1726, 0xa40c, 0x479c, [0x94, 0xd2, 0x8f, 0xf2, 0x97, 0x32, 0xfb, 0xb4]);
    pub const TIME: Self = Self::new(0x63ab_8596, 0xc37b, 0x49d1, [0xa1, 0xd1, 0x4a, 0x21, 0x3b, 0x2b, 0x5a, 0x27]);
    pub const IPI: Self = Self::new(0x527f_6f8f, 0x8b16, 0x4a02, [0x95, 0x4e, 0xb5, 0x03, 0x4c, 0x8c, 0x84, 0x5b]);
    pub const RFENCE: Self = Self::new(0xc652_511a, 0x63b6, 0x4aca, [0x8b, 0x66, 0x99, 0x83, 0xcf, 0x6a, 0xd9, 0x69]);
    pub const VENDOR: Self = Self::new(0x44ff_1fcf, 0x1d04, 0x4fba, [0x8e, 0x44, 0x5f, 0x68, 0xfe, 0x07, 0xcd, 0xe4]);
    pub const LIBRARY: Self = Self::new(0x3492_2165, 0xa5ca, 0x470f, [0x83, 0x2f, 0x14, 0xc9, 0x42, 0xfa, 0x83, 0xdf]);
}

impl fmt::Display for FacadeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.data4;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.data1, self.data2, self.data3, d[0], d[1], d[2], d[3], d[4], d[5], d[6], d[7]
        )
    }
}

impl fmt::Debug for FacadeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FacadeId({})", self)
    }
}

/// A published facade
#[derive(Clone, Copy)]
pub enum Facade {
    Base(&'static BaseFacade),
    Legacy(&'static LegacyFacade),
    Timer(&'static TimerFacade),
    Ipi(&'static IpiFacade),
    Rfence(&'static RfenceFacade),
    Hsm(&'static HsmFacade),
    Vendor(&'static VendorFacade),
    Library(&'static LibraryFacade),
}

impl Facade {
    /// GUID this facade is published under
    pub fn id(&self) -> FacadeId {
        match self {
            Self::Base(_) => FacadeId::BASE,
            Self::Legacy(_) => FacadeId::LEGACY,
            Self::Timer(_) => FacadeId::TIME,
            Self::Ipi(_) => FacadeId::IPI,
            Self::Rfence(_) => FacadeId::RFENCE,
            Self::Hsm(_) => FacadeId::HSM,
            Self::Vendor(_) => FacadeId::VENDOR,
            Self::Library(_) => FacadeId::LIBRARY,
        }
    }

    pub fn version(&self) -> usize {
        match self {
            Self::Base(f) => f.version,
            Self::Legacy(f) => f.version,
            Self::Timer(f) => f.version,
            Self::Ipi(f) => f.version,
            Self::Rfence(f) => f.version,
            Self::Hsm(f) => f.version,
            Self::Vendor(f) => f.version,
            Self::Library(f) => f.version,
        }
    }
}

impl fmt::Debug for Facade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Facade")
            .field("id", &self.id())
            .field("version", &self.version())
            .finish()
    }
}

/// 注册表错误
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// A facade with this GUID is already published
    AlreadyPublished(FacadeId),
    /// Every slot is taken
    Full(usize),
    /// Nothing is published under this GUID
    NotFound(FacadeId),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyPublished(id) => write!(f, "facade {} is already published", id),
            Self::Full(slots) => write!(f, "facade registry is full ({} slots)", slots),
            Self::NotFound(id) => write!(f, "facade {} is not published", id),
        }
    }
}

/// 注册表插槽
#[derive(Clone, Copy)]
enum FacadeSlot {
    Empty,
    Occupied(Facade),
}

impl FacadeSlot {
    fn facade(&self) -> Option<Facade> {
        match self {
            Self::Empty => None,
            Self::Occupied(facade) => Some(*facade),
        }
    }
}

/// Everything a boot stage publishes in one go. The library facade only
/// exists when the bridge runs in M-mode.
#[derive(Clone, Copy)]
pub struct FacadeSet {
    pub base: &'static BaseFacade,
    pub legacy: &'static LegacyFacade,
    pub timer: &'static TimerFacade,
    pub ipi: &'static IpiFacade,
    pub rfence: &'static RfenceFacade,
    pub hsm: &'static HsmFacade,
    pub vendor: &'static VendorFacade,
    pub library: Option<&'static LibraryFacade>,
}

impl FacadeSet {
    fn facades(&self) -> impl Iterator<Item = Facade> {
        [
            Some(Facade::Base(self.base)),
            Some(Facade::Legacy(self.legacy)),
            Some(Facade::Timer(self.timer)),
            Some(Facade::Ipi(self.ipi)),
            Some(Facade::Rfence(self.rfence)),
            Some(Facade::Hsm(self.hsm)),
            Some(Facade::Vendor(self.vendor)),
            self.library.map(Facade::Library),
        ]
        .into_iter()
        .flatten()
    }
}

/// 门面注册表，最多容纳 `N` 个facade
pub struct FacadeRegistry<const N: usize = MAX_PUBLISHED_FACADES> {
    slots: Mutex<[FacadeSlot; N]>,
}

impl<const N: usize> FacadeRegistry<N> {
    pub const fn new() -> Self {
        Self { slots: Mutex::new([FacadeSlot::Empty; N]) }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Publish `facade` under its GUID. Each GUID can be published once.
    pub fn publish(&self, facade: Facade) -> Result<(), RegistryError> {
        let id = facade.id();
        let result = {
            let mut slots = self.slots.lock();
            if slots.iter().any(|slot| slot.facade().map(|f| f.id()) == Some(id)) {
                Err(RegistryError::AlreadyPublished(id))
            } else if let Some(slot) = slots.iter_mut().find(|slot| matches!(slot, FacadeSlot::Empty)) {
                *slot = FacadeSlot::Occupied(facade);
                Ok(())
            } else {
                Err(RegistryError::Full(N))
            }
        };
        // The console logger locates facades through this registry, so log
        // only after the lock is released.
        match result {
            Ok(()) => log::debug!("published facade {} version {:#x}", id, facade.version()),
            Err(err) => log::warn!("cannot publish facade: {}", err),
        }
        result
    }

    /// Find the facade published under `id`.
    pub fn locate(&self, id: FacadeId) -> Result<Facade, RegistryError> {
        self.slots
            .lock()
            .iter()
            .filter_map(FacadeSlot::facade)
            .find(|facade| facade.id() == id)
            .ok_or(RegistryError::NotFound(id))
    }

    /// Publish every facade of `set`, stopping at the first failure.
    pub fn install(&self, set: &FacadeSet) -> Result<(), RegistryError> {
        set.facades().try_for_each(|facade| self.publish(facade))
    }

    /// Number of published facades
    pub fn len(&self) -> usize {
        self.slots.lock().iter().filter(|slot| slot.facade().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for FacadeRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! typed_locate {
    ($($name:ident => $variant:ident($ty:ty), $id:ident;)*) => {
        impl<const N: usize> FacadeRegistry<N> {
            $(
                pub fn $name(&self) -> Result<&'static $ty, RegistryError> {
                    match self.locate(FacadeId::$id)? {
                        Facade::$variant(facade) => Ok(facade),
                        _ => Err(RegistryError::NotFound(FacadeId::$id)),
                    }
                }
            )*
        }
    };
}

typed_locate! {
    locate_base => Base(BaseFacade), BASE;
    locate_legacy => Legacy(LegacyFacade), LEGACY;
    locate_timer => Timer(TimerFacade), TIME;
    locate_ipi => Ipi(IpiFacade), IPI;
    locate_rfence => Rfence(RfenceFacade), RFENCE;
    locate_hsm => Hsm(HsmFacade), HSM;
    locate_vendor => Vendor(VendorFacade), VENDOR;
    locate_library => Library(LibraryFacade), LIBRARY;
}

// 全局静态注册表
static REGISTRY: FacadeRegistry = FacadeRegistry::new();

/// The registry shared by every boot stage in this image
pub fn global() -> &'static FacadeRegistry {
    &REGISTRY
}

/// Publish `set` into the global registry.
pub fn install(set: FacadeSet) -> Result<(), RegistryError> {
    REGISTRY.install(&set)?;
    log::info!("sbi bridge facades installed ({} published)", REGISTRY.len());
    Ok(())
}
