//! Base object (ship/weapon/planet type) definitions and oracle interface.

use std::fmt;

use crate::action::ActionTable;
use crate::config::EngineConfig;
use crate::math::Fixed;
use crate::state::{Attributes, WeaponSlot};

/// Identifier of a base object type in the content catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BaseHandle(pub u32);

impl BaseHandle {
    /// Decodes the on-disk convention where any negative value means "none".
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }
}

impl fmt::Display for BaseHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "base {}", self.0)
    }
}

/// Game events that run one of a base type's action tables.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TriggerKind {
    Create,
    Destroy,
    Expire,
    Collide,
    Activate,
    Arrive,
}

/// Per-trigger action tables of a base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TriggerTables {
    pub create: ActionTable,
    pub destroy: ActionTable,
    pub expire: ActionTable,
    pub collide: ActionTable,
    pub activate: ActionTable,
    pub arrive: ActionTable,
}

impl TriggerTables {
    pub fn table(&self, kind: TriggerKind) -> ActionTable {
        match kind {
            TriggerKind::Create => self.create,
            TriggerKind::Destroy => self.destroy,
            TriggerKind::Expire => self.expire,
            TriggerKind::Collide => self.collide,
            TriggerKind::Activate => self.activate,
            TriggerKind::Arrive => self.arrive,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (TriggerKind, ActionTable)> + '_ {
        use strum::IntoEnumIterator;
        TriggerKind::iter().map(|kind| (kind, self.table(kind)))
    }
}

/// Default weapon fitted to a base type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaponMountDef {
    pub base: Option<BaseHandle>,
    pub ammo: i32,
}

impl WeaponMountDef {
    pub const fn new(base: Option<BaseHandle>, ammo: i32) -> Self {
        Self { base, ammo }
    }

    pub const fn slot(&self) -> WeaponSlot {
        WeaponSlot::new(self.base, self.ammo)
    }
}

/// Static definition of an object type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BaseObject {
    pub attributes: Attributes,
    pub max_health: i32,
    pub max_energy: i32,
    pub max_thrust: Fixed,
    pub max_velocity: Fixed,
    pub turn_rate: Fixed,
    pub scale: i32,

    /// Lifetime in ticks for short-lived objects. `None` never expires.
    pub lifetime: Option<i64>,

    /// Speed along the heading when spawned.
    pub initial_velocity: Fixed,
    /// Heading offset applied on spawn, plus a random `[0, range)` spread.
    pub initial_direction: i32,
    pub initial_direction_range: i32,

    pub pulse: WeaponMountDef,
    pub beam: WeaponMountDef,
    pub special: WeaponMountDef,
    /// Ammunition a mount starts with when this type is fitted as a weapon.
    /// Negative is unlimited.
    pub ammo: i32,

    /// Occupation points needed to capture this object. Zero means uncapturable.
    pub occupy_count: i32,

    pub tables: TriggerTables,
}

impl Default for BaseObject {
    fn default() -> Self {
        Self {
            attributes: Attributes::empty(),
            max_health: 0,
            max_energy: 0,
            max_thrust: Fixed::ZERO,
            max_velocity: Fixed::ZERO,
            turn_rate: Fixed::ZERO,
            scale: EngineConfig::SCALE_ONE,
            lifetime: None,
            initial_velocity: Fixed::ZERO,
            initial_direction: 0,
            initial_direction_range: 0,
            pulse: WeaponMountDef::default(),
            beam: WeaponMountDef::default(),
            special: WeaponMountDef::default(),
            ammo: -1,
            occupy_count: 0,
            tables: TriggerTables::default(),
        }
    }
}

/// Oracle providing base object definitions.
pub trait BaseObjectOracle: Send + Sync {
    /// Returns the definition for `handle`, or `None` for an unknown type.
    fn base(&self, handle: BaseHandle) -> Option<BaseObject>;
}
