use bitflags::bitflags;

use super::{AdmiralId, InitialId, ObjectHandle};
use crate::config::EngineConfig;
use crate::env::{BaseHandle, BaseObject};
use crate::math::{Fixed, FixedPoint, Point};

bitflags! {
    /// Capability flags carried by every space object.
    ///
    /// Action records filter on these with inclusive/exclusive masks. Content may
    /// set bits that have no named constant; they are retained as-is.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Attributes: u32 {
        const CAN_TURN                 = 1 << 0;
        const CAN_BE_ENGAGED           = 1 << 1;
        const HAS_DIRECTION_GOAL       = 1 << 2;
        const IS_REMOTE                = 1 << 3;
        const IS_HUMAN_CONTROLLED      = 1 << 4;
        const IS_BEAM                  = 1 << 5;
        const DOES_BOUNCE              = 1 << 6;
        const IS_SELF_ANIMATED         = 1 << 7;
        const SHAPE_FROM_DIRECTION     = 1 << 8;
        const IS_PLAYER_SHIP           = 1 << 9;
        const CAN_BE_DESTINATION       = 1 << 10;
        const CAN_ENGAGE               = 1 << 11;
        const CAN_EVADE                = 1 << 12;
        const CAN_ACCEPT_MESSAGES      = 1 << 13;
        const CAN_ACCEPT_BUILD         = 1 << 14;
        const CAN_ACCEPT_DESTINATION   = 1 << 15;
        const AUTO_TARGET              = 1 << 16;
        const ANIMATION_CYCLE          = 1 << 17;
        const CAN_COLLIDE              = 1 << 18;
        const CAN_BE_HIT               = 1 << 19;
        const IS_DESTINATION           = 1 << 20;
        const HIDE_EFFECT              = 1 << 21;
        const RELEASE_ENERGY_ON_DEATH  = 1 << 22;
        const HATED                    = 1 << 23;
        const OCCUPIES_SPACE           = 1 << 24;
        const STATIC_DESTINATION       = 1 << 25;
        const CAN_BE_EVADED            = 1 << 26;
        const NEUTRAL_DEATH            = 1 << 27;
        const IS_GUIDED                = 1 << 28;
        const APPEAR_ON_RADAR          = 1 << 29;
        const ON_AUTO_PILOT            = 1 << 31;
    }
}

/// A weapon mount: which base type it fires and how much ammunition is left.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSlot {
    pub base: Option<BaseHandle>,
    pub ammo: i32,
}

impl WeaponSlot {
    pub const fn new(base: Option<BaseHandle>, ammo: i32) -> Self {
        Self { base, ammo }
    }

    pub const fn is_armed(&self) -> bool {
        self.base.is_some()
    }
}

/// Which of an object's three weapon mounts a verb refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaponMount {
    Pulse,
    Beam,
    Special,
}

/// Movement regime overriding normal flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Presence {
    #[default]
    Normal,
    /// Approaching a planet; removed on arrival.
    Landing { speed: i32 },
    /// Spooling up the warp drive.
    Warping,
}

/// Capture progress accumulated on a neutral-death object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occupation {
    pub by: Option<AdmiralId>,
    pub points: i32,
}

/// Live, mutable state of a single object in the simulation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceObject {
    pub base: BaseHandle,
    pub owner: Option<AdmiralId>,
    pub attributes: Attributes,

    // Kinetics
    pub location: Point,
    pub velocity: FixedPoint,
    /// Heading in whole degrees, `0..360`.
    pub direction: i32,
    pub thrust: Fixed,
    pub max_thrust: Fixed,
    pub max_velocity: Fixed,
    pub turn_rate: Fixed,
    pub spin: Fixed,
    /// Display scale where [`EngineConfig::SCALE_ONE`] is natural size.
    pub scale: i32,

    /// Remaining lifetime in ticks. `None` never expires.
    pub age: Option<i64>,

    pub energy: i32,
    pub max_energy: i32,
    pub health: i32,
    pub max_health: i32,

    pub cloaked: bool,
    /// Time remaining before the object responds to orders again.
    pub offline: Fixed,

    pub pulse: WeaponSlot,
    pub beam: WeaponSlot,
    pub special: WeaponSlot,

    pub destination: Option<ObjectHandle>,
    pub target: Option<ObjectHandle>,
    pub presence: Presence,

    pub level_key_tag: i32,
    pub order_key_tag: i32,
    pub engage_key_tag: i32,

    pub occupation: Occupation,

    /// Level initial this object was spawned from, if any.
    pub initial: Option<InitialId>,
}

impl SpaceObject {
    /// Instantiates a fresh object of `base` type with the base's defaults.
    pub fn from_base(
        handle: BaseHandle,
        base: &BaseObject,
        owner: Option<AdmiralId>,
        location: Point,
    ) -> Self {
        Self {
            base: handle,
            owner,
            attributes: base.attributes,
            location,
            velocity: FixedPoint::ZERO,
            direction: 0,
            thrust: Fixed::ZERO,
            max_thrust: base.max_thrust,
            max_velocity: base.max_velocity,
            turn_rate: base.turn_rate,
            spin: Fixed::ZERO,
            scale: base.scale,
            age: base.lifetime,
            energy: base.max_energy,
            max_energy: base.max_energy,
            health: base.max_health,
            max_health: base.max_health,
            cloaked: false,
            offline: Fixed::ZERO,
            pulse: base.pulse.slot(),
            beam: base.beam.slot(),
            special: base.special.slot(),
            destination: None,
            target: None,
            presence: Presence::Normal,
            level_key_tag: 0,
            order_key_tag: 0,
            engage_key_tag: 0,
            occupation: Occupation::default(),
            initial: None,
        }
    }

    pub fn weapon(&self, mount: WeaponMount) -> &WeaponSlot {
        match mount {
            WeaponMount::Pulse => &self.pulse,
            WeaponMount::Beam => &self.beam,
            WeaponMount::Special => &self.special,
        }
    }

    pub fn weapon_mut(&mut self, mount: WeaponMount) -> &mut WeaponSlot {
        match mount {
            WeaponMount::Pulse => &mut self.pulse,
            WeaponMount::Beam => &mut self.beam,
            WeaponMount::Special => &mut self.special,
        }
    }

    /// Adds energy, clamped to `[0, max_energy]`.
    pub fn add_energy(&mut self, amount: i32) {
        self.energy = self.energy.saturating_add(amount).clamp(0, self.max_energy.max(0));
    }

    /// Restores natural scale.
    pub fn reset_scale(&mut self) {
        self.scale = EngineConfig::SCALE_ONE;
    }

    /// Turns this object into another base type in place.
    ///
    /// Kinetic state, owner and bookkeeping survive. With `keep_ammo`, a mount
    /// that still fires the same weapon keeps its remaining ammunition.
    pub fn change_base(&mut self, handle: BaseHandle, base: &BaseObject, keep_ammo: bool) {
        self.base = handle;
        self.attributes = base.attributes;
        self.max_thrust = base.max_thrust;
        self.max_velocity = base.max_velocity;
        self.turn_rate = base.turn_rate;
        self.max_energy = base.max_energy;
        self.max_health = base.max_health;
        self.energy = self.energy.min(self.max_energy);
        self.health = self.health.min(self.max_health);

        for (mount, def) in [
            (WeaponMount::Pulse, base.pulse),
            (WeaponMount::Beam, base.beam),
            (WeaponMount::Special, base.special),
        ] {
            let slot = self.weapon_mut(mount);
            let ammo = if keep_ammo && slot.base == def.base {
                slot.ammo
            } else {
                def.ammo
            };
            *slot = WeaponSlot::new(def.base, ammo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::WeaponMountDef;

    fn base() -> BaseObject {
        BaseObject {
            attributes: Attributes::CAN_TURN | Attributes::CAN_BE_HIT,
            max_health: 300,
            max_energy: 500,
            pulse: WeaponMountDef::new(Some(BaseHandle(4)), 12),
            ..BaseObject::default()
        }
    }

    #[test]
    fn from_base_copies_defaults() {
        let object =
            SpaceObject::from_base(BaseHandle(1), &base(), Some(AdmiralId(0)), Point::new(5, 6));
        assert_eq!(object.health, 300);
        assert_eq!(object.energy, 500);
        assert_eq!(object.pulse, WeaponSlot::new(Some(BaseHandle(4)), 12));
        assert!(!object.beam.is_armed());
        assert_eq!(object.location, Point::new(5, 6));
    }

    #[test]
    fn add_energy_clamps_to_capacity() {
        let mut object = SpaceObject::from_base(BaseHandle(1), &base(), None, Point::ORIGIN);
        object.add_energy(1_000);
        assert_eq!(object.energy, 500);
        object.add_energy(-2_000);
        assert_eq!(object.energy, 0);
    }

    #[test]
    fn change_base_keeps_matching_ammo_only() {
        let mut object = SpaceObject::from_base(BaseHandle(1), &base(), None, Point::ORIGIN);
        object.pulse.ammo = 3;
        object.health = 250;

        let next = BaseObject {
            max_health: 100,
            pulse: WeaponMountDef::new(Some(BaseHandle(4)), 12),
            beam: WeaponMountDef::new(Some(BaseHandle(8)), 5),
            ..BaseObject::default()
        };
        object.change_base(BaseHandle(2), &next, true);
        assert_eq!(object.base, BaseHandle(2));
        assert_eq!(object.pulse.ammo, 3);
        assert_eq!(object.beam, WeaponSlot::new(Some(BaseHandle(8)), 5));
        assert_eq!(object.health, 100);

        object.change_base(BaseHandle(2), &next, false);
        assert_eq!(object.pulse.ammo, 12);
    }

    #[test]
    fn unnamed_attribute_bits_are_retained() {
        let attrs = Attributes::from_bits_retain(1 << 30 | 1);
        assert!(attrs.contains(Attributes::CAN_TURN));
        assert_eq!(attrs.bits(), (1 << 30) | 1);
    }
}
