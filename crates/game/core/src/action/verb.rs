//! The closed set of verbs an action record can carry.
//!
//! Each variant owns exactly the arguments its verb needs, so a record can
//! never pair a verb with the wrong payload. The numeric ids below are the
//! on-disk discriminants: the primary verb lives in the high byte of the
//! 16-bit verb field, the `Alter` sub-opcode in the low byte.

use crate::env::BaseHandle;
use crate::math::{Fixed, FixedRange, Point};
use crate::state::{AdmiralId, Attributes, KeyMask};

/// Primary verb discriminant (high byte of the verb field).
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
    strum::FromRepr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum VerbId {
    NoAction = 0,
    CreateObject = 1,
    PlaySound = 2,
    Alter = 3,
    MakeSparks = 4,
    ReleaseEnergy = 5,
    LandAt = 6,
    EnterWarp = 7,
    DisplayMessage = 8,
    ChangeScore = 9,
    DeclareWinner = 10,
    Die = 11,
    SetDestination = 12,
    ActivateSpecial = 13,
    ActivatePulse = 14,
    ActivateBeam = 15,
    ColorFlash = 16,
    CreateObjectSetDest = 17,
    NilTarget = 18,
    DisableKeys = 19,
    EnableKeys = 20,
    SetZoom = 21,
    ComputerSelect = 22,
    AssumeInitialObject = 23,
}

/// `Alter` sub-opcode (low byte of the verb field).
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
    strum::FromRepr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum AlterId {
    Damage = 0,
    Velocity = 1,
    Thrust = 2,
    MaxThrust = 3,
    MaxVelocity = 4,
    MaxTurnRate = 5,
    Location = 6,
    Scale = 7,
    Weapon1 = 8,
    Weapon2 = 9,
    Special = 10,
    Energy = 11,
    Owner = 12,
    Hidden = 13,
    Cloak = 14,
    Offline = 15,
    Spin = 16,
    BaseType = 17,
    ConditionTrueYet = 18,
    Occupation = 19,
    AbsoluteCash = 20,
    Age = 21,
    Attributes = 22,
    LevelKeyTag = 23,
    OrderKeyTag = 24,
    EngageKeyTag = 25,
    AbsoluteLocation = 26,
}

// ============================================================================
// Argument payloads
// ============================================================================

/// Arguments shared by `CreateObject` and `CreateObjectSetDest`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CreateObject {
    pub base: Option<BaseHandle>,
    pub count_minimum: i32,
    /// Extra objects drawn uniformly from `[0, count_range)`.
    pub count_range: i32,
    /// Add the anchor's velocity to each spawned object's own.
    pub relative_velocity: bool,
    /// Start from the anchor's heading instead of zero.
    pub relative_direction: bool,
    /// Target the anchor's target instead of the anchor itself.
    pub inherit: bool,
    /// Spawn up to this far from the anchor in a random direction.
    pub distance: i32,
}

impl Default for CreateObject {
    fn default() -> Self {
        Self {
            base: None,
            count_minimum: 1,
            count_range: 0,
            relative_velocity: false,
            relative_direction: false,
            inherit: false,
            distance: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaySound {
    /// 1-5; takes over a channel playing a lower-priority sound.
    pub priority: u8,
    /// Ticks before a lower-priority sound may take the channel.
    pub persistence: i32,
    /// Same volume regardless of distance from the player.
    pub absolute: bool,
    pub volume: i32,
    pub id_first: i32,
    pub id_range: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MakeSparks {
    pub count: i32,
    pub decay: i32,
    /// Sparks fly at a random speed up to this.
    pub velocity: Fixed,
    pub hue: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayMessage {
    pub id: i16,
    pub first_page: i16,
    pub page_count: i16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChangeScore {
    /// `None` means the owner of the focus.
    pub player: Option<AdmiralId>,
    /// 0-2; each admiral keeps three scores.
    pub which: u8,
    pub value: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeclareWinner {
    /// `None` means the owner of the focus.
    pub player: Option<AdmiralId>,
    pub next_chapter: Option<i32>,
    pub text_id: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorFlash {
    pub length: i32,
    pub hue: u8,
    pub shade: u8,
}

/// How `Die` removes its target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum DieKind {
    /// Remove the focus without running any table.
    #[default]
    None = 0,
    /// Remove the subject without running any table.
    Expire = 1,
    /// Remove the subject and run its destroy table.
    Destroy = 2,
}

/// How `AlterVelocity` treats the focus's velocity.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum VelocityKind {
    /// Zero the velocity.
    #[default]
    Stop = 0,
    /// Impart the subject's velocity, scaled, as in a collision.
    Collide = 1,
    /// Scale the current velocity down.
    Decelerate = 2,
    /// Set speed along the subject's heading.
    Set = 3,
    /// Add speed along the subject's heading.
    Boost = 4,
    /// Set speed along the focus's own heading.
    Cruise = 5,
}

/// Half-open tick interval `[minimum, minimum + range)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickRange {
    pub minimum: i32,
    pub range: i32,
}

// ============================================================================
// Verb sum types
// ============================================================================

/// Sub-operations of the `Alter` verb.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlterVerb {
    Damage { value: i32 },
    Velocity { kind: VelocityKind, value: Fixed },
    /// `relative` adds the rolled value to the current thrust.
    Thrust { relative: bool, value: FixedRange },
    MaxThrust { value: Fixed },
    /// Negative restores the base type's default.
    MaxVelocity { value: Fixed },
    MaxTurnRate { value: Fixed },
    /// Random displacement of up to `by` in each axis, around the subject when
    /// `relative`, otherwise around the focus itself.
    Location { relative: bool, by: i32 },
    Scale { value: i32 },
    Weapon1 { base: Option<BaseHandle> },
    Weapon2 { base: Option<BaseHandle> },
    Special { base: Option<BaseHandle> },
    Energy { value: i32 },
    Owner { relative: bool, player: Option<AdmiralId> },
    Hidden { first: i32, count_minus_1: i32 },
    Cloak,
    Offline { value: FixedRange },
    Spin { value: FixedRange },
    BaseType { keep_ammo: bool, base: Option<BaseHandle> },
    ConditionTrueYet { true_yet: bool, first: i32, count_minus_1: i32 },
    Occupation { value: i32 },
    /// Pays the focus's owner when `relative`, otherwise `player`.
    AbsoluteCash { relative: bool, value: Fixed, player: Option<AdmiralId> },
    /// `relative` adds to the remaining age instead of replacing it.
    Age { relative: bool, value: TickRange },
    Attributes { clear: bool, mask: Attributes },
    LevelKeyTag { tag: i32 },
    OrderKeyTag { tag: i32 },
    EngageKeyTag { tag: i32 },
    /// `relative` offsets from the subject's location.
    AbsoluteLocation { relative: bool, at: Point },
}

impl AlterVerb {
    pub const fn id(&self) -> AlterId {
        match self {
            Self::Damage { .. } => AlterId::Damage,
            Self::Velocity { .. } => AlterId::Velocity,
            Self::Thrust { .. } => AlterId::Thrust,
            Self::MaxThrust { .. } => AlterId::MaxThrust,
            Self::MaxVelocity { .. } => AlterId::MaxVelocity,
            Self::MaxTurnRate { .. } => AlterId::MaxTurnRate,
            Self::Location { .. } => AlterId::Location,
            Self::Scale { .. } => AlterId::Scale,
            Self::Weapon1 { .. } => AlterId::Weapon1,
            Self::Weapon2 { .. } => AlterId::Weapon2,
            Self::Special { .. } => AlterId::Special,
            Self::Energy { .. } => AlterId::Energy,
            Self::Owner { .. } => AlterId::Owner,
            Self::Hidden { .. } => AlterId::Hidden,
            Self::Cloak => AlterId::Cloak,
            Self::Offline { .. } => AlterId::Offline,
            Self::Spin { .. } => AlterId::Spin,
            Self::BaseType { .. } => AlterId::BaseType,
            Self::ConditionTrueYet { .. } => AlterId::ConditionTrueYet,
            Self::Occupation { .. } => AlterId::Occupation,
            Self::AbsoluteCash { .. } => AlterId::AbsoluteCash,
            Self::Age { .. } => AlterId::Age,
            Self::Attributes { .. } => AlterId::Attributes,
            Self::LevelKeyTag { .. } => AlterId::LevelKeyTag,
            Self::OrderKeyTag { .. } => AlterId::OrderKeyTag,
            Self::EngageKeyTag { .. } => AlterId::EngageKeyTag,
            Self::AbsoluteLocation { .. } => AlterId::AbsoluteLocation,
        }
    }
}

/// A verb together with its arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    NoAction,
    CreateObject(CreateObject),
    PlaySound(PlaySound),
    Alter(AlterVerb),
    MakeSparks(MakeSparks),
    /// Releases `percent` of the focus's energy into space.
    ReleaseEnergy { percent: Fixed },
    LandAt { speed: i32 },
    EnterWarp,
    DisplayMessage(DisplayMessage),
    ChangeScore(ChangeScore),
    DeclareWinner(DeclareWinner),
    Die { kind: DieKind },
    SetDestination,
    ActivateSpecial,
    ActivatePulse,
    ActivateBeam,
    ColorFlash(ColorFlash),
    /// As `CreateObject`, and the spawned objects share the anchor's destination.
    CreateObjectSetDest(CreateObject),
    NilTarget,
    DisableKeys { mask: KeyMask },
    EnableKeys { mask: KeyMask },
    SetZoom { value: i32 },
    ComputerSelect { screen: i32, line: i32 },
    /// The focus takes over initial `which` plus admiral 0's first score.
    AssumeInitialObject { which: i32 },
}

impl Verb {
    pub const fn id(&self) -> VerbId {
        match self {
            Self::NoAction => VerbId::NoAction,
            Self::CreateObject(_) => VerbId::CreateObject,
            Self::PlaySound(_) => VerbId::PlaySound,
            Self::Alter(_) => VerbId::Alter,
            Self::MakeSparks(_) => VerbId::MakeSparks,
            Self::ReleaseEnergy { .. } => VerbId::ReleaseEnergy,
            Self::LandAt { .. } => VerbId::LandAt,
            Self::EnterWarp => VerbId::EnterWarp,
            Self::DisplayMessage(_) => VerbId::DisplayMessage,
            Self::ChangeScore(_) => VerbId::ChangeScore,
            Self::DeclareWinner(_) => VerbId::DeclareWinner,
            Self::Die { .. } => VerbId::Die,
            Self::SetDestination => VerbId::SetDestination,
            Self::ActivateSpecial => VerbId::ActivateSpecial,
            Self::ActivatePulse => VerbId::ActivatePulse,
            Self::ActivateBeam => VerbId::ActivateBeam,
            Self::ColorFlash(_) => VerbId::ColorFlash,
            Self::CreateObjectSetDest(_) => VerbId::CreateObjectSetDest,
            Self::NilTarget => VerbId::NilTarget,
            Self::DisableKeys { .. } => VerbId::DisableKeys,
            Self::EnableKeys { .. } => VerbId::EnableKeys,
            Self::SetZoom { .. } => VerbId::SetZoom,
            Self::ComputerSelect { .. } => VerbId::ComputerSelect,
            Self::AssumeInitialObject { .. } => VerbId::AssumeInitialObject,
        }
    }

    /// The 16-bit on-disk verb code.
    pub const fn code(&self) -> u16 {
        let low = match self {
            Self::Alter(alter) => alter.id() as u8,
            _ => 0,
        };
        ((self.id() as u16) << 8) | low as u16
    }

    pub const fn created_base(&self) -> Option<BaseHandle> {
        match self {
            Self::CreateObject(create) | Self::CreateObjectSetDest(create) => create.base,
            _ => None,
        }
    }

    pub const fn sound_range(&self) -> Option<(i32, i32)> {
        match self {
            Self::PlaySound(sound) => {
                Some((sound.id_first, sound.id_first.wrapping_add(sound.id_range)))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes_pack_primary_and_sub_opcode() {
        assert_eq!(Verb::NoAction.code(), 0x0000);
        assert_eq!(Verb::EnterWarp.code(), 0x0700);
        assert_eq!(Verb::AssumeInitialObject { which: 0 }.code(), 0x1700);
        assert_eq!(Verb::Alter(AlterVerb::Cloak).code(), 0x030E);
        assert_eq!(
            Verb::Alter(AlterVerb::AbsoluteLocation {
                relative: false,
                at: Point::ORIGIN,
            })
            .code(),
            0x031A
        );
    }

    #[test]
    fn discriminants_are_dense() {
        for (expected, id) in VerbId::iter().enumerate() {
            assert_eq!(id as usize, expected);
            assert_eq!(VerbId::from_repr(expected as u8), Some(id));
        }
        assert_eq!(VerbId::iter().count(), 24);
        assert_eq!(AlterId::iter().count(), 27);
        assert_eq!(AlterId::from_repr(27), None);
    }

    #[test]
    fn names_are_snake_case() {
        assert_eq!(VerbId::CreateObjectSetDest.as_ref(), "create_object_set_dest");
        assert_eq!("alter".parse::<VerbId>(), Ok(VerbId::Alter));
        assert_eq!(AlterId::AbsoluteCash.to_string(), "absolute_cash");
    }
}
