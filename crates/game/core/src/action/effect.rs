//! Observable side effects of dispatched verbs.
//!
//! The engine mutates [`GameState`](crate::state::GameState) directly; anything a
//! host must react to (sound, particles, interface, bookkeeping it may want to
//! display) is also reported as an [`Effect`] in dispatch order.

use crate::env::BaseHandle;
use crate::math::{Fixed, FixedPoint, Point};
use crate::state::{AdmiralId, KeyMask, MiniSelection, ObjectHandle, Outcome, WeaponMount};

/// One host-visible consequence of a verb.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Effect {
    SoundPlayed {
        id: i32,
        priority: u8,
        persistence: i32,
        absolute: bool,
        volume: i32,
        /// Object the sound is positioned at; `None` plays it unpositioned.
        at: Option<ObjectHandle>,
    },
    Spark {
        at: Point,
        velocity: FixedPoint,
        decay: i32,
        hue: u8,
    },
    EnergyReleased {
        from: ObjectHandle,
        at: Point,
        amount: i32,
    },
    ColorFlash {
        length: i32,
        hue: u8,
        shade: u8,
    },
    MessageShown {
        id: i16,
        first_page: i16,
        page_count: i16,
    },
    WeaponFired {
        object: ObjectHandle,
        mount: WeaponMount,
        weapon: BaseHandle,
        target: Option<ObjectHandle>,
    },
    WinnerDeclared(Outcome),
    ScoreChanged {
        admiral: AdmiralId,
        which: u8,
        score: i32,
    },
    CashChanged {
        admiral: AdmiralId,
        cash: Fixed,
    },
    ObjectCreated {
        object: ObjectHandle,
        base: BaseHandle,
    },
    ObjectRemoved {
        object: ObjectHandle,
        destroyed: bool,
    },
    OwnerChanged {
        object: ObjectHandle,
        owner: Option<AdmiralId>,
    },
    ObjectCaptured {
        object: ObjectHandle,
        by: AdmiralId,
    },
    LandingStarted {
        object: ObjectHandle,
        speed: i32,
    },
    WarpEntered {
        object: ObjectHandle,
    },
    KeysChanged {
        disabled: KeyMask,
    },
    ZoomChanged {
        zoom: i32,
    },
    MinicomputerSelected(MiniSelection),
}

/// How a queued removal disposes of its object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Removal {
    /// Drop the object without running any table.
    Quiet,
    /// Run the object's destroy table, then drop it.
    Destroy,
}

/// Work a verb hands back to the engine instead of recursing into it.
///
/// Removals and create tables can themselves run action tables; deferring
/// them keeps each dispatch flat and lets the engine bound the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FollowUp {
    Remove {
        object: ObjectHandle,
        removal: Removal,
    },
    /// A new object exists and its create table should run.
    Created { object: ObjectHandle },
}
