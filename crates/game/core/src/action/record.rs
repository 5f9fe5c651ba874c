//! Action records and the tables that sequence them.

use std::ops::Range;

use super::Verb;
use crate::env::BaseHandle;
use crate::state::{Attributes, InitialId};

/// Position of a record in the global action pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RecordIndex(pub u32);

/// Half-open range `[begin, end)` into the action pool. Order is significant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionTable {
    pub begin: u32,
    pub end: u32,
}

impl ActionTable {
    pub const EMPTY: Self = Self { begin: 0, end: 0 };

    /// Creates a table; an inverted range collapses to empty at `begin`.
    pub const fn new(begin: u32, end: u32) -> Self {
        let end = if end < begin { begin } else { end };
        Self { begin, end }
    }

    pub const fn len(&self) -> usize {
        (self.end - self.begin) as usize
    }

    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn indices(&self) -> impl Iterator<Item = RecordIndex> {
        (self.begin..self.end).map(RecordIndex)
    }

    pub fn as_range(&self) -> Range<usize> {
        self.begin as usize..self.end as usize
    }
}

/// Owner relation between the subject and the filter target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum OwnerRelation {
    #[default]
    Any,
    Same,
    Different,
}

impl OwnerRelation {
    pub const fn from_raw(raw: i16) -> Option<Self> {
        match raw {
            0 => Some(Self::Any),
            1 => Some(Self::Same),
            -1 => Some(Self::Different),
            _ => None,
        }
    }

    pub const fn to_raw(self) -> i16 {
        match self {
            Self::Any => 0,
            Self::Same => 1,
            Self::Different => -1,
        }
    }
}

/// One scripted instruction: a verb plus the filters and timing that gate it.
///
/// Records are decoded once when content loads and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionRecord {
    pub verb: Verb,
    /// Forces the direct object (and filter target) to be the subject.
    pub reflexive: bool,
    /// Filter target must carry all of these.
    pub inclusive: Attributes,
    /// Filter target must carry none of these.
    pub exclusive: Attributes,
    pub owner: OwnerRelation,
    pub level_key_tag: u8,
    /// Ticks to wait before dispatch. Zero dispatches immediately.
    pub delay: u32,
    pub initial_subject: Option<InitialId>,
    pub initial_direct: Option<InitialId>,
    /// Preserved verbatim for re-encoding.
    pub reserved: u16,
}

impl ActionRecord {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            reflexive: false,
            inclusive: Attributes::empty(),
            exclusive: Attributes::empty(),
            owner: OwnerRelation::Any,
            level_key_tag: 0,
            delay: 0,
            initial_subject: None,
            initial_direct: None,
            reserved: 0,
        }
    }

    pub fn reflexive(mut self) -> Self {
        self.reflexive = true;
        self
    }

    pub fn with_filters(mut self, inclusive: Attributes, exclusive: Attributes) -> Self {
        self.inclusive = inclusive;
        self.exclusive = exclusive;
        self
    }

    pub fn with_owner(mut self, owner: OwnerRelation) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_delay(mut self, delay: u32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_initial_subject(mut self, initial: InitialId) -> Self {
        self.initial_subject = Some(initial);
        self
    }

    pub fn with_initial_direct(mut self, initial: InitialId) -> Self {
        self.initial_direct = Some(initial);
        self
    }

    /// True if the record carries no attribute or owner precondition.
    pub fn is_unfiltered(&self) -> bool {
        self.inclusive.is_empty() && self.exclusive.is_empty() && self.owner == OwnerRelation::Any
    }

    /// Base type this record would instantiate, if it creates objects.
    pub fn created_base(&self) -> Option<BaseHandle> {
        self.verb.created_base()
    }

    /// Half-open sound id range this record picks from, if it plays a sound.
    pub fn sound_range(&self) -> Option<(i32, i32)> {
        self.verb.sound_range()
    }
}
