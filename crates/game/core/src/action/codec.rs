//! Binary encoding of action records.
//!
//! Every record occupies [`EngineConfig::RECORD_SIZE`] bytes, big-endian:
//!
//! | offset | size | field                                       |
//! |-------:|-----:|---------------------------------------------|
//! | 0      | 2    | verb code (primary << 8 \| alter sub-op)    |
//! | 2      | 1    | reflexive flag                              |
//! | 3      | 1    | level key tag                               |
//! | 4      | 4    | inclusive attribute filter                  |
//! | 8      | 4    | exclusive attribute filter                  |
//! | 12     | 2    | owner relation (0, 1, -1)                   |
//! | 14     | 2    | initial subject override (-1 = none)        |
//! | 16     | 2    | initial direct override (-1 = none)         |
//! | 18     | 2    | reserved                                    |
//! | 20     | 4    | delay in ticks                              |
//! | 24     | 24   | verb arguments                              |
//!
//! Argument bytes a verb does not read must be zero, so a decoded record
//! always re-encodes to the bytes it came from.
//!
//! Decoding never panics; every malformed input maps to a [`FormatError`].

use super::{
    ActionRecord, AlterId, AlterVerb, ChangeScore, ColorFlash, CreateObject, DeclareWinner,
    DieKind, DisplayMessage, MakeSparks, OwnerRelation, PlaySound, RecordIndex, TickRange, Verb,
    VelocityKind, VerbId,
};
use crate::config::EngineConfig;
use crate::env::BaseHandle;
use crate::error::{ErrorSeverity, GameError};
use crate::math::{Fixed, FixedRange, Point};
use crate::state::{AdmiralId, Attributes, InitialId, KeyMask};

const HEADER_SIZE: usize = EngineConfig::ARGUMENT_OFFSET;

/// Errors raised while decoding action content.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Fewer bytes remain than a record header needs.
    #[error("record {index} truncated: {available} bytes available")]
    Truncated { index: u32, available: usize },

    /// The header fits but the argument region runs past the buffer.
    #[error("record {index} argument region out of bounds: {available} bytes available")]
    ArgumentOutOfBounds { index: u32, available: usize },

    /// The verb code names no known verb.
    #[error("record {index} has unknown verb {verb:#06x}")]
    UnknownVerb { index: u32, verb: u16 },

    /// An enumerated or flag field holds a value outside its domain.
    #[error("record {index} field `{field}` has invalid value {value}")]
    InvalidField {
        index: u32,
        field: &'static str,
        value: i64,
    },

    /// The requested index range is inverted.
    #[error("invalid record range {begin}..{end}")]
    InvalidRange { begin: u32, end: u32 },
}

impl FormatError {
    /// Index of the offending record, when the error concerns one.
    pub fn index(&self) -> Option<u32> {
        use FormatError::*;
        match self {
            Truncated { index, .. }
            | ArgumentOutOfBounds { index, .. }
            | UnknownVerb { index, .. }
            | InvalidField { index, .. } => Some(*index),
            InvalidRange { .. } => None,
        }
    }
}

impl GameError for FormatError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use FormatError::*;
        match self {
            Truncated { .. } => "FORMAT_TRUNCATED",
            ArgumentOutOfBounds { .. } => "FORMAT_ARGUMENT_OUT_OF_BOUNDS",
            UnknownVerb { .. } => "FORMAT_UNKNOWN_VERB",
            InvalidField { .. } => "FORMAT_INVALID_FIELD",
            InvalidRange { .. } => "FORMAT_INVALID_RANGE",
        }
    }

    fn record(&self) -> Option<RecordIndex> {
        self.index().map(RecordIndex)
    }
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes records `[begin, end)` of a concatenated record buffer.
///
/// # Errors
///
/// Returns the first [`FormatError`] encountered; nothing is returned for a
/// partially valid range.
pub fn decode_records(
    bytes: &[u8],
    begin: u32,
    end: u32,
) -> Result<Vec<ActionRecord>, FormatError> {
    if end < begin {
        return Err(FormatError::InvalidRange { begin, end });
    }
    (begin..end)
        .map(|index| {
            let offset = index as usize * EngineConfig::RECORD_SIZE;
            decode_record(bytes.get(offset..).unwrap_or(&[]), index)
        })
        .collect()
}

/// Decodes every whole record in `bytes`.
///
/// # Errors
///
/// Trailing bytes that do not form a whole record are reported as truncation
/// of the record they would start.
pub fn decode_pool(bytes: &[u8]) -> Result<Vec<ActionRecord>, FormatError> {
    let count = bytes.len().div_ceil(EngineConfig::RECORD_SIZE);
    decode_records(bytes, 0, count as u32)
}

/// Decodes a single record from the start of `bytes`. `index` is used only
/// for error reporting.
///
/// # Errors
///
/// See [`FormatError`].
pub fn decode_record(bytes: &[u8], index: u32) -> Result<ActionRecord, FormatError> {
    if bytes.len() < HEADER_SIZE {
        return Err(FormatError::Truncated {
            index,
            available: bytes.len(),
        });
    }
    if bytes.len() < EngineConfig::RECORD_SIZE {
        return Err(FormatError::ArgumentOutOfBounds {
            index,
            available: bytes.len(),
        });
    }

    let header = Reader::new(&bytes[..HEADER_SIZE], index);
    let args = Reader::new(&bytes[HEADER_SIZE..EngineConfig::RECORD_SIZE], index);

    let code = header.u16(0);
    let verb = decode_verb(code, &args)?;
    check_unused_arguments(&verb, &args)?;

    let reflexive = header.flag(2, "reflexive")?;
    let owner_raw = header.i16(12);
    let owner = OwnerRelation::from_raw(owner_raw).ok_or(FormatError::InvalidField {
        index,
        field: "owner",
        value: owner_raw.into(),
    })?;

    Ok(ActionRecord {
        verb,
        reflexive,
        level_key_tag: header.u8(3),
        inclusive: Attributes::from_bits_retain(header.u32(4)),
        exclusive: Attributes::from_bits_retain(header.u32(8)),
        owner,
        initial_subject: header.initial(14, "initial_subject")?,
        initial_direct: header.initial(16, "initial_direct")?,
        reserved: header.u16(18),
        delay: header.u32(20),
    })
}

fn decode_verb(code: u16, args: &Reader<'_>) -> Result<Verb, FormatError> {
    let unknown = || FormatError::UnknownVerb {
        index: args.index,
        verb: code,
    };
    let [primary, sub] = code.to_be_bytes();
    let id = VerbId::from_repr(primary).ok_or_else(unknown)?;
    if id != VerbId::Alter && sub != 0 {
        return Err(unknown());
    }

    let verb = match id {
        VerbId::NoAction => Verb::NoAction,
        VerbId::CreateObject => Verb::CreateObject(create_object(args)?),
        VerbId::PlaySound => Verb::PlaySound(PlaySound {
            priority: args.u8(0),
            persistence: args.i32(4),
            absolute: args.flag(8, "absolute")?,
            volume: args.i32(12),
            id_first: args.i32(16),
            id_range: args.i32(20),
        }),
        VerbId::Alter => {
            let alter = AlterId::from_repr(sub).ok_or_else(unknown)?;
            Verb::Alter(decode_alter(alter, args)?)
        }
        VerbId::MakeSparks => Verb::MakeSparks(MakeSparks {
            count: args.i32(0),
            decay: args.i32(4),
            velocity: args.fixed(8),
            hue: args.u8(12),
        }),
        VerbId::ReleaseEnergy => Verb::ReleaseEnergy {
            percent: args.fixed(0),
        },
        VerbId::LandAt => Verb::LandAt { speed: args.i32(0) },
        VerbId::EnterWarp => Verb::EnterWarp,
        VerbId::DisplayMessage => Verb::DisplayMessage(DisplayMessage {
            id: args.i16(0),
            first_page: args.i16(2),
            page_count: args.i16(4),
        }),
        VerbId::ChangeScore => {
            let which = args.i32(4);
            if !(0..EngineConfig::SCORE_COUNT as i32).contains(&which) {
                return Err(args.invalid("which", which));
            }
            Verb::ChangeScore(ChangeScore {
                player: args.admiral(0, "player")?,
                which: which as u8,
                value: args.i32(8),
            })
        }
        VerbId::DeclareWinner => {
            let next = args.i32(4);
            Verb::DeclareWinner(DeclareWinner {
                player: args.admiral(0, "player")?,
                next_chapter: (next != -1).then_some(next),
                text_id: args.i32(8),
            })
        }
        VerbId::Die => {
            let raw = args.u8(0);
            let kind = DieKind::from_repr(raw).ok_or_else(|| args.invalid("die_kind", raw))?;
            Verb::Die { kind }
        }
        VerbId::SetDestination => Verb::SetDestination,
        VerbId::ActivateSpecial => Verb::ActivateSpecial,
        VerbId::ActivatePulse => Verb::ActivatePulse,
        VerbId::ActivateBeam => Verb::ActivateBeam,
        VerbId::ColorFlash => Verb::ColorFlash(ColorFlash {
            length: args.i32(0),
            hue: args.u8(4),
            shade: args.u8(5),
        }),
        VerbId::CreateObjectSetDest => Verb::CreateObjectSetDest(create_object(args)?),
        VerbId::NilTarget => Verb::NilTarget,
        VerbId::DisableKeys => Verb::DisableKeys {
            mask: KeyMask::from_bits_retain(args.u32(0)),
        },
        VerbId::EnableKeys => Verb::EnableKeys {
            mask: KeyMask::from_bits_retain(args.u32(0)),
        },
        VerbId::SetZoom => Verb::SetZoom { value: args.i32(0) },
        VerbId::ComputerSelect => Verb::ComputerSelect {
            screen: args.i32(0),
            line: args.i32(4),
        },
        VerbId::AssumeInitialObject => Verb::AssumeInitialObject { which: args.i32(0) },
    };
    Ok(verb)
}

/// Rejects stray bytes in the parts of the argument region `verb` ignores.
fn check_unused_arguments(verb: &Verb, args: &Reader<'_>) -> Result<(), FormatError> {
    let mut canonical = Writer::default();
    encode_arguments(verb, &mut canonical);
    let stray = canonical
        .bytes
        .iter()
        .zip(args.bytes)
        .position(|(expected, actual)| expected != actual);
    match stray {
        Some(at) => Err(args.invalid("unused_argument", args.u8(at))),
        None => Ok(()),
    }
}

fn create_object(args: &Reader<'_>) -> Result<CreateObject, FormatError> {
    Ok(CreateObject {
        base: args.base(0, "base")?,
        count_minimum: args.i32(4),
        count_range: args.i32(8),
        relative_velocity: args.flag(12, "relative_velocity")?,
        relative_direction: args.flag(13, "relative_direction")?,
        inherit: args.flag(14, "inherit")?,
        distance: args.i32(16),
    })
}

fn decode_alter(id: AlterId, args: &Reader<'_>) -> Result<AlterVerb, FormatError> {
    let a = args.i32(4);
    let b = args.i32(8);
    let range = FixedRange::new(Fixed::from_raw(a), Fixed::from_raw(b));

    let alter = match id {
        AlterId::Damage => AlterVerb::Damage { value: a },
        AlterId::Velocity => {
            let raw = args.u8(0);
            let kind =
                VelocityKind::from_repr(raw).ok_or_else(|| args.invalid("velocity_kind", raw))?;
            AlterVerb::Velocity {
                kind,
                value: Fixed::from_raw(a),
            }
        }
        AlterId::Thrust => AlterVerb::Thrust {
            relative: args.flag(0, "relative")?,
            value: range,
        },
        AlterId::MaxThrust => AlterVerb::MaxThrust {
            value: Fixed::from_raw(a),
        },
        AlterId::MaxVelocity => AlterVerb::MaxVelocity {
            value: Fixed::from_raw(a),
        },
        AlterId::MaxTurnRate => AlterVerb::MaxTurnRate {
            value: Fixed::from_raw(a),
        },
        AlterId::Location => AlterVerb::Location {
            relative: args.flag(0, "relative")?,
            by: a,
        },
        AlterId::Scale => AlterVerb::Scale { value: a },
        AlterId::Weapon1 => AlterVerb::Weapon1 {
            base: args.base(4, "base")?,
        },
        AlterId::Weapon2 => AlterVerb::Weapon2 {
            base: args.base(4, "base")?,
        },
        AlterId::Special => AlterVerb::Special {
            base: args.base(4, "base")?,
        },
        AlterId::Energy => AlterVerb::Energy { value: a },
        AlterId::Owner => AlterVerb::Owner {
            relative: args.flag(0, "relative")?,
            player: args.admiral(4, "player")?,
        },
        AlterId::Hidden => AlterVerb::Hidden {
            first: a,
            count_minus_1: b,
        },
        AlterId::Cloak => AlterVerb::Cloak,
        AlterId::Offline => AlterVerb::Offline { value: range },
        AlterId::Spin => AlterVerb::Spin { value: range },
        AlterId::BaseType => AlterVerb::BaseType {
            keep_ammo: args.flag(0, "keep_ammo")?,
            base: args.base(4, "base")?,
        },
        AlterId::ConditionTrueYet => AlterVerb::ConditionTrueYet {
            true_yet: args.flag(0, "true_yet")?,
            first: a,
            count_minus_1: b,
        },
        AlterId::Occupation => AlterVerb::Occupation { value: a },
        AlterId::AbsoluteCash => AlterVerb::AbsoluteCash {
            relative: args.flag(0, "relative")?,
            value: Fixed::from_raw(a),
            player: args.admiral(8, "player")?,
        },
        AlterId::Age => AlterVerb::Age {
            relative: args.flag(0, "relative")?,
            value: TickRange {
                minimum: a,
                range: b,
            },
        },
        AlterId::Attributes => AlterVerb::Attributes {
            clear: args.flag(0, "clear")?,
            mask: Attributes::from_bits_retain(a as u32),
        },
        AlterId::LevelKeyTag => AlterVerb::LevelKeyTag { tag: a },
        AlterId::OrderKeyTag => AlterVerb::OrderKeyTag { tag: a },
        AlterId::EngageKeyTag => AlterVerb::EngageKeyTag { tag: a },
        AlterId::AbsoluteLocation => AlterVerb::AbsoluteLocation {
            relative: args.flag(0, "relative")?,
            at: Point::new(a, b),
        },
    };
    Ok(alter)
}

/// Bounds-checked big-endian field reader over an exactly sized region.
///
/// Callers size the region before constructing the reader, so the fixed
/// offsets used below always fall inside it.
struct Reader<'a> {
    bytes: &'a [u8],
    index: u32,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8], index: u32) -> Self {
        Self { bytes, index }
    }

    fn array<const N: usize>(&self, at: usize) -> [u8; N] {
        let mut out = [0u8; N];
        if let Some(src) = self.bytes.get(at..at + N) {
            out.copy_from_slice(src);
        }
        out
    }

    fn u8(&self, at: usize) -> u8 {
        self.bytes.get(at).copied().unwrap_or(0)
    }

    fn u16(&self, at: usize) -> u16 {
        u16::from_be_bytes(self.array(at))
    }

    fn i16(&self, at: usize) -> i16 {
        i16::from_be_bytes(self.array(at))
    }

    fn u32(&self, at: usize) -> u32 {
        u32::from_be_bytes(self.array(at))
    }

    fn i32(&self, at: usize) -> i32 {
        i32::from_be_bytes(self.array(at))
    }

    fn fixed(&self, at: usize) -> Fixed {
        Fixed::from_raw(self.i32(at))
    }

    fn invalid(&self, field: &'static str, value: impl Into<i64>) -> FormatError {
        FormatError::InvalidField {
            index: self.index,
            field,
            value: value.into(),
        }
    }

    fn flag(&self, at: usize, field: &'static str) -> Result<bool, FormatError> {
        match self.u8(at) {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(self.invalid(field, other)),
        }
    }

    fn initial(&self, at: usize, field: &'static str) -> Result<Option<InitialId>, FormatError> {
        match self.i16(at) {
            -1 => Ok(None),
            raw if raw >= 0 => Ok(Some(InitialId(raw as u16))),
            raw => Err(self.invalid(field, raw)),
        }
    }

    fn admiral(&self, at: usize, field: &'static str) -> Result<Option<AdmiralId>, FormatError> {
        match self.i32(at) {
            -1 => Ok(None),
            raw => AdmiralId::from_raw(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(field, raw)),
        }
    }

    fn base(&self, at: usize, field: &'static str) -> Result<Option<BaseHandle>, FormatError> {
        match self.i32(at) {
            -1 => Ok(None),
            raw => BaseHandle::from_raw(raw)
                .map(Some)
                .ok_or_else(|| self.invalid(field, raw)),
        }
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes records back-to-back. Unused argument bytes are zero.
pub fn encode_records(records: &[ActionRecord]) -> Vec<u8> {
    let mut out = Vec::with_capacity(records.len() * EngineConfig::RECORD_SIZE);
    for record in records {
        out.extend_from_slice(&encode_record(record));
    }
    out
}

/// Encodes one record into its fixed-size wire form.
pub fn encode_record(record: &ActionRecord) -> [u8; EngineConfig::RECORD_SIZE] {
    let mut out = Writer::default();

    out.u16(0, record.verb.code());
    out.u8(2, record.reflexive as u8);
    out.u8(3, record.level_key_tag);
    out.u32(4, record.inclusive.bits());
    out.u32(8, record.exclusive.bits());
    out.i16(12, record.owner.to_raw());
    out.i16(14, record.initial_subject.map_or(-1, |id| id.0 as i16));
    out.i16(16, record.initial_direct.map_or(-1, |id| id.0 as i16));
    out.u16(18, record.reserved);
    out.u32(20, record.delay);

    out.origin = HEADER_SIZE;
    encode_arguments(&record.verb, &mut out);

    out.bytes
}

fn encode_arguments(verb: &Verb, args: &mut Writer) {
    match verb {
        Verb::NoAction
        | Verb::EnterWarp
        | Verb::SetDestination
        | Verb::ActivateSpecial
        | Verb::ActivatePulse
        | Verb::ActivateBeam
        | Verb::NilTarget => {}
        Verb::CreateObject(create) | Verb::CreateObjectSetDest(create) => {
            args.i32(0, raw_base(create.base));
            args.i32(4, create.count_minimum);
            args.i32(8, create.count_range);
            args.u8(12, create.relative_velocity as u8);
            args.u8(13, create.relative_direction as u8);
            args.u8(14, create.inherit as u8);
            args.i32(16, create.distance);
        }
        Verb::PlaySound(sound) => {
            args.u8(0, sound.priority);
            args.i32(4, sound.persistence);
            args.u8(8, sound.absolute as u8);
            args.i32(12, sound.volume);
            args.i32(16, sound.id_first);
            args.i32(20, sound.id_range);
        }
        Verb::Alter(alter) => encode_alter(alter, args),
        Verb::MakeSparks(sparks) => {
            args.i32(0, sparks.count);
            args.i32(4, sparks.decay);
            args.i32(8, sparks.velocity.raw());
            args.u8(12, sparks.hue);
        }
        Verb::ReleaseEnergy { percent } => args.i32(0, percent.raw()),
        Verb::LandAt { speed } => args.i32(0, *speed),
        Verb::DisplayMessage(message) => {
            args.i16(0, message.id);
            args.i16(2, message.first_page);
            args.i16(4, message.page_count);
        }
        Verb::ChangeScore(score) => {
            args.i32(0, raw_admiral(score.player));
            args.i32(4, score.which as i32);
            args.i32(8, score.value);
        }
        Verb::DeclareWinner(winner) => {
            args.i32(0, raw_admiral(winner.player));
            args.i32(4, winner.next_chapter.unwrap_or(-1));
            args.i32(8, winner.text_id);
        }
        Verb::Die { kind } => args.u8(0, *kind as u8),
        Verb::ColorFlash(flash) => {
            args.i32(0, flash.length);
            args.u8(4, flash.hue);
            args.u8(5, flash.shade);
        }
        Verb::DisableKeys { mask } | Verb::EnableKeys { mask } => args.u32(0, mask.bits()),
        Verb::SetZoom { value } => args.i32(0, *value),
        Verb::ComputerSelect { screen, line } => {
            args.i32(0, *screen);
            args.i32(4, *line);
        }
        Verb::AssumeInitialObject { which } => args.i32(0, *which),
    }
}

fn encode_alter(alter: &AlterVerb, args: &mut Writer) {
    let (flag, a, b): (u8, i32, i32) = match *alter {
        AlterVerb::Damage { value } => (0, value, 0),
        AlterVerb::Velocity { kind, value } => (kind as u8, value.raw(), 0),
        AlterVerb::Thrust { relative, value } => {
            (relative as u8, value.minimum.raw(), value.range.raw())
        }
        AlterVerb::MaxThrust { value }
        | AlterVerb::MaxVelocity { value }
        | AlterVerb::MaxTurnRate { value } => (0, value.raw(), 0),
        AlterVerb::Location { relative, by } => (relative as u8, by, 0),
        AlterVerb::Scale { value } => (0, value, 0),
        AlterVerb::Weapon1 { base } | AlterVerb::Weapon2 { base } | AlterVerb::Special { base } => {
            (0, raw_base(base), 0)
        }
        AlterVerb::Energy { value } => (0, value, 0),
        AlterVerb::Owner { relative, player } => (relative as u8, raw_admiral(player), 0),
        AlterVerb::Hidden {
            first,
            count_minus_1,
        } => (0, first, count_minus_1),
        AlterVerb::Cloak => (0, 0, 0),
        AlterVerb::Offline { value } | AlterVerb::Spin { value } => {
            (0, value.minimum.raw(), value.range.raw())
        }
        AlterVerb::BaseType { keep_ammo, base } => (keep_ammo as u8, raw_base(base), 0),
        AlterVerb::ConditionTrueYet {
            true_yet,
            first,
            count_minus_1,
        } => (true_yet as u8, first, count_minus_1),
        AlterVerb::Occupation { value } => (0, value, 0),
        AlterVerb::AbsoluteCash {
            relative,
            value,
            player,
        } => (relative as u8, value.raw(), raw_admiral(player)),
        AlterVerb::Age { relative, value } => (relative as u8, value.minimum, value.range),
        AlterVerb::Attributes { clear, mask } => (clear as u8, mask.bits() as i32, 0),
        AlterVerb::LevelKeyTag { tag }
        | AlterVerb::OrderKeyTag { tag }
        | AlterVerb::EngageKeyTag { tag } => (0, tag, 0),
        AlterVerb::AbsoluteLocation { relative, at } => (relative as u8, at.x, at.y),
    };
    args.u8(0, flag);
    args.i32(4, a);
    args.i32(8, b);
}

fn raw_base(base: Option<BaseHandle>) -> i32 {
    base.map_or(-1, |handle| handle.0 as i32)
}

fn raw_admiral(player: Option<AdmiralId>) -> i32 {
    player.map_or(-1, |id| id.0 as i32)
}

/// Fixed-size record buffer; `origin` shifts every offset so argument fields
/// can be written relative to the argument region.
struct Writer {
    bytes: [u8; EngineConfig::RECORD_SIZE],
    origin: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self {
            bytes: [0; EngineConfig::RECORD_SIZE],
            origin: 0,
        }
    }
}

impl Writer {
    fn put(&mut self, at: usize, src: &[u8]) {
        let start = self.origin + at;
        if let Some(dst) = self.bytes.get_mut(start..start + src.len()) {
            dst.copy_from_slice(src);
        }
    }

    fn u8(&mut self, at: usize, value: u8) {
        self.put(at, &[value]);
    }

    fn u16(&mut self, at: usize, value: u16) {
        self.put(at, &value.to_be_bytes());
    }

    fn i16(&mut self, at: usize, value: i16) {
        self.put(at, &value.to_be_bytes());
    }

    fn u32(&mut self, at: usize, value: u32) {
        self.put(at, &value.to_be_bytes());
    }

    fn i32(&mut self, at: usize, value: i32) {
        self.put(at, &value.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ChangeScore(player=-1, which=0, value=10), owner Same, delay 30,
    // inclusive CAN_BE_HIT, initial subject 2, reserved 0xBEEF.
    const CHANGE_SCORE: &str = concat!(
        "0900", "00", "00", "00080000", "00000000", "0001", "0002", "ffff", "beef", "0000001e",
        "ffffffff", "00000000", "0000000a", "00000000", "00000000", "00000000",
    );

    // Alter/AbsoluteCash(relative=false, value=1.5, player=2)
    const ALTER_CASH: &str = concat!(
        "0314", "00", "07", "00000000", "00000000", "0000", "ffff", "ffff", "0000", "00000000",
        "00000000", "00000180", "00000002", "00000000", "00000000", "00000000",
    );

    fn bytes(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn decodes_header_and_arguments() {
        let record = decode_record(&bytes(CHANGE_SCORE), 0).unwrap();
        assert_eq!(
            record.verb,
            Verb::ChangeScore(ChangeScore {
                player: None,
                which: 0,
                value: 10,
            })
        );
        assert_eq!(record.owner, OwnerRelation::Same);
        assert_eq!(record.delay, 30);
        assert_eq!(record.inclusive, Attributes::CAN_BE_HIT);
        assert_eq!(record.initial_subject, Some(InitialId(2)));
        assert_eq!(record.initial_direct, None);
        assert_eq!(record.reserved, 0xBEEF);
    }

    #[test]
    fn decodes_alter_sub_opcode() {
        let record = decode_record(&bytes(ALTER_CASH), 0).unwrap();
        assert_eq!(record.level_key_tag, 7);
        assert_eq!(
            record.verb,
            Verb::Alter(AlterVerb::AbsoluteCash {
                relative: false,
                value: Fixed::from_raw(0x180),
                player: Some(AdmiralId(2)),
            })
        );
    }

    #[test]
    fn reencoding_is_byte_identical() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer.extend(bytes(ALTER_CASH));
        let records = decode_pool(&buffer).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(encode_records(&records), buffer);
    }

    #[test]
    fn short_header_is_truncated() {
        let buffer = bytes(CHANGE_SCORE);
        assert_eq!(
            decode_record(&buffer[..10], 3),
            Err(FormatError::Truncated {
                index: 3,
                available: 10
            })
        );
    }

    #[test]
    fn short_argument_region_is_out_of_bounds() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer.extend(&bytes(ALTER_CASH)[..30]);
        assert_eq!(
            decode_pool(&buffer),
            Err(FormatError::ArgumentOutOfBounds {
                index: 1,
                available: 30
            })
        );
    }

    #[test]
    fn unknown_primary_verb_is_rejected() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer[0] = 0x18;
        let error = decode_record(&buffer, 5).unwrap_err();
        assert_eq!(
            error,
            FormatError::UnknownVerb {
                index: 5,
                verb: 0x1800
            }
        );
        assert_eq!(error.record(), Some(RecordIndex(5)));
        assert_eq!(error.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn sub_opcode_on_non_alter_verb_is_rejected() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer[1] = 0x01;
        assert!(matches!(
            decode_record(&buffer, 0),
            Err(FormatError::UnknownVerb { verb: 0x0901, .. })
        ));
    }

    #[test]
    fn unknown_alter_sub_opcode_is_rejected() {
        let mut buffer = bytes(ALTER_CASH);
        buffer[1] = 27;
        assert!(matches!(
            decode_record(&buffer, 0),
            Err(FormatError::UnknownVerb { verb: 0x031B, .. })
        ));
    }

    #[test]
    fn out_of_domain_fields_are_rejected() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer[13] = 0x05; // owner relation 5
        assert_eq!(
            decode_record(&buffer, 0),
            Err(FormatError::InvalidField {
                index: 0,
                field: "owner",
                value: 5
            })
        );

        let mut buffer = bytes(CHANGE_SCORE);
        buffer[24 + 7] = 0x03; // score index 3
        assert!(matches!(
            decode_record(&buffer, 0),
            Err(FormatError::InvalidField { field: "which", .. })
        ));
    }

    #[test]
    fn stray_argument_bytes_are_rejected() {
        let cloak = ActionRecord::new(Verb::Alter(AlterVerb::Cloak));
        let mut buffer = encode_record(&cloak);
        assert_eq!(decode_record(&buffer, 0), Ok(cloak));

        buffer[HEADER_SIZE + 4] = 0x05;
        assert_eq!(
            decode_record(&buffer, 2),
            Err(FormatError::InvalidField {
                index: 2,
                field: "unused_argument",
                value: 5
            })
        );

        let mut buffer = bytes(CHANGE_SCORE);
        buffer[HEADER_SIZE + 23] = 0x01; // past the score value
        assert!(matches!(
            decode_record(&buffer, 0),
            Err(FormatError::InvalidField { field: "unused_argument", value: 1, .. })
        ));
    }

    #[test]
    fn alter_flag_byte_is_reserved_for_flagged_sub_ops() {
        let damage = ActionRecord::new(Verb::Alter(AlterVerb::Damage { value: -3 }));
        let mut buffer = encode_record(&damage);
        buffer[HEADER_SIZE] = 0x01;
        assert!(matches!(
            decode_record(&buffer, 0),
            Err(FormatError::InvalidField { field: "unused_argument", .. })
        ));

        let sound = ActionRecord::new(Verb::PlaySound(PlaySound::default()));
        let mut buffer = encode_record(&sound);
        buffer[HEADER_SIZE + 1] = 0x7f; // between priority and persistence
        assert!(decode_record(&buffer, 0).is_err());
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_eq!(
            decode_records(&[], 4, 2),
            Err(FormatError::InvalidRange { begin: 4, end: 2 })
        );
        assert_eq!(decode_records(&[], 0, 0), Ok(Vec::new()));
    }

    #[test]
    fn range_decodes_from_record_offset() {
        let mut buffer = bytes(CHANGE_SCORE);
        buffer.extend(bytes(ALTER_CASH));
        let records = decode_records(&buffer, 1, 2).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].verb.code(), 0x0314);
    }

    #[test]
    fn errors_carry_codes_and_indices() {
        let error = FormatError::UnknownVerb { index: 9, verb: 0 };
        assert_eq!(error.error_code(), "FORMAT_UNKNOWN_VERB");
        assert_eq!(error.severity(), ErrorSeverity::Validation);
        assert_eq!(error.index(), Some(9));
    }
}
