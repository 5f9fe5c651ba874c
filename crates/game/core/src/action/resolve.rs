//! Role resolution and record filtering.
//!
//! A trigger supplies up to three object roles. Before a record fires, its
//! level-initial overrides and reflexive flag rewrite those roles, then its
//! attribute and owner filters are checked against the resulting focus.
//! Every role is re-validated against the object table here, so a handle
//! captured before its object died simply resolves to `None`.

use super::{ActionRecord, OwnerRelation};
use crate::math::PointOffset;
use crate::state::{Attributes, GameState, ObjectHandle, ObjectTable};

/// Object roles and positional offset supplied by whatever triggered a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerContext {
    pub subject: Option<ObjectHandle>,
    pub focus: Option<ObjectHandle>,
    pub direct: Option<ObjectHandle>,
    pub offset: Option<PointOffset>,
}

impl TriggerContext {
    /// Trigger where one object acts on itself.
    pub fn object(object: ObjectHandle) -> Self {
        Self {
            subject: Some(object),
            ..Self::default()
        }
    }

    /// Trigger where `subject` acts on `direct` (collision, arrival, etc).
    pub fn between(subject: ObjectHandle, direct: Option<ObjectHandle>) -> Self {
        Self {
            subject: Some(subject),
            direct,
            ..Self::default()
        }
    }

    pub fn with_focus(mut self, focus: ObjectHandle) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn with_offset(mut self, offset: PointOffset) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Live roles a record is dispatched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedRoles {
    pub subject: Option<ObjectHandle>,
    /// The object most verbs act upon; also the filter target.
    pub focus: Option<ObjectHandle>,
    pub direct: Option<ObjectHandle>,
}

/// Applies `record`'s overrides and reflexivity to `trigger`.
///
/// - subject: the level-initial override if set, else the trigger's subject.
/// - direct: the subject when reflexive, else the level-initial override,
///   else the trigger's direct object.
/// - focus: the subject when reflexive, else the direct object, else the
///   trigger's focus, else the subject.
///
/// An override naming an initial that is hidden or destroyed resolves to
/// `None`; it never falls back to the dynamic role.
pub fn resolve_roles(
    record: &ActionRecord,
    trigger: &TriggerContext,
    state: &GameState,
) -> ResolvedRoles {
    let objects = &state.objects;

    let subject = match record.initial_subject {
        Some(initial) => state.initial_object(initial),
        None => objects.live(trigger.subject),
    };

    if record.reflexive {
        return ResolvedRoles {
            subject,
            focus: subject,
            direct: subject,
        };
    }

    let direct = match record.initial_direct {
        Some(initial) => state.initial_object(initial),
        None => objects.live(trigger.direct),
    };
    let focus = direct.or_else(|| objects.live(trigger.focus)).or(subject);

    ResolvedRoles {
        subject,
        focus,
        direct,
    }
}

/// True if `attributes` carries every inclusive bit and no exclusive bit.
pub fn attributes_match(
    attributes: Attributes,
    inclusive: Attributes,
    exclusive: Attributes,
) -> bool {
    attributes.contains(inclusive) && !attributes.intersects(exclusive)
}

/// Evaluates an owner relation. Ownerless objects never satisfy `Same` or
/// `Different`.
pub fn owner_relation_holds<T: PartialEq>(
    relation: OwnerRelation,
    subject: Option<T>,
    target: Option<T>,
) -> bool {
    match relation {
        OwnerRelation::Any => true,
        OwnerRelation::Same => matches!((subject, target), (Some(a), Some(b)) if a == b),
        OwnerRelation::Different => matches!((subject, target), (Some(a), Some(b)) if a != b),
    }
}

/// Checks `record`'s attribute and owner filters against the resolved focus.
///
/// With no live focus the record passes only if it has no filter at all.
pub fn passes_filters(
    record: &ActionRecord,
    roles: &ResolvedRoles,
    objects: &ObjectTable,
) -> bool {
    let Some(target) = roles.focus.and_then(|handle| objects.get(handle)) else {
        return record.is_unfiltered();
    };

    if !attributes_match(target.attributes, record.inclusive, record.exclusive) {
        return false;
    }

    let subject_owner = roles
        .subject
        .and_then(|handle| objects.get(handle))
        .and_then(|subject| subject.owner);
    owner_relation_holds(record.owner, subject_owner, target.owner)
}
