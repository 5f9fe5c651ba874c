//! Generation-checked arena holding every live space object.

use super::{ObjectHandle, SpaceObject, StateError};
use crate::config::EngineConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
struct Slot {
    generation: u32,
    object: Option<SpaceObject>,
}

/// Fixed-capacity object arena.
///
/// Removal bumps the slot's generation, so every handle issued for the previous
/// occupant stops resolving. Insertion reuses the lowest vacant slot, which
/// keeps allocation order deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectTable {
    slots: Vec<Slot>,
    live: usize,
}

impl ObjectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `object` and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::ObjectTableFull`] when all
    /// [`EngineConfig::MAX_OBJECTS`] slots are occupied.
    pub fn insert(&mut self, object: SpaceObject) -> Result<ObjectHandle, StateError> {
        let vacancy = self.slots.iter().position(|slot| slot.object.is_none());
        let index = match vacancy {
            Some(index) => index,
            None if self.slots.len() < EngineConfig::MAX_OBJECTS => {
                self.slots.push(Slot {
                    generation: 0,
                    object: None,
                });
                self.slots.len() - 1
            }
            None => {
                return Err(StateError::ObjectTableFull {
                    max: EngineConfig::MAX_OBJECTS,
                });
            }
        };

        let slot = &mut self.slots[index];
        slot.object = Some(object);
        self.live += 1;
        Ok(ObjectHandle::new(index as u32, slot.generation))
    }

    /// Removes the object behind `handle`, returning it if the handle was live.
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<SpaceObject> {
        let slot = self.slot_mut(handle)?;
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.live -= 1;
        Some(object)
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&SpaceObject> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.object.as_ref())
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut SpaceObject> {
        self.slot_mut(handle).and_then(|slot| slot.object.as_mut())
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Collapses a dead handle to `None`.
    pub fn live(&self, handle: Option<ObjectHandle>) -> Option<ObjectHandle> {
        handle.filter(|handle| self.contains(*handle))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates live objects in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &SpaceObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.object
                .as_ref()
                .map(|object| (ObjectHandle::new(index as u32, slot.generation), object))
        })
    }

    fn slot_mut(&mut self, handle: ObjectHandle) -> Option<&mut Slot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation)
    }
}
