pub mod admiral;
pub mod common;
pub mod level;
pub mod object;
pub mod ui;

// Re-export common types
pub use common::{AdmiralId, InitialId, ObjectHandle, Tick};

// Re-export ledger types
pub use admiral::{Admiral, AdmiralLedger};

// Re-export level bookkeeping
pub use level::{LevelState, Outcome};

// Re-export object types
pub use object::{Attributes, Occupation, Presence, SpaceObject, WeaponMount, WeaponSlot};

// Re-export interface state
pub use ui::{KeyMask, MiniSelection, UiState};
