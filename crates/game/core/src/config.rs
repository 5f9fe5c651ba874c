/// Engine configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Upper bound on pending delayed applications. Scheduling beyond this
    /// drops the application with a warning.
    pub max_delayed_actions: usize,

    /// Number of follow-up waves (creations, destructions) processed after a
    /// table evaluation before remaining follow-ups are applied without
    /// running their own tables.
    pub max_cascade_depth: u32,

    /// Upper bound on sparks produced by a single `MakeSparks` record.
    pub max_sparks: u32,
}

impl EngineConfig {
    // ===== binary content layout =====
    /// Size of one encoded action record in bytes.
    pub const RECORD_SIZE: usize = 48;
    /// Offset of the verb argument region inside a record.
    pub const ARGUMENT_OFFSET: usize = 24;
    /// Size of the verb argument region in bytes.
    pub const ARGUMENT_SIZE: usize = 24;

    // ===== compile-time constants used as type parameters =====
    /// Maximum number of admirals (players) in a level.
    pub const MAX_ADMIRALS: usize = 4;
    /// Independent score counters per admiral.
    pub const SCORE_COUNT: usize = 3;
    /// Maximum number of live objects in the object table.
    pub const MAX_OBJECTS: usize = 1024;

    // ===== fixed scales =====
    /// Scale value meaning "natural size" (1.0).
    pub const SCALE_ONE: i32 = 4096;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MAX_DELAYED_ACTIONS: usize = 120;
    pub const DEFAULT_MAX_CASCADE_DEPTH: u32 = 16;
    pub const DEFAULT_MAX_SPARKS: u32 = 64;

    pub fn new() -> Self {
        Self {
            max_delayed_actions: Self::DEFAULT_MAX_DELAYED_ACTIONS,
            max_cascade_depth: Self::DEFAULT_MAX_CASCADE_DEPTH,
            max_sparks: Self::DEFAULT_MAX_SPARKS,
        }
    }

    pub fn with_max_delayed_actions(mut self, max_delayed_actions: usize) -> Self {
        self.max_delayed_actions = max_delayed_actions;
        self
    }

    pub fn with_max_cascade_depth(mut self, max_cascade_depth: u32) -> Self {
        self.max_cascade_depth = max_cascade_depth;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
