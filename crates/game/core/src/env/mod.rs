//! Traits describing read-only content.
//!
//! Oracles expose base object definitions, the level definition, the decoded
//! action pool, configuration and randomness. The [`Env`] aggregate bundles
//! them so the engine can reach everything it needs without hard coupling to
//! concrete implementations.
mod actions;
mod bases;
mod config;
mod error;
mod level;
mod rng;

pub use actions::{ActionOracle, ActionPool};
pub use bases::{
    BaseHandle, BaseObject, BaseObjectOracle, TriggerKind, TriggerTables, WeaponMountDef,
};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use level::{AdmiralSetup, InitialObject, LevelOracle};
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates read-only oracles required by the action engine.
pub struct Env<'a, B, L, A, C, R>
where
    B: BaseObjectOracle + ?Sized,
    L: LevelOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    bases: Option<&'a B>,
    level: Option<&'a L>,
    actions: Option<&'a A>,
    config: Option<&'a C>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn BaseObjectOracle + 'a,
    dyn LevelOracle + 'a,
    dyn ActionOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn RngOracle + 'a,
>;

// Manual impls: the oracles themselves need not be `Clone`.
impl<B, L, A, C, R> Clone for Env<'_, B, L, A, C, R>
where
    B: BaseObjectOracle + ?Sized,
    L: LevelOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, L, A, C, R> Copy for Env<'_, B, L, A, C, R>
where
    B: BaseObjectOracle + ?Sized,
    L: LevelOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}

impl<'a, B, L, A, C, R> Env<'a, B, L, A, C, R>
where
    B: BaseObjectOracle + ?Sized,
    L: LevelOracle + ?Sized,
    A: ActionOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        bases: Option<&'a B>,
        level: Option<&'a L>,
        actions: Option<&'a A>,
        config: Option<&'a C>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            bases,
            level,
            actions,
            config,
            rng,
        }
    }

    pub fn with_all(
        bases: &'a B,
        level: &'a L,
        actions: &'a A,
        config: &'a C,
        rng: &'a R,
    ) -> Self {
        Self::new(
            Some(bases),
            Some(level),
            Some(actions),
            Some(config),
            Some(rng),
        )
    }

    pub fn empty() -> Self {
        Self {
            bases: None,
            level: None,
            actions: None,
            config: None,
            rng: None,
        }
    }

    /// Returns the BaseObjectOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::BasesNotAvailable` if no base oracle was provided.
    pub fn bases(&self) -> Result<&'a B, OracleError> {
        self.bases.ok_or(OracleError::BasesNotAvailable)
    }

    /// Returns the LevelOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::LevelNotAvailable` if no level oracle was provided.
    pub fn level(&self) -> Result<&'a L, OracleError> {
        self.level.ok_or(OracleError::LevelNotAvailable)
    }

    /// Returns the ActionOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ActionsNotAvailable` if no action oracle was provided.
    pub fn actions(&self) -> Result<&'a A, OracleError> {
        self.actions.ok_or(OracleError::ActionsNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ConfigNotAvailable` if no config oracle was provided.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the RngOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::RngNotAvailable` if no rng oracle was provided.
    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, B, L, A, C, R> Env<'a, B, L, A, C, R>
where
    B: BaseObjectOracle + 'a,
    L: LevelOracle + 'a,
    A: ActionOracle + 'a,
    C: ConfigOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `GameEnv` (borrows self).
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let bases: Option<&'a dyn BaseObjectOracle> = self.bases.map(|bases| bases as _);
        let level: Option<&'a dyn LevelOracle> = self.level.map(|level| level as _);
        let actions: Option<&'a dyn ActionOracle> = self.actions.map(|actions| actions as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|config| config as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|rng| rng as _);
        Env::new(bases, level, actions, config, rng)
    }
}
