//! Result-page reveal: phases, tunables, effects, and the controller.

pub mod config;
pub mod controller;
pub mod effect;
pub mod phase;

pub use config::{
    CheckoutCfg, ConfigError, DiagnosisCfg, RevealConfig, UnlockPacing, UrgencyCfg, VideoCfg,
};
pub use controller::{Cause, Observation, PhaseController, PhaseState};
pub use effect::{Effect, EffectHost, Scope, TimerKind, TimerToken, apply_effects};
pub use phase::{Phase, Section};
