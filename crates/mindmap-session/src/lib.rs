pub mod agent;
pub mod session;

pub use agent::{
    ClientEffect, EffectOutcome, NodeSummary, Snapshot, apply_effect, begin_turn, end_turn,
    snapshot,
};
pub use session::{Session, SessionError};
