//! Gameplay entities owned by the game scene
//!
//! All state here is exclusively owned by the scene that created it; a scene
//! transition discards the lot.

pub mod avatar;
pub mod equation;
pub mod score;
pub mod target;

pub use avatar::Avatar;
pub use equation::Equation;
pub use score::Score;
pub use target::TargetSequencer;
