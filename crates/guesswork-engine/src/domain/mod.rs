//! Domain layer: game state and its synchronous transitions.

pub mod badges;
pub mod state;
