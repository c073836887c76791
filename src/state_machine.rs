//! Session state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions:
//! the transition function returns the next state plus the effects the
//! session runtime applies to the store.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use state::{SessionContext, SessionState};
pub use transition::{transition, TransitionError};
