//! Event handlers module
//!
//! - `chain` - the handler chain, its roles and chain presets

mod chain;

pub use chain::{Dispatch, Handler, Role, parse_roles};
