//! Identity Provider
//!
//! Issues one anonymous identity per client: a random UUID, a display name
//! derived from it, and a color drawn from a fixed palette. The random
//! source is injected so identity creation is reproducible in tests.

mod display_name;
mod palette;
mod provider;

pub use display_name::{display_name, display_number, string_hash, DISPLAY_NUMBER_MAX};
pub use palette::{pick_color, ANONYMOUS_COLORS};
pub use provider::{identity_key, IdentityProvider, DEFAULT_IDENTITY_KEY};
