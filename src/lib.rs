pub mod error;
pub mod filter;
pub mod highlighting;
pub mod io;
pub mod patterns;

pub use crate::error::ConfigError;
pub use crate::highlighting::{length_visible, MatchDispatcher, Style};
pub use crate::patterns::Pattern;
