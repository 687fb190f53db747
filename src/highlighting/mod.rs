pub mod dispatcher;
pub mod pattern_matcher;
pub mod style;
pub mod visible_length;

pub use crate::highlighting::dispatcher::MatchDispatcher;
pub use crate::highlighting::pattern_matcher::{Advance, PatternMatcher};
pub use crate::highlighting::style::{palette, Color, Style};
pub use crate::highlighting::visible_length::{length_visible, pad_visible};
