pub mod input;

pub use input::{open_input, InputSource};
