pub mod dot;
pub mod json;
pub mod text;

pub use dot::{DotBuilder, DotFormatter};
pub use json::JsonFormatter;
pub use text::TextFormatter;
