//! Label index maps and display text lookup, normalized once at load time.

pub mod label_map;
pub mod label_texts;

pub use label_map::LabelMap;
pub use label_texts::LabelTexts;
