// File: radiobot-core/src/station/mod.rs

pub mod normalize;
pub mod title_source;

pub use normalize::{is_commercial_break, normalize_title};
pub use title_source::{IcecastTitleSource, parse_icestats_title, title_case};
