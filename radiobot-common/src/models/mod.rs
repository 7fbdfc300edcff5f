// File: radiobot-common/src/models/mod.rs
pub mod track;
pub mod command;

pub use track::{EnrichedTrack, NowPlaying, PlayRecord};
pub use command::CommandReply;
