// File: radiobot-core/src/services/discord/mod.rs

pub mod embeds;
pub mod responder;
pub mod slashcommands;

pub use responder::InteractionResponder;
