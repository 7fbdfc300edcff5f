// File: radiobot-core/src/services/mod.rs

pub mod discord;
pub mod now_playing_service;
pub mod radio_commands;
pub mod radio_context;

pub use now_playing_service::NowPlayingService;
pub use radio_commands::RadioCommands;
pub use radio_context::RadioContext;
