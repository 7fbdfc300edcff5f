pub mod presence;
pub mod runtime;
pub mod voice;

pub use presence::DiscordPresence;
pub use runtime::DiscordPlatform;
pub use voice::GatewayVoice;
