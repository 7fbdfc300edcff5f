use crate::models::track::{EnrichedTrack, PlayRecord};

/// What a command handler asks the host to render back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// Plain ephemeral message.
    Text(String),
    /// "Now Playing" line, with an embed when catalog details are known.
    NowPlaying {
        title: String,
        track: Option<EnrichedTrack>,
    },
    /// Most-recent-first slice of the play history.
    LastPlayed(Vec<PlayRecord>),
}

impl CommandReply {
    pub fn text(s: impl Into<String>) -> Self {
        CommandReply::Text(s.into())
    }
}
