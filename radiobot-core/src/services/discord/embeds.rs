// File: radiobot-core/src/services/discord/embeds.rs

use twilight_model::channel::message::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFieldBuilder, ImageSource};
use tracing::warn;

use radiobot_common::models::{EnrichedTrack, PlayRecord};
use crate::station::title_case;

pub const NOW_PLAYING_COLOR: u32 = 0x1DB954;
pub const LAST_PLAYED_COLOR: u32 = 0xE4001B;

pub fn now_playing_text(title: &str) -> String {
    format!("Now Playing: **{title}**")
}

pub fn last_played_heading(count: usize) -> String {
    format!("Last Played - {count} Songs")
}

/// One line per record, numbered from 1, most recent first.
pub fn last_played_lines(records: &[PlayRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, rec)| format!("{}. **{}** Played at {}", i + 1, title_case(&rec.title), rec.time))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn now_playing_embed(track: &EnrichedTrack) -> Embed {
    let mut builder = EmbedBuilder::new()
        .title(track.name.clone())
        .color(NOW_PLAYING_COLOR)
        .field(EmbedFieldBuilder::new("Artist(s)", track.artists.join(", ")).inline())
        .field(EmbedFieldBuilder::new("Album", track.album.clone()).inline())
        .field(EmbedFieldBuilder::new("Release Date", track.release_date.clone()).inline());

    if let Some(url) = track.catalog_url.as_deref() {
        builder = builder
            .url(url)
            .field(EmbedFieldBuilder::new("Listen on Spotify", format!("[Spotify Link]({url})")));
    }

    if let Some(cover) = track.cover_image_url.as_deref() {
        match ImageSource::url(cover) {
            Ok(src) => builder = builder.thumbnail(src),
            Err(e) => warn!("Skipping cover image {:?}: {}", cover, e),
        }
    }

    builder.build()
}

pub fn last_played_embed(records: &[PlayRecord]) -> Embed {
    EmbedBuilder::new()
        .title(last_played_heading(records.len()))
        .description(last_played_lines(records))
        .color(LAST_PLAYED_COLOR)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track() -> EnrichedTrack {
        EnrichedTrack {
            name: "Hello World".into(),
            artists: vec!["Some Artist".into(), "Guest".into()],
            album: "Greatest".into(),
            release_date: "2019-05-01".into(),
            cover_image_url: Some("https://i.scdn.co/image/abc".into()),
            catalog_url: Some("https://open.spotify.com/track/xyz".into()),
        }
    }

    #[test]
    fn history_lines_are_numbered_and_title_cased() {
        let records = vec![
            PlayRecord::new("second song", "14:05"),
            PlayRecord::new("first song", "14:01"),
        ];
        assert_eq!(
            last_played_lines(&records),
            "1. **Second Song** Played at 14:05\n2. **First Song** Played at 14:01"
        );
        let embed = last_played_embed(&records);
        assert_eq!(embed.title.as_deref(), Some("Last Played - 2 Songs"));
        assert_eq!(embed.color, Some(LAST_PLAYED_COLOR));
    }

    #[test]
    fn track_embed_fields() {
        let embed = now_playing_embed(&track());
        assert_eq!(embed.title.as_deref(), Some("Hello World"));
        assert_eq!(embed.color, Some(NOW_PLAYING_COLOR));

        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Artist(s)", "Album", "Release Date", "Listen on Spotify"]);
        assert_eq!(embed.fields[0].value, "Some Artist, Guest");
        assert_eq!(embed.fields[3].value, "[Spotify Link](https://open.spotify.com/track/xyz)");
        assert!(embed.thumbnail.is_some());
    }

    #[test]
    fn track_embed_without_links() {
        let mut t = track();
        t.catalog_url = None;
        t.cover_image_url = None;
        let embed = now_playing_embed(&t);
        assert_eq!(embed.fields.len(), 3);
        assert!(embed.thumbnail.is_none());
        assert_eq!(now_playing_text("hello world"), "Now Playing: **hello world**");
    }
}
