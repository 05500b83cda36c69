use serde::{Deserialize, Serialize};

use crate::foundation::error::{CardError, CardResult};

/// The per-song fields a card is rendered from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_excerpt: Option<String>,
}

impl MetadataRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = Some(album.into());
        self
    }

    pub fn with_cover_art(mut self, path: impl Into<String>) -> Self {
        self.cover_art = Some(path.into());
        self
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.featured_excerpt = Some(excerpt.into());
        self
    }

    /// Treat blank optional strings as absent.
    pub fn normalized(mut self) -> Self {
        fn blank_to_none(v: &mut Option<String>) {
            if v.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *v = None;
            }
        }

        blank_to_none(&mut self.album);
        blank_to_none(&mut self.cover_art);
        blank_to_none(&mut self.featured_excerpt);
        self
    }
}

/// Full song frontmatter schema as written in the content directory.
///
/// Only the fields in [`MetadataRecord`] influence rendering; the rest are validated and kept
/// so catalog tooling can round-trip entries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongFrontmatter {
    pub title: String,
    #[serde(default)]
    pub cover_art: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub track: Option<u32>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub writers: Option<Vec<String>>,
    #[serde(default)]
    pub spotify_url: Option<String>,
    #[serde(default)]
    pub apple_music_url: Option<String>,
    #[serde(default)]
    pub youtube_music_url: Option<String>,
    #[serde(default)]
    pub bandcamp_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub featured_lyrics: Option<String>,
}

impl SongFrontmatter {
    pub fn validate(&self) -> CardResult<()> {
        if self.title.trim().is_empty() {
            return Err(CardError::catalog("song title must be non-empty"));
        }

        let urls = [
            ("spotifyUrl", &self.spotify_url),
            ("appleMusicUrl", &self.apple_music_url),
            ("youtubeMusicUrl", &self.youtube_music_url),
            ("bandcampUrl", &self.bandcamp_url),
        ];
        for (field, value) in urls {
            if let Some(url) = value
                && !(url.starts_with("https://") || url.starts_with("http://"))
            {
                return Err(CardError::catalog(format!(
                    "{field} must be an absolute http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }

    /// Project onto the fields used for rendering.
    pub fn to_record(&self) -> MetadataRecord {
        MetadataRecord {
            title: self.title.clone(),
            album: self.album.clone(),
            cover_art: self.cover_art.clone(),
            featured_excerpt: self.featured_lyrics.clone(),
        }
        .normalized()
    }
}

/// One catalog item: a stable identifier plus its metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogEntry {
    /// Slash-separated identifier, e.g. `echoes/nightfall`.
    pub id: String,
    pub record: MetadataRecord,
    pub song: SongFrontmatter,
}

impl CatalogEntry {
    /// Entry whose record is derived from `song`.
    pub fn from_song(id: impl Into<String>, song: SongFrontmatter) -> Self {
        Self {
            id: id.into(),
            record: song.to_record(),
            song,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/model.rs"]
mod tests;
