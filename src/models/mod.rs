mod identifiers;

pub use identifiers::{CastTargetId, MediaItemId};

use serde::{Deserialize, Serialize};

/// Descriptive metadata for the media a player instance is showing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaMeta {
    pub id: MediaItemId,
    pub title: String,
    pub year: Option<u32>,
    pub kind: MediaKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Movie,
    Episode,
}

impl MediaMeta {
    pub fn movie(id: impl Into<MediaItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            kind: MediaKind::Movie,
        }
    }

    /// Title as shown in the header band, e.g. "Heat (1995)". Episode
    /// titles already name their show, so they carry no year.
    pub fn display_title(&self) -> String {
        match (self.kind, self.year) {
            (MediaKind::Movie, Some(year)) => format!("{} ({})", self.title, year),
            _ => self.title.clone(),
        }
    }
}

/// Wireless display protocols the engine can discover receivers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastProtocol {
    AirPlay,
    Chromecast,
}

/// A receiver discovered by the external casting integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastTarget {
    pub id: CastTargetId,
    pub name: String,
    pub protocol: CastProtocol,
}
