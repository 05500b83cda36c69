use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    assets::resolve::InlineAsset,
    catalog::model::MetadataRecord,
    foundation::{
        core::Canvas,
        error::{CardError, CardResult},
    },
    template::{landscape, node::Node, portrait},
};

/// The fixed card layouts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    /// 1200x630: contained cover on the left, brand/title/album on the right.
    LandscapeCompact,
    /// 1200x630: cropped cover on the left, brand/title/album/excerpt on the right.
    LandscapeDetailed,
    /// 1080x1350: single centered column with a large rounded cover and a footer.
    PortraitShare,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::LandscapeCompact,
        Variant::LandscapeDetailed,
        Variant::PortraitShare,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::LandscapeCompact => "landscape-compact",
            Self::LandscapeDetailed => "landscape-detailed",
            Self::PortraitShare => "portrait-share",
        }
    }

    pub fn canvas(self) -> Canvas {
        match self {
            Self::LandscapeCompact | Self::LandscapeDetailed => Canvas::new(1200, 630),
            Self::PortraitShare => Canvas::new(1080, 1350),
        }
    }

    /// First path segment of the artifact route.
    pub fn route_prefix(self) -> &'static str {
        match self {
            Self::LandscapeCompact => "og",
            Self::LandscapeDetailed => "og-detailed",
            Self::PortraitShare => "share",
        }
    }

    /// Relative artifact path for a catalog entry, e.g. `og/nightfall.png`.
    pub fn artifact_path(self, id: &str) -> String {
        format!("{}/{id}.png", self.route_prefix())
    }

    /// Build the node tree for a record.
    #[tracing::instrument(skip(record, cover), fields(title = %record.title))]
    pub fn compose(self, record: &MetadataRecord, cover: &InlineAsset) -> Node {
        match self {
            Self::LandscapeCompact => landscape::compact(record, cover),
            Self::LandscapeDetailed => landscape::detailed(record, cover),
            Self::PortraitShare => portrait::share(record, cover),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = CardError;

    fn from_str(s: &str) -> CardResult<Self> {
        Self::ALL
            .into_iter()
            .find(|v| v.name() == s || v.route_prefix() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|v| v.name()).collect();
                CardError::validation(format!(
                    "unknown card variant '{s}' (expected one of: {})",
                    names.join(", ")
                ))
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/template/variant.rs"]
mod tests;
