//! # SEO Metadata Schemas
//!
//! Different SEO plugins store the same title/description overrides under
//! different metadata keys. Exactly one [`SeoSchema`] is active at a time and
//! every read and write resolves its keys through [`SeoSchema::meta_key`].

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Metadata key holding an image attachment's alt text. Independent of the schema.
pub const ALT_TEXT_META_KEY: &str = "_wp_attachment_image_alt";

const YOAST_PLUGIN_FILE: &str = "wordpress-seo/wp-seo.php";
const RANK_MATH_PLUGIN_FILE: &str = "seo-by-rank-math/rank-math.php";

/// A field-naming convention for SEO metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeoSchema {
    #[default]
    Yoast,
    RankMath,
}

/// The logical SEO fields a schema maps to concrete keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaField {
    Title,
    Description,
}

impl SeoSchema {
    /// Resolves the metadata key for `field` under this schema.
    pub const fn meta_key(self, field: MetaField) -> &'static str {
        match (self, field) {
            (SeoSchema::Yoast, MetaField::Title) => "_yoast_wpseo_title",
            (SeoSchema::Yoast, MetaField::Description) => "_yoast_wpseo_metadesc",
            (SeoSchema::RankMath, MetaField::Title) => "rank_math_title",
            (SeoSchema::RankMath, MetaField::Description) => "rank_math_description",
        }
    }

    /// Picks the schema of whichever supported SEO plugin is active.
    ///
    /// Yoast wins when both are active, and is the default when neither is.
    pub fn detect<S: AsRef<str>>(active_plugins: &[S]) -> Self {
        let is_active = |file: &str| active_plugins.iter().any(|p| p.as_ref() == file);
        if is_active(YOAST_PLUGIN_FILE) {
            SeoSchema::Yoast
        } else if is_active(RANK_MATH_PLUGIN_FILE) {
            SeoSchema::RankMath
        } else {
            SeoSchema::default()
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SeoSchema::Yoast => "yoast",
            SeoSchema::RankMath => "rankmath",
        }
    }
}

impl fmt::Display for SeoSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeoSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yoast" => Ok(SeoSchema::Yoast),
            "rankmath" | "rank_math" => Ok(SeoSchema::RankMath),
            other => Err(format!("Unknown SEO plugin '{other}'")),
        }
    }
}
