//! Contest platforms and the platform selector.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An upstream contest platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    CodeChef,
    Codeforces,
    LeetCode,
}

impl Platform {
    /// All platforms in aggregation order.
    pub const ALL: [Platform; 3] = [Platform::CodeChef, Platform::Codeforces, Platform::LeetCode];

    /// Lowercase slug used in URLs and selectors.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::CodeChef => "codechef",
            Platform::Codeforces => "codeforces",
            Platform::LeetCode => "leetcode",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::CodeChef => "CodeChef",
            Platform::Codeforces => "Codeforces",
            Platform::LeetCode => "LeetCode",
        }
    }

    /// Case-insensitive lookup by slug.
    pub fn from_slug(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.slug().eq_ignore_ascii_case(s))
    }

    /// Whether a record's `platform` field names this platform.
    pub fn matches(&self, platform_field: &str) -> bool {
        self.slug().eq_ignore_ascii_case(platform_field.trim())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which listing the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlatformSelector {
    /// Every platform merged.
    #[default]
    All,
    /// The caller's bookmarked contests.
    Bookmarks,
    /// A single platform.
    Only(Platform),
}

impl PlatformSelector {
    /// Parse a selector. Absent, blank and unrecognised values select everything.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return PlatformSelector::All;
        };
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "" | "all" | "all platforms" => PlatformSelector::All,
            "bookmarks" => PlatformSelector::Bookmarks,
            other => Platform::from_slug(other)
                .map(PlatformSelector::Only)
                .unwrap_or(PlatformSelector::All),
        }
    }

    /// Platforms whose sources must be fetched for this selector.
    pub fn platforms(&self) -> Vec<Platform> {
        match self {
            PlatformSelector::All => Platform::ALL.to_vec(),
            PlatformSelector::Bookmarks => Vec::new(),
            PlatformSelector::Only(p) => vec![*p],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlatformSelector::All => "all platforms",
            PlatformSelector::Bookmarks => "bookmarks",
            PlatformSelector::Only(p) => p.slug(),
        }
    }
}
