//! Sports-only view of a guide
//!
//! Channels are kept when their first display name mentions a sport keyword.
//! Programmes are kept when they air on a kept channel or when their own
//! title mentions a sport keyword, so a programme may survive its channel.

use std::collections::HashSet;

use super::document::{TvDocument, XmlNode, ATTR_CHANNEL, ATTR_ID, TAG_DISPLAY_NAME, TAG_TITLE};

/// Sport names, leagues and abbreviations, matched as lowercase substrings
pub const SPORT_KEYWORDS: &[&str] = &[
    "sport", "sports", "football", "soccer", "match",
    "liga", "league", "premier", "champions", "uefa",
    "fifa", "afc", "caf", "conmebol",
    "bundesliga", "la liga", "serie a", "ligue",
    "mls", "eredivisie",
    "basket", "nba", "wnba",
    "motogp", "moto gp", "formula", "f1", "race",
    "tennis", "badminton", "bwf",
    "volley", "volleyball",
    "ufc", "boxing", "mma",
    "wrestling", "golf", "pga",
    "cricket", "rugby", "nhl",
    "olympic", "sea games", "asian games",
];

/// Case-insensitive substring classifier
#[derive(Debug, Clone)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl Default for KeywordSet {
    fn default() -> Self {
        Self::sports()
    }
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn sports() -> Self {
        Self::new(SPORT_KEYWORDS)
    }

    /// True when the lowercased text contains any keyword.
    /// Missing or empty text never matches.
    pub fn matches(&self, text: Option<&str>) -> bool {
        let Some(text) = text.filter(|t| !t.is_empty()) else {
            return false;
        };
        let lowered = text.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterStats {
    pub channels_kept: usize,
    pub channels_removed: usize,
    pub programmes_kept: usize,
    pub programmes_removed: usize,
}

/// Two-pass channel/programme filter
#[derive(Debug, Clone, Default)]
pub struct SportsFilter {
    keywords: KeywordSet,
}

impl SportsFilter {
    pub fn new(keywords: KeywordSet) -> Self {
        Self { keywords }
    }

    pub fn is_sport_channel(&self, channel: &XmlNode) -> bool {
        self.keywords.matches(channel.child_text(TAG_DISPLAY_NAME))
    }

    pub fn is_sport_programme(&self, programme: &XmlNode) -> bool {
        self.keywords.matches(programme.child_text(TAG_TITLE))
    }

    /// Drop non-sport channels, then every programme that neither airs on a
    /// kept channel nor has a sport title. Elements other than channels and
    /// programmes are left in place.
    pub fn apply(&self, doc: &mut TvDocument) -> FilterStats {
        let mut stats = FilterStats::default();

        // Pass 1: channels. A kept channel without an id keeps no programmes.
        let mut kept_channels: HashSet<String> = HashSet::new();
        doc.root.children.retain(|node| {
            if !node.is_channel() {
                return true;
            }
            let keep = self.is_sport_channel(node);
            if keep {
                if let Some(id) = node.attribute(ATTR_ID) {
                    kept_channels.insert(id.to_string());
                }
                stats.channels_kept += 1;
            } else {
                log::trace!("Dropping channel {:?}", node.attribute(ATTR_ID));
                stats.channels_removed += 1;
            }
            keep
        });

        // Pass 2: programmes, OR of channel membership and own title
        doc.root.children.retain(|node| {
            if !node.is_programme() {
                return true;
            }
            let on_kept_channel = node
                .attribute(ATTR_CHANNEL)
                .is_some_and(|id| kept_channels.contains(id));
            let keep = on_kept_channel || self.is_sport_programme(node);
            if keep {
                stats.programmes_kept += 1;
            } else {
                stats.programmes_removed += 1;
            }
            keep
        });

        log::debug!(
            "Kept {} of {} channels, {} of {} programmes",
            stats.channels_kept,
            stats.channels_kept + stats.channels_removed,
            stats.programmes_kept,
            stats.programmes_kept + stats.programmes_removed
        );
        stats
    }
}

#[cfg(test)]
#[path = "sports_tests.rs"]
mod tests;
