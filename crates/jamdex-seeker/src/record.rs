//! Game records as produced by the results crawler, and the dataset that
//! holds them.
//!
//! The JSON shape is the crawler's: camelCase keys, optional label lists,
//! and `platforms`/`madeWith` emitted as one comma-separated string. Both
//! string and list forms are accepted for every label field.

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SeekerError};
use crate::traits::Seekable;
use crate::value::{Number, Value};

/// One game entry in the jam results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_url: String,
    #[serde(default)]
    pub submission_url: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    pub name: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub ratings_count: u64,
    #[serde(default)]
    pub ranks: Vec<Rank>,
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub platforms: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub genres: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub made_with: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "string_or_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub tags: Option<Vec<String>>,
}

/// A credited author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub url: String,
    pub name: String,
}

/// Placement in one rating category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rank {
    pub category: String,
    pub place: u32,
    pub score: f64,
    pub raw_score: f64,
}

/// Classification of a game's cover art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverKind {
    Image,
    Gif,
    Missing,
}

impl CoverKind {
    /// Suffix that marks an animated cover.
    pub const GIF_SUFFIX: &'static str = ".gif";

    /// All classifications, in the order selectors offer them.
    pub const ALL: [CoverKind; 3] = [CoverKind::Image, CoverKind::Gif, CoverKind::Missing];

    /// Classifies a cover reference by its extension.
    pub fn of(cover: Option<&str>) -> Self {
        match cover {
            None | Some("") => CoverKind::Missing,
            Some(url) if url.ends_with(Self::GIF_SUFFIX) => CoverKind::Gif,
            Some(_) => CoverKind::Image,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CoverKind::Image => "image",
            CoverKind::Gif => "gif",
            CoverKind::Missing => "missing",
        }
    }
}

impl Game {
    pub const NAME: &'static str = "name";
    pub const RANKS: &'static str = "ranks";
    pub const COVER: &'static str = "coverUrl";
    pub const AUTHORS_COUNT: &'static str = "authorsCount";
    pub const VOTES_COUNT: &'static str = "votesCount";
    pub const PLATFORMS: &'static str = "platforms";
    pub const GENRES: &'static str = "genres";
    pub const MADE_WITH: &'static str = "madeWith";
    pub const TAGS: &'static str = "tags";

    /// Finds the rank entry for `category` by exact label.
    pub fn rank(&self, category: &str) -> Option<&Rank> {
        self.ranks.iter().find(|r| r.category == category)
    }

    pub fn cover_kind(&self) -> CoverKind {
        CoverKind::of(self.cover_url.as_deref())
    }

    /// Author display names joined for one-line output.
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            Self::NAME => Value::Text(&self.name),
            Self::COVER => match self.cover_kind() {
                CoverKind::Missing => Value::None,
                kind => Value::Label(kind.as_str()),
            },
            Self::AUTHORS_COUNT => Value::Number(Number::from(self.authors.len())),
            Self::VOTES_COUNT => Value::Number(Number::from(self.ratings_count)),
            Self::PLATFORMS => labels(&self.platforms),
            Self::GENRES => labels(&self.genres),
            Self::MADE_WITH => labels(&self.made_with),
            Self::TAGS => labels(&self.tags),
            _ => Value::None,
        }
    }
}

fn labels(list: &Option<Vec<String>>) -> Value<'_> {
    list.as_deref().map_or(Value::None, Value::Labels)
}

impl Rank {
    pub const PLACE: &'static str = "place";
    pub const SCORE: &'static str = "score";
    pub const RAW_SCORE: &'static str = "rawScore";

    fn field_value(&self, field: &str) -> Value<'static> {
        match field {
            Self::PLACE => Value::Number(Number::from(self.place)),
            Self::SCORE => Value::Number(Number::F64(self.score)),
            Self::RAW_SCORE => Value::Number(Number::F64(self.raw_score)),
            _ => Value::None,
        }
    }
}

impl Seekable for Game {
    fn seeker_field_value(&self, path: &[String]) -> Value<'_> {
        match path {
            [field] => self.field_value(field),
            [ranks, category, leaf] if ranks == Self::RANKS => self
                .rank(category)
                .map_or(Value::None, |rank| rank.field_value(leaf)),
            _ => Value::None,
        }
    }
}

/// Accepts a label list, a comma-separated string, or null.
fn string_or_list<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Labels {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Labels>::deserialize(deserializer)? {
        None => None,
        Some(Labels::Many(list)) => Some(list),
        Some(Labels::One(joined)) => Some(
            joined
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ),
    })
}

/// The immutable, ordered set of games being filtered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    games: Vec<Game>,
}

impl Dataset {
    pub fn new(games: Vec<Game>) -> Self {
        Dataset { games }
    }

    /// Parses a dataset from the crawler's JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let games: Vec<Game> = serde_json::from_str(json)?;
        Ok(Dataset { games })
    }

    /// Reads and parses a dataset file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SeekerError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&json)?;
        tracing::info!(path = %path.display(), games = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Game> {
        self.games.iter()
    }
}

impl From<Vec<Game>> for Dataset {
    fn from(games: Vec<Game>) -> Self {
        Dataset::new(games)
    }
}
