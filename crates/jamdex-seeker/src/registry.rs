//! The filter schema for game-jam results.
//!
//! Part of the schema is fixed (name, cover, counts) and part is read from
//! the dataset (label values, rank categories). [`SchemaCache`] keeps the
//! derived schema for as long as the same dataset is being filtered.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::record::{CoverKind, Dataset, Game, Rank};
use crate::schema::{InputProps, Property, Schema};

/// Where rank categories are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySource {
    /// Categories of the first record only.
    FirstRecord,
    /// Union over all records, in first-seen order.
    #[default]
    AllRecords,
}

/// Options for deriving the schema from a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegistryOptions {
    pub categories: CategorySource,
}

/// Builds the schema for a set of games.
pub fn jam_schema(games: &[Game], options: &RegistryOptions) -> Schema {
    let whole = InputProps {
        min: Some(0.0),
        step: Some(1.0),
        ..InputProps::default()
    };

    Schema::new(vec![
        Property::text(Game::NAME, "Name"),
        Property::nested(
            Game::RANKS,
            "Ranks",
            rank_categories(games, options.categories)
                .into_iter()
                .map(|category| Property::nested(category.clone(), category, rank_leaves()))
                .collect(),
        ),
        Property::enumerated(
            Game::COVER,
            "Cover",
            CoverKind::ALL.iter().map(|k| k.as_str().to_string()).collect(),
        )
        .with_absent_label(CoverKind::Missing.as_str()),
        Property::numeric(Game::AUTHORS_COUNT, "Authors count", whole),
        Property::numeric(Game::VOTES_COUNT, "Votes count", InputProps::default()),
        Property::enumerated(Game::GENRES, "Genres", distinct_labels(games, |g| &g.genres)),
        Property::enumerated(Game::TAGS, "Tags", distinct_labels(games, |g| &g.tags)),
        Property::enumerated(
            Game::PLATFORMS,
            "Platforms",
            distinct_labels(games, |g| &g.platforms),
        ),
        Property::enumerated(
            Game::MADE_WITH,
            "Made with",
            distinct_labels(games, |g| &g.made_with),
        ),
    ])
}

fn rank_leaves() -> Vec<Property> {
    vec![
        Property::numeric(
            Rank::PLACE,
            "Place",
            InputProps {
                min: Some(1.0),
                step: Some(1.0),
                ..InputProps::default()
            },
        ),
        Property::numeric(Rank::SCORE, "Score", InputProps::default()),
        Property::numeric(Rank::RAW_SCORE, "Raw Score", InputProps::default()),
    ]
}

/// Rank category names, without duplicates, in first-seen order.
pub fn rank_categories(games: &[Game], source: CategorySource) -> Vec<String> {
    let scanned = match source {
        CategorySource::FirstRecord => &games[..games.len().min(1)],
        CategorySource::AllRecords => games,
    };

    let mut seen = BTreeSet::new();
    scanned
        .iter()
        .flat_map(|g| g.ranks.iter())
        .filter(|r| seen.insert(r.category.as_str()))
        .map(|r| r.category.clone())
        .collect()
}

/// Distinct values of an optional label list, sorted ascending.
pub fn distinct_labels<F>(games: &[Game], field: F) -> Vec<String>
where
    F: Fn(&Game) -> &Option<Vec<String>>,
{
    games
        .iter()
        .filter_map(|g| field(g).as_deref())
        .flatten()
        .map(String::as_str)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}

/// Memoizes the schema per dataset.
///
/// The cache is keyed on the identity of the `Arc<Dataset>` (pointer
/// equality), not on its contents: handing in the same `Arc` again returns
/// the same `Arc<Schema>`, while any other dataset rebuilds it.
#[derive(Debug, Default)]
pub struct SchemaCache {
    options: RegistryOptions,
    cached: Option<(Arc<Dataset>, Arc<Schema>)>,
}

impl SchemaCache {
    pub fn new(options: RegistryOptions) -> Self {
        SchemaCache {
            options,
            cached: None,
        }
    }

    pub fn options(&self) -> RegistryOptions {
        self.options
    }

    /// Changes the derivation options, dropping any cached schema if they
    /// differ.
    pub fn set_options(&mut self, options: RegistryOptions) {
        if self.options != options {
            self.options = options;
            self.cached = None;
        }
    }

    /// Returns the schema for `dataset`, building it if needed.
    pub fn schema_for(&mut self, dataset: &Arc<Dataset>) -> Arc<Schema> {
        if let Some((cached_dataset, schema)) = &self.cached {
            if Arc::ptr_eq(cached_dataset, dataset) {
                return Arc::clone(schema);
            }
        }

        let schema = Arc::new(jam_schema(dataset.games(), &self.options));
        tracing::debug!(
            games = dataset.len(),
            properties = schema.properties().len(),
            "rebuilt filter schema"
        );
        self.cached = Some((Arc::clone(dataset), Arc::clone(&schema)));
        schema
    }
}
