//! Serializable results of the commands.
//!
//! Each command builds one of these; the text renderer and the structured
//! serializers both read from it.

use jamdex_seeker::{Game, Location, Property, PropertyKind, Schema, SelectionEntry};
use serde::Serialize;

use crate::paging::PageLink;

/// One game in a results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameRow {
    /// 1-based position among all matching games.
    pub position: usize,
    pub name: String,
    pub url: String,
    pub authors: String,
    pub votes: u64,
    pub cover: &'static str,
    /// Rank summary, e.g. `Overall #2, Fun #14`.
    pub ranks: String,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
}

impl GameRow {
    pub fn new(position: usize, game: &Game) -> Self {
        GameRow {
            position,
            name: game.name.clone(),
            url: game.game_url.clone(),
            authors: game.author_names(),
            votes: game.ratings_count,
            cover: game.cover_kind().as_str(),
            ranks: game
                .ranks
                .iter()
                .map(|r| format!("{} #{}", r.category, r.place))
                .collect::<Vec<_>>()
                .join(", "),
            genres: game.genres.clone().unwrap_or_default(),
            tags: game.tags.clone().unwrap_or_default(),
        }
    }
}

/// One page of filtered results.
#[derive(Debug, Clone, Serialize)]
pub struct ListView {
    pub items: Vec<GameRow>,
    /// Games matching the filters, across all pages.
    pub total_count: usize,
    /// Games in the dataset.
    pub dataset_count: usize,
    /// The filters that constrained the result, if any did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_summary: Option<String>,
    pub page: usize,
    pub total_pages: usize,
    pub pages: Vec<PageLink>,
    /// Query string reproducing this view.
    pub link: String,
}

impl ListView {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positions of the first and last row on this page.
    pub fn range(&self) -> Option<(usize, usize)> {
        Some((self.items.first()?.position, self.items.last()?.position))
    }
}

/// Summarizes the entries that compile to a constraint.
pub fn filter_summary(schema: &Schema, selections: &[SelectionEntry]) -> Option<String> {
    let active: Vec<String> = selections
        .iter()
        .filter(|entry| schema.compile(entry).is_some())
        .map(ToString::to_string)
        .collect();
    (!active.is_empty()).then(|| active.join(" and "))
}

/// One schema node, flattened for tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaRow {
    /// Dot-joined path from the top level.
    pub path: String,
    #[serde(skip)]
    pub depth: usize,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub operators: Vec<&'static str>,
    pub values: Vec<String>,
    /// Advisory numeric input, e.g. `min 1, step 1`.
    pub input: String,
}

/// Flattens the schema depth-first, parents before children.
pub fn schema_rows(schema: &Schema) -> Vec<SchemaRow> {
    let mut rows = Vec::new();
    for property in schema.properties() {
        push_rows(&mut rows, property, &[]);
    }
    rows
}

fn push_rows(rows: &mut Vec<SchemaRow>, property: &Property, parents: &[&str]) {
    let mut path: Vec<&str> = parents.to_vec();
    path.push(&property.name);

    let (values, input) = match &property.kind {
        PropertyKind::Enumerated { values, .. } => (values.clone(), String::new()),
        PropertyKind::Numeric { input } => {
            let parts: Vec<String> = [("min", input.min), ("max", input.max), ("step", input.step)]
                .into_iter()
                .filter_map(|(key, v)| v.map(|v| format!("{key} {v}")))
                .collect();
            (Vec::new(), parts.join(", "))
        }
        _ => (Vec::new(), String::new()),
    };

    rows.push(SchemaRow {
        path: path.join("."),
        depth: parents.len(),
        name: property.name.clone(),
        label: property.label.clone(),
        kind: property.kind.type_name(),
        operators: property.operators().iter().map(|op| op.as_str()).collect(),
        values,
        input,
    });

    if let PropertyKind::Nested { children } = &property.kind {
        for child in children {
            push_rows(rows, child, &path);
        }
    }
}

/// A canonical, shareable filter state.
#[derive(Debug, Clone, Serialize)]
pub struct LinkView {
    pub query: String,
    pub filters: Vec<SelectionEntry>,
    pub page: usize,
}

impl LinkView {
    pub fn new(location: &Location) -> jamdex_seeker::Result<Self> {
        Ok(LinkView {
            query: location.to_query()?,
            filters: location.filters.clone(),
            page: location.page,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jamdex_seeker::{InputProps, Rank};

    fn schema() -> Schema {
        Schema::new(vec![
            Property::text("name", "Name"),
            Property::nested(
                "ranks",
                "Ranks",
                vec![Property::nested(
                    "Overall",
                    "Overall",
                    vec![Property::numeric(
                        "place",
                        "Place",
                        InputProps {
                            min: Some(1.0),
                            step: Some(1.0),
                            ..InputProps::default()
                        },
                    )],
                )],
            ),
            Property::enumerated("genres", "Genres", vec!["Puzzle".into()]),
        ])
    }

    #[test]
    fn schema_rows_are_depth_first() {
        let rows = schema_rows(&schema());
        let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["name", "ranks", "ranks.Overall", "ranks.Overall.place", "genres"]
        );

        let place = &rows[3];
        assert_eq!(place.depth, 2);
        assert_eq!(place.kind, "numeric");
        assert_eq!(place.input, "min 1, step 1");
        assert_eq!(place.operators, vec!["==", "!=", "<", "<=", ">", ">="]);
        assert!(rows[1].operators.is_empty());
        assert_eq!(rows[4].values, vec!["Puzzle"]);
    }

    #[test]
    fn summary_lists_only_active_filters() {
        let schema = schema();
        let selections = vec![
            SelectionEntry::new(["name"]).with_operator("contains").with_value("loop"),
            SelectionEntry::new(["genres"]).with_operator("contains"),
            SelectionEntry::new(["ranks", "Overall", "place"])
                .with_operator("<=")
                .with_value(10.0),
        ];
        assert_eq!(
            filter_summary(&schema, &selections).as_deref(),
            Some(r#"name contains "loop" and ranks.Overall.place <= 10"#)
        );
        assert_eq!(filter_summary(&schema, &selections[1..2]), None);
    }

    #[test]
    fn game_row_summarizes_game() {
        let game = Game {
            game_url: "https://a.itch.io/t".into(),
            submission_url: String::new(),
            cover_url: Some("https://img/t.gif".into()),
            name: "Tower".into(),
            authors: Vec::new(),
            ratings_count: 12,
            ranks: vec![
                Rank {
                    category: "Overall".into(),
                    place: 2,
                    score: 4.5,
                    raw_score: 4.5,
                },
                Rank {
                    category: "Fun".into(),
                    place: 14,
                    score: 4.0,
                    raw_score: 4.0,
                },
            ],
            platforms: None,
            genres: None,
            made_with: None,
            tags: Some(vec!["2D".into()]),
        };

        let row = GameRow::new(7, &game);
        assert_eq!(row.position, 7);
        assert_eq!(row.cover, "gif");
        assert_eq!(row.ranks, "Overall #2, Fun #14");
        assert!(row.genres.is_empty());
        assert_eq!(row.tags, vec!["2D"]);
    }
}
