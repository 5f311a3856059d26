//! End-to-end filtering over game-jam datasets.

use jamdex_seeker::{
    apply, jam_schema, parse_token, to_token, Dataset, Game, Location, Query, RegistryOptions,
    Schema, Seekable, SelectionEntry,
};

const JAM: &str = r#"[
    {
        "gameUrl": "https://a.itch.io/tower",
        "name": "Tower of Loops",
        "coverUrl": "https://img.itch.zone/tower.png",
        "authors": [{"url": "https://a.itch.io", "name": "A"}],
        "ratingsCount": 52,
        "ranks": [
            {"category": "Overall", "place": 2, "score": 4.6, "rawScore": 4.6},
            {"category": "Fun", "place": 14, "score": 4.1, "rawScore": 4.2}
        ],
        "genres": ["Puzzle"],
        "tags": ["2D"],
        "platforms": "HTML5"
    },
    {
        "gameUrl": "https://b.itch.io/drift",
        "name": "Drift",
        "coverUrl": "https://img.itch.zone/drift.gif",
        "authors": [
            {"url": "https://b.itch.io", "name": "B"},
            {"url": "https://c.itch.io", "name": "C"}
        ],
        "ratingsCount": 20,
        "ranks": [
            {"category": "Overall", "place": 31, "score": 3.9, "rawScore": 3.9},
            {"category": "Audio", "place": 4, "score": 4.4, "rawScore": 4.4}
        ],
        "genres": [],
        "platforms": "Windows, HTML5",
        "madeWith": "Godot"
    },
    {
        "gameUrl": "https://d.itch.io/seed",
        "name": "Seedling",
        "ratingsCount": 7,
        "ranks": [
            {"category": "Fun", "place": 9, "score": 4.3, "rawScore": 4.0}
        ]
    }
]"#;

fn dataset() -> Dataset {
    Dataset::from_json(JAM).unwrap()
}

fn schema(dataset: &Dataset) -> Schema {
    jam_schema(dataset.games(), &RegistryOptions::default())
}

fn names(games: &[&Game]) -> Vec<String> {
    games.iter().map(|g| g.name.clone()).collect()
}

fn run(selections: &[SelectionEntry]) -> Vec<String> {
    let dataset = dataset();
    let schema = schema(&dataset);
    names(&apply(dataset.games(), &schema, selections))
}

fn entry(path: &[&str], op: &str, value: &str) -> SelectionEntry {
    SelectionEntry::new(path.iter().copied())
        .with_operator(op)
        .with_value(value)
}

#[test]
fn genres_contains_and_empty() {
    assert_eq!(run(&[entry(&["genres"], "contains", "Puzzle")]), vec!["Tower of Loops"]);
    assert_eq!(
        run(&[entry(&["genres"], "empty", "Puzzle")]),
        vec!["Drift", "Seedling"]
    );
    assert_eq!(
        run(&[entry(&["genres"], "not empty", "Puzzle")]),
        vec!["Tower of Loops"]
    );
}

#[test]
fn overall_top_ten_excludes_unranked() {
    assert_eq!(
        run(&[entry(&["ranks", "Overall", "place"], "<=", "10")]),
        vec!["Tower of Loops"]
    );
    // Seedling has no Overall rank and fails every comparison
    assert_eq!(
        run(&[entry(&["ranks", "Overall", "place"], ">", "0")]),
        vec!["Tower of Loops", "Drift"]
    );
}

#[test]
fn unknown_category_matches_everything() {
    assert_eq!(run(&[entry(&["ranks", "Graphics", "place"], "<=", "10")]).len(), 3);
    assert_eq!(run(&[entry(&["ranks", "Overall"], "<=", "10")]).len(), 3);
}

#[test]
fn cover_classes() {
    let by_cover = |label: &str| run(&[entry(&["coverUrl"], "contains", label)]);
    assert_eq!(by_cover("image"), vec!["Tower of Loops"]);
    assert_eq!(by_cover("gif"), vec!["Drift"]);
    assert_eq!(by_cover("missing"), vec!["Seedling"]);
    assert_eq!(
        run(&[entry(&["coverUrl"], "empty", "missing")]),
        vec!["Seedling"]
    );
}

#[test]
fn counts_and_text() {
    assert_eq!(run(&[entry(&["authorsCount"], ">=", "2")]), vec!["Drift"]);
    assert_eq!(run(&[entry(&["votesCount"], "<", "20")]), vec!["Seedling"]);
    assert_eq!(run(&[entry(&["name"], "contains", "LOOP")]), vec!["Tower of Loops"]);
    assert_eq!(
        run(&[entry(&["name"], "does not contain", "loop")]),
        vec!["Drift", "Seedling"]
    );
    assert_eq!(run(&[entry(&["name"], "matches", "^(drift|seed)")]), vec!["Drift", "Seedling"]);
}

#[test]
fn comma_separated_platforms_are_labels() {
    assert_eq!(
        run(&[entry(&["platforms"], "contains", "HTML5")]),
        vec!["Tower of Loops", "Drift"]
    );
    assert_eq!(run(&[entry(&["madeWith"], "contains", "Godot")]), vec!["Drift"]);
}

#[test]
fn incomplete_rows_are_identity() {
    let all = vec!["Tower of Loops", "Drift", "Seedling"];
    assert_eq!(run(&[]), all);
    assert_eq!(run(&[SelectionEntry::default(), SelectionEntry::default()]), all);
    assert_eq!(run(&[SelectionEntry::new(["votesCount"]).with_operator(">")]), all);
    assert_eq!(run(&[entry(&["votesCount"], ">", "NaN")]), all);
    assert_eq!(run(&[entry(&["tags"], "contains", "")]), all);
    assert_eq!(run(&[entry(&["name"], "~=", "x")]), all);
}

#[test]
fn presence_rows_without_a_label_are_identity() {
    let all = vec!["Tower of Loops", "Drift", "Seedling"];
    for op in ["empty", "not empty"] {
        assert_eq!(run(&[SelectionEntry::new(["genres"]).with_operator(op)]), all);
        assert_eq!(run(&[entry(&["genres"], op, "")]), all);
    }

    let token = r#"[{"path":["genres"],"operator":"empty","value":null}]"#;
    assert_eq!(run(&parse_token(Some(token))), all);
}

#[test]
fn selections_are_conjunctive_and_order_free() {
    let a = entry(&["platforms"], "contains", "HTML5");
    let b = entry(&["votesCount"], "<=", "30");
    assert_eq!(run(&[a.clone(), b.clone()]), vec!["Drift"]);
    assert_eq!(run(&[b, a]), vec!["Drift"]);
}

#[test]
fn shared_link_reproduces_results() {
    let selections = vec![
        entry(&["ranks", "Fun", "place"], "<", "20"),
        entry(&["coverUrl"], "not empty", "image"),
    ];
    let query = Location::default()
        .with_filters(selections.clone())
        .to_query()
        .unwrap();

    let restored = Location::from_query(&query);
    assert_eq!(restored.page, 1);
    assert_eq!(run(&restored.filters), run(&selections));
    assert_eq!(run(&restored.filters), vec!["Tower of Loops"]);
}

#[test]
fn legacy_token_still_filters() {
    let token = r#"[{"propertyName":"ranks","propertyName2":"Overall","propertyName3":"place","operator":"<=","value":"10"}]"#;
    assert_eq!(run(&parse_token(Some(token))), vec!["Tower of Loops"]);

    let canonical = to_token(&parse_token(Some(token))).unwrap();
    assert!(canonical.contains(r#""path":["ranks","Overall","place"]"#));
}

#[test]
fn query_reuse_across_calls() {
    let dataset = dataset();
    let schema = schema(&dataset);
    let query = Query::compile(&schema, &[entry(&["ranks", "Fun", "score"], ">", "4.2")]);

    assert_eq!(query.count(dataset.games(), Game::accessor), 1);
    assert_eq!(
        query.find(dataset.games(), Game::accessor).map(|g| g.name.as_str()),
        Some("Seedling")
    );
}

#[test]
fn schema_contract_serializes() {
    let dataset = dataset();
    let json = serde_json::to_value(schema(&dataset)).unwrap();

    assert_eq!(json[0]["name"], "name");
    assert_eq!(json[0]["type"], "text");
    assert_eq!(json[1]["type"], "nested");
    assert_eq!(json[1]["children"][0]["name"], "Overall");
    assert_eq!(json[1]["children"][1]["name"], "Fun");
    assert_eq!(json[1]["children"][2]["name"], "Audio");
    assert_eq!(json[1]["children"][0]["children"][0]["input"]["min"], 1.0);
    assert_eq!(json[2]["values"], serde_json::json!(["image", "gif", "missing"]));
    assert_eq!(json[3]["operators"][0], "==");
    assert_eq!(json[5]["values"], serde_json::json!(["Puzzle"]));
    assert_eq!(json[7]["values"], serde_json::json!(["HTML5", "Windows"]));
}
