//! Text rendering for the terminal.

use console::{Style, StyledObject};

use crate::output::TextMode;
use crate::paging::PageLink;
use crate::views::{LinkView, ListView, SchemaRow};

/// Styles for one render pass; plain mode leaves every string as is.
struct Palette {
    mode: TextMode,
}

impl Palette {
    fn new(mode: TextMode) -> Self {
        Palette { mode }
    }

    fn paint<D>(&self, style: Style, text: D) -> StyledObject<D> {
        let style = match self.mode {
            TextMode::Styled => style.force_styling(true),
            TextMode::Plain => Style::new().force_styling(false),
        };
        style.apply_to(text)
    }

    fn title<D>(&self, text: D) -> StyledObject<D> {
        self.paint(Style::new().bold(), text)
    }

    fn accent<D>(&self, text: D) -> StyledObject<D> {
        self.paint(Style::new().cyan(), text)
    }

    fn muted<D>(&self, text: D) -> StyledObject<D> {
        self.paint(Style::new().dim(), text)
    }

    fn current<D>(&self, text: D) -> StyledObject<D> {
        self.paint(Style::new().bold().reverse(), text)
    }
}

/// Renders the schema as an indented tree.
pub fn schema(rows: &[SchemaRow], mode: TextMode) -> String {
    let palette = Palette::new(mode);
    let mut out = String::new();

    for row in rows {
        let indent = "  ".repeat(row.depth);
        out.push_str(&format!(
            "{indent}{} {} {}",
            palette.title(&row.name),
            palette.muted(format!("[{}]", row.kind)),
            row.label
        ));
        if !row.input.is_empty() {
            out.push_str(&format!(" ({})", row.input));
        }
        out.push('\n');

        let detail_indent = "  ".repeat(row.depth + 2);
        if !row.operators.is_empty() {
            out.push_str(&format!(
                "{detail_indent}{} {}\n",
                palette.muted("operators:"),
                row.operators.join(" | ")
            ));
        }
        if !row.values.is_empty() {
            out.push_str(&format!(
                "{detail_indent}{} {}\n",
                palette.muted("values:"),
                row.values.join(", ")
            ));
        }
    }
    out
}

/// Renders one page of results followed by the pager line.
pub fn list(view: &ListView, mode: TextMode) -> String {
    let palette = Palette::new(mode);
    let mut out = String::new();

    match view.range() {
        Some((first, last)) => out.push_str(&format!(
            "Showing {first}-{last} of {} games",
            view.total_count
        )),
        None if view.total_count == 0 => out.push_str("No games match"),
        None => out.push_str(&format!("Page {} is empty", view.page)),
    }
    if view.total_count != view.dataset_count {
        out.push_str(&format!(" ({} in dataset)", view.dataset_count));
    }
    out.push('\n');
    if let Some(summary) = &view.filter_summary {
        out.push_str(&format!("{} {summary}\n", palette.muted("filtered by:")));
    }

    for row in &view.items {
        out.push('\n');
        out.push_str(&format!(
            "{:>4}. {}",
            row.position,
            palette.title(&row.name)
        ));
        if !row.authors.is_empty() {
            out.push_str(&format!(" by {}", row.authors));
        }
        out.push('\n');

        let mut facts = vec![format!("{} votes", row.votes)];
        if !row.ranks.is_empty() {
            facts.push(palette.accent(&row.ranks).to_string());
        }
        if !row.genres.is_empty() {
            facts.push(row.genres.join(", "));
        }
        out.push_str(&format!("      {}\n", facts.join(" · ")));
        out.push_str(&format!("      {}\n", palette.muted(&row.url)));
    }

    if !view.pages.is_empty() {
        out.push('\n');
        out.push_str(&pager(&view.pages, view.page, &palette));
        out.push('\n');
    }
    out
}

fn pager(pages: &[PageLink], current: usize, palette: &Palette) -> String {
    let slots: Vec<String> = pages
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == current => palette.current(format!("[{n}]")).to_string(),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect();
    format!("Page: {}", slots.join(" "))
}

/// Renders a link as its bare query string.
pub fn link(view: &LinkView) -> String {
    format!("?{}\n", view.query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::GameRow;

    fn row(position: usize, name: &str) -> GameRow {
        GameRow {
            position,
            name: name.into(),
            url: format!("https://itch.io/{position}"),
            authors: "A, B".into(),
            votes: 10,
            cover: "image",
            ranks: "Overall #3".into(),
            genres: vec!["Puzzle".into()],
            tags: Vec::new(),
        }
    }

    fn view(items: Vec<GameRow>, total_count: usize) -> ListView {
        ListView {
            items,
            total_count,
            dataset_count: 50,
            filter_summary: Some("votesCount > 5".into()),
            page: 2,
            total_pages: 3,
            pages: vec![PageLink::Page(1), PageLink::Page(2), PageLink::Page(3)],
            link: "page=2".into(),
        }
    }

    #[test]
    fn plain_list() {
        let out = list(&view(vec![row(21, "Tower"), row(22, "Drift")], 45), TextMode::Plain);

        assert!(out.starts_with("Showing 21-22 of 45 games (50 in dataset)\n"));
        assert!(out.contains("filtered by: votesCount > 5\n"));
        assert!(out.contains("  21. Tower by A, B\n"));
        assert!(out.contains("      10 votes · Overall #3 · Puzzle\n"));
        assert!(out.contains("      https://itch.io/22\n"));
        assert!(out.ends_with("Page: 1 [2] 3\n"));
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn styled_list_has_escapes() {
        let out = list(&view(vec![row(1, "Tower")], 45), TextMode::Styled);
        assert!(out.contains('\u{1b}'));
    }

    #[test]
    fn empty_results() {
        let mut empty = view(Vec::new(), 0);
        empty.pages.clear();
        let out = list(&empty, TextMode::Plain);
        assert!(out.starts_with("No games match (50 in dataset)\n"));
        assert!(!out.contains("Page:"));
    }

    #[test]
    fn ellipsis_in_pager() {
        let palette = Palette::new(TextMode::Plain);
        let pages = crate::paging::page_window(1, 9);
        assert_eq!(pager(&pages, 1, &palette), "Page: [1] 2 3 4 … 9");
    }

    #[test]
    fn schema_tree() {
        let rows = vec![
            SchemaRow {
                path: "ranks".into(),
                depth: 0,
                name: "ranks".into(),
                label: "Ranks".into(),
                kind: "nested",
                operators: Vec::new(),
                values: Vec::new(),
                input: String::new(),
            },
            SchemaRow {
                path: "ranks.Overall.place".into(),
                depth: 2,
                name: "place".into(),
                label: "Place".into(),
                kind: "numeric",
                operators: vec!["==", "<"],
                values: Vec::new(),
                input: "min 1".into(),
            },
        ];
        let out = schema(&rows, TextMode::Plain);
        assert_eq!(
            out,
            "ranks [nested] Ranks\n    place [numeric] Place (min 1)\n        operators: == | <\n"
        );
    }
}
