//! Command handlers.
//!
//! Each handler builds its view and returns the rendered output; printing
//! is left to the caller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use jamdex_seeker::{parse_token, Dataset, Game, Location, Query, Schema, SchemaCache, Seekable};
use serde::Serialize;

use crate::cli::{Cli, Command, DataArgs, ListArgs, StateArgs};
use crate::config::Config;
use crate::output::{serialize_structured, OutputMode, TextMode};
use crate::paging::{clamp_page, page_count, page_slice, page_window};
use crate::render;
use crate::views::{filter_summary, schema_rows, GameRow, LinkView, ListView};

/// Resolved settings and loaded state for one invocation.
pub struct Session {
    config: Config,
    mode: OutputMode,
    cache: SchemaCache,
    dataset: Option<(PathBuf, Arc<Dataset>)>,
}

impl Session {
    pub fn new(config: Config, mode: Option<OutputMode>) -> Self {
        let mode = mode.unwrap_or(config.output);
        let cache = SchemaCache::new(config.registry_options());
        Session {
            config,
            mode,
            cache,
            dataset: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Loads the dataset named by `args` or the config, once per path.
    pub fn dataset(&mut self, args: &DataArgs) -> Result<Arc<Dataset>> {
        let Some(path) = args.data.as_ref().or(self.config.dataset.as_ref()) else {
            bail!("no dataset given; pass --data, set JAMDEX_DATA, or set `dataset` in jamdex.yaml");
        };

        if let Some((loaded, dataset)) = &self.dataset {
            if loaded == path {
                return Ok(Arc::clone(dataset));
            }
        }
        let dataset = Arc::new(Dataset::load(path)?);
        self.dataset = Some((path.clone(), Arc::clone(&dataset)));
        Ok(dataset)
    }

    pub fn schema(&mut self, dataset: &Arc<Dataset>) -> Arc<Schema> {
        self.cache.schema_for(dataset)
    }

    /// Renders `view` as text, or serializes it; CSV gets `rows` instead.
    fn emit<V: Serialize, R: Serialize>(
        &self,
        view: &V,
        rows: &R,
        text: impl FnOnce(TextMode) -> String,
    ) -> Result<String> {
        match self.mode.to_text_mode() {
            Some(mode) => Ok(text(mode)),
            None if self.mode == OutputMode::Csv => Ok(serialize_structured(rows, self.mode)?),
            None => Ok(serialize_structured(view, self.mode)?),
        }
    }
}

/// Runs the parsed command line and returns what to print.
pub fn run(cli: Cli, dir: &Path) -> Result<String> {
    let config = Config::discover(cli.config.as_deref(), dir)?;
    let mut session = Session::new(config, cli.output);

    match &cli.command {
        Command::Schema(args) => schema(&mut session, args),
        Command::List(args) => list(&mut session, args),
        Command::Link(args) => link(&session, args),
    }
}

pub fn schema(session: &mut Session, args: &DataArgs) -> Result<String> {
    let dataset = session.dataset(args)?;
    let schema = session.schema(&dataset);
    let rows = schema_rows(&schema);
    session.emit(&*schema, &rows, |mode| render::schema(&rows, mode))
}

pub fn list(session: &mut Session, args: &ListArgs) -> Result<String> {
    let dataset = session.dataset(&args.data)?;
    let schema = session.schema(&dataset);
    let mut location = location(&args.state);

    let query = Query::compile(&schema, &location.filters);
    let matched = query.filter(dataset.games(), Game::accessor);

    let per_page = args
        .per_page
        .map(|n| n.get())
        .unwrap_or(session.config().per_page);
    let total_pages = page_count(matched.len(), per_page);
    let page = clamp_page(location.page, total_pages);
    if page != location.page {
        tracing::info!(requested = location.page, page, "page out of range");
    }
    location.page = page;

    let offset = (page - 1) * per_page;
    let items = page_slice(&matched, page, per_page)
        .iter()
        .enumerate()
        .map(|(i, game)| GameRow::new(offset + i + 1, game))
        .collect();

    let view = ListView {
        items,
        total_count: matched.len(),
        dataset_count: dataset.len(),
        filter_summary: filter_summary(&schema, &location.filters),
        page,
        total_pages,
        pages: page_window(page, total_pages),
        link: location.to_query().context("failed to encode filters")?,
    };

    session.emit(&view, &view.items, |mode| render::list(&view, mode))
}

pub fn link(session: &Session, args: &StateArgs) -> Result<String> {
    let view = LinkView::new(&location(args)).context("failed to encode filters")?;
    session.emit(&view, &view, |_| render::link(&view))
}

/// Builds the filter state from `--location`, then `--filters` and `--page`.
///
/// New filters start again from page 1 unless a page is also given.
pub fn location(args: &StateArgs) -> Location {
    let mut location = args
        .location
        .as_deref()
        .map(Location::from_query)
        .unwrap_or_default();
    if let Some(token) = &args.filters {
        location = location.with_filters(parse_token(Some(token)));
    }
    if let Some(page) = args.page {
        location = location.with_page(page);
    }
    location
}
