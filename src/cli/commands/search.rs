//! sc-voice search - Query the catalog like an inline query would

use clap::Args;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, OutputFormat, emit_robot, robot_ok};
use crate::error::Result;
use crate::search::{QueryHandler, SearchHit};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query (English or Ukrainian); may be empty
    #[arg(default_value = "")]
    pub query: String,

    /// Maximum number of results (defaults to search.limit)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    query: &'a str,
    count: usize,
    results: Vec<SearchHit<'a>>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let hits = search_with_limit(&ctx.handler, &args.query, args.limit);
    debug!(target: "search", query = %args.query, count = hits.len(), "search command");

    match ctx.output_format {
        OutputFormat::Json => emit_robot(&robot_ok(SearchOutput {
            query: &args.query,
            count: hits.len(),
            results: hits,
        })),
        OutputFormat::Human => {
            println!("{}", render_human(&args.query, &hits));
            Ok(())
        }
    }
}

fn search_with_limit<'a>(
    handler: &'a QueryHandler,
    query: &str,
    limit: Option<usize>,
) -> Vec<SearchHit<'a>> {
    let mut hits = handler.search(query);
    if let Some(limit) = limit {
        hits.truncate(limit);
    }
    hits
}

fn render_human(query: &str, hits: &[SearchHit<'_>]) -> String {
    let mut layout = HumanLayout::new();
    if hits.is_empty() {
        layout.push_line(format!("No clips match {query:?}"));
        return layout.build();
    }

    layout.title(&format!("{} clip(s) for {query:?}", hits.len()));
    for (rank, hit) in hits.iter().enumerate() {
        let record = hit.record;
        layout.push_line(format!(
            "{:>3}. {}  [score {}]",
            rank + 1,
            record.id,
            hit.score
        ));
        if !record.label_en.is_empty() {
            layout.kv("     en", &record.label_en);
        }
        if !record.label_uk.is_empty() {
            layout.kv("     uk", &record.label_uk);
        }
        if !record.tags.is_empty() {
            layout.kv("     tags", &record.tags.join(", "));
        }
    }
    layout.build()
}
