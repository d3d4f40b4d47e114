//! sc-voice check - Validate the catalog and report statistics

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::catalog::{AudioRef, CategoryCount};
use crate::cli::output::{HumanLayout, OutputFormat, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Fail when some clips cannot be delivered (asset paths without media.base_url)
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Serialize)]
struct CheckReport {
    catalog: String,
    clips: usize,
    tokens: usize,
    missing_uk: usize,
    undeliverable: usize,
    categories: Vec<CategoryCount>,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<()> {
    let base_url = ctx.config.media.parsed_base_url()?;
    let catalog = ctx.handler.catalog();

    let report = CheckReport {
        catalog: ctx.catalog_path.display().to_string(),
        clips: catalog.len(),
        tokens: ctx.handler.index().token_count(),
        missing_uk: catalog.iter().filter(|c| c.label_uk.is_empty()).count(),
        undeliverable: catalog
            .iter()
            .filter(|c| {
                !matches!(c.audio, AudioRef::FileId(_))
                    && c.audio.resolve_url(base_url.as_ref()).is_none()
            })
            .count(),
        categories: catalog.stats(),
    };

    match ctx.output_format {
        OutputFormat::Json => emit_robot(&robot_ok(&report))?,
        OutputFormat::Human => {
            let mut layout = HumanLayout::new();
            layout
                .title("Catalog OK")
                .kv("catalog", &report.catalog)
                .kv("clips", &report.clips.to_string())
                .kv("tokens", &report.tokens.to_string())
                .kv("missing uk", &report.missing_uk.to_string())
                .kv("undeliverable", &report.undeliverable.to_string())
                .blank()
                .section("Categories");
            for entry in &report.categories {
                layout.bullet(&format!("{}: {}", entry.category, entry.count));
            }
            println!("{}", layout.build());
        }
    }

    if args.strict && report.undeliverable > 0 {
        return Err(crate::error::VoiceError::Config(format!(
            "{} clip(s) use asset paths but media.base_url is not set",
            report.undeliverable
        )));
    }
    Ok(())
}
