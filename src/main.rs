use std::path::PathBuf;

use anyhow::{Context, anyhow};
use clap::Parser;

use forcemap::app::ForceMapApp;
use forcemap::data::GraphData;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON graph dataset; the built-in concept demo is used when omitted.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Seed for the scattered starting layout.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let data = match &args.graph {
        Some(path) => GraphData::load(path)
            .with_context(|| format!("could not load graph from {}", path.display()))?,
        None => GraphData::concept_demo(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 820.0]),
        ..Default::default()
    };

    eframe::run_native(
        "forcemap",
        options,
        Box::new(move |cc| Ok(Box::new(ForceMapApp::new(cc, data, args.seed)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
