//! Scene runner behind the `ace-layout-harness` binary.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use ace_layout::{GeometryDump, Scene};
use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ace-layout-harness", about = "Lay out a JSON scene and print node geometry")]
pub struct Args {
    /// Scene file: `{ "viewport": {..}, "root": {..} }`.
    pub scene: PathBuf,

    /// Run the layout pass a second time and fail if any geometry changes.
    #[arg(long)]
    pub twice: bool,

    /// Print compact JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Load, build and lay out the scene at `args.scene`.
pub fn run(args: &Args) -> Result<GeometryDump> {
    let file = File::open(&args.scene)
        .with_context(|| format!("opening scene {}", args.scene.display()))?;
    let scene = Scene::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing scene {}", args.scene.display()))?;
    let (mut tree, root) = scene.build().context("building render tree")?;

    tree.perform_layout(root, scene.viewport);
    let dump = tree.dump(root);

    if args.twice {
        tree.perform_layout(root, scene.viewport);
        let again = tree.dump(root);
        if again != dump {
            anyhow::bail!("second layout pass changed the geometry");
        }
    }

    tracing::info!(nodes = dump.nodes.len(), "scene laid out");
    Ok(dump)
}

/// Render a dump as JSON text.
pub fn render(dump: &GeometryDump, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(dump)?
    } else {
        serde_json::to_string_pretty(dump)?
    };
    Ok(text)
}
