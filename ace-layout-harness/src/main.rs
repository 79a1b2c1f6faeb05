use ace_layout_harness::{Args, render, run};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let dump = run(&args)?;
    println!("{}", render(&dump, args.compact)?);
    Ok(())
}
