use std::env;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use log::info;

use bimatch::{DinicEngine, InstanceLoader, MatchingWriter, NetworkBuilder};

const DEFAULT_INPUT: &str = "program3data.txt";

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();
}

fn parse_args() -> Result<PathBuf> {
    let mut args = env::args().skip(1);
    let input = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    if let Some(extra) = args.next() {
        anyhow::bail!("Unexpected extra argument: {extra}");
    }
    Ok(PathBuf::from(input))
}

fn run() -> Result<()> {
    let path = parse_args()?;
    let instance = InstanceLoader::from_path(&path)
        .with_context(|| format!("load matching instance from {:?}", path))?;
    info!(
        "Instance {:?}: {} nodes, {} edges",
        path,
        instance.node_count(),
        instance.edge_count()
    );

    let network = NetworkBuilder::build(&instance);
    let summary = DinicEngine::new(network).execute();
    info!(
        "Matched {} pairs in {} phases ({} augmenting paths, {:?})",
        summary.matching.len(),
        summary.stats.phases,
        summary.stats.augmented_paths,
        summary.stats.duration
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    MatchingWriter::write(&summary.network, &summary.matching, &mut out)?;
    out.flush().context("flush stdout")?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
