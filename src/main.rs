use anyhow::{Context, Result};
use clap::{App, Arg};
use sitefeed::config::Config;
use sitefeed::graph::MarkdownGraph;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = App::new("sitefeed")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates Atom, RSS and JSON feeds for a static site")
        .arg(
            Arg::with_name("project")
                .short("p")
                .long("project")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory in which to start looking for sitefeed.yaml"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .long("output")
                .value_name("DIR")
                .takes_value(true)
                .help("Directory to write the feeds into (overrides the project file)"),
        )
        .get_matches();

    let project_dir = match matches.value_of("project") {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir().context("getting the current directory")?,
    };
    let config = Config::from_directory(&project_dir).context("loading configuration")?;
    let output_directory = matches
        .value_of("output")
        .map(Path::new)
        .unwrap_or(&config.output_directory);

    let graph = MarkdownGraph::load(config.site.clone(), &config.content_directory)
        .context("loading content")?;
    sitefeed::on_post_build(&graph, &config.plugin_options, output_directory)
        .context("generating feeds")?;
    Ok(())
}
