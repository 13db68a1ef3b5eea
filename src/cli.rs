use crate::config::{RowPolicy, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::LayoutDump;
use crate::parser::parse_story;
use crate::story::{Story, sample_story};
use crate::{LayoutOptions, story_graph};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "chlayout", version, about = "Grid layout for branching story chapters")]
pub struct Args {
    /// Story file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "sample")]
    pub input: Option<PathBuf>,

    /// Lay out a generated story with this many episodes instead of reading input
    #[arg(long = "sample")]
    pub sample: Option<usize>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (row policy and grid cell sizes)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Only lay out the named chapter
    #[arg(long = "chapter")]
    pub chapter: Option<String>,

    /// Start from this episode instead of the story or chapter root
    #[arg(long = "root")]
    pub root: Option<String>,

    /// Row counter behaviour between layers: reset or carry
    #[arg(long = "rowPolicy", value_parser = parse_row_policy)]
    pub row_policy: Option<RowPolicy>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Text,
}

fn parse_row_policy(token: &str) -> std::result::Result<RowPolicy, String> {
    RowPolicy::from_token(token).ok_or_else(|| format!("unknown row policy `{token}`"))
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let output = render(&args)?;
    write_output(&output, args.output.as_deref())
}

fn render(args: &Args) -> Result<String> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(policy) = args.row_policy {
        config.layout.row_policy = policy;
    }

    let story = load_story(args)?;
    let options = LayoutOptions {
        layout: config.layout,
        chapter: args.chapter.clone(),
        root: args.root.clone(),
    };
    let (graph, root) = story_graph(&story, &options)?;
    tracing::debug!(episodes = graph.len(), root = %root, "story loaded");

    let layout = compute_layout(&graph, &root, &options.layout)?;
    let dump = LayoutDump::from_layout(&layout, &graph, &options.layout.grid);
    match args.output_format {
        OutputFormat::Json => dump.to_json(),
        OutputFormat::Text => Ok(dump.to_text()),
    }
}

fn load_story(args: &Args) -> Result<Story> {
    if let Some(count) = args.sample {
        return Ok(sample_story(count));
    }
    let input = read_input(args.input.as_deref())?;
    Ok(parse_story(&input)?)
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return Ok(std::fs::read_to_string(path)?);
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, output)?,
        None => print!("{output}"),
    }
    Ok(())
}
