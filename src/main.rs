use anyhow::Result;
use clap::{Parser, Subcommand};
use lanegraph::{layout, CommitRecord, Edge, HistoryWalker, LaneIdx, Layout};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "laneview")]
#[command(about = "Lane-based commit graph layout", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the computed lane layout as JSON
    Layout {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to lay out
        #[arg(short, long, default_value = "200")]
        count: usize,
    },
    /// Show layout statistics
    Stats {
        /// Path to the repository
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Number of commits to lay out
        #[arg(short, long, default_value = "200")]
        count: usize,
    },
}

/// One commit row of the JSON document, in feed order.
#[derive(Serialize)]
struct RowDoc {
    id: String,
    lane: LaneIdx,
    parents: Vec<String>,
    author: String,
    timestamp: i64,
    message: String,
}

#[derive(Serialize)]
struct RefDoc {
    name: String,
    target: String,
}

#[derive(Serialize)]
struct LayoutDoc {
    head: Option<String>,
    refs: Vec<RefDoc>,
    rows: Vec<RowDoc>,
    edges: Vec<Edge>,
    lane_count: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Layout { path, count } => print_layout(&path, count),
        Commands::Stats { path, count } => print_stats(&path, count),
    }
}

fn compute(path: &Path, count: usize) -> Result<(HistoryWalker, Vec<CommitRecord>, Layout)> {
    let walker = HistoryWalker::open(Some(path))?;
    let commits = walker.collect(Some(count))?;
    let graph = layout(&commits);
    Ok((walker, commits, graph))
}

fn print_layout(path: &Path, count: usize) -> Result<()> {
    let (walker, commits, graph) = compute(path, count)?;

    let rows = commits
        .iter()
        .map(|c| RowDoc {
            id: c.id.clone(),
            lane: graph.lane_of(&c.id).unwrap_or(0),
            parents: c.parent_ids.to_vec(),
            author: c.author.clone(),
            timestamp: c.timestamp.timestamp(),
            message: c.message.clone(),
        })
        .collect();

    let doc = LayoutDoc {
        head: walker.head()?,
        refs: walker
            .refs()?
            .into_iter()
            .map(|(name, target)| RefDoc { name, target })
            .collect(),
        rows,
        edges: graph.edges,
        lane_count: graph.lane_count,
    };

    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

fn print_stats(path: &Path, count: usize) -> Result<()> {
    let (_walker, commits, graph) = compute(path, count)?;
    let stats = graph.stats(&commits);

    println!("Layout statistics:");
    println!("  Commits:       {}", stats.total_commits);
    println!("  Edges:         {}", stats.total_edges);
    println!("  Merge edges:   {}", stats.merge_edges);
    println!("  Merge commits: {}", stats.merge_commits);
    println!("  Root commits:  {}", stats.root_commits);
    println!("  Lanes:         {}", stats.lane_count);
    println!("  Widest lane:   {}", stats.max_lane);

    Ok(())
}
