//! CLI command implementations.

use crate::config::{self, CliConfig};
use colored::Colorize;
use ecm_core::EcmGraphSnapshot;
use ecm_graph::{Direction, EcmGraph, GraphBuilder, GraphEdge, HighlightMode, NodeId, NodeKind};
use std::fs;
use std::path::Path;
use tracing::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Initialize the config in a directory.
pub fn init(path: &Path, default_snapshot: &Path) -> Result<()> {
    if CliConfig::path(path).exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    let config = CliConfig {
        snapshot: default_snapshot.to_path_buf(),
        ..CliConfig::default()
    };
    let written = config.save(path)?;

    println!("{} Wrote {}", "✓".green(), written.display());
    println!(
        "  Snapshot: {}",
        default_snapshot.display().to_string().cyan()
    );

    Ok(())
}

/// Loads the snapshot and mirrors it into a graph.
fn load(snapshot: Option<&Path>) -> Result<GraphBuilder> {
    let root = std::env::current_dir()?;
    let path = config::resolve_snapshot(snapshot, &root)?;
    let snapshot = EcmGraphSnapshot::load(&path)?;

    let mut builder = GraphBuilder::new();
    builder.add_snapshot(&snapshot);

    info!(
        "Loaded {} ({} nodes, {} edges)",
        path.display(),
        builder.graph().node_count(),
        builder.graph().edge_count()
    );

    Ok(builder)
}

/// Show graph statistics.
pub fn stats(snapshot: Option<&Path>, json_output: bool) -> Result<()> {
    let builder = load(snapshot)?;
    let stats = builder.graph().stats();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "ECM Graph".cyan().bold());
    println!();
    println!("  {} {}", "Nodes:".dimmed(), stats.node_count);
    println!("  {} {}", "Edges:".dimmed(), stats.edge_count);
    println!("  {} {}", "Components:".dimmed(), stats.components);
    println!("  {} {}", "Capabilities:".dimmed(), stats.capabilities);
    println!("  {} {}", "Missing:".dimmed(), stats.missing);

    Ok(())
}

/// List the blood relation of a node.
pub fn blood_path(
    snapshot: Option<&Path>,
    id: &str,
    ancestors_only: bool,
    descendants_only: bool,
    json_output: bool,
) -> Result<()> {
    let builder = load(snapshot)?;
    let graph = builder.graph();

    let (title, related) = if ancestors_only {
        ("Ancestors", graph.path(id, Direction::Ancestors)?)
    } else if descendants_only {
        ("Descendants", graph.path(id, Direction::Descendants)?)
    } else {
        ("Blood relation", graph.blood_path(id)?)
    };

    if json_output {
        let output = serde_json::json!({
            "id": id,
            "nodes": related,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{} of {}: {} nodes", title.cyan().bold(), id, related.len());
    print_nodes(graph, related.iter());

    Ok(())
}

/// List the edges on a node's blood relation.
pub fn edges(snapshot: Option<&Path>, id: &str, json_output: bool) -> Result<()> {
    let builder = load(snapshot)?;
    let edges = builder.graph().blood_path_edges(id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&edges)?);
        return Ok(());
    }

    println!("{} of {}: {} edges", "Blood path edges".cyan().bold(), id, edges.len());
    print_edges(&builder, &edges);

    Ok(())
}

/// List a node's direct parents and children.
pub fn neighbours(snapshot: Option<&Path>, id: &str, json_output: bool) -> Result<()> {
    let builder = load(snapshot)?;
    let near = builder.graph().closest_neighbours(id)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&near)?);
        return Ok(());
    }

    println!(
        "{} of {}: {} nodes",
        "Closest neighbours".cyan().bold(),
        id,
        near.near_nodes.len()
    );
    print_nodes(builder.graph(), near.near_nodes.iter());
    println!();
    print_edges(&builder, &near.near_edges);

    Ok(())
}

/// Show what a hover on `id` highlights.
pub fn highlight(
    snapshot: Option<&Path>,
    id: &str,
    mode: HighlightMode,
    json_output: bool,
) -> Result<()> {
    let builder = load(snapshot)?;
    let highlight = builder.graph().highlight(id, mode)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&highlight)?);
        return Ok(());
    }

    println!("{}", "Hover".yellow().bold());
    println!("Target: {} ({})", id.cyan(), mode);
    println!();

    if highlight.is_empty() {
        println!("  Nothing else is highlighted");
        return Ok(());
    }

    println!(
        "Highlighted: {} nodes, {} edges",
        highlight.nodes.len().to_string().bold(),
        highlight.edges.len().to_string().bold()
    );
    print_nodes(builder.graph(), highlight.nodes.iter());
    println!();
    print_edges(&builder, &highlight.edges);

    Ok(())
}

/// Search node attributes.
pub fn search(snapshot: Option<&Path>, key: &str, value: &str, json_output: bool) -> Result<()> {
    let builder = load(snapshot)?;
    let matches = builder.graph().search(key, value);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matches found for \"{}\"", value);
        return Ok(());
    }

    println!("Found {} matches:\n", matches.len());
    print_nodes(builder.graph(), matches.iter());

    Ok(())
}

/// Export the graph to JSON.
pub fn export(snapshot: Option<&Path>, output: &Path) -> Result<()> {
    let builder = load(snapshot)?;
    let graph = builder.graph();
    let nodes: Vec<_> = graph.nodes().collect();

    let export = serde_json::json!({
        "version": "1.0",
        "stats": graph.stats(),
        "nodes": nodes,
        "edges": graph.edges(),
    });

    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());

    Ok(())
}

fn print_nodes<'a>(graph: &EcmGraph, ids: impl Iterator<Item = &'a NodeId>) {
    for id in ids {
        let node = graph.get(id);
        let kind = node
            .and_then(NodeKind::of)
            .map(|kind| kind.to_string())
            .unwrap_or_else(|| "node".to_string());
        let name = node
            .and_then(|n| n.payload().get("name"))
            .and_then(|name| name.as_str())
            .unwrap_or("");

        println!("  {} {} {}", kind.yellow(), id.cyan(), name.dimmed());
    }
}

fn print_edges(builder: &GraphBuilder, edges: &[GraphEdge]) {
    for edge in edges {
        match builder.requirement_label(&edge.parent, &edge.child) {
            Some(label) => println!("  {} {}", edge, format!("[{}]", label).dimmed()),
            None => println!("  {}", edge),
        }
    }
}
