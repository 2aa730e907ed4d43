//! Builds a small airline route map and walks it. Run with
//! `RUST_LOG=graph=trace` to see the graph's bookkeeping events.

use graph::{BasicGraph, GraphError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), GraphError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut routes = BasicGraph::new();
    for city in ["Atlanta", "Boston", "Chicago", "Dallas", "Denver", "Los Angeles"] {
        routes.add_node(city)?;
    }

    for (from, to) in [
        ("Atlanta", "Chicago"),
        ("Atlanta", "Dallas"),
        ("Boston", "Chicago"),
        ("Chicago", "Denver"),
        ("Dallas", "Denver"),
        ("Dallas", "Los Angeles"),
        ("Denver", "Los Angeles"),
        ("Los Angeles", "Boston"),
    ] {
        routes.add_arc_named(from, to)?;
    }

    let atlanta = routes.existing_node("Atlanta")?;
    let name = |id| routes.node(id).map_or("?", |node| node.name.as_str());

    let reachable: Vec<_> = routes.breadth_first(atlanta)?.map(name).collect();
    println!("breadth-first from Atlanta: {}", reachable.join(" -> "));

    let mut snapshot = routes.clone();
    snapshot.remove_node_named("Denver")?;
    println!(
        "without Denver: {} routes (original keeps {})",
        snapshot.arc_set().len(),
        routes.arc_set().len()
    );

    if let Err(err) = routes.add_arc_named("Atlanta", "Miami") {
        println!("rejected: {err}");
    }

    Ok(())
}
