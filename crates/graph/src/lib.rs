//! A directed multigraph over client-defined node and arc records.
//!
//! Records are owned by the graph in generational [`Pool`](structures::Pool)s
//! and referred to by typed handles, so a removed node or arc can never be
//! reached through a stale handle.
//!
//! ```
//! use graph::{BasicGraph, GraphError};
//!
//! let mut g = BasicGraph::new();
//! g.add_node("A")?;
//! g.add_node("B")?;
//! g.add_arc_named("A", "B")?;
//!
//! assert!(g.is_connected_named("A", "B")?);
//! assert!(!g.is_connected_named("B", "A")?);
//! assert_eq!(g.add_node("A"), Err(GraphError::DuplicateNode("A".to_owned())));
//! # Ok::<(), GraphError>(())
//! ```

mod graph;
mod record;
mod traverse;

pub use graph::Graph;
pub use record::{Arc, ArcId, BasicArc, BasicNode, Node, NodeId};
pub use traverse::{BreadthFirst, DepthFirst};

/// A graph of [`BasicNode`]s and [`BasicArc`]s.
pub type BasicGraph = Graph<BasicNode, BasicArc>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("add_node: node {0} already exists")]
    DuplicateNode(String),
    #[error("no node named {0}")]
    UnknownNode(String),
    /// A node handle that does not resolve to a live node of this graph.
    #[error("node handle does not refer to a node in this graph")]
    StaleNode,
    /// An arc handle that does not resolve to a live arc of this graph.
    #[error("arc handle does not refer to an arc in this graph")]
    StaleArc,
}

pub type Result<T, E = GraphError> = std::result::Result<T, E>;
