use containers::Set;
use structures::Handle;

/// Handle to a node stored in a [`Graph`](crate::Graph).
pub type NodeId<N> = Handle<N>;

/// Handle to an arc stored in a [`Graph`](crate::Graph).
pub type ArcId<A> = Handle<A>;

/// The fields a node record must carry for the graph to manage it.
///
/// Records may hold any additional client data. The graph owns every record
/// once it is added and keeps [`Node::arcs`] equal to the set of arcs that
/// start at the node; clients should treat that set as read-only.
pub trait Node: Sized {
    type Arc: Arc<Node = Self>;

    /// Creates a record with the given name, an empty arc set, and default
    /// values for anything else.
    fn from_name(name: String) -> Self;

    fn name(&self) -> &str;

    /// The arcs leaving this node.
    fn arcs(&self) -> &Set<ArcId<Self::Arc>>;

    fn arcs_mut(&mut self) -> &mut Set<ArcId<Self::Arc>>;
}

/// The fields an arc record must carry for the graph to manage it.
pub trait Arc: Sized {
    type Node: Node<Arc = Self>;

    /// Creates a record linking `start` to `finish`, with default values for
    /// any additional fields.
    fn between(start: NodeId<Self::Node>, finish: NodeId<Self::Node>) -> Self;

    fn start(&self) -> NodeId<Self::Node>;

    fn finish(&self) -> NodeId<Self::Node>;

    /// Re-points the arc. The graph calls this when it re-links copied arcs;
    /// changing the endpoints of an arc that is already in a graph breaks the
    /// graph's bookkeeping.
    fn set_endpoints(&mut self, start: NodeId<Self::Node>, finish: NodeId<Self::Node>);
}

/// A node carrying nothing but what the graph needs.
#[derive(Clone, Debug)]
pub struct BasicNode {
    pub name: String,
    pub arcs: Set<ArcId<BasicArc>>,
}

/// An arc carrying nothing but its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BasicArc {
    pub start: NodeId<BasicNode>,
    pub finish: NodeId<BasicNode>,
}

impl Node for BasicNode {
    type Arc = BasicArc;

    fn from_name(name: String) -> Self {
        Self {
            name,
            arcs: Set::new(),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn arcs(&self) -> &Set<ArcId<BasicArc>> {
        &self.arcs
    }

    fn arcs_mut(&mut self) -> &mut Set<ArcId<BasicArc>> {
        &mut self.arcs
    }
}

impl Arc for BasicArc {
    type Node = BasicNode;

    fn between(start: NodeId<BasicNode>, finish: NodeId<BasicNode>) -> Self {
        Self { start, finish }
    }

    fn start(&self) -> NodeId<BasicNode> {
        self.start
    }

    fn finish(&self) -> NodeId<BasicNode> {
        self.finish
    }

    fn set_endpoints(&mut self, start: NodeId<BasicNode>, finish: NodeId<BasicNode>) {
        self.start = start;
        self.finish = finish;
    }
}
