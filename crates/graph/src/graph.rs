use containers::{Map, Set};
use smallvec::SmallVec;
use structures::Pool;

use crate::{
    traverse::{BreadthFirst, DepthFirst},
    Arc, ArcId, GraphError, Node, NodeId, Result,
};

/// Arcs selected for removal are gathered here before any is unlinked, so
/// that no set is modified while it is being iterated.
type Doomed<A> = SmallVec<[ArcId<A>; 8]>;

/// A directed multigraph whose node and arc records are supplied by the
/// client.
///
/// The graph owns every record. Nodes are also indexed by name, and each
/// node's [`Node::arcs`] set mirrors the arcs that start at it. Any number of
/// parallel arcs may join the same pair of nodes.
///
/// Cloning a graph is a deep copy: every record is cloned into fresh slots
/// and the arcs are re-linked to the copied nodes by name.
pub struct Graph<N, A> {
    node_pool: Pool<N>,
    arc_pool: Pool<A>,
    nodes: Set<NodeId<N>>,
    arcs: Set<ArcId<A>>,
    index: Map<String, NodeId<N>>,
}

impl<N, A> Default for Graph<N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, A> Graph<N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Creates an empty graph with room for `nodes` nodes and `arcs` arcs.
    #[must_use]
    pub fn with_capacity(nodes: usize, arcs: usize) -> Self {
        Self {
            node_pool: Pool::with_capacity(nodes),
            arc_pool: Pool::with_capacity(arcs),
            nodes: Set::new(),
            arcs: Set::new(),
            index: Map::with_capacity(nodes),
        }
    }

    /// The number of nodes in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Alias of [`Graph::len`].
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and arc. Handles issued before the call no longer
    /// resolve.
    pub fn clear(&mut self) {
        tracing::debug!(
            nodes = self.nodes.len(),
            arcs = self.arcs.len(),
            "graph: clearing"
        );

        self.arc_pool.clear();
        self.node_pool.clear();
        self.arcs.clear();
        self.nodes.clear();
        self.index.clear();
    }

    /// Creates a node named `name` and adds it to the graph.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::DuplicateNode`] if a node with that name exists.
    pub fn add_node(&mut self, name: impl Into<String>) -> Result<NodeId<N>> {
        let name = name.into();
        if self.index.contains_key(name.as_str()) {
            return Err(GraphError::DuplicateNode(name));
        }

        Ok(self.add_node_record(N::from_name(name)))
    }

    /// Adds a client-built node record.
    ///
    /// Unlike [`Graph::add_node`], the name is not checked for uniqueness: if
    /// another node already has the name, the name index is re-pointed at the
    /// new node and the old one can only be reached by handle. Any arcs the
    /// record lists are discarded, since they cannot belong to this graph yet.
    pub fn add_node_record(&mut self, mut node: N) -> NodeId<N> {
        node.arcs_mut().clear();
        let name = node.name().to_owned();

        let id = self.node_pool.insert(node);
        self.nodes.add(id);

        tracing::trace!(node = %name, ?id, "graph: added node");
        if let Some(shadowed) = self.index.put(name, id) {
            tracing::warn!(?shadowed, ?id, "graph: node name shadows an existing node");
        }

        id
    }

    /// Removes a node along with every arc that starts or finishes at it, and
    /// returns the node record.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if `id` is not a node of this graph.
    pub fn remove_node(&mut self, id: NodeId<N>) -> Result<N> {
        if !self.node_pool.contains(id) {
            return Err(GraphError::StaleNode);
        }

        let doomed: Doomed<A> = self
            .arcs
            .iter()
            .copied()
            .filter(|&arc| {
                self.arc_pool
                    .get(arc)
                    .is_some_and(|arc| arc.start() == id || arc.finish() == id)
            })
            .collect();

        for &arc in &doomed {
            self.unlink_arc(arc);
        }

        let node = self.node_pool.remove(id).ok_or(GraphError::StaleNode)?;
        self.nodes.remove(&id);
        if self.index.get(node.name()) == Some(&id) {
            let shadowed = self.nodes.iter().copied().find(|&other| {
                self.node_pool
                    .get(other)
                    .is_some_and(|other| other.name() == node.name())
            });
            match shadowed {
                Some(other) => {
                    self.index.put(node.name().to_owned(), other);
                }
                None => {
                    self.index.remove(node.name());
                }
            }
        }

        tracing::debug!(node = node.name(), arcs = doomed.len(), "graph: removed node");
        Ok(node)
    }

    /// Removes the node named `name`; see [`Graph::remove_node`].
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn remove_node_named(&mut self, name: &str) -> Result<N> {
        let id = self.existing_node(name)?;
        self.remove_node(id)
    }

    /// Looks up a node by name.
    #[must_use]
    pub fn get_node(&self, name: &str) -> Option<NodeId<N>> {
        self.index.get(name).copied()
    }

    /// Looks up a node that must exist.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn existing_node(&self, name: &str) -> Result<NodeId<N>> {
        self.get_node(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_owned()))
    }

    #[must_use]
    pub fn node(&self, id: NodeId<N>) -> Option<&N> {
        self.node_pool.get(id)
    }

    /// Mutable access to a node's client data. Renaming the node or editing
    /// its arc set through this reference desynchronizes the graph.
    #[must_use]
    pub fn node_mut(&mut self, id: NodeId<N>) -> Option<&mut N> {
        self.node_pool.get_mut(id)
    }

    /// Adds a new arc from `start` to `finish`.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if either endpoint is not a node of
    /// this graph.
    pub fn add_arc(&mut self, start: NodeId<N>, finish: NodeId<N>) -> Result<ArcId<A>> {
        self.add_arc_record(A::between(start, finish))
    }

    /// Adds a new arc between the nodes with the given names.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either name is unresolved.
    pub fn add_arc_named(&mut self, start: &str, finish: &str) -> Result<ArcId<A>> {
        let (start, finish) = (self.existing_node(start)?, self.existing_node(finish)?);
        self.add_arc(start, finish)
    }

    /// Adds a client-built arc record, registering it with its start node.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if either endpoint is not a node of
    /// this graph.
    pub fn add_arc_record(&mut self, arc: A) -> Result<ArcId<A>> {
        let (start, finish) = (arc.start(), arc.finish());
        if !self.node_pool.contains(start) || !self.node_pool.contains(finish) {
            return Err(GraphError::StaleNode);
        }

        let id = self.arc_pool.insert(arc);
        self.arcs.add(id);
        if let Some(node) = self.node_pool.get_mut(start) {
            node.arcs_mut().add(id);
        }

        tracing::trace!(?id, ?start, ?finish, "graph: added arc");
        Ok(id)
    }

    /// Removes exactly one arc and returns its record.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleArc`] if `id` is not an arc of this graph.
    pub fn remove_arc(&mut self, id: ArcId<A>) -> Result<A> {
        self.unlink_arc(id).ok_or(GraphError::StaleArc)
    }

    /// Removes every arc from `start` to `finish` and returns how many there
    /// were.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if either endpoint is not a node of
    /// this graph.
    pub fn remove_arc_between(&mut self, start: NodeId<N>, finish: NodeId<N>) -> Result<usize> {
        if !self.node_pool.contains(finish) {
            return Err(GraphError::StaleNode);
        }
        let node = self.node_pool.get(start).ok_or(GraphError::StaleNode)?;

        let doomed: Doomed<A> = node
            .arcs()
            .iter()
            .copied()
            .filter(|&arc| {
                self.arc_pool
                    .get(arc)
                    .is_some_and(|arc| arc.finish() == finish)
            })
            .collect();

        for &arc in &doomed {
            self.unlink_arc(arc);
        }

        tracing::trace!(?start, ?finish, removed = doomed.len(), "graph: removed arcs");
        Ok(doomed.len())
    }

    /// Removes every arc between the nodes with the given names; see
    /// [`Graph::remove_arc_between`].
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either name is unresolved.
    pub fn remove_arc_named(&mut self, start: &str, finish: &str) -> Result<usize> {
        let (start, finish) = (self.existing_node(start)?, self.existing_node(finish)?);
        self.remove_arc_between(start, finish)
    }

    #[must_use]
    pub fn arc(&self, id: ArcId<A>) -> Option<&A> {
        self.arc_pool.get(id)
    }

    /// Mutable access to an arc's client data. Changing the endpoints through
    /// this reference desynchronizes the graph.
    #[must_use]
    pub fn arc_mut(&mut self, id: ArcId<A>) -> Option<&mut A> {
        self.arc_pool.get_mut(id)
    }

    /// True if some arc leaving `start` finishes at `finish`.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if either endpoint is not a node of
    /// this graph.
    pub fn is_connected(&self, start: NodeId<N>, finish: NodeId<N>) -> Result<bool> {
        if !self.node_pool.contains(finish) {
            return Err(GraphError::StaleNode);
        }

        Ok(self
            .arcs_from(start)?
            .iter()
            .filter_map(|&arc| self.arc_pool.get(arc))
            .any(|arc| arc.finish() == finish))
    }

    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if either name is unresolved.
    pub fn is_connected_named(&self, start: &str, finish: &str) -> Result<bool> {
        self.is_connected(self.existing_node(start)?, self.existing_node(finish)?)
    }

    /// Every node in the graph.
    #[must_use]
    pub fn node_set(&self) -> &Set<NodeId<N>> {
        &self.nodes
    }

    /// Every arc in the graph.
    #[must_use]
    pub fn arc_set(&self) -> &Set<ArcId<A>> {
        &self.arcs
    }

    /// The arcs leaving `id`.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if `id` is not a node of this graph.
    pub fn arcs_from(&self, id: NodeId<N>) -> Result<&Set<ArcId<A>>> {
        self.node_pool
            .get(id)
            .map(Node::arcs)
            .ok_or(GraphError::StaleNode)
    }

    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn arcs_from_named(&self, name: &str) -> Result<&Set<ArcId<A>>> {
        self.arcs_from(self.existing_node(name)?)
    }

    /// The distinct nodes one arc away from `id`.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if `id` is not a node of this graph.
    pub fn neighbors(&self, id: NodeId<N>) -> Result<Set<NodeId<N>>> {
        Ok(self
            .arcs_from(id)?
            .iter()
            .filter_map(|&arc| self.arc_pool.get(arc))
            .map(Arc::finish)
            .collect())
    }

    /// ## Errors
    ///
    /// Returns [`GraphError::UnknownNode`] if no node has that name.
    pub fn neighbors_named(&self, name: &str) -> Result<Set<NodeId<N>>> {
        self.neighbors(self.existing_node(name)?)
    }

    /// Visits the nodes reachable from `start`, going as deep as possible
    /// along each branch before backtracking.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if `start` is not a node of this
    /// graph.
    pub fn depth_first(&self, start: NodeId<N>) -> Result<DepthFirst<'_, N, A>> {
        if !self.node_pool.contains(start) {
            return Err(GraphError::StaleNode);
        }
        Ok(DepthFirst::new(self, start))
    }

    /// Visits the nodes reachable from `start` in order of increasing hop
    /// count.
    ///
    /// ## Errors
    ///
    /// Returns [`GraphError::StaleNode`] if `start` is not a node of this
    /// graph.
    pub fn breadth_first(&self, start: NodeId<N>) -> Result<BreadthFirst<'_, N, A>> {
        if !self.node_pool.contains(start) {
            return Err(GraphError::StaleNode);
        }
        Ok(BreadthFirst::new(self, start))
    }

    /// The highest slot index any live node handle can have, plus one.
    pub(crate) fn node_slots(&self) -> usize {
        self.node_pool.slots()
    }

    /// Unlinks an arc from its start node and the arc set, and releases it.
    fn unlink_arc(&mut self, id: ArcId<A>) -> Option<A> {
        let arc = self.arc_pool.remove(id)?;
        if let Some(node) = self.node_pool.get_mut(arc.start()) {
            node.arcs_mut().remove(&id);
        }
        self.arcs.remove(&id);
        Some(arc)
    }
}

impl<N, A> Graph<N, A>
where
    N: Node<Arc = A> + Clone,
    A: Arc<Node = N> + Clone,
{
    /// Adds a copy of every node and arc in `source`. Nodes are copied first
    /// with their arc sets emptied; each copied arc is then re-pointed at the
    /// copies of its endpoints, found by name in this graph's index.
    fn copy_from(&mut self, source: &Self) {
        for &id in &source.nodes {
            if let Some(node) = source.node_pool.get(id) {
                self.add_node_record(node.clone());
            }
        }

        for &id in &source.arcs {
            let Some(arc) = source.arc_pool.get(id) else {
                continue;
            };
            let endpoint = |node| {
                source
                    .node_pool
                    .get(node)
                    .and_then(|node| self.get_node(node.name()))
            };
            let (Some(start), Some(finish)) = (endpoint(arc.start()), endpoint(arc.finish()))
            else {
                tracing::warn!(arc = ?id, "graph: arc endpoint not found in copy, arc dropped");
                continue;
            };

            let mut copy = arc.clone();
            copy.set_endpoints(start, finish);
            if let Err(err) = self.add_arc_record(copy) {
                tracing::warn!(arc = ?id, %err, "graph: arc could not be copied");
            }
        }

        tracing::debug!(
            nodes = self.nodes.len(),
            arcs = self.arcs.len(),
            "graph: deep copy complete"
        );
    }
}

impl<N, A> Clone for Graph<N, A>
where
    N: Node<Arc = A> + Clone,
    A: Arc<Node = N> + Clone,
{
    fn clone(&self) -> Self {
        let mut graph = Self::with_capacity(self.nodes.len(), self.arcs.len());
        graph.copy_from(self);
        graph
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.copy_from(source);
    }
}

impl<N, A> std::fmt::Debug for Graph<N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = |id| self.node_pool.get(id).map_or("?", Node::name);

        let mut nodes: Vec<&str> = self.nodes.iter().map(|&id| name(id)).collect();
        nodes.sort_unstable();

        let mut arcs: Vec<(&str, &str)> = self
            .arcs
            .iter()
            .filter_map(|&id| self.arc_pool.get(id))
            .map(|arc| (name(arc.start()), name(arc.finish())))
            .collect();
        arcs.sort_unstable();

        f.debug_struct("Graph")
            .field("nodes", &nodes)
            .field("arcs", &arcs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{BasicArc, BasicGraph, BasicNode};

    use super::*;

    fn triangle() -> BasicGraph {
        let mut g = BasicGraph::new();
        for name in ["A", "B", "C"] {
            g.add_node(name).unwrap();
        }
        g.add_arc_named("A", "B").unwrap();
        g.add_arc_named("B", "C").unwrap();
        g.add_arc_named("C", "A").unwrap();
        g
    }

    #[test]
    fn add_and_lookup_nodes() {
        let mut g = BasicGraph::new();
        assert!(g.is_empty());

        let x = g.add_node("X").unwrap();
        assert_eq!(g.get_node("X"), Some(x));
        assert_eq!(g.node(x).map(|n| n.name.as_str()), Some("X"));
        assert_eq!(g.len(), 1);

        assert_eq!(
            g.add_node("X"),
            Err(GraphError::DuplicateNode("X".to_owned()))
        );
        assert_eq!(g.size(), 1);
        assert_eq!(g.get_node("Y"), None);
    }

    #[test]
    fn node_record_arcs_are_discarded() {
        let mut g = BasicGraph::new();
        let a = g.add_node("A").unwrap();
        let b = g.add_node("B").unwrap();
        let arc = g.add_arc(a, b).unwrap();

        let mut record = BasicNode::from_name("C".to_owned());
        record.arcs.add(arc);
        let c = g.add_node_record(record);

        assert!(g.arcs_from(c).unwrap().is_empty());
    }

    #[test]
    fn node_record_shadows_name() {
        let mut g = BasicGraph::new();
        let first = g.add_node("A").unwrap();
        let second = g.add_node_record(BasicNode::from_name("A".to_owned()));

        assert_eq!(g.len(), 2);
        assert_eq!(g.get_node("A"), Some(second));

        // Removing the shadowed node leaves the index entry for the new one.
        g.remove_node(first).unwrap();
        assert_eq!(g.get_node("A"), Some(second));
    }

    #[test]
    fn removing_shadowing_node_restores_earlier_name() {
        let mut g = BasicGraph::new();
        let first = g.add_node("A").unwrap();
        let second = g.add_node_record(BasicNode::from_name("A".to_owned()));

        g.remove_node(second).unwrap();
        assert_eq!(g.get_node("A"), Some(first));

        g.remove_node(first).unwrap();
        assert_eq!(g.get_node("A"), None);
        assert!(g.is_empty());
    }

    #[test]
    fn arcs_are_directed() {
        let g = triangle();

        assert_eq!(g.is_connected_named("A", "B"), Ok(true));
        assert_eq!(g.is_connected_named("B", "A"), Ok(false));
        assert_eq!(g.is_connected_named("A", "C"), Ok(false));
        assert_eq!(g.arc_set().len(), 3);
    }

    #[test]
    fn outgoing_sets_mirror_arc_set() {
        let mut g = triangle();
        g.add_arc_named("A", "C").unwrap();

        let a = g.get_node("A").unwrap();
        let outgoing = g.arcs_from(a).unwrap();
        assert_eq!(outgoing.len(), 2);
        for &arc in outgoing {
            assert!(g.arc_set().contains(&arc));
            assert_eq!(g.arc(arc).unwrap().start, a);
        }

        let total: usize = g
            .node_set()
            .iter()
            .map(|&n| g.arcs_from(n).unwrap().len())
            .sum();
        assert_eq!(total, g.arc_set().len());
    }

    #[test]
    fn neighbors() {
        let mut g = triangle();
        let b = g.get_node("B").unwrap();

        let expected: Set<_> = [b].into_iter().collect();
        assert_eq!(g.neighbors_named("A"), Ok(expected.clone()));

        // Parallel arcs still yield one neighbor.
        g.add_arc_named("A", "B").unwrap();
        assert_eq!(g.neighbors_named("A"), Ok(expected));
    }

    #[test]
    fn remove_arc_between_removes_all_parallel() {
        let mut g = triangle();
        g.add_arc_named("B", "C").unwrap();
        g.add_arc_named("B", "C").unwrap();
        assert_eq!(g.arc_set().len(), 5);

        assert_eq!(g.remove_arc_named("B", "C"), Ok(3));
        assert_eq!(g.is_connected_named("B", "C"), Ok(false));
        assert_eq!(g.arc_set().len(), 2);
        assert!(g.arcs_from_named("B").unwrap().is_empty());

        assert_eq!(g.remove_arc_named("B", "C"), Ok(0));
    }

    #[test]
    fn remove_single_arc() {
        let mut g = triangle();
        let a = g.get_node("A").unwrap();
        let b = g.get_node("B").unwrap();
        let extra = g.add_arc(a, b).unwrap();

        let record = g.remove_arc(extra).unwrap();
        assert_eq!(record, BasicArc { start: a, finish: b });
        assert_eq!(g.is_connected(a, b), Ok(true));
        assert_eq!(g.arc_set().len(), 3);

        assert_eq!(g.remove_arc(extra), Err(GraphError::StaleArc));
    }

    #[test]
    fn remove_node_cascades() {
        let mut g = triangle();
        let a = g.get_node("A").unwrap();

        let record = g.remove_node_named("A").unwrap();
        assert_eq!(record.name, "A");

        assert_eq!(g.get_node("A"), None);
        assert_eq!(g.len(), 2);
        assert_eq!(g.arc_set().len(), 1);
        for &arc in g.arc_set() {
            let arc = g.arc(arc).unwrap();
            assert_ne!(arc.start, a);
            assert_ne!(arc.finish, a);
        }
        assert!(g.arcs_from_named("C").unwrap().is_empty());

        assert_eq!(g.remove_node(a).map(|_| ()), Err(GraphError::StaleNode));
        assert_eq!(
            g.remove_node_named("A").map(|_| ()),
            Err(GraphError::UnknownNode("A".to_owned()))
        );
    }

    #[test]
    fn self_loop_removed_with_node() {
        let mut g = BasicGraph::new();
        let a = g.add_node("A").unwrap();
        g.add_arc(a, a).unwrap();
        assert_eq!(g.is_connected(a, a), Ok(true));

        g.remove_node(a).unwrap();
        assert!(g.arc_set().is_empty());
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut g = triangle();
        let unknown = || GraphError::UnknownNode("Z".to_owned());

        assert_eq!(g.add_arc_named("A", "Z"), Err(unknown()));
        assert_eq!(g.remove_arc_named("Z", "A"), Err(unknown()));
        assert_eq!(g.is_connected_named("Z", "A"), Err(unknown()));
        assert_eq!(g.neighbors_named("Z"), Err(unknown()));
        assert_eq!(g.arcs_from_named("Z").map(|_| ()), Err(unknown()));
        assert_eq!(g.remove_node_named("Z").map(|_| ()), Err(unknown()));
        assert_eq!(g.existing_node("Z"), Err(unknown()));

        // Nothing changed.
        assert_eq!(g.len(), 3);
        assert_eq!(g.arc_set().len(), 3);
    }

    #[test]
    fn stale_handles_are_errors() {
        let mut g = triangle();
        let a = g.get_node("A").unwrap();
        let b = g.get_node("B").unwrap();
        g.remove_node(b).unwrap();

        assert_eq!(g.add_arc(a, b), Err(GraphError::StaleNode));
        assert_eq!(g.is_connected(a, b), Err(GraphError::StaleNode));
        assert_eq!(g.remove_arc_between(b, a), Err(GraphError::StaleNode));
        assert_eq!(g.neighbors(b), Err(GraphError::StaleNode));
        assert!(g.depth_first(b).is_err());
    }

    #[test]
    fn clear_empties_everything() {
        let mut g = triangle();
        let a = g.get_node("A").unwrap();
        g.clear();

        assert!(g.is_empty());
        assert!(g.arc_set().is_empty());
        assert_eq!(g.get_node("A"), None);
        assert_eq!(g.node(a).map(|n| n.name.clone()), None);

        // Names are free again.
        assert!(g.add_node("A").is_ok());
    }

    #[test]
    fn debug_lists_names() {
        let g = triangle();
        assert_eq!(
            format!("{g:?}"),
            r#"Graph { nodes: ["A", "B", "C"], arcs: [("A", "B"), ("B", "C"), ("C", "A")] }"#
        );
    }
}
