use containers::{Queue, Stack};
use structures::FlagVec;

use crate::{Arc, Graph, Node, NodeId};

/// Depth-first iterator over the nodes reachable from a starting node. Each
/// node is produced once. Returned by [`Graph::depth_first`].
pub struct DepthFirst<'g, N, A> {
    graph: &'g Graph<N, A>,
    pending: Stack<NodeId<N>>,
    visited: FlagVec,
}

impl<'g, N, A> DepthFirst<'g, N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    pub(crate) fn new(graph: &'g Graph<N, A>, start: NodeId<N>) -> Self {
        let mut pending = Stack::new();
        pending.push(start);

        Self {
            graph,
            pending,
            visited: FlagVec::with_capacity(graph.node_slots()),
        }
    }
}

impl<'g, N, A> Iterator for DepthFirst<'g, N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    type Item = NodeId<N>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Ok(id) = self.pending.pop() {
            if self.visited.set(id.index(), true) {
                continue;
            }

            for next in successors(self.graph, id) {
                if !self.visited.get(next.index()) {
                    self.pending.push(next);
                }
            }
            return Some(id);
        }
        None
    }
}

/// Breadth-first iterator over the nodes reachable from a starting node, in
/// order of increasing hop count. Returned by [`Graph::breadth_first`].
pub struct BreadthFirst<'g, N, A> {
    graph: &'g Graph<N, A>,
    pending: Queue<NodeId<N>>,
    visited: FlagVec,
}

impl<'g, N, A> BreadthFirst<'g, N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    pub(crate) fn new(graph: &'g Graph<N, A>, start: NodeId<N>) -> Self {
        let mut pending = Queue::new();
        pending.enqueue(start);

        let mut visited = FlagVec::with_capacity(graph.node_slots());
        visited.set(start.index(), true);

        Self {
            graph,
            pending,
            visited,
        }
    }
}

impl<'g, N, A> Iterator for BreadthFirst<'g, N, A>
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    type Item = NodeId<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.dequeue().ok()?;

        for next in successors(self.graph, id) {
            if !self.visited.set(next.index(), true) {
                self.pending.enqueue(next);
            }
        }
        Some(id)
    }
}

/// The finish node of every arc leaving `id`, duplicates included.
fn successors<'g, N, A>(
    graph: &'g Graph<N, A>,
    id: NodeId<N>,
) -> impl Iterator<Item = NodeId<N>> + 'g
where
    N: Node<Arc = A>,
    A: Arc<Node = N>,
{
    graph
        .arcs_from(id)
        .into_iter()
        .flat_map(|arcs| arcs.iter())
        .filter_map(|&arc| graph.arc(arc))
        .map(Arc::finish)
}

#[cfg(test)]
mod tests {
    use crate::{BasicGraph, BasicNode, NodeId};

    fn chain(names: &[&str]) -> BasicGraph {
        let mut g = BasicGraph::new();
        for name in names {
            g.add_node(*name).unwrap();
        }
        for pair in names.windows(2) {
            g.add_arc_named(pair[0], pair[1]).unwrap();
        }
        g
    }

    fn names(g: &BasicGraph, ids: impl Iterator<Item = NodeId<BasicNode>>) -> Vec<String> {
        ids.map(|id| g.node(id).unwrap().name.clone()).collect()
    }

    #[test]
    fn depth_first_follows_chain() {
        let g = chain(&["A", "B", "C", "D"]);
        let b = g.get_node("B").unwrap();

        assert_eq!(names(&g, g.depth_first(b).unwrap()), ["B", "C", "D"]);
    }

    #[test]
    fn breadth_first_orders_by_distance() {
        let mut g = chain(&["A", "B", "D"]);
        g.add_node("C").unwrap();
        g.add_arc_named("A", "C").unwrap();
        g.add_arc_named("C", "D").unwrap();

        let a = g.get_node("A").unwrap();
        let order = names(&g, g.breadth_first(a).unwrap());

        assert_eq!(order.len(), 4);
        assert_eq!(order[0], "A");
        let mut middle = vec![order[1].clone(), order[2].clone()];
        middle.sort();
        assert_eq!(middle, ["B", "C"]);
        assert_eq!(order[3], "D");
    }

    #[test]
    fn cycles_visit_each_node_once() {
        let mut g = chain(&["A", "B", "C"]);
        g.add_arc_named("C", "A").unwrap();
        g.add_arc_named("A", "B").unwrap();
        let a = g.get_node("A").unwrap();

        let mut dfs = names(&g, g.depth_first(a).unwrap());
        dfs.sort();
        assert_eq!(dfs, ["A", "B", "C"]);

        let mut bfs = names(&g, g.breadth_first(a).unwrap());
        bfs.sort();
        assert_eq!(bfs, ["A", "B", "C"]);
    }

    #[test]
    fn unreachable_nodes_are_skipped() {
        let mut g = chain(&["A", "B"]);
        g.add_node("island").unwrap();
        let b = g.get_node("B").unwrap();

        assert_eq!(names(&g, g.depth_first(b).unwrap()), ["B"]);
        assert_eq!(names(&g, g.breadth_first(b).unwrap()), ["B"]);
    }
}
