use crate::mcts_node::MctsNode;
use ego_tree::{NodeId, NodeRef, Tree};

/// Arena of [`MctsNode`]s rooted at the empty selection.
///
/// Nodes are addressed by [`NodeId`]; a node's parent is stored as an id and its children are
/// owned by the arena, so no node is reachable through more than one owning path.
#[derive(Debug, Clone)]
pub struct SearchTree {
    tree: Tree<MctsNode>,
}

impl Default for SearchTree {
    fn default() -> Self {
        SearchTree::new()
    }
}

impl SearchTree {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(MctsNode::root()),
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.tree.root().id()
    }

    pub fn root(&self) -> NodeRef<'_, MctsNode> {
        self.tree.root()
    }

    /// Returns the node data for `id`, if the id belongs to this tree.
    pub fn node(&self, id: NodeId) -> Option<&MctsNode> {
        self.tree.get(id).map(|node| node.value())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.tree.nodes().count()
    }

    /// Appends `node` as the last child of `parent`.
    pub fn add_child(&mut self, parent: NodeId, node: MctsNode) -> Option<NodeId> {
        self.tree
            .get_mut(parent)
            .map(|mut parent| parent.append(node).id())
    }

    /// A node is fully expanded once it has as many children as the catalog has items.
    ///
    /// This counts attempted transitions, not distinct remaining items.
    pub fn is_fully_expanded(&self, id: NodeId, catalog_len: usize) -> bool {
        self.tree
            .get(id)
            .is_some_and(|node| node.children().count() == catalog_len)
    }

    /// The child with the highest UCB1 score. Ties keep the first child in order.
    pub fn best_child(&self, id: NodeId, exploration_constant: f64) -> Option<NodeId> {
        let node = self.tree.get(id)?;
        let parent_visits = node.value().visits;
        let mut best: Option<(NodeId, f64)> = None;
        for child in node.children() {
            let value = child.value().ucb_value(parent_visits, exploration_constant);
            match best {
                Some((_, max)) if value <= max => {}
                _ => best = Some((child.id(), value)),
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// The child with the most visits. Ties keep the first child in order.
    pub fn most_visited_child(&self, id: NodeId) -> Option<NodeId> {
        let node = self.tree.get(id)?;
        let mut best: Option<(NodeId, u32)> = None;
        for child in node.children() {
            let visits = child.value().visits;
            match best {
                Some((_, max)) if visits <= max => {}
                _ => best = Some((child.id(), visits)),
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Adds `reward` to every node from `id` up to the root and returns the updated path.
    pub fn backpropagate(&mut self, id: NodeId, reward: f64) -> Vec<NodeId> {
        let mut branch = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let Some(mut node) = self.tree.get_mut(node_id) else {
                break;
            };
            let data = node.value();
            data.visits += 1;
            data.total_reward += reward;
            branch.push(node_id);
            current = node.parent().map(|parent| parent.id());
        }
        branch
    }
}
