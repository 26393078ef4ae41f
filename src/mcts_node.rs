use crate::item::{Catalog, Item};

/// Added to visit counts wherever they are used as a denominator.
pub const VISIT_EPSILON: f64 = 1e-5;

/// Represents a single node in the search tree: one partial selection.
///
/// Nodes live in the arena of a [`SearchTree`](crate::tree::SearchTree). The parent link and
/// the child list are owned by the arena; the node only carries the selection and statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MctsNode {
    /// The depth of the node in the tree.
    pub height: usize,
    /// Catalog index of the item that labels the transition from the parent. `None` for the root.
    pub item: Option<usize>,
    /// Catalog indices of the items chosen to reach this node, in the order they were chosen.
    pub selection: Vec<usize>,
    /// Sum of the costs of `selection`.
    pub cost: f64,
    /// Sum of the benefits of `selection`.
    pub benefit: f64,
    /// The number of backpropagation passes that went through this node.
    pub visits: u32,
    /// Unaveraged sum of every reward backpropagated through this node.
    pub total_reward: f64,
}

impl MctsNode {
    /// Creates the root: an empty selection with zero totals.
    pub fn root() -> Self {
        MctsNode::default()
    }

    /// Creates the node reached from `self` by choosing the item at `index`.
    pub fn child(&self, index: usize, item: &Item) -> Self {
        let mut selection = Vec::with_capacity(self.selection.len() + 1);
        selection.extend_from_slice(&self.selection);
        selection.push(index);
        MctsNode {
            height: self.height + 1,
            item: Some(index),
            selection,
            cost: self.cost + item.cost(),
            benefit: self.benefit + item.benefit(),
            visits: 0,
            total_reward: 0.0,
        }
    }

    /// Average reward per visit, stabilized for unvisited nodes.
    pub fn mean_reward(&self) -> f64 {
        self.total_reward / (self.visits as f64 + VISIT_EPSILON)
    }

    /// UCB1 score of this node as a child of a parent visited `parent_visits` times.
    pub fn ucb_value(&self, parent_visits: u32, exploration_constant: f64) -> f64 {
        let exploration = f64::sqrt(
            f64::ln(parent_visits as f64 + 1.0) / (self.visits as f64 + VISIT_EPSILON),
        );
        self.mean_reward() + exploration_constant * exploration
    }

    /// Resolves the selection into catalog items.
    pub fn items<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Item> {
        self.selection
            .iter()
            .filter_map(|&index| catalog.get(index))
            .collect()
    }

    /// Whether `id` is part of the accumulated selection.
    pub fn contains(&self, catalog: &Catalog, id: &str) -> bool {
        self.items(catalog).iter().any(|item| item.id() == id)
    }
}
