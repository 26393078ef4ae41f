use crate::config::{
    DEFAULT_EXPLORATION_CONSTANT, DEFAULT_EXPLORE_PROBABILITY, SearchConfig, check_exploration,
};
use crate::error::SearchError;
use crate::item::{Catalog, Item};
use crate::mcts_node::MctsNode;
use crate::random::{RandomGenerator, SeededRandomGenerator, StandardRandomGenerator};
use crate::report::NodeReport;
use crate::scoring::{ScoringPolicy, Weights};
use crate::tree::SearchTree;
use ego_tree::NodeId;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// How a rollout picks the next item to try.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RolloutPolicy {
    /// Every remaining item is equally likely.
    #[default]
    Uniform,
    /// Half the time a uniform pick, otherwise the remaining item with the largest benefit.
    BenefitBiased,
}

/// The main struct for running the Monte Carlo Tree Search over a catalog.
///
/// It holds the catalog, the search tree of the latest run, the random number generator and
/// the configuration for the search.
pub struct MonteCarloTreeSearch<K: RandomGenerator> {
    catalog: Catalog,
    tree: SearchTree,
    random: K,
    capacity: f64,
    scoring: ScoringPolicy,
    exploration_constant: f64,
    explore_probability: f64,
    rollout: RolloutPolicy,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
///
/// Validation happens in [`build`](MonteCarloTreeSearchBuilder::build), so an engine that
/// exists always has a non-empty catalog, a positive capacity, valid weights and in-range
/// exploration settings.
pub struct MonteCarloTreeSearchBuilder<K: RandomGenerator> {
    catalog: Catalog,
    random_generator: K,
    capacity: f64,
    cost_weight: f64,
    benefit_weight: f64,
    exploration_constant: f64,
    explore_probability: f64,
    rollout: RolloutPolicy,
}

impl<K: RandomGenerator> MonteCarloTreeSearchBuilder<K> {
    /// Creates a new builder over the given catalog with default settings.
    pub fn new(catalog: Catalog) -> Self {
        let defaults = SearchConfig::default();
        Self {
            catalog,
            random_generator: K::default(),
            capacity: defaults.capacity,
            cost_weight: defaults.cost_weight,
            benefit_weight: defaults.benefit_weight,
            exploration_constant: DEFAULT_EXPLORATION_CONSTANT,
            explore_probability: DEFAULT_EXPLORE_PROBABILITY,
            rollout: defaults.rollout,
        }
    }

    /// Sets the random number generator for the search.
    pub fn with_random_generator(mut self, rg: K) -> Self {
        self.random_generator = rg;
        self
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the objective weights. They are used as given, never renormalized.
    pub fn with_weights(mut self, cost_weight: f64, benefit_weight: f64) -> Self {
        self.cost_weight = cost_weight;
        self.benefit_weight = benefit_weight;
        self
    }

    pub fn with_exploration_constant(mut self, exploration_constant: f64) -> Self {
        self.exploration_constant = exploration_constant;
        self
    }

    pub fn with_explore_probability(mut self, explore_probability: f64) -> Self {
        self.explore_probability = explore_probability;
        self
    }

    pub fn with_rollout_policy(mut self, rollout: RolloutPolicy) -> Self {
        self.rollout = rollout;
        self
    }

    /// Copies capacity, weights, exploration settings and rollout policy from `config`.
    ///
    /// The iteration budget and seed are not part of the engine; pass them to
    /// [`MonteCarloTreeSearch::run`] and the random generator respectively.
    pub fn with_config(self, config: &SearchConfig) -> Self {
        self.with_capacity(config.capacity)
            .with_weights(config.cost_weight, config.benefit_weight)
            .with_exploration_constant(config.exploration_constant)
            .with_explore_probability(config.explore_probability)
            .with_rollout_policy(config.rollout)
    }

    /// Builds the `MonteCarloTreeSearch` instance with the configured parameters.
    pub fn build(self) -> Result<MonteCarloTreeSearch<K>, SearchError> {
        if self.catalog.is_empty() {
            return Err(SearchError::EmptyCatalog);
        }
        if !self.capacity.is_finite() || self.capacity <= 0.0 {
            return Err(SearchError::InvalidCapacity(self.capacity));
        }
        let weights = Weights::new(self.cost_weight, self.benefit_weight)?;
        check_exploration(self.exploration_constant, self.explore_probability)?;
        let scoring = ScoringPolicy::new(weights, self.capacity, self.catalog.max_benefit());
        Ok(MonteCarloTreeSearch {
            catalog: self.catalog,
            tree: SearchTree::new(),
            random: self.random_generator,
            capacity: self.capacity,
            scoring,
            exploration_constant: self.exploration_constant,
            explore_probability: self.explore_probability,
            rollout: self.rollout,
        })
    }
}

/// The selection chosen by a run, with its totals and the statistics behind the choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Selected items in the order they were chosen.
    pub items: Vec<Item>,
    pub total_cost: f64,
    pub total_benefit: f64,
    /// Visits of the chosen root child.
    pub visits: u32,
    /// Mean reward of the chosen root child.
    pub mean_reward: f64,
    /// Number of iterations the run performed.
    pub iterations: u32,
}

impl<K: RandomGenerator> MonteCarloTreeSearch<K> {
    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder(catalog: Catalog) -> MonteCarloTreeSearchBuilder<K> {
        MonteCarloTreeSearchBuilder::new(catalog)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Returns the search tree of the latest run.
    pub fn get_tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Returns the root node of the search tree.
    pub fn get_root(&self) -> &MctsNode {
        self.tree.root().value()
    }

    /// Runs a fresh search for `iterations` cycles and returns the most visited root child.
    ///
    /// Any tree left over from a previous run is discarded first.
    pub fn run(&mut self, iterations: u32) -> Result<SearchResult, SearchError> {
        if iterations == 0 {
            return Err(SearchError::ZeroIterations);
        }
        self.reset();
        debug!(
            "Starting search over {} items, capacity {}, {} iterations",
            self.catalog.len(),
            self.capacity,
            iterations
        );

        let root_id = self.tree.root_id();
        if self.expand(root_id).is_none() {
            // the root's totals never change, so a later expansion cannot succeed either
            debug!("No item fits within capacity {}", self.capacity);
            return Err(SearchError::InfeasibleCapacity {
                capacity: self.capacity,
            });
        }

        self.iterate_n_times(iterations);
        let result = self.best_result(iterations)?;
        debug!(
            "Selected {} items: cost {}, benefit {}, visits {}",
            result.items.len(),
            result.total_cost,
            result.total_benefit,
            result.visits
        );
        Ok(result)
    }

    /// Discards the current tree and starts again from the empty selection.
    pub fn reset(&mut self) {
        self.tree = SearchTree::new();
    }

    /// Runs the loop for a specified number of iterations over the current tree.
    pub fn iterate_n_times(&mut self, n: u32) {
        for _ in 0..n {
            self.do_iteration();
        }
    }

    /// Performs one full iteration (Selection, Expansion, Simulation, Backpropagation).
    /// Returns the path of nodes that were updated during backpropagation.
    pub fn do_iteration(&mut self) -> Vec<NodeId> {
        let selected = self.select(self.tree.root_id());
        let node_id = if self.tree.is_fully_expanded(selected, self.catalog.len()) {
            selected
        } else {
            self.expand(selected).unwrap_or(selected)
        };
        let reward = self.simulate(node_id);
        trace!("Simulated {node_id:?}: reward {reward}");
        self.tree.backpropagate(node_id, reward)
    }

    /// Biased descent from `node_id`.
    ///
    /// With probability `explore_probability` a uniformly random child is returned straight
    /// away. Otherwise the UCB1-best child is followed for as long as the current node is
    /// fully expanded.
    fn select(&mut self, node_id: NodeId) -> NodeId {
        if self.random.next_f64() < self.explore_probability {
            let children = self.tree.children(node_id);
            if let Some(&child) = self.random.choose(&children) {
                return child;
            }
        }

        let mut current = node_id;
        while self.tree.is_fully_expanded(current, self.catalog.len()) {
            match self.tree.best_child(current, self.exploration_constant) {
                Some(child) => current = child,
                None => break,
            }
        }
        current
    }

    /// Adds at most one child to `node_id`: the first catalog item that does not already label
    /// a child and still fits within capacity.
    ///
    /// Only the node's own children are checked, so an item already present higher up the
    /// selection can be chosen again.
    fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = self.tree.node(node_id)?;
        let taken: Vec<&str> = self
            .tree
            .children(node_id)
            .into_iter()
            .filter_map(|child| self.tree.node(child)?.item)
            .filter_map(|index| self.catalog.get(index))
            .map(Item::id)
            .collect();

        let (index, item) = self.catalog.iter().enumerate().find(|(_, item)| {
            !taken.contains(&item.id()) && node.cost + item.cost() <= self.capacity
        })?;
        let child = node.child(index, item);
        trace!("Expanding {node_id:?} with {}", item.id());
        self.tree.add_child(node_id, child)
    }

    /// Random completion of the selection at `node_id`, scored with the configured weights.
    fn simulate(&mut self, node_id: NodeId) -> f64 {
        let Some(node) = self.tree.node(node_id) else {
            return 0.0;
        };
        let mut total_cost = node.cost;
        let mut total_benefit = node.benefit;
        let mut remaining: Vec<&Item> = self
            .catalog
            .iter()
            .filter(|item| !node.contains(&self.catalog, item.id()))
            .collect();

        while !remaining.is_empty() && total_cost <= self.capacity {
            let index = match self.rollout {
                RolloutPolicy::Uniform => self.random.next_index(remaining.len()),
                RolloutPolicy::BenefitBiased => {
                    if self.random.next_f64() < 0.5 {
                        self.random.next_index(remaining.len())
                    } else {
                        highest_benefit(&remaining)
                    }
                }
            };
            let item = remaining.remove(index);
            if total_cost + item.cost() <= self.capacity {
                total_cost += item.cost();
                total_benefit += item.benefit();
            }
        }

        self.scoring.score(total_cost, total_benefit)
    }

    /// The most visited root child, ties going to the earliest child.
    fn best_result(&self, iterations: u32) -> Result<SearchResult, SearchError> {
        let root_id = self.tree.root_id();
        let best = self
            .tree
            .most_visited_child(root_id)
            .and_then(|id| self.tree.node(id))
            .ok_or(SearchError::InfeasibleCapacity {
                capacity: self.capacity,
            })?;

        Ok(SearchResult {
            items: best.items(&self.catalog).into_iter().cloned().collect(),
            total_cost: best.cost,
            total_benefit: best.benefit,
            visits: best.visits,
            mean_reward: best.mean_reward(),
            iterations,
        })
    }

    /// One record for the root and one for each of its children, in child order.
    pub fn root_report(&self) -> Vec<NodeReport> {
        let root_id = self.tree.root_id();
        std::iter::once(root_id)
            .chain(self.tree.children(root_id))
            .filter_map(|id| self.tree.node(id))
            .map(|node| NodeReport::from_node(node, &self.catalog))
            .collect()
    }
}

/// Index of the first remaining item with the largest benefit.
fn highest_benefit(remaining: &[&Item]) -> usize {
    let mut best = 0;
    for (index, item) in remaining.iter().enumerate() {
        if item.benefit() > remaining[best].benefit() {
            best = index;
        }
    }
    best
}

impl MonteCarloTreeSearch<SeededRandomGenerator> {
    /// Returns a builder whose generator is seeded with `seed`.
    pub fn with_seed(
        catalog: Catalog,
        seed: u64,
    ) -> MonteCarloTreeSearchBuilder<SeededRandomGenerator> {
        MonteCarloTreeSearchBuilder::new(catalog)
            .with_random_generator(SeededRandomGenerator::new(seed))
    }
}

/// Runs one complete search as described by `config`.
///
/// A configured seed makes the search reproducible; without one the thread RNG is used.
pub fn search(catalog: Catalog, config: &SearchConfig) -> Result<SearchResult, SearchError> {
    config.validate()?;
    match config.seed {
        Some(seed) => MonteCarloTreeSearch::with_seed(catalog, seed)
            .with_config(config)
            .build()?
            .run(config.iterations),
        None => MonteCarloTreeSearch::<StandardRandomGenerator>::builder(catalog)
            .with_config(config)
            .build()?
            .run(config.iterations),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn catalog(items: &[(&str, f64, f64)]) -> Catalog {
        Catalog::new(
            items
                .iter()
                .map(|&(id, cost, benefit)| Item::new(id, cost, benefit).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn foods() -> Catalog {
        catalog(&[
            ("apple", 52.0, 218.0),
            ("banana", 89.0, 371.0),
            ("bread", 265.0, 1109.0),
            ("cheese", 402.0, 1682.0),
            ("egg", 155.0, 649.0),
            ("milk", 42.0, 176.0),
            ("rice", 130.0, 544.0),
            ("salmon", 208.0, 870.0),
        ])
    }

    fn engine(
        catalog: Catalog,
        capacity: f64,
        seed: u64,
    ) -> MonteCarloTreeSearch<SeededRandomGenerator> {
        MonteCarloTreeSearch::with_seed(catalog, seed)
            .with_capacity(capacity)
            .with_weights(0.3, 0.7)
            .build()
            .unwrap()
    }

    fn ids(items: &[Item]) -> Vec<&str> {
        items.iter().map(Item::id).collect()
    }

    fn walk(tree: &SearchTree, id: NodeId, visit: &mut impl FnMut(NodeId, &MctsNode)) {
        if let Some(node) = tree.node(id) {
            visit(id, node);
        }
        for child in tree.children(id) {
            walk(tree, child, visit);
        }
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let result = MonteCarloTreeSearch::<SeededRandomGenerator>::builder(Catalog::default())
            .with_capacity(10.0)
            .build();
        assert!(matches!(result, Err(SearchError::EmptyCatalog)));
    }

    #[test]
    fn invalid_weights_and_capacity_are_rejected() {
        let negative = MonteCarloTreeSearch::<SeededRandomGenerator>::builder(foods())
            .with_weights(-0.5, 1.5)
            .build();
        assert!(matches!(
            negative,
            Err(SearchError::InvalidWeight { name: "cost", .. })
        ));

        let nan = MonteCarloTreeSearch::<SeededRandomGenerator>::builder(foods())
            .with_weights(0.5, f64::NAN)
            .build();
        assert!(matches!(
            nan,
            Err(SearchError::InvalidWeight {
                name: "benefit",
                ..
            })
        ));

        let capacity = MonteCarloTreeSearch::<SeededRandomGenerator>::builder(foods())
            .with_capacity(0.0)
            .build();
        assert!(matches!(capacity, Err(SearchError::InvalidCapacity(_))));
    }

    #[test]
    fn out_of_range_exploration_settings_are_rejected() {
        let build = |constant: f64, probability: f64| {
            MonteCarloTreeSearch::<SeededRandomGenerator>::builder(foods())
                .with_exploration_constant(constant)
                .with_explore_probability(probability)
                .build()
        };

        for probability in [1.5, -0.1, f64::NAN] {
            assert!(matches!(
                build(1.41, probability),
                Err(SearchError::InvalidParameter {
                    name: "explore_probability",
                    ..
                })
            ));
        }
        for constant in [f64::NAN, -1.0, f64::INFINITY] {
            assert!(matches!(
                build(constant, 0.1),
                Err(SearchError::InvalidParameter {
                    name: "exploration_constant",
                    ..
                })
            ));
        }
        assert!(build(0.0, 0.0).is_ok());
        assert!(build(1.41, 1.0).is_ok());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut mcts = engine(foods(), 500.0, 1);
        assert_eq!(mcts.run(0), Err(SearchError::ZeroIterations));
    }

    #[test]
    fn single_oversized_item_is_infeasible() {
        // arrange
        let mut mcts = engine(catalog(&[("feast", 50.0, 10.0)]), 10.0, 1);

        // act
        let result = mcts.run(100);

        // assert
        assert_eq!(
            result,
            Err(SearchError::InfeasibleCapacity { capacity: 10.0 })
        );
    }

    #[test]
    fn only_feasible_item_is_selected() {
        // arrange
        let mut mcts = engine(catalog(&[("A", 10.0, 5.0), ("B", 20.0, 3.0)]), 15.0, 42);

        // act
        let result = mcts.run(50).unwrap();

        // assert
        assert_eq!(ids(&result.items), vec!["A"]);
        assert_eq!(result.total_cost, 10.0);
        assert_eq!(result.total_benefit, 5.0);
        assert_eq!(mcts.get_tree().children(mcts.get_tree().root_id()).len(), 1);
    }

    #[test]
    fn root_visits_equal_iterations() {
        for iterations in [1, 7, 300] {
            let mut mcts = engine(foods(), 600.0, 9);
            mcts.run(iterations).unwrap();
            assert_eq!(mcts.get_root().visits, iterations);
        }
    }

    #[test]
    fn every_node_respects_capacity() {
        // arrange
        let capacity = 450.0;
        let mut mcts = engine(foods(), capacity, 3);

        // act
        let result = mcts.run(2000).unwrap();

        // assert
        assert!(result.total_cost <= capacity);
        let tree = mcts.get_tree();
        let mut nodes = 0;
        walk(tree, tree.root_id(), &mut |_: NodeId, node: &MctsNode| {
            nodes += 1;
            assert!(node.cost <= capacity, "node over capacity: {node:?}");
        });
        assert!(nodes > 1);
    }

    #[test]
    fn children_are_distinct_by_item() {
        let mut mcts = engine(foods(), 800.0, 11);
        mcts.run(1500).unwrap();

        let tree = mcts.get_tree();
        walk(tree, tree.root_id(), &mut |id: NodeId, _: &MctsNode| {
            let mut labels: Vec<usize> = tree
                .children(id)
                .into_iter()
                .filter_map(|child| tree.node(child)?.item)
                .collect();
            let count = labels.len();
            labels.sort_unstable();
            labels.dedup();
            assert_eq!(labels.len(), count);
        });
    }

    #[test]
    fn same_seed_same_result() {
        let mut first = engine(foods(), 700.0, 1234);
        let mut second = engine(foods(), 700.0, 1234);

        let a = first.run(500).unwrap();
        let b = second.run(500).unwrap();

        assert_eq!(a, b);
        assert_eq!(first.get_tree().node_count(), second.get_tree().node_count());
    }

    #[test]
    fn benefit_biased_rollout_is_reproducible_and_feasible() {
        let build = || {
            MonteCarloTreeSearch::with_seed(foods(), 77)
                .with_capacity(500.0)
                .with_weights(0.2, 0.8)
                .with_rollout_policy(RolloutPolicy::BenefitBiased)
                .build()
                .unwrap()
        };
        let a = build().run(400).unwrap();
        let b = build().run(400).unwrap();

        assert_eq!(a, b);
        assert!(a.total_cost <= 500.0);
    }

    #[test]
    fn ties_resolve_to_first_catalog_item() {
        // either item fits alone, never both together
        let twins = catalog(&[("x", 10.0, 1.0), ("y", 10.0, 1.0)]);
        let mut mcts = MonteCarloTreeSearch::with_seed(twins, 5)
            .with_capacity(15.0)
            .with_explore_probability(0.0)
            .build()
            .unwrap();

        // act: one iteration expands the root's second child and visits it
        let result = mcts.run(1).unwrap();

        // assert: "x" has zero visits, "y" has one
        assert_eq!(ids(&result.items), vec!["y"]);

        // act: a second pass brings both children level at one visit each
        let result = mcts.run(2).unwrap();
        let root = mcts.get_tree().root_id();
        let visits: Vec<u32> = mcts
            .get_tree()
            .children(root)
            .into_iter()
            .map(|id| mcts.get_tree().node(id).unwrap().visits)
            .collect();

        // assert
        assert_eq!(visits, vec![1, 1]);
        assert_eq!(ids(&result.items), vec!["x"]);
    }

    #[test]
    fn run_discards_previous_tree() {
        let mut mcts = engine(foods(), 600.0, 21);
        mcts.run(200).unwrap();
        mcts.run(30).unwrap();
        assert_eq!(mcts.get_root().visits, 30);
    }

    #[test]
    fn expansion_adds_one_child_per_call_in_catalog_order() {
        let items = catalog(&[("a", 5.0, 1.0), ("b", 50.0, 1.0), ("c", 5.0, 1.0)]);
        let mut mcts = engine(items, 20.0, 2);
        let root = mcts.get_tree().root_id();

        let first = mcts.expand(root).unwrap();
        let second = mcts.expand(root).unwrap();
        let third = mcts.expand(root);

        let tree = mcts.get_tree();
        assert_eq!(tree.node(first).unwrap().item, Some(0));
        assert_eq!(tree.node(second).unwrap().item, Some(2));
        assert!(third.is_none());
        assert_eq!(tree.children(root).len(), 2);
        assert!(!tree.is_fully_expanded(root, 3));
    }

    // Expansion only deduplicates against a node's own children, so the same item can be
    // chosen twice along one path. This pins that behaviour; it is not a guarantee that
    // selections are free of repeats.
    #[test]
    fn repeated_item_along_a_path_is_possible() {
        let mut mcts = engine(catalog(&[("a", 5.0, 1.0)]), 20.0, 2);
        let root = mcts.get_tree().root_id();

        let a = mcts.expand(root).unwrap();
        let aa = mcts.expand(a).unwrap();

        let node = mcts.get_tree().node(aa).unwrap();
        assert_eq!(node.selection, vec![0, 0]);
        assert_eq!(node.cost, 10.0);
    }

    #[test]
    fn simulation_from_full_selection_scores_the_selection() {
        let mut mcts = engine(catalog(&[("A", 10.0, 5.0), ("B", 20.0, 3.0)]), 15.0, 4);
        let root = mcts.get_tree().root_id();
        let a = mcts.expand(root).unwrap();

        let reward = mcts.simulate(a);

        let expected = 0.7 * (5.0 / 5.0) - 0.3 * (10.0_f64 / 15.0).powi(2);
        assert!((reward - expected).abs() < 1e-12);
    }

    #[test]
    fn selection_descends_only_through_fully_expanded_nodes() {
        let pair = catalog(&[("a", 1.0, 1.0), ("b", 1.0, 2.0)]);
        let mut mcts = MonteCarloTreeSearch::with_seed(pair, 8)
            .with_capacity(100.0)
            .with_explore_probability(0.0)
            .build()
            .unwrap();
        let root = mcts.get_tree().root_id();

        mcts.expand(root).unwrap();
        assert_eq!(mcts.select(root), root);

        mcts.expand(root).unwrap();
        let selected = mcts.select(root);
        assert_ne!(selected, root);
        assert_eq!(mcts.get_tree().node(selected).unwrap().height, 1);
    }

    #[test]
    fn exploration_jumps_to_a_random_root_child() {
        let mut picked = Vec::new();
        for seed in 0..50 {
            // arrange: three of four children, so the root is not fully expanded
            let items = catalog(&[
                ("a", 1.0, 1.0),
                ("b", 1.0, 1.0),
                ("c", 1.0, 1.0),
                ("d", 1.0, 1.0),
            ]);
            let mut mcts = MonteCarloTreeSearch::with_seed(items, seed)
                .with_capacity(100.0)
                .with_explore_probability(1.0)
                .build()
                .unwrap();
            let root = mcts.get_tree().root_id();
            for _ in 0..3 {
                mcts.expand(root).unwrap();
            }
            assert!(!mcts.get_tree().is_fully_expanded(root, 4));

            // act
            let selected = mcts.select(root);

            // assert
            assert!(mcts.get_tree().children(root).contains(&selected));
            picked.push(mcts.get_tree().node(selected).unwrap().item);
        }

        picked.sort_unstable();
        picked.dedup();
        assert!(picked.len() > 1, "exploration always picked {picked:?}");
    }

    #[test]
    fn highest_benefit_keeps_first_maximum() {
        let items = [
            Item::new("low", 1.0, 1.0).unwrap(),
            Item::new("first", 1.0, 5.0).unwrap(),
            Item::new("second", 1.0, 5.0).unwrap(),
            Item::new("mid", 1.0, 2.0).unwrap(),
        ];
        let remaining: Vec<&Item> = items.iter().collect();

        assert_eq!(highest_benefit(&remaining), 1);
        assert_eq!(highest_benefit(&remaining[2..]), 0);
        assert_eq!(highest_benefit(&remaining[..1]), 0);
    }

    #[test]
    fn benefit_biased_rollout_outscores_uniform() {
        // "gold" fills the capacity alone; any pebble taken first shuts it out
        let mut items = vec![("gold".to_string(), 10.0, 100.0)];
        items.extend((1..=9).map(|n| (format!("pebble{n}"), 1.0, 1.0)));
        let average = |rollout: RolloutPolicy| {
            let hoard = Catalog::new(
                items
                    .iter()
                    .map(|(id, cost, benefit)| Item::new(id.as_str(), *cost, *benefit).unwrap())
                    .collect(),
            )
            .unwrap();
            let mut mcts = MonteCarloTreeSearch::with_seed(hoard, 13)
                .with_capacity(10.0)
                .with_weights(0.0, 1.0)
                .with_rollout_policy(rollout)
                .build()
                .unwrap();
            let root = mcts.get_tree().root_id();
            let rounds = 400;
            (0..rounds).map(|_| mcts.simulate(root)).sum::<f64>() / rounds as f64
        };

        let uniform = average(RolloutPolicy::Uniform);
        let biased = average(RolloutPolicy::BenefitBiased);

        assert!(
            biased > uniform + 0.2,
            "biased {biased} should beat uniform {uniform}"
        );
    }

    #[test]
    fn search_uses_config_seed() {
        let config = SearchConfig {
            iterations: 300,
            capacity: 650.0,
            seed: Some(99),
            ..SearchConfig::default()
        };

        let a = search(foods(), &config).unwrap();
        let b = search(foods(), &config).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.iterations, 300);
        assert!(a.total_cost <= 650.0);
    }

    #[test]
    fn root_report_lists_root_then_children() {
        let mut mcts = engine(foods(), 600.0, 5);
        mcts.run(100).unwrap();

        let report = mcts.root_report();

        let tree = mcts.get_tree();
        assert_eq!(report.len(), 1 + tree.children(tree.root_id()).len());
        assert_eq!(report[0].visits, 100);
        assert_eq!(report[0].selection, "");
        assert!(!report[1].selection.is_empty());
    }
}
