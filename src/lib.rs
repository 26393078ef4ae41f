//! Capacity-constrained subset selection with Monte Carlo tree search.
//!
//! Given a catalog of items, each with a cost and a benefit, the search picks an ordered
//! selection whose total cost stays within a capacity limit while trading off low total cost
//! against high total benefit according to two caller-supplied weights. MCTS is a heuristic:
//! more iterations give better selections, but optimality is never guaranteed.
//!
//! # Example
//!
//! ```rust
//! use mcts_planner::item::{Catalog, Item};
//! use mcts_planner::mcts::MonteCarloTreeSearch;
//! use mcts_planner::random::SeededRandomGenerator;
//!
//! let catalog = Catalog::new(vec![
//!     Item::new("apple", 52.0, 218.0).unwrap(),
//!     Item::new("bread", 265.0, 1109.0).unwrap(),
//!     Item::new("rice", 130.0, 544.0).unwrap(),
//! ])
//! .unwrap();
//!
//! // Create and configure a new search using the builder
//! let mut mcts = MonteCarloTreeSearch::builder(catalog)
//!     .with_random_generator(SeededRandomGenerator::new(7))
//!     .with_capacity(400.0)
//!     .with_weights(0.3, 0.7)
//!     .build()
//!     .unwrap();
//!
//! // Run the search for a number of iterations
//! let plan = mcts.run(1000).unwrap();
//! assert!(plan.total_cost <= 400.0);
//!
//! for item in &plan.items {
//!     println!("{} - cost {}, benefit {}", item.id(), item.cost(), item.benefit());
//! }
//! ```

/// Search configuration, loadable from TOML.
pub mod config;
/// Error types for searching, catalog building and configuration.
pub mod error;
/// Reading raw records into a catalog.
pub mod ingest;
/// The `Item` and `Catalog` types the search selects from.
pub mod item;
/// The core module of the library, containing the `MonteCarloTreeSearch` implementation.
pub mod mcts;
/// Contains the `MctsNode` struct, which represents a node in the search tree.
pub mod mcts_node;
/// Contains traits and implementations for random number generation.
pub mod random;
/// Diagnostic export of root statistics.
pub mod report;
/// The reward law that scores a completed selection.
pub mod scoring;
/// The arena that owns every node of one search.
pub mod tree;

pub use config::SearchConfig;
pub use error::{CatalogError, ConfigError, SearchError};
pub use item::{Catalog, Item};
pub use mcts::{MonteCarloTreeSearch, RolloutPolicy, SearchResult, search};
