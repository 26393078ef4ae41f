use thiserror::Error;

/// Errors that terminate a single search invocation.
///
/// Every variant is detected either while the engine is being built or at the end of
/// [`MonteCarloTreeSearch::run`](crate::mcts::MonteCarloTreeSearch::run); no partial selection
/// is ever returned alongside one of them.
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    /// The catalog handed to the engine has no items.
    #[error("catalog contains no items")]
    EmptyCatalog,

    /// One of the objective weights is negative or not finite.
    #[error("{name} weight must be finite and non-negative, got {value}")]
    InvalidWeight {
        /// Which weight was rejected (`"cost"`, `"benefit"` or `"total"`).
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Seeding the root produced no child: no single item fits within the capacity.
    #[error("no single item fits within capacity {capacity}")]
    InfeasibleCapacity {
        /// The capacity limit the search ran with.
        capacity: f64,
    },

    /// The capacity limit is not a finite, strictly positive number.
    #[error("capacity must be finite and positive, got {0}")]
    InvalidCapacity(f64),

    /// The exploration constant or the explore probability is outside its range.
    #[error("{name} must be finite and within range, got {value}")]
    InvalidParameter {
        /// `"exploration_constant"` or `"explore_probability"`.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The iteration budget is zero.
    #[error("iteration budget must be positive")]
    ZeroIterations,
}

/// Errors raised while building a [`Catalog`](crate::item::Catalog) or ingesting records into one.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate item identifier: {0}")]
    DuplicateItem(String),

    #[error("item {id} has invalid cost {value}")]
    InvalidCost { id: String, value: f64 },

    #[error("item {id} has invalid benefit {value}")]
    InvalidBenefit { id: String, value: f64 },

    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("row {row}: cannot read {field} from {value:?}")]
    MalformedQuantity {
        row: usize,
        field: String,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a [`SearchConfig`](crate::config::SearchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] SearchError),
}
