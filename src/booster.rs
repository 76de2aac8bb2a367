//! The boosting engine and its incremental LP bookkeeping.

mod column_generation;
mod lpboost;

pub use lpboost::{
    BoostConfig,
    MclpBoost,
};
