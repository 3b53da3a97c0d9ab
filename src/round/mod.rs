//! Round of golf: state, repair of stored data, and the mutation API
//!
//! Nothing in here touches the DOM or the filesystem directly; storage is
//! handed in through the `Storage` trait so a store can be built fresh per test.

pub mod config;
pub mod reconcile;
pub mod state;
pub mod store;

pub use config::RoundConfig;
pub use reconcile::reconcile;
pub use state::{RoundState, blank_row};
pub use store::{ScoreStore, Selection};
