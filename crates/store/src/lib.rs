//! The marketplace's single logical datastore.
//!
//! [`MarketStore`] holds all persistent state behind one async
//! read-write lock. A write guard spans a whole operation, so a
//! multi-row mutation such as checkout commits atomically or not at
//! all — there is no observable partial state.

pub mod error;
pub mod state;
pub mod store;

pub use error::{Result, StoreError};
pub use state::StoreState;
pub use store::MarketStore;
