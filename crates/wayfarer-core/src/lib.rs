pub mod classifier;
pub mod error;
pub mod itinerary;
pub mod payload;
pub mod reconcile;
pub mod sections;
pub mod types;

pub use error::{Result, WayfarerError};
