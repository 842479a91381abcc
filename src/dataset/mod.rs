//! Dataset loading pipeline
//!
//! Raw delimited text is tokenized into rows, projected into normalized
//! records (effort hours, quarter), and handed to the dashboard as one
//! immutable record set.

pub mod delimited;
pub mod duration;
pub mod error;
pub mod loader;
pub mod projector;
pub mod quarter;

pub use loader::{DataSource, Dataset};
pub use projector::{Record, Status};
pub use quarter::Quarter;
