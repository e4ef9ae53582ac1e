//! Data source collaborators.
//!
//! The engine never talks to a spreadsheet itself: a `DataSource` hands it
//! worksheet rows as JSON objects and the snapshot loader turns them into
//! records. Connection strategy, retries and fallbacks live here, away
//! from classification.

pub mod data_source;
pub mod fallback;
pub mod json_dir;
pub mod memory;
pub mod snapshot;

pub use data_source::*;
pub use fallback::*;
pub use json_dir::*;
pub use memory::*;
pub use snapshot::*;
