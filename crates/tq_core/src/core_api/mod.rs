mod engine;
mod error;
mod item_resolver;
mod types;

pub use engine::{Engine, Session};
pub use error::CoreError;
pub use item_resolver::{ItemResolver, RecordPathResolver};
pub use types::{ItemEntry, ResolvedItemEntry, SackSummary, Snapshot};
