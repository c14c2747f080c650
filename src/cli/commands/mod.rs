mod cache;
mod interactions;
mod search;

pub use cache::{cmd_clear_cache, cmd_purge_cache};
pub use interactions::cmd_interactions;
pub use search::cmd_search;
