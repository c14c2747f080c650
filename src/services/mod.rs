pub mod cabinet;
pub use cabinet::{CabinetError, CabinetService};

pub mod drug_search;
pub use drug_search::{DrugSearchError, DrugSearchService, SearchOutcome};

pub mod interactions;
pub use interactions::{InteractionError, InteractionService};

pub mod matching;
pub mod prompts;
pub mod resolution;

pub mod scheduler;
pub use scheduler::CachePurgeScheduler;

pub mod summarize;
