pub mod cache {

    pub const DEFAULT_TTL_DAYS: i64 = 30;

    pub const DEFAULT_PURGE_INTERVAL_MINUTES: u32 = 60;
}

pub mod labels {

    pub const NAME_SEARCH_LIMIT: u32 = 50;

    pub const GENERIC_SEARCH_LIMIT: u32 = 20;

    pub const MAX_BRAND_NAMES: usize = 5;
}

pub mod summary {

    pub const SOURCE_AI: &str = "US FDA (AI Enhanced)";

    pub const SOURCE_RAW: &str = "US FDA (Raw)";

    pub const NOT_AVAILABLE: &str = "Information not available.";

    pub const UNKNOWN_CLASS: &str = "Unknown";

    pub const GENERIC_PLACEHOLDER: &str = "Generic";

    pub const MAX_LABEL_CHARS: usize = 15_000;
}

pub mod cabinet {

    pub const OWNER_HEADER: &str = "x-cabinet-owner";

    pub const DEFAULT_OWNER: &str = "default";

    pub const MAX_OWNER_LEN: usize = 64;
}

pub mod limits {

    pub const MAX_QUERY_LEN: usize = 256;

    pub const MAX_INTERACTION_DRUGS: usize = 10;
}
