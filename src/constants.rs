pub mod paging {

    pub const PAGE_SIZE: u64 = 10;
}

pub mod limits {

    pub const DEFAULT_TOP_QUERIES: usize = 5;

    /// Cast lists longer than this are cut when rendered.
    pub const MAX_ACTORS_WIDTH: usize = 85;
}

pub mod search_log {

    pub const DEFAULT_DATABASE: &str = "reelsearch";

    pub const DEFAULT_COLLECTION: &str = "search_logs";
}
