pub const LOG_LEVEL: &str = "info";

pub const VERBOSE_LOGGING: bool = false;

/// Page size used when a paginated field is queried without an explicit size.
pub const DEFAULT_PAGE_SIZE: usize = 15;

pub const MAX_PAGE_SIZE: usize = 100;

pub const GRAPHQL_INTROSPECTION: bool = true;
