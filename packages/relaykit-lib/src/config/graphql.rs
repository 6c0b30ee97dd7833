use crate::defaults;
use serde::Deserialize;

/// Settings applied when binding paginated fields into the GraphQL schema.
#[derive(Clone, Deserialize, Debug, PartialEq, Eq)]
pub struct GraphQLConfig {
    /// Page size used when `first` is not supplied to a paginated field.
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Upper bound for the `first` argument of a paginated field.
    #[serde(default = "max_page_size")]
    pub max_page_size: usize,

    /// Allow introspection queries against the built schema.
    #[serde(default = "introspection")]
    pub introspection: bool,
}

fn default_page_size() -> usize {
    defaults::DEFAULT_PAGE_SIZE
}

fn max_page_size() -> usize {
    defaults::MAX_PAGE_SIZE
}

fn introspection() -> bool {
    defaults::GRAPHQL_INTROSPECTION
}

impl GraphQLConfig {
    /// Clamp a requested page size into `1..=max_page_size`, falling back to
    /// `default_page_size` when nothing was requested.
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size.max(1))
    }
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            default_page_size: defaults::DEFAULT_PAGE_SIZE,
            max_page_size: defaults::MAX_PAGE_SIZE,
            introspection: defaults::GRAPHQL_INTROSPECTION,
        }
    }
}
