//! Paginated collections and the length-aware paginator capability.

use crate::{GraphqlError, GraphqlResult};

/// A page of results that knows the size of the whole result set.
pub trait LengthAwarePaginator {
    /// 1-based number of the current page.
    fn current_page(&self) -> i64;

    /// 1-based index of the first item on this page, `None` when the page is empty.
    fn first_item(&self) -> Option<i64>;

    /// 1-based index of the last item on this page, `None` when the page is empty.
    fn last_item(&self) -> Option<i64>;

    /// Number of items in the whole result set.
    fn total(&self) -> i64;

    /// Number of items on this page.
    fn count(&self) -> i64;

    fn last_page(&self) -> i64;

    fn has_more_pages(&self) -> bool;
}

/// Anything that can be handed to a `PageInfo` resolver.
///
/// Only collections that carry pagination metadata return a paginator;
/// everything else is treated as a plain sequence.
pub trait Paginated {
    fn length_aware(&self) -> Option<&dyn LengthAwarePaginator> {
        None
    }
}

impl<T> Paginated for Vec<T> {}

impl<T> Paginated for [T] {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LengthAwarePage<T> {
    items: Vec<T>,
    total: i64,
    per_page: i64,
    current_page: i64,
}

impl<T> LengthAwarePage<T> {
    /// Wrap the items of a single page.
    ///
    /// `current_page` values below 1 are treated as the first page.
    pub fn new(
        items: Vec<T>,
        total: i64,
        per_page: i64,
        current_page: i64,
    ) -> GraphqlResult<Self> {
        if per_page < 1 {
            return Err(GraphqlError::InvalidPagination(format!(
                "per page must be at least 1, got {per_page}"
            )));
        }

        if total < 0 {
            return Err(GraphqlError::InvalidPagination(format!(
                "total cannot be negative, got {total}"
            )));
        }

        Ok(Self {
            items,
            total,
            per_page,
            current_page: current_page.max(1),
        })
    }

    /// Slice page `page` out of a complete result set.
    pub fn paginate(all: Vec<T>, per_page: i64, page: i64) -> GraphqlResult<Self> {
        let total = i64::try_from(all.len()).map_err(|_| {
            GraphqlError::InvalidPagination("result set too large".to_string())
        })?;
        let page = page.max(1);
        let take = usize::try_from(per_page).unwrap_or(0);
        let skip = usize::try_from(page.saturating_sub(1).saturating_mul(per_page))
            .unwrap_or(usize::MAX);

        let items = all.into_iter().skip(skip).take(take).collect();

        Self::new(items, total, per_page, page)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }
}

impl<T> LengthAwarePaginator for LengthAwarePage<T> {
    fn current_page(&self) -> i64 {
        self.current_page
    }

    fn first_item(&self) -> Option<i64> {
        if self.items.is_empty() {
            None
        } else {
            Some(
                (self.current_page - 1)
                    .saturating_mul(self.per_page)
                    .saturating_add(1),
            )
        }
    }

    fn last_item(&self) -> Option<i64> {
        self.first_item()
            .map(|first| first.saturating_add(self.count() - 1))
    }

    fn total(&self) -> i64 {
        self.total
    }

    fn count(&self) -> i64 {
        self.items.len() as i64
    }

    fn last_page(&self) -> i64 {
        (self.total / self.per_page + i64::from(self.total % self.per_page != 0)).max(1)
    }

    fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }
}

impl<T> Paginated for LengthAwarePage<T> {
    fn length_aware(&self) -> Option<&dyn LengthAwarePaginator> {
        Some(self)
    }
}

/// The value a connection field resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginatedCollection<T> {
    LengthAware(LengthAwarePage<T>),
    Sequence(Vec<T>),
}

impl<T> PaginatedCollection<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Self::LengthAware(page) => page.items(),
            Self::Sequence(items) => items.as_slice(),
        }
    }
}

impl<T> Paginated for PaginatedCollection<T> {
    fn length_aware(&self) -> Option<&dyn LengthAwarePaginator> {
        match self {
            Self::LengthAware(page) => Some(page),
            Self::Sequence(_) => None,
        }
    }
}

impl<T> From<Vec<T>> for PaginatedCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items)
    }
}

impl<T> From<LengthAwarePage<T>> for PaginatedCollection<T> {
    fn from(page: LengthAwarePage<T>) -> Self {
        Self::LengthAware(page)
    }
}
