//! Projection of a paginated collection onto the `PageInfo` type.
//! See: https://relay.dev/graphql/connections.htm#sec-PageInfo
//!
//! Collections without pagination metadata never fail here; every field falls
//! back to `false` or `null`.

use crate::{
    global_id::{encode_global_id, ARRAY_CONNECTION},
    paginator::Paginated,
};

/// Resolved `PageInfo` record, ready to be handed to the executor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    pub total: Option<i64>,
    pub count: Option<i64>,
    pub current_page: Option<i64>,
    pub last_page: Option<i64>,
}

impl PageInfo {
    pub fn resolve<P: Paginated + ?Sized>(collection: &P) -> Self {
        Self {
            has_next_page: has_next_page(collection),
            has_previous_page: has_previous_page(collection),
            start_cursor: start_cursor(collection),
            end_cursor: end_cursor(collection),
            total: total(collection),
            count: count(collection),
            current_page: current_page(collection),
            last_page: last_page(collection),
        }
    }
}

pub fn has_next_page<P: Paginated + ?Sized>(collection: &P) -> bool {
    collection
        .length_aware()
        .map(|page| page.has_more_pages())
        .unwrap_or(false)
}

pub fn has_previous_page<P: Paginated + ?Sized>(collection: &P) -> bool {
    collection
        .length_aware()
        .map(|page| page.current_page() > 1)
        .unwrap_or(false)
}

// The cursor offset is the item index multiplied by the page number.
// An empty page contributes an index of 0. Offsets saturate at `i64::MAX`.
pub fn start_cursor<P: Paginated + ?Sized>(collection: &P) -> Option<String> {
    collection.length_aware().map(|page| {
        encode_global_id(
            ARRAY_CONNECTION,
            page.first_item().unwrap_or(0).saturating_mul(page.current_page()),
        )
    })
}

pub fn end_cursor<P: Paginated + ?Sized>(collection: &P) -> Option<String> {
    collection.length_aware().map(|page| {
        encode_global_id(
            ARRAY_CONNECTION,
            page.last_item().unwrap_or(0).saturating_mul(page.current_page()),
        )
    })
}

pub fn total<P: Paginated + ?Sized>(collection: &P) -> Option<i64> {
    collection.length_aware().map(|page| page.total())
}

pub fn count<P: Paginated + ?Sized>(collection: &P) -> Option<i64> {
    collection.length_aware().map(|page| page.count())
}

pub fn current_page<P: Paginated + ?Sized>(collection: &P) -> Option<i64> {
    collection.length_aware().map(|page| page.current_page())
}

pub fn last_page<P: Paginated + ?Sized>(collection: &P) -> Option<i64> {
    collection.length_aware().map(|page| page.last_page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        global_id::{decode_cursor, encode_cursor},
        paginator::{LengthAwarePage, LengthAwarePaginator, PaginatedCollection},
    };
    use pretty_assertions::assert_eq;

    /// Paginator with fixed metadata, independent of any item storage.
    struct FixedPage {
        current_page: i64,
        first_item: Option<i64>,
        last_item: Option<i64>,
        total: i64,
        count: i64,
        last_page: i64,
        has_more_pages: bool,
    }

    impl LengthAwarePaginator for FixedPage {
        fn current_page(&self) -> i64 {
            self.current_page
        }

        fn first_item(&self) -> Option<i64> {
            self.first_item
        }

        fn last_item(&self) -> Option<i64> {
            self.last_item
        }

        fn total(&self) -> i64 {
            self.total
        }

        fn count(&self) -> i64 {
            self.count
        }

        fn last_page(&self) -> i64 {
            self.last_page
        }

        fn has_more_pages(&self) -> bool {
            self.has_more_pages
        }
    }

    impl Paginated for FixedPage {
        fn length_aware(&self) -> Option<&dyn LengthAwarePaginator> {
            Some(self)
        }
    }

    fn second_page() -> FixedPage {
        FixedPage {
            current_page: 2,
            first_item: Some(11),
            last_item: Some(20),
            total: 100,
            count: 10,
            last_page: 10,
            has_more_pages: true,
        }
    }

    #[test]
    fn test_resolve_second_page() {
        assert_eq!(
            PageInfo::resolve(&second_page()),
            PageInfo {
                has_next_page: true,
                has_previous_page: true,
                start_cursor: Some(encode_cursor(22)),
                end_cursor: Some(encode_cursor(40)),
                total: Some(100),
                count: Some(10),
                current_page: Some(2),
                last_page: Some(10),
            }
        );
    }

    #[test]
    fn test_cursors_scale_item_index_by_page() {
        let info = PageInfo::resolve(&second_page());

        assert_eq!(info.start_cursor.as_deref(), Some("YXJyYXljb25uZWN0aW9uOjIy"));
        assert_eq!(decode_cursor(&info.start_cursor.unwrap()).unwrap(), 22);
        assert_eq!(decode_cursor(&info.end_cursor.unwrap()).unwrap(), 40);
    }

    #[test]
    fn test_flags_follow_paginator() {
        let last = FixedPage {
            current_page: 10,
            first_item: Some(91),
            last_item: Some(100),
            has_more_pages: false,
            ..second_page()
        };
        assert!(!has_next_page(&last));
        assert!(has_previous_page(&last));

        let first = FixedPage {
            current_page: 1,
            first_item: Some(1),
            last_item: Some(10),
            ..second_page()
        };
        assert!(has_next_page(&first));
        assert!(!has_previous_page(&first));
    }

    #[test]
    fn test_sequences_degrade_to_defaults() {
        let empty: Vec<u32> = Vec::new();

        assert_eq!(PageInfo::resolve(&vec![1, 2, 3]), PageInfo::default());
        assert_eq!(PageInfo::resolve(&empty), PageInfo::default());
        assert_eq!(PageInfo::resolve(&["a", "b"][..]), PageInfo::default());
        assert_eq!(
            PageInfo::resolve(&PaginatedCollection::from(vec![1, 2, 3])),
            PageInfo::default()
        );

        let info = PageInfo::resolve(&vec![1]);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
        assert_eq!(info.start_cursor, None);
        assert_eq!(info.total, None);
    }

    #[test]
    fn test_resolve_paginated_collection() {
        let page = LengthAwarePage::paginate((1..=100).collect::<Vec<u32>>(), 10, 2).unwrap();
        let info = PageInfo::resolve(&PaginatedCollection::from(page));

        assert_eq!(info, PageInfo::resolve(&second_page()));
    }

    #[test]
    fn test_empty_page_cursors_use_zero_offset() {
        let page = LengthAwarePage::<u32>::paginate(Vec::new(), 10, 1).unwrap();
        let info = PageInfo::resolve(&page);

        assert_eq!(info.start_cursor, Some(encode_cursor(0)));
        assert_eq!(info.end_cursor, Some(encode_cursor(0)));
        assert_eq!(info.count, Some(0));
        assert_eq!(info.last_page, Some(1));
        assert!(!info.has_next_page);
    }

    #[test]
    fn test_large_page_numbers_saturate_cursor_offsets() {
        let page = LengthAwarePage::new(vec![1u8], 100, 10, 4_000_000_000).unwrap();
        let info = PageInfo::resolve(&page);

        assert_eq!(info.start_cursor, Some(encode_cursor(i64::MAX)));
        assert_eq!(info.end_cursor, Some(encode_cursor(i64::MAX)));
        assert_eq!(info.current_page, Some(4_000_000_000));
        assert!(!info.has_next_page);

        let page = LengthAwarePage::new(vec![1u8], 100, i64::MAX, 1).unwrap();
        let info = PageInfo::resolve(&page);
        assert_eq!(info.last_page, Some(1));
        assert_eq!(info.start_cursor, Some(encode_cursor(1)));
    }
}
