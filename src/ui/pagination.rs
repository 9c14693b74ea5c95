/// Number of queue entries shown per page.
pub const PAGE_SIZE: usize = 10;

/// One page of a paginated list.
#[derive(Debug, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// Effective page index after clamping.
    pub page: usize,
    pub total_pages: usize,
    /// Number of items on earlier pages, for absolute 1-based numbering.
    pub offset: usize,
}

/// Slice `items` into the requested page.
///
/// The requested page is clamped into `[0, total_pages - 1]`, so a stored
/// page index that went stale after the list shrank renders the last page
/// instead of panicking. An empty list yields an empty page 0 of 0.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let total_pages = items.len().div_ceil(page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let start = page * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        page,
        total_pages,
        offset: start,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn entries(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("track {i}")).collect()
    }

    #[test_case(0, 0 ; "empty list has zero pages")]
    #[test_case(1, 1 ; "single entry")]
    #[test_case(10, 1 ; "exactly one full page")]
    #[test_case(11, 2 ; "one overflow entry opens a page")]
    #[test_case(25, 3 ; "partial last page")]
    fn total_pages_is_ceiling(len: usize, expected: usize) {
        let items = entries(len);
        assert_eq!(paginate(&items, 0, PAGE_SIZE).total_pages, expected);
    }

    #[test_case(25, 0, 10 ; "full first page")]
    #[test_case(25, 1, 10 ; "full middle page")]
    #[test_case(25, 2, 5 ; "short last page")]
    fn slice_len_matches_remaining(len: usize, page: usize, expected: usize) {
        let items = entries(len);
        let view = paginate(&items, page, PAGE_SIZE);
        assert_eq!(view.items.len(), expected);
        assert_eq!(view.items.len(), PAGE_SIZE.min(len - page * PAGE_SIZE));
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let items = entries(25);
        let view = paginate(&items, 99, PAGE_SIZE);
        assert_eq!(view.page, 2);
        assert_eq!(view.offset, 20);
        assert_eq!(view.items.len(), 5);
    }

    #[test]
    fn empty_list_clamps_to_page_zero() {
        let items: Vec<String> = Vec::new();
        let view = paginate(&items, 4, PAGE_SIZE);
        assert_eq!(view.page, 0);
        assert_eq!(view.total_pages, 0);
        assert!(view.items.is_empty());
    }

    #[test]
    fn offset_numbers_follow_pages() {
        let items = entries(25);
        let view = paginate(&items, 1, PAGE_SIZE);
        assert_eq!(view.offset, 10);
        assert_eq!(view.items.first().map(String::as_str), Some("track 11"));
    }
}
