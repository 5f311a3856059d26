//! Page slicing and the pager window.

use serde::{Serialize, Serializer};

/// Most page links the pager shows before collapsing runs into ellipses.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One slot in the pager line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    Ellipsis,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(n) => serializer.serialize_u64(*n as u64),
            PageLink::Ellipsis => serializer.serialize_str("..."),
        }
    }
}

/// Number of pages needed for `total` items; zero for no items.
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

/// Clamps a 1-based page number into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// The items on 1-based `page`; empty past the end.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let start = page.saturating_sub(1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

/// The pager slots around `current`.
///
/// Up to [`MAX_VISIBLE_PAGES`] pages are all listed. Beyond that the first
/// and last pages are always shown: near the start `1 2 3 4 … N`, near the
/// end `1 … N-3 N-2 N-1 N`, otherwise `1 … p-1 p p+1 … N`.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    use PageLink::{Ellipsis, Page};

    if total_pages <= MAX_VISIBLE_PAGES {
        return (1..=total_pages).map(Page).collect();
    }
    if current <= 3 {
        return vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(total_pages)];
    }
    if current >= total_pages - 2 {
        return vec![
            Page(1),
            Ellipsis,
            Page(total_pages - 3),
            Page(total_pages - 2),
            Page(total_pages - 1),
            Page(total_pages),
        ];
    }
    vec![
        Page(1),
        Ellipsis,
        Page(current - 1),
        Page(current),
        Page(current + 1),
        Ellipsis,
        Page(total_pages),
    ]
}

#[cfg(test)]
mod tests {
    use super::PageLink::{Ellipsis, Page};
    use super::*;

    #[test]
    fn counts_pages() {
        assert_eq!(page_count(0, 20), 0);
        assert_eq!(page_count(1, 20), 1);
        assert_eq!(page_count(20, 20), 1);
        assert_eq!(page_count(21, 20), 2);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn clamps_pages() {
        assert_eq!(clamp_page(0, 4), 1);
        assert_eq!(clamp_page(9, 4), 4);
        assert_eq!(clamp_page(3, 0), 1);
    }

    #[test]
    fn slices_pages() {
        let items: Vec<u32> = (1..=45).collect();
        assert_eq!(page_slice(&items, 1, 20), &items[0..20]);
        assert_eq!(page_slice(&items, 3, 20), &[41, 42, 43, 44, 45]);
        assert!(page_slice(&items, 4, 20).is_empty());
        assert!(page_slice(&items, usize::MAX, 20).is_empty());
    }

    #[test]
    fn small_totals_list_everything() {
        assert!(page_window(1, 0).is_empty());
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(5, 5).len(), 5);
    }

    #[test]
    fn window_near_start() {
        assert_eq!(
            page_window(3, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_near_end() {
        assert_eq!(
            page_window(8, 10),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_in_middle() {
        assert_eq!(
            page_window(5, 10),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn serializes_as_numbers_and_dots() {
        let json = serde_json::to_string(&page_window(1, 6)).unwrap();
        assert_eq!(json, r#"[1,2,3,4,"...",6]"#);
    }
}
