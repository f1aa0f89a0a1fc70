//! Pager logic for paginated listings
//!
//! Pages are numbered from 1. At most five page buttons are shown, centered
//! on the current page where possible.

/// Most page numbers shown at once
pub const MAX_VISIBLE_PAGES: u32 = 5;

/// Page numbers to show for `current` out of `total_pages`
///
/// # Examples
/// ```
/// use admintui::logic::pagination::page_window;
///
/// assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
/// assert_eq!(page_window(6, 10), vec![4, 5, 6, 7, 8]);
/// assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
/// assert_eq!(page_window(2, 3), vec![1, 2, 3]);
/// ```
pub fn page_window(current: u32, total_pages: u32) -> Vec<u32> {
    let count = MAX_VISIBLE_PAGES.min(total_pages);
    let upper_start = i64::from(total_pages) - i64::from(MAX_VISIBLE_PAGES - 1);
    let centered = i64::from(current) - 2;
    let start = upper_start.min(centered).max(1) as u32;
    (start..start + count).collect()
}

/// Whether the pager is shown at all
pub fn has_pager(total_pages: u32) -> bool {
    total_pages > 1
}

/// First/Prev are enabled
pub fn can_go_back(current: u32) -> bool {
    current > 1
}

/// Next/Last are enabled
pub fn can_go_forward(current: u32, total_pages: u32) -> bool {
    current < total_pages
}

/// Target page for a pager step, clamped to the valid range
pub fn step(current: u32, total_pages: u32, forward: bool) -> u32 {
    if forward {
        if can_go_forward(current, total_pages) {
            current + 1
        } else {
            current
        }
    } else if can_go_back(current) {
        current - 1
    } else {
        current
    }
}

/// "Page 2 of 5 (43 total items)"
pub fn summary(current: u32, total_pages: u32, total_items: u64) -> String {
    format!(
        "Page {} of {} ({} total items)",
        current, total_pages, total_items
    )
}
