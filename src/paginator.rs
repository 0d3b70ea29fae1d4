//! Page navigation logic
//!
//! The paginator is a pure function of `(page, max_page)`: it decides which
//! navigation controls are shown and which page each one requests. Only
//! in-range targets are ever offered, so a page change coming from a control
//! never needs clamping.

use serde::Serialize;

/// Kind of a navigation control, independent of its page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageControlKind {
    First,
    Previous,
    Current,
    Next,
    Last,
}

/// A rendered navigation control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageControl {
    pub kind: PageControlKind,
    /// Page this control refers to. For `Current` this is the page itself.
    pub page: usize,
}

impl PageControl {
    fn new(kind: PageControlKind, page: usize) -> Self {
        Self { kind, page }
    }

    /// Text shown on the control.
    pub fn label(&self) -> String {
        match self.kind {
            PageControlKind::First => "<<".to_string(),
            PageControlKind::Last => ">>".to_string(),
            PageControlKind::Previous | PageControlKind::Current | PageControlKind::Next => {
                self.page.to_string()
            }
        }
    }

    /// Page requested when the control is activated.
    ///
    /// The current-page indicator is not interactive and returns `None`.
    pub fn target(&self) -> Option<usize> {
        match self.kind {
            PageControlKind::Current => None,
            _ => Some(self.page),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.target().is_some()
    }
}

/// Paginator props: the current page and the number of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page: usize,
    max_page: usize,
}

impl Paginator {
    /// Build a paginator. `max_page` is raised to 1 and `page` kept inside
    /// `[1, max_page]`.
    pub fn new(page: usize, max_page: usize) -> Self {
        let max_page = max_page.max(1);
        Self {
            page: page.clamp(1, max_page),
            max_page,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn max_page(&self) -> usize {
        self.max_page
    }

    /// Controls to render, in display order.
    pub fn controls(&self) -> Vec<PageControl> {
        let mut controls = Vec::with_capacity(5);

        if self.page > 1 {
            controls.push(PageControl::new(PageControlKind::First, 1));
            controls.push(PageControl::new(PageControlKind::Previous, self.page - 1));
        }

        controls.push(PageControl::new(PageControlKind::Current, self.page));

        if self.page < self.max_page {
            controls.push(PageControl::new(PageControlKind::Next, self.page + 1));
            controls.push(PageControl::new(PageControlKind::Last, self.max_page));
        }

        controls
    }

    /// Activate a control by kind, returning the requested page.
    ///
    /// Returns `None` when that control is not currently rendered.
    pub fn request(&self, kind: PageControlKind) -> Option<usize> {
        self.controls()
            .into_iter()
            .find(|c| c.kind == kind)
            .and_then(|c| c.target())
    }
}

/// Number of pages needed for `len` items, never less than 1.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// The window `[(page-1)*page_size, page*page_size)` of `items`, truncated to
/// the slice bounds.
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let page_size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(paginator: &Paginator) -> Vec<String> {
        paginator.controls().iter().map(|c| c.label()).collect()
    }

    #[test]
    fn test_single_page_renders_only_indicator() {
        let paginator = Paginator::new(1, 1);
        let controls = paginator.controls();
        assert_eq!(controls.len(), 1);
        assert_eq!(controls[0].kind, PageControlKind::Current);
        assert_eq!(controls[0].label(), "1");
        assert!(!controls[0].is_interactive());
    }

    #[test]
    fn test_middle_page_renders_all_controls() {
        let paginator = Paginator::new(5, 10);
        assert_eq!(labels(&paginator), vec!["<<", "4", "5", "6", ">>"]);
    }

    #[test]
    fn test_first_page_hides_first_and_previous() {
        let paginator = Paginator::new(1, 10);
        assert_eq!(labels(&paginator), vec!["1", "2", ">>"]);
    }

    #[test]
    fn test_last_page_hides_next_and_last() {
        let paginator = Paginator::new(10, 10);
        assert_eq!(labels(&paginator), vec!["<<", "9", "10"]);
    }

    #[test]
    fn test_control_targets() {
        let paginator = Paginator::new(5, 10);
        assert_eq!(paginator.request(PageControlKind::First), Some(1));
        assert_eq!(paginator.request(PageControlKind::Previous), Some(4));
        assert_eq!(paginator.request(PageControlKind::Next), Some(6));
        assert_eq!(paginator.request(PageControlKind::Last), Some(10));
        assert_eq!(paginator.request(PageControlKind::Current), None);
    }

    #[test]
    fn test_hidden_controls_cannot_be_requested() {
        let paginator = Paginator::new(1, 1);
        assert_eq!(paginator.request(PageControlKind::First), None);
        assert_eq!(paginator.request(PageControlKind::Previous), None);
        assert_eq!(paginator.request(PageControlKind::Next), None);
        assert_eq!(paginator.request(PageControlKind::Last), None);
    }

    #[test]
    fn test_targets_always_in_range() {
        for max_page in 1..=12 {
            for page in 1..=max_page {
                for control in Paginator::new(page, max_page).controls() {
                    if let Some(target) = control.target() {
                        assert!((1..=max_page).contains(&target));
                        assert_ne!(target, page);
                    }
                }
            }
        }
    }

    #[test]
    fn test_new_normalizes_zero_max_page() {
        let paginator = Paginator::new(0, 0);
        assert_eq!(paginator.page(), 1);
        assert_eq!(paginator.max_page(), 1);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 9), 1);
        assert_eq!(page_count(9, 9), 1);
        assert_eq!(page_count(10, 9), 2);
        assert_eq!(page_count(20, 9), 3);
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn test_page_window() {
        let items: Vec<usize> = (1..=20).collect();
        assert_eq!(page_window(&items, 1, 9), &items[0..9]);
        assert_eq!(page_window(&items, 2, 9), &items[9..18]);
        assert_eq!(page_window(&items, 3, 9), &[19, 20]);
        assert!(page_window(&items, 4, 9).is_empty());
    }

    #[test]
    fn test_page_window_length_matches_formula() {
        let items: Vec<usize> = (0..23).collect();
        let k = 5;
        for page in 1..=page_count(items.len(), k) {
            let expected = k.min(items.len() - (page - 1) * k);
            assert_eq!(page_window(&items, page, k).len(), expected);
        }
    }
}
