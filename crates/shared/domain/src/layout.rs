//! Responsive overflow for the category bar.
//!
//! The bar renders categories left to right and ends with a fixed-width
//! "View All" control. Every time the container is resized the number of
//! leading categories that still fit is recomputed from measured widths;
//! the rest are only reachable through the categories sidebar.

use crate::constants::ALL_CATEGORY_SLUG;

/// Pixel widths read from the rendered bar.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurements {
    /// Width of the visible container
    pub container_width: f64,
    /// Width of the "View All" control
    pub view_all_width: f64,
    /// Natural width of every category, in display order
    pub item_widths: Vec<f64>,
}

/// Source of measurements for a resize pass.
///
/// Returns `None` while the measurement elements are not attached yet.
pub trait Measure {
    fn measure(&self) -> Option<Measurements>;
}

impl Measure for Option<Measurements> {
    fn measure(&self) -> Option<Measurements> {
        self.clone()
    }
}

impl Measure for Measurements {
    fn measure(&self) -> Option<Measurements> {
        Some(self.clone())
    }
}

/// Number of leading items that fit before the "View All" control.
///
/// Widths are summed left to right and counting stops at the first item
/// that would push the total past `container_width - view_all_width`.
pub fn visible_count(container_width: f64, view_all_width: f64, item_widths: &[f64]) -> usize {
    let available = container_width - view_all_width;
    let mut total = 0.0;
    let mut visible = 0;

    for width in item_widths {
        if total + width > available {
            break;
        }
        total += width;
        visible += 1;
    }

    visible
}

/// State of the category bar between resize notifications.
#[derive(Debug, Clone)]
pub struct CategoryOverflow {
    slugs: Vec<String>,
    visible_count: usize,
    any_hovered: bool,
    active_slug: String,
}

impl CategoryOverflow {
    /// Create the bar state; every category counts as visible until measured.
    pub fn new(slugs: Vec<String>) -> Self {
        let visible_count = slugs.len();
        Self {
            slugs,
            visible_count,
            any_hovered: false,
            active_slug: ALL_CATEGORY_SLUG.to_string(),
        }
    }

    /// Resize callback. Skips the pass when nothing could be measured.
    pub fn on_resize<M: Measure + ?Sized>(&mut self, measurer: &M) -> usize {
        if let Some(m) = measurer.measure() {
            let count = visible_count(m.container_width, m.view_all_width, &m.item_widths);
            self.visible_count = count.min(self.slugs.len());
        }
        self.visible_count
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Categories rendered in the bar
    pub fn visible(&self) -> &[String] {
        &self.slugs[..self.visible_count]
    }

    /// Categories only reachable through the sidebar
    pub fn hidden(&self) -> &[String] {
        &self.slugs[self.visible_count..]
    }

    /// Pointer entered or left the visible strip
    pub fn set_hovered(&mut self, hovered: bool) {
        self.any_hovered = hovered;
    }

    pub fn active_slug(&self) -> &str {
        &self.active_slug
    }

    /// Whether the active category was pushed out of the bar
    pub fn is_active_hidden(&self) -> bool {
        self.slugs
            .iter()
            .position(|slug| *slug == self.active_slug)
            .is_some_and(|index| index >= self.visible_count)
    }

    /// "View All" stands in for a hidden active category unless the strip is hovered
    pub fn highlight_view_all(&self) -> bool {
        self.is_active_hidden() && !self.any_hovered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slugs(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn bar(container_width: f64, item_widths: Vec<f64>) -> Measurements {
        Measurements {
            container_width,
            view_all_width: 80.0,
            item_widths,
        }
    }

    #[test]
    fn test_visible_count_stops_before_overflow() {
        assert_eq!(visible_count(500.0, 80.0, &[100.0; 5]), 4);
        assert_eq!(visible_count(420.0, 0.0, &[100.0, 100.0, 100.0, 120.0]), 4);
        assert_eq!(visible_count(419.0, 0.0, &[100.0, 100.0, 100.0, 120.0]), 3);
    }

    #[test]
    fn test_visible_count_does_not_skip_ahead() {
        // A wide item ends the run even if later ones would fit
        assert_eq!(visible_count(300.0, 80.0, &[100.0, 200.0, 10.0]), 1);
    }

    #[test]
    fn test_visible_count_edge_widths() {
        assert_eq!(visible_count(500.0, 80.0, &[]), 0);
        assert_eq!(visible_count(60.0, 80.0, &[10.0, 10.0]), 0);
        assert_eq!(visible_count(500.0, 80.0, &[0.0, 0.0, 0.0]), 3);
    }

    #[test]
    fn test_shrinking_container_never_reveals_more() {
        let widths = vec![64.0, 152.5, 98.0, 210.0, 75.25, 120.0, 88.0, 140.0];
        let mut previous = usize::MAX;

        let mut container = 1400.0;
        while container >= 0.0 {
            let count = visible_count(container, 96.0, &widths);
            assert!(count <= previous, "count grew at width {}", container);
            previous = count;
            container -= 7.5;
        }
    }

    #[test]
    fn test_initially_everything_is_visible() {
        let overflow = CategoryOverflow::new(slugs(&["all", "music", "design"]));
        assert_eq!(overflow.visible_count(), 3);
        assert!(overflow.hidden().is_empty());
        assert!(!overflow.highlight_view_all());
    }

    #[test]
    fn test_resize_splits_visible_and_hidden() {
        let mut overflow =
            CategoryOverflow::new(slugs(&["design", "music", "yoga", "all", "other"]));

        assert_eq!(overflow.on_resize(&bar(500.0, vec![100.0; 5])), 4);
        assert_eq!(overflow.visible(), slugs(&["design", "music", "yoga", "all"]));
        assert_eq!(overflow.hidden(), slugs(&["other"]));

        assert_eq!(overflow.on_resize(&bar(300.0, vec![100.0; 5])), 2);
        assert_eq!(overflow.hidden(), slugs(&["yoga", "all", "other"]));
    }

    #[test]
    fn test_resize_without_measurements_keeps_state() {
        let mut overflow = CategoryOverflow::new(slugs(&["all", "music", "design"]));
        overflow.on_resize(&bar(280.0, vec![100.0; 3]));
        assert_eq!(overflow.visible_count(), 2);

        let detached: Option<Measurements> = None;
        assert_eq!(overflow.on_resize(&detached), 2);

        assert_eq!(overflow.on_resize(&Some(bar(400.0, vec![100.0; 3]))), 3);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut overflow = CategoryOverflow::new(slugs(&["all", "music", "design", "oil"]));
        let m = bar(340.0, vec![90.0, 110.0, 60.0, 70.0]);
        let first = overflow.on_resize(&m);
        let second = overflow.on_resize(&m);
        assert_eq!(first, second);
        assert_eq!(first, 3);
    }

    #[test]
    fn test_hidden_active_category_highlights_view_all() {
        let mut overflow = CategoryOverflow::new(slugs(&["design", "music", "all"]));
        overflow.on_resize(&bar(280.0, vec![100.0; 3]));
        assert!(overflow.is_active_hidden());
        assert!(overflow.highlight_view_all());

        overflow.set_hovered(true);
        assert!(overflow.is_active_hidden());
        assert!(!overflow.highlight_view_all());

        overflow.set_hovered(false);
        overflow.on_resize(&bar(400.0, vec![100.0; 3]));
        assert!(!overflow.highlight_view_all());
    }

    #[test]
    fn test_missing_active_category_never_highlights() {
        let mut overflow = CategoryOverflow::new(slugs(&["design", "music", "yoga"]));
        overflow.on_resize(&bar(100.0, vec![100.0; 3]));
        assert_eq!(overflow.visible_count(), 0);
        assert!(!overflow.is_active_hidden());
        assert!(!overflow.highlight_view_all());
    }
}
