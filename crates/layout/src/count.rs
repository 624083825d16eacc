//! "Showing X of Y" count formatting.
//!
//! Pure derivation over the host localizer; recomputed whenever counts,
//! page or limit change.

use crate::host::Localizer;

/// Message key: exactly one item matches the active user filter.
pub const ONE_FILTERED_ITEM: &str = "one_filtered_item";

/// Message key: range of a filtered result set.
pub const START_END_OF_COUNT_FILTERED_ITEMS: &str = "start_end_of_count_filtered_items";

/// Message key: range of an unfiltered result set spanning several pages.
pub const START_END_OF_COUNT_ITEMS: &str = "start_end_of_count_items";

/// Message key: plain item count.
pub const ITEM_COUNT: &str = "item_count";

/// Format the item count shown under the gallery.
///
/// `total_items` is the filtered count; `filtered` states whether a
/// user-authored filter is narrowing the result set.
pub fn format_items_count(
    localizer: &dyn Localizer,
    total_items: u64,
    page: u32,
    limit: u32,
    filtered: bool,
) -> String {
    let start = u64::from(page.saturating_sub(1)) * u64::from(limit) + 1;
    let end = (u64::from(page) * u64::from(limit)).min(total_items);

    let range_args = [
        ("start", localizer.format_number(start)),
        ("end", localizer.format_number(end)),
        ("count", localizer.format_number(total_items)),
    ];

    if filtered {
        if total_items == 1 {
            return localizer.translate(ONE_FILTERED_ITEM, &[]);
        }

        return localizer.translate(START_END_OF_COUNT_FILTERED_ITEMS, &range_args);
    }

    if total_items > u64::from(limit) {
        return localizer.translate(START_END_OF_COUNT_ITEMS, &range_args);
    }

    localizer.translate(ITEM_COUNT, &[("count", localizer.format_number(total_items))])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes the key plus interpolation args, keeping template selection
    /// and computed bounds assertable.
    struct EchoLocalizer;

    impl Localizer for EchoLocalizer {
        fn translate(&self, key: &str, args: &[(&str, String)]) -> String {
            let mut out = key.to_string();
            for (name, value) in args {
                out.push_str(&format!(" {name}={value}"));
            }
            out
        }

        fn format_number(&self, value: u64) -> String {
            value.to_string()
        }
    }

    #[test]
    fn one_filtered_item() {
        let formatted = format_items_count(&EchoLocalizer, 1, 1, 25, true);
        assert_eq!(formatted, "one_filtered_item");
    }

    #[test]
    fn filtered_range() {
        let formatted = format_items_count(&EchoLocalizer, 30, 2, 25, true);
        assert_eq!(
            formatted,
            "start_end_of_count_filtered_items start=26 end=30 count=30"
        );
    }

    #[test]
    fn unfiltered_range_when_total_exceeds_limit() {
        // 26 items on a 25-per-page layout: the last page shows item 26 only.
        let formatted = format_items_count(&EchoLocalizer, 26, 2, 25, false);
        assert_eq!(formatted, "start_end_of_count_items start=26 end=26 count=26");
    }

    #[test]
    fn plain_count_when_everything_fits_on_one_page() {
        let formatted = format_items_count(&EchoLocalizer, 10, 1, 25, false);
        assert_eq!(formatted, "item_count count=10");
    }

    #[test]
    fn zero_items_uses_plain_count() {
        let formatted = format_items_count(&EchoLocalizer, 0, 1, 25, false);
        assert_eq!(formatted, "item_count count=0");
    }
}
