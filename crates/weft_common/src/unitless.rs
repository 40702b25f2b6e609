//! The set of CSS properties exempt from automatic `px` suffixing.

/// Hyphenated property names whose numeric values are emitted without a
/// unit. Must stay sorted; membership is checked by binary search.
const UNITLESS: &[&str] = &[
    "-moz-box-flex",
    "-ms-flex",
    "-ms-flex-negative",
    "-ms-flex-order",
    "-ms-flex-positive",
    "-webkit-box-flex",
    "-webkit-box-ordinal-group",
    "-webkit-flex",
    "-webkit-flex-grow",
    "-webkit-flex-shrink",
    "-webkit-line-clamp",
    "animation-iteration-count",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "box-flex",
    "box-flex-group",
    "box-ordinal-group",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-negative",
    "flex-order",
    "flex-positive",
    "flex-shrink",
    "flood-opacity",
    "font-weight",
    "grid-column",
    "grid-column-end",
    "grid-column-span",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-span",
    "grid-row-start",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "stop-opacity",
    "stroke-dasharray",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
];

/// Returns `true` if the hyphenated property name takes unitless numbers.
pub fn is_unitless(property: &str) -> bool {
    UNITLESS.binary_search(&property).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        let mut sorted = UNITLESS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, UNITLESS);
    }

    #[test]
    fn known_unitless_properties() {
        assert!(is_unitless("opacity"));
        assert!(is_unitless("z-index"));
        assert!(is_unitless("line-height"));
        assert!(is_unitless("flex-grow"));
    }

    #[test]
    fn dimensional_properties_take_units() {
        assert!(!is_unitless("width"));
        assert!(!is_unitless("margin-top"));
        assert!(!is_unitless("font-size"));
    }

    #[test]
    fn prefixed_variants() {
        assert!(is_unitless("-webkit-line-clamp"));
        assert!(is_unitless("-ms-flex"));
    }
}
