use crate::scraping::lookup::{first_match, first_present, Lookup, Page};

/// Marker the shop appends to prices to reference its footnote.
const PRICE_MARKER: char = '*';
const META_PRICE_SUFFIX: &str = " €";

const CURRENT_PRICE_LOOKUPS: [Lookup; 2] = [
    Lookup::Text("span.price--content"),
    Lookup::Text("div.price--current"),
];

const META_PRICE_LOOKUP: Lookup = Lookup::Attribute {
    selector: r#"meta[itemprop="price"]"#,
    name: "content",
};

const OLD_PRICE_LOOKUPS: [Lookup; 2] = [
    Lookup::Text("span.price--line-through"),
    Lookup::Text("span.price-old"),
];

/// Current price as displayed, or the `itemprop="price"` meta value with a currency suffix.
///
/// The first price element present decides; when it is blank the meta tag is
/// consulted without looking at the other selector.
pub fn extract_current_price(page: &Page) -> Option<String> {
    first_present(page, &CURRENT_PRICE_LOOKUPS)
        .and_then(|price| clean_price(&price))
        .or_else(|| {
            first_match(page, &[META_PRICE_LOOKUP])
                .and_then(|content| clean_price(&format!("{}{}", content, META_PRICE_SUFFIX)))
        })
}

/// Crossed-out price. Absent when the product is not reduced.
pub fn extract_old_price(page: &Page) -> Option<String> {
    first_present(page, &OLD_PRICE_LOOKUPS).and_then(|price| clean_price(&price))
}

fn clean_price(price: &str) -> Option<String> {
    let cleaned = price.replace(PRICE_MARKER, "").trim().to_string();
    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_price_strips_marker() {
        let html = r#"<span class="price--content content--default"> 1.299,00 €* </span>"#;
        assert_eq!(
            extract_current_price(&Page::parse(html)).as_deref(),
            Some("1.299,00 €")
        );
    }

    #[test]
    fn current_price_alternative_selector() {
        let html = r#"<div class="price--current">899,00 € *</div>"#;
        assert_eq!(
            extract_current_price(&Page::parse(html)).as_deref(),
            Some("899,00 €")
        );
    }

    #[test]
    fn meta_price_gets_currency_suffix() {
        let html = r#"<meta itemprop="price" content="1299.00">"#;
        assert_eq!(
            extract_current_price(&Page::parse(html)).as_deref(),
            Some("1299.00 €")
        );
    }

    #[test]
    fn displayed_price_beats_meta() {
        let html = r#"
            <meta itemprop="price" content="1299.00">
            <span class="price--content">1.299,00 €*</span>
        "#;
        assert_eq!(
            extract_current_price(&Page::parse(html)).as_deref(),
            Some("1.299,00 €")
        );
    }

    #[test]
    fn meta_without_content_is_ignored() {
        let html = r#"<meta itemprop="price">"#;
        assert_eq!(extract_current_price(&Page::parse(html)), None);
    }

    #[test]
    fn blank_price_element_goes_straight_to_meta() {
        let html = r#"
            <span class="price--content"></span>
            <div class="price--current">5 €</div>
            <meta itemprop="price" content="9.00">
        "#;
        assert_eq!(
            extract_current_price(&Page::parse(html)).as_deref(),
            Some("9.00 €")
        );
    }

    #[test]
    fn blank_meta_content_is_absent() {
        let html = r#"<meta itemprop="price" content="  ">"#;
        assert_eq!(extract_current_price(&Page::parse(html)), None);
    }

    #[test]
    fn old_price_from_either_selector() {
        let strike = r#"<span class="price--line-through">1.499,00 €*</span>"#;
        let old = r#"<span class="price-old">1.399,00 €</span>"#;

        assert_eq!(
            extract_old_price(&Page::parse(strike)).as_deref(),
            Some("1.499,00 €")
        );
        assert_eq!(
            extract_old_price(&Page::parse(old)).as_deref(),
            Some("1.399,00 €")
        );
    }

    #[test]
    fn old_price_has_no_fallback() {
        let html = r#"<meta itemprop="price" content="1299.00">"#;
        assert_eq!(extract_old_price(&Page::parse(html)), None);
    }

    #[test]
    fn marker_only_is_absent() {
        let html = r#"<span class="price-old"> * </span>"#;
        assert_eq!(extract_old_price(&Page::parse(html)), None);
    }
}
