use crate::scraping::lookup::{first_match, Lookup, Page};

pub const TITLE_NOT_FOUND: &str = "Modell nicht gefunden";

const TITLE_LOOKUPS: [Lookup; 2] = [
    Lookup::Text("h1.product--title"),
    Lookup::Text("h1.product-header-title"),
];

/// Product title from one of the two known `h1` headers.
pub fn extract_title(page: &Page) -> String {
    first_match(page, &TITLE_LOOKUPS).unwrap_or_else(|| TITLE_NOT_FOUND.to_string())
}
