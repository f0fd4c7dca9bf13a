use crate::scraping::lookup::{first_match, Lookup, Page};

pub const ITEM_NUMBER_NOT_FOUND: &str = "Artikelnummer nicht gefunden";

const ITEM_NUMBER_LOOKUPS: [Lookup; 1] = [Lookup::TextPattern(r"Artikel-?Nr\.?:\s*(\d+)")];

/// Extracts the digits following `Artikel-Nr.:` (or `ArtikelNr:`) anywhere in the page text.
pub fn extract_item_number(page: &Page) -> String {
    first_match(page, &ITEM_NUMBER_LOOKUPS).unwrap_or_else(|| ITEM_NUMBER_NOT_FOUND.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_label_variants() {
        for html in [
            "<span>Artikel-Nr.: 10452</span>",
            "<span>Artikel-Nr:10452</span>",
            "<span>ArtikelNr.:   10452</span>",
        ] {
            assert_eq!(extract_item_number(&Page::parse(html)), "10452");
        }
    }

    #[test]
    fn label_split_across_elements_still_matches() {
        let html = "<li><strong>Artikel-Nr.:</strong> <span>777</span></li>";
        assert_eq!(extract_item_number(&Page::parse(html)), "777");
    }

    #[test]
    fn first_occurrence_wins() {
        let html = "<p>Artikel-Nr.: 1</p><p>Artikel-Nr.: 2</p>";
        assert_eq!(extract_item_number(&Page::parse(html)), "1");
    }

    #[test]
    fn label_without_digits_is_not_found() {
        let html = "<p>Artikel-Nr.: folgt</p>";
        assert_eq!(extract_item_number(&Page::parse(html)), ITEM_NUMBER_NOT_FOUND);
    }
}
