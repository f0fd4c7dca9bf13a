use crate::scraping::lookup::{first_match, Lookup, Page};

const IMAGE_URL_LOOKUPS: [Lookup; 2] = [
    Lookup::Attribute {
        selector: "img[data-img-large]",
        name: "data-img-large",
    },
    Lookup::RawPattern(r#"data-img-large="(https://[^"]+\.jpg)""#),
];

/// Large product image. The first `img` carrying `data-img-large` wins.
pub fn extract_image_url(page: &Page) -> Option<String> {
    first_match(page, &IMAGE_URL_LOOKUPS)
}
