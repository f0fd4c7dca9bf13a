use regex::Regex;
use scraper::{Html, Selector};

/// A parsed product page: the raw markup plus its DOM.
pub struct Page<'a> {
    raw: &'a str,
    document: Html,
}

impl<'a> Page<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Page {
            raw,
            document: Html::parse_document(raw),
        }
    }

    pub fn raw(&self) -> &str {
        self.raw
    }

    pub fn document(&self) -> &Html {
        &self.document
    }

    /// All text nodes of the document concatenated, scripts included.
    pub fn rendered_text(&self) -> String {
        self.document.root_element().text().collect()
    }
}

/// One way of locating a field on a page.
#[derive(Debug, Clone, Copy)]
pub enum Lookup {
    /// Trimmed text of the first element matching the selector.
    Text(&'static str),
    /// Trimmed attribute value of the first element matching the selector.
    Attribute {
        selector: &'static str,
        name: &'static str,
    },
    /// First capture group of the pattern, searched in the rendered text.
    TextPattern(&'static str),
    /// First capture group of the pattern, searched in the raw markup.
    RawPattern(&'static str),
}

impl Lookup {
    pub fn resolve(&self, page: &Page) -> Option<String> {
        match *self {
            Lookup::Text(selector) => {
                let selector = Selector::parse(selector).ok()?;
                page.document()
                    .select(&selector)
                    .next()
                    .map(|element| element.text().collect::<String>().trim().to_string())
            }
            Lookup::Attribute { selector, name } => {
                let selector = Selector::parse(selector).ok()?;
                page.document()
                    .select(&selector)
                    .next()
                    .and_then(|element| element.value().attr(name))
                    .map(|value| value.trim().to_string())
            }
            Lookup::TextPattern(pattern) => capture(pattern, &page.rendered_text()),
            Lookup::RawPattern(pattern) => capture(pattern, page.raw()),
        }
    }
}

/// Evaluates the chain in order and returns the first non-empty value.
pub fn first_match(page: &Page, chain: &[Lookup]) -> Option<String> {
    chain
        .iter()
        .find_map(|lookup| lookup.resolve(page).filter(|value| !value.is_empty()))
}

/// Evaluates the chain in order and returns the value of the first lookup
/// that locates anything, even when that value is empty.
pub fn first_present(page: &Page, chain: &[Lookup]) -> Option<String> {
    chain.iter().find_map(|lookup| lookup.resolve(page))
}

fn capture(pattern: &str, haystack: &str) -> Option<String> {
    let regex = Regex::new(pattern).ok()?;
    regex
        .captures(haystack)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
}
