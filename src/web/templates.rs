use axum::response::Html;
use htmlentity::entity::{encode, CharacterSet, EncodeType, ICodedDataTrait};

use crate::extract_data::ProductRecord;

const PAGE_TITLE: &str = "Preisschild Generator A5 auf A4 mit neuem Hintergrund";

fn escape(text: &str) -> String {
    encode(text.as_bytes(), &EncodeType::Named, &CharacterSet::SpecialChars)
        .to_string()
        .unwrap_or_default()
}

pub fn page(url: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="de">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="icon" href="data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>🧾</text></svg>">
<style>
body {{ font-family: Arial, sans-serif; max-width: 720px; margin: 2rem auto; }}
.banner {{ padding: .75rem 1rem; border-radius: .4rem; margin: 1rem 0; }}
.success {{ background: #e6f4ea; color: #1e6b34; }}
.error {{ background: #fdecea; color: #8a1c1c; }}
input[type=url] {{ width: 100%; padding: .5rem; }}
</style>
</head>
<body>
<h1>🧾 Preisschild Generator mit neuem Backend-Hintergrund (A5 auf A4)</h1>
<p><strong>Gib den Produktlink von Ofen.de ein:</strong></p>
<form method="get" action="/">
<label for="url">🔗 Produkt-URL eingeben:</label>
<input type="url" id="url" name="url" value="{url}" required>
<button type="submit">Laden</button>
</form>
{body}
</body>
</html>"#,
        title = PAGE_TITLE,
        url = escape(url),
        body = body,
    ))
}

pub fn success_banner(message: &str) -> String {
    format!(r#"<div class="banner success">{}</div>"#, escape(message))
}

pub fn error_banner(message: &str) -> String {
    format!(r#"<div class="banner error">{}</div>"#, escape(message))
}

pub fn product_preview(record: &ProductRecord) -> String {
    let mut html = String::from(r#"<div class="preview">"#);
    html.push_str(&format!("<p><strong>Modell:</strong> {}</p>", escape(&record.title)));
    html.push_str(&format!(
        "<p><strong>Artikelnummer:</strong> {}</p>",
        escape(&record.item_number)
    ));
    html.push_str(&format!(
        "<p><strong>Preis:</strong> {}</p>",
        escape(record.current_price.as_deref().unwrap_or_default())
    ));
    if let Some(old_price) = &record.old_price {
        html.push_str(&format!(
            "<p><strong>Alter Preis:</strong> <s>{}</s></p>",
            escape(old_price)
        ));
    }
    if let Some(image_url) = &record.image_url {
        html.push_str(&format!(
            r#"<img src="{}" width="300" alt="Produktbild">"#,
            escape(image_url)
        ));
    }
    html.push_str("</div>");
    html
}

/// Carries the record to the generate step in hidden fields.
pub fn generate_form(record: &ProductRecord) -> String {
    let hidden = |name: &str, value: &str| {
        format!(r#"<input type="hidden" name="{}" value="{}">"#, name, escape(value))
    };

    let mut html = String::from(r#"<form method="post" action="/generate">"#);
    html.push_str(&hidden("title", &record.title));
    html.push_str(&hidden("item_number", &record.item_number));
    html.push_str(&hidden(
        "current_price",
        record.current_price.as_deref().unwrap_or_default(),
    ));
    html.push_str(&hidden("old_price", record.old_price.as_deref().unwrap_or_default()));
    html.push_str(&hidden("image_url", record.image_url.as_deref().unwrap_or_default()));
    html.push_str(r#"<button type="submit">📄 Preisschild erstellen</button></form>"#);
    html
}

pub fn api_link(url: &str) -> String {
    format!(
        r#"<p><small><a href="/api/product?url={}">JSON</a></small></p>"#,
        urlencoding::encode(url)
    )
}
