#![allow(dead_code)]

use std::io::Cursor;

use httpmock::MockServer;
use image::{ImageBuffer, ImageFormat, Rgb};
use preisschild::AppConfig;

pub const PRODUCT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="de">
<head>
  <title>Kaminofen Austroflamm Clou | ofen.de</title>
  <meta itemprop="price" content="2199.00">
</head>
<body>
  <div class="product--detail-upper">
    <h1 class="product--title" itemprop="name">
        Kaminofen Austroflamm Clou Compact
    </h1>
    <div class="image-slider--item">
      <span class="image--element" data-img-large="https://www.ofen.de/media/image/clou-large.jpg">
        <img srcset="https://www.ofen.de/media/image/clou-600.jpg" alt="Clou">
      </span>
    </div>
    <div class="product--price price--default price--discount">
      <span class="price--content content--default">
        <meta itemprop="price" content="2199.00">2.199,00&nbsp;€ *
      </span>
      <span class="price--discount-icon"></span>
      <span class="price--line-through">2.499,00&nbsp;€ *</span>
    </div>
    <ul class="product--base-info list--unstyled">
      <li class="base-info--entry entry--sku">
        <strong class="entry--label">Artikel-Nr.:</strong>
        <span class="entry--content">10452</span>
      </li>
    </ul>
  </div>
</body>
</html>"#;

pub const META_PRICE_PAGE: &str = r#"<html><head>
  <meta itemprop="price" content=" 1349.00 ">
</head><body>
  <h1 class="product-header-title">Pelletofen Edilkamin Blade</h1>
  <p>Artikel-Nr: 20981</p>
  <img class="gallery" src="/small.jpg" data-img-large="https://www.ofen.de/media/image/blade.jpg">
</body></html>"#;

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = ImageBuffer::from_pixel(width, height, Rgb([240u8, 240, 240]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Backgrounds point at the mock server so no test reaches the real shop.
pub fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.document.background_url = server.url("/backend/background.png");
    config.document.background_fallback_url = server.url("/www/background.png");
    config
}
