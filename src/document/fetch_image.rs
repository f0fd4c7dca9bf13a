use std::io::Cursor;

use anyhow::{bail, Context, Result};
use image::{ImageFormat, ImageReader};
use reqwest::header::USER_AGENT;
use reqwest::Client;

/// Downloaded picture with the properties needed to embed it.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    pub fn extension(&self) -> &'static str {
        match self.format {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
            _ => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.to_mime_type()
    }

    /// Height that keeps the aspect ratio at the given width.
    pub fn height_for_width(&self, width: f64) -> f64 {
        width * f64::from(self.height) / f64::from(self.width)
    }
}

pub async fn fetch_image(client: &Client, url: &str, user_agent: &str) -> Result<ImageData> {
    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .send()
        .await
        .with_context(|| format!("Failed to download image {}", url))?
        .error_for_status()?;

    let bytes = response.bytes().await.context("Failed to read image body")?;

    probe_image(bytes.to_vec()).with_context(|| format!("Unusable image {}", url))
}

/// Identifies format and pixel size without decoding the whole picture.
pub fn probe_image(bytes: Vec<u8>) -> Result<ImageData> {
    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .context("Failed to read image header")?;

    let format = reader.format().context("Unknown image format")?;
    if !matches!(
        format,
        ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Gif | ImageFormat::Bmp | ImageFormat::Tiff
    ) {
        bail!("Image format {:?} cannot be embedded in a Word document", format);
    }

    let (width, height) = reader
        .into_dimensions()
        .context("Failed to read image dimensions")?;
    if width == 0 || height == 0 {
        bail!("Image has no pixels");
    }

    Ok(ImageData {
        bytes,
        format,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use image::{ImageBuffer, Rgb};

    use super::*;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = ImageBuffer::from_pixel(width, height, Rgb([200u8, 0, 0]));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn probes_png_dimensions() {
        let image = probe_image(png(40, 20)).unwrap();

        assert_eq!((image.width, image.height), (40, 20));
        assert_eq!(image.extension(), "png");
        assert_eq!(image.mime_type(), "image/png");
        assert_eq!(image.height_for_width(80.0), 40.0);
    }

    #[test]
    fn rejects_non_images() {
        assert!(probe_image(b"<html>404</html>".to_vec()).is_err());
    }
}
