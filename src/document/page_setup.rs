use std::io::Cursor;

pub const FILE_NAME: &str = "preisschild_A5_auf_A4_neuer_Hintergrund.docx";
pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub const FONT_FAMILY: &str = "Arial";

pub const PAGE_WIDTH_MM: f64 = 210.0;
pub const PAGE_HEIGHT_MM: f64 = 297.0;
pub const MARGIN_TOP_MM: f64 = 20.0;
pub const MARGIN_BOTTOM_MM: f64 = 20.0;
pub const MARGIN_LEFT_MM: f64 = 31.0;
pub const MARGIN_RIGHT_MM: f64 = 31.0;

/// The background graphic is an A5 sheet.
pub const BACKGROUND_WIDTH_MM: f64 = 148.0;
pub const BACKGROUND_HEIGHT_MM: f64 = 210.0;
pub const PRODUCT_IMAGE_WIDTH_MM: f64 = 80.0;

const TWIPS_PER_MM: f64 = 1440.0 / 25.4;
const EMU_PER_MM: f64 = 36_000.0;

pub fn mm_to_twips(mm: f64) -> i64 {
    (mm * TWIPS_PER_MM).round() as i64
}

/// Rounded to a tenth of a millimetre.
pub fn twips_to_mm(twips: i64) -> f64 {
    (twips as f64 / TWIPS_PER_MM * 10.0).round() / 10.0
}

pub fn mm_to_emu(mm: f64) -> i64 {
    (mm * EMU_PER_MM).round() as i64
}

pub fn emu_to_mm(emu: i64) -> f64 {
    (emu as f64 / EMU_PER_MM * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_top_mm: f64,
    pub margin_bottom_mm: f64,
    pub margin_left_mm: f64,
    pub margin_right_mm: f64,
}

impl PageLayout {
    pub fn a4_portrait() -> Self {
        PageLayout {
            width_mm: PAGE_WIDTH_MM,
            height_mm: PAGE_HEIGHT_MM,
            margin_top_mm: MARGIN_TOP_MM,
            margin_bottom_mm: MARGIN_BOTTOM_MM,
            margin_left_mm: MARGIN_LEFT_MM,
            margin_right_mm: MARGIN_RIGHT_MM,
        }
    }
}

/// A rendered price tag, ready to be saved or sent as a download.
#[derive(Debug, Clone)]
pub struct PriceTagFile {
    pub data: Vec<u8>,
    pub file_name: &'static str,
    pub content_type: &'static str,
}

impl PriceTagFile {
    pub fn new(data: Vec<u8>) -> Self {
        PriceTagFile {
            data,
            file_name: FILE_NAME,
            content_type: CONTENT_TYPE,
        }
    }

    /// Reader over the document bytes, positioned at the start.
    pub fn stream(&self) -> Cursor<&[u8]> {
        Cursor::new(self.data.as_slice())
    }
}
