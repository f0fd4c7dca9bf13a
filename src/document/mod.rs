pub mod create_price_tag;
pub mod docx_package;
pub mod fetch_image;
pub mod inspect_document;
pub mod page_setup;
pub mod xml_writer;

pub use create_price_tag::create_price_tag;
pub use inspect_document::{inspect_document, DocumentLayout};
pub use page_setup::PriceTagFile;
