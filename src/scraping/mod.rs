pub mod extract_image_url;
pub mod extract_item_number;
pub mod extract_price;
pub mod extract_title;
pub mod fetch_page;
pub mod lookup;
