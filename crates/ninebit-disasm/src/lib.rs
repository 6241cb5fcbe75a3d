pub mod model;
pub mod render;

pub use model::{load_listing, parse_listing, ListingWord};
pub use render::{disassemble, render_json, render_text, LineOut};
