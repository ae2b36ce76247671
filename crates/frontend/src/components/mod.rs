mod header;
mod scheme_card;

pub use header::Header;
pub use scheme_card::{SchemeCard, SchemeGrid};
