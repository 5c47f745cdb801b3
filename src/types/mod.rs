mod layout;
mod models;

pub use layout::*;
pub use models::*;
