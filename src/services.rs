//! Built-in reference services.

pub mod search;
pub mod select;

pub use search::SearchService;
pub use select::SelectService;
