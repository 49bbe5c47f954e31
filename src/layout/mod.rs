//! Ordered JSON output for records carrying a property bag

pub mod json_layout;
pub mod property_bag;
pub mod writer;

pub use json_layout::{JsonLayout, FIRST_PROPERTIES};
pub use property_bag::PropertyBag;
pub use writer::JsonLogWriter;
