pub mod document;
pub mod fix;
pub mod section;
