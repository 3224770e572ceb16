pub mod document;
pub mod interview;
