pub mod sale;
pub mod summary;
