pub mod history;
pub mod mortgage;
pub mod vehicle;
