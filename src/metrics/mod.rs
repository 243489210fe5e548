pub mod row;
pub mod sink;
