pub mod seed;
pub mod table;
