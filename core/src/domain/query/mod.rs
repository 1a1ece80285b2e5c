//! Dynamic filter, sort, include and paging support for list endpoints.

pub mod ast;
pub mod binder;
pub mod errors;
pub mod field_map;
pub mod includes;
pub mod lexer;
pub mod pagination;
pub mod parser;
pub mod ports;
pub mod services;
pub mod sort;
pub mod value;
pub mod value_objects;
