pub mod entities;
pub mod fields;
pub mod ports;
pub mod services;
pub mod value_objects;
