pub mod create_location;
pub mod delete_location;
pub mod get_location;
pub mod get_locations;
