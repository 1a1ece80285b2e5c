pub mod company;
pub mod department;
pub mod health;
pub mod location;
pub mod query_extractor;
pub mod query_params;
pub mod server;
