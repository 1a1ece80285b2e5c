pub mod location_repository;
