pub mod company;
pub mod department;
pub mod location;
pub mod memory;
