pub mod db;
pub mod department;
pub mod employee;
pub mod errors;
