pub mod department_service;
pub mod directory;
pub mod employee_service;
pub mod errors;
pub mod validate;

#[cfg(test)]
mod test_support;
