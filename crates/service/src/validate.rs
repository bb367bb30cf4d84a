//! Input-shape checks with field-level messages, aggregated into a single
//! `ServiceError::Validation` so the boundary can render them under
//! `validationErrors`.

use std::collections::BTreeMap;

use crate::department_service::DepartmentInput;
use crate::employee_service::EmployeeInput;
use crate::errors::ServiceError;

pub fn department_input(input: &DepartmentInput) -> Result<(), ServiceError> {
    let mut errors = BTreeMap::new();
    require(&mut errors, "name", &input.name, "Name is required");
    finish(errors)
}

pub fn employee_input(input: &EmployeeInput) -> Result<(), ServiceError> {
    let mut errors = BTreeMap::new();
    require(&mut errors, "firstName", &input.first_name, "First name is required");
    require(&mut errors, "lastName", &input.last_name, "Last name is required");
    require(&mut errors, "position", &input.position, "Position is required");
    if input.email.trim().is_empty() {
        errors.insert("email".into(), "Email is required".into());
    } else if !email_shape_ok(&input.email) {
        errors.insert("email".into(), "Email should be valid".into());
    }
    if let Some(salary) = input.salary {
        if salary <= 0.0 {
            errors.insert("salary".into(), "Salary must be positive".into());
        }
    }
    finish(errors)
}

fn require(errors: &mut BTreeMap<String, String>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_string(), message.to_string());
    }
}

fn finish(errors: BTreeMap<String, String>) -> Result<(), ServiceError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains('@')
}
