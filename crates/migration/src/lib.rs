//! Migrations, split into one migrator per service so each deployment only
//! ever touches its own table(s).
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_department;
mod m20240101_000002_create_employee;
mod m20240101_000003_add_employee_indexes;

/// Schema owned by the department service.
pub struct DepartmentMigrator;

#[async_trait::async_trait]
impl MigratorTrait for DepartmentMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_department::Migration)]
    }

    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("seaql_migrations_department").into_iden()
    }
}

/// Schema owned by the employee service.
pub struct EmployeeMigrator;

#[async_trait::async_trait]
impl MigratorTrait for EmployeeMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000002_create_employee::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000003_add_employee_indexes::Migration),
        ]
    }

    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("seaql_migrations_employee").into_iden()
    }
}
