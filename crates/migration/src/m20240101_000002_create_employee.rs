//! Create `employee` table.
//!
//! `department_id` references a record owned by the department service, so no
//! foreign key exists; the reference is checked at write time over HTTP.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(uuid(Employee::Id).primary_key())
                    .col(string_len(Employee::FirstName, 128).not_null())
                    .col(string_len(Employee::LastName, 128).not_null())
                    .col(string_len(Employee::Email, 255).unique_key().not_null())
                    .col(string_len(Employee::Position, 128).not_null())
                    .col(double_null(Employee::Salary))
                    .col(date(Employee::HireDate).not_null())
                    .col(uuid(Employee::DepartmentId).not_null())
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    Position,
    Salary,
    HireDate,
    DepartmentId,
    CreatedAt,
}
