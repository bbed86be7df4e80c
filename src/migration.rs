//! Schema for the four relations.
//!
//! `project_employees` cascades on both foreign keys, and tasks cascade with
//! their project and with the employees they reference. `employees.email`
//! carries a unique index.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(CreateSchema)]
    }
}

pub struct CreateSchema;

impl MigrationName for CreateSchema {
    fn name(&self) -> &'static str {
        "m20231015_000001_create_schema"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for CreateSchema {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employees::FirstName).string().not_null())
                    .col(ColumnDef::new(Employees::LastName).string().not_null())
                    .col(ColumnDef::new(Employees::MiddleName).string().null())
                    .col(ColumnDef::new(Employees::Email).string().not_null())
                    .col(
                        ColumnDef::new(Employees::RowVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_employees_email")
                    .table(Employees::Table)
                    .col(Employees::Email)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::Name).string().not_null())
                    .col(ColumnDef::new(Projects::CustomerCompany).string().not_null())
                    .col(ColumnDef::new(Projects::ExecutorCompany).string().not_null())
                    .col(ColumnDef::new(Projects::StartDate).date().not_null())
                    .col(ColumnDef::new(Projects::EndDate).date().not_null())
                    .col(ColumnDef::new(Projects::Priority).integer().not_null())
                    .col(ColumnDef::new(Projects::LeaderId).integer().not_null())
                    .col(
                        ColumnDef::new(Projects::RowVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProjectEmployees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ProjectEmployees::ProjectId).integer().not_null())
                    .col(ColumnDef::new(ProjectEmployees::EmployeeId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(ProjectEmployees::ProjectId)
                            .col(ProjectEmployees::EmployeeId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_employees_project_id")
                            .from(ProjectEmployees::Table, ProjectEmployees::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_project_employees_employee_id")
                            .from(ProjectEmployees::Table, ProjectEmployees::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_project_employees_employee_id")
                    .table(ProjectEmployees::Table)
                    .col(ProjectEmployees::EmployeeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Tasks::Name).string().not_null())
                    .col(ColumnDef::new(Tasks::Description).text().not_null())
                    .col(ColumnDef::new(Tasks::ProjectId).integer().not_null())
                    .col(ColumnDef::new(Tasks::AuthorId).integer().not_null())
                    .col(ColumnDef::new(Tasks::ExecutorId).integer().not_null())
                    .col(ColumnDef::new(Tasks::Status).integer().not_null())
                    .col(ColumnDef::new(Tasks::Priority).integer().not_null())
                    .col(
                        ColumnDef::new(Tasks::RowVersion)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_project_id")
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_author_id")
                            .from(Tasks::Table, Tasks::AuthorId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_executor_id")
                            .from(Tasks::Table, Tasks::ExecutorId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProjectEmployees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    FirstName,
    LastName,
    MiddleName,
    Email,
    RowVersion,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
    Name,
    CustomerCompany,
    ExecutorCompany,
    StartDate,
    EndDate,
    Priority,
    LeaderId,
    RowVersion,
}

#[derive(DeriveIden)]
enum ProjectEmployees {
    Table,
    ProjectId,
    EmployeeId,
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Name,
    Description,
    ProjectId,
    AuthorId,
    ExecutorId,
    Status,
    Priority,
    RowVersion,
}
