//! Create complaint table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Complaint::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Complaint::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Complaint::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Complaint::Description).text().not_null())
                    .col(ColumnDef::new(Complaint::ErrorType).string_len(256))
                    .col(ColumnDef::new(Complaint::ErrorScreen).string_len(256))
                    .col(
                        ColumnDef::new(Complaint::ClientId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::NatureTypeId).string_len(32))
                    .col(
                        ColumnDef::new(Complaint::Attachments)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::Status).string_len(32).not_null())
                    .col(
                        ColumnDef::new(Complaint::DepartmentId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Complaint::CurrentAssigneeId).string_len(32))
                    .col(ColumnDef::new(Complaint::FirstAssigneeId).string_len(32))
                    .col(ColumnDef::new(Complaint::Remark).text())
                    .col(
                        ColumnDef::new(Complaint::Version)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Complaint::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Complaint::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_client")
                            .from(Complaint::Table, Complaint::ClientId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_department")
                            .from(Complaint::Table, Complaint::DepartmentId)
                            .to(Department::Table, Department::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_complaint_nature_type")
                            .from(Complaint::Table, Complaint::NatureTypeId)
                            .to(NatureType::Table, NatureType::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: client_id (client's own complaints view)
        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_client_id")
                    .table(Complaint::Table)
                    .col(Complaint::ClientId)
                    .to_owned(),
            )
            .await?;

        // Index: (department_id, status) (manager queue views)
        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_department_status")
                    .table(Complaint::Table)
                    .col(Complaint::DepartmentId)
                    .col(Complaint::Status)
                    .to_owned(),
            )
            .await?;

        // Index: current_assignee_id (employee workload view)
        manager
            .create_index(
                Index::create()
                    .name("idx_complaint_current_assignee")
                    .table(Complaint::Table)
                    .col(Complaint::CurrentAssigneeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Complaint::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Complaint {
    Table,
    Id,
    Title,
    Description,
    ErrorType,
    ErrorScreen,
    ClientId,
    NatureTypeId,
    Attachments,
    Status,
    DepartmentId,
    CurrentAssigneeId,
    FirstAssigneeId,
    Remark,
    Version,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum User {
    Table,
    Id,
}

#[derive(Iden)]
enum Department {
    Table,
    Id,
}

#[derive(Iden)]
enum NatureType {
    Table,
    Id,
}
