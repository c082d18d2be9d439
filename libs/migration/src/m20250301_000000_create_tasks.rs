use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values([TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done])
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
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Tasks::Title, 100))
                    .col(text(Tasks::Description))
                    .col(
                        ColumnDef::new(Tasks::Status)
                            .enumeration(
                                TaskStatus::Enum,
                                [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done],
                            )
                            .not_null()
                            .default(Expr::cust("'TO_DO'::task_status")),
                    )
                    .col(timestamp_with_time_zone_null(Tasks::DeletedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_deleted_at")
                    .table(Tasks::Table)
                    .col(Tasks::DeletedAt)
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
            .drop_type(Type::drop().name(TaskStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    Title,
    Description,
    Status,
    DeletedAt,
}

#[derive(DeriveIden)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "TO_DO")]
    ToDo,
    #[sea_orm(iden = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(iden = "DONE")]
    Done,
}
