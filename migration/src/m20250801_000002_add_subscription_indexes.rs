use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// (インデックス名, カラム)
const INDEXES: [(&str, Subscriptions); 4] = [
    ("idx_subscriptions_user_id", Subscriptions::UserId),
    ("idx_subscriptions_service_name", Subscriptions::ServiceName),
    ("idx_subscriptions_end_date", Subscriptions::EndDate),
    ("idx_subscriptions_created_at", Subscriptions::CreatedAt),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .table(Subscriptions::Table)
                        .name(name)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        // 集計クエリ（期間の重なり判定）用の複合インデックス
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_period")
                    .col(Subscriptions::StartDate)
                    .col(Subscriptions::EndDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .if_exists()
                    .table(Subscriptions::Table)
                    .name("idx_subscriptions_period")
                    .to_owned(),
            )
            .await?;

        for (name, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .if_exists()
                        .table(Subscriptions::Table)
                        .name(name)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Subscriptions {
    Table,
    UserId,
    ServiceName,
    StartDate,
    EndDate,
    CreatedAt,
}
