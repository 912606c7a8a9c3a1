use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Points,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DrawRounds {
    Table,
    Id,
    RoundNumber,
    StartTime,
    EndTime,
    AnnounceTime,
    FinalEndTime,
    Status,
    TotalPrize,
    WinnerCount,
    PrizePerWinner,
    TotalEntries,
    WinnerIds,
    OpenSlot,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DrawEntries {
    Table,
    Id,
    UserId,
    RoundId,
    IsWinner,
    PrizePoints,
    IpAddress,
    UserAgent,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users (balance holder owned by the wider platform)
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(
                        ColumnDef::new(Users::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // draw_rounds
        manager
            .create_table(
                Table::create()
                    .table(DrawRounds::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawRounds::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(DrawRounds::RoundNumber).integer().not_null())
                    .col(
                        ColumnDef::new(DrawRounds::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::AnnounceTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::FinalEndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::Status)
                            .string_len(16)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(ColumnDef::new(DrawRounds::TotalPrize).integer().not_null())
                    .col(ColumnDef::new(DrawRounds::WinnerCount).integer().not_null())
                    .col(
                        ColumnDef::new(DrawRounds::PrizePerWinner)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::TotalEntries)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(DrawRounds::WinnerIds).text().null())
                    // TRUE while ACTIVE/ANNOUNCING, NULL once terminal.
                    .col(ColumnDef::new(DrawRounds::OpenSlot).boolean().null())
                    .col(
                        ColumnDef::new(DrawRounds::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DrawRounds::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_draw_rounds_round_number")
                    .table(DrawRounds::Table)
                    .col(DrawRounds::RoundNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // At most one open round: NULLs are distinct, so only one TRUE row can exist.
        manager
            .create_index(
                Index::create()
                    .name("ux_draw_rounds_open_slot")
                    .table(DrawRounds::Table)
                    .col(DrawRounds::OpenSlot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_draw_rounds_status")
                    .table(DrawRounds::Table)
                    .col(DrawRounds::Status)
                    .to_owned(),
            )
            .await?;

        // draw_entries
        manager
            .create_table(
                Table::create()
                    .table(DrawEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DrawEntries::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(DrawEntries::UserId).big_integer().not_null())
                    .col(ColumnDef::new(DrawEntries::RoundId).big_integer().not_null())
                    .col(
                        ColumnDef::new(DrawEntries::IsWinner)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(DrawEntries::PrizePoints).integer().null())
                    .col(ColumnDef::new(DrawEntries::IpAddress).string_len(64).null())
                    .col(ColumnDef::new(DrawEntries::UserAgent).text().null())
                    .col(
                        ColumnDef::new(DrawEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_entries_user_id")
                            .from(DrawEntries::Table, DrawEntries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_draw_entries_round_id")
                            .from(DrawEntries::Table, DrawEntries::RoundId)
                            .to(DrawRounds::Table, DrawRounds::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_draw_entries_user_round")
                    .table(DrawEntries::Table)
                    .col(DrawEntries::UserId)
                    .col(DrawEntries::RoundId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_draw_entries_round_id")
                    .table(DrawEntries::Table)
                    .col(DrawEntries::RoundId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order + drop index before table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_draw_entries_round_id")
                    .table(DrawEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("ux_draw_entries_user_round")
                    .table(DrawEntries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(DrawEntries::Table).to_owned())
            .await?;

        for index in [
            "ix_draw_rounds_status",
            "ux_draw_rounds_open_slot",
            "ux_draw_rounds_round_number",
        ] {
            manager
                .drop_index(Index::drop().name(index).table(DrawRounds::Table).to_owned())
                .await?;
        }
        manager
            .drop_table(Table::drop().table(DrawRounds::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}
