use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moves::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Moves::GameId).uuid().not_null())
                    .col(ColumnDef::new(Moves::MoveIndex).integer().not_null())
                    .col(ColumnDef::new(Moves::Guess).string().not_null())
                    .col(ColumnDef::new(Moves::WordStatus).string().not_null())
                    .col(ColumnDef::new(Moves::Verdict).boolean().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_game_id")
                            .from(Moves::Table, Moves::GameId)
                            .to(Games::Table, Games::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One ledger slot per sequence index and game
        manager
            .create_index(
                Index::create()
                    .name("idx_moves_game_id_move_index")
                    .table(Moves::Table)
                    .col(Moves::GameId)
                    .col(Moves::MoveIndex)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Moves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Moves {
    Table,
    Id,
    GameId,
    MoveIndex,
    Guess,
    WordStatus,
    Verdict,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}
