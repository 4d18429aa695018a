use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Email)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::PasswordHash).string().not_null())
                    .col(ColumnDef::new(User::CreatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        // submissions: unique email, one record per user
        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submission::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submission::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Submission::DisplayName).string().not_null())
                    .col(ColumnDef::new(Submission::Aai).integer().not_null())
                    .col(ColumnDef::new(Submission::Foml).integer().not_null())
                    .col(ColumnDef::new(Submission::Imad).integer().not_null())
                    .col(ColumnDef::new(Submission::Vcc).integer().not_null())
                    .col(ColumnDef::new(Submission::SubmittedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users")]
    Table,
    Email,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submission {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    Email,
    DisplayName,
    Aai,
    Foml,
    Imad,
    Vcc,
    SubmittedAt,
}
