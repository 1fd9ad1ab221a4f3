use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// id, color, Spanish name, English name.
const SEED: [(&str, &str, &str, &str); 5] = [
    ("crianza", "coral", "Crianza", "Parenting"),
    ("familia", "sage", "Familia", "Family"),
    ("eneagrama", "lavender", "Eneagrama", "Enneagram"),
    ("desarrollo-personal", "gold", "Desarrollo personal", "Personal growth"),
    ("relaciones", "rose", "Relaciones", "Relationships"),
];

fn seed_sql() -> String {
    let mut categories = Vec::new();
    let mut names = Vec::new();
    for (id, color, es, en) in SEED {
        categories.push(format!("('{}', '{}')", id, color));
        names.push(format!("('{}', 'es', '{}')", id, es));
        names.push(format!("('{}', 'en', '{}')", id, en));
    }

    format!(
        "INSERT INTO categories (id, color) VALUES {} ON CONFLICT (id) DO NOTHING;
         INSERT INTO category_translations (category_id, language, name) VALUES {}
         ON CONFLICT (category_id, language) DO NOTHING;",
        categories.join(", "),
        names.join(", ")
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(PostLanguage::Enum)
                    .values([PostLanguage::Es, PostLanguage::En])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Categories::Color).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CategoryTranslations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CategoryTranslations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CategoryTranslations::CategoryId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryTranslations::Language)
                            .custom(PostLanguage::Enum)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CategoryTranslations::Name)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_category_translations_category")
                            .from(CategoryTranslations::Table, CategoryTranslations::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_category_translations_language")
                    .table(CategoryTranslations::Table)
                    .col(CategoryTranslations::CategoryId)
                    .col(CategoryTranslations::Language)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&seed_sql())
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CategoryTranslations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await?;
        manager
            .drop_type(Type::drop().if_exists().name(PostLanguage::Enum).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Categories {
    Table,
    Id,
    Color,
}

#[derive(DeriveIden)]
enum CategoryTranslations {
    Table,
    Id,
    CategoryId,
    Language,
    Name,
}

#[derive(DeriveIden)]
pub(crate) enum PostLanguage {
    #[sea_orm(iden = "post_language")]
    Enum,
    Es,
    En,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_covers_both_languages() {
        let sql = seed_sql();
        assert!(sql.contains("('desarrollo-personal', 'gold')"));
        assert!(sql.contains("('relaciones', 'en', 'Relationships')"));
        assert_eq!(sql.matches("'es'").count(), SEED.len());
    }
}
