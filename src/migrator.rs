use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20241016_000001_create_robots_table::Migration),
            Box::new(m20241016_000002_create_parts_table::Migration),
            Box::new(m20241016_000003_create_maintenance_logs_table::Migration),
        ]
    }
}

// Migration implementations

mod m20241016_000001_create_robots_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241016_000001_create_robots_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Robots::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Robots::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Robots::Name)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Robots::Type).string_len(50).not_null())
                        .col(ColumnDef::new(Robots::CreatedAt).date().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Robots::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Robots {
        Table,
        Id,
        Name,
        Type,
        CreatedAt,
    }
}

mod m20241016_000002_create_parts_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241016_000002_create_parts_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Part ids are scoped per robot, hence the composite key
            manager
                .create_table(
                    Table::create()
                        .table(Parts::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Parts::RobotId).integer().not_null())
                        .col(ColumnDef::new(Parts::Id).integer().not_null())
                        .col(ColumnDef::new(Parts::Name).string_len(50).not_null())
                        .col(
                            ColumnDef::new(Parts::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(ColumnDef::new(Parts::LastChecked).date().not_null())
                        .primary_key(Index::create().col(Parts::RobotId).col(Parts::Id))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_parts_robot_id")
                                .from(Parts::Table, Parts::RobotId)
                                .to(Robots::Table, Robots::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Parts::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Parts {
        Table,
        RobotId,
        Id,
        Name,
        Quantity,
        LastChecked,
    }

    #[derive(DeriveIden)]
    enum Robots {
        Table,
        Id,
    }
}

mod m20241016_000003_create_maintenance_logs_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20241016_000003_create_maintenance_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(MaintenanceLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MaintenanceLogs::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(MaintenanceLogs::RobotId).integer().not_null())
                        .col(ColumnDef::new(MaintenanceLogs::PartsId).integer().null())
                        .col(
                            ColumnDef::new(MaintenanceLogs::Description)
                                .string_len(200)
                                .not_null(),
                        )
                        .col(ColumnDef::new(MaintenanceLogs::LogDate).date().not_null())
                        .col(
                            ColumnDef::new(MaintenanceLogs::DoneBy)
                                .string_len(50)
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_maintenance_logs_robot_id")
                                .from(MaintenanceLogs::Table, MaintenanceLogs::RobotId)
                                .to(Robots::Table, Robots::Id),
                        )
                        // A NULL parts_id skips this check, which is what robot-level logs rely on
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_maintenance_logs_robot_part")
                                .from(
                                    MaintenanceLogs::Table,
                                    (MaintenanceLogs::RobotId, MaintenanceLogs::PartsId),
                                )
                                .to(Parts::Table, (Parts::RobotId, Parts::Id)),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_maintenance_logs_robot_id")
                        .table(MaintenanceLogs::Table)
                        .col(MaintenanceLogs::RobotId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(MaintenanceLogs::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum MaintenanceLogs {
        Table,
        Id,
        RobotId,
        PartsId,
        Description,
        LogDate,
        DoneBy,
    }

    #[derive(DeriveIden)]
    enum Parts {
        Table,
        RobotId,
        Id,
    }

    #[derive(DeriveIden)]
    enum Robots {
        Table,
        Id,
    }
}
