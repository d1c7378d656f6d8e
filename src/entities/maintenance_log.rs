use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{entity::prelude::*, ActiveValue::Set};
use serde::{Deserialize, Serialize};

/// A maintenance action on a robot. `parts_id`, when present, points at a part
/// of the same robot through the composite key `(robot_id, parts_id)`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub robot_id: i32,
    pub parts_id: Option<i32>,
    pub description: String,
    pub log_date: Date,
    pub done_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::robot::Entity",
        from = "Column::RobotId",
        to = "super::robot::Column::Id"
    )]
    Robot,
    #[sea_orm(
        belongs_to = "super::part::Entity",
        from = "(Column::RobotId, Column::PartsId)",
        to = "(super::part::Column::RobotId, super::part::Column::Id)"
    )]
    Part,
}

impl Related<super::robot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Robot.def()
    }
}

impl Related<super::part::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Part.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C: ConnectionTrait>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert && active_model.log_date.is_not_set() {
            active_model.log_date = Set(Utc::now().date_naive());
        }

        Ok(active_model)
    }
}
