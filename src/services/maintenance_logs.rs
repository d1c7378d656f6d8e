use crate::{
    db::{with_transaction, DbPool},
    entities::{maintenance_log, part, robot},
    errors::ServiceError,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::sync::Arc;
use tracing::{info, instrument};

/// Input for a new maintenance log entry
#[derive(Debug, Clone)]
pub struct NewMaintenanceLog {
    pub parts_id: Option<i32>,
    pub description: String,
    pub done_by: String,
}

/// Service for maintenance logs. Logs are append-only.
#[derive(Clone)]
pub struct MaintenanceLogService {
    db_pool: Arc<DbPool>,
}

impl MaintenanceLogService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists every log across all robots
    #[instrument(skip(self))]
    pub async fn list_logs(&self) -> Result<Vec<maintenance_log::Model>, ServiceError> {
        let logs = maintenance_log::Entity::find()
            .order_by_asc(maintenance_log::Column::Id)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(logs)
    }

    #[instrument(skip(self))]
    pub async fn get_log(&self, id: i32) -> Result<maintenance_log::Model, ServiceError> {
        maintenance_log::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found("Maintenance log", id))
    }

    /// Lists the logs of one robot. With `include_part_logs` false only the
    /// robot-level entries (no `parts_id`) are returned.
    #[instrument(skip(self))]
    pub async fn list_robot_logs(
        &self,
        robot_id: i32,
        include_part_logs: bool,
    ) -> Result<Vec<maintenance_log::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        robot::Entity::find_by_id(robot_id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Robot", robot_id))?;

        let mut query = maintenance_log::Entity::find()
            .filter(maintenance_log::Column::RobotId.eq(robot_id));
        if !include_part_logs {
            query = query.filter(maintenance_log::Column::PartsId.is_null());
        }

        let logs = query
            .order_by_asc(maintenance_log::Column::Id)
            .all(db)
            .await?;
        Ok(logs)
    }

    /// Records a maintenance action on a robot, optionally against one of its parts
    #[instrument(skip(self))]
    pub async fn create_log(
        &self,
        robot_id: i32,
        input: NewMaintenanceLog,
    ) -> Result<maintenance_log::Model, ServiceError> {
        let created = with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                robot::Entity::find_by_id(robot_id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Robot", robot_id))?;

                if let Some(parts_id) = input.parts_id {
                    let owned = part::Entity::find_by_id((robot_id, parts_id))
                        .one(txn)
                        .await?;
                    if owned.is_none() {
                        return Err(ServiceError::InvalidInput(format!(
                            "Part {} does not belong to robot {}",
                            parts_id, robot_id
                        )));
                    }
                }

                let active = maintenance_log::ActiveModel {
                    robot_id: Set(robot_id),
                    parts_id: Set(input.parts_id),
                    description: Set(input.description),
                    done_by: Set(input.done_by),
                    ..Default::default()
                };

                Ok::<_, ServiceError>(active.insert(txn).await?)
            })
        })
        .await?;

        info!(robot_id, log_id = created.id, "Maintenance log recorded");
        Ok(created)
    }
}
