use crate::{
    db::{with_transaction, DbPool},
    entities::{maintenance_log, part, robot},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Fields a partial robot update may touch. `None` leaves the column alone.
#[derive(Debug, Clone, Default)]
pub struct RobotChanges {
    pub name: Option<String>,
    pub robot_type: Option<String>,
}

impl RobotChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.robot_type.is_none()
    }
}

/// Service for managing robots
#[derive(Clone)]
pub struct RobotService {
    db_pool: Arc<DbPool>,
}

impl RobotService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists every robot, ordered by id
    #[instrument(skip(self))]
    pub async fn list_robots(&self) -> Result<Vec<robot::Model>, ServiceError> {
        let robots = robot::Entity::find()
            .order_by_asc(robot::Column::Id)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(robots)
    }

    /// Gets a robot by ID
    #[instrument(skip(self))]
    pub async fn get_robot(&self, id: i32) -> Result<robot::Model, ServiceError> {
        robot::Entity::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::not_found("Robot", id))
    }

    /// Creates a robot; `created_at` is stamped by the entity on insert
    #[instrument(skip(self))]
    pub async fn create_robot(
        &self,
        name: String,
        robot_type: String,
    ) -> Result<robot::Model, ServiceError> {
        let created = with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                let model = robot::ActiveModel {
                    name: Set(name),
                    robot_type: Set(robot_type),
                    ..Default::default()
                }
                .insert(txn)
                .await?;
                Ok::<_, ServiceError>(model)
            })
        })
        .await?;

        info!(robot_id = created.id, "Robot created");
        Ok(created)
    }

    /// Applies the provided fields to an existing robot
    #[instrument(skip(self))]
    pub async fn update_robot(
        &self,
        id: i32,
        changes: RobotChanges,
    ) -> Result<robot::Model, ServiceError> {
        with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                let existing = robot::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Robot", id))?;

                if changes.is_empty() {
                    return Err(ServiceError::empty_update());
                }

                let mut active: robot::ActiveModel = existing.into();
                if let Some(name) = changes.name {
                    active.name = Set(name);
                }
                if let Some(robot_type) = changes.robot_type {
                    active.robot_type = Set(robot_type);
                }

                Ok::<_, ServiceError>(active.update(txn).await?)
            })
        })
        .await
    }

    /// Deletes a robot together with its maintenance logs and parts
    #[instrument(skip(self))]
    pub async fn delete_robot(&self, id: i32) -> Result<(), ServiceError> {
        let (logs, parts) = with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                let existing = robot::Entity::find_by_id(id)
                    .one(txn)
                    .await?
                    .ok_or_else(|| ServiceError::not_found("Robot", id))?;

                // Logs first: they reference parts through the composite key
                let logs = maintenance_log::Entity::delete_many()
                    .filter(maintenance_log::Column::RobotId.eq(id))
                    .exec(txn)
                    .await?;
                let parts = part::Entity::delete_many()
                    .filter(part::Column::RobotId.eq(id))
                    .exec(txn)
                    .await?;
                existing.delete(txn).await?;

                Ok::<_, ServiceError>((logs.rows_affected, parts.rows_affected))
            })
        })
        .await?;

        info!(
            robot_id = id,
            removed_logs = logs,
            removed_parts = parts,
            "Robot deleted"
        );
        Ok(())
    }
}
