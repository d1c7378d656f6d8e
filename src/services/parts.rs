use crate::{
    db::{with_transaction, DbPool},
    entities::{part, robot},
    errors::ServiceError,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use std::sync::Arc;
use tracing::{info, instrument};

/// Input for a new part. Omitted fields take the entity defaults.
#[derive(Debug, Clone)]
pub struct NewPart {
    pub name: String,
    pub quantity: Option<i32>,
    pub last_checked: Option<NaiveDate>,
}

/// Fields a partial part update may touch.
#[derive(Debug, Clone, Default)]
pub struct PartChanges {
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub last_checked: Option<NaiveDate>,
}

impl PartChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.last_checked.is_none()
    }
}

/// Service for the parts installed on robots. Part ids are scoped per robot.
#[derive(Clone)]
pub struct PartService {
    db_pool: Arc<DbPool>,
}

async fn find_robot<C: ConnectionTrait>(
    db: &C,
    robot_id: i32,
) -> Result<robot::Model, ServiceError> {
    robot::Entity::find_by_id(robot_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Robot", robot_id))
}

async fn find_part<C: ConnectionTrait>(
    db: &C,
    robot_id: i32,
    id: i32,
) -> Result<part::Model, ServiceError> {
    part::Entity::find_by_id((robot_id, id))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Part", format!("{} of robot {}", id, robot_id)))
}

impl PartService {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }

    /// Lists the parts of a robot, ordered by id
    #[instrument(skip(self))]
    pub async fn list_parts(&self, robot_id: i32) -> Result<Vec<part::Model>, ServiceError> {
        let db = self.db_pool.as_ref();
        let robot = find_robot(db, robot_id).await?;
        let parts = robot
            .find_related(part::Entity)
            .order_by_asc(part::Column::Id)
            .all(db)
            .await?;
        Ok(parts)
    }

    /// Gets one part of a robot
    #[instrument(skip(self))]
    pub async fn get_part(&self, robot_id: i32, id: i32) -> Result<part::Model, ServiceError> {
        let db = self.db_pool.as_ref();
        find_robot(db, robot_id).await?;
        find_part(db, robot_id, id).await
    }

    /// Creates a part under a robot, assigning the next free id for that robot
    #[instrument(skip(self))]
    pub async fn create_part(
        &self,
        robot_id: i32,
        input: NewPart,
    ) -> Result<part::Model, ServiceError> {
        let created = with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                find_robot(txn, robot_id).await?;

                let next_id = part::Entity::find()
                    .filter(part::Column::RobotId.eq(robot_id))
                    .order_by_desc(part::Column::Id)
                    .one(txn)
                    .await?
                    .map_or(1, |last| last.id + 1);

                let mut active = part::ActiveModel {
                    robot_id: Set(robot_id),
                    id: Set(next_id),
                    name: Set(input.name),
                    ..Default::default()
                };
                if let Some(quantity) = input.quantity {
                    active.quantity = Set(quantity);
                }
                if let Some(last_checked) = input.last_checked {
                    active.last_checked = Set(last_checked);
                }

                Ok::<_, ServiceError>(active.insert(txn).await?)
            })
        })
        .await?;

        info!(robot_id, part_id = created.id, "Part created");
        Ok(created)
    }

    /// Applies the provided fields to an existing part
    #[instrument(skip(self))]
    pub async fn update_part(
        &self,
        robot_id: i32,
        id: i32,
        changes: PartChanges,
    ) -> Result<part::Model, ServiceError> {
        with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                let existing = find_part(txn, robot_id, id).await?;

                if changes.is_empty() {
                    return Err(ServiceError::empty_update());
                }

                let mut active: part::ActiveModel = existing.into();
                if let Some(name) = changes.name {
                    active.name = Set(name);
                }
                if let Some(quantity) = changes.quantity {
                    active.quantity = Set(quantity);
                }
                if let Some(last_checked) = changes.last_checked {
                    active.last_checked = Set(last_checked);
                }

                Ok::<_, ServiceError>(active.update(txn).await?)
            })
        })
        .await
    }

    /// Deletes a part. Fails with a conflict while maintenance logs still reference it.
    #[instrument(skip(self))]
    pub async fn delete_part(&self, robot_id: i32, id: i32) -> Result<(), ServiceError> {
        with_transaction(self.db_pool.as_ref(), move |txn| {
            Box::pin(async move {
                find_robot(txn, robot_id).await?;
                let existing = find_part(txn, robot_id, id).await?;
                existing.delete(txn).await?;
                Ok::<_, ServiceError>(())
            })
        })
        .await?;

        info!(robot_id, part_id = id, "Part deleted");
        Ok(())
    }
}
