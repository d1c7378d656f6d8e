use crate::{
    entities::robot,
    errors::ServiceError,
    extract::{AppJson, AppPath},
    services::robots::RobotChanges,
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "R2",
    "type": "utility",
    "created_at": "2026-10-16"
}))]
pub struct RobotSummary {
    /// Server-assigned robot id
    #[schema(example = 1)]
    pub id: i32,
    /// Unique robot name
    #[schema(example = "R2")]
    pub name: String,
    /// Robot model or category
    #[serde(rename = "type")]
    #[schema(example = "utility")]
    pub robot_type: String,
    /// Date the robot was registered
    pub created_at: NaiveDate,
}

impl From<robot::Model> for RobotSummary {
    fn from(model: robot::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            robot_type: model.robot_type,
            created_at: model.created_at,
        }
    }
}

/// Shared create/update body. Both fields are required on create.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "R2",
    "type": "utility"
}))]
pub struct RobotPayload {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "R2")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "utility")]
    pub robot_type: Option<String>,
}

impl From<RobotPayload> for RobotChanges {
    fn from(payload: RobotPayload) -> Self {
        Self {
            name: payload.name,
            robot_type: payload.robot_type,
        }
    }
}

fn required(value: Option<String>, field: &str) -> Result<String, ServiceError> {
    value.ok_or_else(|| ServiceError::ValidationError(format!("{}: field is required", field)))
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/robots",
    responses(
        (status = 200, description = "Robots listed", body = ApiResponse<Vec<RobotSummary>>)
    ),
    tag = "robots"
)]
pub async fn list_robots(State(state): State<AppState>) -> ApiResult<Vec<RobotSummary>> {
    let robots = state.services.robots.list_robots().await?;
    Ok(Json(ApiResponse::success(
        robots.into_iter().map(RobotSummary::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/robots/{robot_id}",
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 200, description = "Robot fetched", body = ApiResponse<RobotSummary>),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "robots"
)]
pub async fn get_robot(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ApiResult<RobotSummary> {
    let robot = state.services.robots.get_robot(id).await?;
    Ok(Json(ApiResponse::success(RobotSummary::from(robot))))
}

#[utoipa::path(
    post,
    path = "/ROBOHUB/robots",
    request_body = RobotPayload,
    responses(
        (status = 201, description = "Robot created", body = ApiResponse<RobotSummary>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Robot name already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "robots"
)]
pub async fn create_robot(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RobotPayload>,
) -> Result<(StatusCode, Json<ApiResponse<RobotSummary>>), ServiceError> {
    payload.validate()?;
    let name = required(payload.name, "name")?;
    let robot_type = required(payload.robot_type, "type")?;

    let created = state.services.robots.create_robot(name, robot_type).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(RobotSummary::from(created)).with_message("Robot created"),
        ),
    ))
}

#[utoipa::path(
    patch,
    path = "/ROBOHUB/robots/{robot_id}",
    request_body = RobotPayload,
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 200, description = "Robot updated", body = ApiResponse<RobotSummary>),
        (status = 400, description = "Empty or invalid update", body = crate::errors::ErrorResponse),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Robot name already taken", body = crate::errors::ErrorResponse)
    ),
    tag = "robots"
)]
pub async fn update_robot(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
    AppJson(payload): AppJson<RobotPayload>,
) -> ApiResult<RobotSummary> {
    payload.validate()?;
    let updated = state
        .services
        .robots
        .update_robot(id, payload.into())
        .await?;
    Ok(Json(ApiResponse::success(RobotSummary::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/ROBOHUB/robots/{robot_id}",
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 204, description = "Robot, its parts and its maintenance logs deleted"),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "robots"
)]
pub async fn delete_robot(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> Result<StatusCode, ServiceError> {
    state.services.robots.delete_robot(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
