use crate::{
    entities::maintenance_log,
    errors::ServiceError,
    extract::{AppJson, AppPath, AppQuery},
    services::maintenance_logs::NewMaintenanceLog,
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "robot_id": 1,
    "parts_id": 2,
    "description": "Replaced worn tread",
    "log_date": "2026-10-16",
    "done_by": "ann"
}))]
pub struct MaintenanceLogSummary {
    pub id: i32,
    pub robot_id: i32,
    /// Part the work concerned; null for robot-level maintenance
    pub parts_id: Option<i32>,
    pub description: String,
    pub log_date: NaiveDate,
    /// Person or agent who did the work
    pub done_by: String,
}

impl From<maintenance_log::Model> for MaintenanceLogSummary {
    fn from(model: maintenance_log::Model) -> Self {
        Self {
            id: model.id,
            robot_id: model.robot_id,
            parts_id: model.parts_id,
            description: model.description,
            log_date: model.log_date,
            done_by: model.done_by,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "parts_id": 2,
    "description": "Replaced worn tread",
    "done_by": "ann"
}))]
pub struct CreateMaintenanceLogRequest {
    pub parts_id: Option<i32>,
    #[validate(length(min = 1, max = 200))]
    pub description: String,
    #[validate(length(min = 1, max = 50))]
    pub done_by: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RobotLogsQuery {
    /// `true` returns every log of the robot, `false` only robot-level logs.
    /// `1/0`, `yes/no`, `on/off` and `t/f`, `y/n` are accepted too, in any case.
    #[serde(deserialize_with = "deserialize_flag")]
    pub parts: bool,
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.to_ascii_lowercase().as_str() {
        "true" | "t" | "1" | "yes" | "y" | "on" => Ok(true),
        "false" | "f" | "0" | "no" | "n" | "off" => Ok(false),
        _ => Err(serde::de::Error::custom(format!(
            "invalid boolean `{}`",
            raw
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/maintenance_logs",
    responses(
        (status = 200, description = "All maintenance logs", body = ApiResponse<Vec<MaintenanceLogSummary>>)
    ),
    tag = "maintenance_logs"
)]
pub async fn list_logs(State(state): State<AppState>) -> ApiResult<Vec<MaintenanceLogSummary>> {
    let logs = state.services.maintenance_logs.list_logs().await?;
    Ok(Json(ApiResponse::success(
        logs.into_iter().map(MaintenanceLogSummary::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/maintenance_logs/{id}",
    params(
        ("id" = i32, Path, description = "Maintenance log ID")
    ),
    responses(
        (status = 200, description = "Maintenance log fetched", body = ApiResponse<MaintenanceLogSummary>),
        (status = 404, description = "Maintenance log not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance_logs"
)]
pub async fn get_log(
    State(state): State<AppState>,
    AppPath(id): AppPath<i32>,
) -> ApiResult<MaintenanceLogSummary> {
    let log = state.services.maintenance_logs.get_log(id).await?;
    Ok(Json(ApiResponse::success(MaintenanceLogSummary::from(log))))
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/robots/{robot_id}/maintenance_logs",
    params(
        ("robot_id" = i32, Path, description = "Robot ID"),
        RobotLogsQuery
    ),
    responses(
        (status = 200, description = "Maintenance logs of the robot", body = ApiResponse<Vec<MaintenanceLogSummary>>),
        (status = 400, description = "Missing or invalid `parts` parameter", body = crate::errors::ErrorResponse),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance_logs"
)]
pub async fn list_robot_logs(
    State(state): State<AppState>,
    AppPath(robot_id): AppPath<i32>,
    AppQuery(query): AppQuery<RobotLogsQuery>,
) -> ApiResult<Vec<MaintenanceLogSummary>> {
    let logs = state
        .services
        .maintenance_logs
        .list_robot_logs(robot_id, query.parts)
        .await?;
    Ok(Json(ApiResponse::success(
        logs.into_iter().map(MaintenanceLogSummary::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/ROBOHUB/robots/{robot_id}/maintenance_logs",
    request_body = CreateMaintenanceLogRequest,
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 201, description = "Maintenance log recorded", body = ApiResponse<MaintenanceLogSummary>),
        (status = 400, description = "Invalid request or foreign part", body = crate::errors::ErrorResponse),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "maintenance_logs"
)]
pub async fn create_log(
    State(state): State<AppState>,
    AppPath(robot_id): AppPath<i32>,
    AppJson(payload): AppJson<CreateMaintenanceLogRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MaintenanceLogSummary>>), ServiceError> {
    payload.validate()?;

    let input = NewMaintenanceLog {
        parts_id: payload.parts_id,
        description: payload.description,
        done_by: payload.done_by,
    };
    let created = state
        .services
        .maintenance_logs
        .create_log(robot_id, input)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(MaintenanceLogSummary::from(created))
                .with_message("Maintenance log recorded"),
        ),
    ))
}
