use crate::{
    entities::part,
    errors::ServiceError,
    extract::{AppJson, AppPath},
    services::parts::{NewPart, PartChanges},
    ApiResponse, ApiResult, AppState,
};
use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Part projection; the owning robot id lives on the enclosing response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "wheel",
    "quantity": 4,
    "last_checked": "2026-10-16"
}))]
pub struct PartSummary {
    /// Part id, unique within its robot
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "wheel")]
    pub name: String,
    #[schema(example = 4)]
    pub quantity: i32,
    pub last_checked: NaiveDate,
}

impl From<part::Model> for PartSummary {
    fn from(model: part::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            last_checked: model.last_checked,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RobotPartsResponse {
    pub robot_id: i32,
    pub parts: Vec<PartSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RobotPartResponse {
    pub robot_id: i32,
    pub part: PartSummary,
}

impl From<part::Model> for RobotPartResponse {
    fn from(model: part::Model) -> Self {
        Self {
            robot_id: model.robot_id,
            part: PartSummary::from(model),
        }
    }
}

/// Shared create/update body; `name` is required on create.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "name": "wheel",
    "quantity": 4
}))]
pub struct PartPayload {
    #[validate(length(min = 1, max = 50))]
    #[schema(example = "wheel")]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    #[schema(example = 4)]
    pub quantity: Option<i32>,
    pub last_checked: Option<NaiveDate>,
}

impl From<PartPayload> for PartChanges {
    fn from(payload: PartPayload) -> Self {
        Self {
            name: payload.name,
            quantity: payload.quantity,
            last_checked: payload.last_checked,
        }
    }
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/robots/{robot_id}/parts",
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 200, description = "Parts of the robot", body = ApiResponse<RobotPartsResponse>),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn list_parts(
    State(state): State<AppState>,
    AppPath(robot_id): AppPath<i32>,
) -> ApiResult<RobotPartsResponse> {
    let parts = state.services.parts.list_parts(robot_id).await?;
    Ok(Json(ApiResponse::success(RobotPartsResponse {
        robot_id,
        parts: parts.into_iter().map(PartSummary::from).collect(),
    })))
}

#[utoipa::path(
    get,
    path = "/ROBOHUB/robots/{robot_id}/parts/{id}",
    params(
        ("robot_id" = i32, Path, description = "Robot ID"),
        ("id" = i32, Path, description = "Part ID within the robot")
    ),
    responses(
        (status = 200, description = "Part fetched", body = ApiResponse<RobotPartResponse>),
        (status = 404, description = "Robot or part not found", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn get_part(
    State(state): State<AppState>,
    AppPath((robot_id, id)): AppPath<(i32, i32)>,
) -> ApiResult<RobotPartResponse> {
    let part = state.services.parts.get_part(robot_id, id).await?;
    Ok(Json(ApiResponse::success(RobotPartResponse::from(part))))
}

#[utoipa::path(
    post,
    path = "/ROBOHUB/robots/{robot_id}/parts",
    request_body = PartPayload,
    params(
        ("robot_id" = i32, Path, description = "Robot ID")
    ),
    responses(
        (status = 201, description = "Part created", body = ApiResponse<RobotPartResponse>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 404, description = "Robot not found", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn create_part(
    State(state): State<AppState>,
    AppPath(robot_id): AppPath<i32>,
    AppJson(payload): AppJson<PartPayload>,
) -> Result<(StatusCode, Json<ApiResponse<RobotPartResponse>>), ServiceError> {
    payload.validate()?;
    let name = payload
        .name
        .ok_or_else(|| ServiceError::ValidationError("name: field is required".to_string()))?;

    let input = NewPart {
        name,
        quantity: payload.quantity,
        last_checked: payload.last_checked,
    };
    let created = state.services.parts.create_part(robot_id, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(
            ApiResponse::success(RobotPartResponse::from(created)).with_message("Part created"),
        ),
    ))
}

#[utoipa::path(
    patch,
    path = "/ROBOHUB/robots/{robot_id}/parts/{id}",
    request_body = PartPayload,
    params(
        ("robot_id" = i32, Path, description = "Robot ID"),
        ("id" = i32, Path, description = "Part ID within the robot")
    ),
    responses(
        (status = 200, description = "Part updated", body = ApiResponse<RobotPartResponse>),
        (status = 400, description = "Empty or invalid update", body = crate::errors::ErrorResponse),
        (status = 404, description = "Part not found", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn update_part(
    State(state): State<AppState>,
    AppPath((robot_id, id)): AppPath<(i32, i32)>,
    AppJson(payload): AppJson<PartPayload>,
) -> ApiResult<RobotPartResponse> {
    payload.validate()?;
    let updated = state
        .services
        .parts
        .update_part(robot_id, id, payload.into())
        .await?;
    Ok(Json(ApiResponse::success(RobotPartResponse::from(updated))))
}

#[utoipa::path(
    delete,
    path = "/ROBOHUB/robots/{robot_id}/parts/{id}",
    params(
        ("robot_id" = i32, Path, description = "Robot ID"),
        ("id" = i32, Path, description = "Part ID within the robot")
    ),
    responses(
        (status = 204, description = "Part deleted"),
        (status = 404, description = "Robot or part not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Part still referenced by maintenance logs", body = crate::errors::ErrorResponse)
    ),
    tag = "parts"
)]
pub async fn delete_part(
    State(state): State<AppState>,
    AppPath((robot_id, id)): AppPath<(i32, i32)>,
) -> Result<StatusCode, ServiceError> {
    state.services.parts.delete_part(robot_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
