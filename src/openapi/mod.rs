use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const OPENAPI_JSON_PATH: &str = "/ROBOHUB/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/ROBOHUB/docs";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "RoboHub API",
        version = "0.1.0",
        description = r#"
# RoboHub

Inventory and maintenance bookkeeping for robots: the robots themselves, the
replaceable parts installed on them, and a log of maintenance actions.

## Error Handling

Failures share one body shape:

```json
{
  "error": "Not Found",
  "message": "Not found: Robot 42 not found",
  "request_id": "5b1c0e7e-9d0e-4a39-8d5e-3f0b9a3c2f11",
  "timestamp": "2026-10-16T10:30:00Z"
}
```

Constraint violations (duplicate robot name, a part still referenced by
maintenance logs) are reported as `409 Conflict`.
        "#,
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development")
    ),
    tags(
        (name = "robots", description = "Robot registry"),
        (name = "parts", description = "Parts installed on a robot"),
        (name = "maintenance_logs", description = "Maintenance history"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::health::health_check,

        // Robots
        crate::handlers::robots::list_robots,
        crate::handlers::robots::get_robot,
        crate::handlers::robots::create_robot,
        crate::handlers::robots::update_robot,
        crate::handlers::robots::delete_robot,

        // Parts
        crate::handlers::parts::list_parts,
        crate::handlers::parts::get_part,
        crate::handlers::parts::create_part,
        crate::handlers::parts::update_part,
        crate::handlers::parts::delete_part,

        // Maintenance logs
        crate::handlers::maintenance_logs::list_logs,
        crate::handlers::maintenance_logs::get_log,
        crate::handlers::maintenance_logs::list_robot_logs,
        crate::handlers::maintenance_logs::create_log,
    ),
    components(
        schemas(
            crate::handlers::robots::RobotSummary,
            crate::handlers::robots::RobotPayload,
            crate::handlers::parts::PartSummary,
            crate::handlers::parts::PartPayload,
            crate::handlers::parts::RobotPartsResponse,
            crate::handlers::parts::RobotPartResponse,
            crate::handlers::maintenance_logs::MaintenanceLogSummary,
            crate::handlers::maintenance_logs::CreateMaintenanceLogRequest,
            crate::health::HealthReport,
            crate::health::HealthStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_lists_every_resource() {
        let json = serde_json::to_string_pretty(&ApiDoc::openapi()).unwrap();
        assert!(json.contains("RoboHub API"));
        assert!(json.contains("/ROBOHUB/robots"));
        assert!(json.contains("/ROBOHUB/maintenance_logs"));
        assert!(json.contains("RobotPartsResponse"));
    }

    #[test]
    fn path_keys_use_openapi_templates() {
        let doc = ApiDoc::openapi();
        let keys: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(
            keys.iter().all(|key| !key.contains(':')),
            "axum-style segment in {:?}",
            keys
        );
        assert!(doc.paths.paths.contains_key("/ROBOHUB/robots/{robot_id}"));
        assert!(doc
            .paths
            .paths
            .contains_key("/ROBOHUB/robots/{robot_id}/parts/{id}"));
        assert!(doc
            .paths
            .paths
            .contains_key("/ROBOHUB/robots/{robot_id}/maintenance_logs"));
        assert!(doc.paths.paths.contains_key("/ROBOHUB/maintenance_logs/{id}"));
    }
}
