pub mod maintenance_logs;
pub mod parts;
pub mod robots;

use crate::{
    db::DbPool,
    services::{
        maintenance_logs::MaintenanceLogService, parts::PartService, robots::RobotService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub robots: Arc<RobotService>,
    pub parts: Arc<PartService>,
    pub maintenance_logs: Arc<MaintenanceLogService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self {
            robots: Arc::new(RobotService::new(db_pool.clone())),
            parts: Arc::new(PartService::new(db_pool.clone())),
            maintenance_logs: Arc::new(MaintenanceLogService::new(db_pool)),
        }
    }
}
