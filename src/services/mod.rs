pub mod maintenance_logs;
pub mod parts;
pub mod robots;
