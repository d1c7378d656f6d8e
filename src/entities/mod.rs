pub mod maintenance_log;
pub mod part;
pub mod robot;
