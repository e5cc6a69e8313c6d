pub mod cachet;
pub mod uptime_robot;

pub use cachet::{CachetClient, PointsPage};
pub use uptime_robot::UptimeRobotClient;
