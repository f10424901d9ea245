mod dashboard;

pub use dashboard::{DashboardHttpController, DashboardPins, init_dashboard_controller};
