//! Screens of the Mini App.

pub mod dashboard;
pub mod layouts;
pub mod servers;
pub mod settings;
pub mod stats;
pub mod subscription;

pub use dashboard::DashboardPage;
pub use layouts::AppLayout;
pub use servers::ServersPage;
pub use settings::SettingsPage;
pub use stats::StatsPage;
pub use subscription::SubscriptionPage;
