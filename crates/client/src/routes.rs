//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{
    AppLayout, DashboardPage, ServersPage, SettingsPage, StatsPage, SubscriptionPage,
};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(AppLayout)]
        #[route("/")]
        DashboardPage {},
        #[route("/servers")]
        ServersPage {},
        #[route("/subscription")]
        SubscriptionPage {},
        #[route("/stats")]
        StatsPage {},
        #[route("/settings")]
        SettingsPage {},
}
