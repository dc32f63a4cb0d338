use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{
    analytics::Analytics, dashboard::Dashboard, not_found::NotFound,
    notifications::Notifications, settings::Settings, users::Users,
};

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/analytics")]
    Analytics,
    #[at("/users")]
    Users,
    #[at("/notifications")]
    Notifications,
    #[at("/settings")]
    Settings,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Sidebar entries, in display order
    pub const MENU: [Route; 5] = [
        Route::Dashboard,
        Route::Analytics,
        Route::Users,
        Route::Notifications,
        Route::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Analytics => "Analytics",
            Route::Users => "Users",
            Route::Notifications => "Notifications",
            Route::Settings => "Settings",
            Route::NotFound => "Not Found",
        }
    }
}

pub fn switch(routes: Route) -> Html {
    match routes {
        Route::Dashboard => html! { <Dashboard /> },
        Route::Analytics => html! { <Analytics /> },
        Route::Users => html! { <Users /> },
        Route::Notifications => html! { <Notifications /> },
        Route::Settings => html! { <Settings /> },
        Route::NotFound => html! { <NotFound /> },
    }
}
