use chrono::Local;
use yew::prelude::*;

use crate::components::calendar::Calendar;
use crate::components::customer_table::CustomerTableView;
use crate::components::quick_actions::QuickActions;

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let today = Local::now().format("%A, %B %-d, %Y").to_string();

    html! {
        <div class="dashboard-page">
            <div class="dashboard-header">
                <div>
                    <h1 class="dashboard-title">{ "Welcome back!" }</h1>
                    <p class="dashboard-subtitle">{ "Here's what's happening with your business today." }</p>
                </div>
                <div class="dashboard-date">{ today }</div>
            </div>

            <div class="quick-actions-section">
                <QuickActions />
            </div>

            <div class="calendar-full-section">
                <Calendar />
            </div>

            <div class="crm-full-section">
                <CustomerTableView />
            </div>
        </div>
    }
}
