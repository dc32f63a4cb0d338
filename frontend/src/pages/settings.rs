use yew::prelude::*;

use crate::services::clients::connector_config;

#[function_component(Settings)]
pub fn settings() -> Html {
    let config = connector_config();
    let missing = config.missing_credentials();

    let row = |label: &'static str, variable: &'static str| {
        let configured = !missing.contains(&variable);
        html! {
            <li key={variable} class={classes!("setting-row", if configured { "configured" } else { "missing" })}>
                <span class="setting-label">{ label }</span>
                <code>{ variable }</code>
                <span class="setting-status">
                    { if configured { "Configured" } else { "Not configured" } }
                </span>
            </li>
        }
    };

    html! {
        <div class="container">
            <h2>{ "Settings" }</h2>
            <p>{ "Connector credentials are captured when the app is built." }</p>
            <ul class="settings-list">
                { row("Scheduling API key", "CAL_API_KEY") }
                { row("Scheduling account", "CAL_USERNAME") }
                { row("Customer table token", "AIRTABLE_TOKEN") }
                { row("Customer base", "AIRTABLE_BASE_ID") }
                { row("Customer table", "AIRTABLE_TABLE_NAME") }
            </ul>
            <p class="setting-note">
                { format!("Calendar requests up to {} bookings from {}", config.bookings.fetch_limit, config.bookings.api_base) }
            </p>
        </div>
    }
}
