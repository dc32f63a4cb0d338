use yew::prelude::*;

use crate::components::recent_activity::RecentActivity;

#[function_component(Notifications)]
pub fn notifications() -> Html {
    html! {
        <div class="container">
            <h2>{ "Notifications" }</h2>
            <RecentActivity />
        </div>
    }
}
