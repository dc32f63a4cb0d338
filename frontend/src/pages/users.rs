use yew::prelude::*;

#[function_component(Users)]
pub fn users() -> Html {
    html! {
        <div class="container">
            <h2>{ "Users" }</h2>
            <p>{ "Manage user accounts and permissions." }</p>
        </div>
    }
}
