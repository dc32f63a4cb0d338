use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let is_open = use_state(|| false);
    let current = use_route::<Route>().unwrap_or(Route::Dashboard);

    let toggle = {
        let is_open = is_open.clone();
        Callback::from(move |_| is_open.set(!*is_open))
    };

    html! {
        <>
            <button class="mobile-menu-toggle" onclick={toggle}>
                { if *is_open { "✕" } else { "☰" } }
            </button>

            <aside class={classes!("sidebar", is_open.then_some("sidebar-open"))}>
                <div class="sidebar-header">
                    <h1 class="logo">{ "Zenith" }</h1>
                    <div class="search-container">
                        <input type="text" placeholder="Search..." class="search-input" />
                    </div>
                </div>

                <nav class="sidebar-nav">
                    <ul class="nav-list">
                        { for Route::MENU.iter().map(|route| {
                            let active = *route == current;
                            html! {
                                <li key={route.label()}>
                                    <Link<Route>
                                        to={route.clone()}
                                        classes={classes!("nav-item", active.then_some("nav-item-active"))}
                                    >
                                        <span class="nav-text">{ route.label() }</span>
                                    </Link<Route>>
                                </li>
                            }
                        })}
                    </ul>
                </nav>

                <div class="sidebar-footer">
                    <div class="user-profile">
                        <div class="user-avatar">
                            <span>{ "A" }</span>
                        </div>
                        <div class="user-info">
                            <span class="user-name">{ "Admin User" }</span>
                            <span class="user-email">{ "admin@zenith.com" }</span>
                        </div>
                    </div>
                </div>
            </aside>
        </>
    }
}
