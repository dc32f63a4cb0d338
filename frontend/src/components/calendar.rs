use std::rc::Rc;

use chrono::{Local, NaiveDate, Utc};
use yew::prelude::*;

use connectors::{BookingClient, BookingFeed, EventType};
use shared::calendar::{
    build_month_grid, events_on, next_month, preview_title, previous_month, CalendarDay,
    MAX_PREVIEWS, WEEKDAY_LABELS,
};
use shared::generation::Generation;
use shared::Event;

use crate::services::clients::booking_client;

#[function_component(Calendar)]
pub fn calendar() -> Html {
    let client: Rc<BookingClient> = use_memo((), |_| booking_client());
    let reference = use_state(|| Local::now().date_naive());
    let feed = use_state(|| None::<BookingFeed>);
    let loading = use_state(|| false);
    let selected = use_state(|| None::<NaiveDate>);
    let refresh_trigger = use_state(|| 0u32);
    let today_count = use_state(|| None::<usize>);
    let event_types = use_state(Vec::<EventType>::new);
    let loads = use_mut_ref(Generation::default);
    let summary_loads = use_mut_ref(Generation::default);

    // Reload whenever the displayed month changes or refresh is clicked
    {
        let client = client.clone();
        let feed = feed.clone();
        let loading = loading.clone();
        let loads = loads.clone();

        use_effect_with((*reference, *refresh_trigger), move |_| {
            let ticket = loads.borrow_mut().issue();
            loading.set(true);
            {
                let loads = loads.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let fetched = client.fetch_upcoming(client.config().fetch_limit).await;
                    if !loads.borrow().is_current(ticket) {
                        tracing::debug!("Discarding superseded booking feed");
                        return;
                    }
                    feed.set(Some(fetched));
                    loading.set(false);
                });
            }
            move || loads.borrow_mut().invalidate()
        });
    }

    {
        let client = client.clone();
        let today_count = today_count.clone();
        let event_types = event_types.clone();

        let summary_loads = summary_loads.clone();

        use_effect_with((), move |_| {
            let ticket = summary_loads.borrow_mut().issue();
            {
                let summary_loads = summary_loads.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let count = client.fetch_today().await.len();
                    if !summary_loads.borrow().is_current(ticket) {
                        return;
                    }
                    today_count.set(Some(count));

                    let types = client.event_types().await;
                    if !summary_loads.borrow().is_current(ticket) {
                        return;
                    }
                    event_types.set(types);
                });
            }
            move || summary_loads.borrow_mut().invalidate()
        });
    }

    let on_previous = {
        let reference = reference.clone();
        Callback::from(move |_| reference.set(previous_month(*reference)))
    };

    let on_next = {
        let reference = reference.clone();
        Callback::from(move |_| reference.set(next_month(*reference)))
    };

    let on_refresh = {
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_| refresh_trigger.set(*refresh_trigger + 1))
    };

    let on_select = {
        let selected = selected.clone();
        Callback::from(move |date: NaiveDate| selected.set(Some(date)))
    };

    let on_close = {
        let selected = selected.clone();
        Callback::from(move |_| selected.set(None))
    };

    let events: Vec<Event> = feed
        .as_ref()
        .map(|feed| feed.events().to_vec())
        .unwrap_or_default();
    let grid = build_month_grid(*reference, Utc::now(), *selected, &events);

    let degraded_notice = match feed.as_ref() {
        Some(BookingFeed::Degraded { cause, .. }) => html! {
            <div class="degraded-notice" title={cause.clone()}>
                { "Live bookings are unavailable. Showing a sample schedule." }
            </div>
        },
        _ => html! {},
    };

    let modal = match *selected {
        Some(date) => {
            let day_events = events_on(date, &events);
            if day_events.is_empty() {
                html! {}
            } else {
                html! { <DayModal {date} events={day_events} on_close={on_close} /> }
            }
        }
        None => html! {},
    };

    html! {
        <div class="calendar-container">
            <div class="calendar-header">
                <div class="calendar-nav">
                    <button onclick={on_previous} class="nav-button">{ "‹" }</button>
                    <h2 class="calendar-title">{ grid.title() }</h2>
                    <button onclick={on_next} class="nav-button">{ "›" }</button>
                </div>
                <button onclick={on_refresh} disabled={*loading} class="refresh-button">
                    { if *loading { "Loading..." } else { "Refresh" } }
                </button>
            </div>

            { degraded_notice }

            <div class="calendar-summary">
                if let Some(count) = *today_count {
                    <span class="today-count">{ format!("{} bookings today", count) }</span>
                }
                if !event_types.is_empty() {
                    <div class="booking-links">
                        { for event_types.iter().map(|kind| {
                            let label = match kind.length {
                                Some(minutes) => format!("{} ({} min)", kind.title, minutes),
                                None => kind.title.clone(),
                            };
                            html! {
                                <a key={kind.slug.clone()}
                                   class="booking-link"
                                   href={client.booking_url(&kind.slug)}
                                   target="_blank"
                                   rel="noopener noreferrer">
                                    { label }
                                </a>
                            }
                        })}
                    </div>
                }
            </div>

            <div class="calendar-grid">
                <div class="weekdays">
                    { for WEEKDAY_LABELS.iter().map(|day| html! {
                        <div key={*day} class="weekday">{ *day }</div>
                    })}
                </div>
                <div class="days-grid">
                    { for grid.days.iter().map(|day| html! {
                        <DayCell key={day.date.to_string()} day={day.clone()} on_select={on_select.clone()} />
                    })}
                </div>
            </div>

            { modal }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DayCellProps {
    day: CalendarDay,
    on_select: Callback<NaiveDate>,
}

#[function_component(DayCell)]
fn day_cell(props: &DayCellProps) -> Html {
    let day = &props.day;
    let onclick = {
        let on_select = props.on_select.clone();
        let date = day.date;
        Callback::from(move |_| on_select.emit(date))
    };

    let classes = classes!(
        "calendar-day",
        (!day.is_current_month).then_some("other-month"),
        day.is_today.then_some("today"),
        day.has_events().then_some("has-events"),
        day.is_selected.then_some("selected"),
    );

    html! {
        <div class={classes} {onclick}>
            <span class="day-number">{ day.day().to_string() }</span>
            if day.has_events() {
                <div class="event-indicators">
                    { for day.events.iter().take(MAX_PREVIEWS).map(|event| html! {
                        <div key={event.id.clone()} class="event-preview" title={event.title.clone()}>
                            { preview_title(&event.title) }
                        </div>
                    })}
                    if day.hidden_event_count() > 0 {
                        <span class="more-events">{ format!("+{} more", day.hidden_event_count()) }</span>
                    }
                </div>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DayModalProps {
    date: NaiveDate,
    events: Vec<Event>,
    on_close: Callback<MouseEvent>,
}

#[function_component(DayModal)]
fn day_modal(props: &DayModalProps) -> Html {
    html! {
        <div class="event-modal-overlay" onclick={props.on_close.clone()}>
            <div class="event-modal" onclick={Callback::from(|e: MouseEvent| e.stop_propagation())}>
                <div class="modal-header">
                    <h3>{ format!("Events for {}", props.date.format("%A, %B %-d")) }</h3>
                    <button class="close-modal" onclick={props.on_close.clone()}>{ "×" }</button>
                </div>
                <div class="events-list">
                    { for props.events.iter().map(|event| html! {
                        <div key={event.id.clone()} class="event-item">
                            <div class="event-header">
                                <h4 class="event-title">{ &event.title }</h4>
                                <div class="event-time">{ event.time_range_label(&Local) }</div>
                            </div>
                            if !event.description.is_empty() {
                                <p class="event-description">{ &event.description }</p>
                            }
                            if !event.location.is_empty() {
                                <div class="event-location">{ &event.location }</div>
                            }
                            if !event.attendees.is_empty() {
                                <div class="event-attendees">
                                    <span>{ format!("With: {}", event.attendee_summary()) }</span>
                                </div>
                            }
                        </div>
                    })}
                </div>
            </div>
        </div>
    }
}
