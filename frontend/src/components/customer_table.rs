use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use connectors::{CustomerClient, CustomerTableController};
use shared::table::{CustomerTable, Phase};
use shared::{Customer, CustomerInput};

use crate::services::clients::customer_client;

type Controller = CustomerTableController<CustomerClient>;

const DELETE_PROMPT: &str = "Are you sure you want to delete this customer?";

/// Editable column of a customer row
#[derive(Clone, Copy, PartialEq)]
enum Column {
    Name,
    Email,
    AppointmentOn,
    AppointmentFor,
    Timing,
}

impl Column {
    const ALL: [Column; 5] = [
        Column::Name,
        Column::Email,
        Column::AppointmentOn,
        Column::AppointmentFor,
        Column::Timing,
    ];

    fn slot(self, input: &mut CustomerInput) -> &mut Option<String> {
        match self {
            Column::Name => &mut input.name,
            Column::Email => &mut input.email,
            Column::AppointmentOn => &mut input.appointment_on,
            Column::AppointmentFor => &mut input.appointment_for,
            Column::Timing => &mut input.timing,
        }
    }

    fn value(self, input: &CustomerInput) -> String {
        let value = match self {
            Column::Name => &input.name,
            Column::Email => &input.email,
            Column::AppointmentOn => &input.appointment_on,
            Column::AppointmentFor => &input.appointment_for,
            Column::Timing => &input.timing,
        };
        value.clone().unwrap_or_default()
    }

    fn input_type(self) -> &'static str {
        match self {
            Column::Email => "email",
            Column::AppointmentOn => "date",
            _ => "text",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Column::Name => "Customer Name *",
            Column::Email => "Email Address *",
            Column::AppointmentOn => "Appointment Date",
            Column::AppointmentFor => "Appointment Purpose",
            Column::Timing => "Timing (e.g., 2:00 PM)",
        }
    }
}

/// Raise and clear the blocking validation prompt, if any
fn show_prompt(controller: &Controller) {
    let prompt = controller.snapshot().prompt().map(str::to_string);
    if let Some(prompt) = prompt {
        gloo::dialogs::alert(&prompt);
        controller.update(|table| table.dismiss_prompt());
    }
}

#[function_component(CustomerTableView)]
pub fn customer_table_view() -> Html {
    let controller: Rc<Controller> = use_memo((), |_| CustomerTableController::new(customer_client()));
    let redraw = use_force_update();

    {
        let controller = controller.clone();
        use_effect_with((), move |_| {
            controller.set_listener(move || redraw.force_update());
            {
                let controller = controller.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    controller.refresh().await;
                });
            }
            move || controller.detach()
        });
    }

    let table = controller.snapshot();
    let busy = table.is_busy() || *table.phase() == Phase::Loading;

    let on_refresh = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.refresh().await;
            });
        })
    };

    let on_open_add = {
        let controller = controller.clone();
        Callback::from(move |_| controller.update(|table| table.open_add_form()))
    };

    let on_cancel_add = {
        let controller = controller.clone();
        Callback::from(move |_| controller.update(|table| table.cancel_add()))
    };

    let on_submit_add = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.submit_new().await;
                show_prompt(&controller);
            });
        })
    };

    let on_search = {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            controller.update(|table| table.set_search(input.value()));
        })
    };

    let on_dismiss = {
        let controller = controller.clone();
        Callback::from(move |_| controller.update(|table| table.dismiss_banner()))
    };

    let draft_input = |column: Column| {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            controller.update(|table| *column.slot(table.draft_mut()) = Some(input.value()));
        })
    };

    let banner = match table.banner() {
        Some(banner) => html! {
            <div class={classes!("error-banner", banner.kind.as_str())}>
                <span>{ &banner.text }</span>
                <button onclick={on_dismiss} class="dismiss-error">{ "×" }</button>
            </div>
        },
        None => html! {},
    };

    let add_form = if *table.phase() == Phase::Adding {
        html! {
            <div class="customer-form">
                <h3>{ "Add New Customer" }</h3>
                <div class="form-grid">
                    { for Column::ALL.iter().map(|column| html! {
                        <input
                            type={column.input_type()}
                            placeholder={column.placeholder()}
                            value={column.value(table.draft())}
                            oninput={draft_input(*column)}
                        />
                    })}
                </div>
                <div class="form-actions">
                    <button onclick={on_cancel_add} class="cancel-btn">{ "Cancel" }</button>
                    <button onclick={on_submit_add} disabled={busy} class="save-btn">
                        { if table.is_busy() { "Adding..." } else { "Add Customer" } }
                    </button>
                </div>
            </div>
        }
    } else {
        html! {}
    };

    html! {
        <div class="customer-crm">
            <div class="crm-header">
                <div class="header-left">
                    <div>
                        <h2>{ "Customer CRM" }</h2>
                        <p>{ "Manage your customer appointments from Airtable" }</p>
                    </div>
                </div>
                <div class="header-actions">
                    <button onclick={on_refresh} disabled={busy} class="refresh-btn" title="Refresh from Airtable">
                        { "⟳" }
                    </button>
                    <button onclick={on_open_add.clone()} disabled={busy} class="add-customer-btn">
                        { "+ Add Customer" }
                    </button>
                </div>
            </div>

            { banner }

            <div class="search-section">
                <div class="search-box">
                    <input
                        type="text"
                        placeholder="Search customers by name, email, or appointment type..."
                        value={table.search().to_string()}
                        oninput={on_search}
                    />
                </div>
            </div>

            { add_form }

            <div class="customers-table">
                <div class="table-header">
                    <div class="header-cell">{ "Name" }</div>
                    <div class="header-cell">{ "Email" }</div>
                    <div class="header-cell">{ "Appointment Date" }</div>
                    <div class="header-cell">{ "Purpose" }</div>
                    <div class="header-cell">{ "Time" }</div>
                    <div class="header-cell">{ "Actions" }</div>
                </div>
                <div class="table-body">
                    { table_body(&table, &controller, on_open_add) }
                </div>
            </div>

            <div class="table-footer">
                <p>
                    { table.summary() }
                    if !table.search().is_empty() {
                        <span>{ format!(" matching \"{}\"", table.search()) }</span>
                    }
                </p>
            </div>
        </div>
    }
}

fn table_body(table: &CustomerTable, controller: &Rc<Controller>, on_open_add: Callback<MouseEvent>) -> Html {
    if *table.phase() == Phase::Loading && table.customers().is_empty() {
        return html! {
            <div class="loading-row">{ "Loading customers from Airtable..." }</div>
        };
    }

    let visible = table.visible();
    if visible.is_empty() {
        let searching = !table.search().is_empty();
        return html! {
            <div class="empty-state">
                <h3>{ "No customers found" }</h3>
                <p>
                    { if searching {
                        "No customers match your search criteria."
                    } else {
                        "No customers in your Airtable base yet."
                    } }
                </p>
                if !searching {
                    <button onclick={on_open_add} class="add-first-btn">
                        { "Add Your First Customer" }
                    </button>
                }
            </div>
        };
    }

    html! {
        <>
        { for visible.into_iter().map(|customer| {
            if table.is_editing(&customer.id) {
                html! { <EditRow key={customer.id.clone()} controller={controller.clone()} buffer={table.edit_buffer().clone()} busy={table.is_busy()} /> }
            } else {
                html! { <ViewRow key={customer.id.clone()} controller={controller.clone()} customer={customer.clone()} /> }
            }
        })}
        </>
    }
}

#[derive(Properties)]
struct ViewRowProps {
    controller: Rc<Controller>,
    customer: Customer,
}

impl PartialEq for ViewRowProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller) && self.customer == other.customer
    }
}

#[function_component(ViewRow)]
fn view_row(props: &ViewRowProps) -> Html {
    let customer = &props.customer;

    let on_edit = {
        let controller = props.controller.clone();
        let id = customer.id.clone();
        Callback::from(move |_| {
            controller.update(|table| table.start_edit(&id));
        })
    };

    let on_delete = {
        let controller = props.controller.clone();
        let id = customer.id.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            let id = id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller
                    .delete(&id, || gloo::dialogs::confirm(DELETE_PROMPT))
                    .await;
            });
        })
    };

    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    html! {
        <div class="table-row">
            <div class="cell"><div class="customer-name">{ &customer.name }</div></div>
            <div class="cell"><div class="customer-email">{ &customer.email }</div></div>
            <div class="cell"><div class="appointment-date">{ customer.appointment_label() }</div></div>
            <div class="cell"><div class="appointment-purpose">{ or_dash(&customer.appointment_for) }</div></div>
            <div class="cell"><div class="appointment-time">{ or_dash(&customer.timing) }</div></div>
            <div class="cell actions">
                <button onclick={on_edit} class="edit-btn" title="Edit customer">{ "Edit" }</button>
                <button onclick={on_delete} class="delete-btn" title="Delete customer">{ "Delete" }</button>
            </div>
        </div>
    }
}

#[derive(Properties)]
struct EditRowProps {
    controller: Rc<Controller>,
    buffer: CustomerInput,
    busy: bool,
}

impl PartialEq for EditRowProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
            && self.busy == other.busy
            && self.buffer == other.buffer
    }
}

#[function_component(EditRow)]
fn edit_row(props: &EditRowProps) -> Html {
    let controller = &props.controller;

    let edit_input = |column: Column| {
        let controller = controller.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            controller.update(|table| *column.slot(table.edit_buffer_mut()) = Some(input.value()));
        })
    };

    let on_save = {
        let controller = controller.clone();
        Callback::from(move |_| {
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                controller.save_edit().await;
            });
        })
    };

    let on_cancel = {
        let controller = controller.clone();
        Callback::from(move |_| controller.update(|table| table.cancel_edit()))
    };

    html! {
        <div class="table-row editing">
            { for Column::ALL.iter().map(|column| html! {
                <div class="cell">
                    <input
                        type={column.input_type()}
                        value={column.value(&props.buffer)}
                        oninput={edit_input(*column)}
                    />
                </div>
            })}
            <div class="cell actions">
                <button onclick={on_save} disabled={props.busy} class="save-btn">{ "Save" }</button>
                <button onclick={on_cancel} class="cancel-btn">{ "Cancel" }</button>
            </div>
        </div>
    }
}
