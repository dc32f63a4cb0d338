use yew::prelude::*;

struct QuickAction {
    title: &'static str,
    description: &'static str,
    color: &'static str,
}

const ACTIONS: [QuickAction; 4] = [
    QuickAction {
        title: "Add User",
        description: "Create new user account",
        color: "#3B82F6",
    },
    QuickAction {
        title: "New Report",
        description: "Generate analytics report",
        color: "#10B981",
    },
    QuickAction {
        title: "Send Invoice",
        description: "Create and send invoice",
        color: "#F59E0B",
    },
    QuickAction {
        title: "Export Data",
        description: "Download CSV export",
        color: "#8B5CF6",
    },
];

#[function_component(QuickActions)]
pub fn quick_actions() -> Html {
    html! {
        <div class="quick-actions">
            <div class="quick-actions-header">
                <div class="quick-actions-title-section">
                    <h3 class="quick-actions-title">{ "Quick Actions" }</h3>
                </div>
            </div>

            <div class="actions-grid">
                { for ACTIONS.iter().map(|action| {
                    let title = action.title;
                    let onclick = Callback::from(move |_| {
                        tracing::info!("{} clicked", title);
                    });
                    html! {
                        <button key={action.title} class="action-card" {onclick}>
                            <div
                                class="action-card-icon"
                                style={format!("background-color: {}", action.color)}
                            ></div>
                            <div class="action-card-content">
                                <div class="action-card-title">{ action.title }</div>
                                <div class="action-card-description">{ action.description }</div>
                            </div>
                        </button>
                    }
                })}
            </div>

            <button class="create-custom-action">{ "+ Create Custom Action" }</button>
        </div>
    }
}
