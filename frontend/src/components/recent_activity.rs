use yew::prelude::*;

struct Activity {
    title: &'static str,
    description: &'static str,
    time: &'static str,
    color: &'static str,
}

const ACTIVITIES: [Activity; 5] = [
    Activity {
        title: "New user registered",
        description: "John Doe joined the platform",
        time: "2 minutes ago",
        color: "#3B82F6",
    },
    Activity {
        title: "New order received",
        description: "Order #1234 for $299.99",
        time: "5 minutes ago",
        color: "#10B981",
    },
    Activity {
        title: "Payment processed",
        description: "Invoice #INV-001 paid",
        time: "12 minutes ago",
        color: "#F59E0B",
    },
    Activity {
        title: "Profile updated",
        description: "Sarah Smith updated profile",
        time: "1 hour ago",
        color: "#8B5CF6",
    },
    Activity {
        title: "Order shipped",
        description: "Order #1230 shipped successfully",
        time: "2 hours ago",
        color: "#06B6D4",
    },
];

#[function_component(RecentActivity)]
pub fn recent_activity() -> Html {
    html! {
        <div class="recent-activity">
            <div class="activity-header">
                <div class="activity-title-section">
                    <h3 class="activity-title">{ "Recent Activity" }</h3>
                </div>
                <button class="view-all-btn">{ "View All" }</button>
            </div>

            <div class="activity-list">
                { for ACTIVITIES.iter().enumerate().map(|(index, activity)| html! {
                    <div key={index} class="activity-item">
                        <div
                            class="activity-item-icon"
                            style={format!("background-color: {}", activity.color)}
                        ></div>
                        <div class="activity-item-content">
                            <div class="activity-item-title">{ activity.title }</div>
                            <div class="activity-item-description">{ activity.description }</div>
                            <div class="activity-item-time">{ activity.time }</div>
                        </div>
                    </div>
                })}
            </div>
        </div>
    }
}
