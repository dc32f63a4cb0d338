use yew::prelude::*;

/// Monthly revenue in thousands of dollars
pub const MONTHLY_REVENUE: [(&str, u32); 12] = [
    ("Jan", 65),
    ("Feb", 45),
    ("Mar", 78),
    ("Apr", 52),
    ("May", 90),
    ("Jun", 67),
    ("Jul", 85),
    ("Aug", 73),
    ("Sep", 92),
    ("Oct", 88),
    ("Nov", 95),
    ("Dec", 100),
];

#[function_component(Chart)]
pub fn chart() -> Html {
    let peak = MONTHLY_REVENUE
        .iter()
        .map(|(_, value)| *value)
        .max()
        .unwrap_or(1)
        .max(1);

    html! {
        <div class="chart-container">
            <div class="chart-header">
                <div>
                    <h3 class="chart-title">{ "Revenue Analytics" }</h3>
                    <p class="chart-subtitle">{ "Monthly performance overview" }</p>
                </div>
                <div class="chart-actions">
                    <button class="chart-btn">{ "View Details" }</button>
                </div>
            </div>

            <div class="chart-metrics">
                <div class="metric">
                    <span class="metric-label">{ "Total Revenue" }</span>
                    <span class="metric-value">{ "$547,890" }</span>
                </div>
                <div class="metric">
                    <span class="metric-label">{ "Growth" }</span>
                    <span class="metric-value positive">{ "+23.5%" }</span>
                </div>
                <div class="metric">
                    <span class="metric-label">{ "Target" }</span>
                    <span class="metric-value">{ "$600,000" }</span>
                </div>
            </div>

            <div class="chart-wrapper">
                <div class="chart">
                    { for MONTHLY_REVENUE.iter().enumerate().map(|(index, (month, value))| {
                        let style = format!(
                            "height: {}%; animation-delay: {:.1}s",
                            value * 100 / peak,
                            index as f32 * 0.1
                        );
                        html! {
                            <div key={*month} class="chart-bar-container">
                                <div class="chart-bar" {style}>
                                    <div class="bar-value">{ format!("${}k", value) }</div>
                                </div>
                                <div class="chart-label">{ *month }</div>
                            </div>
                        }
                    })}
                </div>
            </div>
        </div>
    }
}
