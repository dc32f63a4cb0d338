use yew::prelude::*;

use crate::components::chart::{Chart, MONTHLY_REVENUE};
use crate::components::stats_card::{StatsCard, Trend};

/// Percentage change between the last two months of the series
fn latest_change() -> (String, Trend) {
    let [.., (_, previous), (_, latest)] = MONTHLY_REVENUE;
    let change = (f64::from(latest) - f64::from(previous)) / f64::from(previous.max(1)) * 100.0;
    let trend = if change >= 0.0 { Trend::Up } else { Trend::Down };
    (format!("{:+.1}%", change), trend)
}

#[function_component(Analytics)]
pub fn analytics() -> Html {
    let total: u32 = MONTHLY_REVENUE.iter().map(|(_, value)| value).sum();
    let average = total / MONTHLY_REVENUE.len() as u32;
    let (change, trend) = latest_change();

    html! {
        <div class="container">
            <h2>{ "Analytics" }</h2>
            <div class="stats-grid">
                <StatsCard
                    title="Total Revenue"
                    value="$547,890"
                    change="+23.5%"
                    trend={Trend::Up}
                    color="#3B82F6"
                />
                <StatsCard
                    title="Monthly Average"
                    value={format!("${}k", average)}
                    change={change}
                    trend={trend}
                    color="#10B981"
                />
            </div>
            <Chart />
        </div>
    }
}
