use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

#[derive(Properties, PartialEq)]
pub struct StatsCardProps {
    pub title: AttrValue,
    pub value: AttrValue,
    pub change: AttrValue,
    pub trend: Trend,
    pub color: AttrValue,
}

#[function_component(StatsCard)]
pub fn stats_card(props: &StatsCardProps) -> Html {
    let (arrow, direction) = match props.trend {
        Trend::Up => ("↗", "positive"),
        Trend::Down => ("↘", "negative"),
    };

    html! {
        <div class="stats-card">
            <div class="stats-card-header">
                <div class="stats-card-title">{ &props.title }</div>
                <div
                    class="stats-card-icon"
                    style={format!("background-color: {}", props.color)}
                ></div>
            </div>

            <div class="stats-card-value">{ &props.value }</div>

            <div class="stats-card-change">
                <div class={classes!("stats-change", direction)}>
                    <span>{ arrow }</span>
                    <span>{ &props.change }</span>
                </div>
                <span class="stats-period">{ "from last month" }</span>
            </div>
        </div>
    }
}
