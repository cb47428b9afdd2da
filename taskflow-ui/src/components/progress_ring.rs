//! Progress Ring Component
//!
//! Half-circle gauge of the completion percentage.

use leptos::*;

const RADIUS: f64 = 80.0;

/// Stroke offset that leaves `percent` of the half circle drawn
fn dash_offset(percent: f64) -> f64 {
    let arc = std::f64::consts::PI * RADIUS;
    arc * (1.0 - percent.clamp(0.0, 100.0) / 100.0)
}

fn percent_label(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}%", percent as i64)
    } else {
        format!("{:.1}%", percent)
    }
}

#[component]
pub fn ProgressRing(#[prop(into)] percent: Signal<f64>) -> impl IntoView {
    let arc = std::f64::consts::PI * RADIUS;

    view! {
        <div class="flex flex-col items-center">
            <svg viewBox="0 0 200 110" class="w-48">
                <path d="M 20 100 A 80 80 0 0 1 180 100" fill="none" stroke="#e5e7eb" stroke-width="18" />
                <path
                    d="M 20 100 A 80 80 0 0 1 180 100"
                    fill="none"
                    stroke="#166534"
                    stroke-width="18"
                    stroke-dasharray=arc.to_string()
                    stroke-dashoffset=move || dash_offset(percent.get()).to_string()
                />
            </svg>
            <div class="text-3xl font-bold -mt-8">{move || percent_label(percent.get())}</div>
            <div class="text-sm text-gray-500 mt-1">"Project Ended"</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_offset_bounds() {
        assert_eq!(dash_offset(100.0), 0.0);
        assert_eq!(dash_offset(150.0), 0.0);
        assert!(dash_offset(0.0) > dash_offset(41.0));
        assert_eq!(percent_label(41.0), "41%");
    }
}
