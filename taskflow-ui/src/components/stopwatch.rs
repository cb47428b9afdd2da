//! Stopwatch Component
//!
//! Time tracker widget. Starts at 01:24:08 and running; the interval is
//! dropped when paused or unmounted. Reset only zeroes the counter.

use gloo_timers::callback::Interval;
use leptos::*;

use crate::state::dashboard::format_hms;

const START_SECS: u64 = 5048;

#[component]
pub fn Stopwatch() -> impl IntoView {
    let elapsed = create_rw_signal(START_SECS);
    let running = create_rw_signal(false);
    let ticker = store_value(None::<Interval>);

    let start = move || {
        if running.get_untracked() {
            return;
        }
        let interval = Interval::new(1_000, move || elapsed.update(|s| *s += 1));
        ticker.set_value(Some(interval));
        running.set(true);
    };
    let stop = move || {
        ticker.update_value(|t| drop(t.take()));
        running.set(false);
    };

    start();
    on_cleanup(move || ticker.update_value(|t| drop(t.take())));

    let toggle = move |_| {
        if running.get_untracked() {
            stop();
        } else {
            start();
        }
    };
    let reset = move |_| elapsed.set(0);

    view! {
        <div class="flex flex-col items-center space-y-4">
            <div class="text-4xl font-mono font-bold">{move || format_hms(elapsed.get())}</div>
            <div class="flex space-x-3">
                <button on:click=toggle class="px-4 py-2 rounded-full bg-white text-green-900 font-medium">
                    {move || if running.get() { "Pause" } else { "Start" }}
                </button>
                <button on:click=reset class="px-4 py-2 rounded-full bg-red-600 text-white font-medium">
                    "Stop"
                </button>
            </div>
        </div>
    }
}
