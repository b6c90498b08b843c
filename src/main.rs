// Family Calendar
// Headless driver: mounts a view, replays a gesture and prints render frames

use std::env;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;

use family_calendar::models::layout::{FrameContent, RenderFrame};
use family_calendar::models::view::ViewMode;
use family_calendar::services::event_source::JsonEventSource;
use family_calendar::services::settings::SettingsService;
use family_calendar::services::view::CalendarViewController;

const VIEWPORT: (f64, f64) = (1200.0, 800.0);
const FRAME_SECS: f64 = 1.0 / 60.0;
const MAX_FRAMES: usize = 10_000;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Family Calendar grid demo");

    let mut args = env::args().skip(1);
    let events_path = args.next();
    let group_id = args.next().unwrap_or_else(|| "family".to_string());

    let settings_service = SettingsService::from_project_dirs();
    let settings = settings_service.load_or_default();

    let now = Local::now().naive_local();
    let mut view = CalendarViewController::new(settings, VIEWPORT.0, VIEWPORT.1, now);

    if let Some(path) = events_path {
        view.request_events(Arc::new(JsonEventSource::new(&path)), &group_id);
        if !view.await_fetch() {
            log::warn!("No events loaded from {}", path);
        }
    }

    // Flick up and to the left: later hours, later days.
    let token = view.token();
    view.begin_drag(token);
    for step in 1..=10 {
        let t = f64::from(step);
        view.drag_to(token, -18.0 * t, -9.6 * t);
        view.tick(FRAME_SECS);
    }
    view.release(token, -900.0, -300.0);
    run_until_settled(&mut view);
    print_frame("day", &view.frame())?;

    view.switch_mode(ViewMode::Month);
    print_frame("month", &view.frame())?;

    view.teardown();
    Ok(())
}

fn run_until_settled(view: &mut CalendarViewController) {
    for _ in 0..MAX_FRAMES {
        if !view.is_animating() {
            return;
        }
        view.tick(FRAME_SECS);
    }
    log::warn!("View still animating after {} frames", MAX_FRAMES);
}

fn print_frame(label: &str, frame: &RenderFrame) -> Result<()> {
    let summary = match &frame.content {
        FrameContent::Day(day) => format!(
            "{} cells, {} blocks, {} all-day bars",
            day.visible_cells.len(),
            day.placements.len(),
            day.all_day.len()
        ),
        FrameContent::Month(month) => format!("{} visible pages", month.pages.len()),
        FrameContent::Empty => "empty".to_string(),
    };
    log::info!(
        "{} frame: probe day {} hour {}, {}",
        label,
        frame.probe_target.day_index,
        frame.probe_target.hour,
        summary
    );

    let json = serde_json::to_string_pretty(frame).context("Failed to serialize render frame")?;
    println!("{}", json);
    Ok(())
}
