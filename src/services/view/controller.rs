use std::sync::mpsc::Receiver;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use log::{debug, info, warn};

use super::scroll_state::{ScrollState, ScrollUpdate};
use crate::models::event::CalendarEvent;
use crate::models::grid::{GridGeometry, ProbeTarget, ScrollPosition};
use crate::models::layout::{
    DayFrame, DayLayout, FrameContent, MonthFrame, MonthPageLayout, RenderFrame,
};
use crate::models::preferences::LayerPreferences;
use crate::models::settings::GridSettings;
use crate::models::view::{ViewMode, ViewToken};
use crate::services::event_source::{EventCache, EventFetcher, EventSource, FetchResult};
use crate::services::gesture::{GesturePhase, GesturePhysicsEngine, PhysicsConfig, PhysicsEvent};
use crate::services::grid::{
    container_offset, to_probe_target, to_scroll, to_scroll_at, visible_window, ProbeResolver,
};
use crate::services::layout::{
    layout_day, layout_month_page, layout_window_minutes, place_all_day, place_timed,
};
use crate::services::month::{MonthGridVirtualizer, PageEvent};
use crate::utils::date::{date_for_day_index, day_index_for};

/// Owns the scroll state of one mounted calendar view and wires gestures,
/// probe, virtualization and layout together.
///
/// Layout passes run only on settle, on mode switch and when the event set
/// is replaced. Everything per-frame reads cached layouts.
pub struct CalendarViewController {
    settings: GridSettings,
    geometry: GridGeometry,
    mode: ViewMode,
    token: ViewToken,
    /// Guards fetch results. Survives mode switches, bumped by teardown.
    mount_token: ViewToken,
    mounted: bool,
    clock: f64,
    scroll: ScrollState,
    physics: GesturePhysicsEngine,
    probe: ProbeResolver,
    pager: MonthGridVirtualizer,
    month_day: i64,
    month_day_of_month: u32,
    cache: EventCache,
    fetcher: EventFetcher,
    day_layout: DayLayout,
    month_layouts: Vec<MonthPageLayout>,
}

impl CalendarViewController {
    /// Mount a Day view with the probe on `start`.
    pub fn new(
        settings: GridSettings,
        viewport_width: f64,
        viewport_height: f64,
        start: NaiveDateTime,
    ) -> Self {
        let geometry = settings.geometry(viewport_width, viewport_height);
        let physics = GesturePhysicsEngine::new(
            PhysicsConfig::from_settings(&settings),
            geometry.cell_width(),
            geometry.cell_height(),
            to_scroll_at(start, settings.epoch, &geometry),
        );
        let position = physics.position();
        let mut probe = ProbeResolver::new(settings.grid.highlight_duration_secs);
        let target = probe.resolve(position, &geometry, 0.0);
        let pager =
            MonthGridVirtualizer::for_day(&settings, target.day_index, geometry.body_width());

        let mut controller = Self {
            geometry,
            mode: ViewMode::Day,
            token: ViewToken::default(),
            mount_token: ViewToken::default(),
            mounted: true,
            clock: 0.0,
            scroll: ScrollState::new(position),
            physics,
            probe,
            pager,
            month_day: target.day_index,
            month_day_of_month: start.day(),
            cache: EventCache::new(),
            fetcher: EventFetcher::new(),
            day_layout: DayLayout::default(),
            month_layouts: Vec::new(),
            settings,
        };
        controller.relayout();
        info!(
            "Mounted Day view at day {} hour {}",
            target.day_index, target.hour
        );
        controller
    }

    pub fn token(&self) -> ViewToken {
        self.token
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Live scroll position.
    pub fn position(&self) -> ScrollPosition {
        self.scroll.position()
    }

    pub fn settled_position(&self) -> ScrollPosition {
        self.scroll.settled()
    }

    pub fn subscribe(&mut self) -> Receiver<ScrollUpdate> {
        self.scroll.subscribe()
    }

    /// The (day, hour) currently probed. Month mode reports the canonical hour.
    pub fn probe_target(&self) -> ProbeTarget {
        match self.mode {
            ViewMode::Day => self
                .probe
                .last()
                .unwrap_or_else(|| to_probe_target(self.scroll.position(), &self.geometry)),
            ViewMode::Month => {
                ProbeTarget::new(self.month_day, self.settings.month.canonical_hour)
            }
        }
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        date_for_day_index(self.probe_target().day_index, self.settings.epoch)
    }

    /// True while a drag or an animation is in progress.
    pub fn is_animating(&self) -> bool {
        match self.mode {
            ViewMode::Day => self.physics.phase() != GesturePhase::Idle,
            ViewMode::Month => !self.pager.is_idle(),
        }
    }

    pub fn events(&self) -> &EventCache {
        &self.cache
    }

    pub fn day_layout(&self) -> &DayLayout {
        &self.day_layout
    }

    pub fn month_layouts(&self) -> &[MonthPageLayout] {
        &self.month_layouts
    }

    pub fn pager(&self) -> &MonthGridVirtualizer {
        &self.pager
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.geometry = self.settings.geometry(width, height);
        self.physics
            .set_cell_size(self.geometry.cell_width(), self.geometry.cell_height());
        self.pager.set_page_width(self.geometry.body_width());
        self.refresh_probe();
        if self.mode == ViewMode::Day {
            self.relayout_day();
        }
    }

    pub fn begin_drag(&mut self, token: ViewToken) {
        if !self.accepts(token, "drag start") {
            return;
        }
        match self.mode {
            ViewMode::Day => {
                self.physics.begin_drag();
            }
            ViewMode::Month => self.pager.begin_drag(),
        }
    }

    /// Apply the cumulative drag translation in pixels.
    pub fn drag_to(&mut self, token: ViewToken, dx: f64, dy: f64) {
        if !self.accepts(token, "drag") {
            return;
        }
        match self.mode {
            ViewMode::Day => {
                if let Some(position) = self.physics.drag_to(dx, dy) {
                    self.handle_physics(vec![PhysicsEvent::Moved(position)]);
                }
            }
            ViewMode::Month => {
                self.pager.drag_to(dx);
            }
        }
    }

    /// End the drag with a release velocity in pixels per second.
    pub fn release(&mut self, token: ViewToken, vx: f64, vy: f64) {
        if !self.accepts(token, "release") {
            return;
        }
        match self.mode {
            ViewMode::Day => {
                let events = self.physics.release(vx, vy);
                self.handle_physics(events);
            }
            ViewMode::Month => {
                let events = self.pager.release(vx);
                self.handle_pages(events);
            }
        }
    }

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.mounted {
            return;
        }
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
        match self.mode {
            ViewMode::Day => {
                let events = self.physics.tick(dt);
                self.handle_physics(events);
            }
            ViewMode::Month => {
                let events = self.pager.tick(dt);
                self.handle_pages(events);
            }
        }
    }

    /// Navigate so the probe lands on `target`.
    pub fn go_to(&mut self, target: ProbeTarget, animated: bool) {
        if !self.mounted {
            return;
        }
        match self.mode {
            ViewMode::Day => {
                let position = to_scroll(target.hour, target.day_index, &self.geometry);
                self.navigate(position, animated);
            }
            ViewMode::Month => self.go_to_month_day(target.day_index, animated),
        }
        self.refresh_probe();
    }

    /// Navigate to a wall-clock moment, to the minute in Day mode.
    pub fn go_to_date(&mut self, datetime: NaiveDateTime, animated: bool) {
        if !self.mounted {
            return;
        }
        match self.mode {
            ViewMode::Day => {
                let position = to_scroll_at(datetime, self.settings.epoch, &self.geometry);
                self.navigate(position, animated);
            }
            ViewMode::Month => {
                let day = day_index_for(datetime.date(), self.settings.epoch);
                self.go_to_month_day(day, animated);
            }
        }
        self.refresh_probe();
    }

    /// Switch between Day and Month, keeping the probed day.
    ///
    /// Returns the new view token; gestures from before the switch are
    /// ignored from here on. Fetches in flight still land in the shared cache.
    pub fn switch_mode(&mut self, mode: ViewMode) -> ViewToken {
        if !self.mounted || mode == self.mode {
            return self.token;
        }
        self.token = self.token.next();
        let canonical_hour = self.settings.month.canonical_hour;

        match mode {
            ViewMode::Month => {
                let day = self.probe_target().day_index;
                self.physics.halt();
                self.month_day = day;
                if let Some(date) = date_for_day_index(day, self.settings.epoch) {
                    self.month_day_of_month = date.day();
                }
                self.pager =
                    MonthGridVirtualizer::for_day(&self.settings, day, self.geometry.body_width());
                self.mode = ViewMode::Month;
                self.probe
                    .observe(ProbeTarget::new(day, canonical_hour), self.clock);
                self.relayout_month();
            }
            ViewMode::Day => {
                self.pager.halt();
                self.mode = ViewMode::Day;
                let position = to_scroll(canonical_hour, self.month_day, &self.geometry);
                let settled = self.physics.jump_to(position);
                self.handle_physics(vec![settled]);
            }
        }

        info!(
            "Switched to {} view (generation {})",
            mode.label(),
            self.token.generation()
        );
        self.token
    }

    /// Replace the cached event set and re-run layout.
    pub fn replace_events(
        &mut self,
        group_id: &str,
        events: Vec<CalendarEvent>,
        preferences: LayerPreferences,
    ) {
        info!("Loaded {} events for group {}", events.len(), group_id);
        self.cache.replace(group_id, events, preferences);
        self.relayout();
    }

    /// Fetch `group_id` from `source` on a worker thread. Results are picked
    /// up by [`poll_fetches`](Self::poll_fetches).
    pub fn request_events(&mut self, source: Arc<dyn EventSource>, group_id: &str) {
        if !self.mounted {
            return;
        }
        self.fetcher.request(source, group_id, self.mount_token);
    }

    /// Apply any finished fetches. Returns how many replaced the cache.
    pub fn poll_fetches(&mut self) -> usize {
        let mut applied = 0;
        for result in self.fetcher.poll() {
            if self.apply_fetch(result) {
                applied += 1;
            }
        }
        applied
    }

    /// Block for the next fetch result and apply it.
    pub fn await_fetch(&mut self) -> bool {
        match self.fetcher.wait() {
            Some(result) => self.apply_fetch(result),
            None => false,
        }
    }

    pub fn pending_fetches(&self) -> usize {
        self.fetcher.in_flight()
    }

    /// Everything needed to draw the current frame.
    pub fn frame(&self) -> RenderFrame {
        let content = if !self.mounted {
            FrameContent::Empty
        } else {
            match self.mode {
                ViewMode::Day => self.day_frame(),
                ViewMode::Month => self.month_frame(),
            }
        };
        RenderFrame {
            mode: self.mode,
            probe_target: self.probe_target(),
            highlight: self.probe.highlight(self.clock),
            content,
        }
    }

    /// Unmount. Later gestures and fetch results are ignored.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.token = self.token.next();
        self.mount_token = self.mount_token.next();
        self.mounted = false;
        self.physics.halt();
        self.pager.halt();
        self.scroll.clear_subscribers();
        self.cache.clear();
        self.day_layout = DayLayout::default();
        self.month_layouts.clear();
        info!("View torn down (generation {})", self.token.generation());
    }

    fn accepts(&self, token: ViewToken, action: &str) -> bool {
        if self.mounted && token == self.token {
            return true;
        }
        debug!(
            "Ignoring {} from view generation {} (current {})",
            action,
            token.generation(),
            self.token.generation()
        );
        false
    }

    fn navigate(&mut self, position: ScrollPosition, animated: bool) {
        let events = if animated {
            self.physics.animate_to(position)
        } else {
            vec![self.physics.jump_to(position)]
        };
        self.handle_physics(events);
    }

    fn go_to_month_day(&mut self, day: i64, animated: bool) {
        let Some(date) = date_for_day_index(day, self.settings.epoch) else {
            warn!("Day index {} is outside the supported date range", day);
            return;
        };
        self.month_day = day;
        self.month_day_of_month = date.day();
        let page = self.pager.page_for_month(date.year(), date.month());
        let events = if animated {
            self.pager.animate_to_page(page)
        } else {
            vec![self.pager.jump_to_page(page)]
        };
        self.handle_pages(events);
    }

    fn handle_physics(&mut self, events: Vec<PhysicsEvent>) {
        for event in events {
            match event {
                PhysicsEvent::Moved(position) => {
                    let update = self.scroll.publish(position, false);
                    self.probe
                        .resolve(update.position, &self.geometry, self.clock);
                }
                PhysicsEvent::Settled(position) => {
                    let update = self.scroll.publish(position, true);
                    self.probe
                        .resolve(update.position, &self.geometry, self.clock);
                    self.relayout_day();
                }
            }
        }
    }

    fn handle_pages(&mut self, events: Vec<PageEvent>) {
        for event in events {
            if let PageEvent::Settled(page) = event {
                if let Some(day) = self.pager.day_on_page(self.month_day_of_month, page) {
                    self.month_day = day;
                }
                self.refresh_probe();
                self.relayout_month();
            }
        }
    }

    fn apply_fetch(&mut self, result: FetchResult) -> bool {
        if !self.mounted || result.token != self.mount_token {
            debug!(
                "Dropping fetch for group {} from mount generation {}",
                result.group_id,
                result.token.generation()
            );
            return false;
        }
        match result.outcome {
            Ok(group) => {
                if group.rejected > 0 {
                    warn!(
                        "{} malformed events of group {} were left out",
                        group.rejected, result.group_id
                    );
                }
                self.replace_events(&result.group_id, group.events, group.preferences);
                true
            }
            Err(err) => {
                warn!("Event fetch for group {} failed: {}", result.group_id, err);
                false
            }
        }
    }

    fn refresh_probe(&mut self) {
        match self.mode {
            ViewMode::Day => {
                self.probe
                    .resolve(self.scroll.position(), &self.geometry, self.clock);
            }
            ViewMode::Month => {
                let target = ProbeTarget::new(self.month_day, self.settings.month.canonical_hour);
                self.probe.observe(target, self.clock);
            }
        }
    }

    fn relayout(&mut self) {
        match self.mode {
            ViewMode::Day => self.relayout_day(),
            ViewMode::Month => self.relayout_month(),
        }
    }

    fn relayout_day(&mut self) {
        let window = visible_window(
            self.scroll.settled(),
            &self.geometry,
            self.settings.grid.buffer_cells,
        );
        if window.is_empty() {
            self.day_layout = DayLayout::default();
            return;
        }
        let minutes = layout_window_minutes(&window, self.settings.layout.margin_days);
        self.day_layout = layout_day(
            self.cache.visible(),
            minutes,
            self.settings.epoch,
            self.settings.layout.expand_lanes,
        );
        debug!(
            "Day layout over minutes {:?}: {} events, {} responsibilities, {} all-day",
            minutes,
            self.day_layout.events.len(),
            self.day_layout.responsibilities.len(),
            self.day_layout.all_day.len()
        );
    }

    fn relayout_month(&mut self) {
        let visible = self.cache.visible();
        let layouts = self
            .pager
            .pages()
            .iter()
            .map(|page| {
                layout_month_page(
                    page,
                    visible.iter().copied(),
                    self.settings.epoch,
                    self.settings.layout.expand_lanes,
                )
            })
            .collect();
        self.month_layouts = layouts;
        debug!("Month layout over {} pages", self.month_layouts.len());
    }

    fn day_frame(&self) -> FrameContent {
        let position = self.scroll.position();
        let window = visible_window(position, &self.geometry, self.settings.grid.buffer_cells);
        if window.is_empty() {
            return FrameContent::Empty;
        }
        FrameContent::Day(DayFrame {
            visible_cells: window.cells().collect(),
            container_offset: container_offset(&window, position, &self.geometry),
            placements: place_timed(&self.day_layout, &window),
            all_day: place_all_day(&self.day_layout, &window),
            window,
        })
    }

    fn month_frame(&self) -> FrameContent {
        let (pages, page_translate) = self.pager.visible_pages();
        let layouts = pages
            .iter()
            .map(|page| {
                self.month_layouts
                    .iter()
                    .find(|layout| layout.page == *page)
                    .cloned()
                    .unwrap_or_else(|| {
                        layout_month_page(
                            page,
                            self.cache.visible(),
                            self.settings.epoch,
                            self.settings.layout.expand_lanes,
                        )
                    })
            })
            .collect();
        FrameContent::Month(MonthFrame {
            pages,
            page_translate,
            layouts,
        })
    }
}
