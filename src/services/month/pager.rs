use chrono::{Datelike, NaiveDate};
use log::debug;

use crate::models::grid::safe_extent;
use crate::models::month::MonthPage;
use crate::models::settings::{GridSettings, SnapSettings, SpringSettings, MAX_WINDOW_RADIUS};
use crate::services::gesture::axis::AxisDrag;
use crate::services::gesture::{snap_target, FixedStep, Spring};
use crate::utils::date::{
    add_months, date_for_day_index, day_index_for, days_in_month, months_between,
};

/// Output of the pager. `Settled` carries the integer page offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Moved(f64),
    Settled(i64),
}

#[derive(Debug, Clone)]
enum PageMotion {
    Idle,
    Dragging { axis: AxisDrag, origin: f64 },
    Settling { spring: Spring, steps: u32 },
}

/// Horizontal paging over whole months.
///
/// Pages are indexed by month offset from the anchor month. Only the pages
/// within `window_radius` of the settled page are materialized, and only on
/// settle.
#[derive(Debug, Clone)]
pub struct MonthGridVirtualizer {
    anchor: (i32, u32),
    epoch: NaiveDate,
    first_day_of_week: u8,
    window_radius: u32,
    page_width: f64,
    snap: SnapSettings,
    spring: SpringSettings,
    max_settle_steps: u32,
    clock: FixedStep,
    offset: f64,
    settled_page: i64,
    motion: PageMotion,
    pages: Vec<MonthPage>,
}

impl MonthGridVirtualizer {
    pub fn new(settings: &GridSettings, anchor: (i32, u32), page_width: f64) -> Self {
        let mut pager = Self {
            anchor,
            epoch: settings.epoch,
            first_day_of_week: settings.month.first_day_of_week,
            window_radius: settings.month.window_radius.min(MAX_WINDOW_RADIUS),
            page_width: safe_extent(page_width),
            snap: settings.snap.clone(),
            spring: settings.spring.clone(),
            max_settle_steps: settings.physics.max_settle_steps,
            clock: FixedStep::new(&settings.physics),
            offset: 0.0,
            settled_page: 0,
            motion: PageMotion::Idle,
            pages: Vec::new(),
        };
        pager.materialize();
        pager
    }

    /// Pager anchored on the month containing `day_index`.
    pub fn for_day(settings: &GridSettings, day_index: i64, page_width: f64) -> Self {
        let date = date_for_day_index(day_index, settings.epoch).unwrap_or(settings.epoch);
        Self::new(settings, (date.year(), date.month()), page_width)
    }

    pub fn set_page_width(&mut self, page_width: f64) {
        self.page_width = safe_extent(page_width);
    }

    pub fn anchor(&self) -> (i32, u32) {
        self.anchor
    }

    /// Live float page offset.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn settled_page(&self) -> i64 {
        self.settled_page
    }

    /// `(year, month)` of the settled page.
    pub fn settled_month(&self) -> (i32, u32) {
        add_months(self.anchor.0, self.anchor.1, self.settled_page)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.motion, PageMotion::Idle)
    }

    /// The materialized window, in page order.
    pub fn pages(&self) -> &[MonthPage] {
        &self.pages
    }

    /// Pages intersecting the viewport and the translation of the first one,
    /// in page widths.
    pub fn visible_pages(&self) -> (Vec<MonthPage>, f64) {
        let first = self.offset.floor();
        let translate = first - self.offset;
        let first = first as i64;
        let last = if translate < 0.0 { first + 1 } else { first };
        let pages = (first..=last).filter_map(|offset| self.page(offset)).collect();
        (pages, translate)
    }

    /// Page at `offset`, reusing the materialized window when possible.
    pub fn page(&self, offset: i64) -> Option<MonthPage> {
        self.pages
            .iter()
            .find(|page| page.page_offset == offset)
            .copied()
            .or_else(|| MonthPage::new(self.anchor, offset, self.first_day_of_week, self.epoch))
    }

    pub fn begin_drag(&mut self) {
        if matches!(self.motion, PageMotion::Settling { .. }) {
            debug!("Month drag interrupted settle at page offset {:.3}", self.offset);
        }
        self.clock.reset();
        self.motion = PageMotion::Dragging {
            axis: AxisDrag::new(self.offset, self.page_width),
            origin: self.offset,
        };
    }

    /// Apply cumulative horizontal translation in pixels.
    pub fn drag_to(&mut self, dx: f64) -> Option<f64> {
        let PageMotion::Dragging { axis, .. } = &self.motion else {
            return None;
        };
        if dx.is_finite() {
            self.offset = axis.position(dx);
        }
        Some(self.offset)
    }

    /// Release with a horizontal velocity in pixels per second.
    pub fn release(&mut self, vx: f64) -> Vec<PageEvent> {
        let PageMotion::Dragging { origin, .. } = &self.motion else {
            return Vec::new();
        };
        let velocity = -vx / self.page_width;
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let target = snap_target(self.offset, *origin, velocity, &self.snap);
        let spring = Spring::new(self.offset, velocity, target, self.spring.clone());
        self.start_settle(spring)
    }

    pub fn tick(&mut self, dt: f64) -> Vec<PageEvent> {
        let PageMotion::Settling { spring, steps } = &mut self.motion else {
            return Vec::new();
        };
        let owed = self.clock.advance(dt);
        let h = self.clock.step_secs();

        let mut moved = false;
        for _ in 0..owed {
            if spring.is_at_rest() {
                break;
            }
            spring.step(h);
            *steps += 1;
            if *steps >= self.max_settle_steps {
                spring.snap_to_target();
            }
            moved = true;
        }
        self.offset = spring.position();

        let mut events = Vec::new();
        if moved {
            events.push(PageEvent::Moved(self.offset));
        }
        if spring.is_at_rest() {
            let target = spring.target();
            events.push(self.settle_on(target));
        }
        events
    }

    /// Settle on `page` immediately.
    pub fn jump_to_page(&mut self, page: i64) -> PageEvent {
        self.settle_on(page as f64)
    }

    /// Spring from the live offset to `page`.
    pub fn animate_to_page(&mut self, page: i64) -> Vec<PageEvent> {
        let spring = Spring::new(self.offset, 0.0, page as f64, self.spring.clone());
        self.start_settle(spring)
    }

    /// Page offset of `(year, month)` relative to the anchor.
    pub fn page_for_month(&self, year: i32, month: u32) -> i64 {
        months_between(self.anchor.0, self.anchor.1, year, month)
    }

    /// Carry `day_index` onto the month at `page`, keeping its day of month
    /// and clamping to that month's length.
    pub fn retarget_day(&self, day_index: i64, page: i64) -> Option<i64> {
        let date = date_for_day_index(day_index, self.epoch)?;
        self.day_on_page(date.day(), page)
    }

    /// Day index of `day_of_month` in the month at `page`, clamped to that
    /// month's length.
    pub fn day_on_page(&self, day_of_month: u32, page: i64) -> Option<i64> {
        let (year, month) = add_months(self.anchor.0, self.anchor.1, page);
        let day = day_of_month.clamp(1, days_in_month(year, month));
        let target = NaiveDate::from_ymd_opt(year, month, day)?;
        Some(day_index_for(target, self.epoch))
    }

    /// Stop any drag or animation where it is, without settling.
    pub fn halt(&mut self) {
        self.motion = PageMotion::Idle;
        self.clock.reset();
    }

    fn start_settle(&mut self, spring: Spring) -> Vec<PageEvent> {
        self.clock.reset();
        if spring.is_at_rest() {
            return vec![self.settle_on(spring.target())];
        }
        self.motion = PageMotion::Settling { spring, steps: 0 };
        Vec::new()
    }

    fn settle_on(&mut self, target: f64) -> PageEvent {
        let page = if target.is_finite() {
            target.round() as i64
        } else {
            self.settled_page
        };
        self.offset = page as f64;
        self.motion = PageMotion::Idle;
        self.clock.reset();
        if page != self.settled_page || self.pages.is_empty() {
            self.settled_page = page;
            self.materialize();
        }
        debug!(
            "Month pager settled on page {} ({:?})",
            page,
            self.settled_month()
        );
        PageEvent::Settled(page)
    }

    fn materialize(&mut self) {
        let radius = i64::from(self.window_radius);
        self.pages = (self.settled_page - radius..=self.settled_page + radius)
            .filter_map(|offset| {
                MonthPage::new(self.anchor, offset, self.first_day_of_week, self.epoch)
            })
            .collect();
    }
}
