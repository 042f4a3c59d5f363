//! Campaign event sequencing.
//!
//! A rule-driven pass over the campaign timeline: media-production events
//! are packed into daily business-hour bounds with a rolling cursor, then
//! the launch milestone, the closing date, and the recurring open-home
//! cadence are derived from them. Events are emitted in rule order, which
//! is not globally chronological (fixed-hour shoots land later in the day
//! than the cursor events emitted after them).

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use log::debug;

use crate::api::Event;
use crate::config::ScheduleConfig;
use crate::models::marketing::CampaignPlan;
use crate::models::time::{
    add_business_days, next_monday_to_thursday, next_weekday, resolve_local,
    shift_days_clock_preserved, weekday_in_same_week,
};
use crate::services::selection::ResolvedServices;

pub const NOTIFY_BUYERS_SUMMARY: &str = "Notify off-market buyers";
pub const LAUNCH_MEETING_SUMMARY: &str = "Meeting: Launch to Market";
pub const LAUNCH_SUMMARY: &str = "Launch to Market";
pub const MIDWEEK_OPEN_HOME_SUMMARY: &str = "Mid-week open home";
pub const MID_CAMPAIGN_MEETING_SUMMARY: &str = "Mid-campaign meeting";
pub const OPEN_HOME_SUMMARY: &str = "Open home";
pub const PRE_CLOSING_MEETING_SUMMARY: &str = "Meeting: Pre Closing Date";
pub const RESERVE_MEETING_SUMMARY: &str = "Reserve Meeting";
pub const CLOSING_SUMMARY: &str = "Closing Date";
pub const AUCTION_SUMMARY: &str = "Auction Date";

/// Fixed wall-clock hours for events that do not follow the rolling cursor.
const SUNSET_HOUR: f64 = 18.0;
const FLOOR_PLAN_HOUR: f64 = 16.0;
const MEETING_HOUR: f64 = 10.0;
const LAUNCH_HOUR: f64 = 11.0;
const OPEN_HOME_HOUR: f64 = 10.0;
const MIDWEEK_OPEN_HOME_HOUR: f64 = 18.0;
const MID_CAMPAIGN_MEETING_HOUR: f64 = 18.5;
const PRE_CLOSING_HOUR: f64 = 14.0;
const CLOSING_HOUR: f64 = 12.0;
const AUCTION_HOUR: f64 = 10.5;

/// Rolling placement state threaded through media-event scheduling.
///
/// `current_hour` is a floating hour-of-day cursor that fills the day as
/// cursor-driven events are placed; `last_media_date` remembers the day of
/// the most recent photography or video shoot and anchors the
/// launch-to-market meeting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulingCursor {
    pub current_date: NaiveDate,
    pub current_hour: f64,
    pub last_media_date: Option<NaiveDate>,
}

/// Builds the event list for one campaign, in rule order.
pub struct CampaignSequencer {
    timezone: Tz,
    open_hour: f64,
    close_hour: f64,
    cursor: SchedulingCursor,
    events: Vec<Event>,
}

impl CampaignSequencer {
    pub fn new(config: &ScheduleConfig, start_date: NaiveDate) -> Self {
        Self {
            timezone: config.timezone,
            open_hour: config.open_hour,
            close_hour: config.close_hour,
            cursor: SchedulingCursor {
                current_date: start_date,
                current_hour: config.open_hour,
                last_media_date: None,
            },
            events: Vec::new(),
        }
    }

    pub fn cursor(&self) -> &SchedulingCursor {
        &self.cursor
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Place an event inside the daily business-hour bounds.
    ///
    /// Advances `current_date` by `gap_days` and snaps it to the next
    /// weekday. If the rolling cursor cannot fit the duration before the
    /// close of business the cursor resets to the opening hour and the date
    /// advances one calendar day; that rollover does not re-snap to a
    /// weekday, so it can land on a weekend.
    ///
    /// A `fixed_hour` event is pinned to that hour and leaves the cursor
    /// untouched; otherwise the event starts at the cursor and consumes
    /// its duration.
    fn place_in_bounds(
        &mut self,
        summary: &str,
        gap_days: i64,
        duration_hours: f64,
        fixed_hour: Option<f64>,
    ) {
        self.cursor.current_date =
            next_weekday(self.cursor.current_date + Duration::days(gap_days));

        if self.cursor.current_hour + duration_hours > self.close_hour {
            self.cursor.current_hour = self.open_hour;
            self.cursor.current_date += Duration::days(1);
        }

        let start_hour = fixed_hour.unwrap_or(self.cursor.current_hour);
        self.push_timed(summary, self.cursor.current_date, start_hour, duration_hours);

        if summary.contains("Photography") || summary.contains("Video") {
            self.cursor.last_media_date = Some(self.cursor.current_date);
        }
        if fixed_hour.is_none() {
            self.cursor.current_hour += duration_hours;
        }
    }

    fn push_timed(&mut self, summary: &str, date: NaiveDate, start_hour: f64, duration_hours: f64) {
        let start = resolve_local(self.timezone, date, start_hour);
        let end = start + Duration::minutes((duration_hours * 60.0).round() as i64);
        self.events
            .push(Event::timed(summary, start.fixed_offset(), end.fixed_offset()));
    }

    fn push_milestone(&mut self, summary: &str, start: DateTime<Tz>) {
        self.events.push(Event::milestone(summary, start.fixed_offset()));
    }

    /// Place the selected media shoots (steps are in rule order, not
    /// chronological order within the day).
    fn place_media(&mut self, plan: &CampaignPlan, services: &ResolvedServices) {
        // Dusk and drone shoots happen at the sunset hour, combined into a
        // single visit when both are wanted.
        match (&services.dusk, &services.drone) {
            (Some(dusk), Some(drone)) => {
                let combined = dusk.duration_hours + drone.duration_hours;
                let summary = format!("{} and {}", dusk.name, drone.name);
                self.place_in_bounds(&summary, 0, combined, Some(SUNSET_HOUR));
            }
            (Some(dusk), None) => {
                self.place_in_bounds(&dusk.name, 0, dusk.duration_hours, Some(SUNSET_HOUR));
            }
            (None, Some(drone)) => {
                self.place_in_bounds(&drone.name, 0, drone.duration_hours, Some(SUNSET_HOUR));
            }
            (None, None) => {}
        }

        // Photography and video merge into one shoot unless the styling
        // preference calls for separate events.
        match (&services.photography, &services.video) {
            (Some(photo), Some(video)) if !plan.prefers_separate_media() => {
                let combined = photo.duration_hours + video.duration_hours;
                let summary = format!("{} and {}", photo.name, video.name);
                self.place_in_bounds(&summary, 0, combined, None);
            }
            (photo, video) => {
                if let Some(photo) = photo {
                    self.place_in_bounds(&photo.name, 0, photo.duration_hours, None);
                }
                if let Some(video) = video {
                    self.place_in_bounds(&video.name, 0, video.duration_hours, None);
                }
            }
        }

        if let Some(floor_plan) = &services.floor_plan {
            self.place_in_bounds(
                &floor_plan.name,
                0,
                floor_plan.duration_hours,
                Some(FLOOR_PLAN_HOUR),
            );
        }
    }

    /// Date of the launch-to-market meeting: three business days after the
    /// last media shoot, or the day after the cursor when no media was
    /// placed.
    fn launch_meeting_date(&self) -> NaiveDate {
        match self.cursor.last_media_date {
            Some(media_date) => add_business_days(media_date, 3),
            None => next_weekday(self.cursor.current_date + Duration::days(1)),
        }
    }

    /// Weekly cadence from launch until closing: Saturday open homes, and
    /// once the first open home exists, mid-week open homes on Wednesdays
    /// plus a single mid-campaign meeting on the first of those Wednesdays.
    ///
    /// Each iteration takes the Wednesday and Saturday of the cursor's own
    /// week. For a Thursday cursor the week's Wednesday is the day before,
    /// which the first-open-home gate keeps out of the opening week.
    fn place_recurring(&mut self, launch_date: NaiveDate, closing_date: NaiveDate) {
        let mut week = launch_date;
        let mut first_open_home_scheduled = false;
        let mut mid_campaign_meeting_scheduled = false;

        while week < closing_date {
            let midweek = weekday_in_same_week(week, Weekday::Wed);
            if first_open_home_scheduled && midweek < closing_date {
                self.push_timed(MIDWEEK_OPEN_HOME_SUMMARY, midweek, MIDWEEK_OPEN_HOME_HOUR, 0.5);
                if !mid_campaign_meeting_scheduled {
                    self.push_timed(
                        MID_CAMPAIGN_MEETING_SUMMARY,
                        midweek,
                        MID_CAMPAIGN_MEETING_HOUR,
                        0.5,
                    );
                    mid_campaign_meeting_scheduled = true;
                }
            }

            let open_home = weekday_in_same_week(week, Weekday::Sat);
            if open_home > launch_date && open_home <= closing_date {
                self.push_timed(OPEN_HOME_SUMMARY, open_home, OPEN_HOME_HOUR, 0.5);
                first_open_home_scheduled = true;
            }

            week += Duration::days(7);
        }
    }

    /// Pre-closing meeting plus the terminal event on the closing date.
    fn place_closing(&mut self, plan: &CampaignPlan, closing_date: NaiveDate) {
        let meeting_summary = if plan.sale_process.is_auction() {
            RESERVE_MEETING_SUMMARY
        } else {
            PRE_CLOSING_MEETING_SUMMARY
        };
        self.push_timed(
            meeting_summary,
            pre_closing_date(closing_date),
            PRE_CLOSING_HOUR,
            1.0,
        );

        if plan.sale_process.is_auction() {
            self.push_timed(AUCTION_SUMMARY, closing_date, AUCTION_HOUR, 1.0);
        } else {
            let start = resolve_local(self.timezone, closing_date, CLOSING_HOUR);
            self.push_milestone(CLOSING_SUMMARY, start);
        }
    }
}

/// When marketing preparation begins: `now` shifted by the lead time,
/// keeping the wall-clock time of day.
pub fn marketing_start(
    config: &ScheduleConfig,
    plan: &CampaignPlan,
    now: DateTime<Utc>,
) -> DateTime<Tz> {
    let local_now = now.with_timezone(&config.timezone);
    shift_days_clock_preserved(local_now, plan.lead.lead_days())
}

/// Tentative closing date snapped to the sale process's allowed weekday:
/// Saturday for auctions, Tuesday through Thursday otherwise.
pub fn closing_date(plan: &CampaignPlan, launch_date: NaiveDate) -> NaiveDate {
    let mut closing = launch_date + Duration::days(plan.conclusion_days());
    if plan.sale_process.is_auction() {
        while closing.weekday() != Weekday::Sat {
            closing += Duration::days(1);
        }
    } else {
        while !matches!(closing.weekday(), Weekday::Tue | Weekday::Wed | Weekday::Thu) {
            closing += Duration::days(1);
        }
    }
    closing
}

/// Day before closing; a Sunday moves back to Saturday so the meeting sits
/// after the usual open-home slot.
pub fn pre_closing_date(closing: NaiveDate) -> NaiveDate {
    let mut date = closing - Duration::days(1);
    if date.weekday() == Weekday::Sun {
        date -= Duration::days(1);
    }
    date
}

/// Generate the full campaign event list, in rule order.
pub fn sequence_campaign_events(
    config: &ScheduleConfig,
    plan: &CampaignPlan,
    services: &ResolvedServices,
    now: DateTime<Utc>,
) -> Vec<Event> {
    let start = marketing_start(config, plan, now);
    let mut sequencer = CampaignSequencer::new(config, start.date_naive());

    sequencer.push_milestone(NOTIFY_BUYERS_SUMMARY, start);
    sequencer.place_media(plan, services);

    let meeting_date = sequencer.launch_meeting_date();
    sequencer.push_timed(LAUNCH_MEETING_SUMMARY, meeting_date, MEETING_HOUR, 0.5);

    let launch_date = next_monday_to_thursday(meeting_date);
    sequencer.push_timed(LAUNCH_SUMMARY, launch_date, LAUNCH_HOUR, 1.0);

    let closing = closing_date(plan, launch_date);
    debug!(
        "campaign for '{}': launch {}, closing {} ({})",
        plan.address,
        launch_date,
        closing,
        plan.sale_process.as_str()
    );

    sequencer.place_recurring(launch_date, closing);
    sequencer.place_closing(plan, closing);
    sequencer.into_events()
}
