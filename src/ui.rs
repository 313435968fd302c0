use crate::calendar::{NavigationCursor, WEEKDAYS, build_month_grid, build_year_grid};
use crate::models::{GridCell, MonthGrid, MoodCode, StatsResponse, ViewMode, date_key};
use crate::stats::build_stats;
use crate::tracker::TrackerState;
use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Ephemeral page state. Lives in the query string only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageContext {
    pub today: NaiveDate,
    pub view: ViewMode,
    pub cursor: NavigationCursor,
    pub selected: Option<NaiveDate>,
}

impl PageContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            view: ViewMode::Month,
            cursor: NavigationCursor::at(today),
            selected: None,
        }
    }
}

pub fn page_url(view: ViewMode, cursor: NavigationCursor, day: Option<NaiveDate>) -> String {
    let mut url = format!(
        "/?view={}&year={}&month={}",
        view.as_str(),
        cursor.year,
        cursor.month
    );
    if let Some(day) = day {
        url.push_str("&day=");
        url.push_str(&date_key(day));
    }
    url
}

pub fn render_index(ctx: &PageContext, tracker: &TrackerState) -> String {
    render_page(ctx, tracker).into_string()
}

pub fn render_page(ctx: &PageContext, tracker: &TrackerState) -> Markup {
    let stats = build_stats(tracker.moods());
    html! {
        (DOCTYPE)
        html lang="en" data-theme="dark" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Mood Tracker" }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.app {
                    (render_today(ctx, tracker))
                    (render_view_toggle(ctx))
                    (render_month_view(ctx, tracker))
                    (render_year_view(ctx, tracker, &stats))
                }
                (render_modal(ctx, tracker))
            }
        }
    }
}

fn cursor_fields(ctx: &PageContext) -> Markup {
    html! {
        input type="hidden" name="view" value=(ctx.view.as_str());
        input type="hidden" name="year" value=(ctx.cursor.year);
        input type="hidden" name="month" value=(ctx.cursor.month);
    }
}

fn mood_swatch(code: MoodCode, class: &str) -> Markup {
    html! {
        div class=(class) style={ "background:" (code.color()) } { (code.code()) }
    }
}

fn render_today(ctx: &PageContext, tracker: &TrackerState) -> Markup {
    let current = tracker.mood(ctx.today);
    html! {
        section.today #today {
            h2 #todayDate { (ctx.today.format("%a %b %d %Y").to_string()) }
            form.today-moods #todayMoods method="post" action="/today/mood" {
                (cursor_fields(ctx))
                @for code in MoodCode::ALL {
                    button.today-mood-btn.selected[current == Some(code)]
                        type="submit" name="mood" value=(code.code()) {
                        (mood_swatch(code, "today-mood-color"))
                        div.today-mood-label { (code.label()) }
                    }
                }
            }
            form.today-note method="post" action="/today/note" {
                (cursor_fields(ctx))
                textarea #todayNote name="note" rows="3" placeholder="How was today?" {
                    (tracker.note(ctx.today))
                }
                button.secondary type="submit" { "Save note" }
            }
        }
    }
}

fn render_view_toggle(ctx: &PageContext) -> Markup {
    html! {
        nav.view-toggle {
            a #monthViewBtn .active[ctx.view == ViewMode::Month]
                href=(page_url(ViewMode::Month, ctx.cursor, None)) { "Month" }
            a #yearViewBtn .active[ctx.view == ViewMode::Year]
                href=(page_url(ViewMode::Year, ctx.cursor, None)) { "Year" }
        }
    }
}

fn render_cells(ctx: &PageContext, grid: &MonthGrid, class: &str) -> Markup {
    html! {
        @for cell in &grid.cells {
            @match cell {
                GridCell::Empty => {
                    div class={ (class) " empty" } {}
                }
                GridCell::Day { day, date, mood } => {
                    @let date_value = NaiveDate::from_ymd_opt(grid.year, grid.month + 1, *day);
                    @let selected = date_value.is_some() && date_value == ctx.selected;
                    @let is_today = date_value == Some(ctx.today);
                    a class=(cell_class(class, selected, is_today))
                        data-date=(date)
                        data-mood=(mood.map(MoodCode::code).unwrap_or(""))
                        href=(page_url(ctx.view, ctx.cursor, date_value)) { (day) }
                }
            }
        }
    }
}

fn cell_class(base: &str, selected: bool, is_today: bool) -> String {
    let mut class = base.to_string();
    if selected {
        class.push_str(" selected");
    }
    if is_today {
        class.push_str(" today");
    }
    class
}

fn weekday_headers(class: &str) -> Markup {
    html! {
        @for day in WEEKDAYS {
            div class=(class) { (day) }
        }
    }
}

fn render_month_view(ctx: &PageContext, tracker: &TrackerState) -> Markup {
    let grid = build_month_grid(ctx.cursor.year, ctx.cursor.month, tracker.moods());
    let prev = ctx.cursor.shift_month(-1);
    let next = ctx.cursor.shift_month(1);
    html! {
        section.month-view.hidden[ctx.view != ViewMode::Month] #monthView {
            header.nav {
                a.nav-btn #prevMonth href=(page_url(ViewMode::Month, prev, None)) { "‹" }
                h2 #monthTitle { (grid.title) }
                a.nav-btn #nextMonth href=(page_url(ViewMode::Month, next, None)) { "›" }
            }
            div.weekday-headers #weekdayHeaders { (weekday_headers("weekday-header")) }
            div.month-grid #monthGrid { (render_cells(ctx, &grid, "month-day")) }
        }
    }
}

fn render_legend() -> Markup {
    html! {
        div.legend-grid #legendGrid {
            @for code in MoodCode::ALL {
                div.legend-item {
                    (mood_swatch(code, "legend-color"))
                    span.legend-text { (code.label()) }
                }
            }
        }
    }
}

fn render_stats(stats: &StatsResponse) -> Markup {
    html! {
        div.stats-grid #statsGrid {
            @for stat in &stats.moods {
                div.stat-item {
                    div.stat-color style={ "background:" (stat.color) } {}
                    div.stat-info {
                        b { (stat.count) }
                        " "
                        small { (format_percent(stat.percent)) "%" }
                    }
                }
            }
        }
    }
}

fn format_percent(percent: f64) -> String {
    if percent == 0.0 {
        "0".to_string()
    } else {
        format!("{percent:.1}")
    }
}

fn render_year_view(ctx: &PageContext, tracker: &TrackerState, stats: &StatsResponse) -> Markup {
    let year = build_year_grid(ctx.cursor.year, tracker.moods());
    let prev = ctx.cursor.shift_year(-1);
    let next = ctx.cursor.shift_year(1);
    html! {
        section.year-view.hidden[ctx.view != ViewMode::Year] #yearView {
            header.nav {
                a.nav-btn #prevYear href=(page_url(ViewMode::Year, prev, None)) { "‹" }
                h2 #yearTitle { (year.year) }
                a.nav-btn #nextYear href=(page_url(ViewMode::Year, next, None)) { "›" }
            }
            div.mood-grid #moodGrid {
                @for grid in &year.months {
                    div.mini-month {
                        h3.month-header { (crate::calendar::MONTHS[grid.month as usize]) }
                        div.mini-grid {
                            (weekday_headers("mini-weekday"))
                            (render_cells(ctx, grid, "mini-day"))
                        }
                    }
                }
            }
            (render_legend())
            (render_stats(stats))
        }
    }
}

fn render_modal(ctx: &PageContext, tracker: &TrackerState) -> Markup {
    let Some(day) = ctx.selected else {
        return html! {};
    };
    let current = tracker.mood(day);
    let title = format!("{} {}", crate::calendar::MONTHS[day.month0() as usize], day.day());
    html! {
        div.modal.active #moodModal {
            form.modal-card method="post" action={ "/day/" (date_key(day)) } {
                (cursor_fields(ctx))
                header.modal-header {
                    h3 #modalTitle { (title) }
                    button.modal-close #modalClose type="submit" name="action" value="close" { "×" }
                }
                div.mood-options #moodOptions {
                    @for code in MoodCode::ALL {
                        button.mood-option.selected[current == Some(code)]
                            type="submit" name="action" value=(code.code()) {
                            (mood_swatch(code, "mood-option-color"))
                            span { (code.label()) }
                        }
                    }
                }
                textarea #modalNote name="note" rows="4" placeholder="Add a note" {
                    (tracker.note(day))
                }
                button.secondary #clearMood type="submit" name="action" value="clear" { "Clear mood" }
            }
        }
    }
}

const CSS: &str = r#"
:root {
  --bg: #15171c;
  --card: #1f232b;
  --ink: #e9e6df;
  --muted: #8d929c;
  --line: rgba(255, 255, 255, 0.08);
  --accent: #7aa2f7;
  --mood-a: #4CAF50;
  --mood-c: #FFEB3B;
  --mood-f: #E91E63;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  min-height: 100vh;
  background: var(--bg);
  color: var(--ink);
  font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
  display: grid;
  place-items: start center;
  padding: 32px 18px 48px;
}

a {
  color: inherit;
  text-decoration: none;
}

.app {
  width: min(760px, 100%);
  display: grid;
  gap: 24px;
}

section {
  background: var(--card);
  border-radius: 20px;
  border: 1px solid var(--line);
  padding: 24px;
  display: grid;
  gap: 16px;
}

.hidden {
  display: none;
}

h2, h3 {
  margin: 0;
}

button {
  appearance: none;
  border: none;
  border-radius: 14px;
  padding: 10px 14px;
  font: inherit;
  cursor: pointer;
  background: transparent;
  color: inherit;
}

button.secondary {
  border: 1px solid var(--line);
  justify-self: start;
}

textarea {
  width: 100%;
  background: var(--bg);
  color: var(--ink);
  border: 1px solid var(--line);
  border-radius: 12px;
  padding: 12px;
  font: inherit;
  resize: vertical;
}

.today-moods, .mood-options {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 12px;
}

.today-mood-btn, .mood-option {
  display: grid;
  justify-items: center;
  gap: 6px;
  border: 1px solid var(--line);
}

.today-mood-btn.selected, .mood-option.selected {
  border-color: var(--accent);
  box-shadow: 0 0 0 2px var(--accent);
}

.today-mood-color, .mood-option-color, .legend-color {
  width: 36px;
  height: 36px;
  border-radius: 50%;
  display: grid;
  place-items: center;
  color: #15171c;
  font-weight: 600;
}

.view-toggle {
  display: flex;
  gap: 6px;
  padding: 6px;
  background: var(--card);
  border-radius: 999px;
  justify-self: center;
}

.view-toggle a {
  padding: 8px 18px;
  border-radius: 999px;
  color: var(--muted);
}

.view-toggle a.active {
  background: var(--accent);
  color: var(--bg);
}

.nav {
  display: flex;
  align-items: center;
  justify-content: space-between;
}

.nav-btn {
  font-size: 1.6rem;
  padding: 0 12px;
}

.weekday-headers, .month-grid, .mini-grid {
  display: grid;
  grid-template-columns: repeat(7, 1fr);
  gap: 6px;
}

.weekday-header, .mini-weekday {
  text-align: center;
  color: var(--muted);
  font-size: 0.8rem;
}

.month-day, .mini-day {
  aspect-ratio: 1;
  display: grid;
  place-items: center;
  border-radius: 10px;
  background: var(--bg);
}

.mini-day {
  font-size: 0.6rem;
  border-radius: 4px;
}

.month-day.empty, .mini-day.empty {
  background: transparent;
}

.month-day.today, .mini-day.today {
  outline: 1px solid var(--accent);
}

.month-day.selected, .mini-day.selected {
  outline: 2px solid var(--ink);
}

[data-mood="A"] { background: var(--mood-a); color: #15171c; }
[data-mood="C"] { background: var(--mood-c); color: #15171c; }
[data-mood="F"] { background: var(--mood-f); color: #15171c; }

.mood-grid {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
  gap: 16px;
}

.mini-month {
  display: grid;
  gap: 6px;
}

.mini-grid {
  gap: 2px;
}

.legend-grid, .stats-grid {
  display: flex;
  flex-wrap: wrap;
  gap: 16px;
}

.legend-item, .stat-item {
  display: flex;
  align-items: center;
  gap: 8px;
}

.stat-color {
  width: 14px;
  height: 14px;
  border-radius: 4px;
}

.stat-info small {
  color: var(--muted);
}

.modal {
  position: fixed;
  inset: 0;
  background: rgba(0, 0, 0, 0.6);
  display: grid;
  place-items: center;
  padding: 18px;
}

.modal-card {
  width: min(420px, 100%);
  background: var(--card);
  border-radius: 20px;
  padding: 24px;
  display: grid;
  gap: 16px;
}

.modal-header {
  display: flex;
  justify-content: space-between;
  align-items: center;
}

.modal-close {
  font-size: 1.4rem;
}
"#;
