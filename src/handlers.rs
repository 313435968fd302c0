use crate::calendar::{NavigationCursor, build_month_grid, build_year_grid, is_supported_year};
use crate::errors::AppError;
use crate::models::{
    DayResponse, MonthGrid, MoodCode, MoodRequest, NoteRequest, StatsResponse, ViewMode, YearGrid,
    parse_date_key,
};
use crate::state::AppState;
use crate::stats::build_stats;
use crate::ui::{PageContext, page_url, render_index};
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tracing::info;

/// Query string of the page and the fields every page form carries.
/// Values are kept as strings so a bad cursor falls back instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub view: Option<String>,
    pub year: Option<String>,
    pub month: Option<String>,
    pub day: Option<String>,
    pub mood: Option<String>,
    pub note: Option<String>,
    pub action: Option<String>,
}

impl PageParams {
    pub fn context(&self, today: NaiveDate) -> PageContext {
        let mut ctx = PageContext::new(today);
        if let Some(view) = self.view.as_deref().and_then(ViewMode::parse) {
            ctx.view = view;
        }
        let year = self
            .year
            .as_deref()
            .and_then(|value| value.trim().parse::<i32>().ok())
            .filter(|year| is_supported_year(*year));
        let month = self
            .month
            .as_deref()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|month| *month < 12);
        ctx.cursor = NavigationCursor::new(
            year.unwrap_or(ctx.cursor.year),
            month.unwrap_or(ctx.cursor.month),
        );
        ctx.selected = self.day.as_deref().and_then(parse_date_key);
        ctx
    }

    fn redirect(&self, today: NaiveDate) -> Redirect {
        let ctx = self.context(today);
        Redirect::to(&page_url(ctx.view, ctx.cursor, None))
    }
}

enum DayAction {
    Close,
    Clear,
    Select(MoodCode),
}

fn parse_day_action(value: Option<&str>) -> Result<DayAction, AppError> {
    match value.map(str::trim) {
        None | Some("") | Some("close") => Ok(DayAction::Close),
        Some("clear") => Ok(DayAction::Clear),
        Some(code) => Ok(DayAction::Select(code.parse()?)),
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    parse_date_key(value).ok_or_else(|| AppError::invalid_date(value))
}

fn checked_year(year: i32) -> Result<i32, AppError> {
    if is_supported_year(year) {
        Ok(year)
    } else {
        Err(AppError::bad_request(format!("year {year} is out of range")))
    }
}

fn parse_optional_mood(value: Option<&str>) -> Result<Option<MoodCode>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => Ok(Some(code.parse()?)),
    }
}

pub async fn index(State(state): State<AppState>, Query(params): Query<PageParams>) -> Html<String> {
    let ctx = params.context(today());
    let tracker = state.tracker.lock().await;
    Html(render_index(&ctx, &tracker))
}

pub async fn today_mood(
    State(state): State<AppState>,
    Form(form): Form<PageParams>,
) -> Result<Redirect, AppError> {
    let date = today();
    let mood = form
        .mood
        .as_deref()
        .ok_or_else(|| AppError::bad_request("mood is required"))?
        .parse::<MoodCode>()?;

    let mut tracker = state.tracker.lock().await;
    let result = tracker.set_mood(date, Some(mood)).await?;
    info!(date = %date, mood = ?result, "today's mood set");

    Ok(form.redirect(date))
}

pub async fn today_note(
    State(state): State<AppState>,
    Form(form): Form<PageParams>,
) -> Result<Redirect, AppError> {
    let date = today();
    let mut tracker = state.tracker.lock().await;
    tracker
        .set_note(date, form.note.clone().unwrap_or_default())
        .await?;

    Ok(form.redirect(date))
}

/// Submits the edit dialog: applies the chosen action, writes the note back
/// and closes the dialog.
pub async fn day_action(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Form(form): Form<PageParams>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&key)?;
    let action = parse_day_action(form.action.as_deref())?;

    let mut tracker = state.tracker.lock().await;
    match action {
        DayAction::Close => {}
        DayAction::Clear => {
            tracker.set_mood(date, None).await?;
        }
        DayAction::Select(code) => {
            let result = tracker.set_mood(date, Some(code)).await?;
            info!(date = %date, mood = ?result, "mood set from dialog");
        }
    }
    if let Some(note) = form.note.as_deref() {
        tracker.set_note(date, note).await?;
    }

    Ok(form.redirect(today()))
}

pub async fn get_today(State(state): State<AppState>) -> Json<DayResponse> {
    let tracker = state.tracker.lock().await;
    Json(tracker.day(today()))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date(&key)?;
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.day(date)))
}

pub async fn get_stats(State(state): State<AppState>) -> Json<StatsResponse> {
    let tracker = state.tracker.lock().await;
    Json(build_stats(tracker.moods()))
}

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub async fn get_month(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let current = NavigationCursor::at(today());
    let month = query.month.unwrap_or(current.month);
    if month > 11 {
        return Err(AppError::bad_request("month must be between 0 and 11"));
    }
    let year = checked_year(query.year.unwrap_or(current.year))?;

    let tracker = state.tracker.lock().await;
    Ok(Json(build_month_grid(year, month, tracker.moods())))
}

#[derive(Debug, Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

pub async fn get_year(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<YearGrid>, AppError> {
    let year = checked_year(query.year.unwrap_or(NavigationCursor::at(today()).year))?;
    let tracker = state.tracker.lock().await;
    Ok(Json(build_year_grid(year, tracker.moods())))
}

pub async fn set_mood(
    State(state): State<AppState>,
    Json(payload): Json<MoodRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date(&payload.date)?;
    let mood = parse_optional_mood(payload.mood.as_deref())?;

    let mut tracker = state.tracker.lock().await;
    tracker.set_mood(date, mood).await?;
    Ok(Json(tracker.day(date)))
}

pub async fn set_note(
    State(state): State<AppState>,
    Json(payload): Json<NoteRequest>,
) -> Result<Json<DayResponse>, AppError> {
    let date = parse_date(&payload.date)?;

    let mut tracker = state.tracker.lock().await;
    tracker.set_note(date, payload.note).await?;
    Ok(Json(tracker.day(date)))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
