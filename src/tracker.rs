use crate::errors::AppError;
use crate::models::{DayResponse, MoodCode, date_key, parse_date_key};
use crate::storage::{MOOD_RECORD, NOTES_RECORD, RecordStore};
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, error};

pub type MoodMap = BTreeMap<NaiveDate, MoodCode>;
pub type NoteMap = BTreeMap<NaiveDate, String>;

/// Moods and notes per day, written through to the record store on every
/// mutation. An unset mood is an absent entry.
#[derive(Debug, Clone)]
pub struct TrackerState {
    store: RecordStore,
    moods: MoodMap,
    notes: NoteMap,
}

impl TrackerState {
    pub fn empty(store: RecordStore) -> Self {
        Self {
            store,
            moods: MoodMap::new(),
            notes: NoteMap::new(),
        }
    }

    pub async fn load(store: RecordStore) -> Self {
        let moods = match store.read_record(MOOD_RECORD).await {
            Some(bytes) => decode_moods(&bytes),
            None => MoodMap::new(),
        };
        let notes = match store.read_record(NOTES_RECORD).await {
            Some(bytes) => decode_notes(&bytes),
            None => NoteMap::new(),
        };
        debug!(moods = moods.len(), notes = notes.len(), "loaded tracker state");

        Self { store, moods, notes }
    }

    pub fn moods(&self) -> &MoodMap {
        &self.moods
    }

    pub fn mood(&self, date: NaiveDate) -> Option<MoodCode> {
        self.moods.get(&date).copied()
    }

    pub fn note(&self, date: NaiveDate) -> &str {
        self.notes.get(&date).map(String::as_str).unwrap_or("")
    }

    pub fn day(&self, date: NaiveDate) -> DayResponse {
        DayResponse {
            date: date_key(date),
            mood: self.mood(date),
            note: self.note(date).to_string(),
        }
    }

    /// Selecting the mood a day already holds clears it; `None` always clears.
    pub async fn set_mood(
        &mut self,
        date: NaiveDate,
        mood: Option<MoodCode>,
    ) -> Result<Option<MoodCode>, AppError> {
        let next = apply_toggle(self.mood(date), mood);
        match next {
            Some(code) => {
                self.moods.insert(date, code);
            }
            None => {
                self.moods.remove(&date);
            }
        }
        debug!(date = %date, mood = ?next, "mood updated");

        self.persist_moods().await?;
        Ok(next)
    }

    pub async fn set_note(&mut self, date: NaiveDate, text: impl Into<String>) -> Result<(), AppError> {
        self.notes.insert(date, text.into());
        debug!(date = %date, "note updated");
        self.persist_notes().await
    }

    async fn persist_moods(&self) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(&self.moods)?;
        self.store.write_record(MOOD_RECORD, &payload).await
    }

    async fn persist_notes(&self) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(&self.notes)?;
        self.store.write_record(NOTES_RECORD, &payload).await
    }
}

fn apply_toggle(current: Option<MoodCode>, requested: Option<MoodCode>) -> Option<MoodCode> {
    match requested {
        Some(code) if current == Some(code) => None,
        other => other,
    }
}

fn decode_record(name: &str, bytes: &[u8]) -> BTreeMap<String, Value> {
    match serde_json::from_slice(bytes) {
        Ok(record) => record,
        Err(err) => {
            error!("failed to parse record {name}: {err}");
            BTreeMap::new()
        }
    }
}

fn decode_moods(bytes: &[u8]) -> MoodMap {
    decode_record(MOOD_RECORD, bytes)
        .into_iter()
        .filter_map(|(key, value)| {
            let date = parse_date_key(&key)?;
            let code = value.as_str()?.parse::<MoodCode>().ok()?;
            Some((date, code))
        })
        .collect()
}

fn decode_notes(bytes: &[u8]) -> NoteMap {
    decode_record(NOTES_RECORD, bytes)
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((parse_date_key(&key)?, text)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unique_dir(tag: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("mood_tracker_{tag}_{}_{nanos}", std::process::id()))
    }

    async fn fresh_store(tag: &str) -> RecordStore {
        let store = RecordStore::new(unique_dir(tag));
        store.ensure_dir().await.unwrap();
        store
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn selecting_same_mood_twice_unsets_it() {
        let mut state = TrackerState::empty(fresh_store("toggle").await);
        let date = day(2024, 3, 5);

        for code in MoodCode::ALL {
            assert_eq!(state.set_mood(date, Some(code)).await.unwrap(), Some(code));
            assert_eq!(state.mood(date), Some(code));
            assert_eq!(state.set_mood(date, Some(code)).await.unwrap(), None);
            assert_eq!(state.mood(date), None);
        }
    }

    #[tokio::test]
    async fn different_mood_overwrites_and_none_clears() {
        let mut state = TrackerState::empty(fresh_store("overwrite").await);
        let date = day(2024, 3, 5);

        state.set_mood(date, Some(MoodCode::A)).await.unwrap();
        state.set_mood(date, Some(MoodCode::F)).await.unwrap();
        assert_eq!(state.mood(date), Some(MoodCode::F));

        state.set_mood(date, None).await.unwrap();
        assert_eq!(state.mood(date), None);
        assert!(state.moods().is_empty());
    }

    #[tokio::test]
    async fn unset_days_read_as_unset() {
        let state = TrackerState::empty(fresh_store("unset").await);
        assert_eq!(state.mood(day(2023, 1, 1)), None);
        assert_eq!(state.note(day(2023, 1, 1)), "");
    }

    #[tokio::test]
    async fn notes_survive_reload() {
        let store = fresh_store("notes").await;
        let mut state = TrackerState::empty(store.clone());
        state.set_note(day(2024, 3, 5), "hello").await.unwrap();
        state.set_mood(day(2024, 3, 6), Some(MoodCode::C)).await.unwrap();

        let reloaded = TrackerState::load(store).await;
        assert_eq!(reloaded.note(day(2024, 3, 5)), "hello");
        assert_eq!(reloaded.note(day(2024, 3, 6)), "");
        assert_eq!(reloaded.mood(day(2024, 3, 6)), Some(MoodCode::C));
        assert_eq!(reloaded.mood(day(2024, 3, 5)), None);
    }

    #[tokio::test]
    async fn empty_note_is_kept() {
        let store = fresh_store("empty_note").await;
        let mut state = TrackerState::empty(store.clone());
        state.set_note(day(2024, 1, 1), "draft").await.unwrap();
        state.set_note(day(2024, 1, 1), "").await.unwrap();

        let reloaded = TrackerState::load(store).await;
        assert_eq!(reloaded.note(day(2024, 1, 1)), "");
    }

    #[tokio::test]
    async fn mood_record_uses_date_keys_and_codes() {
        let store = fresh_store("format").await;
        let mut state = TrackerState::empty(store.clone());
        state.set_mood(day(2024, 3, 5), Some(MoodCode::A)).await.unwrap();

        let bytes = store.read_record(MOOD_RECORD).await.unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value, serde_json::json!({ "2024-03-05": "A" }));
    }

    #[tokio::test]
    async fn malformed_records_load_as_empty() {
        let store = fresh_store("corrupt").await;
        store.write_record(MOOD_RECORD, b"not json").await.unwrap();
        store.write_record(NOTES_RECORD, b"[1, 2, 3]").await.unwrap();

        let state = TrackerState::load(store).await;
        assert!(state.moods().is_empty());
        assert_eq!(state.note(day(2024, 1, 1)), "");
    }

    #[tokio::test]
    async fn invalid_entries_are_dropped_on_load() {
        let store = fresh_store("invalid").await;
        let record = serde_json::json!({
            "2024-03-05": "A",
            "2024-03-06": null,
            "2024-03-07": "Z",
            "not-a-date": "C",
            "2024-03-08": 4,
        });
        store
            .write_record(MOOD_RECORD, &serde_json::to_vec(&record).unwrap())
            .await
            .unwrap();

        let state = TrackerState::load(store).await;
        assert_eq!(state.moods().len(), 1);
        assert_eq!(state.mood(day(2024, 3, 5)), Some(MoodCode::A));
    }

    #[tokio::test]
    async fn missing_directory_loads_empty() {
        let state = TrackerState::load(RecordStore::new(unique_dir("absent"))).await;
        assert!(state.moods().is_empty());
    }
}
