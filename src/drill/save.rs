//! Progress persistence.
//!
//! The record lives under a single key ([`STORAGE_KEY`]) as JSON. There is no
//! version field: the key suffix is the version, and every field added after
//! the first release carries a serde default so older records still load.
//!
//! Loading never fails. A missing record, a record that does not parse, and a
//! record whose current problem is missing or inconsistent all end with a
//! usable state and a fresh problem.

use std::cell::RefCell;
use std::collections::HashMap;

use rand::Rng;
use thiserror::Error;

use crate::config::STORAGE_KEY;

use super::problem::generate;
use super::state::ProgressState;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Durable key-value storage for the progress record.
pub trait ProgressStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory storage for native builds and tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser `localStorage`. WASM only.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
impl ProgressStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StoreError::Backend(format!("{e:?}")))
    }
}

/// How [`load`] arrived at its state. Logged at start-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Stored state restored with its problem.
    Restored,
    /// Nothing stored; fresh state.
    Fresh,
    /// Stored state restored, but its problem was missing and a new one was
    /// generated.
    NewProblem,
    /// Stored problem failed validation and was replaced.
    Regenerated,
    /// Stored record could not be parsed and was discarded.
    Corrupted,
}

/// Restore progress, generating a problem where needed.
pub fn load<S, R>(storage: &S, rng: &mut R) -> (ProgressState, LoadOutcome)
where
    S: ProgressStorage + ?Sized,
    R: Rng + ?Sized,
{
    let json = match storage.read(STORAGE_KEY) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("progress: could not read saved progress: {e}");
            None
        }
    };

    let (mut state, outcome) = match json {
        None => (ProgressState::new(), LoadOutcome::Fresh),
        Some(json) => match serde_json::from_str::<ProgressState>(&json) {
            Ok(state) => match &state.current_problem {
                Some(p) if p.is_consistent() => (state, LoadOutcome::Restored),
                Some(_) => (state, LoadOutcome::Regenerated),
                None => (state, LoadOutcome::NewProblem),
            },
            Err(e) => {
                log::warn!("progress: saved progress is corrupted, discarding: {e}");
                if let Err(e) = storage.remove(STORAGE_KEY) {
                    log::warn!("progress: could not remove corrupted record: {e}");
                }
                (ProgressState::new(), LoadOutcome::Corrupted)
            }
        },
    };

    if outcome != LoadOutcome::Restored {
        state.install_problem(generate(rng));
        if let Err(e) = save(storage, &state) {
            log::warn!("progress: could not save new problem: {e}");
        }
    }

    log::info!(
        "progress: {:?} (score={}, correct={}, wrong={})",
        outcome,
        state.score,
        state.correct_count,
        state.wrong_count
    );
    (state, outcome)
}

pub fn save<S: ProgressStorage + ?Sized>(
    storage: &S,
    state: &ProgressState,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(state)?;
    storage.write(STORAGE_KEY, &json)
}

/// Remove the stored record and return a zeroed state with no problem.
/// The caller schedules generation of the next problem.
pub fn reset<S: ProgressStorage + ?Sized>(storage: &S) -> ProgressState {
    if let Err(e) = storage.remove(STORAGE_KEY) {
        log::warn!("progress: could not clear saved progress: {e}");
    }
    log::info!("progress: reset");
    ProgressState::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::problem::{Problem, ProblemKind};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// Storage whose every operation fails.
    struct BrokenStorage;

    impl ProgressStorage for BrokenStorage {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn write(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
        fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    fn sample_state() -> ProgressState {
        ProgressState {
            score: -30,
            correct_count: 4,
            wrong_count: 7,
            current_problem: Some(Problem::new(90, 50, false, ProblemKind::FindPercent)),
            has_celebrated: true,
            can_show_answer: true,
        }
    }

    #[test]
    fn first_run_generates_and_persists() {
        let storage = MemoryStorage::new();
        let (state, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert_eq!(state.score, 0);
        assert!(state.current_problem.is_some());
        assert!(storage.read(STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let storage = MemoryStorage::new();
        let state = sample_state();
        save(&storage, &state).unwrap();

        let (loaded, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(loaded, state);
    }

    #[test]
    fn persisted_field_names() {
        let storage = MemoryStorage::new();
        save(&storage, &sample_state()).unwrap();
        let json = storage.read(STORAGE_KEY).unwrap().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["score"], -30);
        assert_eq!(v["correctCount"], 4);
        assert_eq!(v["wrongCount"], 7);
        assert_eq!(v["hasCelebrated"], true);
        assert_eq!(v["canShowAnswer"], true);
        assert_eq!(v["currProblem"]["type"], 2);
    }

    #[test]
    fn old_record_without_optional_fields() {
        let storage = MemoryStorage::new();
        let json = r#"{
            "score": 20, "correctCount": 2, "wrongCount": 0,
            "currProblem": {
                "old": 100, "new": 120, "percent": 20, "isIncrease": true,
                "type": 1, "answer": 100,
                "display": { "old": "?", "mid": "( 1 + 20% )", "new": 120, "mode": "findOld" }
            }
        }"#;
        storage.write(STORAGE_KEY, json).unwrap();

        let (state, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(state.score, 20);
        assert!(!state.has_celebrated);
        assert!(!state.can_show_answer);
        assert_eq!(
            state.current_problem,
            Some(Problem::new(100, 20, true, ProblemKind::FindOriginal))
        );
    }

    #[test]
    fn null_problem_gets_fresh_one_and_keeps_counters() {
        let storage = MemoryStorage::new();
        storage
            .write(
                STORAGE_KEY,
                r#"{"score":50,"correctCount":5,"wrongCount":0,"currProblem":null}"#,
            )
            .unwrap();

        let (state, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::NewProblem);
        assert_eq!(state.score, 50);
        assert_eq!(state.correct_count, 5);
        assert!(state.current_problem.as_ref().is_some_and(|p| p.is_consistent()));
    }

    #[test]
    fn inconsistent_problem_is_regenerated() {
        let storage = MemoryStorage::new();
        let mut state = sample_state();
        if let Some(p) = state.current_problem.as_mut() {
            p.changed_value = 999;
        }
        save(&storage, &state).unwrap();

        let (loaded, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Regenerated);
        assert_eq!(loaded.score, -30);
        assert_eq!(loaded.wrong_count, 7);
        assert!(loaded.current_problem.as_ref().is_some_and(|p| p.is_consistent()));

        // The replacement is persisted.
        let (again, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Restored);
        assert_eq!(again, loaded);
    }

    #[test]
    fn corrupted_record_falls_back_to_fresh_state() {
        let storage = MemoryStorage::new();
        storage.write(STORAGE_KEY, "{not json").unwrap();

        let (state, outcome) = load(&storage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Corrupted);
        assert_eq!(state.score, 0);
        assert_eq!(state.correct_count, 0);
        assert!(state.current_problem.is_some());

        // The broken entry was replaced by a valid one.
        let json = storage.read(STORAGE_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<ProgressState>(&json).is_ok());
    }

    #[test]
    fn unavailable_storage_still_yields_playable_state() {
        let (state, outcome) = load(&BrokenStorage, &mut rng());
        assert_eq!(outcome, LoadOutcome::Fresh);
        assert!(state.current_problem.is_some());
        assert!(save(&BrokenStorage, &state).is_err());
    }

    #[test]
    fn reset_clears_storage() {
        let storage = MemoryStorage::new();
        save(&storage, &sample_state()).unwrap();

        let state = reset(&storage);
        assert_eq!(state, ProgressState::new());
        assert!(state.current_problem.is_none());
        assert!(!state.has_celebrated);
        assert!(storage.read(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let json = concat!(
            r#"{"score":10,"correctCount":1,"wrongCount":0,"#,
            r#""currProblem":null,"theme":"dark"}"#,
        );
        let state: ProgressState = serde_json::from_str(json).unwrap();
        assert_eq!(state.score, 10);
    }

    proptest! {
        #[test]
        fn any_state_with_a_problem_roundtrips(
            score in any::<i32>(),
            correct_count in any::<u32>(),
            wrong_count in any::<u32>(),
            has_celebrated in any::<bool>(),
            can_show_answer in any::<bool>(),
            seed in any::<u64>(),
        ) {
            let problem = generate(&mut StdRng::seed_from_u64(seed));
            let state = ProgressState {
                score,
                correct_count,
                wrong_count,
                current_problem: Some(problem.clone()),
                has_celebrated,
                can_show_answer,
            };
            let storage = MemoryStorage::new();
            save(&storage, &state).unwrap();

            let json = storage.read(STORAGE_KEY).unwrap().unwrap();
            let v: serde_json::Value = serde_json::from_str(&json).unwrap();
            let display = &v["currProblem"]["display"];
            match problem.kind {
                ProblemKind::FindNew => prop_assert_eq!(&display["new"], "?"),
                ProblemKind::FindOriginal => prop_assert_eq!(&display["old"], "?"),
                ProblemKind::FindPercent => {
                    prop_assert_eq!(&display["mid"], "( 1 + ? % )")
                }
            }

            let (loaded, outcome) = load(&storage, &mut rng());
            prop_assert_eq!(outcome, LoadOutcome::Restored);
            prop_assert_eq!(loaded, state);
        }

        #[test]
        fn negative_scores_roundtrip_for_every_kind(
            score in i32::MIN..0,
            kind_idx in 0usize..3,
            seed in any::<u64>(),
        ) {
            let mut choice = generate(&mut StdRng::seed_from_u64(seed));
            let kind = ProblemKind::ALL[kind_idx];
            choice = Problem::new(choice.original, choice.percent, choice.is_increase, kind);
            let state = ProgressState {
                score,
                current_problem: Some(choice),
                ..ProgressState::new()
            };
            let storage = MemoryStorage::new();
            save(&storage, &state).unwrap();

            let (loaded, outcome) = load(&storage, &mut rng());
            prop_assert_eq!(outcome, LoadOutcome::Restored);
            prop_assert_eq!(loaded, state);
        }
    }
}
