//! Percentage-change drill. Ten points per answer, a one-time celebration
//! at 150.

pub mod actions;
pub mod diagram;
pub mod evaluate;
pub mod problem;
pub mod render;
pub mod reset;
pub mod save;
pub mod state;
pub mod text;

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::{ADVANCE_DELAY_TICKS, MAX_INPUT_LEN, TITLE_CLICKS_TO_TOGGLE};
use crate::input::{ClickState, InputEvent};
use crate::schedule::{Scheduler, TaskId};

use evaluate::evaluate;
use problem::generate;
use reset::{ResetGuard, ResetStep};
use save::ProgressStorage;
use state::ProgressState;
use text::{Feedback, Lang};

/// Work that runs after a fixed delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Replace the current problem with a fresh one.
    AdvanceProblem,
    /// The reset confirmation window ran out.
    ExpireResetConfirm,
}

pub struct DrillGame {
    pub progress: ProgressState,
    storage: Box<dyn ProgressStorage>,
    rng: StdRng,
    scheduler: Scheduler<Deferred>,
    reset_guard: ResetGuard,
    /// Answer buffer as typed.
    pub input: String,
    pub feedback: Feedback,
    pub lang: Lang,
    pub show_report: bool,
    /// Local time captured when the report was opened.
    pub report_time: Option<String>,
    title_clicks: u32,
    advance_task: Option<TaskId>,
}

impl DrillGame {
    pub fn new(storage: Box<dyn ProgressStorage>, mut rng: StdRng) -> Self {
        let (progress, _) = save::load(storage.as_ref(), &mut rng);
        Self {
            progress,
            storage,
            rng,
            scheduler: Scheduler::new(),
            reset_guard: ResetGuard::Idle,
            input: String::new(),
            feedback: Feedback::None,
            lang: Lang::Zh,
            show_report: false,
            report_time: None,
            title_clicks: 0,
            advance_task: None,
        }
    }

    /// True while feedback is on screen and the next problem is pending.
    pub fn is_locked(&self) -> bool {
        self.advance_task.is_some_and(|id| self.scheduler.is_pending(id))
            || self.progress.current_problem.is_none()
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        if self.show_report {
            return self.handle_report_input(event);
        }
        match event {
            InputEvent::Key(c) => match c.to_ascii_lowercase() {
                '0'..='9' | '.' | '-' => self.push_char(*c),
                's' => self.submit(),
                'a' => self.show_answer(),
                'p' => self.open_report(),
                'x' => self.trigger_reset(),
                'l' => self.toggle_lang(),
                _ => false,
            },
            InputEvent::Enter => self.submit(),
            InputEvent::Backspace => {
                if self.is_locked() {
                    return false;
                }
                self.input.pop().is_some()
            }
            InputEvent::Esc => false,
            InputEvent::Click(id) => match *id {
                actions::TITLE => self.click_title(),
                actions::SUBMIT => self.submit(),
                actions::SHOW_ANSWER => self.show_answer(),
                actions::OPEN_REPORT => self.open_report(),
                actions::RESET => self.trigger_reset(),
                actions::TOGGLE_LANG => self.toggle_lang(),
                _ => false,
            },
        }
    }

    fn handle_report_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Esc | InputEvent::Enter | InputEvent::Click(actions::CLOSE_REPORT) => {
                self.close_report()
            }
            InputEvent::Key(c) if matches!(c.to_ascii_lowercase(), 'q' | 'p') => {
                self.close_report()
            }
            // Swallow everything else while the overlay is up.
            _ => true,
        }
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        if !self.scheduler.has_pending() {
            return;
        }
        for task in self.scheduler.advance(delta_ticks as u64) {
            match task {
                Deferred::AdvanceProblem => self.advance_problem(),
                Deferred::ExpireResetConfirm => {
                    if self.reset_guard.expire() && self.feedback == Feedback::ResetPending {
                        self.feedback = Feedback::None;
                    }
                }
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    // ── Operations ──────────────────────────────────────────────

    fn push_char(&mut self, c: char) -> bool {
        if self.is_locked() || self.input.chars().count() >= MAX_INPUT_LEN {
            return false;
        }
        self.input.push(c);
        true
    }

    fn submit(&mut self) -> bool {
        if self.advance_task.is_some() {
            return false;
        }
        debug_assert!(self.progress.current_problem.is_some(), "submit with no current problem");
        let Some(problem) = self.progress.current_problem.as_ref() else {
            log::error!("drill: submit with no current problem");
            return false;
        };

        let evaluation = match evaluate(&self.input, problem) {
            Ok(evaluation) => evaluation,
            Err(e) => {
                log::debug!("drill: {e}");
                self.feedback = Feedback::InvalidInput;
                return true;
            }
        };

        let celebrate = self.progress.record(&evaluation);
        self.feedback = if celebrate {
            log::info!("drill: target reached (score={})", self.progress.score);
            Feedback::Celebration
        } else if evaluation.correct {
            Feedback::Correct
        } else {
            Feedback::Wrong { answer: evaluation.revealed_answer }
        };
        self.persist();
        self.schedule_advance();
        true
    }

    fn show_answer(&mut self) -> bool {
        if !self.progress.can_show_answer {
            return false;
        }
        match &self.progress.current_problem {
            Some(problem) => {
                self.feedback = Feedback::Revealed { answer: problem.answer };
                true
            }
            None => false,
        }
    }

    fn open_report(&mut self) -> bool {
        self.show_report = true;
        self.report_time = local_time();
        true
    }

    fn close_report(&mut self) -> bool {
        self.show_report = false;
        true
    }

    fn trigger_reset(&mut self) -> bool {
        match self.reset_guard.trigger(&mut self.scheduler) {
            ResetStep::Armed => self.feedback = Feedback::ResetPending,
            ResetStep::Confirmed => {
                self.progress = save::reset(self.storage.as_ref());
                self.input.clear();
                self.feedback = Feedback::ResetDone;
                self.schedule_advance();
            }
        }
        true
    }

    fn toggle_lang(&mut self) -> bool {
        self.lang = self.lang.toggled();
        true
    }

    fn click_title(&mut self) -> bool {
        self.title_clicks += 1;
        if self.title_clicks < TITLE_CLICKS_TO_TOGGLE {
            return true;
        }
        self.title_clicks = 0;
        self.progress.can_show_answer = !self.progress.can_show_answer;
        self.feedback = if self.progress.can_show_answer {
            Feedback::ShowAnswerEnabled
        } else {
            Feedback::ShowAnswerDisabled
        };
        log::info!("drill: show answer {}", self.progress.can_show_answer);
        self.persist();
        true
    }

    fn schedule_advance(&mut self) {
        if let Some(id) = self.advance_task.take() {
            self.scheduler.cancel(id);
        }
        let id = self.scheduler.schedule(ADVANCE_DELAY_TICKS, Deferred::AdvanceProblem);
        self.advance_task = Some(id);
    }

    fn advance_problem(&mut self) {
        self.advance_task = None;
        self.progress.install_problem(generate(&mut self.rng));
        self.input.clear();
        self.feedback = Feedback::None;
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = save::save(self.storage.as_ref(), &self.progress) {
            log::warn!("drill: could not save progress: {e}");
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_time() -> Option<String> {
    let now = js_sys::Date::new_0();
    Some(now.to_locale_string("default", &js_sys::Object::new()).into())
}

#[cfg(not(target_arch = "wasm32"))]
fn local_time() -> Option<String> {
    None
}
