use crate::locator::{self, Locator};
use crate::suggest::Suggestion;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

/// Quiet period after the last edit before the settled query is delivered.
pub const INPUT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A single-shot scheduled delivery of the latest query text.
///
/// At most one task is armed at a time; arming again replaces the previous
/// deadline and payload. The owner polls with the current time, so firing
/// happens cooperatively on the event loop and never after the bar is
/// dropped.
#[derive(Debug)]
pub struct Debounce {
    delay: Duration,
    pending: Option<(Instant, String)>,
}

impl Debounce {
    pub fn new(delay: Duration) -> Self {
        Debounce {
            delay,
            pending: None,
        }
    }

    /// Schedules `text` for delivery after the quiet period, cancelling any
    /// outstanding schedule.
    pub fn arm(&mut self, now: Instant, text: String) {
        self.pending = Some((now + self.delay, text));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the outstanding schedule, for event-loop poll timeouts.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    /// Takes the payload if its deadline has elapsed.
    pub fn take_elapsed(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((deadline, _)) if *deadline <= now => {
                self.pending.take().map(|(_, text)| text)
            }
            _ => None,
        }
    }
}

/// What a submitted bar resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// A well-formed locator, already normalized.
    Content(Locator),
    /// Anything else: free-text search with the exact typed text.
    Search(String),
}

/// Result of feeding one key event to the bar.
#[derive(Debug, Clone, PartialEq)]
pub enum BarOutcome {
    /// Key was not for the bar; the active screen should handle it.
    Ignored,
    /// Key consumed; no external effect.
    Consumed,
    /// Enter on the input itself.
    Submit(Submission),
    /// Enter with a suggestion highlighted; the owner resolves the row
    /// and calls [`Omnibar::press_item`].
    Suggestion(usize),
}

/// Effect of pressing a suggestion row.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemPress {
    /// Search suggestion: the value was adopted as the settled query and
    /// should take the search path.
    Search(String),
    /// Content suggestion, normalized; bypasses the settled-query update.
    Content(Locator),
}

/// The combined address/search input.
///
/// Owns the field text, cursor, focus flag and the debounce task. The
/// suggestion list itself is owned by the caller and only its length is
/// needed here, for highlight movement.
#[derive(Debug)]
pub struct Omnibar {
    current_value: String,
    input_text: String,
    cursor: usize,
    focused: bool,
    /// Focus selects the whole value, so the next edit replaces it.
    select_all: bool,
    selected: Option<usize>,
    debounce: Debounce,
}

impl Omnibar {
    /// A bar seeded once with an optional initial value. Starts unfocused
    /// with the cursor at the start.
    pub fn new(initial: Option<&str>) -> Self {
        let seed = initial.unwrap_or_default().to_string();
        Omnibar {
            current_value: seed.clone(),
            input_text: seed,
            cursor: 0,
            focused: false,
            select_all: false,
            selected: None,
            debounce: Debounce::new(INPUT_DEBOUNCE),
        }
    }

    pub fn value(&self) -> &str {
        &self.current_value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Index of the highlighted suggestion row, if any.
    pub fn selected_suggestion(&self) -> Option<usize> {
        self.selected
    }

    /// Whether the whole value is currently selected.
    pub fn has_selection(&self) -> bool {
        self.select_all
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.cursor = self.current_value.chars().count();
        self.select_all = !self.current_value.is_empty();
    }

    /// Hides suggestions and resets the cursor to the start. A pending
    /// debounce task keeps running; only dropping the bar cancels it.
    pub fn blur(&mut self) {
        self.focused = false;
        self.selected = None;
        self.select_all = false;
        self.cursor = 0;
    }

    /// Deadline the event loop should wake at, if a task is armed.
    pub fn timer_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    /// Delivers the settled query once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        self.debounce.take_elapsed(now)
    }

    /// Feeds one key event. `suggestion_count` is the number of rows the
    /// owner is currently displaying.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        suggestion_count: usize,
        now: Instant,
    ) -> BarOutcome {
        if !self.focused {
            // An unfocused bar grabs printable keys and starts editing.
            if let KeyCode::Char(c) = key.code {
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
                    self.focus();
                    self.insert_char(c, now);
                    return BarOutcome::Consumed;
                }
            }
            return BarOutcome::Ignored;
        }

        match key.code {
            KeyCode::Esc => {
                self.blur();
                BarOutcome::Consumed
            }
            KeyCode::Enter => match self.selected {
                Some(index) => BarOutcome::Suggestion(index),
                None => match self.submit() {
                    Some(submission) => BarOutcome::Submit(submission),
                    None => BarOutcome::Consumed,
                },
            },
            KeyCode::Down => {
                if suggestion_count > 0 {
                    self.selected = Some(match self.selected {
                        Some(i) if i + 1 < suggestion_count => i + 1,
                        Some(i) => i,
                        None => 0,
                    });
                }
                BarOutcome::Consumed
            }
            KeyCode::Up => {
                self.selected = match self.selected {
                    Some(0) | None => None,
                    Some(i) => Some(i - 1),
                };
                BarOutcome::Consumed
            }
            KeyCode::Left => {
                self.select_all = false;
                self.cursor = self.cursor.saturating_sub(1);
                BarOutcome::Consumed
            }
            KeyCode::Right => {
                self.select_all = false;
                let len = self.current_value.chars().count();
                if self.cursor < len {
                    self.cursor += 1;
                }
                BarOutcome::Consumed
            }
            KeyCode::Home => {
                self.select_all = false;
                self.cursor = 0;
                BarOutcome::Consumed
            }
            KeyCode::End => {
                self.select_all = false;
                self.cursor = self.current_value.chars().count();
                BarOutcome::Consumed
            }
            KeyCode::Char(c) => {
                if key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
                    self.insert_char(c, now);
                }
                BarOutcome::Consumed
            }
            KeyCode::Backspace => {
                if self.take_selection() {
                    self.text_changed(now);
                } else if self.cursor > 0 {
                    self.remove_char(self.cursor - 1, now);
                    self.cursor -= 1;
                }
                BarOutcome::Consumed
            }
            KeyCode::Delete => {
                if self.take_selection() {
                    self.text_changed(now);
                } else if self.cursor < self.current_value.chars().count() {
                    self.remove_char(self.cursor, now);
                }
                BarOutcome::Consumed
            }
            _ => BarOutcome::Consumed,
        }
    }

    /// Explicit submit of the typed text.
    ///
    /// Locator-shaped text that validates opens content; everything else,
    /// including a malformed locator, falls through to the search path.
    /// Empty input does nothing. Submitting dismisses focus.
    pub fn submit(&mut self) -> Option<Submission> {
        if self.input_text.is_empty() {
            return None;
        }
        let submission = classify(&self.input_text);
        self.blur();
        Some(submission)
    }

    /// Presses one suggestion row, dismissing focus first.
    ///
    /// A search suggestion becomes the shown value and the settled query in
    /// one step, so the pending debounce task is cancelled rather than left
    /// to overwrite it later. A content suggestion navigates directly and
    /// leaves the field untouched; one that fails to normalize falls back
    /// to the search path like any other malformed locator.
    pub fn press_item(&mut self, item: &Suggestion) -> ItemPress {
        self.blur();

        if item.kind.is_search() {
            self.current_value = item.value.clone();
            self.debounce.cancel();
            return ItemPress::Search(item.value.clone());
        }

        match locator::normalize(&item.value) {
            Ok(loc) => ItemPress::Content(loc),
            Err(_) => ItemPress::Search(item.value.clone()),
        }
    }

    fn insert_char(&mut self, c: char, now: Instant) {
        self.take_selection();
        let byte_idx = byte_index(&self.current_value, self.cursor);
        self.current_value.insert(byte_idx, c);
        self.cursor += 1;
        self.text_changed(now);
    }

    /// Consumes the select-all state, clearing the value if it was set.
    fn take_selection(&mut self) -> bool {
        if self.select_all {
            self.select_all = false;
            self.current_value.clear();
            self.cursor = 0;
            true
        } else {
            false
        }
    }

    fn remove_char(&mut self, char_idx: usize, now: Instant) {
        let byte_idx = byte_index(&self.current_value, char_idx);
        self.current_value.remove(byte_idx);
        self.text_changed(now);
    }

    /// Every edit re-arms the single debounce task with the latest text and
    /// clears the suggestion highlight (the rows are about to change).
    fn text_changed(&mut self, now: Instant) {
        self.input_text = self.current_value.clone();
        self.selected = None;
        self.debounce.arm(now, self.current_value.clone());
    }
}

/// Submission classification: recognized scheme plus a passing validity
/// check means content; anything else is a search for the exact text.
fn classify(text: &str) -> Submission {
    if locator::is_locator_like(text) {
        if let Ok(loc) = locator::normalize(text) {
            return Submission::Content(loc);
        }
    }
    Submission::Search(text.to_string())
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
