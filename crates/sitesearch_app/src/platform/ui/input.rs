use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sitesearch_core::{AppViewModel, Msg, ResultKey};

use super::constants::SCROLL_STEP;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    Query,
    Results,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Url => Focus::Query,
            Focus::Query => Focus::Results,
            Focus::Results => Focus::Url,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Url => Focus::Results,
            Focus::Query => Focus::Url,
            Focus::Results => Focus::Query,
        }
    }
}

/// Front-end cursor: which control has focus, which result is selected and
/// how far its panels are scrolled. Not part of the view state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiCursor {
    pub focus: Focus,
    pub selected: usize,
    pub panel_scroll: u16,
    pub(crate) shown: Vec<ResultKey>,
}

impl UiCursor {
    /// Resets selection and scrolling whenever a different result set is shown.
    pub fn sync(&mut self, view: &AppViewModel) {
        let same_set = self.shown.len() == view.results.len()
            && self
                .shown
                .iter()
                .zip(&view.results)
                .all(|(key, card)| *key == card.key);
        if !same_set {
            self.shown = view.results.iter().map(|card| card.key.clone()).collect();
            self.selected = 0;
            self.panel_scroll = 0;
        }
    }

    fn select(&mut self, index: usize) {
        if index != self.selected {
            self.selected = index;
            self.panel_scroll = 0;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    /// Feed a message to the core.
    Dispatch(Msg),
    /// Only the cursor changed.
    Redraw,
    Quit,
    Ignored,
}

pub fn handle_key(key: KeyEvent, cursor: &mut UiCursor, view: &AppViewModel) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Tab => {
            cursor.focus = cursor.focus.next();
            return KeyAction::Redraw;
        }
        KeyCode::BackTab => {
            cursor.focus = cursor.focus.prev();
            return KeyAction::Redraw;
        }
        _ => {}
    }

    match cursor.focus {
        Focus::Url => edit_field(key, &view.url, Msg::UrlChanged),
        Focus::Query => edit_field(key, &view.query, Msg::QueryChanged),
        Focus::Results => results_key(key, cursor, view),
    }
}

fn edit_field(key: KeyEvent, current: &str, changed: fn(String) -> Msg) -> KeyAction {
    match key.code {
        KeyCode::Enter => KeyAction::Dispatch(Msg::SubmitClicked),
        KeyCode::Backspace => {
            let mut text = current.to_string();
            if text.pop().is_some() {
                KeyAction::Dispatch(changed(text))
            } else {
                KeyAction::Ignored
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut text = current.to_string();
            text.push(ch);
            KeyAction::Dispatch(changed(text))
        }
        _ => KeyAction::Ignored,
    }
}

fn results_key(key: KeyEvent, cursor: &mut UiCursor, view: &AppViewModel) -> KeyAction {
    let count = view.results.len();
    if count == 0 {
        return KeyAction::Ignored;
    }
    let last = count - 1;
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            cursor.select(cursor.selected.saturating_sub(1));
            KeyAction::Redraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            cursor.select((cursor.selected + 1).min(last));
            KeyAction::Redraw
        }
        KeyCode::Home => {
            cursor.select(0);
            KeyAction::Redraw
        }
        KeyCode::End => {
            cursor.select(last);
            KeyAction::Redraw
        }
        KeyCode::PageDown => {
            cursor.panel_scroll = cursor.panel_scroll.saturating_add(SCROLL_STEP);
            KeyAction::Redraw
        }
        KeyCode::PageUp => {
            cursor.panel_scroll = cursor.panel_scroll.saturating_sub(SCROLL_STEP);
            KeyAction::Redraw
        }
        KeyCode::Enter | KeyCode::Char(' ') => match view.results.get(cursor.selected) {
            Some(card) => KeyAction::Dispatch(Msg::ToggleHtml(card.key.clone())),
            None => KeyAction::Ignored,
        },
        KeyCode::Char('q') => KeyAction::Quit,
        _ => KeyAction::Ignored,
    }
}

#[cfg(test)]
mod tests {
    use sitesearch_core::{update, AppState, ResultItem};

    use super::super::constants::HELP_TEXT;
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_with_results(count: usize) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::UrlChanged("u".into()));
        let (state, _) = update(state, Msg::QueryChanged("q".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let results = (0..count)
            .map(|i| ResultItem {
                id: None,
                path: format!("/{i}"),
                chunk: format!("chunk {i}"),
                html: format!("<p>{i}</p>"),
                score: 0.5,
            })
            .collect();
        let (state, _) = update(
            state,
            Msg::SearchSucceeded {
                request_id: 1,
                results,
            },
        );
        state.view()
    }

    #[test]
    fn typing_appends_to_focused_field() {
        let mut cursor = UiCursor::default();
        let view = AppViewModel {
            url: "http".to_string(),
            ..AppViewModel::default()
        };
        assert_eq!(
            handle_key(press(KeyCode::Char('s')), &mut cursor, &view),
            KeyAction::Dispatch(Msg::UrlChanged("https".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &mut cursor, &view),
            KeyAction::Dispatch(Msg::UrlChanged("htt".to_string()))
        );

        cursor.focus = Focus::Query;
        assert_eq!(
            handle_key(press(KeyCode::Char('c')), &mut cursor, &view),
            KeyAction::Dispatch(Msg::QueryChanged("c".to_string()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Backspace), &mut cursor, &AppViewModel::default()),
            KeyAction::Ignored
        );
    }

    #[test]
    fn enter_in_a_field_submits() {
        let mut cursor = UiCursor::default();
        let view = AppViewModel::default();
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut cursor, &view),
            KeyAction::Dispatch(Msg::SubmitClicked)
        );
    }

    #[test]
    fn tab_cycles_focus_both_ways() {
        let mut cursor = UiCursor::default();
        let view = AppViewModel::default();
        handle_key(press(KeyCode::Tab), &mut cursor, &view);
        assert_eq!(cursor.focus, Focus::Query);
        handle_key(press(KeyCode::Tab), &mut cursor, &view);
        assert_eq!(cursor.focus, Focus::Results);
        handle_key(press(KeyCode::Tab), &mut cursor, &view);
        assert_eq!(cursor.focus, Focus::Url);
        handle_key(press(KeyCode::BackTab), &mut cursor, &view);
        assert_eq!(cursor.focus, Focus::Results);
    }

    #[test]
    fn quit_keys() {
        let mut cursor = UiCursor::default();
        let view = AppViewModel::default();
        assert_eq!(
            handle_key(press(KeyCode::Esc), &mut cursor, &view),
            KeyAction::Quit
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(ctrl_c, &mut cursor, &view), KeyAction::Quit);
    }

    #[test]
    fn results_selection_is_clamped_and_toggles_selected_card() {
        let view = view_with_results(3);
        let mut cursor = UiCursor {
            focus: Focus::Results,
            ..UiCursor::default()
        };
        cursor.sync(&view);

        handle_key(press(KeyCode::Up), &mut cursor, &view);
        assert_eq!(cursor.selected, 0);
        for _ in 0..5 {
            handle_key(press(KeyCode::Down), &mut cursor, &view);
        }
        assert_eq!(cursor.selected, 2);

        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut cursor, &view),
            KeyAction::Dispatch(Msg::ToggleHtml(view.results[2].key.clone()))
        );
        assert_eq!(
            handle_key(press(KeyCode::Char(' ')), &mut cursor, &view),
            KeyAction::Dispatch(Msg::ToggleHtml(view.results[2].key.clone()))
        );
    }

    #[test]
    fn page_keys_scroll_and_reset_on_selection_change() {
        let view = view_with_results(2);
        let mut cursor = UiCursor {
            focus: Focus::Results,
            ..UiCursor::default()
        };
        cursor.sync(&view);
        handle_key(press(KeyCode::PageDown), &mut cursor, &view);
        handle_key(press(KeyCode::PageDown), &mut cursor, &view);
        assert_eq!(cursor.panel_scroll, 2 * SCROLL_STEP);
        handle_key(press(KeyCode::PageUp), &mut cursor, &view);
        assert_eq!(cursor.panel_scroll, SCROLL_STEP);
        handle_key(press(KeyCode::Down), &mut cursor, &view);
        assert_eq!(cursor.panel_scroll, 0);
    }

    #[test]
    fn new_result_set_resets_cursor() {
        let first = view_with_results(3);
        let mut cursor = UiCursor {
            focus: Focus::Results,
            ..UiCursor::default()
        };
        cursor.sync(&first);
        handle_key(press(KeyCode::End), &mut cursor, &first);
        assert_eq!(cursor.selected, 2);

        cursor.sync(&first);
        assert_eq!(cursor.selected, 2);

        cursor.sync(&view_with_results(1));
        assert_eq!(cursor.selected, 0);
        assert_eq!(cursor.focus, Focus::Results);
    }

    #[test]
    fn vim_keys_and_q_work_in_results_only() {
        let view = view_with_results(3);
        let mut cursor = UiCursor {
            focus: Focus::Results,
            ..UiCursor::default()
        };
        cursor.sync(&view);
        handle_key(press(KeyCode::Char('j')), &mut cursor, &view);
        handle_key(press(KeyCode::Char('j')), &mut cursor, &view);
        assert_eq!(cursor.selected, 2);
        handle_key(press(KeyCode::Char('k')), &mut cursor, &view);
        assert_eq!(cursor.selected, 1);
        assert_eq!(
            handle_key(press(KeyCode::Char('q')), &mut cursor, &view),
            KeyAction::Quit
        );

        // In a text field the same keys are typed.
        cursor.focus = Focus::Query;
        assert_eq!(
            handle_key(press(KeyCode::Char('q')), &mut cursor, &view),
            KeyAction::Dispatch(Msg::QueryChanged("qq".to_string()))
        );
    }

    #[test]
    fn help_line_lists_result_bindings() {
        for binding in ["k/j", "q in results", "Space", "PgUp/PgDn"] {
            assert!(HELP_TEXT.contains(binding), "missing {binding}");
        }
    }

    #[test]
    fn results_keys_do_nothing_without_results() {
        let mut cursor = UiCursor {
            focus: Focus::Results,
            ..UiCursor::default()
        };
        assert_eq!(
            handle_key(press(KeyCode::Enter), &mut cursor, &AppViewModel::default()),
            KeyAction::Ignored
        );
    }
}
