//! Single-choice selection control
//!
//! The control resolves its initial value from the owner's value, the stored
//! preference for its key, and its [`DefaultPolicy`], in that order. Each
//! committed selection is written to the preference store, passed to the
//! optional observer, and returned to the owner as
//! [`Action::SelectionChanged`].

use crate::action::Action;
use crate::component::Component;
use crate::model::preferences::SharedPreferences;
use crate::model::selection::{DefaultPolicy, DropdownOption, SelectionChange, SelectionState};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Rows shown at once when the list is open
const MAX_VISIBLE_OPTIONS: u16 = 10;

type ChangeObserver = Box<dyn FnMut(&SelectionChange)>;

pub struct Dropdown {
    control_id: String,
    label: String,
    policy: DefaultPolicy,
    prefs: SharedPreferences,
    state: SelectionState,
    on_change: Option<ChangeObserver>,
    pub focused: bool,
    open: bool,
    cursor: usize,
    list_state: ListState,
    /// Where the closed control was last drawn; the open list hangs below it
    anchor: Rect,
}

impl Dropdown {
    pub fn new(
        control_id: &str,
        label: &str,
        options: Vec<DropdownOption>,
        external: Option<&str>,
        policy: DefaultPolicy,
        prefs: SharedPreferences,
    ) -> Self {
        let stored = prefs.get(control_id);
        let state = SelectionState::resolve(external, stored.as_deref(), options, &policy);

        Self {
            control_id: control_id.to_string(),
            label: label.to_string(),
            policy,
            prefs,
            state,
            on_change: None,
            focused: false,
            open: false,
            cursor: 0,
            list_state: ListState::default(),
            anchor: Rect::default(),
        }
    }

    /// Call `observer` after every committed selection
    pub fn with_observer(mut self, observer: impl FnMut(&SelectionChange) + 'static) -> Self {
        self.on_change = Some(Box::new(observer));
        self
    }

    pub fn value(&self) -> Option<&str> {
        self.state.value.as_deref()
    }

    #[cfg(test)]
    pub fn options(&self) -> &[DropdownOption] {
        &self.state.options
    }

    /// Replace the option list, keeping the current value if it still fits
    pub fn set_options(&mut self, options: Vec<DropdownOption>) {
        let current = self.state.value.clone();
        let stored = self.prefs.get(&self.control_id);
        self.state =
            SelectionState::resolve(current.as_deref(), stored.as_deref(), options, &self.policy);
        self.open = false;
    }

    /// Commit the option at `index`
    ///
    /// Returns `None` without side effects when there is no such option.
    pub fn select(&mut self, index: usize) -> Option<SelectionChange> {
        let option = self.state.options.get(index)?.clone();

        self.state.value = Some(option.value.clone());
        self.prefs.set(&self.control_id, &option.value);

        let change = SelectionChange {
            control_id: self.control_id.clone(),
            index,
            value: option.value,
        };
        if let Some(observer) = self.on_change.as_mut() {
            observer(&change);
        }
        Some(change)
    }

    fn open_list(&mut self) {
        if self.state.options.is_empty() {
            return;
        }
        self.open = true;
        self.cursor = self.state.selected_index().unwrap_or(0);
    }

    fn move_cursor(&mut self, delta: isize) {
        let last = self.state.options.len().saturating_sub(1);
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Draw the open option list over whatever is below the control
    ///
    /// Owners call this after drawing everything else so the list stays on top.
    pub fn draw_popup(&mut self, frame: &mut Frame) {
        if !self.open {
            return;
        }

        let screen = frame.area();
        let top = self.anchor.y.saturating_add(self.anchor.height);
        let available = screen.height.saturating_sub(top);
        let wanted = self.state.options.len().min(MAX_VISIBLE_OPTIONS as usize) as u16 + 2;
        let height = wanted.min(available);
        if height < 3 {
            return;
        }

        let popup = Rect::new(self.anchor.x, top, self.anchor.width, height);
        frame.render_widget(Clear, popup);

        let items: Vec<ListItem> = self
            .state
            .options
            .iter()
            .map(|o| ListItem::new(o.label.clone()))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        self.list_state.select(Some(self.cursor));
        frame.render_stateful_widget(list, popup, &mut self.list_state);
    }
}

impl Component for Dropdown {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if !self.open {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                self.open_list();
            }
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_cursor(1);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_cursor(-1);
                None
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.cursor = 0;
                None
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.state.options.len().saturating_sub(1);
                None
            }
            KeyCode::Enter => {
                self.open = false;
                self.select(self.cursor).map(Action::SelectionChanged)
            }
            KeyCode::Esc => {
                self.open = false;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn captures_input(&self) -> bool {
        self.open
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.anchor = area;

        let border_color = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };

        let content = match self.state.display_label() {
            Some(label) => Line::from(vec![
                Span::styled(label.to_string(), Style::default().fg(Color::White)),
                Span::styled(" ▾", Style::default().fg(Color::DarkGray)),
            ]),
            None => Line::from(Span::styled(
                "(no options)",
                Style::default().fg(Color::DarkGray),
            )),
        };

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color))
                .title(format!(" {} ", self.label))
                .title_style(Style::default().fg(border_color)),
        );

        frame.render_widget(paragraph, area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render_to_text;
    use crate::model::preferences::{MemoryPreferenceStore, PreferenceStore};
    use crossterm::event::KeyModifiers;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Counts writes so tests can assert one write per selection
    #[derive(Default)]
    struct CountingStore {
        inner: MemoryPreferenceStore,
        writes: Cell<usize>,
    }

    impl PreferenceStore for CountingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) {
            self.writes.set(self.writes.get() + 1);
            self.inner.set(key, value);
        }
    }

    fn quarters() -> Vec<DropdownOption> {
        vec![
            DropdownOption::new("20221", "W22"),
            DropdownOption::new("20222", "S22"),
            DropdownOption::new("20223", "M22"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_mount_precedence() {
        let store = Rc::new(MemoryPreferenceStore::new());
        store.set("Test.Quarter", "20221");

        let external = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            quarters(),
            Some("20222"),
            DefaultPolicy::Last,
            store.clone(),
        );
        assert_eq!(external.value(), Some("20222"));

        let stored = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            quarters(),
            None,
            DefaultPolicy::Last,
            store.clone(),
        );
        assert_eq!(stored.value(), Some("20221"));

        let fresh = Dropdown::new(
            "Other.Quarter",
            "Quarter",
            quarters(),
            None,
            DefaultPolicy::Last,
            store,
        );
        assert_eq!(fresh.value(), Some("20223"));
    }

    #[test]
    fn test_select_writes_once_and_reports_once() {
        let store = Rc::new(CountingStore::default());
        let observed = Rc::new(RefCell::new(Vec::new()));
        let sink = observed.clone();

        let mut dropdown = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            quarters(),
            None,
            DefaultPolicy::First,
            store.clone(),
        )
        .with_observer(move |change| sink.borrow_mut().push(change.clone()));

        let change = dropdown.select(1).unwrap();
        assert_eq!(change.value, "20222");
        assert_eq!(change.index, 1);
        assert_eq!(dropdown.value(), Some("20222"));
        assert_eq!(store.writes.get(), 1);
        assert_eq!(store.get("Test.Quarter").as_deref(), Some("20222"));
        assert_eq!(*observed.borrow(), vec![change]);
    }

    #[test]
    fn test_keyboard_selection() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let mut dropdown = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            quarters(),
            None,
            DefaultPolicy::First,
            store,
        );

        assert_eq!(dropdown.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        assert!(dropdown.open);
        assert!(dropdown.captures_input());

        dropdown.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        dropdown.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        dropdown.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        let action = dropdown.handle_key_event(key(KeyCode::Enter)).unwrap();

        assert_eq!(
            action,
            Some(Action::SelectionChanged(SelectionChange {
                control_id: "Test.Quarter".to_string(),
                index: 2,
                value: "20223".to_string(),
            }))
        );
        assert!(!dropdown.open);
    }

    #[test]
    fn test_escape_cancels_without_writing() {
        let store = Rc::new(CountingStore::default());
        let mut dropdown = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            quarters(),
            None,
            DefaultPolicy::First,
            store.clone(),
        );

        dropdown.handle_key_event(key(KeyCode::Enter)).unwrap();
        dropdown.handle_key_event(key(KeyCode::Down)).unwrap();
        assert_eq!(dropdown.handle_key_event(key(KeyCode::Esc)).unwrap(), None);

        assert_eq!(dropdown.value(), Some("20221"));
        assert_eq!(store.writes.get(), 0);
    }

    #[test]
    fn test_empty_options() {
        let store = Rc::new(CountingStore::default());
        let mut dropdown = Dropdown::new(
            "Test.Quarter",
            "Quarter",
            Vec::new(),
            None,
            DefaultPolicy::Last,
            store.clone(),
        );

        assert_eq!(dropdown.value(), None);
        assert_eq!(dropdown.select(0), None);
        dropdown.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert!(!dropdown.open);
        assert_eq!(store.writes.get(), 0);

        let text = render_to_text(30, 3, |frame| {
            let area = frame.area();
            dropdown.draw(frame, area).unwrap();
        });
        assert!(text.contains("(no options)"));
    }

    #[test]
    fn test_set_options_keeps_pending_value() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let mut dropdown = Dropdown::new(
            "Test.Subject",
            "Subject",
            Vec::new(),
            Some("CMPSC"),
            DefaultPolicy::First,
            store,
        );
        assert_eq!(dropdown.value(), Some("CMPSC"));

        dropdown.set_options(vec![
            DropdownOption::new("ANTH", "ANTH - Anthropology"),
            DropdownOption::new("CMPSC", "CMPSC - Computer Science"),
        ]);
        assert_eq!(dropdown.value(), Some("CMPSC"));

        dropdown.set_options(vec![DropdownOption::new("ANTH", "ANTH - Anthropology")]);
        assert_eq!(dropdown.value(), Some("ANTH"));
    }

    #[test]
    fn test_open_list_with_huge_option_count() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let options = (0..65_536)
            .map(|i| DropdownOption::new(i.to_string(), format!("opt {}", i)))
            .collect();
        let mut dropdown = Dropdown::new(
            "Test.Many",
            "Many",
            options,
            None,
            DefaultPolicy::First,
            store,
        );
        dropdown.handle_key_event(key(KeyCode::Enter)).unwrap();

        let text = render_to_text(30, 16, |frame| {
            dropdown.draw(frame, Rect::new(0, 0, 30, 3)).unwrap();
            dropdown.draw_popup(frame);
        });
        assert!(text.contains("▶ opt 0"));
        assert!(text.contains("opt 9"));
    }

    #[test]
    fn test_renders_label_and_open_list() {
        let store = Rc::new(MemoryPreferenceStore::new());
        let mut dropdown = Dropdown::new(
            "Test.Quarter",
            "Start Quarter",
            quarters(),
            None,
            DefaultPolicy::Last,
            store,
        );
        dropdown.handle_key_event(key(KeyCode::Enter)).unwrap();

        let text = render_to_text(30, 10, |frame| {
            dropdown.draw(frame, Rect::new(0, 0, 30, 3)).unwrap();
            dropdown.draw_popup(frame);
        });
        assert!(text.contains("Start Quarter"));
        assert!(text.contains("M22 ▾"));
        assert!(text.contains("W22"));
        assert!(text.contains("S22"));
    }
}
