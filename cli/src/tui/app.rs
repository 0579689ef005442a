use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::TableState;
use simlab_core::{Event, EventDraft, EventService, InMemoryEventRepository, Phase, Status, Summary};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Input,
    Table,
    Dashboard,
    Report,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Input, Tab::Table, Tab::Dashboard, Tab::Report];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Input => "Input Data",
            Tab::Table => "Table View",
            Tab::Dashboard => "Dashboard",
            Tab::Report => "Report",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    fn previous(&self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Date,
    Scenario,
    Program,
    Semester,
    Staff,
    Phase,
    Type,
    Duration,
    Room,
    NumLearners,
    Technology,
    Status,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Date => "Date (YYYY-MM-DD)",
            Field::Scenario => "Scenario",
            Field::Program => "Program",
            Field::Semester => "Semester",
            Field::Staff => "Staff Member",
            Field::Phase => "Phase",
            Field::Type => "Type",
            Field::Duration => "Duration (hours)",
            Field::Room => "Room",
            Field::NumLearners => "# of Learners",
            Field::Technology => "Technology",
            Field::Status => "Status",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Field::Phase | Field::Type | Field::Status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
    ConfirmDelete(Uuid),
}

/// Blocking message shown over the current tab until a key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
}

pub struct App {
    pub service: EventService<InMemoryEventRepository>,
    pub events: Vec<Event>,
    pub form: EventDraft,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub focus: Field,
    pub cursor_position: usize,
    pub state: TableState,
    pub notice: Option<Notice>,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            service: EventService::new(InMemoryEventRepository::new()),
            events: Vec::new(),
            form: EventDraft::default(),
            tab: Tab::Input,
            input_mode: InputMode::Normal,
            focus: Field::Date,
            cursor_position: 0,
            state: TableState::default(),
            notice: None,
            should_quit: false,
        }
    }

    /// Recomputed on every call; nothing is cached between renders.
    pub fn summary(&self) -> Summary {
        self.service.summary().unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.notice.is_some() {
            self.notice = None;
            return;
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
            InputMode::ConfirmDelete(id) => {
                if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                    self.delete_event(&id);
                }
                self.input_mode = InputMode::Normal;
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.tab = self.tab.next(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => self.tab = self.tab.previous(),
            KeyCode::Char(c @ '1'..='4') => {
                let i = c as usize - '1' as usize;
                self.tab = Tab::ALL[i];
            }
            _ => match self.tab {
                Tab::Input => match key.code {
                    KeyCode::Char('i') | KeyCode::Char('e') | KeyCode::Enter => self.enter_edit_mode(),
                    KeyCode::Char('c') => self.reset_form(),
                    _ => {}
                },
                Tab::Table => match key.code {
                    KeyCode::Down | KeyCode::Char('j') => self.next(),
                    KeyCode::Up | KeyCode::Char('k') => self.previous(),
                    KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
                    _ => {}
                },
                Tab::Dashboard | Tab::Report => {}
            },
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.exit_edit_mode(),
            KeyCode::Enter => self.submit_event(),
            KeyCode::Tab | KeyCode::Down => self.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.focus_previous(),
            KeyCode::Left if self.focus.is_select() => self.cycle_select(false),
            KeyCode::Right | KeyCode::Char(' ') if self.focus.is_select() => self.cycle_select(true),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.focused_text().chars().count(),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Char(c) => self.input_char(c),
            _ => {}
        }
    }

    // --- Form ---

    /// Fields shown for the current phase: Type only for PLANNING/SETUP,
    /// Duration only for RUN.
    pub fn visible_fields(&self) -> Vec<Field> {
        let phase = self.form.phase;
        let mut fields = vec![
            Field::Date,
            Field::Scenario,
            Field::Program,
            Field::Semester,
            Field::Staff,
            Field::Phase,
        ];
        if phase.is_some_and(|p| p.requires_type()) {
            fields.push(Field::Type);
        }
        if phase.is_some_and(|p| p.requires_duration()) {
            fields.push(Field::Duration);
        }
        fields.extend([Field::Room, Field::NumLearners, Field::Technology, Field::Status]);
        fields
    }

    pub fn enter_edit_mode(&mut self) {
        self.input_mode = InputMode::Editing;
        self.set_focus(self.focus);
    }

    pub fn exit_edit_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn reset_form(&mut self) {
        self.form.clear();
        self.set_focus(Field::Date);
    }

    fn set_focus(&mut self, field: Field) {
        self.focus = if self.visible_fields().contains(&field) { field } else { Field::Date };
        self.cursor_position = self.focused_text().chars().count();
    }

    fn focus_next(&mut self) {
        let fields = self.visible_fields();
        let next = match fields.iter().position(|f| *f == self.focus) {
            Some(i) => fields[(i + 1) % fields.len()],
            None => Field::Date,
        };
        self.set_focus(next);
    }

    fn focus_previous(&mut self) {
        let fields = self.visible_fields();
        let previous = match fields.iter().position(|f| *f == self.focus) {
            Some(i) => fields[(i + fields.len() - 1) % fields.len()],
            None => Field::Date,
        };
        self.set_focus(previous);
    }

    /// Text shown for a field, selects included.
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::Phase => self.form.phase.map(|p| p.to_string()).unwrap_or_default(),
            Field::Type => self.form.event_type.map(|t| t.form_label().to_string()).unwrap_or_default(),
            Field::Status => self.form.status.to_string(),
            _ => self.text_field(field).cloned().unwrap_or_default(),
        }
    }

    fn text_field(&self, field: Field) -> Option<&String> {
        match field {
            Field::Date => Some(&self.form.date),
            Field::Scenario => Some(&self.form.scenario),
            Field::Program => Some(&self.form.program),
            Field::Semester => Some(&self.form.semester),
            Field::Staff => Some(&self.form.staff),
            Field::Duration => Some(&self.form.duration),
            Field::Room => Some(&self.form.room),
            Field::NumLearners => Some(&self.form.num_learners),
            Field::Technology => Some(&self.form.technology),
            Field::Phase | Field::Type | Field::Status => None,
        }
    }

    fn text_field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Date => Some(&mut self.form.date),
            Field::Scenario => Some(&mut self.form.scenario),
            Field::Program => Some(&mut self.form.program),
            Field::Semester => Some(&mut self.form.semester),
            Field::Staff => Some(&mut self.form.staff),
            Field::Duration => Some(&mut self.form.duration),
            Field::Room => Some(&mut self.form.room),
            Field::NumLearners => Some(&mut self.form.num_learners),
            Field::Technology => Some(&mut self.form.technology),
            Field::Phase | Field::Type | Field::Status => None,
        }
    }

    pub fn focused_text(&self) -> &str {
        self.text_field(self.focus).map(|s| s.as_str()).unwrap_or("")
    }

    fn cycle_select(&mut self, forward: bool) {
        match self.focus {
            Field::Phase => {
                let options: Vec<Option<Phase>> =
                    std::iter::once(None).chain(Phase::ALL.into_iter().map(Some)).collect();
                let next = cycle(&options, &self.form.phase, forward);
                self.form.set_phase(next);
            }
            Field::Type => {
                if let Some(phase) = self.form.phase {
                    let options: Vec<_> =
                        std::iter::once(None).chain(phase.types().iter().copied().map(Some)).collect();
                    self.form.event_type = cycle(&options, &self.form.event_type, forward);
                }
            }
            Field::Status => {
                self.form.status = cycle(&Status::ALL, &self.form.status, forward);
            }
            _ => {}
        }
    }

    pub fn input_char(&mut self, c: char) {
        let cursor = self.cursor_position;
        if let Some(text) = self.text_field_mut(self.focus) {
            let byte_index = text.chars().take(cursor).map(|c| c.len_utf8()).sum();
            text.insert(byte_index, c);
            self.cursor_position += 1;
        }
    }

    pub fn delete_char(&mut self) {
        let cursor = self.cursor_position;
        if cursor == 0 {
            return;
        }
        if let Some(text) = self.text_field_mut(self.focus) {
            let byte_index: usize = text.chars().take(cursor - 1).map(|c| c.len_utf8()).sum();
            text.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_text().chars().count() {
            self.cursor_position += 1;
        }
    }

    /// Adds the form as an event. On success the form is cleared; on a
    /// validation failure the form is kept and a notice is raised.
    pub fn submit_event(&mut self) {
        match self.service.add_event(&self.form) {
            Ok(event) => {
                log::info!("Added {} event for '{}' ({}h)", event.phase, event.scenario, event.hours);
                self.reload_events();
                self.state.select(Some(0));
                self.reset_form();
            }
            Err(e) => {
                self.notice = Some(Notice {
                    title: "Cannot add event".to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    // --- Table ---

    pub fn next(&mut self) {
        if self.events.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.events.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.events.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.events.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.state.selected().and_then(|i| self.events.get(i))
    }

    /// Asks for confirmation before the selected event is removed.
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_event().map(|e| e.id) {
            self.input_mode = InputMode::ConfirmDelete(id);
        }
    }

    fn delete_event(&mut self, id: &Uuid) {
        let selected = self.state.selected();
        if let Err(e) = self.service.delete_event(id) {
            log::error!("Failed to delete event {}: {}", id, e);
        }
        self.reload_events();

        if self.events.is_empty() {
            self.state.select(None);
        } else if let Some(i) = selected {
            self.state.select(Some(i.min(self.events.len() - 1)));
        }
    }

    fn reload_events(&mut self) {
        if let Ok(events) = self.service.list_events() {
            self.events = events;
        }
    }
}

fn cycle<T: PartialEq + Copy>(options: &[T], current: &T, forward: bool) -> T {
    let len = options.len();
    let i = options.iter().position(|o| o == current).unwrap_or(0);
    let next = if forward { (i + 1) % len } else { (i + len - 1) % len };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use simlab_core::{EventType, ValidationError};

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focus(app: &mut App, field: Field) {
        while app.focus != field {
            press(app, KeyCode::Tab);
        }
    }

    #[test]
    fn test_tab_navigation() {
        let mut app = App::new();
        assert_eq!(app.tab, Tab::Input);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.tab, Tab::Table);
        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.tab, Tab::Report);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.tab, Tab::Input);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.tab, Tab::Report);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_conditional_fields_follow_phase() {
        let mut app = App::new();
        assert!(!app.visible_fields().contains(&Field::Type));
        assert!(!app.visible_fields().contains(&Field::Duration));

        app.form.set_phase(Some(Phase::Setup));
        assert!(app.visible_fields().contains(&Field::Type));
        assert!(!app.visible_fields().contains(&Field::Duration));

        app.form.set_phase(Some(Phase::Run));
        assert!(!app.visible_fields().contains(&Field::Type));
        assert!(app.visible_fields().contains(&Field::Duration));
    }

    #[test]
    fn test_add_planning_event_through_form() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Editing);

        type_text(&mut app, "2024-01-15");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "Cookie");
        focus(&mut app, Field::Phase);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.phase, Some(Phase::Planning));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Field::Type);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.event_type, Some(EventType::New));
        press(&mut app, KeyCode::Enter);

        assert!(app.notice.is_none());
        assert_eq!(app.events.len(), 1);
        assert_eq!(app.events[0].scenario, "Cookie");
        assert_eq!(app.events[0].hours, 4.5);
        assert_eq!(app.form, EventDraft::default());
        assert_eq!(app.focus, Field::Date);
        assert_eq!(app.summary().total_hours, 4.5);
    }

    #[test]
    fn test_rejected_form_raises_notice_and_keeps_fields() {
        let mut app = App::new();
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "2024-01-15");
        focus(&mut app, Field::Phase);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.phase, Some(Phase::Run));
        press(&mut app, KeyCode::Enter);

        let notice = app.notice.clone().unwrap();
        assert_eq!(notice.message, ValidationError::MissingRequired.to_string());
        assert!(app.events.is_empty());
        assert_eq!(app.form.date, "2024-01-15");

        // Any key dismisses the notice without being applied.
        press(&mut app, KeyCode::Char('x'));
        assert!(app.notice.is_none());
        assert_eq!(app.form.phase, Some(Phase::Run));
        assert!(!app.form.date.contains('x'));
    }

    #[test]
    fn test_run_without_duration_is_rejected() {
        let mut app = App::new();
        app.form = EventDraft {
            date: "2024-01-15".to_string(),
            scenario: "Cookie".to_string(),
            phase: Some(Phase::Run),
            ..EventDraft::default()
        };
        app.submit_event();
        assert_eq!(
            app.notice.as_ref().map(|n| n.message.clone()),
            Some("Please enter Duration for RUN phase".to_string())
        );
        assert!(app.events.is_empty());
    }

    #[test]
    fn test_cursor_editing() {
        let mut app = App::new();
        app.enter_edit_mode();
        type_text(&mut app, "2024-0115");
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        type_text(&mut app, "-");
        assert_eq!(app.form.date, "2024-01-15");
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form.date, "2024-01-1");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_status_cycles_without_empty_option() {
        let mut app = App::new();
        app.enter_edit_mode();
        focus(&mut app, Field::Status);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.status, Status::InProgress);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.status, Status::Planned);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.status, Status::Complete);
    }

    fn add_reset(app: &mut App, scenario: &str) {
        app.form = EventDraft {
            date: "2024-01-15".to_string(),
            scenario: scenario.to_string(),
            phase: Some(Phase::Reset),
            ..EventDraft::default()
        };
        app.submit_event();
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut app = App::new();
        add_reset(&mut app, "first");
        add_reset(&mut app, "second");
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.tab, Tab::Table);
        assert_eq!(app.selected_event().map(|e| e.scenario.as_str()), Some("second"));

        press(&mut app, KeyCode::Char('d'));
        assert!(matches!(app.input_mode, InputMode::ConfirmDelete(_)));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.events.len(), 2);

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.events.len(), 1);
        assert_eq!(app.events[0].scenario, "second");
        assert_eq!(app.state.selected(), Some(0));

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert!(app.events.is_empty());
        assert_eq!(app.state.selected(), None);

        // Nothing selected, nothing to confirm.
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
