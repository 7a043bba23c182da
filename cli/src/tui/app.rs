use ratatui::widgets::TableState;
use fleetdash_core::service::driver_filter::{DriverQuery, StatusFilter, ALL_STATUSES};
use fleetdash_core::usecase::driver_directory::distinct_statuses;
use fleetdash_core::DriverRecord;

pub enum InputMode {
    Normal,
    Searching,
}

/// Driver browser state. The full list is injected once; `visible` is
/// recomputed from it after every change to the search text or status.
pub struct App {
    pub drivers: Vec<DriverRecord>,
    pub visible: Vec<DriverRecord>,
    pub statuses: Vec<String>, // "ALL" first, then statuses seen in the data
    pub status_index: usize,
    pub search: String,
    pub state: TableState,
    pub input_mode: InputMode,
    pub cursor_position: usize,
}

impl App {
    pub fn new(drivers: Vec<DriverRecord>, default_status: &str) -> App {
        let mut statuses = vec![ALL_STATUSES.to_string()];
        statuses.extend(distinct_statuses(&drivers).into_iter().filter(|s| s != ALL_STATUSES));
        if !statuses.iter().any(|s| s == default_status) {
            statuses.push(default_status.to_string());
        }
        let status_index = statuses.iter().position(|s| s == default_status).unwrap_or(0);

        let mut app = App {
            drivers,
            visible: Vec::new(),
            statuses,
            status_index,
            search: String::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
        };
        app.refresh();
        app
    }

    pub fn query(&self) -> DriverQuery {
        DriverQuery {
            search: self.search.clone(),
            status: StatusFilter::parse(self.status_label()),
        }
    }

    pub fn status_label(&self) -> &str {
        self.statuses.get(self.status_index).map(|s| s.as_str()).unwrap_or(ALL_STATUSES)
    }

    fn refresh(&mut self) {
        self.visible = self.query().apply(&self.drivers);
        let selected = match self.state.selected() {
            _ if self.visible.is_empty() => None,
            Some(i) if i < self.visible.len() => Some(i),
            Some(_) => Some(self.visible.len() - 1),
            None => Some(0),
        };
        self.state.select(selected);
    }

    pub fn selected_driver(&self) -> Option<&DriverRecord> {
        self.state.selected().and_then(|i| self.visible.get(i))
    }

    pub fn next(&mut self) {
        if self.visible.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.visible.len() - 1 {
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
        if self.visible.is_empty() { return; }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.visible.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn cycle_status(&mut self) {
        self.status_index = (self.status_index + 1) % self.statuses.len();
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.cursor_position = 0;
        self.status_index = 0;
        self.refresh();
    }

    pub fn enter_search_mode(&mut self) {
        self.input_mode = InputMode::Searching;
        self.cursor_position = self.search.chars().count();
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self.search.chars().take(self.cursor_position).map(|c| c.len_utf8()).sum();
        self.search.insert(byte_index, c);
        self.cursor_position += 1;
        self.refresh();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self.search.chars().take(self.cursor_position - 1).map(|c| c.len_utf8()).sum();
            self.search.remove(byte_index);
            self.cursor_position -= 1;
            self.refresh();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.search.chars().count() {
            self.cursor_position += 1;
        }
    }
}
