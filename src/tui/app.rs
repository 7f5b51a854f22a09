use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::rename_engine::{ItemKind, RenameEngine, RenameOp, SortKey};
use super::models::{EntryItem, PatternChoice, ProcessingStats, WizardStep};

#[derive(Debug)]
pub struct App {
    pub entries: Vec<EntryItem>,
    pub selection: Vec<String>,
    pub list_state: ListState,
    pub show_config: bool,
    pub wizard_step: WizardStep,
    pub directory_input: String,
    pub directory_preset: bool,
    pub item_kind: ItemKind,
    pub sort_key: Option<SortKey>,
    pub pattern_choice: Option<PatternChoice>,
    pub term_input: String,
    pub pending_ops: Vec<RenameOp>,
    pub engine: Option<RenameEngine>,
    pub show_help: bool,
    pub finished: bool,
    pub current_processing: Option<usize>,
    pub processing_progress: f64,
    pub stats: ProcessingStats,
    pub start_time: Option<Instant>,
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
}

impl App {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            entries: Vec::new(),
            selection: Vec::new(),
            list_state,
            show_config: true,
            wizard_step: WizardStep::Directory,
            directory_input: String::new(),
            directory_preset: false,
            item_kind: ItemKind::Files,
            sort_key: None,
            pattern_choice: None,
            term_input: String::new(),
            pending_ops: Vec::new(),
            engine: None,
            show_help: false,
            finished: false,
            current_processing: None,
            processing_progress: 0.0,
            stats: ProcessingStats::default(),
            start_time: None,
            status_message: None,
            status_message_time: None,
        }
    }

    pub fn with_directory(directory: String) -> Self {
        let mut app = Self::new();
        app.directory_input = directory;
        app.directory_preset = true;
        app.wizard_step = WizardStep::ItemKind;
        app
    }

    /// The directory the user typed, with `~` expanded.
    pub fn expanded_directory(&self) -> String {
        shellexpand::tilde(self.directory_input.trim()).into_owned()
    }

    pub fn in_text_input(&self) -> bool {
        self.show_config
            && matches!(self.wizard_step, WizardStep::Directory | WizardStep::Term)
    }

    /// The pattern half of the wizard, entered from the selection screen.
    pub fn in_second_phase(&self) -> bool {
        matches!(
            self.wizard_step,
            WizardStep::Pattern | WizardStep::Term | WizardStep::Confirm
        )
    }

    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.entries.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.entries.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    pub fn clear_status_message_if_expired(&mut self) {
        if let (Some(_), Some(time)) = (&self.status_message, self.status_message_time) {
            if time.elapsed() > Duration::from_secs(3) {
                self.status_message = None;
                self.status_message_time = None;
            }
        }
    }

    /// Toggles the highlighted entry in and out of the selection. The
    /// toggle order is the selection order Numbering will use.
    pub fn toggle_selected(&mut self) {
        let Some(index) = self.list_state.selected() else {
            return;
        };
        let Some(entry) = self.entries.get(index) else {
            return;
        };

        let name = entry.name.clone();
        if let Some(pos) = self.selection.iter().position(|n| n == &name) {
            self.selection.remove(pos);
        } else {
            self.selection.push(name);
        }
    }

    pub fn select_all(&mut self) {
        self.selection = self.entries.iter().map(|e| e.name.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 1-based position of a name within the selection, for the list badge.
    pub fn selection_badge(&self, name: &str) -> Option<usize> {
        self.selection.iter().position(|n| n == name).map(|p| p + 1)
    }

    pub fn begin_pattern_config(&mut self) {
        if self.selection.is_empty() {
            self.set_status_message("Nothing selected yet".to_string());
            return;
        }
        self.show_config = true;
        self.wizard_step = WizardStep::Pattern;
    }

    /// Single-key and text input while the wizard is visible. Returns
    /// true when a sort key was chosen and the listing should be loaded.
    pub fn handle_config_input(&mut self, c: char) -> bool {
        match self.wizard_step {
            WizardStep::Directory => {
                self.directory_input.push(c);
                false
            }
            WizardStep::ItemKind => {
                match c {
                    'f' | 'F' => {
                        self.item_kind = ItemKind::Files;
                        self.advance_step();
                    }
                    'd' | 'D' => {
                        self.item_kind = ItemKind::Folders;
                        self.advance_step();
                    }
                    _ => {}
                }
                false
            }
            WizardStep::SortChoice => match c {
                'n' | 'N' => {
                    self.sort_key = Some(SortKey::Name);
                    true
                }
                'd' | 'D' => {
                    self.sort_key = Some(SortKey::Date);
                    true
                }
                's' | 'S' => {
                    self.sort_key = Some(SortKey::Size);
                    true
                }
                _ => false,
            },
            WizardStep::Pattern => {
                match c {
                    'p' | 'P' => {
                        self.pattern_choice = Some(PatternChoice::Prefix);
                        self.advance_step();
                    }
                    's' | 'S' => {
                        self.pattern_choice = Some(PatternChoice::Suffix);
                        self.advance_step();
                    }
                    'n' | 'N' => {
                        self.pattern_choice = Some(PatternChoice::Numbering);
                        self.advance_step();
                    }
                    _ => {}
                }
                false
            }
            WizardStep::Term => {
                self.term_input.push(c);
                false
            }
            WizardStep::Confirm => false,
        }
    }

    pub fn advance_step(&mut self) {
        self.wizard_step = match self.wizard_step {
            WizardStep::Directory => WizardStep::ItemKind,
            WizardStep::ItemKind => WizardStep::SortChoice,
            // SortChoice leaves the wizard through the listing load
            WizardStep::SortChoice => WizardStep::SortChoice,
            WizardStep::Pattern => match self.pattern_choice {
                Some(PatternChoice::Numbering) => WizardStep::Confirm,
                _ => WizardStep::Term,
            },
            WizardStep::Term => WizardStep::Confirm,
            WizardStep::Confirm => WizardStep::Confirm,
        };

        if self.wizard_step == WizardStep::Confirm {
            self.compute_preview();
        }
    }

    pub fn go_back_step(&mut self) {
        match self.wizard_step {
            WizardStep::Directory => {}
            WizardStep::ItemKind => {
                if !self.directory_preset {
                    self.wizard_step = WizardStep::Directory;
                }
            }
            WizardStep::SortChoice => {
                self.wizard_step = WizardStep::ItemKind;
            }
            WizardStep::Pattern => {
                // Back to the selection screen
                self.show_config = false;
            }
            WizardStep::Term => {
                self.wizard_step = WizardStep::Pattern;
            }
            WizardStep::Confirm => {
                self.clear_preview();
                self.wizard_step = match self.pattern_choice {
                    Some(PatternChoice::Numbering) => WizardStep::Pattern,
                    _ => WizardStep::Term,
                };
            }
        }
    }

    pub fn handle_backspace(&mut self) {
        match self.wizard_step {
            WizardStep::Directory => {
                self.directory_input.pop();
            }
            WizardStep::Term => {
                self.term_input.pop();
            }
            _ => self.go_back_step(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
