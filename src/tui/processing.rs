use std::time::Instant;

use crate::rename_engine::{
    generate_ops, ConfigBuilder, ListOutcome, OrderedSelection, Pattern, RenameEngine,
};
use super::app::App;
use super::models::{EntryItem, ExitIntent, PatternChoice, ProcessingStats, ProcessingStatus};

impl App {
    /// Builds the engine from the wizard inputs, lists the directory and
    /// sorts it. `None` means the listing is on screen; any `Some` ends
    /// the run once the terminal is restored.
    pub fn load_entries(&mut self) -> Option<ExitIntent> {
        let config = match ConfigBuilder::new()
            .directory(self.expanded_directory())
            .item_kind(self.item_kind)
            .build()
        {
            Ok(config) => config,
            Err(e) => return Some(ExitIntent::Fatal(e.to_string())),
        };

        let engine = RenameEngine::new(config);

        let names = match engine.list_items() {
            Ok(ListOutcome::Found(names)) => names,
            Ok(ListOutcome::Empty) => {
                return Some(ExitIntent::EmptyListing {
                    item_kind: self.item_kind,
                    directory: engine.config().directory.clone(),
                });
            }
            Err(e) => return Some(ExitIntent::Fatal(e.to_string())),
        };

        let sorted = engine.sort_entries(self.sort_key, &names);
        self.entries = sorted.into_iter().map(EntryItem::pending).collect();
        self.selection.clear();
        self.engine = Some(engine);
        self.list_state.select(Some(0));
        self.show_config = false;

        None
    }

    pub fn build_pattern(&self) -> Option<Pattern> {
        match self.pattern_choice? {
            PatternChoice::Prefix => Some(Pattern::Prefix {
                term: self.term_input.clone(),
            }),
            PatternChoice::Suffix => Some(Pattern::Suffix {
                term: self.term_input.clone(),
            }),
            PatternChoice::Numbering => Some(Pattern::Numbering),
        }
    }

    /// Generates the ops for the current selection and mirrors the new
    /// names into the list so the confirm screen can show them.
    pub fn compute_preview(&mut self) {
        let Some(pattern) = self.build_pattern() else {
            return;
        };

        let selection = OrderedSelection::new(self.selection.clone());
        self.pending_ops = generate_ops(&selection, &pattern);

        for entry in &mut self.entries {
            entry.new_name = None;
        }
        for op in &self.pending_ops {
            if let Some(entry) = self.entries.iter_mut().find(|e| e.name == op.old_name) {
                entry.new_name = Some(op.new_name.clone());
            }
        }
    }

    pub fn clear_preview(&mut self) {
        self.pending_ops.clear();
        for entry in &mut self.entries {
            entry.new_name = None;
        }
    }

    /// Applies the pending ops one at a time, in selection order. A
    /// failed item is marked and the batch keeps going.
    pub async fn process_selection(&mut self) {
        if self.pending_ops.is_empty() {
            return;
        }
        let Some(engine) = &self.engine else {
            return;
        };

        self.start_time = Some(Instant::now());
        self.stats = ProcessingStats {
            total: self.pending_ops.len(),
            ..Default::default()
        };

        let ops = self.pending_ops.clone();
        let total = ops.len();

        for (index, op) in ops.iter().enumerate() {
            let position = self.entries.iter().position(|e| e.name == op.old_name);

            if let Some(pos) = position {
                self.entries[pos].status = ProcessingStatus::Processing;
            }
            self.current_processing = position;
            self.processing_progress = index as f64 / total as f64;

            let outcome = engine.apply_rename(op).await;

            if let Some(pos) = position {
                if outcome.success {
                    self.entries[pos].status = ProcessingStatus::Success;
                } else {
                    self.entries[pos].status = ProcessingStatus::Error;
                    self.entries[pos].error_message = outcome.error_message;
                }
            }

            if outcome.success {
                self.stats.successful += 1;
            } else {
                self.stats.failed += 1;
            }
            self.stats.processed += 1;
        }

        self.current_processing = None;
        self.processing_progress = 1.0;
        self.finished = true;

        let summary = format!(
            "Renamed {} of {} items ({} failed)",
            self.stats.successful, self.stats.total, self.stats.failed
        );
        self.set_status_message(summary);
    }
}
