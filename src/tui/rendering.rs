use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::rename_engine::ItemKind;
use super::app::App;
use super::models::{PatternChoice, ProcessingStatus, WizardStep};
use super::utils::centered_rect;

pub fn ui(f: &mut Frame, app: &mut App) {
    let size = f.area();

    if app.show_config {
        render_config_screen(f, size, app);
    } else {
        render_main_screen(f, size, app);
    }

    if app.show_help {
        render_help_popup(f, app);
    }
}

fn field_style(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn field_border(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn render_config_screen(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(4),
        ])
        .split(area);

    let title = if app.in_second_phase() {
        "Batch Rename - Pattern"
    } else {
        "Batch Rename - Setup"
    };
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, chunks[0]);

    if app.in_second_phase() {
        render_pattern_form(f, chunks[1], app);
    } else {
        render_setup_form(f, chunks[1], app);
    }

    let instructions_text = match &app.status_message {
        Some(message) => message.clone(),
        None => step_instructions(app).to_string(),
    };
    let instructions = Paragraph::new(instructions_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Keys"));
    f.render_widget(instructions, chunks[2]);
}

fn render_setup_form(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let directory_active = app.wizard_step == WizardStep::Directory;
    let directory_text = if app.directory_input.is_empty() && directory_active {
        "Type a directory path, ~ is expanded".to_string()
    } else {
        app.directory_input.clone()
    };
    let directory_input = Paragraph::new(directory_text)
        .style(field_style(directory_active))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Directory")
                .border_style(field_border(directory_active)),
        );
    f.render_widget(directory_input, form_chunks[0]);

    let kind_active = app.wizard_step == WizardStep::ItemKind;
    let kind_text = if kind_active {
        "Press F for files, D for folders"
    } else {
        match app.item_kind {
            ItemKind::Files => "files",
            ItemKind::Folders => "folders",
        }
    };
    let kind_field = Paragraph::new(kind_text)
        .style(field_style(kind_active))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Rename what")
                .border_style(field_border(kind_active)),
        );
    f.render_widget(kind_field, form_chunks[1]);

    let sort_active = app.wizard_step == WizardStep::SortChoice;
    let sort_text = if sort_active {
        "Press N (name), D (date), S (size), or Enter to keep listing order"
    } else {
        match app.sort_key {
            Some(crate::rename_engine::SortKey::Name) => "by name",
            Some(crate::rename_engine::SortKey::Date) => "by date",
            Some(crate::rename_engine::SortKey::Size) => "by size",
            None => "listing order",
        }
    };
    let sort_field = Paragraph::new(sort_text)
        .style(field_style(sort_active))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sort")
                .border_style(field_border(sort_active)),
        );
    f.render_widget(sort_field, form_chunks[2]);
}

fn render_pattern_form(f: &mut Frame, area: ratatui::layout::Rect, app: &App) {
    let needs_term = matches!(
        app.pattern_choice,
        Some(PatternChoice::Prefix) | Some(PatternChoice::Suffix)
    );

    let mut form_constraints = vec![Constraint::Length(3)];
    if needs_term {
        form_constraints.push(Constraint::Length(3));
    }
    form_constraints.push(Constraint::Min(5));

    let form_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(form_constraints)
        .split(area);

    let pattern_active = app.wizard_step == WizardStep::Pattern;
    let pattern_text = if pattern_active {
        "Press P (prefix), S (suffix), N (numbering)"
    } else {
        match app.pattern_choice {
            Some(PatternChoice::Prefix) => "prefix",
            Some(PatternChoice::Suffix) => "suffix",
            Some(PatternChoice::Numbering) => "numbering",
            None => "",
        }
    };
    let pattern_field = Paragraph::new(pattern_text)
        .style(field_style(pattern_active))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Pattern")
                .border_style(field_border(pattern_active)),
        );
    f.render_widget(pattern_field, form_chunks[0]);

    let mut next_chunk = 1;
    if needs_term {
        let term_active = app.wizard_step == WizardStep::Term;
        let term_field = Paragraph::new(app.term_input.as_str())
            .style(field_style(term_active))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Term")
                    .border_style(field_border(term_active)),
            );
        f.render_widget(term_field, form_chunks[next_chunk]);
        next_chunk += 1;
    }

    let confirm_active = app.wizard_step == WizardStep::Confirm;
    let preview_items: Vec<ListItem> = app
        .pending_ops
        .iter()
        .map(|op| {
            ListItem::new(Line::from(vec![
                Span::styled(op.old_name.clone(), Style::default().fg(Color::White)),
                Span::raw(" -> "),
                Span::styled(op.new_name.clone(), Style::default().fg(Color::Green)),
            ]))
        })
        .collect();
    let preview = List::new(preview_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Planned renames ({})", app.pending_ops.len()))
            .border_style(field_border(confirm_active)),
    );
    f.render_widget(preview, form_chunks[next_chunk]);
}

fn render_main_screen(f: &mut Frame, area: ratatui::layout::Rect, app: &mut App) {
    let show_gauge = app.current_processing.is_some() || app.finished;
    let constraints = if show_gauge {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(3),
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let directory = app.expanded_directory();
    let header = Paragraph::new(format!("Batch Rename - {}", directory))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let badge = match app.selection_badge(&entry.name) {
                Some(n) => format!("[{:>2}] ", n),
                None => "[  ] ".to_string(),
            };
            let badge_style = if app.selection_badge(&entry.name).is_some() {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut spans = vec![
                Span::styled(badge, badge_style),
                Span::styled(entry.name.clone(), Style::default().fg(Color::White)),
            ];

            if let Some(new_name) = &entry.new_name {
                spans.push(Span::raw(" -> "));
                spans.push(Span::styled(
                    new_name.clone(),
                    Style::default().fg(Color::Green),
                ));
            }

            match entry.status {
                ProcessingStatus::Pending => {}
                ProcessingStatus::Processing => {
                    spans.push(Span::styled(
                        "  ...",
                        Style::default().fg(Color::Yellow),
                    ));
                }
                ProcessingStatus::Success => {
                    spans.push(Span::styled("  ok", Style::default().fg(Color::Green)));
                }
                ProcessingStatus::Error => {
                    let message = entry
                        .error_message
                        .clone()
                        .unwrap_or_else(|| "failed".to_string());
                    spans.push(Span::styled(
                        format!("  failed: {}", message),
                        Style::default().fg(Color::Red),
                    ));
                }
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_title = format!(
        "{} ({} listed, {} selected)",
        match app.item_kind {
            ItemKind::Files => "Files",
            ItemKind::Folders => "Folders",
        },
        app.entries.len(),
        app.selection.len()
    );
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[1], &mut app.list_state);

    let mut footer_chunk = 2;
    if show_gauge {
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title("Progress"))
            .gauge_style(Style::default().fg(Color::Green))
            .ratio(app.processing_progress.clamp(0.0, 1.0));
        f.render_widget(gauge, chunks[footer_chunk]);
        footer_chunk += 1;
    }

    let footer_text = if let Some(message) = &app.status_message {
        message.clone()
    } else if app.finished {
        format!(
            "Done: {} renamed, {} failed - press Q to quit",
            app.stats.successful, app.stats.failed
        )
    } else {
        "Space select - A all - C clear - J/K move - Enter pattern - Q quit - H help".to_string()
    };
    let footer = Paragraph::new(footer_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, chunks[footer_chunk]);
}

fn step_instructions(app: &App) -> &'static str {
    match app.wizard_step {
        WizardStep::Directory => "Type the directory path, Enter to continue - Esc quit",
        WizardStep::ItemKind => "F files, D folders - Left back - Esc quit",
        WizardStep::SortChoice => {
            "N name, D date, S size - Enter keeps listing order - Left back"
        }
        WizardStep::Pattern => "P prefix, S suffix, N numbering - Left back to selection",
        WizardStep::Term => {
            "Type the term, Enter to continue - an empty term leaves names unchanged"
        }
        WizardStep::Confirm => "Enter applies the renames - Left/Backspace go back - Esc quit",
    }
}

fn render_help_popup(f: &mut Frame, _app: &App) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let help_lines = vec![
        Line::from("Navigation"),
        Line::from("  Up/Down, J/K   move through the listing"),
        Line::from("  Space          select / deselect (order matters for numbering)"),
        Line::from("  A              select everything in display order"),
        Line::from("  C              clear the selection"),
        Line::from(""),
        Line::from("Wizard"),
        Line::from("  Enter          confirm the current step"),
        Line::from("  Left/Backspace previous step"),
        Line::from(""),
        Line::from("General"),
        Line::from("  H              toggle this help"),
        Line::from("  Q or Esc       quit"),
    ];

    let help = Paragraph::new(help_lines)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(help, area);
}
