//! Terminal UI rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use spanmark_core::{highlight, Segment};

use crate::app::{App, Focus, Mode};

// Catppuccin Mocha colors
const BASE: Color = Color::Rgb(30, 30, 46);
const SURFACE0: Color = Color::Rgb(49, 50, 68);
const SURFACE1: Color = Color::Rgb(69, 71, 90);
const CRUST: Color = Color::Rgb(17, 17, 27);
const TEXT: Color = Color::Rgb(205, 214, 244);
const SUBTEXT0: Color = Color::Rgb(166, 173, 200);
const GREEN: Color = Color::Rgb(166, 227, 161);
const BLUE: Color = Color::Rgb(137, 180, 250);
const MAUVE: Color = Color::Rgb(203, 166, 247);
const TEAL: Color = Color::Rgb(148, 226, 213);

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Length(1), // Label bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_label_bar(frame, app, chunks[1]);
    draw_main_area(frame, app, chunks[2]);
    draw_status_bar(frame, app, chunks[3]);

    if app.mode == Mode::Help {
        draw_help(frame);
    }
}

/// Highlight background for a confidence value: the tint scales directly
/// with confidence, so zero reads as no tint over the base background and
/// one as the full accent.
fn confidence_tint(confidence: f64) -> Color {
    let blend = |from: u8, to: u8| -> u8 {
        (from as f64 + (to as f64 - from as f64) * confidence) as u8
    };
    let (r0, g0, b0) = (30u8, 30u8, 46u8); // BASE
    let (r1, g1, b1) = (137u8, 180u8, 250u8); // BLUE
    Color::Rgb(blend(r0, r1), blend(g0, g1), blend(b0, b1))
}

/// Text color that stays readable on the tinted background
fn confidence_fg(confidence: f64) -> Color {
    if confidence > 0.5 {
        CRUST
    } else {
        TEXT
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let doc = &app.session.document;
    let title_text = format!(
        " spanmark - {} [{}/{}] {} | batch: {} | model: {}",
        app.project_id,
        app.active + 1,
        app.documents.len(),
        doc.status.as_str(),
        app.session.batch.len(),
        app.model.as_str(),
    );

    let title_bar = Paragraph::new(title_text).style(Style::default().fg(TEXT).bg(SURFACE0));
    frame.render_widget(title_bar, area);
}

fn draw_label_bar(frame: &mut Frame, app: &App, area: Rect) {
    let schema = app.session.schema();
    let mut spans: Vec<Span> = vec![Span::raw(" ")];

    for (i, label) in schema.labels.iter().enumerate() {
        match schema.shortcut_for(i) {
            Some(key) => {
                spans.push(Span::styled(
                    format!("{}:", key),
                    Style::default().fg(SUBTEXT0),
                ));
                spans.push(Span::styled(
                    label.clone(),
                    Style::default().fg(TEAL).add_modifier(Modifier::BOLD),
                ));
            }
            None => {
                spans.push(Span::styled(label.clone(), Style::default().fg(SUBTEXT0)));
            }
        }
        spans.push(Span::raw("  "));
    }

    if let Some(sel) = app.session.pending_selection() {
        let preview: String = sel.text.chars().take(20).collect();
        spans.push(Span::styled(
            format!("pending: \"{}\"", preview),
            Style::default().fg(GREEN),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_main_area(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),     // Editor
            Constraint::Length(34), // Sidebar
        ])
        .split(area);

    draw_editor(frame, app, chunks[0]);
    draw_sidebar(frame, app, chunks[1]);
}

fn draw_editor(frame: &mut Frame, app: &App, area: Rect) {
    let editor_style = if app.focus == Focus::Editor {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };

    let mode_indicator = match app.mode {
        Mode::Visual => " [VISUAL]",
        _ => "",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(editor_style)
        .title(format!("Document{}", mode_indicator));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if app.mode == Mode::Visual {
        selection_lines(app)
    } else {
        segment_lines(app)
    };

    let cursor = app.editor.position();
    let visible_height = inner.height as usize;
    let scroll_offset = if cursor.0 >= visible_height {
        cursor.0 - visible_height + 1
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(BASE))
        .scroll((scroll_offset as u16, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

/// Editor lines built from the highlight segmentation. Overlapping
/// annotations show up exactly as segmented, duplicated characters and
/// all.
fn segment_lines(app: &App) -> Vec<Line<'static>> {
    let doc = &app.session.document;
    let segs = highlight::segments(&doc.content, &doc.annotations);

    let mut lines: Vec<Line> = Vec::new();
    let mut current: Vec<Span> = Vec::new();

    for seg in &segs {
        let style = match seg {
            Segment::Plain { .. } => Style::default().fg(TEXT),
            Segment::Highlight { confidence, .. } => Style::default()
                .fg(confidence_fg(*confidence))
                .bg(confidence_tint(*confidence))
                .add_modifier(Modifier::UNDERLINED),
        };

        for (i, piece) in seg.text().split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::from(std::mem::take(&mut current)));
            }
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));

    lines
}

/// Per-character rendering during visual mode so the live selection shows
/// on top of existing annotations.
fn selection_lines(app: &App) -> Vec<Line<'static>> {
    let doc = &app.session.document;
    let annotations = doc.annotations_sorted();
    let selection = app.editor.selection_range();

    let mut lines: Vec<Line> = Vec::new();
    let mut offset = 0;

    for line_text in doc.content.split('\n') {
        let mut spans: Vec<Span> = Vec::new();

        for ch in line_text.chars() {
            let mut style = Style::default().fg(TEXT);

            if let Some(ann) = annotations.iter().find(|a| a.span.contains(offset)) {
                style = style
                    .fg(confidence_fg(ann.confidence))
                    .bg(confidence_tint(ann.confidence))
                    .add_modifier(Modifier::UNDERLINED);
            }

            if let Some((start, end)) = selection {
                if offset >= start && offset < end {
                    style = Style::default()
                        .fg(TEXT)
                        .bg(SURFACE1)
                        .add_modifier(Modifier::BOLD);
                }
            }

            spans.push(Span::styled(ch.to_string(), style));
            offset += ch.len_utf8();
        }

        lines.push(Line::from(spans));
        offset += 1; // the newline
    }

    lines
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_document_list(frame, app, chunks[0]);
    draw_annotation_list(frame, app, chunks[1]);
}

fn draw_document_list(frame: &mut Frame, app: &App, area: Rect) {
    let sidebar_style = if app.focus == Focus::Sidebar {
        Style::default().fg(BLUE)
    } else {
        Style::default().fg(SUBTEXT0)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(sidebar_style)
        .title(format!("Documents ({})", app.documents.len()));

    let items: Vec<ListItem> = app
        .documents
        .iter()
        .enumerate()
        .map(|(i, doc)| {
            let selected = i == app.sidebar_selected;
            let marker = if selected { ">" } else { " " };
            let batch_mark = if app.session.batch.contains(&doc.id) {
                "[x]"
            } else {
                "[ ]"
            };
            let active_doc = if i == app.active { "*" } else { " " };

            let preview: String = if i == app.active {
                app.session.document.content.chars().take(18).collect()
            } else {
                doc.content.chars().take(18).collect()
            };

            let line = format!(
                "{}{} {} {}",
                marker,
                active_doc,
                batch_mark,
                preview.replace('\n', " ")
            );

            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn draw_annotation_list(frame: &mut Frame, app: &App, area: Rect) {
    let doc = &app.session.document;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(SUBTEXT0))
        .title(format!("Annotations ({})", doc.annotations.len()));

    let items: Vec<ListItem> = doc
        .annotations_sorted()
        .iter()
        .enumerate()
        .map(|(i, ann)| {
            let selected = i == app.annotation_cursor;
            let marker = if selected { ">" } else { " " };
            let preview: String = ann.text.chars().take(14).collect::<String>().replace('\n', " ");

            let line1 = format!("{} {} \"{}\"", marker, ann.label, preview);
            let line2 = format!("   {}% confident", (ann.confidence * 100.0).round());

            let style = if selected {
                Style::default().fg(TEXT).bg(SURFACE1)
            } else {
                Style::default().fg(TEXT)
            };

            ListItem::new(vec![
                Line::from(Span::styled(line1, style.fg(TEAL))),
                Line::from(Span::styled(line2, style.fg(SUBTEXT0))),
            ])
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_str = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::Visual => "VISUAL",
        Mode::Help => "HELP",
    };

    // Coordinator errors win over transient status messages
    let status = app
        .session
        .coordinator()
        .user_error()
        .or(app.status_message.as_deref())
        .unwrap_or("");

    let help_hint = "v select | 1-9 label | Space mark | S submit | s save | ? help";

    let status_text = format!(
        " {} | {}",
        mode_str,
        if status.is_empty() { help_hint } else { status },
    );

    let status_bar = Paragraph::new(status_text).style(Style::default().fg(SUBTEXT0).bg(SURFACE0));
    frame.render_widget(status_bar, area);
}

fn draw_help(frame: &mut Frame) {
    let area = centered_rect(62, 20, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(BLUE))
        .title("Help (press any key to close)");

    let help_text = vec![
        Line::from(Span::styled(
            "Navigation",
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from("  h/j/k/l  Move cursor"),
        Line::from("  w/b      Word forward/back"),
        Line::from("  g/G      Top/bottom"),
        Line::from("  ]/[      Next/prev annotation"),
        Line::from("  Tab      Toggle editor/sidebar"),
        Line::from(""),
        Line::from(Span::styled(
            "Annotating",
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from("  v        Start selecting"),
        Line::from("  Enter    Keep selection pending"),
        Line::from("  1-9      Label the selection"),
        Line::from("  Esc      Clear selection"),
        Line::from("  s        Save annotations"),
        Line::from(""),
        Line::from(Span::styled(
            "Batch",
            Style::default().fg(MAUVE).add_modifier(Modifier::BOLD),
        )),
        Line::from("  Space    Mark document (sidebar)"),
        Line::from("  m        Switch model"),
        Line::from("  S        Submit marked documents"),
    ];

    let paragraph = Paragraph::new(help_text).block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
