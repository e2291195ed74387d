use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Tabs, Wrap},
};

use crate::app::{App, DraftField, ImportTab};
use crate::manual::{MAX_OPTIONS, QuestionDraft};

use super::{option_label, render_controls, render_notice};

const CURSOR: &str = "█";

const YAML_PLACEHOLDER: &str = "\
questions:
  - question: What is the capital of Poland?
    options:
      - Krakow
      - Warsaw
      - Gdansk
    correct: 1 # Warsaw

  - question: Is the Vistula the longest river in Poland?
    options: [Yes, No]
    correct: 0

# Options are numbered from 0; every question needs at least 2.";

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], app);
    render_tabs(frame, chunks[1], app.tab());

    match app.tab() {
        ImportTab::Yaml => render_yaml_editor(frame, chunks[2], app.yaml_input()),
        ImportTab::Manual => render_manual(frame, chunks[2], app),
        ImportTab::Catalog => render_catalog(frame, chunks[2], app),
    }

    render_notice(frame, chunks[3], app.notice());
    render_controls(frame, chunks[4], controls_for(app));
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        "STUDY QUIZ",
        Style::default().fg(Color::Cyan).bold(),
    )];
    if app.has_questions() {
        spans.push(Span::styled(
            "   questions ready · Ctrl+T start test",
            Style::default().fg(Color::Green),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_tabs(frame: &mut Frame, area: Rect, tab: ImportTab) {
    let selected = match tab {
        ImportTab::Yaml => 0,
        ImportTab::Manual => 1,
        ImportTab::Catalog => 2,
    };
    let widget = Tabs::new(vec!["F1 Import YAML", "F2 Manual", "F3 Catalog"])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(widget, area);
}

fn render_yaml_editor(frame: &mut Frame, area: Rect, input: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .title(" Paste a YAML question set ")
        .padding(Padding::horizontal(1));

    if input.is_empty() {
        let placeholder = Paragraph::new(YAML_PLACEHOLDER)
            .fg(Color::DarkGray)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let text = format!("{input}{CURSOR}");
    let visible = area.height.saturating_sub(2) as usize;
    let line_count = text.split('\n').count();
    let scroll = u16::try_from(line_count.saturating_sub(visible)).unwrap_or(u16::MAX);

    let widget = Paragraph::new(text)
        .fg(Color::White)
        .block(block)
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

fn render_manual(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    render_added_questions(frame, chunks[0], app);
    render_draft(frame, chunks[1], app);
}

fn render_added_questions(frame: &mut Frame, area: Rect, app: &App) {
    let questions = app.builder().questions();
    let mut lines: Vec<Line> = Vec::new();

    if questions.is_empty() {
        lines.push(Line::from("No questions yet.".fg(Color::DarkGray)));
    }
    for (index, question) in questions.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            format!("{}. {}", index + 1, question.text()),
            Style::default().fg(Color::White).bold(),
        )));
        for (option_index, option) in question.options().iter().enumerate() {
            let color = if question.is_correct(option_index) {
                Color::Green
            } else {
                Color::Gray
            };
            lines.push(Line::from(Span::styled(
                format!("   {}. {}", option_label(option_index), option),
                Style::default().fg(color),
            )));
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(format!(" Added ({}) ", questions.len()))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_draft(frame: &mut Frame, area: Rect, app: &App) {
    let draft = app.builder().draft();
    let focus = app.focus();
    let mut lines: Vec<Line> = Vec::with_capacity(draft.options().len() + 4);

    lines.push(Line::from("Question".fg(Color::DarkGray)));
    lines.push(field_line("  ", draft.text(), focus == DraftField::Text));
    lines.push(Line::from(""));
    lines.push(Line::from(
        format!("Answers ({} of {MAX_OPTIONS}, ● marks the correct one)", draft.options().len())
            .fg(Color::DarkGray),
    ));

    for (index, option) in draft.options().iter().enumerate() {
        let marker = if index == draft.correct_index() { "●" } else { "○" };
        let prefix = format!("{marker} {}. ", option_label(index));
        lines.push(field_line(&prefix, option, focus == DraftField::Option(index)));
    }

    lines.push(Line::from(""));
    lines.push(draft_status(draft));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" New question ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn draft_status(draft: &QuestionDraft) -> Line<'static> {
    if draft.is_ready() {
        Line::from("Ready: ctrl+n adds this question".fg(Color::Green))
    } else {
        Line::from("Fill in the question and every answer".fg(Color::DarkGray))
    }
}

fn field_line<'a>(prefix: &str, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![Span::styled(prefix.to_string(), style), Span::styled(value, style)];
    if focused {
        spans.push(Span::styled(CURSOR, style));
    }
    Line::from(spans)
}

fn render_catalog(frame: &mut Frame, area: Rect, app: &App) {
    let catalog = app.catalog();
    let lines: Vec<Line> = if catalog.is_loading() {
        vec![Line::from("Loading...".fg(Color::Yellow))]
    } else if catalog.subjects().is_empty() {
        vec![Line::from("No subjects loaded. Press r to retry.".fg(Color::DarkGray))]
    } else {
        catalog
            .subjects()
            .iter()
            .enumerate()
            .map(|(index, subject)| {
                let is_selected = index == catalog.selected();
                let style = if is_selected {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_selected { ">" } else { " " };
                Line::from(Span::styled(
                    format!(" {marker} {}", subject.display_name()),
                    style,
                ))
            })
            .collect()
    };

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Choose a subject ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn controls_for(app: &App) -> &'static str {
    match app.tab() {
        ImportTab::Yaml => "type or paste YAML  ·  ctrl+s import  ·  ctrl+t start  ·  esc quit",
        ImportTab::Manual => {
            "tab field  ·  ctrl+o/d add/remove answer  ·  ctrl+k correct  ·  ctrl+n add  ·  ctrl+x drop last  ·  ctrl+s save"
        }
        ImportTab::Catalog => "j/k select  ·  enter import  ·  r refresh  ·  ctrl+t start  ·  esc quit",
    }
}
