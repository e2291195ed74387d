use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::AnswerMap;

use super::{option_label, render_controls, render_notice};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(question), Some(answers)) = (app.current_question(), app.answers()) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_strip(frame, chunks[1], app, answers);
    render_question_text(frame, chunks[2], app.current_question_number(), question.text());
    render_options(
        frame,
        chunks[3],
        question.options(),
        app.selected_option(),
        answers.get(app.current_question_index()),
    );
    render_notice(frame, chunks[4], app.notice());

    let controls = if app.is_complete() {
        "j/k choose  ·  enter select  ·  h/l prev/next  ·  s submit  ·  b back  ·  q quit"
    } else {
        "j/k choose  ·  enter select  ·  h/l prev/next  ·  answer all to submit  ·  b back  ·  q quit"
    };
    render_controls(frame, chunks[5], controls);
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "answered {}/{}",
        app.answered_count(),
        app.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

/// One cell per question: answered ones in green, the current one bold.
fn render_question_strip(frame: &mut Frame, area: Rect, app: &App, answers: &AnswerMap) {
    let current = app.current_question_index();
    let spans: Vec<Span> = (0..app.total_questions())
        .map(|index| {
            let mut style = if answers.is_answered(index) {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            if index == current {
                style = style.bold().underlined();
            }
            Span::styled(format!("{} ", index + 1), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_question_text(frame: &mut Frame, area: Rect, number: usize, text: &str) {
    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Question {number}"),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(text, Style::default().fg(Color::White).bold())),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &[String],
    cursor: usize,
    chosen: Option<usize>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (index, option) in options.iter().enumerate() {
        let is_cursor = index == cursor;
        let is_chosen = chosen == Some(index);
        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_chosen {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = if is_chosen { "●" } else { "○" };

        lines.push(Line::from(vec![
            Span::styled(format!(" {marker} {check} "), style),
            Span::styled(format!("{}. ", option_label(index)), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
