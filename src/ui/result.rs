use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::App;
use crate::models::{AnswerMap, QuestionSet};
use crate::scoring::{AttemptResult, Grade};

use super::{option_label, render_controls};

const QUESTION_PREVIEW_LENGTH: usize = 55;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let (Some(result), Some(questions), Some(answers)) =
        (app.result(), app.questions(), app.answers())
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], result);
    render_question_breakdown(frame, chunks[2], questions, answers, app.result_scroll());
    render_controls(frame, chunks[3], "j/k scroll  ·  r restart  ·  b back to import  ·  q quit");
}

fn grade_color(grade: Option<Grade>, percentage: f64) -> Color {
    match grade {
        Some(Grade::Fail) => Color::Red,
        Some(Grade::Satisfactory) => Color::Yellow,
        Some(Grade::SatisfactoryPlus) => Color::LightYellow,
        Some(Grade::Good) => Color::Green,
        Some(Grade::GoodPlus) => Color::LightGreen,
        Some(Grade::VeryGood) => Color::Cyan,
        None if percentage >= 60.0 => Color::Green,
        None => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, result: &AttemptResult) {
    let color = grade_color(result.grade, result.percentage);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "RESULTS",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!(
                "{} / {}  ({}%)",
                result.score,
                result.total,
                result.percentage_display()
            ),
            Style::default().fg(color).bold(),
        )),
    ];
    if let Some(grade) = result.grade {
        let verdict = if grade.is_passing() { "passed" } else { "not passed" };
        content.push(Line::from(Span::styled(
            format!("{grade}  ·  {verdict}"),
            Style::default().fg(color),
        )));
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_question_breakdown(
    frame: &mut Frame,
    area: Rect,
    questions: &QuestionSet,
    answers: &AnswerMap,
    scroll: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(questions.len() * 2);

    for (index, question) in questions.iter().enumerate() {
        let answer = answers.get(index);
        let is_correct = answer.is_some_and(|a| question.is_correct(a));
        let (symbol, color) = if is_correct {
            ("+", Color::Green)
        } else {
            ("-", Color::Red)
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {symbol} "), Style::default().fg(color)),
            Span::styled(
                format!("{:2}. ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                truncate_question(question.text()),
                Style::default().fg(Color::Gray),
            ),
        ]));

        if !is_correct {
            lines.push(Line::from(Span::styled(
                format!(
                    "       correct: {}. {}",
                    option_label(question.correct_index()),
                    question.correct_option()
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let widget = Paragraph::new(lines)
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));
    frame.render_widget(widget, area);
}

fn truncate_question(text: &str) -> String {
    let char_count = text.chars().count();
    if char_count > QUESTION_PREVIEW_LENGTH {
        let truncated: String = text.chars().take(QUESTION_PREVIEW_LENGTH).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}
