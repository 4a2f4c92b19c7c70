pub mod screen;

use metric_trainer::{catalog::Category, session::Step, stats::SessionReport};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;
const INPUT_PREFIX: &str = "> ";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn italic_dim() -> Style {
    Style::default()
        .add_modifier(Modifier::ITALIC)
        .add_modifier(Modifier::DIM)
}

/// Whole numbers print bare, everything else with two decimals
pub fn format_amount(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

fn frame_chunks(area: Rect, body: u16) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(3),    // header
            Constraint::Min(body),    // body
            Constraint::Length(1),    // input
            Constraint::Length(1),    // notice
            Constraint::Length(1),    // legend
        ])
        .split(area)
}

fn header_line(app: &App) -> String {
    let mut parts = vec![format!("mode: {}", app.settings.mode)];
    if let Some(session) = app.session.as_ref() {
        let overall = session.stats().overall();
        parts.push(format!("score: {}/{}", overall.correct, overall.total));
        match session.question_limit() {
            Some(limit) => parts.push(format!("question {} of {}", session.asked(), limit)),
            None => parts.push(format!("question {}", session.asked())),
        }
    }
    parts.join("  |  ")
}

fn render_header(app: &App, f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Span::styled(header_line(app), bold()))
        .block(Block::default().borders(Borders::ALL).title("Metric Trainer"))
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

fn render_input(app: &App, f: &mut Frame, area: Rect) {
    let line = format!("{INPUT_PREFIX}{}", app.input);
    f.render_widget(Paragraph::new(Span::styled(line.clone(), bold())), area);
    let x = area.x + (line.width() as u16).min(area.width.saturating_sub(1));
    f.set_cursor_position(Position::new(x, area.y));
}

fn render_notice(app: &App, f: &mut Frame, area: Rect) {
    if let Some(notice) = app.notice.as_deref() {
        let widget = Paragraph::new(Span::styled(
            notice,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
        f.render_widget(widget, area);
    }
}

fn render_legend(text: &str, f: &mut Frame, area: Rect) {
    f.render_widget(Paragraph::new(Span::styled(text, italic_dim())), area);
}

pub fn render_selection(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), Category::COUNT as u16 + 3);
    render_header(app, f, chunks[0]);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled("Select categories:", bold()))];
    lines.extend(
        Category::ALL
            .iter()
            .map(|c| Line::from(format!("  {}) {}", c.shorthand(), c))),
    );
    lines.push(Line::from("  all) All categories"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter choice (e.g. \"b\", \"all\", or \"ac\"):",
        italic_dim(),
    )));
    f.render_widget(Paragraph::new(lines), chunks[1]);

    render_input(app, f, chunks[2]);
    render_notice(app, f, chunks[3]);
    render_legend("(enter) start / (esc)ape", f, chunks[4]);
}

pub fn render_question(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), 3);
    render_header(app, f, chunks[0]);

    if let Some(question) = app.session.as_ref().and_then(|s| s.current()) {
        let body = Paragraph::new(vec![
            Line::from(Span::styled(
                question.category.to_string(),
                Style::default().fg(Color::Magenta),
            )),
            Line::from(""),
            Line::from(Span::styled(question.text.clone(), bold())),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        f.render_widget(body, chunks[1]);
    }

    render_input(app, f, chunks[2]);
    render_notice(app, f, chunks[3]);
    render_legend("(enter) answer / skip / quit / (esc) finish", f, chunks[4]);
}

fn feedback_lines(step: &Step) -> Vec<Line<'static>> {
    let green = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let red = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    match step {
        Step::Graded { question, grade } => {
            let answer = format!(
                "{} {} = {} {}",
                format_amount(question.value),
                question.from.abbreviation,
                format_amount(question.correct_answer),
                question.to.abbreviation
            );
            let mut lines = vec![
                if grade.is_correct {
                    Line::from(Span::styled("Correct!", green))
                } else {
                    Line::from(Span::styled("Incorrect.", red))
                },
                Line::from(""),
                Line::from(answer),
                Line::from(Span::styled(
                    format!(
                        "you said {} (accepted within ±{})",
                        format_amount(grade.submitted),
                        format_amount(question.tolerance)
                    ),
                    italic_dim(),
                )),
            ];
            if let Some(feedback) = grade.feedback {
                lines.push(Line::from(""));
                let mut hint = feedback.to_string();
                if let Some(pct) = grade.percent_error {
                    hint = format!("{hint} (off by {pct:.1}%)");
                }
                lines.push(Line::from(Span::styled(hint, Style::default().fg(Color::Yellow))));
            }
            lines
        }
        Step::Skipped { question } => vec![
            Line::from(Span::styled("Skipped.", Style::default().fg(Color::Yellow))),
            Line::from(""),
            Line::from(format!(
                "{} {} = {} {}",
                format_amount(question.value),
                question.from.abbreviation,
                format_amount(question.correct_answer),
                question.to.abbreviation
            )),
        ],
        Step::Rejected | Step::Finished => vec![],
    }
}

pub fn render_feedback(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), 6);
    render_header(app, f, chunks[0]);

    if let Some(step) = app.last_step.as_ref() {
        let body = Paragraph::new(feedback_lines(step))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(body, chunks[1]);
    }

    render_notice(app, f, chunks[3]);
    render_legend("(any key) continue / (esc) finish", f, chunks[4]);
}

fn summary_table(report: &SessionReport) -> Table<'static> {
    let header = Row::new(vec![
        Cell::from("Category"),
        Cell::from("Correct"),
        Cell::from("Total"),
        Cell::from("Score"),
    ])
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = report
        .categories
        .iter()
        .map(|score| {
            let color = if score.percent >= 80.0 {
                Color::Green
            } else if score.percent >= 50.0 {
                Color::Yellow
            } else {
                Color::Red
            };
            Row::new(vec![
                Cell::from(score.category.to_string()),
                Cell::from(score.tally.correct.to_string()),
                Cell::from(score.tally.total.to_string()),
                Cell::from(format!("{:.1}%", score.percent)).style(Style::default().fg(color)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(14),
            Constraint::Length(9),
            Constraint::Length(7),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("By category"))
}

pub fn render_summary(app: &App, f: &mut Frame) {
    let chunks = frame_chunks(f.area(), 6);
    render_header(app, f, chunks[0]);

    match app.report.as_ref().filter(|r| r.has_data()) {
        Some(report) => {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(3)])
                .split(chunks[1]);

            let mut overall = format!(
                "Overall: {}/{} ({:.1}%)",
                report.overall.correct,
                report.overall.total,
                report.overall_percent.unwrap_or_default()
            );
            if let Some(weakest) = report.weakest().filter(|_| report.categories.len() > 1) {
                overall = format!("{overall}   practice more: {}", weakest.category);
            }
            f.render_widget(
                Paragraph::new(Span::styled(overall, bold())).alignment(Alignment::Center),
                body[0],
            );
            f.render_widget(summary_table(report), body[1]);
        }
        None => {
            f.render_widget(
                Paragraph::new(Span::styled("No questions answered - no data.", italic_dim()))
                    .alignment(Alignment::Center),
                chunks[1],
            );
        }
    }

    render_notice(app, f, chunks[3]);
    render_legend("(n)ew session / (esc)ape", f, chunks[4]);
}
