use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::KeyCode;
use metric_trainer::{
    runtime::{key_events, Runner, TestEventSource, TrainerEvent},
    AnswerInput, Category, CategorySelection, DifficultyMode, QuestionEngine, Session, Step,
};

// Headless integration using the runtime + Session without a TTY.
// Lines are assembled from key events the way the TUI does before they reach the core.
fn read_line(runner: &Runner<TestEventSource>) -> Option<String> {
    let mut line = String::new();
    for _ in 0..1000u32 {
        match runner.step() {
            TrainerEvent::Key(key) => match key.code {
                KeyCode::Enter => return Some(line),
                KeyCode::Char(c) => line.push(c),
                KeyCode::Backspace => {
                    line.pop();
                }
                _ => {}
            },
            TrainerEvent::Resize | TrainerEvent::Tick => {}
        }
    }
    None
}

fn runner_with(script: &str) -> Runner<TestEventSource> {
    let (tx, rx) = mpsc::channel();
    for event in key_events(script) {
        tx.send(event).unwrap();
    }
    Runner::new(TestEventSource::new(rx), Duration::from_millis(1))
}

#[test]
fn headless_session_grades_and_reports() {
    let runner = runner_with("xa\nac\n");

    // first line is rejected, the session only starts on a valid selection
    let first = read_line(&runner).unwrap();
    assert!(CategorySelection::parse(&first).is_err());
    let selection = CategorySelection::parse(&read_line(&runner).unwrap()).unwrap();

    let mut session = Session::new(
        selection,
        QuestionEngine::new(DifficultyMode::WholeNumbers, Some(8)),
        Some(4),
    );
    session.start().unwrap();

    let mut correct = 0;
    while let Some(question) = session.current().cloned() {
        assert!(matches!(
            question.category,
            Category::Distance | Category::Temperature
        ));
        assert_eq!(question.value, question.value.round());

        // alternate right and wildly wrong answers
        let answer = if session.asked() % 2 == 1 {
            correct += 1;
            question.correct_answer
        } else {
            question.correct_answer.abs() * 2.0 + 100.0
        };
        match session.submit(AnswerInput::Value(answer)).unwrap() {
            Step::Graded { grade, .. } => {
                assert_eq!(grade.is_correct, answer == question.correct_answer)
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    assert!(session.is_finished());
    let report = session.report();
    assert_eq!(report.overall.total, 4);
    assert_eq!(report.overall.correct, correct);
    assert_eq!(report.overall_percent, Some(50.0));
}

#[test]
fn headless_skip_and_quit_lines() {
    let runner = runner_with("skip\nnope\nquit\n");
    let mut session = Session::new(
        CategorySelection::all(),
        QuestionEngine::new(DifficultyMode::Easy, Some(3)),
        None,
    );
    session.start().unwrap();

    let mut steps = Vec::new();
    while let Some(line) = read_line(&runner) {
        let step = session.submit(AnswerInput::parse(&line)).unwrap();
        let done = step == Step::Finished;
        steps.push(step);
        if done {
            break;
        }
    }

    assert!(matches!(steps[0], Step::Skipped { .. }));
    assert_eq!(steps[1], Step::Rejected);
    assert_eq!(steps[2], Step::Finished);
    assert!(!session.report().has_data());
}

#[test]
fn runner_ticks_when_idle() {
    let runner = runner_with("");
    assert!(read_line(&runner).is_none());
}
