use ratatui::Frame;

use crate::{ui, App, AppState};

/// A UI screen boundary: one per app state
pub trait Screen {
    fn render(&self, app: &App, f: &mut Frame);
}

pub struct SelectionScreen;

impl Screen for SelectionScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_selection(app, f);
    }
}

pub struct QuestionScreen;

impl Screen for QuestionScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_question(app, f);
    }
}

pub struct FeedbackScreen;

impl Screen for FeedbackScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_feedback(app, f);
    }
}

pub struct SummaryScreen;

impl Screen for SummaryScreen {
    fn render(&self, app: &App, f: &mut Frame) {
        ui::render_summary(app, f);
    }
}

pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::SelectCategories => Box::new(SelectionScreen),
        AppState::Asking => Box::new(QuestionScreen),
        AppState::Feedback => Box::new(FeedbackScreen),
        AppState::Summary => Box::new(SummaryScreen),
    }
}
