use crate::config::Config;
use crate::services::quiz::QuizService;
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub quiz: QuizService,
    pub config: Config,
}

impl FromRef<AppState> for QuizService {
    fn from_ref(state: &AppState) -> Self {
        state.quiz.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
