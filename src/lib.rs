pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exam;
pub mod nav;
pub mod notify;
pub mod practice;
pub mod session;
pub mod types;

pub use api::{ExamApi, HttpExamApi, SubmissionResult};
pub use config::Config;
pub use error::{DrillError, Result};
pub use exam::{ExamRecord, FavoriteSet, IncorrectSet, Question, UserAnswers, Vote};
pub use nav::{
    DisplayLabel, Navigation, NavigationController, OptionToggle, PendingWrite, Subsequences, Tab,
};
pub use notify::{Notifier, Toast, ToastLevel, ToastQueue, TracingNotifier};
pub use practice::PracticeSession;
pub use session::Session;
pub use types::{Direction, QuestionId};
