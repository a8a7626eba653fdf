#![forbid(unsafe_code)]

pub mod error;
pub mod progress_tracker;
pub mod quiz_page;
pub mod theme_switcher;

pub use error::PageError;
pub use progress_tracker::ProgressTracker;
pub use quiz_page::QuizPage;
pub use theme_switcher::ThemeSwitcher;
