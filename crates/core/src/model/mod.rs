mod progress;
mod quiz;
mod theme;

pub use progress::{Progress, parse_total};
pub use quiz::{Choice, Question, Quiz, QuizError};
pub use theme::{ThemeError, ThemeName, ThemePreference};
