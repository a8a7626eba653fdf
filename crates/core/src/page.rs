//! Builds the quiz page document following the markup contract read by the
//! progress tracker and the theme switcher.

use crate::config::PageConfig;
use crate::dom::{Dom, DomError, NodeId};
use crate::error::Error;
use crate::model::{Quiz, ThemeName};

pub const QUIZ_FORM_ID: &str = "quiz-form";
pub const THEME_PICKER_CLASS: &str = "theme-picker";
pub const QUESTION_TEXT_CLASS: &str = "question-text";
pub const CHOICE_CLASS: &str = "choice";

pub struct PageBuilder<'a> {
    config: &'a PageConfig,
    themes: Vec<ThemeName>,
}

impl<'a> PageBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            themes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_themes(mut self, themes: impl IntoIterator<Item = ThemeName>) -> Self {
        self.themes.extend(themes);
        self
    }

    /// Render `quiz` into a fresh document.
    ///
    /// The progress total is the number of questions. Question `i` is a
    /// section whose inputs share the name `q{i}`.
    ///
    /// # Errors
    ///
    /// Only fails on an internal `DomError`, which a fresh document never produces.
    pub fn build(&self, quiz: &Quiz) -> Result<Dom, DomError> {
        let mut dom = Dom::new();
        let body = dom.create_element(dom.root(), "body", no_attrs())?;

        let header = dom.create_element(body, "header", no_attrs())?;
        let title = dom.create_element(header, "h1", no_attrs())?;
        dom.set_text(title, quiz.title.as_str())?;
        if !quiz.description.is_empty() {
            let description = dom.create_element(header, "p", [("class", "description")])?;
            dom.set_text(description, quiz.description.as_str())?;
        }
        self.theme_picker(&mut dom, header)?;
        self.progress(&mut dom, body, quiz.questions.len())?;
        self.questions(&mut dom, body, quiz)?;

        Ok(dom)
    }

    /// Parse and validate a quiz definition, then render it.
    ///
    /// # Errors
    ///
    /// Returns `Error::Quiz` for malformed or blank definitions.
    pub fn build_json(&self, raw: &str) -> Result<(Quiz, Dom), Error> {
        let quiz = Quiz::from_json(raw)?;
        let dom = self.build(&quiz)?;
        Ok((quiz, dom))
    }

    fn theme_picker(&self, dom: &mut Dom, parent: NodeId) -> Result<(), DomError> {
        if self.themes.is_empty() {
            return Ok(());
        }
        let theme = &self.config.theme;
        let nav = dom.create_element(parent, "nav", [("class", THEME_PICKER_CLASS)])?;
        for name in &self.themes {
            let dot = dom.create_element(
                nav,
                "button",
                [
                    ("type", "button".to_string()),
                    ("class", theme.selector_class.clone()),
                    (theme.name_attr.as_str(), name.to_string()),
                    ("title", name.to_string()),
                ],
            )?;
            let swatch = dom.create_element(dot, "span", [("class", "swatch")])?;
            dom.set_text(swatch, name.as_str())?;
        }
        Ok(())
    }

    fn progress(&self, dom: &mut Dom, parent: NodeId, total: usize) -> Result<(), DomError> {
        let progress = &self.config.progress;
        let wrap = dom.create_element(
            parent,
            "div",
            [
                ("id", progress.container_id.clone()),
                (progress.total_attr.as_str(), total.to_string()),
            ],
        )?;
        let bar = dom.create_element(wrap, "div", [("class", "progress-bar")])?;
        dom.create_element(bar, "div", [("class", progress.fill_class.as_str())])?;
        dom.create_element(wrap, "span", [("class", progress.text_class.as_str())])?;
        Ok(())
    }

    fn questions(&self, dom: &mut Dom, parent: NodeId, quiz: &Quiz) -> Result<(), DomError> {
        let form = dom.create_element(parent, "form", [("id", QUIZ_FORM_ID)])?;
        for (index, question) in quiz.questions.iter().enumerate() {
            let section = dom.create_element(
                form,
                "section",
                [
                    ("class", "question".to_string()),
                    (self.config.progress.question_attr.as_str(), index.to_string()),
                ],
            )?;
            let text = dom.create_element(section, "p", [("class", QUESTION_TEXT_CLASS)])?;
            dom.set_text(text, question.text.as_str())?;

            let kind = if question.multiple { "checkbox" } else { "radio" };
            let name = format!("q{index}");
            for (choice_index, choice) in question.choices.iter().enumerate() {
                let label = dom.create_element(section, "label", [("class", CHOICE_CLASS)])?;
                dom.create_element(
                    label,
                    "input",
                    [
                        ("type", kind.to_string()),
                        ("name", name.clone()),
                        ("value", choice_index.to_string()),
                        ("id", format!("{name}-c{choice_index}")),
                    ],
                )?;
                let caption = dom.create_element(label, "span", no_attrs())?;
                dom.set_text(caption, choice.text.as_str())?;
            }
        }
        Ok(())
    }
}

fn no_attrs() -> [(&'static str, &'static str); 0] {
    []
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{InputKind, Selector};
    use crate::model::QuizError;

    fn themes() -> Vec<ThemeName> {
        ["light", "dark"]
            .into_iter()
            .map(|t| ThemeName::new(t).unwrap())
            .collect()
    }

    #[test]
    fn builds_from_json_definition() {
        let config = PageConfig::default();
        let raw = r#"{
            "title": "Frogs",
            "questions": [
                { "text": "Tailless?", "choices": [ { "text": "yes" }, { "text": "no" } ] },
                { "text": "Pick all", "multiple": true, "choices": [ { "text": "a" } ] }
            ]
        }"#;
        let (quiz, dom) = PageBuilder::new(&config).build_json(raw).unwrap();

        assert_eq!(quiz.title, "Frogs");
        let wrap = dom.element_by_id("progress-wrap").unwrap();
        assert_eq!(dom.attr(wrap, "data-total"), Some("2"));
        let multi = dom.element_by_id("q1-c0").unwrap();
        assert_eq!(dom.input_kind(multi), Some(InputKind::Checkbox));
    }

    #[test]
    fn json_errors_surface_as_quiz_errors() {
        let config = PageConfig::default();
        let builder = PageBuilder::new(&config);
        assert!(matches!(
            builder.build_json(r#"{ "title": "" }"#),
            Err(Error::Quiz(QuizError::EmptyTitle))
        ));
        assert!(matches!(
            builder.build_json("not json"),
            Err(Error::Quiz(QuizError::Json(_)))
        ));
    }

    #[test]
    fn builds_progress_container_with_question_total() {
        let config = PageConfig::default();
        let dom = PageBuilder::new(&config).build(&Quiz::sample()).unwrap();

        let wrap = dom.element_by_id("progress-wrap").unwrap();
        assert_eq!(dom.attr(wrap, "data-total"), Some("4"));
        assert!(dom
            .query_selector(wrap, &Selector::class("progress-fill"))
            .is_some());
        assert!(dom
            .query_selector(wrap, &Selector::class("progress-text"))
            .is_some());
    }

    #[test]
    fn questions_render_radios_or_checkboxes() {
        let config = PageConfig::default();
        let dom = PageBuilder::new(&config).build(&Quiz::sample()).unwrap();

        let sections = dom.query_selector_all(dom.root(), &Selector::attr("data-question"));
        assert_eq!(sections.len(), 4);
        let multi = sections[2];
        let inputs = dom.query_selector_all(multi, &Selector::choice_input());
        assert_eq!(inputs.len(), 3);
        assert!(inputs
            .iter()
            .all(|input| dom.input_kind(*input) == Some(InputKind::Checkbox)));
        assert_eq!(dom.attr(inputs[0], "name"), Some("q2"));
        assert!(inputs.iter().all(|input| !dom.is_checked(*input)));
    }

    #[test]
    fn theme_dots_carry_names() {
        let config = PageConfig::default();
        let dom = PageBuilder::new(&config)
            .with_themes(themes())
            .build(&Quiz::sample())
            .unwrap();

        let dots = dom.query_selector_all(dom.root(), &Selector::class("theme-dot"));
        let names: Vec<_> = dots
            .iter()
            .filter_map(|dot| dom.attr(*dot, "data-theme"))
            .collect();
        assert_eq!(names, vec!["light", "dark"]);
    }

    #[test]
    fn no_themes_means_no_picker() {
        let config = PageConfig::default();
        let dom = PageBuilder::new(&config).build(&Quiz::sample()).unwrap();
        assert!(dom
            .query_selector(dom.root(), &Selector::class(THEME_PICKER_CLASS))
            .is_none());
    }
}
