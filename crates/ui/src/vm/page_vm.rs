use quiz_core::config::PageConfig;
use quiz_core::dom::{Dom, InputKind, NodeId, Selector};
use quiz_core::page::QUESTION_TEXT_CLASS;
use services::QuizPage;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub width: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeDotVm {
    pub node: NodeId,
    pub name: String,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub node: NodeId,
    pub kind: InputKind,
    pub name: String,
    pub label: String,
    pub checked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionVm {
    pub node: NodeId,
    pub question: String,
    pub text: String,
    pub choices: Vec<ChoiceVm>,
}

/// Everything the quiz view renders, read back from the page document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageVm {
    pub title: String,
    pub theme: Option<String>,
    pub progress: Option<ProgressVm>,
    pub themes: Vec<ThemeDotVm>,
    pub sections: Vec<SectionVm>,
}

#[must_use]
pub fn map_page(page: &QuizPage, config: &PageConfig) -> PageVm {
    let dom = page.dom();
    let root = dom.root();
    let theme = dom
        .attr(root, &config.theme.root_attr)
        .map(str::to_owned);

    let title = dom
        .query_selector(root, &Selector::tag("h1"))
        .and_then(|h1| dom.text(h1))
        .unwrap_or_default()
        .to_string();

    let themes = dom
        .query_selector_all(root, &Selector::class(config.theme.selector_class.as_str()))
        .into_iter()
        .filter_map(|node| {
            let name = dom.attr(node, &config.theme.name_attr)?.to_string();
            let active = theme.as_deref() == Some(name.as_str());
            Some(ThemeDotVm { node, name, active })
        })
        .collect();

    let sections = dom
        .query_selector_all(root, &Selector::attr(config.progress.question_attr.as_str()))
        .into_iter()
        .map(|node| map_section(dom, node, config))
        .collect();

    PageVm {
        title,
        theme,
        progress: map_progress(dom, config),
        themes,
        sections,
    }
}

fn map_progress(dom: &Dom, config: &PageConfig) -> Option<ProgressVm> {
    let progress = &config.progress;
    let wrap = dom.element_by_id(&progress.container_id)?;
    let width = dom
        .query_selector(wrap, &Selector::class(progress.fill_class.as_str()))
        .and_then(|fill| dom.style(fill, "width"))
        .unwrap_or("0%")
        .to_string();
    let label = dom
        .query_selector(wrap, &Selector::class(progress.text_class.as_str()))
        .and_then(|text| dom.text(text))
        .unwrap_or_default()
        .to_string();
    Some(ProgressVm { width, label })
}

fn map_section(dom: &Dom, node: NodeId, config: &PageConfig) -> SectionVm {
    let question = dom
        .attr(node, &config.progress.question_attr)
        .unwrap_or_default()
        .to_string();
    let text = dom
        .query_selector(node, &Selector::class(QUESTION_TEXT_CLASS))
        .and_then(|p| dom.text(p))
        .unwrap_or_default()
        .to_string();
    let choices = dom
        .query_selector_all(node, &Selector::choice_input())
        .into_iter()
        .filter_map(|input| {
            Some(ChoiceVm {
                node: input,
                kind: dom.input_kind(input)?,
                name: dom.attr(input, "name").unwrap_or_default().to_string(),
                label: choice_label(dom, input),
                checked: dom.is_checked(input),
            })
        })
        .collect();
    SectionVm {
        node,
        question,
        text,
        choices,
    }
}

/// Caption of an input: the first `span` next to it inside its label, else its value.
fn choice_label(dom: &Dom, input: NodeId) -> String {
    dom.parent(input)
        .and_then(|label| {
            dom.children(label)
                .iter()
                .find(|child| dom.tag_name(**child) == Some("span"))
                .and_then(|span| dom.text(*span))
        })
        .or_else(|| dom.attr(input, "value"))
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quiz_core::model::{Quiz, ThemeName};
    use quiz_core::page::PageBuilder;
    use storage::repository::{InMemoryStore, KeyValueStore};

    use super::*;

    async fn page(store: Arc<InMemoryStore>) -> QuizPage {
        let config = PageConfig::default();
        let dom = PageBuilder::new(&config)
            .with_themes(["light", "dark"].map(|t| ThemeName::new(t).unwrap()))
            .build(&Quiz::sample())
            .unwrap();
        QuizPage::load(dom, store, &config).await.unwrap()
    }

    #[tokio::test]
    async fn maps_sections_and_choices() {
        let page = page(Arc::new(InMemoryStore::new())).await;
        let vm = map_page(&page, &PageConfig::default());

        assert_eq!(vm.title, "Amphibian basics");
        assert_eq!(vm.sections.len(), 4);
        let first = &vm.sections[0];
        assert_eq!(first.question, "0");
        assert_eq!(first.choices.len(), 3);
        assert_eq!(first.choices[0].label, "Anura");
        assert_eq!(first.choices[0].kind, InputKind::Radio);
        assert_eq!(vm.sections[2].choices[0].kind, InputKind::Checkbox);
        assert_eq!(
            vm.progress,
            Some(ProgressVm {
                width: "0%".into(),
                label: "0 / 4".into()
            })
        );
    }

    #[tokio::test]
    async fn marks_active_theme() {
        let store = Arc::new(InMemoryStore::new());
        store.set_item("app_theme", "dark").await.unwrap();
        let page = page(store).await;
        let vm = map_page(&page, &PageConfig::default());

        assert_eq!(vm.theme.as_deref(), Some("dark"));
        let active: Vec<_> = vm
            .themes
            .iter()
            .filter(|dot| dot.active)
            .map(|dot| dot.name.as_str())
            .collect();
        assert_eq!(active, vec!["dark"]);
    }

    #[tokio::test]
    async fn reflects_checked_answers() {
        let mut page = page(Arc::new(InMemoryStore::new())).await;
        let input = page.dom().element_by_id("q1-c0").unwrap();
        page.select_answer(input).await.unwrap();

        let vm = map_page(&page, &PageConfig::default());
        assert!(vm.sections[1].choices[0].checked);
        assert_eq!(vm.progress.unwrap().label, "1 / 4");
    }
}
