use dioxus::prelude::*;
use quiz_core::dom::NodeId;
use tracing::warn;

use crate::context::AppContext;
use crate::vm::{ChoiceVm, ProgressVm, SectionVm, ThemeDotVm};

/// The whole quiz page.
///
/// The `.quiz-root` wrapper stands in for the document root: it carries the
/// theme attribute the page model sets on its root element.
#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal({
        let ctx = ctx.clone();
        move || ctx.snapshot()
    });

    // The page was busy at mount time; read it once it is free.
    let ctx_for_load = ctx.clone();
    use_future(move || {
        let ctx = ctx_for_load.clone();
        async move {
            if vm.peek().is_none() {
                vm.set(Some(ctx.load_vm().await));
            }
        }
    });

    let ctx_for_answer = ctx.clone();
    let select_answer = use_callback(move |input: NodeId| {
        let ctx = ctx_for_answer.clone();
        spawn(async move {
            match ctx.select_answer(input).await {
                Ok(next) => vm.set(Some(next)),
                Err(err) => warn!(error = %err, "answer event dropped"),
            }
        });
    });

    let ctx_for_click = ctx.clone();
    let click = use_callback(move |target: NodeId| {
        let ctx = ctx_for_click.clone();
        spawn(async move {
            match ctx.click(target).await {
                Ok(next) => vm.set(Some(next)),
                Err(err) => warn!(error = %err, "click event dropped"),
            }
        });
    });

    let Some(page) = vm.read().clone() else {
        return rsx! {
            div { class: "page loading", "Loading…" }
        };
    };

    rsx! {
        div { class: "quiz-root", "data-theme": page.theme.clone(),
            header {
                h1 { "{page.title}" }
                if !page.themes.is_empty() {
                    nav { class: "theme-picker",
                        for dot in page.themes.iter().cloned() {
                            ThemeDot { key: "{dot.node}", dot, on_pick: click }
                        }
                    }
                }
            }
            if let Some(progress) = page.progress.clone() {
                ProgressBar { progress }
            }
            form { id: "quiz-form",
                for section in page.sections.iter().cloned() {
                    QuestionSection { key: "{section.node}", section, on_select: select_answer }
                }
            }
        }
    }
}

#[component]
fn ThemeDot(dot: ThemeDotVm, on_pick: Callback<NodeId>) -> Element {
    let node = dot.node;
    let class = if dot.active { "theme-dot active" } else { "theme-dot" };
    rsx! {
        button {
            r#type: "button",
            class,
            "data-theme": "{dot.name}",
            title: "{dot.name}",
            onclick: move |_| on_pick.call(node),
            span { class: "swatch", "{dot.name}" }
        }
    }
}

#[component]
fn ProgressBar(progress: ProgressVm) -> Element {
    rsx! {
        div { id: "progress-wrap",
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {progress.width}" }
            }
            span { class: "progress-text", "{progress.label}" }
        }
    }
}

#[component]
fn QuestionSection(section: SectionVm, on_select: Callback<NodeId>) -> Element {
    rsx! {
        section { class: "question", "data-question": "{section.question}",
            p { class: "question-text", "{section.text}" }
            for choice in section.choices.iter().cloned() {
                ChoiceInput { key: "{choice.node}", choice, on_select }
            }
        }
    }
}

#[component]
fn ChoiceInput(choice: ChoiceVm, on_select: Callback<NodeId>) -> Element {
    let node = choice.node;
    rsx! {
        label { class: "choice",
            input {
                r#type: choice.kind.as_str(),
                name: "{choice.name}",
                checked: choice.checked,
                onchange: move |_| on_select.call(node),
            }
            span { "{choice.label}" }
        }
    }
}
