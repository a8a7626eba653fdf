use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::config::PageConfig;
use quiz_core::model::{Quiz, ThemeName};
use quiz_core::page::PageBuilder;
use services::QuizPage;
use storage::repository::KeyValueStore;
use tokio::sync::Mutex;

use crate::context::{AppContext, SharedPage, UiApp, build_app_context};
use crate::views::QuizView;

struct TestApp {
    page: SharedPage,
}

impl UiApp for TestApp {
    fn title(&self) -> String {
        "Quiz".to_string()
    }

    fn page_config(&self) -> PageConfig {
        PageConfig::default()
    }

    fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    ctx: AppContext,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.ctx.clone());
    rsx! { QuizView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub ctx: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(store: Arc<dyn KeyValueStore>) -> ViewHarness {
    let config = PageConfig::default();
    let document = PageBuilder::new(&config)
        .with_themes(["light", "dark"].map(|t| ThemeName::new(t).expect("theme name")))
        .build(&Quiz::sample())
        .expect("build page");
    let page = QuizPage::load(document, store, &config)
        .await
        .expect("load page");

    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        page: Arc::new(Mutex::new(page)),
    });
    let ctx = build_app_context(&app);

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { ctx: ctx.clone() });

    ViewHarness { dom, ctx }
}
