use std::sync::Arc;

use storage::repository::{InMemoryStore, KeyValueStore};

use super::test_harness::setup_view_harness;

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_initial_progress() {
    let mut harness = setup_view_harness(Arc::new(InMemoryStore::new())).await;
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Amphibian basics"), "missing title in {html}");
    assert!(html.contains("0 / 4"), "missing label in {html}");
    assert!(html.contains("width: 0%"), "missing fill width in {html}");
    assert!(html.contains("Anura"), "missing choice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_applies_saved_theme() {
    let store = Arc::new(InMemoryStore::new());
    store.set_item("app_theme", "dark").await.unwrap();

    let mut harness = setup_view_harness(store).await;
    harness.rebuild();
    let html = harness.render();

    assert!(
        html.contains(r#"class="quiz-root" data-theme="dark""#),
        "missing theme attribute in {html}"
    );
    assert!(html.contains("theme-dot active"), "missing active dot in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_reflects_answers_made_before_mount() {
    let mut harness = setup_view_harness(Arc::new(InMemoryStore::new())).await;
    let input = {
        let page = harness.ctx.page();
        let page = page.lock().await;
        page.dom().element_by_id("q0-c0").unwrap()
    };
    let vm = harness.ctx.select_answer(input).await.unwrap();
    assert_eq!(vm.progress.as_ref().map(|p| p.width.as_str()), Some("25%"));

    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("1 / 4"), "missing label in {html}");
    assert!(html.contains("width: 25%"), "missing fill width in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn theme_click_through_context_updates_view_model() {
    let store = Arc::new(InMemoryStore::new());
    let harness = setup_view_harness(store.clone()).await;
    let dot = {
        let vm = harness.ctx.load_vm().await;
        vm.themes
            .iter()
            .find(|dot| dot.name == "light")
            .map(|dot| dot.node)
            .unwrap()
    };

    let vm = harness.ctx.click(dot).await.unwrap();
    assert_eq!(vm.theme.as_deref(), Some("light"));
    assert_eq!(
        store.get_item("app_theme").await.unwrap().as_deref(),
        Some("light")
    );
}
