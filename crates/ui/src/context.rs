use std::sync::Arc;

use quiz_core::config::PageConfig;
use quiz_core::dom::NodeId;
use services::{PageError, QuizPage};
use tokio::sync::Mutex;

use crate::vm::{PageVm, map_page};

pub type SharedPage = Arc<Mutex<QuizPage>>;

pub trait UiApp: Send + Sync {
    fn title(&self) -> String;
    fn page_config(&self) -> PageConfig;
    fn page(&self) -> SharedPage;
}

#[derive(Clone)]
pub struct AppContext {
    title: String,
    config: Arc<PageConfig>,
    page: SharedPage,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            title: app.title(),
            config: Arc::new(app.page_config()),
            page: app.page(),
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn page(&self) -> SharedPage {
        Arc::clone(&self.page)
    }

    /// Current view model, if the page is not busy handling an event.
    #[must_use]
    pub fn snapshot(&self) -> Option<PageVm> {
        self.page
            .try_lock()
            .ok()
            .map(|page| map_page(&page, &self.config))
    }

    pub async fn load_vm(&self) -> PageVm {
        let page = self.page.lock().await;
        map_page(&page, &self.config)
    }

    /// Forward a user click on an answer input and return the updated view.
    ///
    /// # Errors
    ///
    /// Returns `PageError` if `input` does not belong to the page.
    pub async fn select_answer(&self, input: NodeId) -> Result<PageVm, PageError> {
        let mut page = self.page.lock().await;
        page.select_answer(input).await?;
        Ok(map_page(&page, &self.config))
    }

    /// Forward a click on any element and return the updated view.
    ///
    /// # Errors
    ///
    /// Returns `PageError` if `target` does not belong to the page.
    pub async fn click(&self, target: NodeId) -> Result<PageVm, PageError> {
        let mut page = self.page.lock().await;
        page.click(target).await?;
        Ok(map_page(&page, &self.config))
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
