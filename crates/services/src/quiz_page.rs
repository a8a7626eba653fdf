use std::sync::Arc;

use quiz_core::config::PageConfig;
use quiz_core::dom::{Dom, DomError, DomEvent, EventKind, NodeId};
use quiz_core::model::{Progress, ThemeName};
use storage::repository::KeyValueStore;
use tracing::trace;

use crate::error::PageError;
use crate::progress_tracker::ProgressTracker;
use crate::theme_switcher::ThemeSwitcher;

/// A loaded quiz page: the document plus the behaviors listening on it.
///
/// All events go through `dispatch`, one delegated subscription per event
/// kind. Each call finishes before the next one can start because it holds
/// `&mut self`.
pub struct QuizPage {
    dom: Dom,
    progress: Option<ProgressTracker>,
    theme: ThemeSwitcher,
}

impl QuizPage {
    /// Initialize both behaviors on `dom`: restore the saved theme, then
    /// render progress once so pre-checked answers show up immediately.
    ///
    /// # Errors
    ///
    /// Returns `PageError` only on an internal document inconsistency.
    pub async fn load(
        mut dom: Dom,
        store: Arc<dyn KeyValueStore>,
        config: &PageConfig,
    ) -> Result<Self, PageError> {
        let mut theme = ThemeSwitcher::new(store, config.theme.clone());
        theme.restore(&mut dom).await?;

        let progress = ProgressTracker::attach(&dom, &config.progress);
        if let Some(tracker) = &progress {
            tracker.update_progress(&mut dom)?;
        }

        Ok(Self {
            dom,
            progress,
            theme,
        })
    }

    #[must_use]
    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    /// Mutable access for structural changes such as adding sections. Such
    /// edits are picked up by the next event.
    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    #[must_use]
    pub fn progress_tracker(&self) -> Option<&ProgressTracker> {
        self.progress.as_ref()
    }

    #[must_use]
    pub fn current_theme(&self) -> Option<&ThemeName> {
        self.theme.current()
    }

    /// Recompute progress without an event. `None` when the page has no tracker.
    ///
    /// # Errors
    ///
    /// Returns `PageError` only on an internal document inconsistency.
    pub fn refresh_progress(&mut self) -> Result<Option<Progress>, PageError> {
        match &self.progress {
            Some(tracker) => Ok(Some(tracker.update_progress(&mut self.dom)?)),
            None => Ok(None),
        }
    }

    /// Deliver `event` to whichever behavior listens for its kind.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Dom` if the event target is not part of this page.
    pub async fn dispatch(&mut self, event: DomEvent) -> Result<(), PageError> {
        if !self.dom.contains(event.target) {
            return Err(DomError::UnknownNode(event.target).into());
        }
        trace!(kind = ?event.kind, target = %event.target, "dispatch");

        match event.kind {
            EventKind::Change => {
                if let Some(tracker) = &self.progress {
                    if tracker.handles(&self.dom, &event) {
                        tracker.update_progress(&mut self.dom)?;
                    }
                }
            }
            EventKind::Click => {
                self.theme.on_click(&mut self.dom, &event).await?;
            }
        }
        Ok(())
    }

    /// A click on any element.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Dom` if `target` is not part of this page.
    pub async fn click(&mut self, target: NodeId) -> Result<(), PageError> {
        self.dispatch(DomEvent::click(target)).await
    }

    /// A user click on an answer input: the default toggle, then `click`,
    /// then `change` when the checked state actually moved.
    ///
    /// # Errors
    ///
    /// Returns `PageError::Dom` if `input` is not part of this page.
    pub async fn select_answer(&mut self, input: NodeId) -> Result<bool, PageError> {
        let changed = self.dom.activate(input)?;
        self.dispatch(DomEvent::click(input)).await?;
        if changed {
            self.dispatch(DomEvent::change(input)).await?;
        }
        Ok(changed)
    }
}
