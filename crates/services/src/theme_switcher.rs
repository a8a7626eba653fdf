use std::sync::Arc;

use quiz_core::config::ThemeConfig;
use quiz_core::dom::{Dom, DomError, DomEvent, EventKind, NodeId, Selector};
use quiz_core::model::{ThemeName, ThemePreference};
use storage::repository::KeyValueStore;
use tracing::debug;

/// Applies the chosen theme to the document root and remembers it in durable
/// storage.
///
/// Storage is best effort: read and write failures are logged and dropped, and
/// the visual change happens regardless.
pub struct ThemeSwitcher {
    store: Arc<dyn KeyValueStore>,
    config: ThemeConfig,
    selector: Selector,
    preference: ThemePreference,
}

impl ThemeSwitcher {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, config: ThemeConfig) -> Self {
        let selector = Selector::class(config.selector_class.as_str());
        Self {
            store,
            config,
            selector,
            preference: ThemePreference::new(),
        }
    }

    /// The theme applied most recently through this switcher.
    #[must_use]
    pub fn current(&self) -> Option<&ThemeName> {
        self.preference.current()
    }

    /// Apply the stored theme, if any. Returns the theme that was applied.
    ///
    /// # Errors
    ///
    /// Returns `DomError` only if the document root cannot be written.
    pub async fn restore(&mut self, dom: &mut Dom) -> Result<Option<ThemeName>, DomError> {
        let stored = match self.store.get_item(&self.config.storage_key).await {
            Ok(value) => value,
            Err(err) => {
                debug!(
                    key = %self.config.storage_key,
                    error = %err,
                    "theme read failed; keeping default"
                );
                None
            }
        };
        let Some(name) = ThemePreference::from_stored(stored) else {
            return Ok(None);
        };
        self.set_theme(dom, name.clone()).await?;
        Ok(Some(name))
    }

    /// Set the root theme attribute, then try to persist the choice.
    ///
    /// # Errors
    ///
    /// Returns `DomError` only if the document root cannot be written.
    pub async fn set_theme(&mut self, dom: &mut Dom, name: ThemeName) -> Result<(), DomError> {
        dom.set_attr(dom.root(), &self.config.root_attr, name.as_str())?;
        if let Err(err) = self
            .store
            .set_item(&self.config.storage_key, name.as_str())
            .await
        {
            debug!(
                theme = %name,
                error = %err,
                "theme write failed; applied without persisting"
            );
        }
        self.preference.select(name);
        Ok(())
    }

    /// Theme named by the nearest theme control at or above `target`.
    #[must_use]
    pub fn theme_for_target(&self, dom: &Dom, target: NodeId) -> Option<ThemeName> {
        let control = dom.closest(target, &self.selector)?;
        let raw = dom.attr(control, &self.config.name_attr)?;
        ThemeName::new(raw).ok()
    }

    /// Handle a click. Returns whether a theme was applied.
    ///
    /// # Errors
    ///
    /// Returns `DomError` only if the document root cannot be written.
    pub async fn on_click(&mut self, dom: &mut Dom, event: &DomEvent) -> Result<bool, DomError> {
        if event.kind != EventKind::Click {
            return Ok(false);
        }
        let Some(name) = self.theme_for_target(dom, event.target) else {
            return Ok(false);
        };
        self.set_theme(dom, name).await?;
        Ok(true)
    }
}
