use quiz_core::config::ProgressConfig;
use quiz_core::dom::{Dom, DomError, DomEvent, EventKind, NodeId, Selector};
use quiz_core::model::{Progress, parse_total};
use tracing::trace;

/// Keeps the progress fill and the `answered / total` label in sync with the
/// checked answers in the document.
///
/// Stateless between events apart from the handles resolved at attach time:
/// every update recounts from the document.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: f64,
    clamp: bool,
    fill: Option<NodeId>,
    label: Option<NodeId>,
    sections: Selector,
    checked: Selector,
    trigger: Selector,
}

impl ProgressTracker {
    /// Resolve the progress container and its parts.
    ///
    /// Returns `None` when the page has no container, in which case there is
    /// nothing to track.
    #[must_use]
    pub fn attach(dom: &Dom, config: &ProgressConfig) -> Option<Self> {
        let container = dom.element_by_id(&config.container_id)?;
        let total = parse_total(dom.attr(container, &config.total_attr));
        let fill = dom.query_selector(container, &Selector::class(config.fill_class.as_str()));
        let label = dom.query_selector(container, &Selector::class(config.text_class.as_str()));
        trace!(
            total,
            has_fill = fill.is_some(),
            has_label = label.is_some(),
            "progress tracker attached"
        );

        Some(Self {
            total,
            clamp: config.clamp_percent,
            fill,
            label,
            sections: Selector::attr(config.question_attr.as_str()),
            checked: Selector::checked_choice_input(),
            trigger: Selector::choice_input(),
        })
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of question sections holding at least one checked radio or checkbox.
    #[must_use]
    pub fn count_answered(&self, dom: &Dom) -> u32 {
        let answered = dom
            .query_selector_all(dom.root(), &self.sections)
            .into_iter()
            .filter(|section| dom.query_selector(*section, &self.checked).is_some())
            .count();
        u32::try_from(answered).unwrap_or(u32::MAX)
    }

    /// Recount and write the fill width and the label text.
    ///
    /// # Errors
    ///
    /// Returns `DomError` if `dom` is not the document the tracker attached to.
    pub fn update_progress(&self, dom: &mut Dom) -> Result<Progress, DomError> {
        let progress = Progress::new(self.count_answered(dom), self.total);
        if let Some(fill) = self.fill {
            dom.set_style(fill, "width", progress.fill_width(self.clamp))?;
        }
        if let Some(label) = self.label {
            dom.set_text(label, progress.label())?;
        }
        trace!(
            answered = progress.answered(),
            total = progress.total(),
            "progress updated"
        );
        Ok(progress)
    }

    /// Whether `event` should trigger a recount: a change on a radio or checkbox.
    #[must_use]
    pub fn handles(&self, dom: &Dom, event: &DomEvent) -> bool {
        event.kind == EventKind::Change && dom.matches(event.target, &self.trigger)
    }
}
