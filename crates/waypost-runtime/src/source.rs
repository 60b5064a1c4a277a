#![forbid(unsafe_code)]

//! Step sources: where a tour's step list comes from.
//!
//! | Kind | Source |
//! |------|--------|
//! | [`StepSourceKind::Declarative`] | `data-intro` attributes scanned from the document |
//! | [`StepSourceKind::Explicit`] | a programmatic list of [`StepSpec`]s |
//! | [`StepSourceKind::External`] | a loader closure supplied by the embedder |
//!
//! [`step_source`] turns a kind into a boxed [`StepSource`]; the controller
//! only ever sees the resulting `Vec<Step>`.

use std::fmt;

use waypost_core::{Document, ElementId};
use waypost_layout::{Position, ScrollTo};

use crate::error::StepSourceError;
use crate::options::TourOptions;
use crate::step::{Step, StepSpec, assemble};

/// Attribute names read by the declarative scan.
pub mod attr {
    pub const INTRO: &str = "data-intro";
    pub const STEP: &str = "data-step";
    pub const TITLE: &str = "data-title";
    pub const POSITION: &str = "data-position";
    pub const SCROLL_TO: &str = "data-scroll-to";
    pub const TOOLTIP_CLASS: &str = "data-tooltip-class";
    pub const HIGHLIGHT_CLASS: &str = "data-highlight-class";
    pub const DISABLE_INTERACTION: &str = "data-disable-interaction";
    pub const GROUP: &str = "data-intro-group";
}

/// Produces a tour's step list.
pub trait StepSource: Send + Sync {
    fn load(
        &self,
        document: &dyn Document,
        options: &TourOptions,
    ) -> Result<Vec<Step>, StepSourceError>;
}

/// Loader closure for [`ExternalSteps`].
pub type StepLoader =
    Box<dyn Fn(&dyn Document) -> Result<Vec<StepSpec>, StepSourceError> + Send + Sync>;

/// Scan the document for `data-intro` elements.
///
/// With a root, only the root's descendants are considered.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarativeScan {
    root: Option<ElementId>,
}

impl DeclarativeScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the scan to descendants of `root`.
    pub fn within(root: ElementId) -> Self {
        Self { root: Some(root) }
    }

    pub fn root(&self) -> Option<ElementId> {
        self.root
    }

    fn in_scope(&self, document: &dyn Document, element: ElementId) -> bool {
        match self.root {
            Some(root) => Document::ancestors(&document, element).any(|ancestor| ancestor == root),
            None => true,
        }
    }

    fn spec_for(
        document: &dyn Document,
        element: ElementId,
        intro: String,
    ) -> Result<StepSpec, StepSourceError> {
        let read = |name: &str| document.attribute(element, name);

        let step = match read(attr::STEP) {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<usize>()
                    .map_err(|_| StepSourceError::InvalidStepNumber { value })?,
            ),
            None => None,
        };
        let position = read(attr::POSITION)
            .map(|value| value.parse::<Position>())
            .transpose()
            .map_err(|source| StepSourceError::InvalidPosition {
                step: step.unwrap_or_default(),
                source,
            })?;
        let scroll_to = read(attr::SCROLL_TO)
            .map(|value| value.parse::<ScrollTo>())
            .transpose()
            .map_err(|source| StepSourceError::InvalidPosition {
                step: step.unwrap_or_default(),
                source,
            })?;

        Ok(StepSpec {
            step,
            title: read(attr::TITLE),
            intro,
            element: None,
            element_id: Some(element),
            position,
            scroll_to,
            tooltip_class: read(attr::TOOLTIP_CLASS),
            highlight_class: read(attr::HIGHLIGHT_CLASS),
            disable_interaction: read(attr::DISABLE_INTERACTION)
                .map(|value| matches!(value.trim(), "" | "true" | "1")),
        })
    }
}

impl StepSource for DeclarativeScan {
    fn load(
        &self,
        document: &dyn Document,
        options: &TourOptions,
    ) -> Result<Vec<Step>, StepSourceError> {
        let mut specs = Vec::new();
        for element in document.elements_with_attribute(attr::INTRO) {
            if !self.in_scope(document, element) {
                continue;
            }
            if let Some(group) = &options.group
                && document.attribute(element, attr::GROUP).as_deref() != Some(group.as_str())
            {
                continue;
            }
            if !document.is_connected(element) || document.bounding_box(element).is_empty() {
                tracing::trace!(element = element.0, "skipping hidden step element");
                continue;
            }
            let Some(intro) = document.attribute(element, attr::INTRO) else {
                continue;
            };
            specs.push(Self::spec_for(document, element, intro)?);
        }
        let steps = assemble(specs, options);
        tracing::debug!(count = steps.len(), "scanned declarative steps");
        Ok(steps)
    }
}

/// A fixed, programmatic list of steps.
#[derive(Debug, Clone, Default)]
pub struct ExplicitList {
    specs: Vec<StepSpec>,
}

impl ExplicitList {
    pub fn new(specs: Vec<StepSpec>) -> Self {
        Self { specs }
    }
}

impl StepSource for ExplicitList {
    fn load(
        &self,
        _document: &dyn Document,
        options: &TourOptions,
    ) -> Result<Vec<Step>, StepSourceError> {
        Ok(assemble(self.specs.clone(), options))
    }
}

/// Steps supplied by an embedder-provided loader.
pub struct ExternalSteps {
    loader: StepLoader,
}

impl ExternalSteps {
    pub fn new(
        loader: impl Fn(&dyn Document) -> Result<Vec<StepSpec>, StepSourceError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            loader: Box::new(loader),
        }
    }

    /// Parse a JSON array of step specs.
    #[cfg(feature = "config")]
    pub fn from_json_str(json: &str) -> Result<Vec<StepSpec>, StepSourceError> {
        serde_json::from_str(json).map_err(|e| StepSourceError::External(e.to_string()))
    }
}

impl fmt::Debug for ExternalSteps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalSteps").finish_non_exhaustive()
    }
}

impl StepSource for ExternalSteps {
    fn load(
        &self,
        document: &dyn Document,
        options: &TourOptions,
    ) -> Result<Vec<Step>, StepSourceError> {
        let specs = (self.loader)(document)?;
        Ok(assemble(specs, options))
    }
}

/// Which step source a tour uses.
pub enum StepSourceKind {
    Declarative,
    Explicit(Vec<StepSpec>),
    External(StepLoader),
}

impl fmt::Debug for StepSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declarative => f.write_str("Declarative"),
            Self::Explicit(specs) => f.debug_tuple("Explicit").field(&specs.len()).finish(),
            Self::External(_) => f.write_str("External"),
        }
    }
}

/// Build the step source for `kind`.
pub fn step_source(kind: StepSourceKind) -> Box<dyn StepSource> {
    match kind {
        StepSourceKind::Declarative => Box::new(DeclarativeScan::new()),
        StepSourceKind::Explicit(specs) => Box::new(ExplicitList::new(specs)),
        StepSourceKind::External(loader) => Box::new(ExternalSteps { loader }),
    }
}
