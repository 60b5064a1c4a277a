#![forbid(unsafe_code)]

//! Overlay render controller: glue between steps, layout, and the surface
//! that actually draws.
//!
//! Each pass resolves the anchor, reads the viewport, decides a placement,
//! assigns edges, and paints. The first paint uses the surface's nominal
//! size; if the painted overlay reports a different size the layout is
//! recomputed with the real one and painted again when it moved.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;
use waypost_core::{Document, ElementId, Offset, Rect, Size};
use waypost_layout::{
    Edges, HighlightRect, Placement, Position, highlight_rect, resolve_offset, scroll_adjustment,
};

use crate::options::TourOptions;
use crate::step::{Anchor, Step};

/// Host document shared between the tour and the render controller.
pub type SharedDocument = Arc<dyn Document + Send + Sync>;

/// What the overlay shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayContent {
    pub title: Option<String>,
    pub text: String,
    /// Declared step number, for the badge.
    pub step_number: Option<usize>,
    pub total: usize,
    pub hint: bool,
}

/// Everything the surface needs to draw one overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayFrame {
    /// Index of the step shown; `None` for hints.
    pub step: Option<usize>,
    pub content: OverlayContent,
    /// Resolved anchor; `None` when floating.
    pub anchor: Option<ElementId>,
    pub anchor_offset: Offset,
    pub placement: Placement,
    pub edges: Edges,
    /// Size the layout was computed with.
    pub overlay_size: Size,
    /// Document-relative for anchored overlays, viewport-relative when
    /// floating.
    pub overlay_rect: Rect,
    pub highlight: Option<HighlightRect>,
    /// Interaction-blocking layer over the anchor.
    pub blocker: Option<HighlightRect>,
    /// Vertical page scroll the host should apply.
    pub scroll_by: Option<f64>,
    pub tooltip_class: Option<String>,
    pub highlight_class: Option<String>,
    pub refresh: u64,
}

/// Rendering collaborator.
#[async_trait]
pub trait OverlaySurface: Send + Sync {
    /// Size to lay out with before anything is painted.
    fn nominal_size(&self, content: &OverlayContent) -> Size;

    /// Paint (or move) the overlay and report its realized size.
    async fn paint(&self, frame: &OverlayFrame) -> Size;

    /// Remove any painted overlay.
    fn remove(&self);
}

struct Request<'a> {
    step: Option<usize>,
    anchor: &'a Anchor,
    position: Position,
    content: OverlayContent,
    hint_mode: bool,
    scroll: Option<waypost_layout::ScrollTo>,
    disable_interaction: bool,
    tooltip_class: Option<&'a str>,
    highlight_class: Option<&'a str>,
    refresh: u64,
}

/// Positions overlays for steps and hints.
pub struct OverlayController {
    document: SharedDocument,
    surface: Arc<dyn OverlaySurface>,
    options: Arc<TourOptions>,
    /// Frame anchors are measured against; the document when `None`.
    reference: Option<ElementId>,
}

impl std::fmt::Debug for OverlayController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("options", &self.options)
            .field("reference", &self.reference)
            .finish_non_exhaustive()
    }
}

impl OverlayController {
    pub fn new(
        document: SharedDocument,
        surface: Arc<dyn OverlaySurface>,
        options: Arc<TourOptions>,
    ) -> Self {
        Self {
            document,
            surface,
            options,
            reference: None,
        }
    }

    /// Measure anchors relative to `reference` instead of the document.
    #[must_use]
    pub fn with_reference(mut self, reference: ElementId) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn options(&self) -> &TourOptions {
        &self.options
    }

    pub fn reference(&self) -> Option<ElementId> {
        self.reference
    }

    /// Place and paint the overlay for `step`.
    pub async fn render(&self, step: &Step, total: usize, refresh: u64) -> OverlayFrame {
        let content = OverlayContent {
            title: step.title.clone(),
            text: step.intro.clone(),
            step_number: Some(step.step_number),
            total,
            hint: false,
        };
        let request = Request {
            step: Some(step.index),
            anchor: &step.anchor,
            position: step.position,
            content,
            hint_mode: false,
            scroll: self.options.scroll_to_element.then_some(step.scroll_to),
            disable_interaction: step.disable_interaction,
            tooltip_class: step.tooltip_class.as_deref(),
            highlight_class: step.highlight_class.as_deref(),
            refresh,
        };
        self.present(request).await
    }

    /// Place and paint a standalone hint next to `anchor`.
    ///
    /// Hints never scroll, highlight, or block interaction.
    pub async fn place_hint(
        &self,
        anchor: &Anchor,
        position: Position,
        text: impl Into<String>,
    ) -> OverlayFrame {
        let request = Request {
            step: None,
            anchor,
            position,
            content: OverlayContent {
                text: text.into(),
                hint: true,
                ..OverlayContent::default()
            },
            hint_mode: true,
            scroll: None,
            disable_interaction: false,
            tooltip_class: None,
            highlight_class: None,
            refresh: 0,
        };
        self.present(request).await
    }

    /// Remove the painted overlay.
    pub fn clear(&self) {
        self.surface.remove();
    }

    async fn present(&self, request: Request<'_>) -> OverlayFrame {
        let span = tracing::debug_span!(
            "waypost.place",
            step = ?request.step,
            hint = request.hint_mode,
        );
        async {
            let anchor = request.anchor.resolve(&*self.document);
            if anchor.is_none() && !request.anchor.is_none() {
                tracing::warn!(anchor = ?request.anchor, "anchor not found, floating overlay");
            }

            let nominal = self.surface.nominal_size(&request.content);
            let first = self.compose(&request, anchor, nominal);
            let realized = self.surface.paint(&first).await;
            if realized == nominal {
                return first;
            }

            let corrected = self.compose(&request, anchor, realized);
            if corrected.edges != first.edges || corrected.placement != first.placement {
                tracing::debug!(
                    nominal_w = nominal.width,
                    nominal_h = nominal.height,
                    width = realized.width,
                    height = realized.height,
                    "re-placing with measured size"
                );
                self.surface.paint(&corrected).await;
            }
            corrected
        }
        .instrument(span)
        .await
    }

    /// One layout pass. Reads the viewport and anchor geometry fresh.
    fn compose(&self, request: &Request<'_>, anchor: Option<ElementId>, size: Size) -> OverlayFrame {
        let document: &dyn Document = &*self.document;
        let options = &*self.options;
        let viewport = document.viewport_size();

        let (anchor_offset, desired) = match anchor {
            Some(id) => (resolve_offset(&document, id, self.reference), request.position),
            None => (Offset::from_rect(Rect::default()), Position::Floating),
        };

        let placement = if options.auto_position {
            options.placement.decide(
                &options.position_precedence,
                &anchor_offset,
                size,
                desired,
                viewport,
            )
        } else {
            Placement::unchecked(desired, &options.position_precedence)
        };
        let edges = options.placement.assign(
            placement,
            &anchor_offset,
            viewport,
            size,
            request.hint_mode,
            options.show_step_numbers,
        );
        let overlay_rect = edges.overlay_rect(&anchor_offset, viewport, size);

        let (highlight, blocker, scroll_by) = match anchor {
            Some(id) if !request.hint_mode => {
                let fixed = Document::is_fixed(&document, id);
                let layer = highlight_rect(&anchor_offset, options.helper_element_padding, fixed);
                let blocker = request.disable_interaction.then_some(layer);
                let scroll_by = request.scroll.and_then(|scroll_to| {
                    let page = document.page_scroll();
                    let overlay_in_viewport = if edges.is_floating() {
                        overlay_rect
                    } else {
                        overlay_rect.translate(-page.left, -page.top)
                    };
                    scroll_adjustment(
                        document.bounding_box(id),
                        viewport,
                        Some(overlay_in_viewport),
                        scroll_to,
                        options.scroll_padding,
                    )
                });
                (Some(layer), blocker, scroll_by)
            }
            _ => (None, None, None),
        };

        OverlayFrame {
            step: request.step,
            content: request.content.clone(),
            anchor,
            anchor_offset,
            placement,
            edges,
            overlay_size: size,
            overlay_rect,
            highlight,
            blocker,
            scroll_by,
            tooltip_class: join_classes(options.tooltip_class.as_deref(), request.tooltip_class),
            highlight_class: join_classes(
                options.highlight_class.as_deref(),
                request.highlight_class,
            ),
            refresh: request.refresh,
        }
    }
}

fn join_classes(base: Option<&str>, extra: Option<&str>) -> Option<String> {
    match (base, extra) {
        (Some(base), Some(extra)) => Some(format!("{base} {extra}")),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classes_join_with_a_space() {
        assert_eq!(join_classes(Some("tour"), Some("wide")).as_deref(), Some("tour wide"));
        assert_eq!(join_classes(None, Some("wide")).as_deref(), Some("wide"));
        assert_eq!(join_classes(None, None), None);
    }
}
