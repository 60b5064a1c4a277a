#![forbid(unsafe_code)]

//! Geometry resolver: where an anchor sits relative to a reference frame.
//!
//! # Frames
//!
//! | Case | `top`/`left` |
//! |------|--------------|
//! | element (or an ancestor) is `fixed` | viewport box as-is |
//! | reference is `relative`/`sticky` and not the body | box minus reference box, plus scroll of scrollable ancestors up to the reference |
//! | otherwise | viewport box plus page scroll |
//!
//! The `absolute_*` fields always take the last row, whichever branch ran,
//! because the placement engine tests them against the viewport.
//!
//! Resolution never fails. A detached or hidden element measures as a
//! zero-sized box at the origin and the placement math copes with that.

use waypost_core::{Document, ElementId, Offset, Rect};

/// Resolve `element`'s box relative to `reference` (the body when `None`).
pub fn resolve_offset<D: Document>(
    document: &D,
    element: ElementId,
    reference: Option<ElementId>,
) -> Offset {
    let body = document.body();
    let reference = reference.unwrap_or(body);
    let rect = document.bounding_box(element);
    let page = document.page_scroll();
    let absolute_top = rect.y + page.top;
    let absolute_left = rect.x + page.left;

    let (top, left) = if document.is_fixed(element) {
        (rect.y, rect.x)
    } else if reference != body
        && document
            .computed_style(reference)
            .position
            .is_positioned_frame()
    {
        relative_to_frame(document, element, reference, rect)
    } else {
        (absolute_top, absolute_left)
    };

    Offset::new(top, left, rect.size(), absolute_top, absolute_left)
}

/// Offset inside a positioned frame, in the frame's scrolled content space.
fn relative_to_frame<D: Document>(
    document: &D,
    element: ElementId,
    reference: ElementId,
    rect: Rect,
) -> (f64, f64) {
    let frame = document.bounding_box(reference);
    let mut top = rect.y - frame.y;
    let mut left = rect.x - frame.x;

    for ancestor in document.ancestors(element) {
        if document.computed_style(ancestor).is_scrollable() {
            let scroll = document.scroll_position(ancestor);
            top += scroll.top;
            left += scroll.left;
        }
        if ancestor == reference {
            break;
        }
    }
    (top, left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_core::testing::{MockDocument, MockElement};
    use waypost_core::{Overflow, PositionMode, Size};

    fn doc() -> MockDocument {
        MockDocument::new(Size::new(1000.0, 800.0))
    }

    #[test]
    fn normal_flow_adds_page_scroll() {
        let doc = doc();
        let el = doc.add(Rect::new(400.0, 1200.0, 100.0, 50.0));
        doc.set_page_scroll(1000.0, 0.0);

        let offset = resolve_offset(&doc, el, None);
        assert_eq!(offset.top, 1200.0);
        assert_eq!(offset.left, 400.0);
        assert_eq!(offset.absolute_top, 1200.0);
        assert_eq!(offset.bottom, 1250.0);
        assert_eq!(offset.right, 500.0);
    }

    #[test]
    fn fixed_element_uses_viewport_box() {
        let doc = doc();
        let body = doc.body();
        let el = doc.insert(
            body,
            MockElement::new(Rect::new(20.0, 30.0, 100.0, 40.0)).position(PositionMode::Fixed),
        );
        doc.set_page_scroll(500.0, 0.0);

        let offset = resolve_offset(&doc, el, None);
        assert_eq!((offset.top, offset.left), (30.0, 20.0));
        // Absolute fields still include page scroll.
        assert_eq!(offset.absolute_top, 530.0);
    }

    #[test]
    fn child_of_fixed_container_is_fixed() {
        let doc = doc();
        let body = doc.body();
        let bar = doc.insert(
            body,
            MockElement::new(Rect::new(0.0, 0.0, 1000.0, 60.0)).position(PositionMode::Fixed),
        );
        let button = doc.insert(bar, MockElement::new(Rect::new(900.0, 10.0, 80.0, 40.0)));
        doc.set_page_scroll(300.0, 0.0);

        let offset = resolve_offset(&doc, button, None);
        assert_eq!((offset.top, offset.left), (10.0, 900.0));
    }

    #[test]
    fn positioned_scroll_container_accumulates_scroll() {
        let doc = doc();
        let body = doc.body();
        let pane = doc.insert(
            body,
            MockElement::new(Rect::new(100.0, 100.0, 400.0, 300.0))
                .position(PositionMode::Relative)
                .overflow(Overflow::Auto),
        );
        let el = doc.insert(pane, MockElement::new(Rect::new(120.0, 700.0, 50.0, 20.0)));
        doc.set_scroll(pane, 500.0, 0.0);

        // Viewport box is (120, 200); frame box is (100, 100). Content-space
        // offset adds the container scroll back.
        let offset = resolve_offset(&doc, el, Some(pane));
        assert_eq!(offset.top, 600.0);
        assert_eq!(offset.left, 20.0);
        assert_eq!(offset.absolute_top, 200.0);
    }

    #[test]
    fn static_reference_falls_back_to_document() {
        let doc = doc();
        let body = doc.body();
        let pane = doc.insert(body, MockElement::new(Rect::new(100.0, 100.0, 400.0, 300.0)));
        let el = doc.insert(pane, MockElement::new(Rect::new(120.0, 150.0, 50.0, 20.0)));

        let offset = resolve_offset(&doc, el, Some(pane));
        assert_eq!((offset.top, offset.left), (150.0, 120.0));
    }

    #[test]
    fn body_reference_is_never_a_frame() {
        let doc = doc();
        let el = doc.add(Rect::new(10.0, 20.0, 30.0, 40.0));
        let body = doc.body();
        doc.set_page_scroll(5.0, 0.0);
        assert_eq!(
            resolve_offset(&doc, el, Some(body)),
            resolve_offset(&doc, el, None)
        );
    }

    #[test]
    fn detached_element_is_zero_sized() {
        let doc = doc();
        let el = doc.add(Rect::new(10.0, 20.0, 30.0, 40.0));
        doc.detach(el);
        let offset = resolve_offset(&doc, el, None);
        assert_eq!(offset.width, 0.0);
        assert_eq!(offset.height, 0.0);
        assert_eq!(offset.bottom, offset.top);
    }
}
