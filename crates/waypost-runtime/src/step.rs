#![forbid(unsafe_code)]

//! Steps and the specs they are built from.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use waypost_core::{Document, ElementId};
use waypost_layout::{Position, ScrollTo};

use crate::options::TourOptions;

/// What a step is anchored to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    Element(ElementId),
    /// Resolved on every render, so late-mounted elements are picked up.
    Selector(String),
    /// Floating step.
    #[default]
    None,
}

impl Anchor {
    /// Look the anchor up in `document`.
    ///
    /// Disconnected elements and unmatched selectors resolve to `None`.
    pub fn resolve(&self, document: &dyn Document) -> Option<ElementId> {
        match self {
            Self::Element(id) => document.is_connected(*id).then_some(*id),
            Self::Selector(selector) => document
                .query_selector(selector)
                .filter(|id| document.is_connected(*id)),
            Self::None => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// One step of a tour, with tour-wide defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Position in the step list.
    pub index: usize,
    /// 1-based number the step was declared with.
    pub step_number: usize,
    pub title: Option<String>,
    pub intro: String,
    pub anchor: Anchor,
    pub position: Position,
    pub scroll_to: ScrollTo,
    pub tooltip_class: Option<String>,
    pub highlight_class: Option<String>,
    pub disable_interaction: bool,
}

/// Step input from a programmatic list or an external loader.
///
/// Unset fields take the tour's [`TourOptions`] defaults.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct StepSpec {
    /// Requested 1-based slot; unnumbered specs fill the gaps.
    pub step: Option<usize>,
    pub title: Option<String>,
    pub intro: String,
    /// Selector of the anchor element.
    pub element: Option<String>,
    /// Already-resolved anchor; wins over `element`.
    #[cfg_attr(feature = "config", serde(skip))]
    pub element_id: Option<ElementId>,
    pub position: Option<Position>,
    pub scroll_to: Option<ScrollTo>,
    pub tooltip_class: Option<String>,
    pub highlight_class: Option<String>,
    pub disable_interaction: Option<bool>,
}

impl StepSpec {
    pub fn new(intro: impl Into<String>) -> Self {
        Self {
            intro: intro.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn step(mut self, number: usize) -> Self {
        self.step = Some(number);
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn element(mut self, selector: impl Into<String>) -> Self {
        self.element = Some(selector.into());
        self
    }

    #[must_use]
    pub fn element_id(mut self, id: ElementId) -> Self {
        self.element_id = Some(id);
        self
    }

    #[must_use]
    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn scroll_to(mut self, target: ScrollTo) -> Self {
        self.scroll_to = Some(target);
        self
    }

    #[must_use]
    pub fn tooltip_class(mut self, class: impl Into<String>) -> Self {
        self.tooltip_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn highlight_class(mut self, class: impl Into<String>) -> Self {
        self.highlight_class = Some(class.into());
        self
    }

    #[must_use]
    pub fn disable_interaction(mut self, disable: bool) -> Self {
        self.disable_interaction = Some(disable);
        self
    }

    fn anchor(&self) -> Anchor {
        match (self.element_id, &self.element) {
            (Some(id), _) => Anchor::Element(id),
            (None, Some(selector)) => Anchor::Selector(selector.clone()),
            (None, None) => Anchor::None,
        }
    }

    pub(crate) fn into_step(self, index: usize, step_number: usize, options: &TourOptions) -> Step {
        let anchor = self.anchor();
        Step {
            index,
            step_number,
            title: self.title,
            intro: self.intro,
            anchor,
            position: self.position.unwrap_or(options.tooltip_position),
            scroll_to: self.scroll_to.unwrap_or(options.scroll_to),
            tooltip_class: self.tooltip_class,
            highlight_class: self.highlight_class,
            disable_interaction: self
                .disable_interaction
                .unwrap_or(options.disable_interaction),
        }
    }
}

/// Order specs into a step list.
///
/// Numbered specs take their slot; a clash sends the later spec to the
/// unnumbered pool. Unnumbered specs fill empty slots in input order, then
/// append. Empty slots are dropped and indices renumbered from zero.
pub fn assemble(specs: Vec<StepSpec>, options: &TourOptions) -> Vec<Step> {
    let mut slots: Vec<Option<StepSpec>> = Vec::new();
    let mut unnumbered = Vec::new();

    for spec in specs {
        match spec.step.filter(|n| *n >= 1) {
            Some(number) => {
                let slot = number - 1;
                if slots.len() <= slot {
                    slots.resize_with(slot + 1, || None);
                }
                if slots[slot].is_some() {
                    unnumbered.push(spec);
                } else {
                    slots[slot] = Some(spec);
                }
            }
            None => unnumbered.push(spec),
        }
    }

    let mut next_gap = 0;
    for spec in unnumbered {
        while next_gap < slots.len() && slots[next_gap].is_some() {
            next_gap += 1;
        }
        if next_gap < slots.len() {
            slots[next_gap] = Some(spec);
        } else {
            slots.push(Some(spec));
        }
    }

    slots
        .into_iter()
        .enumerate()
        .filter_map(|(slot, spec)| spec.map(|spec| (slot + 1, spec)))
        .enumerate()
        .map(|(index, (step_number, spec))| spec.into_step(index, step_number, options))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypost_core::testing::MockDocument;
    use waypost_core::{Rect, Size};
    use waypost_layout::Side;

    fn intros(steps: &[Step]) -> Vec<&str> {
        steps.iter().map(|s| s.intro.as_str()).collect()
    }

    #[test]
    fn numbered_specs_take_their_slot() {
        let options = TourOptions::default();
        let steps = assemble(
            vec![
                StepSpec::new("c").step(3),
                StepSpec::new("a"),
                StepSpec::new("b"),
                StepSpec::new("e").step(5),
            ],
            &options,
        );
        assert_eq!(intros(&steps), ["a", "b", "c", "e"]);
        let numbers: Vec<usize> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, [1, 2, 3, 5]);
        let indices: Vec<usize> = steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, [0, 1, 2, 3]);
    }

    #[test]
    fn clashing_numbers_fall_back_to_gaps() {
        let steps = assemble(
            vec![
                StepSpec::new("first").step(2),
                StepSpec::new("second").step(2),
                StepSpec::new("third"),
            ],
            &TourOptions::default(),
        );
        assert_eq!(intros(&steps), ["second", "first", "third"]);
    }

    #[test]
    fn defaults_come_from_options() {
        let options = TourOptions::default()
            .tooltip_position(Position::side(Side::Left))
            .disable_interaction(true);
        let steps = assemble(
            vec![
                StepSpec::new("a"),
                StepSpec::new("b")
                    .position(Position::Floating)
                    .disable_interaction(false)
                    .scroll_to(ScrollTo::Off),
            ],
            &options,
        );
        assert_eq!(steps[0].position, Position::side(Side::Left));
        assert!(steps[0].disable_interaction);
        assert_eq!(steps[0].scroll_to, ScrollTo::Element);
        assert_eq!(steps[1].position, Position::Floating);
        assert!(!steps[1].disable_interaction);
        assert_eq!(steps[1].scroll_to, ScrollTo::Off);
    }

    #[test]
    fn element_id_wins_over_selector() {
        let spec = StepSpec::new("x").element("#save").element_id(ElementId(4));
        assert_eq!(spec.anchor(), Anchor::Element(ElementId(4)));
        assert_eq!(StepSpec::new("x").element("#save").anchor(), Anchor::Selector("#save".into()));
        assert_eq!(StepSpec::new("x").anchor(), Anchor::None);
    }

    #[test]
    fn anchors_resolve_only_when_connected() {
        let doc = MockDocument::new(Size::new(800.0, 600.0));
        let el = doc.add(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(Anchor::Element(el).resolve(&doc), Some(el));
        assert_eq!(Anchor::Selector("body".into()).resolve(&doc), Some(doc.body()));
        assert_eq!(Anchor::Selector("#missing".into()).resolve(&doc), None);
        doc.detach(el);
        assert_eq!(Anchor::Element(el).resolve(&doc), None);
    }
}
