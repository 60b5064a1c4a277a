#![forbid(unsafe_code)]

//! Placement decision engine: which side of the anchor an overlay goes on.
//!
//! # Decision rule
//!
//! 1. Start from the caller's precedence list of sides.
//! 2. Drop every side without room for the overlay plus
//!    [`edge_buffer`](crate::PlacementConfig::edge_buffer), tested against
//!    the anchor's document-relative box.
//! 3. Nothing left: [`BasePosition::Floating`].
//! 4. Otherwise the desired side if it survived, else the first survivor.
//!    First-fit, not best-fit: precedence is caller intent.
//! 5. Top/bottom bases then pick a horizontal [`Alignment`].
//!
//! # Invariants
//!
//! 1. The engine is a pure function of its inputs.
//! 2. Zero-sized overlays (not painted yet) are valid input.
//! 3. A side the caller never listed is never chosen, except through the
//!    `Floating` fallback.

use std::fmt;
use std::str::FromStr;

use waypost_core::{Offset, Size};

use crate::config::PlacementConfig;

/// A side of the anchor an overlay can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Default precedence: below, above, right, left.
    pub const DEFAULT_PRECEDENCE: [Side; 4] = [Side::Bottom, Side::Top, Side::Right, Side::Left];

    /// Top and bottom carry a horizontal alignment.
    #[inline]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(ParsePositionError::UnknownSide(other.to_string())),
        }
    }
}

/// Horizontal sub-position of a top/bottom overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Overlay's left edge flush with the anchor's left edge.
    Left,
    /// Overlay centered on the anchor.
    Middle,
    /// Overlay's right edge flush with the anchor's right edge.
    Right,
}

impl Alignment {
    /// Tie-break order when no alignment was requested.
    pub const PREFERENCE: [Alignment; 3] = [Alignment::Middle, Alignment::Right, Alignment::Left];

    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "middle",
            Self::Right => "right",
        }
    }
}

/// Final base position of an overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BasePosition {
    Top,
    Bottom,
    Left,
    Right,
    /// Centered in the viewport, independent of the anchor, no arrow.
    Floating,
}

impl From<Side> for BasePosition {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Self::Top,
            Side::Bottom => Self::Bottom,
            Side::Left => Self::Left,
            Side::Right => Self::Right,
        }
    }
}

impl BasePosition {
    /// Lowercase name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Floating => "floating",
        }
    }
}

/// Position a step or hint asks for.
///
/// Parses the textual forms used in step definitions: `auto`, `floating`,
/// `top`, `bottom`, `left`, `right`, and the aligned variants
/// `top-left-aligned` .. `bottom-right-aligned`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub enum Position {
    /// No preference; the first surviving side in precedence order wins.
    Auto,
    /// Always float.
    Floating,
    /// A specific side, optionally with an explicit alignment (top/bottom only).
    Side {
        side: Side,
        alignment: Option<Alignment>,
    },
}

impl Default for Position {
    fn default() -> Self {
        Self::side(Side::Bottom)
    }
}

impl Position {
    /// A side with its natural alignment.
    pub const fn side(side: Side) -> Self {
        Self::Side {
            side,
            alignment: None,
        }
    }

    /// A top/bottom side with an explicit alignment.
    ///
    /// Returns `None` for left/right, which have no alignment.
    pub const fn aligned(side: Side, alignment: Alignment) -> Option<Self> {
        if side.is_vertical() {
            Some(Self::Side {
                side,
                alignment: Some(alignment),
            })
        } else {
            None
        }
    }

    /// The requested base side, if any.
    pub const fn base_side(self) -> Option<Side> {
        match self {
            Self::Side { side, .. } => Some(side),
            Self::Auto | Self::Floating => None,
        }
    }

    /// Alignment requested for a top/bottom side.
    ///
    /// A plain `top`/`bottom` requests `Left`: that is how an unaligned
    /// top/bottom overlay is drawn, flush with the anchor's left edge.
    pub const fn requested_alignment(self) -> Option<Alignment> {
        match self {
            Self::Side {
                side, alignment, ..
            } if side.is_vertical() => match alignment {
                Some(alignment) => Some(alignment),
                None => Some(Alignment::Left),
            },
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Floating => f.write_str("floating"),
            Self::Side {
                side,
                alignment: None,
            } => f.write_str(side.as_str()),
            Self::Side {
                side,
                alignment: Some(alignment),
            } => write!(f, "{}-{}-aligned", side.as_str(), alignment.as_str()),
        }
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "auto" => return Ok(Self::Auto),
            "floating" => return Ok(Self::Floating),
            _ => {}
        }
        if let Some(rest) = s.strip_suffix("-aligned") {
            let (side, alignment) = rest
                .split_once('-')
                .ok_or_else(|| ParsePositionError::UnknownPosition(s.to_string()))?;
            let side: Side = side.parse()?;
            let alignment = match alignment {
                "left" => Alignment::Left,
                "middle" => Alignment::Middle,
                "right" => Alignment::Right,
                _ => return Err(ParsePositionError::UnknownPosition(s.to_string())),
            };
            return Self::aligned(side, alignment)
                .ok_or_else(|| ParsePositionError::AlignmentOnHorizontalSide(s.to_string()));
        }
        s.parse::<Side>()
            .map(Self::side)
            .map_err(|_| ParsePositionError::UnknownPosition(s.to_string()))
    }
}

impl TryFrom<String> for Position {
    type Error = ParsePositionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.to_string()
    }
}

/// Failure to parse a side or position name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePositionError {
    #[error("unknown side: {0:?}")]
    UnknownSide(String),
    #[error("unknown position: {0:?}")]
    UnknownPosition(String),
    #[error("alignment is only valid for top/bottom: {0:?}")]
    AlignmentOnHorizontalSide(String),
    #[error("unknown scroll target: {0:?}")]
    UnknownScrollTarget(String),
}

/// Parse a comma- or whitespace-separated precedence list such as
/// `"bottom, top, right, left"`.
pub fn parse_precedence(list: &str) -> Result<Vec<Side>, ParsePositionError> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect()
}

/// Outcome of the decision engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub base: BasePosition,
    /// Only set for top/bottom bases.
    pub alignment: Option<Alignment>,
}

impl Placement {
    /// The floating fallback.
    pub const FLOATING: Placement = Placement {
        base: BasePosition::Floating,
        alignment: None,
    };

    /// A placement on `side` with no alignment.
    pub const fn horizontal(side: Side) -> Self {
        Self {
            base: match side {
                Side::Top => BasePosition::Top,
                Side::Bottom => BasePosition::Bottom,
                Side::Left => BasePosition::Left,
                Side::Right => BasePosition::Right,
            },
            alignment: None,
        }
    }

    /// Use the requested position verbatim, without fit checks.
    ///
    /// `Auto` falls back to the first side of `precedence` (bottom when the
    /// list is empty).
    pub fn unchecked(requested: Position, precedence: &[Side]) -> Self {
        let side = match requested {
            Position::Floating => return Self::FLOATING,
            Position::Side { side, .. } => side,
            Position::Auto => precedence.first().copied().unwrap_or(Side::Bottom),
        };
        let alignment = if side.is_vertical() {
            Some(requested.requested_alignment().unwrap_or(Alignment::Middle))
        } else {
            None
        };
        Self {
            base: side.into(),
            alignment,
        }
    }
}

impl PlacementConfig {
    /// Decide base side and alignment for an overlay of `overlay` size.
    pub fn decide(
        &self,
        precedence: &[Side],
        anchor: &Offset,
        overlay: Size,
        desired: Position,
        viewport: Size,
    ) -> Placement {
        if desired == Position::Floating {
            return Placement::FLOATING;
        }

        let candidates: Vec<Side> = precedence
            .iter()
            .copied()
            .filter(|side| self.side_fits(*side, anchor, overlay, viewport))
            .collect();

        let base = match desired.base_side() {
            Some(side) if candidates.contains(&side) => side,
            _ => match candidates.first() {
                Some(side) => *side,
                None => {
                    waypost_core::trace!(
                        precedence = ?precedence,
                        "no side fits, floating"
                    );
                    return Placement::FLOATING;
                }
            },
        };

        if !base.is_vertical() {
            return Placement::horizontal(base);
        }

        let requested = if desired.base_side() == Some(base) {
            desired.requested_alignment()
        } else {
            None
        };
        let alignment = self.resolve_alignment(anchor, overlay, viewport, requested);
        waypost_core::trace!(
            base = base.as_str(),
            alignment = alignment.as_str(),
            "placement decided"
        );
        Placement {
            base: base.into(),
            alignment: Some(alignment),
        }
    }

    /// Whether `side` has room for the overlay plus the edge buffer.
    pub fn side_fits(&self, side: Side, anchor: &Offset, overlay: Size, viewport: Size) -> bool {
        let buffer = self.edge_buffer;
        match side {
            Side::Bottom => anchor.absolute_bottom + overlay.height + buffer <= viewport.height,
            Side::Top => anchor.absolute_top - overlay.height - buffer >= 0.0,
            Side::Right => anchor.absolute_right + overlay.width + buffer <= viewport.width,
            Side::Left => anchor.absolute_left - overlay.width - buffer >= 0.0,
        }
    }

    /// Whether `alignment` keeps the overlay inside the viewport horizontally.
    pub fn alignment_fits(
        &self,
        alignment: Alignment,
        anchor: &Offset,
        overlay: Size,
        viewport: Size,
    ) -> bool {
        let margin = self.alignment_margin;
        match alignment {
            Alignment::Left => anchor.absolute_left + overlay.width + margin <= viewport.width,
            Alignment::Right => anchor.absolute_right - overlay.width - margin >= 0.0,
            Alignment::Middle => {
                let center = anchor.absolute_center_x();
                let half = overlay.width / 2.0;
                center - half - margin >= 0.0 && center + half + margin <= viewport.width
            }
        }
    }

    fn resolve_alignment(
        &self,
        anchor: &Offset,
        overlay: Size,
        viewport: Size,
        requested: Option<Alignment>,
    ) -> Alignment {
        if let Some(requested) = requested
            && self.alignment_fits(requested, anchor, overlay, viewport)
        {
            return requested;
        }
        Alignment::PREFERENCE
            .into_iter()
            .find(|alignment| self.alignment_fits(*alignment, anchor, overlay, viewport))
            .unwrap_or(Alignment::Middle)
    }
}

/// [`PlacementConfig::decide`] with the default constants.
pub fn decide_placement(
    precedence: &[Side],
    anchor: &Offset,
    overlay: Size,
    desired: Position,
    viewport: Size,
) -> Placement {
    PlacementConfig::default().decide(precedence, anchor, overlay, desired, viewport)
}
