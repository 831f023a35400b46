//! Per-item layout attributes and the host capability tag.
//!
//! [`FlexItemAttributes`] is the value type the rest of the crate edits,
//! stores and persists: one instance per item in a flex container. It is a
//! plain data carrier. Every numeric field validates only its own domain,
//! and no cross-field rule (such as `min <= max`) is enforced here.
//!
//! [`HostKind`] identifies the kind of container an item lives in and gates
//! the one attribute that is not meaningful everywhere: `order`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sentinel length meaning "as large as the parent allows".
///
/// Only valid on `width`/`height`; the min/max constraints take real lengths.
pub const MATCH_PARENT: i32 = -1;

/// Sentinel length meaning "just large enough for the content".
///
/// Only valid on `width`/`height`; the min/max constraints take real lengths.
pub const WRAP_CONTENT: i32 = -2;

/// Default upper size constraint, effectively unbounded.
pub const MAX_SIZE: i32 = 0x00FF_FFFF;

/// Sentinel meaning the flex basis percentage is unset and the item's own
/// main-axis length is used instead.
pub const FLEX_BASIS_PERCENT_DEFAULT: f32 = -1.0;

/// Cross-axis alignment override for a single item.
///
/// `Auto` defers to the container's own item alignment; every other value
/// overrides it for this item alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlignSelf {
    /// Inherit the container's item alignment.
    #[default]
    Auto,
    /// Align at the start of the cross axis.
    FlexStart,
    /// Align at the end of the cross axis.
    FlexEnd,
    /// Center on the cross axis.
    Center,
    /// Align text baselines on the first line.
    Baseline,
    /// Stretch to fill the cross axis.
    Stretch,
}

/// The kind of container an item is hosted by.
///
/// The container kind determines which attributes are meaningful for its
/// items. A [`FlexLayout`](HostKind::FlexLayout) lays out every child it owns
/// and honors the `order` attribute; a
/// [`RecyclerLayout`](HostKind::RecyclerLayout) positions children in adapter
/// order, so `order` is not supported there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostKind {
    /// Direct container, all items laid out at once. Supports `order`.
    #[default]
    FlexLayout,
    /// Recycling container, items realized on demand in adapter order.
    RecyclerLayout,
}

impl HostKind {
    /// Whether items in this host honor the `order` attribute.
    #[inline]
    pub fn supports_order(self) -> bool {
        matches!(self, HostKind::FlexLayout)
    }

    /// Stable tag used by persisted item records.
    pub fn kind_str(self) -> &'static str {
        match self {
            HostKind::FlexLayout => "flex_layout",
            HostKind::RecyclerLayout => "recycler_layout",
        }
    }

    /// Parse a persisted kind tag.
    ///
    /// An unrecognized tag is a configuration/integration failure and is
    /// reported as [`Error::UnknownItemKind`].
    pub fn parse(kind: &str) -> Result<Self> {
        match kind {
            "flex_layout" => Ok(HostKind::FlexLayout),
            "recycler_layout" => Ok(HostKind::RecyclerLayout),
            other => Err(Error::unknown_item_kind(other)),
        }
    }
}

/// The full set of layout attributes for one flex item.
///
/// Lengths (`width`, `height` and the min/max constraints) are stored in the
/// host's native unit; conversion to display units happens only at the input
/// and presentation boundary (see [`DisplayMetrics`](crate::DisplayMetrics)).
///
/// `width` and `height` additionally accept the [`MATCH_PARENT`] and
/// [`WRAP_CONTENT`] sentinels; the min/max constraints do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlexItemAttributes {
    /// Relative ordering along the main axis. Items with equal order keep
    /// their insertion order. Ignored by hosts without order support.
    pub order: i32,
    /// Share of free space this item receives. Non-negative.
    pub flex_grow: f32,
    /// Share of overflow this item absorbs when the line overflows.
    /// Non-negative; zero means the item never shrinks.
    pub flex_shrink: f32,
    /// Initial main-axis length as a fraction of the container in
    /// `[0.0, 1.0]`, or [`FLEX_BASIS_PERCENT_DEFAULT`] when unset.
    pub flex_basis_percent: f32,
    /// Requested width, or a dimension sentinel.
    pub width: i32,
    /// Requested height, or a dimension sentinel.
    pub height: i32,
    /// Lower width constraint. Non-negative, no sentinels.
    pub min_width: i32,
    /// Lower height constraint. Non-negative, no sentinels.
    pub min_height: i32,
    /// Upper width constraint. Non-negative, no sentinels.
    pub max_width: i32,
    /// Upper height constraint. Non-negative, no sentinels.
    pub max_height: i32,
    /// Cross-axis alignment override for this item.
    pub align_self: AlignSelf,
    /// Start a new flex line before this item (ignored by no-wrap containers).
    pub wrap_before: bool,
}

impl Default for FlexItemAttributes {
    fn default() -> Self {
        Self {
            order: 1,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis_percent: FLEX_BASIS_PERCENT_DEFAULT,
            width: WRAP_CONTENT,
            height: WRAP_CONTENT,
            min_width: 0,
            min_height: 0,
            max_width: MAX_SIZE,
            max_height: MAX_SIZE,
            align_self: AlignSelf::Auto,
            wrap_before: false,
        }
    }
}

impl FlexItemAttributes {
    /// Create attributes with the documented defaults: wrap-content sizing,
    /// no growth, full shrink, unset basis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy every field of `self` onto `target`.
    ///
    /// `order` is copied only when `include_order` is set; hosts without
    /// order support never receive it (the target keeps whatever it had).
    pub fn copy_onto(&self, target: &mut FlexItemAttributes, include_order: bool) {
        if include_order {
            target.order = self.order;
        }
        target.flex_grow = self.flex_grow;
        target.flex_shrink = self.flex_shrink;
        target.flex_basis_percent = self.flex_basis_percent;
        target.width = self.width;
        target.height = self.height;
        target.min_width = self.min_width;
        target.min_height = self.min_height;
        target.max_width = self.max_width;
        target.max_height = self.max_height;
        target.align_self = self.align_self;
        target.wrap_before = self.wrap_before;
    }
}

/// Whether `value` is one of the `width`/`height` sentinels.
#[inline]
pub fn is_dimension_sentinel(value: i32) -> bool {
    value == MATCH_PARENT || value == WRAP_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_attributes() {
        let attrs = FlexItemAttributes::new();
        assert_eq!(attrs.order, 1);
        assert_eq!(attrs.flex_grow, 0.0);
        assert_eq!(attrs.flex_shrink, 1.0);
        assert_eq!(attrs.flex_basis_percent, FLEX_BASIS_PERCENT_DEFAULT);
        assert_eq!(attrs.width, WRAP_CONTENT);
        assert_eq!(attrs.height, WRAP_CONTENT);
        assert_eq!(attrs.min_width, 0);
        assert_eq!(attrs.min_height, 0);
        assert_eq!(attrs.max_width, MAX_SIZE);
        assert_eq!(attrs.max_height, MAX_SIZE);
        assert_eq!(attrs.align_self, AlignSelf::Auto);
        assert!(!attrs.wrap_before);
    }

    #[test]
    fn test_copy_onto_with_order() {
        let mut source = FlexItemAttributes::new();
        source.order = -3;
        source.flex_grow = 2.0;
        source.width = 120;

        let mut target = FlexItemAttributes::new();
        source.copy_onto(&mut target, true);

        assert_eq!(target, source);
    }

    #[test]
    fn test_copy_onto_excludes_order() {
        let mut source = FlexItemAttributes::new();
        source.order = 9;
        source.flex_grow = 2.0;

        let mut target = FlexItemAttributes::new();
        target.order = 1;
        source.copy_onto(&mut target, false);

        assert_eq!(target.order, 1);
        assert_eq!(target.flex_grow, 2.0);
    }

    #[test]
    fn test_host_kind_order_support() {
        assert!(HostKind::FlexLayout.supports_order());
        assert!(!HostKind::RecyclerLayout.supports_order());
    }

    #[test]
    fn test_host_kind_tag_round_trip() {
        for kind in [HostKind::FlexLayout, HostKind::RecyclerLayout] {
            assert_eq!(HostKind::parse(kind.kind_str()).unwrap(), kind);
        }
    }

    #[test]
    fn test_host_kind_unknown_tag() {
        let err = HostKind::parse("grid_layout").unwrap_err();
        assert!(matches!(err, Error::UnknownItemKind(kind) if kind == "grid_layout"));
    }

    #[test]
    fn test_dimension_sentinels() {
        assert!(is_dimension_sentinel(MATCH_PARENT));
        assert!(is_dimension_sentinel(WRAP_CONTENT));
        assert!(!is_dimension_sentinel(0));
        assert!(!is_dimension_sentinel(42));
    }
}
