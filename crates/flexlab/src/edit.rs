//! The attribute edit session.
//!
//! An [`EditSession`] is the working state of one edit interaction: it holds
//! an owned copy of the attributes being edited, applies validated text input
//! field by field, and finally copies the whole draft back in one step or
//! throws it away. The live attributes are never touched while the session is
//! open, so a cancelled edit leaves no trace.
//!
//! Sessions are transient. One is created when the user asks to edit an item
//! and dropped as soon as the edit is committed or cancelled; the next edit
//! starts from a fresh copy of whatever is live then.

use std::collections::HashSet;

use flexlab_core::Signal;
use flexlab_core::logging::targets;

use crate::attrs::{
    AlignSelf, FLEX_BASIS_PERCENT_DEFAULT, FlexItemAttributes, HostKind, is_dimension_sentinel,
};
use crate::error::{Error, Result};
use crate::units::DisplayMetrics;
use crate::validator::{
    DimensionValidator, FixedDimensionValidator, FlexBasisPercentValidator, IntegerValidator,
    NonNegativeDecimalValidator, Validator,
};

/// An editable text field of [`FlexItemAttributes`].
///
/// `align_self` and `wrap_before` are not listed here: they are set from
/// choice widgets and go through [`EditSession::set_align_self`] and
/// [`EditSession::set_wrap_before`] without text validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Main-axis ordering (signed integer).
    Order,
    /// Growth factor (non-negative decimal).
    FlexGrow,
    /// Shrink factor (non-negative decimal).
    FlexShrink,
    /// Flex basis as a whole percentage, `-1` to unset.
    FlexBasisPercent,
    /// Requested width (length or size sentinel).
    Width,
    /// Requested height (length or size sentinel).
    Height,
    /// Lower width constraint (plain length).
    MinWidth,
    /// Lower height constraint (plain length).
    MinHeight,
    /// Upper width constraint (plain length).
    MaxWidth,
    /// Upper height constraint (plain length).
    MaxHeight,
}

impl Field {
    /// Every editable text field, in presentation order.
    pub const ALL: [Field; 10] = [
        Field::Order,
        Field::FlexGrow,
        Field::FlexShrink,
        Field::FlexBasisPercent,
        Field::Width,
        Field::Height,
        Field::MinWidth,
        Field::MinHeight,
        Field::MaxWidth,
        Field::MaxHeight,
    ];

    /// The validator registered for this field.
    pub fn validator(self) -> &'static dyn Validator {
        static INTEGER: IntegerValidator = IntegerValidator;
        static DECIMAL: NonNegativeDecimalValidator = NonNegativeDecimalValidator;
        static DIMENSION: DimensionValidator = DimensionValidator;
        static FIXED: FixedDimensionValidator = FixedDimensionValidator;
        static PERCENT: FlexBasisPercentValidator = FlexBasisPercentValidator;

        match self {
            Field::Order => &INTEGER,
            Field::FlexGrow | Field::FlexShrink => &DECIMAL,
            Field::FlexBasisPercent => &PERCENT,
            Field::Width | Field::Height => &DIMENSION,
            Field::MinWidth | Field::MinHeight | Field::MaxWidth | Field::MaxHeight => &FIXED,
        }
    }

    /// Stable name used in log records.
    pub fn name(self) -> &'static str {
        match self {
            Field::Order => "order",
            Field::FlexGrow => "flex_grow",
            Field::FlexShrink => "flex_shrink",
            Field::FlexBasisPercent => "flex_basis_percent",
            Field::Width => "width",
            Field::Height => "height",
            Field::MinWidth => "min_width",
            Field::MinHeight => "min_height",
            Field::MaxWidth => "max_width",
            Field::MaxHeight => "max_height",
        }
    }
}

/// One edit interaction over a single item's attributes.
///
/// The session keeps two copies: `original`, frozen at open time, and
/// `working`, which accumulates validated input. Neither aliases the live
/// value; commit and cancel copy whole value sets, so a half-finished edit
/// is never observable outside the session.
///
/// # Example
///
/// ```
/// use flexlab::{DisplayMetrics, EditSession, Field, FlexItemAttributes, HostKind};
///
/// let live = FlexItemAttributes::new();
/// let mut session = EditSession::new(&live, HostKind::FlexLayout, DisplayMetrics::default());
///
/// session.set_field(Field::FlexGrow, "2.5");
/// assert!(session.can_commit());
///
/// let mut target = live.clone();
/// session.commit(&mut target).unwrap();
/// assert_eq!(target.flex_grow, 2.5);
/// ```
pub struct EditSession {
    /// The attributes as they were when the session opened. Read-only.
    original: FlexItemAttributes,
    /// The draft being edited. Owned; never aliased by the live value.
    working: FlexItemAttributes,
    /// Capability tag of the container hosting the item.
    host: HostKind,
    /// Unit conversion for length fields, applied at the text boundary only.
    metrics: DisplayMetrics,
    /// Fields currently holding invalid input.
    errors: HashSet<Field>,
    /// Emitted when a field's validity changes: `(field, now_invalid)`.
    pub validation_changed: Signal<(Field, bool)>,
}

impl EditSession {
    /// Open a session against the given live attributes.
    ///
    /// The attributes are copied; the live value stays untouched until
    /// [`commit`](Self::commit) writes the draft back.
    pub fn new(original: &FlexItemAttributes, host: HostKind, metrics: DisplayMetrics) -> Self {
        Self {
            original: original.clone(),
            working: original.clone(),
            host,
            metrics,
            errors: HashSet::new(),
            validation_changed: Signal::new(),
        }
    }

    /// The host kind this session was opened for.
    #[inline]
    pub fn host(&self) -> HostKind {
        self.host
    }

    /// The attributes as they were at session open.
    pub fn original(&self) -> &FlexItemAttributes {
        &self.original
    }

    /// The current draft, including any validated edits.
    pub fn working(&self) -> &FlexItemAttributes {
        &self.working
    }

    /// The presentation text a field starts out with.
    ///
    /// Lengths are rendered in display units; the basis percentage is
    /// rendered as the whole number the user would type (`-1` when unset).
    pub fn field_text(&self, field: Field) -> String {
        match field {
            Field::Order => self.working.order.to_string(),
            Field::FlexGrow => self.working.flex_grow.to_string(),
            Field::FlexShrink => self.working.flex_shrink.to_string(),
            Field::FlexBasisPercent => {
                if self.working.flex_basis_percent == FLEX_BASIS_PERCENT_DEFAULT {
                    "-1".to_string()
                } else {
                    ((self.working.flex_basis_percent * 100.0).round() as i32).to_string()
                }
            }
            Field::Width => self.metrics.to_display(self.working.width).to_string(),
            Field::Height => self.metrics.to_display(self.working.height).to_string(),
            Field::MinWidth => self.metrics.to_display(self.working.min_width).to_string(),
            Field::MinHeight => self.metrics.to_display(self.working.min_height).to_string(),
            Field::MaxWidth => self.metrics.to_display(self.working.max_width).to_string(),
            Field::MaxHeight => self.metrics.to_display(self.working.max_height).to_string(),
        }
    }

    /// Apply raw text input to one field.
    ///
    /// Invalid input flags the field and leaves the draft untouched; valid
    /// input clears the flag and writes the parsed value into the draft.
    /// Either way no other field is affected. For hosts without order
    /// support, input to [`Field::Order`] is ignored entirely, because the
    /// attribute is not meaningful there.
    pub fn set_field(&mut self, field: Field, text: &str) {
        if field == Field::Order && !self.host.supports_order() {
            tracing::trace!(
                target: targets::EDIT,
                "host has no order support, ignoring order input"
            );
            return;
        }

        if !field.validator().validate(text) {
            tracing::trace!(target: targets::EDIT, field = field.name(), text, "rejected input");
            self.set_error(field, true);
            return;
        }
        self.set_error(field, false);

        match field {
            Field::Order => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.order = value;
                }
            }
            Field::FlexGrow => {
                if let Ok(value) = text.parse::<f32>() {
                    self.working.flex_grow = value;
                }
            }
            Field::FlexShrink => {
                if let Ok(value) = text.parse::<f32>() {
                    self.working.flex_shrink = value;
                }
            }
            Field::FlexBasisPercent => {
                if let Ok(value) = text.parse::<i32>() {
                    // The sentinel is stored verbatim; anything else is a
                    // whole percentage.
                    self.working.flex_basis_percent = if value == -1 {
                        FLEX_BASIS_PERCENT_DEFAULT
                    } else {
                        value as f32 / 100.0
                    };
                }
            }
            Field::Width => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.width = self.to_native(value);
                }
            }
            Field::Height => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.height = self.to_native(value);
                }
            }
            Field::MinWidth => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.min_width = self.to_native(value);
                }
            }
            Field::MinHeight => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.min_height = self.to_native(value);
                }
            }
            Field::MaxWidth => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.max_width = self.to_native(value);
                }
            }
            Field::MaxHeight => {
                if let Ok(value) = text.parse::<i32>() {
                    self.working.max_height = self.to_native(value);
                }
            }
        }
    }

    /// Set the cross-axis alignment override on the draft.
    pub fn set_align_self(&mut self, align: AlignSelf) {
        self.working.align_self = align;
    }

    /// Set the wrap-before flag on the draft.
    pub fn set_wrap_before(&mut self, wrap: bool) {
        self.working.wrap_before = wrap;
    }

    /// Whether the given field currently holds invalid input.
    pub fn has_error(&self, field: Field) -> bool {
        self.errors.contains(&field)
    }

    /// Number of fields currently holding invalid input.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether the draft can be committed.
    ///
    /// True iff no field is flagged invalid. Fields the user never touched
    /// never block the commit, whatever their initial values: validation is
    /// driven by input, not by state.
    pub fn can_commit(&self) -> bool {
        self.errors.is_empty()
    }

    /// Copy the draft onto `target` as one unit.
    ///
    /// Fails with [`Error::InvalidFields`] while any field is flagged
    /// invalid; on failure `target` is untouched, never partially copied.
    /// `order` is excluded when the host has no order support.
    pub fn commit(&self, target: &mut FlexItemAttributes) -> Result<()> {
        if !self.can_commit() {
            return Err(Error::InvalidFields {
                count: self.errors.len(),
            });
        }
        self.working.copy_onto(target, self.host.supports_order());
        Ok(())
    }

    /// Restore the attributes captured at session open onto `target`.
    ///
    /// Unconditional and idempotent; calling it on a target that was never
    /// modified is a harmless no-op.
    pub fn cancel(&self, target: &mut FlexItemAttributes) {
        self.original.copy_onto(target, true);
    }

    /// Length input arrives in display units; sentinels stay as they are.
    fn to_native(&self, value: i32) -> i32 {
        if is_dimension_sentinel(value) {
            value
        } else {
            self.metrics.to_native(value)
        }
    }

    fn set_error(&mut self, field: Field, invalid: bool) {
        let changed = if invalid {
            self.errors.insert(field)
        } else {
            self.errors.remove(&field)
        };
        if changed {
            self.validation_changed.emit((field, invalid));
        }
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("host", &self.host)
            .field("errors", &self.errors)
            .field("working", &self.working)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::attrs::{MATCH_PARENT, WRAP_CONTENT};

    fn session(host: HostKind) -> EditSession {
        EditSession::new(&FlexItemAttributes::new(), host, DisplayMetrics::default())
    }

    #[test]
    fn test_valid_input_updates_working_copy() {
        let mut session = session(HostKind::FlexLayout);
        assert_eq!(session.working().flex_grow, 0.0);

        session.set_field(Field::FlexGrow, "2.5");

        assert!(!session.has_error(Field::FlexGrow));
        assert_eq!(session.working().flex_grow, 2.5);
        assert!(session.can_commit());
    }

    #[test]
    fn test_invalid_input_leaves_working_copy_unchanged() {
        let mut session = session(HostKind::FlexLayout);
        session.set_field(Field::FlexGrow, "2.5");
        session.set_field(Field::FlexGrow, "minus one");

        assert!(session.has_error(Field::FlexGrow));
        assert_eq!(session.working().flex_grow, 2.5);
        assert!(!session.can_commit());
    }

    #[test]
    fn test_invalid_input_does_not_touch_other_fields() {
        let mut session = session(HostKind::FlexLayout);
        session.set_field(Field::Width, "-3");

        assert!(session.has_error(Field::Width));
        assert!(!session.has_error(Field::Height));
        assert_eq!(session.error_count(), 1);
    }

    #[test]
    fn test_negative_width_is_rejected() {
        let mut session = session(HostKind::FlexLayout);
        session.set_field(Field::Width, "-3");

        assert!(session.has_error(Field::Width));
        assert_eq!(session.working().width, WRAP_CONTENT);
        assert!(!session.can_commit());
    }

    #[test]
    fn test_width_sentinels_accepted_verbatim() {
        let mut session = EditSession::new(
            &FlexItemAttributes::new(),
            HostKind::FlexLayout,
            DisplayMetrics::new(2.0),
        );

        session.set_field(Field::Width, "-1");
        assert_eq!(session.working().width, MATCH_PARENT);

        session.set_field(Field::Width, "-2");
        assert_eq!(session.working().width, WRAP_CONTENT);
    }

    #[test]
    fn test_length_input_converts_display_to_native() {
        let mut session = EditSession::new(
            &FlexItemAttributes::new(),
            HostKind::FlexLayout,
            DisplayMetrics::new(2.0),
        );

        session.set_field(Field::Width, "100");
        session.set_field(Field::MinHeight, "10");

        assert_eq!(session.working().width, 200);
        assert_eq!(session.working().min_height, 20);
    }

    #[test]
    fn test_flex_basis_percent_sentinel_stored_verbatim() {
        let mut session = session(HostKind::FlexLayout);

        session.set_field(Field::FlexBasisPercent, "-1");
        assert_eq!(session.working().flex_basis_percent, -1.0);

        session.set_field(Field::FlexBasisPercent, "40");
        assert_eq!(session.working().flex_basis_percent, 0.40);
    }

    #[test]
    fn test_order_ignored_without_host_support() {
        let mut session = session(HostKind::RecyclerLayout);

        session.set_field(Field::Order, "5");
        assert_eq!(session.working().order, 1);
        assert!(!session.has_error(Field::Order));

        // Not even garbage input flags the field
        session.set_field(Field::Order, "garbage");
        assert!(!session.has_error(Field::Order));
        assert!(session.can_commit());
    }

    #[test]
    fn test_commit_never_writes_order_without_host_support() {
        let live = FlexItemAttributes::new();
        let mut session =
            EditSession::new(&live, HostKind::RecyclerLayout, DisplayMetrics::default());

        session.set_field(Field::Order, "5");
        session.set_field(Field::FlexGrow, "1.5");

        let mut target = live.clone();
        target.order = 7;
        session.commit(&mut target).unwrap();

        assert_eq!(target.order, 7);
        assert_eq!(target.flex_grow, 1.5);
    }

    #[test]
    fn test_commit_rejected_while_any_field_invalid() {
        let mut session = session(HostKind::FlexLayout);
        session.set_field(Field::FlexGrow, "2.5");
        session.set_field(Field::MaxWidth, "-1"); // no sentinels on constraints

        let before = FlexItemAttributes::new();
        let mut target = before.clone();
        let err = session.commit(&mut target).unwrap_err();

        assert!(matches!(err, Error::InvalidFields { count: 1 }));
        // No partial copy: the valid flex_grow edit was not applied either.
        assert_eq!(target, before);
    }

    #[test]
    fn test_commit_unblocked_after_field_corrected() {
        let mut session = session(HostKind::FlexLayout);
        session.set_field(Field::MaxWidth, "-1");
        assert!(!session.can_commit());

        session.set_field(Field::MaxWidth, "300");
        assert!(session.can_commit());

        let mut target = FlexItemAttributes::new();
        session.commit(&mut target).unwrap();
        assert_eq!(target.max_width, 300);
    }

    #[test]
    fn test_untouched_fields_never_block_commit() {
        // Initial values outside every validator's domain do not matter;
        // validation is input-driven.
        let mut live = FlexItemAttributes::new();
        live.flex_grow = -5.0;
        live.min_width = -10;

        let session = EditSession::new(&live, HostKind::FlexLayout, DisplayMetrics::default());
        assert!(session.can_commit());
    }

    #[test]
    fn test_cancel_restores_original_and_is_idempotent() {
        let live = FlexItemAttributes::new();
        let mut session = EditSession::new(&live, HostKind::FlexLayout, DisplayMetrics::default());
        session.set_field(Field::FlexGrow, "9");
        session.set_wrap_before(true);

        let mut target = live.clone();
        session.commit(&mut target).unwrap();
        assert_ne!(target, live);

        session.cancel(&mut target);
        assert_eq!(target, live);

        session.cancel(&mut target);
        assert_eq!(target, live);
    }

    #[test]
    fn test_choice_setters_update_draft_directly() {
        let mut session = session(HostKind::FlexLayout);

        session.set_align_self(AlignSelf::Baseline);
        session.set_wrap_before(true);

        assert_eq!(session.working().align_self, AlignSelf::Baseline);
        assert!(session.working().wrap_before);
        assert!(session.can_commit());
    }

    #[test]
    fn test_field_text_presentation() {
        let mut live = FlexItemAttributes::new();
        live.width = 200;
        live.height = MATCH_PARENT;
        live.flex_basis_percent = 0.4;

        let session = EditSession::new(&live, HostKind::FlexLayout, DisplayMetrics::new(2.0));

        assert_eq!(session.field_text(Field::Width), "100");
        assert_eq!(session.field_text(Field::Height), "-1");
        assert_eq!(session.field_text(Field::FlexBasisPercent), "40");
        assert_eq!(session.field_text(Field::Order), "1");

        let unset = session.field_text(Field::FlexGrow);
        assert_eq!(unset, "0");
    }

    #[test]
    fn test_field_text_percent_sentinel() {
        let session = session(HostKind::FlexLayout);
        assert_eq!(session.field_text(Field::FlexBasisPercent), "-1");
    }

    #[test]
    fn test_validation_changed_fires_on_transitions_only() {
        let mut session = session(HostKind::FlexLayout);
        let events = Arc::new(AtomicUsize::new(0));

        let recv = events.clone();
        session.validation_changed.connect(move |_| {
            recv.fetch_add(1, Ordering::SeqCst);
        });

        session.set_field(Field::Width, "abc"); // valid -> invalid
        session.set_field(Field::Width, "xyz"); // still invalid
        session.set_field(Field::Width, "50"); // invalid -> valid
        session.set_field(Field::Width, "60"); // still valid

        assert_eq!(events.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_every_field_has_a_validator() {
        for field in Field::ALL {
            assert!(!field.validator().validate(""), "{}", field.name());
        }
    }
}
