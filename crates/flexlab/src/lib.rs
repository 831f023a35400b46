//! Interactive editing core for flex layout item attributes.
//!
//! flexlab models the part of a flex-container playground that carries real
//! state: the per-item attribute set (`order`, grow/shrink factors, basis
//! percentage, lengths and constraints, alignment override, wrap flag), the
//! edit interaction over one item, and the lifecycle of the container's item
//! collection. Rendering, widget presentation and the layout algorithm that
//! eventually consumes the attributes are external collaborators.
//!
//! - [`FlexItemAttributes`] is the value type: one per item, plain data,
//!   every field validating only its own domain.
//! - [`EditSession`] runs one edit interaction on an owned working copy,
//!   validating each text field as it is typed and committing or discarding
//!   the whole draft as a unit.
//! - [`FlexItemCollection`] owns the live items: index-stable append and
//!   tail removal, identity-based callback dispatch, and a snapshot/restore
//!   boundary built on ordered [`FlexItemRecord`]s.
//!
//! # Example
//!
//! ```
//! use flexlab::{Field, FlexItemAttributes, FlexItemCollection, HostKind};
//!
//! let mut items = FlexItemCollection::new(HostKind::FlexLayout);
//!
//! // React to committed edits (the UI would re-apply the attributes here).
//! items.signals().attributes_committed.connect(|(index, attrs)| {
//!     println!("item {} now grows by {}", index, attrs.flex_grow);
//! });
//!
//! // Add an item and edit it.
//! let index = items.append(FlexItemAttributes::new());
//! let key = items.key_at(index).unwrap();
//!
//! let mut session = items.open_editor(index).unwrap();
//! session.set_field(Field::FlexGrow, "2.5");
//! session.set_field(Field::Width, "120");
//! assert!(session.can_commit());
//!
//! items.commit_session(key, &session).unwrap();
//! assert_eq!(items.get(index).unwrap().flex_grow, 2.5);
//! ```

pub mod attrs;
pub mod collection;
pub mod edit;
pub mod error;
pub mod units;
pub mod validator;

pub use attrs::{
    AlignSelf, FLEX_BASIS_PERCENT_DEFAULT, FlexItemAttributes, HostKind, MATCH_PARENT, MAX_SIZE,
    WRAP_CONTENT, is_dimension_sentinel,
};
pub use collection::{CollectionSignals, FlexItemCollection, FlexItemRecord, ItemKey};
pub use edit::{EditSession, Field};
pub use error::{Error, Result};
pub use units::DisplayMetrics;
pub use validator::{
    DimensionValidator, FixedDimensionValidator, FlexBasisPercentValidator, IntegerValidator,
    NonNegativeDecimalValidator, Validator,
};
