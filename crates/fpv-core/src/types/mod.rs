//! Value types shared by the path state, the rule pipeline and the snapshot
//! format.
//!
//! - [`Part`] is one path component with its two lifecycle statuses.
//! - [`Issue`] and [`Action`] are the log records produced by rules.

pub mod part;
pub mod record;

pub use part::CheckedStatus;
pub use part::CleanedStatus;
pub use part::ComponentType;
pub use part::Part;
pub use record::Action;
pub use record::Category;
pub use record::Details;
pub use record::Issue;
pub use record::RecordKind;
pub use record::Subtype;
