//! Descriptor parsing

mod descriptor;
mod names;
mod slots;
mod type_keyword;

pub use descriptor::{parse_descriptors, Descriptor};
pub use names::{normalize, storage_field};
pub use slots::{
    DefaultSlot, NameSlot, NullDefaultSlot, SlotCursor, TypeSlot, NOT_NULLABLE_SENTINEL,
    NULLABLE_SENTINEL,
};
pub use type_keyword::{lookup_keyword, TypeKeyword, BOOLEAN_KEYWORD};
