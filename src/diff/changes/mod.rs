//! Concrete `Change` implementations, one module per object type. Each
//! reproduces the exact DDL text its object kind renders, trimmed to the
//! fields a diff actually needs to hand the scheduler (no live-catalog
//! types here).

mod extension;
mod index;
mod schema;
mod sequence;
mod table;
mod trigger;
mod util;
mod view;

pub use extension::ExtensionChange;
pub use index::{IndexChange, IndexColumnDef};
pub use schema::SchemaChange;
pub use sequence::SequenceChange;
pub use table::{ColumnDef, PrimaryKeyDef, TableChange};
pub use trigger::TriggerChange;
pub use view::ViewChange;
