pub mod kind;
pub mod record_type;

pub use kind::{DisplayColor, RecordKind};
pub use record_type::RecordType;
