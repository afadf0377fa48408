//! Schedule domain model
//!
//! Explicit typed structures for the schedule aggregate and its items,
//! validated at the boundary where external JSON is deserialized. The parser
//! may leave any subset of fields null; absence is data here, never an error.

mod field;
mod id;
mod meeting;
mod question;
mod schedule;
mod task;
mod timeofday;

pub use field::FieldName;
pub use id::{ensure_ids, generate_item_id, slugify};
pub use meeting::{Meeting, MeetingKind};
pub use question::{Question, QuestionKind, TargetType};
pub use schedule::Schedule;
pub use task::{Category, Priority, Task};
pub use timeofday::TimeOfDay;

use serde::{Deserialize, Deserializer};

/// Deserialize an optional string field, collapsing `""` to `None`
///
/// Parser output sometimes carries empty strings where it means "unknown";
/// the missing-info machinery treats both the same way.
pub(crate) fn empty_str_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
