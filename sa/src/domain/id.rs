//! Item ID generation and assignment
//!
//! Item IDs use the format: `{6-char-hex}-{kind}-{slug}`
//! Example: `019430-meeting-cs101-lecture`

use tracing::debug;

use super::question::TargetType;
use super::schedule::Schedule;

/// Generate a unique item ID from kind and description
///
/// The hex prefix comes from a UUIDv7, so collisions are negligible and IDs
/// sort roughly by creation time.
pub fn generate_item_id(kind: TargetType, description: &str) -> String {
    let uuid = uuid::Uuid::now_v7();
    let hex_prefix = &uuid.simple().to_string()[..6];
    let slug = slugify(description);
    if slug.is_empty() {
        format!("{}-{}", hex_prefix, kind)
    } else {
        format!("{}-{}-{}", hex_prefix, kind, slug)
    }
}

/// Slugify a description for use in IDs
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else if c == '\'' || c == '\u{2019}' || c == '\u{2018}' {
            // Apostrophes vanish rather than splitting words
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Assign IDs to every meeting and task that lacks one
///
/// Existing IDs are never altered, so the pass is idempotent.
pub fn ensure_ids(schedule: &mut Schedule) {
    for meeting in &mut schedule.meetings {
        if meeting.id.as_deref().is_none_or(str::is_empty) {
            let id = generate_item_id(TargetType::Meeting, &meeting.description);
            debug!(%id, description = %meeting.description, "ensure_ids: assigned meeting id");
            meeting.id = Some(id);
        }
    }
    for task in &mut schedule.tasks {
        if task.id.as_deref().is_none_or(str::is_empty) {
            let id = generate_item_id(TargetType::Task, &task.description);
            debug!(%id, description = %task.description, "ensure_ids: assigned task id");
            task.id = Some(id);
        }
    }
}
