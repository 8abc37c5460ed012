//! Reply texts and Markdown rendering of registry records.

use crate::domain::models::user::UserFriendCode;

pub const REGISTERED: &str = "Done.";
pub const FORMAT_GUIDANCE: &str = "Unrecognized friend code. Send the full code (SW-1234-5678-9012) or its 12 digits without dashes or SW.";
pub const RETRY: &str = "Something went wrong, please try again.";
pub const ALREADY_REGISTERED: &str = "That friend code is already registered by someone else.";
pub const TARGET_NOT_REGISTERED: &str = "They haven't told me their friend code yet.";
pub const TARGET_NOT_IN_GROUP: &str = "They haven't shared their friend code in this group.";
pub const SELF_NOT_REGISTERED: &str = "You haven't told me your friend code yet.\nUse /addfc to add it.";
pub const VISIBILITY_GRANTED: &str = "Your friend code is now visible to this group.";

/// Link text for a legacy Markdown mention. Backslash escapes are shown
/// literally inside a link, so the name is kept as is; only `]`, which
/// would end the link early, is swapped for `)`.
pub fn link_text(name: &str) -> String {
    name.replace(']', ")")
}

/// `[name](tg://user?id=N): SW-dddd-dddd-dddd`
pub fn mention_line(record: &UserFriendCode) -> String {
    format!(
        "[{}](tg://user?id={}): {}",
        link_text(record.display_name()),
        record.user_id().as_i64(),
        record.friend_code()
    )
}

pub fn member_list(records: &[UserFriendCode]) -> String {
    records
        .iter()
        .map(mention_line)
        .collect::<Vec<_>>()
        .join("\n")
}
