//! sea-orm entities for the two registry tables.

pub mod group_membership;
pub mod user_friend_code;
