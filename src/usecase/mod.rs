pub mod list_group_usecase;
pub mod lookup_friend_code_usecase;
pub mod register_friend_code_usecase;

#[cfg(test)]
pub(crate) mod test_support;
