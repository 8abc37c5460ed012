pub mod dispatcher;
pub mod handlers;
pub mod render;
pub mod update_loop;

#[cfg(test)]
pub(crate) mod test_support;
