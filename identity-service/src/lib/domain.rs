pub mod session;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;
