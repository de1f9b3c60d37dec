pub mod error;
pub mod query;
pub mod response;
pub mod url;

#[cfg(test)]
pub mod test_support;
