pub mod log;
pub mod rate_limit;

#[cfg(test)]
pub(crate) mod stub_http;
