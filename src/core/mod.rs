pub mod archive;
pub mod config;
pub mod download;
pub mod installer;
pub mod progress;
pub mod version;

#[cfg(test)]
pub(crate) mod test_support;
