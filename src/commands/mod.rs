pub mod install;
pub mod versions;
