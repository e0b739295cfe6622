pub mod cli;
pub mod config;
pub mod fetch;
pub mod git;
pub mod model;
pub mod registry;
pub mod repository;
pub mod resolver;
pub mod svn;
pub mod validate;

mod api;
mod flock;

pub use api::{Fetchdep, FetchdepBuilder};
