#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

mod config;
pub mod controllers;
pub mod dal;
pub mod import;
pub mod models;
pub mod notify;
pub mod scoring;
pub mod web;

pub use crate::config::{Config, ScoringConfig};
pub use crate::dal::Db;
