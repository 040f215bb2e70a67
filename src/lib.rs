#[macro_use]
extern crate diesel;

pub mod actions;
pub mod cards;
pub mod choices;
pub mod config;
pub mod error;
pub mod models;
#[rustfmt::skip]
pub mod schema;
