#[macro_use]
extern crate diesel;

pub mod actions;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
#[rustfmt::skip]
pub mod schema;
pub mod service;
pub mod store;
