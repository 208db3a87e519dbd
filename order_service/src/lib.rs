// order_service/src/lib.rs

//! Order service: creates orders through a validate → verify → store → publish
//! workflow and serves them back over HTTP.

pub mod config;
pub mod errors;
pub mod models;
pub mod pipelines;
pub mod services;
pub mod state;
pub mod web;
