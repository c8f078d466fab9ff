mod binding;
mod extractor;
mod util;
mod server;
mod state;
mod layers;
mod handlers;
mod setup;
mod logger;
mod routes;
mod controller;
pub mod cli;

pub const APP_NAME: &str = "paramguard";

pub use crate::server::app;
