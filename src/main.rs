#![allow(warnings)]
//! Broker Todo Frontend Entry Point

mod error;
mod models;
mod date_utils;
mod stats;
mod report;
mod export;
mod commands;
mod gateway;
mod logger;
mod preferences;
mod store;
mod context;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Debug, commands::is_tauri());
    mount_to_body(App);
}
