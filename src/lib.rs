//! Monthly economic-activity survey dashboard.
//!
//! The survey table is loaded once ([`data::loader`]), turned into selector
//! lists ([`data::options`]) and, on every selection, into one line per
//! requested year ([`data::series`]). Two front ends sit on top: a web server
//! ([`web`]) and a native viewer ([`app`]).

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;
pub mod web;
