pub mod config;
pub mod logging;

pub mod action;
pub mod checksum;
pub mod filename;
pub mod form;
pub mod job;
pub mod progress;
pub mod save;
pub mod selection;
pub mod service;
