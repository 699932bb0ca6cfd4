#![allow(clippy::new_without_default)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod arrival_detector;
pub mod config;
pub mod display;
pub mod gps_processor;
pub mod location_event;
pub mod logs;
pub mod notification;
pub mod replay;
pub mod session;
