//! Desktop front end for the inventory audit service: pick the WMS and
//! physical count spreadsheets, ask the service for a report, save the
//! workbook it sends back.

pub mod app;
pub mod client;
pub mod config;
pub mod logging;
pub mod utils;
