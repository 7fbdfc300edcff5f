// src/lib.rs

pub mod catalog;
pub mod config;
pub mod history;
pub mod http;
pub mod platforms;
pub mod services;
pub mod station;
pub mod tasks;

pub use radiobot_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient};
