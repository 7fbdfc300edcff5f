// File: radiobot-common/src/traits/mod.rs
pub mod api;
