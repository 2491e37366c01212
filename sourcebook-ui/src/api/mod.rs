//! Backend API
//!
//! HTTP calls against the project/source backend via gloo-net.

mod client;

pub use client::*;
