//! HTTP client layer.

pub mod client;

pub use client::MarketDataHttp;
