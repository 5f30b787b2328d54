//! Interactive professional-network graph view.
//!
//! [`network`] is the headless engine: a validated [`network::GraphModel`], the
//! world/screen [`network::ViewTransform`], hit-testing, search highlight, the
//! render pipeline over an injected [`network::Surface`], and the
//! [`network::ViewportController`] that ties pointer and button events to all of
//! them. [`dataset`] and [`config`] load its inputs.

pub mod config;
pub mod dataset;
pub mod network;
pub mod util;
