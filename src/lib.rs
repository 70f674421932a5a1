//! Load layout engine for transport decks.
//!
//! Places heavy equipment on the deck of a roll-off or lowboy, validates the
//! arrangement against the deck's limits, detects overlapping items and
//! reports the load balance.
//!
//! The engine is pure: every operation takes the current arrangement and
//! returns a new one or a report. [`session::LayoutSession`] layers the
//! drag/rotate/auto-arrange gestures on top, and [`api`] exposes the engine
//! over HTTP.

pub mod api;
pub mod balance;
pub mod capacity;
pub mod collision;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod report;
pub mod session;
pub mod types;
pub mod validation;
pub mod view;
