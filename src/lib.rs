//! Booking service for a sports-club competition platform
//!
//! Clubs log in with their email address and spend points to reserve places in competitions.
//! The crate follows a ports and adapters layout:
//!
//! * [`domain`] holds the records and the booking rules,
//! * [`ports`] defines what the domain needs from the outside world,
//! * [`commands`] implements each use case as a [`tower::Service`],
//! * [`adapters`] provides the in-memory store, the data file loader and the HTTP surface.

pub mod adapters;
pub mod commands;
pub mod config;
pub mod domain;
pub mod ports;
