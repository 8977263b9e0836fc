//! # Engine Module
//!
//! The stateful layer of the lab: everything that changes while a session runs, and the pure
//! evaluators that decide what those changes mean.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Temperature limits, heating step and simulated delays
//! - **Beaker State** ([`state`]) - The mutable contents of the beaker and the reacting flag
//! - **Safety** ([`safety`]) - Hazardous-combination checks producing a single active alert
//! - **Reactions** ([`reactions`]) - The fixed recipe table and its presence-based evaluation
//! - **Equipment Effects** ([`equipment`]) - Maps a piece of equipment to heat, stir or no effect
//! - **Scheduling** ([`scheduler`]) - Deferred tasks on a logical clock
//! - **Notebook** ([`observations`]) - Append-only, timestamped observation log
//! - **Events** ([`events`]) - Callback-based reporting of session changes to a front end
//! - **Error Handling** ([`error`]) - Engine-wide error type

pub mod config;
pub mod equipment;
pub mod error;
pub mod events;
pub mod observations;
pub mod reactions;
pub mod safety;
pub mod scheduler;
pub mod state;
