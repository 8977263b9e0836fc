//! # chemlab
//!
//! The simulation core of a virtual chemistry lab: a beaker that elements and compounds can be
//! added to, laboratory equipment that heats or stirs it, a small table of reaction recipes, and
//! the safety checks that warn about hazardous combinations.
//!
//! ## Layout
//!
//! - **[`core`]: Reference data.** Immutable records (`Element`, `Compound`, `Equipment`), the
//!   built-in catalog they are drawn from, and formula utilities.
//!
//! - **[`engine`]: The Logic Core.** Beaker contents, the safety and reaction evaluators, the
//!   deferred-task scheduler that simulates reaction time, and the observation notebook.
//!
//! - **[`workflows`]: The Public API.** [`workflows::session::LabSession`] owns one lab session
//!   and exposes every user action as a method; [`workflows::view`] derives the read model a
//!   renderer draws from.

pub mod core;
pub mod engine;
pub mod workflows;
