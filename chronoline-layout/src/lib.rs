//! Chronoline presentation engine
//!
//! Pure layout computation for the historical-figure timeline: filtering,
//! display ordering, year-to-pixel mapping, greedy row packing, century
//! decoration, and the small interaction state machines the client needs.
//!
//! Everything here is a function of its inputs. No I/O, no timers, no hidden
//! state: [`compute_layout`] takes a snapshot of person records plus the
//! active [`FilterState`] and returns a complete [`Layout`] the renderer can
//! draw directly.

pub mod century;
pub mod filter;
pub mod hover;
pub mod layout;
pub mod person;
pub mod requests;
pub mod rows;
pub mod scale;

pub use layout::{compute_layout, Layout};
pub use person::{FilterState, Person, TimeRange};
pub use rows::RowPlacement;
pub use scale::TimeScale;
