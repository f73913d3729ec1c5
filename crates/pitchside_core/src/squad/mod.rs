//! # Squad Selection
//!
//! - `formation` - 4-3-3 slot roles and pitch layout
//! - `selector` - greedy quota-based best XI assignment

pub mod formation;
pub mod selector;

pub use formation::{slot_count, LayoutPosition, SlotRole, FORMATION_433};
pub use selector::{select_squad, SlotAssignment, SquadSelection};
