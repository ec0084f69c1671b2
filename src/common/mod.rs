//! Common, shared types.

pub mod actor;
pub mod collision;
pub mod state;
pub mod tunables;
pub mod units;

#[cfg(test)]
pub mod test_utils;
