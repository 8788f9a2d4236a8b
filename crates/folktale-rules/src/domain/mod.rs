//! Rule sets and the tagged mechanic state.

pub mod calmness;
pub mod deduction;
pub mod mechanic;
pub mod riddle;
