//! Graph input/output in the PACE 2020 text format.

pub mod pace;
