//! Console output

pub mod console;
pub mod observer;
