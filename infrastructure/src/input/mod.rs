//! Operator input adapters for [`UserInputPort`](eventcrew_application::UserInputPort).

mod console;

pub use console::{ConsoleInput, NoOperatorInput, StdinInput};
