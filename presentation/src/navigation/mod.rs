//! Navigation adapters

mod console;

pub use console::ConsoleNavigator;
