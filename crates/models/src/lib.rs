pub mod errors;
pub mod coffee;

pub use coffee::{Coffee, CoffeeInput};
