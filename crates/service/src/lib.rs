//! Service layer providing the coffee store on top of `models`.
//! - Separates the store semantics (create/upsert/delete) from storage backings.
//! - Storage backings are pluggable behind the `CoffeeRepository` trait.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod coffee;
