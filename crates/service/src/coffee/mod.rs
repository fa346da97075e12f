//! Coffee module: three-layer architecture (domain, repository, service).
//!
//! `CoffeeService` owns the store semantics; `CoffeeRepository` is the storage
//! seam with an in-memory and a JSON-file backing under `repo`.

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::UpsertOutcome;
pub use repo::{json_file::JsonFileCoffeeRepository, memory::InMemoryCoffeeRepository};
pub use repository::CoffeeRepository;
pub use service::CoffeeService;
