use std::sync::Arc;

use configs::{DroidConfig, GreetingConfig};
use service::coffee::{CoffeeRepository, CoffeeService};

pub type SharedCoffeeService = Arc<CoffeeService<dyn CoffeeRepository>>;

/// Shared state handed to every handler. Built once at startup.
#[derive(Clone)]
pub struct ServerState {
    pub coffees: SharedCoffeeService,
    pub greeting: Arc<GreetingConfig>,
    pub droid: Arc<DroidConfig>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn CoffeeRepository>, greeting: GreetingConfig, droid: DroidConfig) -> Self {
        Self {
            coffees: Arc::new(CoffeeService::new(repo)),
            greeting: Arc::new(greeting),
            droid: Arc::new(droid),
        }
    }
}
