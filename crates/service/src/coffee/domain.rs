pub use models::{Coffee, CoffeeInput};

/// What an upsert did: the boundary picks 201 for `Created`, 200 for `Updated`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record had the id; one was created with exactly that id.
    Created,
    /// A record existed; its name was replaced in place.
    Updated,
}

impl UpsertOutcome {
    pub fn is_created(self) -> bool {
        matches!(self, UpsertOutcome::Created)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UpsertOutcome::Created => "created",
            UpsertOutcome::Updated => "updated",
        }
    }
}
