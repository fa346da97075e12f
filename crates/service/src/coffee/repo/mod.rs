//! Backings for `CoffeeRepository`. Both keep records in an id-keyed,
//! insertion-ordered map and share the mutation rules below.

use indexmap::{map::Entry, IndexMap};

use super::domain::{Coffee, UpsertOutcome};
use crate::errors::ServiceError;

pub mod memory;
pub mod json_file;

pub(crate) type CoffeeMap = IndexMap<String, Coffee>;

pub(crate) fn insert_new(map: &mut CoffeeMap, coffee: Coffee) -> Result<Coffee, ServiceError> {
    match map.entry(coffee.id.clone()) {
        Entry::Occupied(_) => Err(ServiceError::conflict("coffee", &coffee.id)),
        Entry::Vacant(slot) => Ok(slot.insert(coffee).clone()),
    }
}

pub(crate) fn upsert(map: &mut CoffeeMap, coffee: Coffee) -> (Coffee, UpsertOutcome) {
    match map.entry(coffee.id.clone()) {
        Entry::Occupied(mut slot) => {
            slot.get_mut().name = coffee.name;
            (slot.get().clone(), UpsertOutcome::Updated)
        }
        Entry::Vacant(slot) => (slot.insert(coffee).clone(), UpsertOutcome::Created),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_keeps_position_and_id() {
        let mut map = CoffeeMap::new();
        let a = insert_new(&mut map, Coffee::new("A")).expect("insert a");
        insert_new(&mut map, Coffee::new("B")).expect("insert b");

        let (stored, outcome) = upsert(&mut map, Coffee { id: a.id.clone(), name: "A2".into() });
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(stored.id, a.id);
        let names: Vec<_> = map.values().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A2", "B"]);
    }

    #[test]
    fn insert_new_refuses_taken_id() {
        let mut map = CoffeeMap::new();
        insert_new(&mut map, Coffee { id: "x".into(), name: "one".into() }).expect("first insert");
        let err = insert_new(&mut map, Coffee { id: "x".into(), name: "two".into() });
        assert!(matches!(err, Err(ServiceError::Conflict(_))));
        assert_eq!(map["x"].name, "one");
    }
}
