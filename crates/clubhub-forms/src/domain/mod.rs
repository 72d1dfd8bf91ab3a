//! Form domain: field value objects, the registration aggregate and its events

pub mod aggregates;
pub mod events;
pub mod value_objects;
