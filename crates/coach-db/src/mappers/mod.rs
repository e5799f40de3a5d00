//! Model to entity mappers
//!
//! `From<Model> for Entity` where every column maps cleanly, `TryFrom` where a
//! stored value must be validated (relationship status).

mod relationship;
mod training;
mod user;
