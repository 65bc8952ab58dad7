#![forbid(unsafe_code)]

mod query;
mod rows;
mod scopes;
mod space;
mod subtree;

pub(super) use query::*;
pub(super) use rows::*;
pub(super) use scopes::*;
pub(super) use space::*;
pub(super) use subtree::*;
