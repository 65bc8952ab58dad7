#![forbid(unsafe_code)]

mod ancestors;
mod descendants;
mod forest;
mod siblings;
