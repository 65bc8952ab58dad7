#![forbid(unsafe_code)]

mod delete;
mod get;
mod insert;
mod make_root;
mod moves;
mod rebuild;
mod update;
