#![doc = "The `tasktracker` library crate."]
#![doc = ""]
#![doc = "Core business logic for the task tracker API: domain models, the"]
#![doc = "authentication boundary (password hashing, JWT issuance/verification,"]
#![doc = "bearer-token middleware), per-user task CRUD routes, and error handling."]
#![doc = "The main binary (`main.rs`) wires these into an Actix application."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
