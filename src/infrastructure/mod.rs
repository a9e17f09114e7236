pub mod models;
pub mod rest;
pub mod snapshot;
