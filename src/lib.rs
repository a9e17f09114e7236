//! Client core for an açaí delivery storefront.
//!
//! The crate is split the same way the app is: `domain` holds the data
//! model and business rules (cart identity and merging, complement
//! selection limits, checkout validation, order assembly), `application`
//! holds the stores the views consume, `infrastructure` implements the
//! ports (REST client for the remote backend, file-backed snapshots for
//! the cart and session), and `cli` is the view surface.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

pub use config::Config;
pub use errors::AppError;
