#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod exercise;
mod filter;
mod listing;
mod pagination;
mod query;
mod service;
mod video;
mod workout;

pub use error::*;
pub use exercise::*;
pub use filter::*;
pub use listing::*;
pub use pagination::*;
pub use query::*;
pub use service::*;
pub use video::*;
pub use workout::*;
