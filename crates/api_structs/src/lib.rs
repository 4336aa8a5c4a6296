mod error;
mod event;
mod export;
mod reminder;
mod schedule;
mod status;

pub mod dtos {
    pub use crate::event::dtos::*;
    pub use crate::reminder::dtos::*;
}

pub use crate::error::ErrorResponse;
pub use crate::event::api::*;
pub use crate::export::api::*;
pub use crate::reminder::api::*;
pub use crate::schedule::api::*;
pub use crate::status::api::*;
