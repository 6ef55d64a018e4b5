mod booking;
mod status;
mod venue;
mod waitlist;

pub mod dtos {
    pub use crate::booking::dtos::*;
    pub use crate::venue::dtos::*;
    pub use crate::waitlist::dtos::*;
}

pub use crate::booking::api::*;
pub use crate::status::api::*;
pub use crate::venue::api::*;
pub use crate::waitlist::api::*;
