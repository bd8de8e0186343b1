mod integration;
mod invoice;
mod reminder;
mod settings;
mod status;

pub mod dtos {
    pub use crate::integration::dtos::*;
    pub use crate::invoice::dtos::*;
    pub use crate::reminder::dtos::*;
    pub use crate::settings::dtos::*;
}

pub use crate::integration::api::*;
pub use crate::invoice::api::*;
pub use crate::reminder::api::*;
pub use crate::settings::api::*;
pub use crate::status::api::*;
