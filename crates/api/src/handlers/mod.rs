//! Request handlers, one module per resource.

pub mod event;
pub mod message;
pub mod notification;
pub mod review;
pub mod shift;
pub mod time;
