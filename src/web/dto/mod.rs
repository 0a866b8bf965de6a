//! Data transfer objects for the villadesk API.

mod request;
mod response;

pub use request::{ChangePasswordRequest, ContactRequest, LoginRequest};
pub use response::{AuthStatusResponse, LoginResponse, MessageResponse, UserInfo};
