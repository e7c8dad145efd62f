//! Registration, login, and the bearer-token machinery that protects the
//! rest of the API.

mod log_in;
mod middleware;
mod profile;
mod register;
mod token;

pub use log_in::log_in;
pub use middleware::{CurrentUser, auth_guard};
pub use profile::get_auth_profile;
pub use register::register;
pub use token::{Claims, JwtKeys, TOKEN_DURATION, decode_token, encode_token};
