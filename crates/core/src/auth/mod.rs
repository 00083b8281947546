mod error;
mod functions;
mod types;
mod validation;

pub use error::SessionError;
pub use functions::{
    check_claims, decode_session, encode_session, generate_secret, validate_session,
    verify_credentials, SECRET_LEN,
};
pub use types::{AdminCredentials, SessionClaims};
pub use validation::{dashboard_return_to, validate_return_to, DEFAULT_RETURN_TO};
