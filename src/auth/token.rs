//! Creating and verifying the signed bearer tokens that authenticate API requests.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, user::UserID};

/// How long a token stays valid after it is issued.
pub const TOKEN_DURATION: Duration = Duration::days(30);

/// The signing and verification keys derived from the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive the key pair from the shared `secret`.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// The contents of a bearer token.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// The ID of the user the token was issued to.
    pub id: UserID,
    /// The time the token was issued, as a unix timestamp.
    pub iat: i64,
    /// The expiry time of the token, as a unix timestamp.
    pub exp: i64,
}

/// Create a signed token for the user with ID `user_id`.
///
/// # Errors
///
/// Returns a [Error::TokenCreation] if signing fails.
pub fn encode_token(user_id: UserID, keys: &JwtKeys) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        id: user_id,
        iat: now.unix_timestamp(),
        exp: (now + TOKEN_DURATION).unix_timestamp(),
    };

    encode(&Header::default(), &claims, &keys.encoding).map_err(|_| Error::TokenCreation)
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
///
/// Returns a [Error::InvalidToken] if the token is malformed, was signed with
/// a different secret, or has expired.
pub fn decode_token(token: &str, keys: &JwtKeys) -> Result<Claims, Error> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|_| Error::InvalidToken)
}
