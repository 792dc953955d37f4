//! Users, password login and bearer sessions.
//!
//! Passwords are stored as salted PBKDF2-SHA256 hashes in the form
//! `pbkdf2-sha256$<iterations>$<salt>$<hash>` (base64, no padding). Session
//! tokens are random 32-byte values handed to the client once; only their
//! SHA-256 digest is persisted.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Duration, Utc};
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::authorization::Actor;
use crate::db::{repository, DatabaseError};
use crate::models::{Session, User, UserRole};

#[cfg(not(test))]
pub const PBKDF2_ITERATIONS: u32 = 600_000;
#[cfg(test)]
pub const PBKDF2_ITERATIONS: u32 = 1_000;

const HASH_SCHEME: &str = "pbkdf2-sha256";
const SALT_LENGTH: usize = 16;
const HASH_LENGTH: usize = 32;

/// Session lifetime handed out at login and registration.
pub const SESSION_LIFETIME_DAYS: i64 = 7;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired session token")]
    InvalidToken,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token plus the user it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub token_type: &'static str,
    pub user: User,
}

// ═══════════════════════════════════════════════════════════
// Passwords
// ═══════════════════════════════════════════════════════════

pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    let hash = derive(password, &salt, PBKDF2_ITERATIONS);
    format!(
        "{HASH_SCHEME}${PBKDF2_ITERATIONS}${}${}",
        URL_SAFE_NO_PAD.encode(salt),
        URL_SAFE_NO_PAD.encode(hash.as_slice())
    )
}

/// Constant-time check of `password` against a stored hash string.
/// Malformed hashes never verify.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };
    if scheme != HASH_SCHEME {
        return false;
    }
    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (URL_SAFE_NO_PAD.decode(salt), URL_SAFE_NO_PAD.decode(expected))
    else {
        return false;
    };

    let actual = derive(password, &salt, iterations);
    actual.as_slice().ct_eq(&expected).into()
}

fn derive(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; HASH_LENGTH]> {
    let mut out = Zeroizing::new([0u8; HASH_LENGTH]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut out[..]);
    out
}

// ═══════════════════════════════════════════════════════════
// Tokens
// ═══════════════════════════════════════════════════════════

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Digest stored in place of the token.
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    URL_SAFE_NO_PAD.encode(digest)
}

// ═══════════════════════════════════════════════════════════
// Operations
// ═══════════════════════════════════════════════════════════

fn normalize_email(email: &str) -> Result<String, IdentityError> {
    let email = email.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err(IdentityError::InvalidInput(format!("'{email}' is not an email address")));
    }
    Ok(email)
}

fn open_session(conn: &Connection, user: User) -> Result<AuthResponse, IdentityError> {
    let token = generate_token();
    let now = Utc::now();
    repository::insert_session(
        conn,
        &Session {
            token_hash: hash_token(&token),
            user_id: user.id,
            created_at: now,
            expires_at: now + Duration::days(SESSION_LIFETIME_DAYS),
        },
    )?;
    Ok(AuthResponse {
        token,
        token_type: "bearer",
        user,
    })
}

/// Create an account and log it in.
pub fn register(conn: &Connection, request: RegisterRequest) -> Result<AuthResponse, IdentityError> {
    let email = normalize_email(&request.email)?;
    let name = request.name.trim();
    if name.is_empty() {
        return Err(IdentityError::InvalidInput("name must not be empty".into()));
    }
    if request.password.is_empty() {
        return Err(IdentityError::InvalidInput("password must not be empty".into()));
    }
    if repository::email_exists(conn, &email)? {
        return Err(IdentityError::EmailTaken);
    }

    let user = User {
        id: Uuid::new_v4(),
        email,
        name: name.to_string(),
        role: request.role,
        created_at: Utc::now(),
    };
    let password_hash = hash_password(&request.password);
    repository::insert_user(conn, &user, &password_hash).map_err(|e| {
        if e.is_unique_violation() {
            IdentityError::EmailTaken
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    open_session(conn, user)
}

/// Verify credentials and issue a fresh session.
pub fn login(conn: &Connection, request: LoginRequest) -> Result<AuthResponse, IdentityError> {
    let email = request.email.trim().to_lowercase();
    let Some((user, stored_hash)) = repository::get_user_credentials(conn, &email)? else {
        return Err(IdentityError::InvalidCredentials);
    };
    if !verify_password(&request.password, &stored_hash) {
        tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
        return Err(IdentityError::InvalidCredentials);
    }

    let pruned = repository::prune_expired_sessions(conn, &Utc::now())?;
    if pruned > 0 {
        tracing::debug!(pruned, "Expired sessions removed");
    }
    open_session(conn, user)
}

/// Resolve a bearer token to the acting user.
pub fn resolve_token(conn: &Connection, token: &str) -> Result<(Actor, User), IdentityError> {
    let user_id = repository::get_session_user(conn, &hash_token(token), &Utc::now())?
        .ok_or(IdentityError::InvalidToken)?;
    let user = repository::get_user(conn, &user_id)?.ok_or(IdentityError::InvalidToken)?;
    Ok((Actor::new(user.id, user.role), user))
}

pub fn logout(conn: &Connection, token: &str) -> Result<(), IdentityError> {
    repository::delete_session(conn, &hash_token(token))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::open_memory_database;

    fn register_request(email: &str, role: UserRole) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: "TestPass123!".into(),
            name: "Dana Reyes".into(),
            role,
        }
    }

    #[test]
    fn password_hash_verifies_and_is_salted() {
        let h1 = hash_password("correct horse");
        let h2 = hash_password("correct horse");
        assert_ne!(h1, h2);
        assert!(h1.starts_with("pbkdf2-sha256$"));
        assert!(verify_password("correct horse", &h1));
        assert!(verify_password("correct horse", &h2));
        assert!(!verify_password("wrong horse", &h1));
    }

    #[test]
    fn malformed_hashes_never_verify() {
        assert!(!verify_password("x", ""));
        assert!(!verify_password("x", "plain-text"));
        assert!(!verify_password("x", "bcrypt$10$abc$def"));
        assert!(!verify_password("x", "pbkdf2-sha256$many$abc$def"));
        assert!(!verify_password("x", "pbkdf2-sha256$1000$abc$def$extra"));
    }

    #[test]
    fn generate_token_is_unique() {
        let t1 = generate_token();
        let t2 = generate_token();
        assert_ne!(t1, t2);
        assert!(!t1.is_empty());
    }

    #[test]
    fn hash_token_is_deterministic() {
        assert_eq!(hash_token("test"), hash_token("test"));
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }

    #[test]
    fn register_then_resolve_token() {
        let conn = open_memory_database().unwrap();
        let auth = register(&conn, register_request("Donor@Example.org", UserRole::Donor)).unwrap();
        assert_eq!(auth.user.email, "donor@example.org");
        assert_eq!(auth.token_type, "bearer");

        let (actor, user) = resolve_token(&conn, &auth.token).unwrap();
        assert_eq!(actor, Actor::new(auth.user.id, UserRole::Donor));
        assert_eq!(user, auth.user);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let conn = open_memory_database().unwrap();
        register(&conn, register_request("h@clinic.org", UserRole::Hospital)).unwrap();
        let err = register(&conn, register_request("H@clinic.org", UserRole::Donor)).unwrap_err();
        assert!(matches!(err, IdentityError::EmailTaken));
    }

    #[test]
    fn invalid_registration_input() {
        let conn = open_memory_database().unwrap();
        let err = register(&conn, register_request("not-an-email", UserRole::Donor)).unwrap_err();
        assert!(matches!(err, IdentityError::InvalidInput(_)));

        let mut req = register_request("a@b.org", UserRole::Donor);
        req.name = "   ".into();
        assert!(matches!(register(&conn, req).unwrap_err(), IdentityError::InvalidInput(_)));
    }

    #[test]
    fn login_checks_password() {
        let conn = open_memory_database().unwrap();
        register(&conn, register_request("r@example.org", UserRole::Recipient)).unwrap();

        let ok = login(
            &conn,
            LoginRequest {
                email: "r@example.org".into(),
                password: "TestPass123!".into(),
            },
        )
        .unwrap();
        assert_eq!(ok.user.role, UserRole::Recipient);

        let err = login(
            &conn,
            LoginRequest {
                email: "r@example.org".into(),
                password: "wrongpassword".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));

        let err = login(
            &conn,
            LoginRequest {
                email: "nobody@example.org".into(),
                password: "TestPass123!".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, IdentityError::InvalidCredentials));
    }

    #[test]
    fn logout_revokes_token() {
        let conn = open_memory_database().unwrap();
        let auth = register(&conn, register_request("h@example.org", UserRole::Hospital)).unwrap();
        logout(&conn, &auth.token).unwrap();
        assert!(matches!(
            resolve_token(&conn, &auth.token).unwrap_err(),
            IdentityError::InvalidToken
        ));
    }

    #[test]
    fn unknown_token_is_invalid() {
        let conn = open_memory_database().unwrap();
        assert!(matches!(
            resolve_token(&conn, "forged").unwrap_err(),
            IdentityError::InvalidToken
        ));
    }
}
