mod auth;

pub use auth::CredentialStore;
