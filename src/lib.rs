pub mod account;
pub mod config;
pub mod error;
pub mod token;

pub use account::AuthService;
pub use error::AuthError;
pub use token::TokenIssuer;
