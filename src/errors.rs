use thiserror::Error;

use crate::domain::checkout::ValidationErrors;
use crate::domain::errors::DomainError;

/// Application-level error surfaced by the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("admin login required (run 'admin login' first)")]
    LoginRequired,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_maps_transparently() {
        let app: AppError = DomainError::EmptyCart.into();
        assert_eq!(app.to_string(), "cart is empty");
        assert!(matches!(app, AppError::Domain(DomainError::EmptyCart)));
    }

    #[test]
    fn login_required_display() {
        assert_eq!(
            AppError::LoginRequired.to_string(),
            "admin login required (run 'admin login' first)"
        );
    }
}
