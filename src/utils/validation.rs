use crate::types::{AppError, ForgotPasswordRequest, LoginRequest, Result, SignupRequest};
use once_cell::sync::Lazy;
use regex::Regex;

static LOOSE_EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static regex"));

static STRICT_EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("static regex")
});

const MIN_PASSWORD_LEN: usize = 6;

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        if self.email.is_empty() {
            return Err(AppError::InvalidInput("Email is required".to_string()));
        }
        if !LOOSE_EMAIL.is_match(&self.email) {
            return Err(AppError::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::InvalidInput(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(())
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidInput("Full name is required".to_string()));
        }
        if self.email.is_empty() {
            return Err(AppError::InvalidInput("Email is required".to_string()));
        }
        if !STRICT_EMAIL.is_match(&self.email) {
            return Err(AppError::InvalidInput(
                "Please enter a valid email address".to_string(),
            ));
        }
        Ok(())
    }
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(AppError::InvalidInput("Email is required".to_string()));
        }
        if !LOOSE_EMAIL.is_match(&self.email) {
            return Err(AppError::InvalidInput("Please enter a valid email".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[rstest]
    #[case::ok("alice@example.com", "secret1", true)]
    #[case::missing_email("", "secret1", false)]
    #[case::no_at("alice.example.com", "secret1", false)]
    #[case::no_dot("alice@example", "secret1", false)]
    #[case::short_password("alice@example.com", "12345", false)]
    #[case::six_chars("alice@example.com", "123456", true)]
    fn test_login_validation(#[case] email: &str, #[case] password: &str, #[case] ok: bool) {
        assert_eq!(login(email, password).validate().is_ok(), ok);
    }

    #[rstest]
    #[case::ok("Alice", "alice@example.com", true)]
    #[case::blank_name("  ", "alice@example.com", false)]
    #[case::single_letter_tld("Alice", "alice@example.c", false)]
    #[case::spaces("Alice", "alice smith@example.com", false)]
    fn test_signup_validation(#[case] name: &str, #[case] email: &str, #[case] ok: bool) {
        let req = SignupRequest {
            name: name.to_string(),
            email: email.to_string(),
        };
        assert_eq!(req.validate().is_ok(), ok);
    }

    #[test]
    fn test_forgot_password_validation() {
        let blank = ForgotPasswordRequest {
            email: "   ".to_string(),
        };
        assert!(blank.validate().is_err());

        let ok = ForgotPasswordRequest {
            email: "alice@example.com".to_string(),
        };
        assert!(ok.validate().is_ok());
    }
}
