pub const EMAIL_SECRET: &str = "email";
pub const PASSWORD_SECRET: &str = "password";

/// Read-only key-value store holding deployment secrets.
pub trait SecretsPort {
    fn get(&self, key: &str) -> Option<String>;
}
