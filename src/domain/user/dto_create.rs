use super::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub username: Option<String>,
    pub name: Option<String>,
    pub role: UserRole,
    /// Mark the email as verified at creation time.
    pub verified: bool,
}
