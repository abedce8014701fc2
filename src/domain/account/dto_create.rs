/// Account data ready to be persisted. The password has already been
/// hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}
