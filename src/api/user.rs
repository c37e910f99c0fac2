//! # User API Module
//!
//! Account management: email/password sign-up and sign-in with Argon2
//! hashing, push device token registration, and full account-data removal.

use crate::{consts, models, repo};
use anyhow::bail;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| anyhow::anyhow!("password couldn't be hashed: {err}"))?
        .to_string())
}

fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Registers a new account. The email must be unused and the password long
/// enough; both are checked before any write.
pub async fn sign_up(
    email: &str,
    password: &str,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::user_app::User> {
    if !email.contains('@') {
        bail!("invalid email address")
    }

    if password.len() < consts::MIN_PASSWORD_LEN {
        bail!(
            "password must be at least {} characters",
            consts::MIN_PASSWORD_LEN
        )
    }

    if repo.get_user_app_by_email(email).await?.is_some() {
        bail!("email already registered")
    }

    let mut user = models::user_app::User::create_from_credentials(email, hash_password(password)?);
    user.id = repo.save_user_app(&user).await?;

    Ok(user)
}

/// Authenticates an existing account. The same generic error covers an
/// unknown email and a wrong password.
pub async fn sign_in(
    email: &str,
    password: &str,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<models::user_app::User> {
    let Some(user) = repo.get_user_app_by_email(email).await? else {
        bail!("invalid credentials")
    };

    if !user.is_enabled || !verify_password(password, &user.password_hash) {
        bail!("invalid credentials")
    }

    Ok(user)
}

/// Persists the opaque device token returned by the OS push registration,
/// or clears it when `None`.
pub async fn register_push_token(
    user_id: i64,
    push_token: Option<String>,
    repo: &repo::ImplAppRepo,
) -> anyhow::Result<()> {
    repo.set_user_push_token(user_id, push_token).await
}

/// Deletes the account together with every pet and dependent record.
pub async fn remove_account(user_id: i64, repo: &repo::ImplAppRepo) -> anyhow::Result<()> {
    repo.remove_user_app_data(user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use mockall::predicate::*;

    #[test]
    fn hashed_password_verifies_and_rejects_wrong_input() {
        let hash = hash_password("correct horse battery").unwrap();

        assert!(verify_password("correct horse battery", &hash));
        assert!(!verify_password("wrong password", &hash));
        assert!(!verify_password("correct horse battery", "not-a-phc-string"));
    }

    #[ntex::test]
    async fn sign_up_rejects_short_password_without_touching_the_repo() {
        let repo: crate::repo::ImplAppRepo = Box::new(MockAppRepo::new());

        let err = sign_up("owner@example.com", "short", &repo)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("at least"));
    }

    #[ntex::test]
    async fn sign_up_rejects_duplicated_email() {
        let mut mock = MockAppRepo::new();
        mock.expect_get_user_app_by_email()
            .with(eq("owner@example.com"))
            .returning(|email| {
                Ok(Some(models::user_app::User::create_from_credentials(
                    email,
                    "hash".into(),
                )))
            });

        let repo: crate::repo::ImplAppRepo = Box::new(mock);
        let err = sign_up("owner@example.com", "a longer password", &repo)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("already registered"));
    }

    #[ntex::test]
    async fn sign_in_verifies_the_stored_hash() {
        let hash = hash_password("a longer password").unwrap();
        let mut mock = MockAppRepo::new();
        mock.expect_get_user_app_by_email().returning(move |email| {
            Ok(Some(models::user_app::User::create_from_credentials(
                email,
                hash.clone(),
            )))
        });

        let repo: crate::repo::ImplAppRepo = Box::new(mock);

        assert!(
            sign_in("owner@example.com", "a longer password", &repo)
                .await
                .is_ok()
        );
        assert!(
            sign_in("owner@example.com", "something else", &repo)
                .await
                .is_err()
        );
    }
}
