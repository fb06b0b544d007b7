use std::sync::Arc;
use crate::domain::{
    models::{shop::Shop, user::User},
    ports::{OAuthProfile, ShopRepository, UserRepository},
};
use crate::error::AppError;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use tracing::{info, warn};

pub struct SignupInput {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
    pub shop_name: Option<String>,
}

pub struct Account {
    pub user: User,
    pub shop: Shop,
}

pub struct AccountService {
    shop_repo: Arc<dyn ShopRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AccountService {
    pub fn new(shop_repo: Arc<dyn ShopRepository>, user_repo: Arc<dyn UserRepository>) -> Self {
        Self { shop_repo, user_repo }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn verify_password(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let Some(user) = self.user_repo.find_by_email(&normalize_email(email)).await? else {
            return Ok(None);
        };

        if user.password_hash.is_empty() {
            return Ok(None);
        }

        let Ok(parsed_hash) = PasswordHash::new(&user.password_hash) else {
            warn!("Stored password hash for user {} is unreadable", user.id);
            return Ok(None);
        };

        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(Some(user)),
            Err(_) => Ok(None),
        }
    }

    pub async fn create_password_account(&self, input: SignupInput) -> Result<Account, AppError> {
        validate_signup(&input)?;
        let email = normalize_email(&input.email);

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("An account with this email already exists.".into()));
        }

        let salt = SaltString::generate(&mut rand::thread_rng());
        let password_hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|_| AppError::Internal)?
            .to_string();

        let shop_name = input.shop_name.unwrap_or_else(|| default_shop_name(&email));
        let shop = Shop::new(shop_name);
        let user = User::new(shop.id.clone(), &email, password_hash, input.display_name);
        let (shop, user) = self.user_repo.create_with_shop(&shop, &user).await?;

        info!("Password account created: user {} in shop {}", user.id, shop.id);
        Ok(Account { user, shop })
    }

    /// Returns the account bound to the provider identity, creating it when new.
    /// An email already registered without this identity is a conflict; accounts are never linked implicitly.
    pub async fn resolve_or_create_from_oauth(&self, provider: &str, profile: &OAuthProfile) -> Result<(Account, bool), AppError> {
        if let Some(user) = self.user_repo.find_by_oauth_sub(provider, &profile.sub).await? {
            let shop = self.shop_repo.find_by_id(&user.shop_id).await?
                .ok_or(AppError::InternalWithMsg(format!("User {} references a missing shop", user.id)))?;
            return Ok((Account { user, shop }, false));
        }

        let email = normalize_email(&profile.email);
        if email.is_empty() {
            return Err(AppError::Validation("OAuth profile has no email".into()));
        }

        if self.user_repo.find_by_email(&email).await?.is_some() {
            warn!("OAuth sign-in refused: email already registered without {} identity", provider);
            return Err(AppError::Conflict("EMAIL_ALREADY_EXISTS".into()));
        }

        let shop = Shop::new(default_shop_name(&email));

        let mut user = User::new(shop.id.clone(), &email, String::new(), profile.name.clone());
        user.oauth_provider = Some(provider.to_string());
        user.oauth_sub = Some(profile.sub.clone());
        if profile.email_verified.unwrap_or(false) {
            user.email_verified_at = Some(Utc::now());
        }
        let (shop, user) = self.user_repo.create_with_shop(&shop, &user).await?;

        info!("OAuth account created: user {} in shop {} via {}", user.id, shop.id, provider);
        Ok((Account { user, shop }, true))
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn default_shop_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    if local.is_empty() {
        "My Shop".to_string()
    } else {
        format!("{}'s Shop", local)
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

pub fn validate_signup(input: &SignupInput) -> Result<(), AppError> {
    if !is_valid_email(input.email.trim()) {
        return Err(AppError::Validation("Invalid email".into()));
    }

    let password_len = input.password.chars().count();
    if password_len < 8 {
        return Err(AppError::Validation("Password must be at least 8 characters".into()));
    }
    if password_len > 128 {
        return Err(AppError::Validation("Password too long".into()));
    }

    if let Some(name) = &input.display_name {
        validate_display_name(name)?;
    }

    if let Some(name) = &input.shop_name {
        let len = name.chars().count();
        if !(1..=120).contains(&len) {
            return Err(AppError::Validation("Shop name must be 1-120 characters".into()));
        }
    }

    Ok(())
}

pub(crate) fn validate_display_name(name: &str) -> Result<(), AppError> {
    let len = name.trim().chars().count();
    if !(1..=80).contains(&len) {
        return Err(AppError::Validation("Display name must be 1-80 characters".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(email: &str, password: &str) -> SignupInput {
        SignupInput {
            email: email.to_string(),
            password: password.to_string(),
            display_name: None,
            shop_name: None,
        }
    }

    #[test]
    fn test_signup_validation() {
        assert!(validate_signup(&signup("tech@shop.com", "longenough")).is_ok());
        assert!(validate_signup(&signup("  Tech@Shop.com ", "longenough")).is_ok());

        assert!(validate_signup(&signup("not-an-email", "longenough")).is_err());
        assert!(validate_signup(&signup("a@b", "longenough")).is_err());
        assert!(validate_signup(&signup("tech@shop.com", "short")).is_err());
        assert!(validate_signup(&signup("tech@shop.com", &"x".repeat(129))).is_err());

        let mut empty_shop = signup("tech@shop.com", "longenough");
        empty_shop.shop_name = Some(String::new());
        assert!(validate_signup(&empty_shop).is_err());
    }

    #[test]
    fn test_display_name_bounds() {
        assert!(validate_display_name("Sam").is_ok());
        assert!(validate_display_name(&"x".repeat(80)).is_ok());
        assert!(validate_display_name("").is_err());
        assert!(validate_display_name("  ").is_err());
        assert!(validate_display_name(&"x".repeat(81)).is_err());
    }

    #[test]
    fn test_default_shop_name_uses_local_part() {
        assert_eq!(default_shop_name("mike@garage.io"), "mike's Shop");
    }
}
