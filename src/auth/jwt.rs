use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_token(user_id: Uuid, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(ttl_secs: i64) -> Config {
        Config {
            database_url: "postgres://localhost/moodsphere_test".into(),
            host: "127.0.0.1".into(),
            port: 5001,
            frontend_url: "http://localhost:3000".into(),
            jwt_secret: "test-secret-do-not-use".into(),
            jwt_ttl_secs: ttl_secs,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config(3600);
        let user_id = Uuid::new_v4();

        let token = create_token(user_id, &config).unwrap();
        let data = verify_token(&token, &config).unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config(-3600);
        let token = create_token(Uuid::new_v4(), &config).unwrap();

        assert!(matches!(
            verify_token(&token, &config),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let config = test_config(3600);
        let token = create_token(Uuid::new_v4(), &config).unwrap();

        let mut other = test_config(3600);
        other.jwt_secret = "some-other-secret".into();

        assert!(matches!(
            verify_token(&token, &other),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = test_config(3600);
        assert!(matches!(
            verify_token("not-a-jwt", &config),
            Err(AppError::Unauthorized)
        ));
    }
}
