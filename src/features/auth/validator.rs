use super::model::{AuthenticatedUser, Claims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use crate::features::users::models::UserRole;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            leeway: config.jwt_leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header =
            decode_header(token).map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Unauthorized(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("User ID not found in token".to_string()))?;

        let role = claims
            .role
            .parse::<UserRole>()
            .map_err(|_| AppError::Unauthorized("Role claim not recognized".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            role,
            name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{issue_token, test_auth_config};
    use jsonwebtoken::{encode, EncodingKey, Header};

    #[test]
    fn test_valid_token_resolves_user_and_role() {
        let config = test_auth_config();
        let validator = JwtValidator::new(&config);
        let user_id = Uuid::new_v4();

        let token = issue_token(&config, &user_id.to_string(), "Manager");
        let user = validator.validate_token(&token).unwrap();

        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, UserRole::Manager);
        assert!(user.has_role(UserRole::Manager));
    }

    #[test]
    fn test_role_claim_is_case_insensitive() {
        let config = test_auth_config();
        let validator = JwtValidator::new(&config);

        let token = issue_token(&config, &Uuid::new_v4().to_string(), "employee");
        let user = validator.validate_token(&token).unwrap();

        assert_eq!(user.role, UserRole::Employee);
    }

    #[test]
    fn test_non_uuid_subject_is_unauthorized() {
        let config = test_auth_config();
        let validator = JwtValidator::new(&config);

        let token = issue_token(&config, "not-a-uuid", "Employee");
        let err = validator.validate_token(&token).unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(msg) if msg == "User ID not found in token"));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config = test_auth_config();
        let validator = JwtValidator::new(&config);

        let mut other = test_auth_config();
        other.jwt_secret = "a-completely-different-secret".to_string();
        let token = issue_token(&other, &Uuid::new_v4().to_string(), "Admin");

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let config = test_auth_config();
        let validator = JwtValidator::new(&config);

        let now = chrono::Utc::now().timestamp() as u64;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            role: "Admin".to_string(),
            name: None,
            iss: config.issuer.clone(),
            aud: "someone-else".to_string(),
            iat: now,
            exp: now + 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(validator.validate_token(&token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let validator = JwtValidator::new(&test_auth_config());
        assert!(matches!(
            validator.validate_token("definitely.not.ajwt"),
            Err(AppError::Unauthorized(_))
        ));
    }
}
