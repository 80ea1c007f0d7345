use sqlx::PgPool;
use tracing::{instrument, warn};
use uuid::Uuid;

use dzskills_auth::{UserRole, create_access_token};
use dzskills_config::JwtConfig;
use dzskills_core::{AppError, verify_password};

use crate::metrics::track_login;

use super::model::{LoginRequest, LoginResponse};

const INVALID_CREDENTIALS: &str = "invalid credentials";

#[derive(sqlx::FromRow)]
struct Credentials {
    id: Uuid,
    username: String,
    email: String,
    password: String,
}

pub struct AuthService;

impl AuthService {
    /// Looks the account up by email or username in the table of the
    /// requested role, checks the password and issues an access token.
    #[instrument(skip(db, dto, jwt_config), fields(role = %dto.role))]
    pub async fn login(
        db: &PgPool,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<LoginResponse, AppError> {
        let role: UserRole = dto.role.parse()?;

        let query = format!(
            "SELECT id, username, email, password FROM {} WHERE email = $1 OR username = $1",
            role.table()
        );
        let account = sqlx::query_as::<_, Credentials>(&query)
            .bind(&dto.identifier)
            .fetch_optional(db)
            .await?;

        let Some(account) = account else {
            warn!("login attempt for unknown account");
            track_login(role.as_str(), false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password(&dto.password, &account.password)? {
            warn!(user_id = %account.id, "login attempt with wrong password");
            track_login(role.as_str(), false);
            return Err(AppError::unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        let token =
            create_access_token(account.id, &account.username, &account.email, role, jwt_config)?;
        track_login(role.as_str(), true);

        Ok(LoginResponse {
            token,
            username: account.username,
            role,
            user_id: account.id,
            expires_in: jwt_config.access_token_expiry,
        })
    }
}
