use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
    ActiveValue::NotSet,
};
use uuid::Uuid;

use crate::{
    db::OrmConn,
    dto::auth::{AdminStatus, Claims, LoginRequest, LoginResponse, RegisterRequest},
    entity::{
        admins::{ActiveModel as AdminActive, Entity as Admins},
        users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, Model as UserModel},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

const TOKEN_TTL_HOURS: i64 = 24;

pub async fn register_user(
    orm: &OrmConn,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest { email, password } = payload;
    let email = email.trim().to_lowercase();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::BadRequest("email and password are required".into()));
    }

    let exist = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(orm)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let password_hash = hash_password(&password)?;

    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email),
        password_hash: Set(password_hash),
        admin_claim: Set(false),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    tracing::info!(user_id = %user.id, "user registered");
    Ok(ApiResponse::success("User created", user_from_entity(user), None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    let user = Users::find()
        .filter(UserCol::Email.eq(email.trim().to_lowercase()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid email or password".into()));
    }

    let token = issue_token(&state.config.jwt_secret, user.id, &user.email, user.admin_claim)?;

    tracing::info!(user_id = %user.id, admin = user.admin_claim, "user logged in");
    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token: format!("Bearer {}", token),
            admin: user.admin_claim,
        },
        Some(Meta::empty()),
    ))
}

/// Signs a session token embedding the `admin` custom claim.
pub fn issue_token(secret: &str, user_id: Uuid, email: &str, admin: bool) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        admin,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

/// Fallback path of the admin gate: the `admins` mirror record.
pub async fn mirror_grants_admin(orm: &OrmConn, user_id: Uuid) -> AppResult<bool> {
    let record = Admins::find_by_id(user_id).one(orm).await?;
    Ok(record.is_some_and(|r| r.is_admin))
}

pub async fn admin_status(orm: &OrmConn, user: &AuthUser) -> AppResult<ApiResponse<AdminStatus>> {
    let mirror = mirror_grants_admin(orm, user.user_id).await?;
    let status = AdminStatus {
        claim: user.admin,
        mirror,
        is_admin: user.admin || mirror,
    };
    Ok(ApiResponse::success("Admin status", status, Some(Meta::empty())))
}

/// Grants or revokes admin for the user with `email`: sets the claim flag
/// picked up at the next login and upserts the mirror record.
pub async fn set_admin(orm: &OrmConn, email: &str, grant: bool) -> AppResult<UserModel> {
    let email = email.trim().to_lowercase();
    let txn = orm.begin().await?;

    let user = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: UserActive = user.into();
    active.admin_claim = Set(grant);
    let user = active.update(&txn).await?;

    let now = Utc::now();
    match Admins::find_by_id(user.id).one(&txn).await? {
        Some(record) => {
            let mut active: AdminActive = record.into();
            active.is_admin = Set(grant);
            active.email = Set(user.email.clone());
            active.updated_at = Set(now.into());
            active.update(&txn).await?;
        }
        None => {
            AdminActive {
                user_id: Set(user.id),
                email: Set(user.email.clone()),
                is_admin: Set(grant),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;
    tracing::info!(user_id = %user.id, grant, "admin privileges updated");
    Ok(user)
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn user_from_entity(model: UserModel) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        admin_claim: model.admin_claim,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
