//! Integration tests for refresh-token sessions and failed-login tracking.

use chrono::{Duration, Utc};
use promptshare_db::is_unique_violation;
use promptshare_db::models::session::NewSession;
use promptshare_db::models::user::CreateUser;
use promptshare_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn create_user(pool: &PgPool, username: &str) -> i64 {
    let input = CreateUser {
        email: format!("{username}@example.com"),
        username: Some(username.to_string()),
        name: username.to_string(),
        password_hash: "not-a-real-hash".to_string(),
    };
    UserRepo::create(pool, &input).await.unwrap().id
}

fn new_session(user_id: i64, token_hash: &str) -> NewSession {
    NewSession {
        user_id,
        refresh_token_hash: token_hash.to_string(),
        user_agent: Some("tests/1.0".to_string()),
        expires_at: Utc::now() + Duration::days(7),
    }
}

async fn session_rows(pool: &PgPool, user_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_retires_old_session_and_links_new_one(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let first = SessionRepo::open(&pool, &new_session(user, "hash-1")).await.unwrap();
    assert_eq!(first.rotated_from, None);
    assert!(first.revoked_at.is_none());

    let second = SessionRepo::rotate(&pool, first.id, &new_session(user, "hash-2"))
        .await
        .unwrap()
        .expect("live session should rotate");
    assert_eq!(second.rotated_from, Some(first.id));
    assert_eq!(second.user_agent.as_deref(), Some("tests/1.0"));

    assert!(SessionRepo::find_active(&pool, "hash-1").await.unwrap().is_none());
    let active = SessionRepo::find_active(&pool, "hash-2").await.unwrap().unwrap();
    assert_eq!(active.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotating_a_spent_session_writes_nothing(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let first = SessionRepo::open(&pool, &new_session(user, "hash-1")).await.unwrap();
    SessionRepo::rotate(&pool, first.id, &new_session(user, "hash-2"))
        .await
        .unwrap()
        .unwrap();

    let replay = SessionRepo::rotate(&pool, first.id, &new_session(user, "hash-3"))
        .await
        .unwrap();
    assert!(replay.is_none());
    assert!(SessionRepo::find_active(&pool, "hash-3").await.unwrap().is_none());
    assert_eq!(session_rows(&pool, user).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_rotate_rolls_back_when_the_new_session_cannot_be_written(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let first = SessionRepo::open(&pool, &new_session(user, "hash-1")).await.unwrap();
    SessionRepo::open(&pool, &new_session(user, "taken")).await.unwrap();

    // The replacement collides with an existing token hash, so the insert fails.
    let err = SessionRepo::rotate(&pool, first.id, &new_session(user, "taken"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_user_sessions_refresh_token_hash"));

    let still_live = SessionRepo::find_active(&pool, "hash-1").await.unwrap();
    assert_eq!(still_live.map(|s| s.id), Some(first.id));
    assert_eq!(session_rows(&pool, user).await, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_is_neither_found_nor_rotated(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    let mut input = new_session(user, "hash-1");
    input.expires_at = Utc::now() - Duration::minutes(1);
    let expired = SessionRepo::open(&pool, &input).await.unwrap();

    assert!(SessionRepo::find_active(&pool, "hash-1").await.unwrap().is_none());
    let rotated = SessionRepo::rotate(&pool, expired.id, &new_session(user, "hash-2"))
        .await
        .unwrap();
    assert!(rotated.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_revoke_all_only_touches_that_user(pool: PgPool) {
    let alice = create_user(&pool, "alice").await;
    let bob = create_user(&pool, "bob").await;
    SessionRepo::open(&pool, &new_session(alice, "a-1")).await.unwrap();
    SessionRepo::open(&pool, &new_session(alice, "a-2")).await.unwrap();
    SessionRepo::open(&pool, &new_session(bob, "b-1")).await.unwrap();

    assert_eq!(SessionRepo::revoke_all_for_user(&pool, alice).await.unwrap(), 2);
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, alice).await.unwrap(), 0);
    assert!(SessionRepo::find_active(&pool, "a-1").await.unwrap().is_none());
    assert!(SessionRepo::find_active(&pool, "b-1").await.unwrap().is_some());
}

// ---------------------------------------------------------------------------
// Failed logins
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_login_count_restarts_after_lock_expires(pool: PgPool) {
    let user = create_user(&pool, "alice").await;
    for expected in 1..=5 {
        assert_eq!(UserRepo::increment_failed_login(&pool, user).await.unwrap(), expected);
    }

    // Still locked: failures keep accumulating.
    UserRepo::lock_account(&pool, user, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    assert_eq!(UserRepo::increment_failed_login(&pool, user).await.unwrap(), 6);

    UserRepo::lock_account(&pool, user, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(UserRepo::increment_failed_login(&pool, user).await.unwrap(), 1);

    let row = UserRepo::find_by_id(&pool, user).await.unwrap().unwrap();
    assert_eq!(row.failed_login_count, 1);
    assert!(row.locked_until.is_none());
}
