//! Integration tests for the user repository stack.
//!
//! These tests run against a real MySQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use chrono::{Duration, Utc};
use common::TestDatabase;
use reimburse_core::{DepartmentId, NewUser, ReimburseError, UserId, UserRole};
use reimburse_repository::{
    MySqlUserDaoImpl, UserDao, UserFilter, UserIdGenerator, UserRepository, UserRepositoryImpl,
};
use reimburse_resilience::RetryPolicy;
use std::sync::{Arc, Mutex};

/// Returns the given ids in order, then repeats the last one.
struct FixedIds(Mutex<Vec<i32>>);

impl FixedIds {
    fn new(ids: &[i32]) -> Arc<Self> {
        let mut ids = ids.to_vec();
        ids.reverse();
        Arc::new(Self(Mutex::new(ids)))
    }
}

impl UserIdGenerator for FixedIds {
    fn next_id(&self) -> UserId {
        let mut ids = self.0.lock().unwrap();
        let id = if ids.len() > 1 { ids.pop().unwrap() } else { ids[0] };
        UserId::new(id)
    }
}

async fn setup() -> (TestDatabase, UserRepositoryImpl, DepartmentId) {
    let db = TestDatabase::new().await;
    let department = db.insert_department("Sales").await;
    let repo = UserRepositoryImpl::new(Arc::new(MySqlUserDaoImpl::new(db.pool())));
    (db, repo, department)
}

fn new_user(email: &str, name: &str, department: DepartmentId) -> NewUser {
    NewUser::new(email, "$argon2id$v=19$stored", name, department)
}

#[tokio::test]
async fn test_create_user_assigns_six_digit_id() {
    let (_db, repo, sales) = setup().await;

    let id = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .expect("Failed to create user");
    assert!(id.is_six_digit());

    let users = repo.get_users(UserFilter::by_id(id)).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "ann@example.com");
    assert_eq!(users[0].role, UserRole::User);
    assert_eq!(users[0].department.department_name, "Sales");
    assert!(users[0].profile_image_url.is_none());
}

#[tokio::test]
async fn test_create_user_retries_past_taken_id() {
    let (db, _, sales) = setup().await;
    db.insert_user(111_111, "taken@example.com", "Taken", sales).await;

    let repo = UserRepositoryImpl::new(Arc::new(MySqlUserDaoImpl::new(db.pool())))
        .with_id_generator(FixedIds::new(&[111_111, 222_222]))
        .with_retry_policy(RetryPolicy::immediate(3));

    let id = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();
    assert_eq!(id, UserId::new(222_222));
}

#[tokio::test]
async fn test_create_user_exhausts_on_persistent_collision() {
    let (db, _, sales) = setup().await;
    db.insert_user(111_111, "taken@example.com", "Taken", sales).await;

    let repo = UserRepositoryImpl::new(Arc::new(MySqlUserDaoImpl::new(db.pool())))
        .with_id_generator(FixedIds::new(&[111_111]))
        .with_retry_policy(RetryPolicy::immediate(3));

    let err = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ReimburseError::IdentityExhausted { attempts: 3, .. }
    ));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let (_db, repo, sales) = setup().await;
    repo.create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();

    let err = repo
        .create_user(new_user("ann@example.com", "Ann Again", sales))
        .await
        .unwrap_err();
    assert!(matches!(err, ReimburseError::Conflict(_)));
}

#[tokio::test]
async fn test_dao_reports_primary_key_duplicate() {
    let (db, _, sales) = setup().await;
    db.insert_user(111_111, "taken@example.com", "Taken", sales).await;

    let dao = MySqlUserDaoImpl::new(db.pool());
    let err = dao
        .insert(UserId::new(111_111), &new_user("other@example.com", "Other", sales))
        .await
        .unwrap_err();
    assert!(err.is_primary_key_collision(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn test_user_filters_and_sort() {
    let (db, repo, sales) = setup().await;
    let finance = db.insert_department("Finance").await;

    let zed = repo
        .create_user(new_user("zed@example.com", "Zed", sales))
        .await
        .unwrap();
    let amy = repo
        .create_user(new_user("amy@example.com", "Amy", sales).with_role(UserRole::Admin))
        .await
        .unwrap();
    repo.create_user(new_user("kim@corp.test", "Kim", finance))
        .await
        .unwrap();

    let filter = UserFilter {
        department_id: Some(sales),
        ..Default::default()
    };
    let names: Vec<String> = repo
        .get_users(filter)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.user_name)
        .collect();
    assert_eq!(names, vec!["Amy", "Zed"]);

    let filter = UserFilter {
        search: Some("EXAMPLE".to_string()),
        sorted: Some("user_name:desc".to_string()),
        ..Default::default()
    };
    let ids: Vec<UserId> = repo
        .get_users(filter)
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.user_id)
        .collect();
    assert_eq!(ids, vec![zed, amy]);

    let filter = UserFilter {
        role: Some("admin".to_string()),
        ..Default::default()
    };
    let admins = repo.get_users(filter).await.unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].user_id, amy);

    let filter = UserFilter {
        email: Some("kim@corp.test".to_string()),
        ..Default::default()
    };
    assert_eq!(repo.get_users(filter).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_hashed_password() {
    let (_db, repo, sales) = setup().await;
    let id = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();

    assert_eq!(
        repo.get_hashed_password(id).await.unwrap().as_deref(),
        Some("$argon2id$v=19$stored")
    );

    assert!(repo.update_password(id, "$argon2id$v=19$rotated").await.unwrap());
    assert_eq!(
        repo.get_hashed_password(id).await.unwrap().as_deref(),
        Some("$argon2id$v=19$rotated")
    );

    assert!(repo
        .get_hashed_password(UserId::new(999_998))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_otp_round_trip_and_expiry() {
    let (_db, repo, sales) = setup().await;
    let id = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();

    let expires = Utc::now() + Duration::minutes(10);
    assert!(repo.update_otp(id, "482913", expires).await.unwrap());
    assert!(repo.verify_otp(id, "482913").await.unwrap());
    assert!(repo.verify_otp(id, "482913").await.unwrap());
    assert!(!repo.verify_otp(id, "000000").await.unwrap());

    let expired = Utc::now() - Duration::minutes(1);
    assert!(repo.update_otp(id, "777777", expired).await.unwrap());
    assert!(!repo.verify_otp(id, "777777").await.unwrap());
}

#[tokio::test]
async fn test_profile_updates() {
    let (db, repo, sales) = setup().await;
    let finance = db.insert_department("Finance").await;
    let id = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();

    assert!(repo.update_name(id, "Ann Smith").await.unwrap());
    assert!(repo.update_department(id, finance).await.unwrap());
    assert!(repo.update_role(id, UserRole::Admin).await.unwrap());
    assert!(repo
        .update_profile_image(id, Some("https://img/ann.png"))
        .await
        .unwrap());

    let user = repo
        .get_users(UserFilter::by_id(id))
        .await
        .unwrap()
        .remove(0);
    assert_eq!(user.user_name, "Ann Smith");
    assert_eq!(user.department.department_id, finance);
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(user.profile_image_url.as_deref(), Some("https://img/ann.png"));

    assert!(repo.update_profile_image(id, None).await.unwrap());
    let user = repo
        .get_users(UserFilter::by_id(id))
        .await
        .unwrap()
        .remove(0);
    assert!(user.profile_image_url.is_none());

    assert!(!repo
        .update_name(UserId::new(999_998), "Nobody")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_delete_users() {
    let (_db, repo, sales) = setup().await;
    let ann = repo
        .create_user(new_user("ann@example.com", "Ann Lee", sales))
        .await
        .unwrap();
    repo.create_user(new_user("bob@example.com", "Bob Stone", sales))
        .await
        .unwrap();

    assert!(repo.delete_user_by_id(ann).await.unwrap());
    assert!(!repo.delete_user_by_id(ann).await.unwrap());

    assert!(repo.delete_user_by_email("bob@example.com").await.unwrap());
    assert!(!repo.delete_user_by_email("bob@example.com").await.unwrap());

    assert!(repo
        .get_users(UserFilter::default())
        .await
        .unwrap()
        .is_empty());
}
