//! Shared setup for repository tests.

use sqlx::SqlitePool;

use tyrehub_app::ports::{BrandRepository, DealerRepository, TyreRepository, UserRepository};
use tyrehub_domain::catalog::{Brand, Tyre};
use tyrehub_domain::dealer::Dealer;
use tyrehub_domain::id::UserId;
use tyrehub_domain::user::{Role, User};

use crate::catalog_repo::{SqliteBrandRepository, SqliteTyreRepository};
use crate::dealer_repo::SqliteDealerRepository;
use crate::pool::Config;
use crate::user_repo::SqliteUserRepository;

pub(crate) async fn pool() -> SqlitePool {
    let db = Config::new("sqlite::memory:").build().await.unwrap();
    db.pool().clone()
}

pub(crate) fn user(email: &str, role: Role) -> User {
    User::builder()
        .name("Test User")
        .email(email)
        .role(role)
        .password_hash("plain:password")
        .build()
        .unwrap()
}

pub(crate) async fn seed_user(pool: &SqlitePool, email: &str, role: Role) -> User {
    SqliteUserRepository::new(pool.clone())
        .create(user(email, role))
        .await
        .unwrap()
}

pub(crate) async fn seed_dealer(pool: &SqlitePool, user_id: UserId) -> Dealer {
    SqliteDealerRepository::new(pool.clone())
        .create(Dealer::for_user(user_id, "Rubber Road", None, None).unwrap())
        .await
        .unwrap()
}

pub(crate) async fn seed_tyre(pool: &SqlitePool, name: &str, price_cents: i64) -> Tyre {
    let brand = SqliteBrandRepository::new(pool.clone())
        .create(Brand::new("Bridgestone", None).unwrap())
        .await
        .unwrap();
    SqliteTyreRepository::new(pool.clone())
        .create(
            Tyre::builder()
                .brand_id(brand.id)
                .name(name)
                .size("205/55 R16")
                .price_cents(price_cents)
                .stock(8)
                .build()
                .unwrap(),
        )
        .await
        .unwrap()
}
