//! Teacher and student account seeding.

use std::time::Instant;

use bcrypt::hash;
use dzskills_models::ids::{StudentId, TeacherId};
use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use super::models::AccountSeed;

/// Password of every seeded account.
pub const SEED_PASSWORD: &str = "Password@123";

/// Lower bcrypt cost for seeding (cost 4 is ~6ms per hash).
const SEED_BCRYPT_COST: u32 = 4;

/// Generates accounts in parallel, each with its own salted hash.
///
/// `prefix` keeps usernames and emails unique across the two account tables.
pub fn generate_accounts(
    count: usize,
    prefix: &str,
) -> Result<Vec<AccountSeed>, bcrypt::BcryptError> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let username = format!(
                "{}.{}.{}{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                prefix,
                idx
            );

            Ok(AccountSeed {
                full_name: format!("{} {}", first_name, last_name),
                email: format!("{}@example.com", username),
                username,
                password_hash: hash(SEED_PASSWORD, SEED_BCRYPT_COST)?,
            })
        })
        .collect()
}

pub async fn seed_teachers(
    db: &PgPool,
    count: usize,
) -> Result<Vec<TeacherId>, Box<dyn std::error::Error>> {
    let ids = seed_accounts(db, "teachers", "teacher", count).await?;
    Ok(ids.into_iter().map(TeacherId::from).collect())
}

pub async fn seed_students(
    db: &PgPool,
    count: usize,
) -> Result<Vec<StudentId>, Box<dyn std::error::Error>> {
    let ids = seed_accounts(db, "students", "student", count).await?;
    Ok(ids.into_iter().map(StudentId::from).collect())
}

async fn seed_accounts(
    db: &PgPool,
    table: &'static str,
    prefix: &str,
    count: usize,
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} {}...", count, table);

    let accounts = generate_accounts(count, prefix)?;

    let mut tx = db.begin().await?;

    // 4 params per account
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(accounts.len());

    for chunk in accounts.chunks(BATCH_SIZE) {
        let ids = insert_accounts_chunk(&mut tx, table, chunk).await?;
        all_ids.extend(ids);
    }

    tx.commit().await?;

    println!(
        "   ✓ Inserted {} {} in {:?}",
        all_ids.len(),
        table,
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_accounts_chunk(
    tx: &mut Transaction<'_, Postgres>,
    table: &'static str,
    accounts: &[AccountSeed],
) -> Result<Vec<Uuid>, Box<dyn std::error::Error>> {
    if accounts.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = format!(
        "INSERT INTO {} (full_name, username, email, password) VALUES ",
        table
    );

    for i in 0..accounts.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for account in accounts {
        q = q
            .bind(&account.full_name)
            .bind(&account.username)
            .bind(&account.email)
            .bind(&account.password_hash);
    }

    let ids: Vec<Uuid> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_accounts_are_unique() {
        let accounts = generate_accounts(25, "student").unwrap();
        assert_eq!(accounts.len(), 25);

        let usernames: HashSet<_> = accounts.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(usernames.len(), 25);
        assert!(accounts.iter().all(|a| a.email.ends_with("@example.com")));
    }

    #[test]
    fn test_generated_password_verifies() {
        let accounts = generate_accounts(1, "teacher").unwrap();
        assert!(bcrypt::verify(SEED_PASSWORD, &accounts[0].password_hash).unwrap());
    }
}
