//! Category seeding.
//!
//! Categories are upserted by slug, one at a time: each parent first, then
//! its subcategories in order. Every storage call goes through the lock retry
//! wrapper, which is safe because a repeated upsert-by-slug converges on the
//! same row.

pub mod data;

use std::sync::Arc;

use tracing::{debug, info};

use common::{with_retry, AppResult, RetryPolicy};
use domain::{Category, UpsertCategory};

use crate::repository::CategoryRepository;

pub use data::{SeedCategory, SeedSubcategory, CATEGORIES};

/// Outcome of a single upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
    Created,
    Updated,
}

/// Counts of rows touched by a seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub created: usize,
    pub updated: usize,
}

impl SeedReport {
    fn record(&mut self, outcome: Upserted) {
        match outcome {
            Upserted::Created => self.created += 1,
            Upserted::Updated => self.updated += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated
    }
}

/// Writes the seed table through a category repository.
pub struct Seeder {
    categories: Arc<dyn CategoryRepository>,
    policy: RetryPolicy,
}

impl Seeder {
    pub fn new(categories: Arc<dyn CategoryRepository>, policy: RetryPolicy) -> Self {
        Self { categories, policy }
    }

    /// Upsert every category of `table`, parents before their children.
    pub async fn run(&self, table: &[SeedCategory]) -> AppResult<SeedReport> {
        let mut report = SeedReport::default();

        for entry in table {
            let color = entry.color.map(str::to_string);
            let (parent, outcome) = self
                .upsert(UpsertCategory::root(entry.name, entry.slug, color))
                .await?;
            report.record(outcome);

            for sub in entry.subcategories {
                let (_, outcome) = self
                    .upsert(UpsertCategory::child(sub.name, sub.slug, parent.id))
                    .await?;
                report.record(outcome);
            }

            debug!(
                slug = entry.slug,
                subcategories = entry.subcategories.len(),
                "Seeded category"
            );
        }

        info!(
            created = report.created,
            updated = report.updated,
            "Category seed finished"
        );
        Ok(report)
    }

    /// Update the category with the same slug, or create it.
    ///
    /// A missing colour in `input` keeps the colour already stored.
    pub async fn upsert(&self, input: UpsertCategory) -> AppResult<(Category, Upserted)> {
        input.validate()?;

        let existing = with_retry(&self.policy, || self.categories.find_by_slug(&input.slug)).await?;

        match existing {
            Some(found) => {
                // Entries without a colour leave the stored one alone
                let mut input = input;
                if input.color.is_none() {
                    input.color = found.color;
                }

                let category =
                    with_retry(&self.policy, || self.categories.update(found.id, input.clone()))
                        .await?;
                Ok((category, Upserted::Updated))
            }
            None => {
                let category =
                    with_retry(&self.policy, || self.categories.create(input.clone())).await?;
                Ok((category, Upserted::Created))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;
    use mockall::Sequence;
    use sea_orm::DbErr;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    use common::AppError;

    use super::*;
    use crate::repository::MockCategoryRepository;

    fn stored(input: &UpsertCategory) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            slug: input.slug.clone(),
            color: input.color.clone(),
            parent_id: input.parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn lock_timeout() -> AppError {
        AppError::Database(DbErr::Custom("LockTimeout: unable to lock row".to_string()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_upsert_retries_transient_lookup() {
        let mut repo = MockCategoryRepository::new();
        let mut seq = Sequence::new();
        repo.expect_find_by_slug()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(lock_timeout()));
        repo.expect_find_by_slug()
            .with(eq("yoga"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(stored(&input)));

        let seeder = Seeder::new(Arc::new(repo), RetryPolicy::default());
        let (category, outcome) = seeder
            .upsert(UpsertCategory::child("Yoga", "yoga", Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(category.slug, "yoga");
        assert_eq!(outcome, Upserted::Created);
    }

    #[tokio::test]
    async fn test_upsert_updates_existing_slug() {
        let existing = stored(&UpsertCategory::root("Old Design", "design", None));
        let existing_id = existing.id;

        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_slug()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_create().never();
        repo.expect_update()
            .withf(move |id, input| *id == existing_id && input.name == "Design")
            .times(1)
            .returning(|id, input| {
                let mut category = stored(&input);
                category.id = id;
                Ok(category)
            });

        let seeder = Seeder::new(Arc::new(repo), RetryPolicy::default());
        let (category, outcome) = seeder
            .upsert(UpsertCategory::root("Design", "design", Some("#B5B9FF".to_string())))
            .await
            .unwrap();

        assert_eq!(category.id, existing_id);
        assert_eq!(outcome, Upserted::Updated);
    }

    #[tokio::test]
    async fn test_reseeding_child_keeps_stored_colour() {
        let parent_id = Uuid::new_v4();
        let mut existing = stored(&UpsertCategory::child("Music Theory", "music-theory", parent_id));
        existing.color = Some("#FFE66D".to_string());
        let existing_id = existing.id;

        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_slug()
            .with(eq("music-theory"))
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update()
            .withf(move |id, input| {
                *id == existing_id && input.color.as_deref() == Some("#FFE66D")
            })
            .times(1)
            .returning(|id, input| {
                let mut category = stored(&input);
                category.id = id;
                Ok(category)
            });

        let seeder = Seeder::new(Arc::new(repo), RetryPolicy::default());
        let (category, outcome) = assert_ok!(
            seeder
                .upsert(UpsertCategory::child("Music Theory", "music-theory", parent_id))
                .await
        );

        assert_eq!(category.color.as_deref(), Some("#FFE66D"));
        assert_eq!(outcome, Upserted::Updated);
    }

    #[tokio::test]
    async fn test_validation_error_aborts_without_retry() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_create()
            .times(1)
            .returning(|_| Err(AppError::validation("ValidationError: name is required")));

        let seeder = Seeder::new(Arc::new(repo), RetryPolicy::default());
        let error = assert_err!(seeder.run(&CATEGORIES[..1]).await);

        assert!(matches!(error, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_storage() {
        let mut repo = MockCategoryRepository::new();
        repo.expect_find_by_slug().never();

        let seeder = Seeder::new(Arc::new(repo), RetryPolicy::default());
        let result = seeder
            .upsert(UpsertCategory::root("Bad", "Not A Slug", None))
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }
}
