//! Seed routine tests against an in-memory category store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::DbErr;
use uuid::Uuid;

use catalog_service_lib::repository::CategoryRepository;
use catalog_service_lib::seed::{SeedCategory, Seeder, CATEGORIES};
use common::{AppError, AppResult, RetryPolicy};
use domain::{Category, UpsertCategory};

/// Category store keeping rows in memory, optionally failing the first
/// few calls with a lock timeout.
#[derive(Default)]
struct MemoryCategories {
    rows: Mutex<Vec<Category>>,
    lock_failures: AtomicU32,
}

impl MemoryCategories {
    fn failing(times: u32) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            lock_failures: AtomicU32::new(times),
        }
    }

    fn rows(&self) -> Vec<Category> {
        self.rows.lock().unwrap().clone()
    }

    fn contend(&self) -> AppResult<()> {
        let remaining = self.lock_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.lock_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::Database(DbErr::Custom(
                "LockTimeout: could not lock categories".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for MemoryCategories {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Category>> {
        Ok(self.rows().into_iter().find(|c| c.id == id))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Category>> {
        self.contend()?;
        Ok(self.rows().into_iter().find(|c| c.slug == slug))
    }

    async fn list_children(&self, parent_id: Uuid) -> AppResult<Vec<Category>> {
        Ok(self
            .rows()
            .into_iter()
            .filter(|c| c.parent_id == Some(parent_id))
            .collect())
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        Ok(self.rows())
    }

    async fn create(&self, input: UpsertCategory) -> AppResult<Category> {
        self.contend()?;
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|c| c.slug == input.slug) {
            return Err(AppError::conflict(format!("Slug {} already exists", input.slug)));
        }
        let category = Category {
            id: Uuid::new_v4(),
            name: input.name,
            slug: input.slug,
            color: input.color,
            parent_id: input.parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        rows.push(category.clone());
        Ok(category)
    }

    async fn update(&self, id: Uuid, input: UpsertCategory) -> AppResult<Category> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(AppError::NotFound)?;
        row.name = input.name;
        row.slug = input.slug;
        row.color = input.color;
        row.parent_id = input.parent_id;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }
}

fn expected_rows() -> usize {
    CATEGORIES
        .iter()
        .map(|c| 1 + c.subcategories.len())
        .sum()
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new(5, Duration::from_millis(1))
}

#[tokio::test]
async fn test_seed_creates_every_category() {
    let store = Arc::new(MemoryCategories::default());
    let seeder = Seeder::new(store.clone(), fast_policy());

    let report = seeder.run(CATEGORIES).await.unwrap();

    assert_eq!(report.created, expected_rows());
    assert_eq!(report.updated, 0);
    assert_eq!(store.rows().len(), expected_rows());
}

#[tokio::test]
async fn test_seed_twice_does_not_duplicate() {
    let store = Arc::new(MemoryCategories::default());
    let seeder = Seeder::new(store.clone(), fast_policy());

    seeder.run(CATEGORIES).await.unwrap();
    let ids_before: Vec<Uuid> = store.rows().iter().map(|c| c.id).collect();

    let second = seeder.run(CATEGORIES).await.unwrap();
    let ids_after: Vec<Uuid> = store.rows().iter().map(|c| c.id).collect();

    assert_eq!(second.created, 0);
    assert_eq!(second.updated, expected_rows());
    assert_eq!(ids_before, ids_after);
}

#[tokio::test]
async fn test_subcategories_point_at_their_parent() {
    let store = Arc::new(MemoryCategories::default());
    Seeder::new(store.clone(), fast_policy())
        .run(CATEGORIES)
        .await
        .unwrap();

    let rows = store.rows();
    let music = rows.iter().find(|c| c.slug == "music").unwrap();
    let theory = rows.iter().find(|c| c.slug == "music-theory").unwrap();
    let all = rows.iter().find(|c| c.slug == "all").unwrap();

    assert!(music.is_root());
    assert!(theory.is_child_of(music));
    assert!(all.is_root());
    assert!(music.color.is_some());
}

#[tokio::test]
async fn test_seed_recovers_from_lock_contention() {
    let store = Arc::new(MemoryCategories::failing(3));
    let seeder = Seeder::new(store.clone(), fast_policy());

    let table: &[SeedCategory] = &CATEGORIES[..2];
    let report = seeder.run(table).await.unwrap();

    assert_eq!(report.total(), 1 + 1 + CATEGORIES[1].subcategories.len());
    assert_eq!(store.rows().len(), report.total());
}

#[tokio::test]
async fn test_seed_fails_when_contention_outlasts_retries() {
    let store = Arc::new(MemoryCategories::failing(10));
    let seeder = Seeder::new(store.clone(), fast_policy());

    let error = seeder.run(CATEGORIES).await.unwrap_err();

    assert!(error.to_string().contains("LockTimeout"));
    assert!(store.rows().is_empty());
}

#[tokio::test]
async fn test_reseed_keeps_colour_set_on_subcategory() {
    let store = Arc::new(MemoryCategories::default());
    let seeder = Seeder::new(store.clone(), fast_policy());
    seeder.run(CATEGORIES).await.unwrap();

    {
        let mut rows = store.rows.lock().unwrap();
        let theory = rows.iter_mut().find(|c| c.slug == "music-theory").unwrap();
        theory.color = Some("#FFE66D".to_string());
    }

    seeder.run(CATEGORIES).await.unwrap();

    let rows = store.rows();
    let theory = rows.iter().find(|c| c.slug == "music-theory").unwrap();
    assert_eq!(theory.color.as_deref(), Some("#FFE66D"));
}
