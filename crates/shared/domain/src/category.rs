//! Category domain entity and related types.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{MAX_NAME_LENGTH, MAX_SLUG_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Lowercase words separated by single hyphens
static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("valid slug regex"));

/// Six-digit hex colour, e.g. `#FFB347`
static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid colour regex"));

/// Check if a slug is URL-safe
pub fn is_valid_slug(slug: &str) -> bool {
    slug.len() <= MAX_SLUG_LENGTH && SLUG_PATTERN.is_match(slug)
}

/// Check if a colour is a `#RRGGBB` value
pub fn is_valid_color(color: &str) -> bool {
    COLOR_PATTERN.is_match(color)
}

/// Category domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Category {
    /// Unique category identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Unique URL-safe identifier
    pub slug: String,
    /// Badge colour (`#RRGGBB`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Parent category (None for top-level categories)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Check if this is a top-level category
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this category is a direct child of `parent`
    pub fn is_child_of(&self, parent: &Category) -> bool {
        self.parent_id == Some(parent.id)
    }
}

/// Top-level category with its direct subcategories.
///
/// This is the shape the navigation bar and the categories sidebar render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CategoryNode {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub subcategories: Vec<Category>,
}

impl CategoryNode {
    /// Create a node with no subcategories
    pub fn new(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
            color: category.color,
            subcategories: Vec::new(),
        }
    }

    /// Slugs of this category and all its subcategories
    pub fn slugs(&self) -> Vec<String> {
        std::iter::once(self.slug.clone())
            .chain(self.subcategories.iter().map(|sub| sub.slug.clone()))
            .collect()
    }

    /// Group a flat category list into top-level nodes.
    ///
    /// Nodes and their subcategories are sorted by name. Categories whose
    /// parent is not in the list are dropped.
    pub fn build_tree(categories: Vec<Category>) -> Vec<CategoryNode> {
        let (roots, children): (Vec<_>, Vec<_>) =
            categories.into_iter().partition(Category::is_root);

        let mut nodes: Vec<CategoryNode> = roots.into_iter().map(CategoryNode::new).collect();
        nodes.sort_by(|a, b| a.name.cmp(&b.name));

        for child in children {
            if let Some(node) = nodes.iter_mut().find(|n| Some(n.id) == child.parent_id) {
                node.subcategories.push(child);
            }
        }

        for node in &mut nodes {
            node.subcategories.sort_by(|a, b| a.name.cmp(&b.name));
        }

        nodes
    }
}

/// Category create/update data transfer object.
///
/// The seed routine writes every field on both paths, so one shape serves
/// both create and update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpsertCategory {
    pub name: String,
    pub slug: String,
    pub color: Option<String>,
    pub parent_id: Option<Uuid>,
}

impl UpsertCategory {
    /// Top-level category
    pub fn root(name: impl Into<String>, slug: impl Into<String>, color: Option<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            color,
            parent_id: None,
        }
    }

    /// Subcategory of `parent_id`
    pub fn child(name: impl Into<String>, slug: impl Into<String>, parent_id: Uuid) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            color: None,
            parent_id: Some(parent_id),
        }
    }

    /// Validate fields at the boundary
    pub fn validate(&self) -> DomainResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Category name cannot be empty"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation("Category name is too long"));
        }
        if !is_valid_slug(&self.slug) {
            return Err(DomainError::validation(format!(
                "Invalid category slug '{}'",
                self.slug
            )));
        }
        if let Some(color) = &self.color {
            if !is_valid_color(color) {
                return Err(DomainError::validation(format!("Invalid colour '{}'", color)));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str, parent_id: Option<Uuid>) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            color: None,
            parent_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("business-money"));
        assert!(is_valid_slug("3d-modeling"));
        assert!(!is_valid_slug("Business Money"));
        assert!(!is_valid_slug("trailing-"));
        assert!(!is_valid_slug(""));
    }

    #[test]
    fn test_upsert_rejects_bad_colour() {
        let input = UpsertCategory::root("Design", "design", Some("blue".to_string()));
        assert!(matches!(input.validate(), Err(DomainError::Validation(_))));

        let input = UpsertCategory::root("Design", "design", Some("#B5B9FF".to_string()));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_upsert_rejects_blank_name() {
        let input = UpsertCategory::child("  ", "yoga", Uuid::new_v4());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_build_tree_groups_and_sorts() {
        let music = category("Music", "music", None);
        let design = category("Design", "design", None);
        let theory = category("Music Theory", "music-theory", Some(music.id));
        let history = category("Music History", "music-history", Some(music.id));
        let orphan = category("Orphan", "orphan", Some(Uuid::new_v4()));

        let tree = CategoryNode::build_tree(vec![
            theory.clone(),
            music.clone(),
            orphan,
            design.clone(),
            history.clone(),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].slug, "design");
        assert!(tree[0].subcategories.is_empty());
        assert_eq!(tree[1].slug, "music");
        assert_eq!(tree[1].subcategories, vec![history, theory]);
        assert_eq!(
            tree[1].slugs(),
            vec!["music", "music-history", "music-theory"]
        );
    }
}
