//! Store listing entity and its strongly-typed mutations.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, Location, StoreId, UserId};

use crate::rating::RatingSummary;

/// Store name length bounds (characters, after trimming).
pub const NAME_MIN: usize = 10;
pub const NAME_MAX: usize = 50;

/// Photo filename assigned to new stores.
const DEFAULT_PHOTO: &str = "store.png";

/// Store listing.
///
/// # Invariants
/// - `slug` is unique across stores and derived from `name`; it is
///   regenerated only when the name changes, with a numeric suffix on
///   collision.
/// - `ratings` is always the image of the store's current review set
///   (recomputed after every review mutation); it is never edited directly.
/// - `tags` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub ratings: RatingSummary,
    pub location: Location,
    pub photo: String,
    pub author: UserId,
    pub created_at: DateTime<Utc>,
}

/// Request to create a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateStore {
    pub name: String,
    pub description: String,
    pub tags: BTreeSet<String>,
    pub location: Location,
}

impl CreateStore {
    pub fn validate(&self) -> DomainResult<()> {
        validate_name(&self.name)?;
        validate_tags(&self.tags)?;
        if self.location.address.trim().is_empty() {
            return Err(DomainError::validation("an address must be supplied"));
        }
        Ok(())
    }
}

/// Partial store update. Fields absent from this struct (slug, ratings,
/// author) cannot be changed through an update request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateStore {
    pub name: Option<String>,
    pub description: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub location: Option<Location>,
}

fn validate_name(name: &str) -> DomainResult<()> {
    let len = name.trim().chars().count();
    if len < NAME_MIN {
        return Err(DomainError::validation(format!(
            "a store name must have at least {NAME_MIN} characters"
        )));
    }
    if len > NAME_MAX {
        return Err(DomainError::validation(format!(
            "a store name must have at most {NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_tags(tags: &BTreeSet<String>) -> DomainResult<()> {
    if tags.is_empty() || tags.iter().all(|t| t.trim().is_empty()) {
        return Err(DomainError::validation("a store needs at least one tag"));
    }
    Ok(())
}

impl Store {
    /// Construct a new store from a validated request.
    ///
    /// `slug` is supplied by the caller because deriving it needs the set of
    /// slugs already taken (see `slug::disambiguate_slug`).
    pub fn create(
        id: StoreId,
        cmd: &CreateStore,
        slug: String,
        author: UserId,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        cmd.validate()?;

        Ok(Self {
            id,
            name: cmd.name.trim().to_string(),
            slug,
            description: cmd.description.trim().to_string(),
            tags: cmd.tags.clone(),
            ratings: RatingSummary::default(),
            location: cmd.location.clone(),
            photo: DEFAULT_PHOTO.to_string(),
            author,
            created_at: now,
        })
    }

    /// Apply a partial update.
    ///
    /// Returns whether the name changed; the caller must re-derive the slug
    /// in that case. The slug is deliberately left untouched here.
    pub fn apply_update(&mut self, cmd: &UpdateStore) -> DomainResult<bool> {
        if let Some(name) = &cmd.name {
            validate_name(name)?;
        }
        if let Some(tags) = &cmd.tags {
            validate_tags(tags)?;
        }
        if let Some(location) = &cmd.location {
            if location.address.trim().is_empty() {
                return Err(DomainError::validation("an address must be supplied"));
            }
        }

        let mut name_changed = false;
        if let Some(name) = &cmd.name {
            let name = name.trim();
            if name != self.name {
                self.name = name.to_string();
                name_changed = true;
            }
        }
        if let Some(description) = &cmd.description {
            self.description = description.trim().to_string();
        }
        if let Some(tags) = &cmd.tags {
            self.tags = tags.clone();
        }
        if let Some(location) = &cmd.location {
            self.location = location.clone();
        }

        Ok(name_changed)
    }

    /// Install a recomputed rating aggregate (both fields in one update).
    pub fn set_ratings(&mut self, summary: RatingSummary) {
        self.ratings = summary;
    }
}

impl Entity for Store {
    type Id = StoreId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::GeoPoint;

    fn test_location() -> Location {
        Location::new(GeoPoint::new(-2.2374, 53.4808).unwrap(), "1 Deansgate, Manchester").unwrap()
    }

    fn create_cmd() -> CreateStore {
        CreateStore {
            name: "The Codfather Fish Bar".to_string(),
            description: "Proper chips.".to_string(),
            tags: BTreeSet::from(["food".to_string()]),
            location: test_location(),
        }
    }

    fn test_store() -> Store {
        Store::create(
            StoreId::new(),
            &create_cmd(),
            "the-codfather-fish-bar".to_string(),
            UserId::new(),
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn create_starts_with_neutral_ratings() {
        let store = test_store();
        assert_eq!(store.ratings, RatingSummary::default());
        assert_eq!(store.photo, "store.png");
    }

    #[test]
    fn name_length_is_bounded() {
        let mut cmd = create_cmd();
        cmd.name = "Too short".to_string();
        assert!(cmd.validate().is_err());

        let mut cmd = create_cmd();
        cmd.name = "x".repeat(NAME_MAX + 1);
        assert!(cmd.validate().is_err());

        let mut cmd = create_cmd();
        cmd.name = "Exactly ok name".to_string();
        assert!(cmd.validate().is_ok());
    }

    #[test]
    fn tags_must_be_non_empty() {
        let mut cmd = create_cmd();
        cmd.tags = BTreeSet::new();
        assert!(matches!(cmd.validate().unwrap_err(), DomainError::Validation(_)));
    }

    #[test]
    fn update_reports_name_change_and_keeps_slug() {
        let mut store = test_store();
        let slug_before = store.slug.clone();

        let update = UpdateStore {
            description: Some("New blurb".to_string()),
            ..UpdateStore::default()
        };
        assert!(!store.apply_update(&update).unwrap());
        assert_eq!(store.slug, slug_before);

        let update = UpdateStore {
            name: Some("A Completely New Name".to_string()),
            ..UpdateStore::default()
        };
        assert!(store.apply_update(&update).unwrap());
        // Slug untouched here; re-derivation is the caller's job.
        assert_eq!(store.slug, slug_before);
    }

    #[test]
    fn update_to_same_name_is_not_a_name_change() {
        let mut store = test_store();
        let update = UpdateStore {
            name: Some(store.name.clone()),
            ..UpdateStore::default()
        };
        assert!(!store.apply_update(&update).unwrap());
    }

    #[test]
    fn update_validates_before_mutating() {
        let mut store = test_store();
        let before = store.clone();

        let update = UpdateStore {
            name: Some("ok".to_string()),
            description: Some("should not land".to_string()),
            ..UpdateStore::default()
        };
        assert!(store.apply_update(&update).is_err());
        assert_eq!(store, before);
    }
}
