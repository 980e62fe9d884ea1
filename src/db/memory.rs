// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory document store with typed operations.
//!
//! Provides high-level operations for:
//! - Quotes (unique on text)
//! - Users (unique on email, favorites)
//! - Activities (append-only log per user)
//!
//! Unique indexes are claimed before the document is written. An index
//! lock is never held while a document lock is being taken, and a quote
//! lock is never held while a user lock is being taken.

use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::filters::FilterSet;
use crate::models::quote::normalize_tags;
use crate::models::{Activity, ActivityType, NewQuote, NewUser, Quote, User};

#[derive(Default)]
struct Collections {
    quotes: DashMap<Uuid, Quote>,
    /// Normalised quote text → quote ID
    quote_texts: DashMap<String, Uuid>,
    users: DashMap<Uuid, User>,
    /// Lowercased email → user ID
    user_emails: DashMap<String, Uuid>,
    /// User ID → activities, oldest first
    activities: DashMap<Uuid, Vec<Activity>>,
}

/// Shared handle to the store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Collections>,
}

fn text_key(text: &str) -> String {
    text.trim().to_lowercase()
}

fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn quote_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Quote {} not found", id))
}

fn user_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("User {} not found", id))
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Quote Operations ────────────────────────────────────────

    /// Store a new quote. Fails if the same text already exists.
    pub fn insert_quote(&self, input: NewQuote) -> Result<Quote, AppError> {
        let input = input.normalized();
        let quote = Quote {
            id: Uuid::new_v4(),
            text: input.text,
            author: input.author,
            tags: input.tags,
            created_at: Utc::now(),
            updated_at: None,
        };

        match self.inner.quote_texts.entry(text_key(&quote.text)) {
            Entry::Occupied(_) => return Err(AppError::duplicate("text", quote.text)),
            Entry::Vacant(slot) => {
                slot.insert(quote.id);
            }
        }
        self.inner.quotes.insert(quote.id, quote.clone());

        tracing::debug!(quote_id = %quote.id, author = %quote.author, "Quote stored");
        Ok(quote)
    }

    pub fn get_quote(&self, id: Uuid) -> Option<Quote> {
        self.inner.quotes.get(&id).map(|q| q.clone())
    }

    pub fn quote_exists(&self, id: Uuid) -> bool {
        self.inner.quotes.contains_key(&id)
    }

    /// All quotes matching `filters`, newest first.
    pub fn find_quotes(&self, filters: &FilterSet) -> Result<Vec<Quote>, AppError> {
        let mut matched = Vec::new();
        for entry in self.inner.quotes.iter() {
            let document = serde_json::to_value(entry.value())
                .map_err(|e| AppError::Internal(anyhow::anyhow!("Quote encoding failed: {}", e)))?;
            if filters.matches(&document) {
                matched.push(entry.value().clone());
            }
        }
        matched.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(matched)
    }

    /// Replace a quote's content, keeping its ID and creation time.
    pub fn update_quote(&self, id: Uuid, input: NewQuote) -> Result<Quote, AppError> {
        let input = input.normalized();
        let mut quote = self
            .inner
            .quotes
            .get_mut(&id)
            .ok_or_else(|| quote_not_found(id))?;

        let old_key = text_key(&quote.text);
        let new_key = text_key(&input.text);
        if old_key != new_key {
            match self.inner.quote_texts.entry(new_key) {
                Entry::Occupied(_) => return Err(AppError::duplicate("text", input.text)),
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.inner.quote_texts.remove(&old_key);
        }

        quote.text = input.text;
        quote.author = input.author;
        quote.tags = input.tags;
        quote.updated_at = Some(Utc::now());
        Ok(quote.clone())
    }

    /// Delete a quote and drop it from every user's favorites.
    pub fn delete_quote(&self, id: Uuid) -> Result<Quote, AppError> {
        let (_, quote) = self
            .inner
            .quotes
            .remove(&id)
            .ok_or_else(|| quote_not_found(id))?;
        self.inner.quote_texts.remove(&text_key(&quote.text));

        for mut user in self.inner.users.iter_mut() {
            if user.remove_favorite(id) {
                user.version += 1;
            }
        }

        tracing::debug!(quote_id = %id, "Quote deleted");
        Ok(quote)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Create a user. Fails if the email is already registered.
    pub fn insert_user(&self, input: NewUser) -> Result<User, AppError> {
        let email = email_key(&input.email);
        let user = User {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash: input.password_hash,
            display_name: input.display_name.trim().to_string(),
            bio: input.bio,
            location: input.location,
            favorite_categories: normalize_tags(input.favorite_categories),
            favorites: Vec::new(),
            created_at: Utc::now(),
            version: 0,
        };

        match self.inner.user_emails.entry(email) {
            Entry::Occupied(_) => return Err(AppError::duplicate("email", user.email)),
            Entry::Vacant(slot) => {
                slot.insert(user.id);
            }
        }
        self.inner.users.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "User stored");
        Ok(user)
    }

    pub fn get_user(&self, id: Uuid) -> Option<User> {
        self.inner.users.get(&id).map(|u| u.clone())
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        let id = *self.inner.user_emails.get(&email_key(email))?;
        self.get_user(id)
    }

    /// Apply `update` to a stored user and bump its revision.
    pub fn update_user(&self, id: Uuid, update: impl FnOnce(&mut User)) -> Result<User, AppError> {
        let mut user = self
            .inner
            .users
            .get_mut(&id)
            .ok_or_else(|| user_not_found(id))?;
        update(user.value_mut());
        user.version += 1;
        Ok(user.clone())
    }

    /// Add a quote to a user's favorites. Returns `false` if it was already there.
    pub fn add_favorite(&self, user_id: Uuid, quote_id: Uuid) -> Result<bool, AppError> {
        let mut user = self
            .inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        // Under the user lock, so a concurrent delete_quote either sweeps
        // this favorite or is seen here.
        if !self.quote_exists(quote_id) {
            return Err(quote_not_found(quote_id));
        }
        let added = user.add_favorite(quote_id);
        if added {
            user.version += 1;
        }
        Ok(added)
    }

    /// Remove a quote from a user's favorites. Returns `false` if it was not there.
    pub fn remove_favorite(&self, user_id: Uuid, quote_id: Uuid) -> Result<bool, AppError> {
        let mut user = self
            .inner
            .users
            .get_mut(&user_id)
            .ok_or_else(|| user_not_found(user_id))?;
        let removed = user.remove_favorite(quote_id);
        if removed {
            user.version += 1;
        }
        Ok(removed)
    }

    /// The user's favorite quotes, most recently added first.
    pub fn favorite_quotes(&self, user_id: Uuid) -> Result<Vec<Quote>, AppError> {
        let favorites = self
            .inner
            .users
            .get(&user_id)
            .map(|u| u.favorites.clone())
            .ok_or_else(|| user_not_found(user_id))?;

        Ok(favorites
            .into_iter()
            .rev()
            .filter_map(|id| self.get_quote(id))
            .collect())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Append an activity for an existing user and quote.
    pub fn record_activity(
        &self,
        user_id: Uuid,
        kind: ActivityType,
        quote_id: Uuid,
        timestamp: DateTime<Utc>,
    ) -> Result<Activity, AppError> {
        if !self.inner.users.contains_key(&user_id) {
            return Err(user_not_found(user_id));
        }
        if !self.quote_exists(quote_id) {
            return Err(quote_not_found(quote_id));
        }

        let activity = Activity {
            id: Uuid::new_v4(),
            user_id,
            kind,
            quote_id,
            timestamp,
        };
        self.inner
            .activities
            .entry(user_id)
            .or_default()
            .push(activity.clone());

        tracing::debug!(%user_id, %quote_id, kind = %kind, "Activity recorded");
        Ok(activity)
    }

    /// A user's activities, newest first.
    pub fn activities_for_user(&self, user_id: Uuid) -> Vec<Activity> {
        let mut activities = self
            .inner
            .activities
            .get(&user_id)
            .map(|a| a.clone())
            .unwrap_or_default();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        activities
    }

    pub fn quote_count(&self) -> usize {
        self.inner.quotes.len()
    }

    pub fn user_count(&self) -> usize {
        self.inner.users.len()
    }
}
