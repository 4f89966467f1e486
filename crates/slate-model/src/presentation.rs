//! Presentation: an ordered deck of slides owned by a sector

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::slide::{Slide, SlideId};

/// Identifier of the sector that owns a presentation
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectorId(String);

impl SectorId {
    /// Wrap a sector id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw id
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectorId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

fn legacy_version() -> u32 {
    0
}

/// A deck of slides
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Record schema version; absent in records written before versioning
    #[serde(default = "legacy_version")]
    pub version: u32,
    pub id: SectorId,
    pub title: String,
    pub description: String,
    /// Order is significant; `slides[i].order == i`
    pub slides: Vec<Slide>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Presentation {
    /// Current record schema version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create an empty presentation for a sector
    pub fn new(
        id: SectorId,
        title: impl Into<String>,
        description: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            id,
            title: title.into(),
            description: description.into(),
            slides: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Three-slide starter deck for a sector
    pub fn starter(id: SectorId, sector_name: &str, now: DateTime<Utc>) -> Self {
        let mut deck = Self::new(
            id,
            format!("{} Presentation", sector_name),
            format!("Overview of the {} sector", sector_name),
            now,
        );

        deck.slides.push(
            Slide::new(format!("Welcome to {}", sector_name), 0, now)
                .with_content("An introduction to our work in this sector."),
        );

        let mut highlights = Slide::new("Key Highlights", 1, now)
            .with_content("Production\nSustainability\nInnovation");
        highlights.background_color = "#14532d".to_string();
        deck.slides.push(highlights);

        let mut closing = Slide::new("Get Involved", 2, now)
            .with_content("Contact our team to learn more.");
        closing.background_color = "#1e3a8a".to_string();
        deck.slides.push(closing);

        deck
    }

    /// Number of slides
    #[inline]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Check if the deck has no slides
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Stamp the modification time
    #[inline]
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Get a slide by id
    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Get a mutable slide by id
    pub fn slide_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    /// Position of a slide in the sequence
    pub fn position(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    /// Append a new slide; its order is the current slide count
    pub fn add_slide(&mut self, title: impl Into<String>, now: DateTime<Utc>) -> SlideId {
        let slide = Slide::new(title, self.slides.len(), now);
        let id = slide.id;
        self.slides.push(slide);
        id
    }

    /// Insert a copy of a slide right after it, with fresh ids throughout
    pub fn duplicate_slide(&mut self, id: SlideId, now: DateTime<Utc>) -> Result<SlideId, ModelError> {
        let index = self.position(id).ok_or(ModelError::SlideNotFound(id))?;
        let mut copy = self.slides[index].clone();
        copy.reidentify();
        copy.title = format!("{} (copy)", copy.title);
        copy.created_at = now;
        copy.updated_at = now;
        let copy_id = copy.id;
        self.slides.insert(index + 1, copy);
        self.reindex();
        Ok(copy_id)
    }

    /// Remove a slide together with its media
    pub fn remove_slide(&mut self, id: SlideId) -> Result<Slide, ModelError> {
        let index = self.position(id).ok_or(ModelError::SlideNotFound(id))?;
        let removed = self.slides.remove(index);
        self.reindex();
        Ok(removed)
    }

    /// Swap a slide with its predecessor. Returns false at the first slide.
    pub fn move_slide_up(&mut self, index: usize) -> Result<bool, ModelError> {
        self.check_index(index)?;
        if index == 0 {
            return Ok(false);
        }
        self.slides.swap(index - 1, index);
        self.reindex();
        Ok(true)
    }

    /// Swap a slide with its successor. Returns false at the last slide.
    pub fn move_slide_down(&mut self, index: usize) -> Result<bool, ModelError> {
        self.check_index(index)?;
        if index + 1 == self.slides.len() {
            return Ok(false);
        }
        self.slides.swap(index, index + 1);
        self.reindex();
        Ok(true)
    }

    /// Replace a slide with an edited copy carrying the same id
    pub fn replace_slide(&mut self, mut slide: Slide) -> Result<(), ModelError> {
        let index = self.position(slide.id).ok_or(ModelError::SlideNotFound(slide.id))?;
        slide.order = index;
        self.slides[index] = slide;
        Ok(())
    }

    /// Rewrite every slide's `order` to match its index
    pub fn reindex(&mut self) {
        for (index, slide) in self.slides.iter_mut().enumerate() {
            slide.order = index;
        }
    }

    /// Verify that `order` matches position for every slide
    pub fn validate(&self) -> Result<(), ModelError> {
        match self.slides.iter().enumerate().find(|(i, s)| s.order != *i) {
            Some((index, slide)) => Err(ModelError::OrderMismatch {
                index,
                order: slide.order,
            }),
            None => Ok(()),
        }
    }

    /// Check if the record needs migration
    pub fn needs_migration(&self) -> bool {
        self.version < Self::CURRENT_VERSION
    }

    /// Migrate to the current schema version
    pub fn migrate(&mut self) {
        // v0 records could carry stale `order` values
        if self.version < 1 {
            self.reindex();
        }
        self.version = Self::CURRENT_VERSION;
    }

    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index >= self.slides.len() {
            return Err(ModelError::SlideIndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        Ok(())
    }
}
