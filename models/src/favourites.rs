//! The user's favourite carpark ids, stored one per line.

/// Outcome of a favourites mutation, so callers can word their reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavouriteChange {
    Added,
    Removed,
    AlreadyPresent,
    NotPresent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favourites {
    ids: Vec<String>,
}

impl Favourites {
    /// Parse the favourites file: one id per line, blanks and repeats skipped.
    pub fn from_text(text: &str) -> Self {
        let mut favourites = Self::default();
        for line in text.lines() {
            let id = line.trim();
            if !id.is_empty() {
                favourites.add(id);
            }
        }
        favourites
    }

    pub fn to_text(&self) -> String {
        self.ids.join("\n")
    }

    pub fn add(&mut self, carpark_id: &str) -> FavouriteChange {
        if self.contains(carpark_id) {
            return FavouriteChange::AlreadyPresent;
        }
        self.ids.push(carpark_id.to_string());
        FavouriteChange::Added
    }

    pub fn remove(&mut self, carpark_id: &str) -> FavouriteChange {
        let before = self.ids.len();
        self.ids.retain(|id| !id.eq_ignore_ascii_case(carpark_id));
        if self.ids.len() == before {
            FavouriteChange::NotPresent
        } else {
            FavouriteChange::Removed
        }
    }

    pub fn contains(&self, carpark_id: &str) -> bool {
        self.ids.iter().any(|id| id.eq_ignore_ascii_case(carpark_id))
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
