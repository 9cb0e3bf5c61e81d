use std::cmp::Ordering;

use rocket::serde::{self, Deserialize, Serialize};

/// Ordered collection of ranked items, serialized as a plain array.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard<T: LeaderboardItem> {
    collection: Vec<T>,
}

impl<T: LeaderboardItem> Leaderboard<T> {
    pub fn new(collection: Vec<T>) -> Self {
        Self { collection }
    }

    pub fn add(&mut self, item: T) {
        self.collection.push(item);
    }

    pub fn len(&self) -> usize {
        self.collection.len()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.collection.iter()
    }

    /// Sorts the items best first and drops everything past `capacity`.
    /// Items that rank equally keep their relative order.
    pub fn trim(&mut self, capacity: usize) {
        self.collection.sort_by(T::rank_cmp);
        self.collection.truncate(capacity);
    }
}

impl<T: LeaderboardItem> Default for Leaderboard<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: LeaderboardItem> Serialize for Leaderboard<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.collection.serialize(serializer)
    }
}

impl<'de, T: LeaderboardItem> Deserialize<'de> for Leaderboard<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::new(Vec::deserialize(deserializer)?))
    }
}

pub trait LeaderboardItem: Serialize {
    /// `Less` means `self` ranks above `other`.
    fn rank_cmp(&self, other: &Self) -> Ordering;
}
