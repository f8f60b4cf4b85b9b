//! Hashtag timeline

use std::ops::{Deref, DerefMut};

use crate::api::{Scope, TimelineSource};
use crate::error::Result;
use crate::models::Status;

use super::TimelineModule;

/// Where to continue a hashtag timeline from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPositionWithTag {
    /// Oldest status currently shown
    pub status: Status,
    /// Tag name without the leading `#`
    pub tag: String,
}

/// Statuses tagged with a hashtag
#[derive(Debug, Default)]
pub struct TagTimeline {
    module: TimelineModule<Status>,
}

impl TagTimeline {
    /// Create an empty hashtag timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the newest statuses tagged `tag`, replacing the timeline
    pub async fn fetch<S>(&mut self, source: &S, tag: &str) -> Result<Vec<Status>>
    where
        S: TimelineSource<Status>,
    {
        let scope = Scope::Tag(tag.to_string());
        Ok(self.module.fetch(source, &scope).await?.to_vec())
    }

    /// Load statuses older than `position.status` and add them to the tail
    pub async fn lazy_fetch_timeline<S>(
        &mut self,
        source: &S,
        position: &LoadPositionWithTag,
    ) -> Result<usize>
    where
        S: TimelineSource<Status>,
    {
        let scope = Scope::Tag(position.tag.clone());
        self.module
            .lazy_fetch(source, &scope, &position.status)
            .await
    }
}

impl Deref for TagTimeline {
    type Target = TimelineModule<Status>;

    fn deref(&self) -> &Self::Target {
        &self.module
    }
}

impl DerefMut for TagTimeline {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.module
    }
}
