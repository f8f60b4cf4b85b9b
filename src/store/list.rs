//! List timeline

use std::ops::{Deref, DerefMut};

use crate::api::{Scope, TimelineSource};
use crate::error::Result;
use crate::models::Status;

use super::TimelineModule;

/// Where to continue a list timeline from
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPositionWithList {
    /// Oldest status currently shown
    pub status: Status,
    /// List ID
    pub list_id: String,
}

/// Statuses from the members of a list
#[derive(Debug, Default)]
pub struct ListTimeline {
    module: TimelineModule<Status>,
}

impl ListTimeline {
    /// Create an empty list timeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the newest statuses of list `list_id`, replacing the timeline
    pub async fn fetch<S>(&mut self, source: &S, list_id: &str) -> Result<Vec<Status>>
    where
        S: TimelineSource<Status>,
    {
        let scope = Scope::List(list_id.to_string());
        Ok(self.module.fetch(source, &scope).await?.to_vec())
    }

    /// Load statuses older than `position.status` and add them to the tail
    pub async fn lazy_fetch_timeline<S>(
        &mut self,
        source: &S,
        position: &LoadPositionWithList,
    ) -> Result<usize>
    where
        S: TimelineSource<Status>,
    {
        let scope = Scope::List(position.list_id.clone());
        self.module
            .lazy_fetch(source, &scope, &position.status)
            .await
    }
}

impl Deref for ListTimeline {
    type Target = TimelineModule<Status>;

    fn deref(&self) -> &Self::Target {
        &self.module
    }
}

impl DerefMut for ListTimeline {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.module
    }
}
