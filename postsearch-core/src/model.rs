// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use serde::{Deserialize, Serialize};

/// User record as served by the `/users` endpoint.
///
/// Extra fields present on the wire (address, phone, company, ...) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
}

impl User {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Post record as served by the `/posts` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Foreign key into [`User::id`]
    pub user_id: i64,
    pub id: i64,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(user_id: i64, id: i64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// A post joined with the username of its author.
///
/// Only built by [`join`](crate::join); identity is the post id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostDetail {
    pub user_id: i64,
    pub post_id: i64,
    pub title: String,
    pub body: String,
    pub username: String,
}

impl PostDetail {
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.post_id
    }
}
