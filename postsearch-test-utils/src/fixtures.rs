// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use postsearch_core::{Post, PostDetail, User};

pub fn user_lala() -> User {
    User::new(1, "lala", "lala1", "lala@mail.com")
}

pub fn user_lele() -> User {
    User::new(2, "lele", "lele1", "lele@mail.com")
}

pub fn user_lili() -> User {
    User::new(3, "lili", "lili1", "lili@mail.com")
}

pub fn users() -> Vec<User> {
    vec![user_lala(), user_lele(), user_lili()]
}

/// Four posts; the second one belongs to user 4, who is not in [`users`].
pub fn posts() -> Vec<Post> {
    vec![
        Post::new(1, 1, "Title 1", "Body 1"),
        Post::new(4, 1, "Title 1", "Body 1"),
        Post::new(2, 2, "Title 2", "Body 2"),
        Post::new(3, 3, "Title 3", "Body 3"),
    ]
}

/// The join of [`users`] and [`posts`] for the query `"Title 1"`.
pub fn title_1_details() -> Vec<PostDetail> {
    vec![PostDetail {
        user_id: 1,
        post_id: 1,
        title: "Title 1".to_string(),
        body: "Body 1".to_string(),
        username: "lala1".to_string(),
    }]
}
