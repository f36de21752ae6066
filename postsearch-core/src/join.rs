// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Join engine combining posts with their authors.

use crate::{Post, PostDetail, User};

/// Joins `posts` with `users`, keeping only posts whose title contains `query`.
///
/// # Behavior
///
/// - Title matching is a case-insensitive substring match
/// - Each matching post is paired with the first user whose id equals the
///   post's `user_id`
/// - Posts without an author in `users` are dropped silently
/// - Output order is the input order of `posts`; no sorting is applied
/// - An empty result is a valid result, not an error
///
/// The function is pure: identical inputs always produce identical output.
///
/// # Examples
///
/// ```
/// use postsearch_core::{join, Post, User};
///
/// let users = vec![User::new(1, "lala", "lala1", "lala@mail.com")];
/// let posts = vec![
///     Post::new(1, 1, "Title 1", "Body 1"),
///     Post::new(4, 2, "Title 1", "Body 2"), // no user 4: dropped
/// ];
///
/// let details = join(&users, &posts, "title 1");
/// assert_eq!(details.len(), 1);
/// assert_eq!(details[0].username, "lala1");
/// ```
#[must_use]
pub fn join(users: &[User], posts: &[Post], query: &str) -> Vec<PostDetail> {
    let needle = query.to_lowercase();

    posts
        .iter()
        .filter(|post| post.title.to_lowercase().contains(&needle))
        .filter_map(|post| {
            let user = users.iter().find(|user| user.id == post.user_id)?;
            Some(PostDetail {
                user_id: user.id,
                post_id: post.id,
                title: post.title.clone(),
                body: post.body.clone(),
                username: user.username.clone(),
            })
        })
        .collect()
}
