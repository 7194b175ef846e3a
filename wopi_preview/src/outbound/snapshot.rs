//! this module provides an in-memory impl of [DocumentStore] for hosts that
//! push state snapshots, and for tests

use crate::domain::ports::DocumentStore;
use models_wopi::{channel::Channel, post::Post, user::User};
use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

/// An in-memory [DocumentStore].
///
/// The host pushes whatever slice of its state the preview needs; reads see
/// the most recently pushed copy. There is no eviction, the preview only
/// ever tracks a handful of records.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    posts: HashMap<String, Post>,
    channels: HashMap<String, Channel>,
    current_user: User,
    exclusive_surface: bool,
}

impl SnapshotStore {
    /// create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// store a post snapshot, replacing any previous copy
    pub fn put_post(&self, post: Post) {
        self.write().posts.insert(post.id.clone(), post);
    }

    /// drop the stored copy of a post
    pub fn remove_post(&self, post_id: &str) {
        self.write().posts.remove(post_id);
    }

    /// store a channel snapshot, replacing any previous copy
    pub fn put_channel(&self, channel: Channel) {
        self.write().channels.insert(channel.id.clone(), channel);
    }

    /// set the authenticated user the ui acts for
    pub fn set_current_user(&self, user: User) {
        self.write().current_user = user;
    }

    /// flag whether a competing exclusive surface is on screen
    pub fn set_exclusive_surface(&self, active: bool) {
        self.write().exclusive_surface = active;
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for SnapshotStore {
    fn get_post(&self, post_id: &str) -> Option<Post> {
        self.read().posts.get(post_id).cloned()
    }

    fn get_current_user(&self) -> User {
        self.read().current_user.clone()
    }

    fn get_channel(&self, channel_id: &str) -> Option<Channel> {
        self.read().channels.get(channel_id).cloned()
    }

    fn exclusive_surface_active(&self) -> bool {
        self.read().exclusive_surface
    }
}
