//! This module defines the services that are exposed by this crate

use crate::domain::{
    models::{DerivedPermissions, PreviewError, PreviewModal, PreviewTarget, ScopeChange},
    ports::{CapabilitySource, ConfigSource, DocumentStore, PermissionGateway},
};
use models_wopi::{
    capability::WopiFileInfo, config::FeatureConfig, edit_scope::EditScope, file::FileInfo,
    post::Post, user::User,
};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, RwLock},
};


/// Lazily loaded plugin feature configuration.
///
/// Owned by the plugin root and passed by reference into every derivation.
/// Until a load succeeds all flags answer `false`, so a broken config
/// endpoint degrades the preview to its most permissive, feature-inert
/// behavior instead of breaking it.
#[derive(Debug, Default)]
pub struct FeatureGate {
    config: RwLock<Option<FeatureConfig>>,
}

impl FeatureGate {
    /// create an unloaded gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the configuration at most once.
    ///
    /// A call after a successful load is a no-op. A failed fetch leaves the
    /// gate unloaded and hands the error back to the activation caller,
    /// which owns any retry policy.
    #[tracing::instrument(err(Debug), skip(self, source))]
    pub async fn load_once<S>(&self, source: &S) -> Result<(), PreviewError>
    where
        S: ConfigSource,
        anyhow::Error: From<S::Err>,
    {
        if self.is_loaded() {
            return Ok(());
        }
        match source.get_feature_config().await {
            Ok(config) => {
                *self.write() = Some(config);
                Ok(())
            }
            Err(e) => Err(PreviewError::ConfigUnavailable(anyhow::Error::from(e))),
        }
    }

    /// Whether per-file edit permissions are enforced; `false` while the
    /// gate is unloaded
    pub fn file_edit_permissions(&self) -> bool {
        self.read().is_some_and(|config| config.file_edit_permissions)
    }

    /// whether a configuration has been loaded
    pub fn is_loaded(&self) -> bool {
        self.read().is_some()
    }

    /// drop the loaded configuration so the next [FeatureGate::load_once]
    /// fetches again
    pub fn reset(&self) {
        *self.write() = None;
    }

    fn read(&self) -> Option<FeatureConfig> {
        *self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<FeatureConfig>> {
        self.config.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fetch-once cache of the extensions the WOPI editor can open.
///
/// While unloaded, and after a failed fetch, every lookup answers "not
/// supported" so the host quietly falls back to its native preview.
#[derive(Debug, Default)]
pub struct CapabilityCache {
    map: RwLock<Option<HashMap<String, WopiFileInfo>>>,
}

impl CapabilityCache {
    /// create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the capability map at most once.
    ///
    /// A call after a successful fetch is a no-op; the map never changes
    /// within a session. A failed fetch leaves the cache empty and hands
    /// the error back to the activation caller, which owns any retry
    /// policy.
    #[tracing::instrument(err(Debug), skip(self, source))]
    pub async fn fetch_once<S>(&self, source: &S) -> Result<(), PreviewError>
    where
        S: CapabilitySource,
        anyhow::Error: From<S::Err>,
    {
        if self.is_loaded() {
            return Ok(());
        }
        match source.get_file_list().await {
            Ok(list) => {
                let map = list
                    .into_iter()
                    .map(|(extension, info)| (extension.to_lowercase(), info))
                    .collect();
                *self.map.write().unwrap_or_else(PoisonError::into_inner) = Some(map);
                Ok(())
            }
            Err(e) => Err(PreviewError::CapabilityFetchFailed(anyhow::Error::from(e))),
        }
    }

    /// The capability entry for an extension, if the editor handles it.
    /// Lookups are case insensitive and tolerate a leading dot.
    pub fn lookup(&self, extension: &str) -> Option<WopiFileInfo> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()?
            .get(&extension)
            .cloned()
    }

    /// whether the editor can open files with this extension
    pub fn supports(&self, extension: &str) -> bool {
        self.lookup(extension).is_some()
    }

    /// Whether the editor can modify files with this extension, not just
    /// display them; the host offers the edit control only when it can
    pub fn supports_editing(&self, extension: &str) -> bool {
        self.lookup(extension)
            .is_some_and(|info| info.action.is_editable())
    }

    /// Whether the preview override should be offered for a file at all;
    /// the host asks this before rendering its own preview
    pub fn override_applicable(&self, file: &FileInfo) -> bool {
        self.supports(&file.extension)
    }

    /// whether a capability map has been fetched
    pub fn is_loaded(&self) -> bool {
        self.map
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// drop the cached map so the next [CapabilityCache::fetch_once]
    /// fetches again
    pub fn reset(&self) {
        *self.map.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Memoizes the most recent permission derivation.
///
/// Render passes hammer the derivation with unchanged inputs; the memo is
/// keyed by the identity and version stamp of those inputs so an unchanged
/// pass returns the cached value without recomputation.
#[derive(Debug, Default)]
pub struct PermissionResolver {
    memo: Option<(MemoKey, DerivedPermissions)>,
    computations: usize,
}

#[derive(Debug, PartialEq, Eq)]
struct MemoKey {
    post: Option<(String, i64)>,
    user_id: String,
    file_id: String,
    feature_enabled: bool,
}

impl MemoKey {
    fn matches(
        &self,
        post: Option<&Post>,
        user: &User,
        file_id: &str,
        feature_enabled: bool,
    ) -> bool {
        self.feature_enabled == feature_enabled
            && self.user_id == user.id
            && self.file_id == file_id
            && match (&self.post, post) {
                (None, None) => true,
                (Some((id, version)), Some(post)) => {
                    *id == post.id && *version == post.update_at
                }
                _ => false,
            }
    }
}

impl PermissionResolver {
    /// create a resolver with an empty memo
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the permissions for the input snapshot, reusing the memoized
    /// value when the snapshot's identity and version are unchanged
    pub fn resolve(
        &mut self,
        post: Option<&Post>,
        user: &User,
        file_id: &str,
        feature_enabled: bool,
    ) -> DerivedPermissions {
        if let Some((key, value)) = &self.memo
            && key.matches(post, user, file_id, feature_enabled)
        {
            return *value;
        }

        let value = DerivedPermissions::derive(post, user, file_id, feature_enabled);
        self.memo = Some((
            MemoKey {
                post: post.map(|post| (post.id.clone(), post.update_at)),
                user_id: user.id.clone(),
                file_id: file_id.to_string(),
                feature_enabled,
            },
            value,
        ));
        self.computations += 1;
        value
    }

    /// how many derivations were actually computed rather than served from
    /// the memo
    pub fn computations(&self) -> usize {
        self.computations
    }
}

/// An optimistic scope value layered over the snapshot-derived one, tagged
/// with the post version it was derived from. The first snapshot carrying a
/// different version wins and drops the override.
#[derive(Debug, Clone, Copy)]
struct ScopeOverride {
    scope: EditScope,
    post_version: Option<i64>,
}

#[derive(Debug, Default)]
struct FileScopeState {
    change: ScopeChange,
    override_scope: Option<ScopeOverride>,
}

#[derive(Debug, Default)]
struct ViewState {
    target: Option<PreviewTarget>,
    editable: bool,
    pending_scope_change: bool,
    files: HashMap<String, FileScopeState>,
    resolver: PermissionResolver,
}

impl ViewState {
    fn targets_file(&self, file_id: &str) -> bool {
        self.target
            .as_ref()
            .is_some_and(|target| target.file_id == file_id)
    }

    /// Derivation plus local bookkeeping: layer the optimistic override
    /// over the snapshot value (or drop it once the server moved on), then
    /// force edit mode off if the outcome locks the user out.
    fn resolve(
        &mut self,
        post: Option<&Post>,
        user: &User,
        target: &PreviewTarget,
        feature_enabled: bool,
    ) -> DerivedPermissions {
        let mut permissions = self
            .resolver
            .resolve(post, user, &target.file_id, feature_enabled);

        let version = post.map(|post| post.update_at);
        if let Some(file) = self.files.get_mut(&target.file_id)
            && let Some(override_scope) = file.override_scope
        {
            if override_scope.post_version == version && feature_enabled {
                permissions = permissions.with_scope(override_scope.scope);
            } else {
                // a newer server write (or a flipped gate) wins
                file.override_scope = None;
            }
        }

        if self.targets_file(&target.file_id) && self.editable && !permissions.can_edit {
            self.editable = false;
        }
        permissions
    }
}

/// Controls the preview modal and drives edit-permission changes against
/// the backend.
///
/// All methods take `&self`; internal state is guarded so that a scope
/// change awaiting the backend never blocks modal operations, and scope
/// changes for one file are serialized on a per-file queue.
pub struct PreviewService<G> {
    gateway: G,
    state: RwLock<ViewState>,
    queues: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl<G> PreviewService<G>
where
    G: PermissionGateway,
    anyhow::Error: From<G::Err>,
{
    /// create a service persisting scope changes through the input gateway
    pub fn new(gateway: G) -> Self {
        PreviewService {
            gateway,
            state: RwLock::new(ViewState::default()),
            queues: Mutex::new(HashMap::new()),
        }
    }

    /// Open the preview for a file, replacing any previous target.
    /// Every open starts in view mode with no pending change.
    pub fn open(&self, target: PreviewTarget) {
        tracing::debug!(file_id = %target.file_id, "opening file preview");
        let mut state = self.state_write();
        state.target = Some(target);
        state.editable = false;
        state.pending_scope_change = false;
    }

    /// Close the preview and leave edit mode. An in-flight scope change is
    /// not cancelled; its outcome lands in the per-file state without ever
    /// reopening the modal.
    pub fn close(&self) {
        let mut state = self.state_write();
        if let Some(target) = state.target.take() {
            tracing::debug!(file_id = %target.file_id, "closing file preview");
        }
        state.editable = false;
        state.pending_scope_change = false;
    }

    /// a snapshot of the modal as the host should render it
    pub fn modal(&self) -> PreviewModal {
        let state = self.state_read();
        PreviewModal {
            visible: state.target.is_some(),
            target_file_id: state
                .target
                .as_ref()
                .map(|target| target.file_id.clone()),
            editable: state.editable,
            pending_scope_change: state.pending_scope_change,
        }
    }

    /// Whether the modal should actually be on screen: open, and not
    /// suppressed by a competing exclusive surface. Suppression does not
    /// touch the open state, so the modal reappears once the surface goes
    /// away.
    pub fn is_presented(&self, store: &impl DocumentStore) -> bool {
        self.state_read().target.is_some() && !store.exclusive_surface_active()
    }

    /// the lifecycle state of the most recent scope change for a file
    pub fn scope_change(&self, file_id: &str) -> ScopeChange {
        self.state_read()
            .files
            .get(file_id)
            .map(|file| file.change)
            .unwrap_or_default()
    }

    /// Resolve the permissions for a target against the current store
    /// snapshot, applying any optimistic scope still in flight and forcing
    /// edit mode off if the result locks the user out
    pub fn resolve_permissions(
        &self,
        store: &impl DocumentStore,
        gate: &FeatureGate,
        target: &PreviewTarget,
    ) -> DerivedPermissions {
        let user = store.get_current_user();
        let post = store.get_post(&target.post_id);
        self.state_write()
            .resolve(post.as_ref(), &user, target, gate.file_edit_permissions())
    }

    /// The conversation label for the post the previewed file belongs to,
    /// for the preview header
    pub fn conversation_label(&self, store: &impl DocumentStore) -> Option<String> {
        let target = self.state_read().target.clone()?;
        let post = store.get_post(&target.post_id)?;
        let channel = store.get_channel(&post.channel_id)?;
        Some(channel.conversation_label().to_string())
    }

    /// Flip the preview between view and edit mode.
    ///
    /// Purely local, no backend involved. Rejected when no preview is open
    /// or when the resolved scope does not permit the current user.
    pub fn toggle_editable(
        &self,
        store: &impl DocumentStore,
        gate: &FeatureGate,
    ) -> Result<bool, PreviewError> {
        let user = store.get_current_user();
        let mut state = self.state_write();
        let Some(target) = state.target.clone() else {
            return Err(PreviewError::ModalClosed);
        };
        let post = store.get_post(&target.post_id);
        let permissions = state.resolve(
            post.as_ref(),
            &user,
            &target,
            gate.file_edit_permissions(),
        );
        if !permissions.can_edit {
            return Err(PreviewError::EditNotPermitted {
                file_id: target.file_id,
            });
        }
        state.editable = !state.editable;
        Ok(state.editable)
    }

    /// Toggle the previewed file between owner-only and channel-wide
    /// editing.
    ///
    /// The flip is applied optimistically before the backend answers:
    /// readers immediately see the new scope and a pending marker, and a
    /// non-owner narrowing the scope onto the owner is thrown out of edit
    /// mode on the spot. On rejection everything reverts to the pre-request
    /// values and the error is returned. Toggles for the same file are
    /// serialized; a second call waits for the first to resolve and then
    /// applies to its outcome.
    #[tracing::instrument(err(Debug), skip(self, store, gate))]
    pub async fn toggle_channel_edit_scope(
        &self,
        store: &impl DocumentStore,
        gate: &FeatureGate,
    ) -> Result<EditScope, PreviewError> {
        let Some(target) = self.state_read().target.clone() else {
            return Err(PreviewError::ModalClosed);
        };
        if !gate.file_edit_permissions() {
            return Err(PreviewError::FeatureDisabled);
        }

        let queue = self.queue_for(&target.file_id);
        let _serialized = queue.lock().await;

        let user = store.get_current_user();
        let post = store.get_post(&target.post_id);
        let version = post.as_ref().map(|post| post.update_at);

        let (prior, next, is_owner) = {
            let mut state = self.state_write();
            let permissions = state.resolve(post.as_ref(), &user, &target, true);
            let prior = permissions.edit_scope;
            let next = prior.flipped();

            let file = state.files.entry(target.file_id.clone()).or_default();
            file.change = ScopeChange::Pending { prior, next };
            file.override_scope = Some(ScopeOverride {
                scope: next,
                post_version: version,
            });

            if state.targets_file(&target.file_id) {
                state.pending_scope_change = true;
                if next == EditScope::OwnerOnly && !permissions.is_owner {
                    state.editable = false;
                }
            }
            (prior, next, permissions.is_owner)
        };
        tracing::debug!(file_id = %target.file_id, %prior, %next, "switching edit scope");

        match self.gateway.update_file_permission(&target.file_id, next).await {
            Ok(()) => {
                let mut state = self.state_write();
                if let Some(file) = state.files.get_mut(&target.file_id) {
                    file.change = ScopeChange::Committed { scope: next };
                }
                if state.targets_file(&target.file_id) {
                    state.pending_scope_change = false;
                }
                Ok(next)
            }
            Err(e) => {
                let mut state = self.state_write();
                if let Some(file) = state.files.get_mut(&target.file_id) {
                    file.change = ScopeChange::RolledBack { scope: prior };
                    file.override_scope = None;
                }
                if state.targets_file(&target.file_id) {
                    state.pending_scope_change = false;
                    if !(is_owner || prior == EditScope::ChannelWide) {
                        state.editable = false;
                    }
                }
                Err(PreviewError::PermissionUpdateRejected {
                    file_id: target.file_id.clone(),
                    source: anyhow::Error::from(e),
                })
            }
        }
    }

    fn queue_for(&self, file_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.queues
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(file_id.to_string())
            .or_default()
            .clone()
    }

    fn state_read(&self) -> std::sync::RwLockReadGuard<'_, ViewState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_write(&self) -> std::sync::RwLockWriteGuard<'_, ViewState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
