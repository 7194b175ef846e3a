use crate::domain::models::{DerivedPermissions, PreviewTarget, ScopeChange};
use cool_asserts::assert_matches;
use models_wopi::{
    edit_scope::{EditScope, file_permissions_key},
    file::FileInfo,
    post::Post,
    user::User,
};
use std::collections::HashMap;

const FILE_ID: &str = "fileid";

fn post(author: &str, marker: Option<&str>) -> Post {
    let mut props = HashMap::new();
    if let Some(marker) = marker {
        props.insert(file_permissions_key(FILE_ID), serde_json::json!(marker));
    }
    Post {
        id: "postid".to_string(),
        channel_id: "channelid".to_string(),
        user_id: author.to_string(),
        update_at: 1,
        props,
    }
}

#[test]
fn missing_marker_resolves_channel_wide() {
    let post = post("bob", None);
    let permissions = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);

    assert_matches!(
        permissions,
        DerivedPermissions {
            is_owner: false,
            edit_scope: EditScope::ChannelWide,
            can_edit: true,
        }
    );
}

#[test]
fn owner_marker_locks_out_everyone_but_the_owner() {
    let post = post("bob", Some("owner"));

    let owner = DerivedPermissions::derive(Some(&post), &User::new("bob"), FILE_ID, true);
    assert_matches!(
        owner,
        DerivedPermissions {
            is_owner: true,
            edit_scope: EditScope::OwnerOnly,
            can_edit: true,
        }
    );

    let visitor = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);
    assert_matches!(
        visitor,
        DerivedPermissions {
            is_owner: false,
            edit_scope: EditScope::OwnerOnly,
            can_edit: false,
        }
    );
}

#[test]
fn unknown_marker_values_resolve_channel_wide() {
    let post = post("bob", Some("everyone_and_their_dog"));
    let permissions = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);
    assert_eq!(permissions.edit_scope, EditScope::ChannelWide);
    assert!(permissions.can_edit);
}

#[test]
fn marker_for_another_file_does_not_narrow_this_one() {
    let mut post = post("bob", None);
    post.props.insert(
        file_permissions_key("otherfile"),
        serde_json::json!("owner"),
    );

    let permissions = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);
    assert_eq!(permissions.edit_scope, EditScope::ChannelWide);
}

#[test]
fn disabled_feature_ignores_the_marker() {
    let post = post("bob", Some("owner"));
    let permissions = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, false);

    assert_matches!(
        permissions,
        DerivedPermissions {
            is_owner: false,
            edit_scope: EditScope::ChannelWide,
            can_edit: true,
        }
    );
}

#[test]
fn missing_post_never_grants_ownership() {
    let permissions = DerivedPermissions::derive(None, &User::new("alice"), FILE_ID, true);
    assert!(!permissions.is_owner);
    assert_eq!(permissions.edit_scope, EditScope::ChannelWide);
}

#[test]
fn can_edit_covers_the_ownership_scope_table() {
    let cases = [
        ("alice", None, true),
        ("alice", Some("owner"), true),
        ("bob", None, true),
        ("bob", Some("owner"), false),
    ];
    for (author, marker, can_edit) in cases {
        let post = post(author, marker);
        let permissions =
            DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);
        assert_eq!(
            permissions.can_edit, can_edit,
            "author {author}, marker {marker:?}"
        );
    }
}

#[test]
fn with_scope_recomputes_can_edit() {
    let post = post("bob", None);
    let permissions = DerivedPermissions::derive(Some(&post), &User::new("alice"), FILE_ID, true);

    let narrowed = permissions.with_scope(EditScope::OwnerOnly);
    assert!(!narrowed.can_edit);

    let widened = narrowed.with_scope(EditScope::ChannelWide);
    assert!(widened.can_edit);
}

#[test]
fn target_is_built_from_file_info() {
    let file = FileInfo {
        id: FILE_ID.to_string(),
        name: "report.docx".to_string(),
        extension: "docx".to_string(),
        post_id: "postid".to_string(),
    };
    let target = PreviewTarget::from(&file);
    assert_eq!(target.file_id, FILE_ID);
    assert_eq!(target.post_id, "postid");
}

#[test]
fn scope_change_starts_idle() {
    assert_eq!(ScopeChange::default(), ScopeChange::Idle);
    assert!(!ScopeChange::Idle.is_pending());
    assert!(
        ScopeChange::Pending {
            prior: EditScope::ChannelWide,
            next: EditScope::OwnerOnly,
        }
        .is_pending()
    );
}
