//! Integration tests for dragging folders against a JSON folder file.

mod helpers;

use foldertree_core::error::ErrorKind;
use foldertree_core::types::FolderId;
use foldertree_engine::{DropOutcome, PointerMove, PointerPosition, RejectReason, ReleaseOutcome};

use helpers::{TestApp, ids, photo_library};

const INDENT: f64 = 24.0;

#[tokio::test]
async fn test_nest_folder_between_siblings() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    assert!(service.on_drag_start(FolderId(7)));
    service.on_drag_over(Some(FolderId(4)));
    service.on_drag_move(INDENT);

    let outcome = service.on_drag_end().await.expect("drop");
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            id: FolderId(7),
            parent: Some(FolderId(1)),
            previous_parent: None,
            persisted: true,
        }
    );
    assert_eq!(ids(service.canonical()), vec![1, 2, 3, 7, 4, 5, 6]);
    assert_eq!(app.stored_parent(7).await, Some(FolderId(1)));

    let reloaded = app.service().await;
    assert_eq!(reloaded.canonical(), service.canonical());
}

#[tokio::test]
async fn test_left_drag_outdents_to_grandparent() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    service.on_drag_start(FolderId(3));
    service.on_drag_move(-INDENT * 2.0);
    let projection = service.projection().expect("projection");
    assert_eq!((projection.min_depth, projection.max_depth), (1, 2));
    assert_eq!(projection.depth, 1);

    let outcome = service.on_drag_end().await.expect("drop");
    assert!(matches!(
        outcome,
        DropOutcome::Moved {
            parent: Some(FolderId(1)),
            previous_parent: Some(FolderId(2)),
            ..
        }
    ));
    assert_eq!(service.get(FolderId(3)).map(|item| item.depth), Some(1));
    assert_eq!(app.stored_parent(3).await, Some(FolderId(1)));
}

#[tokio::test]
async fn test_drag_to_end_becomes_root() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    service.on_drag_start(FolderId(4));
    service.on_drag_over(Some(FolderId(7)));
    service.on_drag_move(-INDENT);

    let outcome = service.on_drag_end().await.expect("drop");
    assert!(matches!(outcome, DropOutcome::Moved { parent: None, .. }));
    assert_eq!(ids(service.canonical()), vec![1, 2, 3, 5, 6, 7, 4]);

    let stored: Vec<i64> = app.stored().await.iter().map(|r| r.id.get()).collect();
    assert_eq!(stored, vec![1, 2, 3, 5, 6, 7, 4]);
    assert_eq!(app.stored_parent(4).await, None);
}

#[tokio::test]
async fn test_drop_into_locked_folder_is_rejected() {
    let app = TestApp::new(&photo_library()).await;
    let before = app.stored().await;
    let mut service = app.service().await;

    // Last row, one level in: lands under the locked "Clients".
    service.on_drag_start(FolderId(7));
    service.on_drag_move(INDENT);
    assert_eq!(service.rejection(), Some(RejectReason::LockedTarget(FolderId(5))));

    let outcome = service.on_drag_end().await.expect("drop");
    assert_eq!(
        outcome,
        DropOutcome::Rejected {
            id: FolderId(7),
            reason: RejectReason::LockedTarget(FolderId(5)),
        }
    );
    assert_eq!(app.stored().await, before);
}

#[tokio::test]
async fn test_locked_folder_cannot_be_moved() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    service.on_drag_start(FolderId(5));
    service.on_drag_over(Some(FolderId(1)));
    assert_eq!(service.rejection(), Some(RejectReason::LockedSource(FolderId(5))));
    assert!(matches!(
        service.on_drag_end().await.expect("drop"),
        DropOutcome::Rejected { .. }
    ));
}

#[tokio::test]
async fn test_pointer_gesture_end_to_end() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    assert!(service.pointer_down(FolderId(7), PointerPosition::new(0.0, 160.0)));
    assert_eq!(
        service.pointer_move(PointerPosition::new(5.0, 160.0)),
        PointerMove::StillPending
    );
    assert!(!service.session().is_dragging());

    assert_eq!(
        service.pointer_move(PointerPosition::new(24.0, 160.0)),
        PointerMove::Activated(FolderId(7))
    );
    service.on_drag_over(Some(FolderId(4)));

    let release = service.pointer_up().await.expect("release");
    assert!(matches!(
        release,
        ReleaseOutcome::Drop {
            outcome: DropOutcome::Moved {
                parent: Some(FolderId(1)),
                ..
            }
        }
    ));
    assert_eq!(app.stored_parent(7).await, Some(FolderId(1)));
}

#[tokio::test]
async fn test_failed_write_reverts_local_move() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;
    let before = service.canonical().to_vec();

    tokio::fs::remove_file(app.store.path()).await.expect("remove");

    service.on_drag_start(FolderId(7));
    service.on_drag_over(Some(FolderId(4)));
    service.on_drag_move(INDENT);
    let err = service.on_drag_end().await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Persistence);
    assert_eq!(service.canonical(), before.as_slice());
}

#[tokio::test]
async fn test_collapsed_folder_hides_its_subtree() {
    let app = TestApp::new(&photo_library()).await;
    let mut service = app.service().await;

    assert_eq!(ids(&service.visible_order()), vec![1, 2, 3, 4, 5, 6, 7]);
    service.set_open(FolderId(1), false).expect("collapse");
    assert_eq!(ids(&service.visible_order()), vec![1, 5, 6, 7]);

    // Collapse state is view state only.
    assert_eq!(app.stored().await, photo_library());
}
