// Tests for the workflow service against the in-memory store

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use std::sync::Arc;

    use super::super::errors::*;
    use super::super::mocks::*;
    use super::super::service::*;
    use super::super::traits::MockRequestStore;
    use super::super::transitions::TransitionError;
    use super::super::types::*;
    use super::super::validation::Field;
    use crate::roles::Role;
    use crate::store::seed::demo_users;
    use crate::store::{InMemoryStore, StoreData};

    type Service = WorkflowService<InMemoryStore, RecordingNotifier>;

    fn service_with(notifier: Arc<RecordingNotifier>) -> Service {
        let store = Arc::new(InMemoryStore::with_users(team()));
        WorkflowService::new(store.clone(), store, notifier)
    }

    fn service() -> (Service, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (service_with(notifier.clone()), notifier)
    }

    async fn created(service: &Service, ctx: &SessionContext, details: TrainingDetails) -> TrainingRequest {
        let draft = RequestDraft {
            title: "Leadership Workshop".to_string(),
            details,
            ..Default::default()
        };
        match service.create_request(ctx, draft).await.unwrap() {
            CreateOutcome::Created(request) => request,
            other => panic!("expected created request, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_full_approval_path() {
        let (service, notifier) = service();
        let dv = session("u-dv", Role::Dv);
        let sv = session("u-sv", Role::Sv);
        let pm = session("u-pm", Role::Pm);
        let tr = session("u-tr", Role::Tr);

        let request = created(&service, &dv, complete_details()).await;
        assert_eq!(request.status, RequestStatus::Draft);
        assert_eq!(request.region, "Cairo");

        let r = service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::PendingSvApproval);

        let recommend = Decision {
            trainer_id: Some("u-tr".to_string()),
            ..Default::default()
        };
        let r = service
            .apply(&sv, &request.id, RequestAction::Approve, recommend)
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::PendingPmApproval);
        assert_eq!(r.supervisor_id.as_deref(), Some("u-sv"));
        assert_eq!(r.trainer_id.as_deref(), Some("u-tr"));

        let r = service
            .apply(&pm, &request.id, RequestAction::Approve, Decision::default())
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::Approved);
        assert_eq!(r.program_manager_id.as_deref(), Some("u-pm"));

        let docs = Decision {
            documentation: vec!["attendance.pdf".to_string()],
            ..Default::default()
        };
        let r = service
            .apply(&tr, &request.id, RequestAction::Complete, docs)
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::Completed);
        assert_eq!(r.documentation, vec!["attendance.pdf".to_string()]);
        assert_eq!(r.updated_by.as_deref(), Some("u-tr"));

        let statuses: Vec<(RequestStatus, RequestStatus)> =
            notifier.events().iter().map(|e| (e.from, e.to)).collect();
        assert_eq!(
            statuses,
            vec![
                (RequestStatus::Draft, RequestStatus::PendingSvApproval),
                (RequestStatus::PendingSvApproval, RequestStatus::PendingPmApproval),
                (RequestStatus::PendingPmApproval, RequestStatus::Approved),
                (RequestStatus::Approved, RequestStatus::Completed),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejection_is_terminal() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let sv = session("u-sv", Role::Sv);
        let pm = session("u-pm", Role::Pm);

        let request = created(&service, &dv, complete_details()).await;
        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();

        let note = Decision {
            note: Some("Budget exhausted".to_string()),
            ..Default::default()
        };
        let r = service
            .apply(&sv, &request.id, RequestAction::Reject, note)
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::Rejected);
        assert_eq!(r.decision_note.as_deref(), Some("Budget exhausted"));

        let err = service
            .apply(&pm, &request.id, RequestAction::Approve, Decision::default())
            .await
            .unwrap_err();
        assert!(err.is_invalid_transition());
    }

    #[tokio::test]
    async fn test_submit_requires_complete_payload() {
        let (service, notifier) = service();
        let dv = session("u-dv", Role::Dv);
        let partial = TrainingDetails {
            location: "Cairo HQ".to_string(),
            ..Default::default()
        };
        let request = created(&service, &dv, partial).await;

        let err = service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_other_supervisor_cannot_act() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let draft = RequestDraft {
            title: "Technical Training".to_string(),
            details: complete_details(),
            supervisor_id: Some("u-sv-assigned".to_string()),
            program_manager_id: None,
        };
        let CreateOutcome::Created(request) = service.create_request(&dv, draft).await.unwrap() else {
            panic!("request should be created online");
        };
        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();

        let intruder = session("u-sv-other", Role::Sv);
        let err = service
            .apply(&intruder, &request.id, RequestAction::Approve, Decision::default())
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());

        // Outside of their scope the request is simply not there
        let err = service.fetch_visible(&intruder, &request.id).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_only_requesters_create() {
        let (service, _) = service();
        for role in [Role::Sv, Role::Pm, Role::Tr, Role::Cc, Role::Mb] {
            let err = service
                .create_request(&session("someone", role), RequestDraft::default())
                .await
                .unwrap_err();
            assert!(err.is_unauthorized(), "{role} should not create");
        }
    }

    #[tokio::test]
    async fn test_read_only_roles_see_everything_but_change_nothing() {
        let (service, _) = service();
        let dv_a = session("u-dv-a", Role::Dv);
        let dv_b = session("u-dv-b", Role::Dv);
        let a = created(&service, &dv_a, complete_details()).await;
        created(&service, &dv_b, complete_details()).await;

        let board = session("u-mb", Role::Mb);
        assert_eq!(service.list_visible(&board).await.unwrap().len(), 2);
        assert_eq!(service.list_visible(&dv_a).await.unwrap().len(), 1);

        let err = service
            .apply(&board, &a.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Transition(TransitionError::UnauthorizedRole { .. })
        ));
    }

    #[tokio::test]
    async fn test_unclaimed_requests_show_up_for_the_bound_role() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let sv = session("u-sv", Role::Sv);
        assert!(service.list_visible(&sv).await.unwrap().is_empty());

        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        let queue = service.list_visible(&sv).await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, request.id);
    }

    #[tokio::test]
    async fn test_edit_rules() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let mut details = complete_details();
        details.trainee_count = Some(35);
        let r = service.update_details(&dv, &request.id, details).await.unwrap();
        assert_eq!(r.details.trainee_count, Some(35));

        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        let err = service
            .update_details(&dv, &request.id, complete_details())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::EditNotAllowed {
                role: Role::Dv,
                status: RequestStatus::PendingSvApproval
            }
        ));
    }

    #[tokio::test]
    async fn test_offline_creation_is_queued_and_synced() {
        let (service, _) = service();
        let online = session("u-dv", Role::Dv);
        let offline = online.clone().offline();

        let outcome = service
            .create_request(&offline, RequestDraft::default())
            .await
            .unwrap();
        assert_eq!(outcome, CreateOutcome::Queued { pending: 1 });
        assert_eq!(service.pending_sync().await, 1);
        assert_eq!(service.sync_status().await, SyncStatus::Idle);

        // Still offline: nothing happens
        assert!(service.sync(&offline).await.unwrap().is_empty());

        let created = service.sync(&online).await.unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].requested_by, "u-dv");
        assert_eq!(service.pending_sync().await, 0);
        assert_eq!(service.sync_status().await, SyncStatus::Synced);
    }

    #[tokio::test]
    async fn test_offline_transitions_are_refused() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let err = service
            .apply(&dv.clone().offline(), &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Offline { .. }));
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_undo_transition() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let service = service_with(notifier.clone());
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let r = service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::PendingSvApproval);
        assert_eq!(notifier.events().len(), 1);
    }

    #[tokio::test]
    async fn test_notifications_can_be_disabled() {
        let notifier = Arc::new(RecordingNotifier::new());
        let service = service_with(notifier.clone()).with_notifications(false);
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        assert!(notifier.events().is_empty());
    }

    #[tokio::test]
    async fn test_complete_wizard_persists_decision() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let r = service
            .complete_wizard(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        assert_eq!(r.status, RequestStatus::PendingSvApproval);

        let wizard = service.wizard(&session("u-sv", Role::Sv), &request.id).await.unwrap();
        assert_eq!(wizard.total_steps(), 2);
    }

    #[tokio::test]
    async fn test_seeded_store_keeps_users_and_requests() {
        let store = Arc::new(InMemoryStore::with_users(demo_users()));
        let service =
            WorkflowService::new(store.clone(), store.clone(), Arc::new(RecordingNotifier::new()));
        let dv = session("u-dv-01", Role::Dv);
        created(&service, &dv, complete_details()).await;

        let data = store.snapshot().await;
        assert_eq!(data.users.len(), demo_users().len());
        assert_eq!(data.requests.len(), 1);
        assert_eq!(data.next_sequence, 2);
    }

    #[tokio::test]
    async fn test_missing_request_maps_to_not_found() {
        let mut store = MockRequestStore::new();
        store.expect_fetch_request().times(1).returning(|id| {
            Err(StoreError::NotFound { id: id.clone() })
        });
        store.expect_save_request().never();

        let service = WorkflowService::new(
            Arc::new(store),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let err = service
            .apply(
                &session("u-sv", Role::Sv),
                &RequestId::new("TRN-2026-999"),
                RequestAction::Approve,
                Decision::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { id } if id.as_str() == "TRN-2026-999"));
    }

    #[tokio::test]
    async fn test_terminal_requests_cannot_be_edited() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let sv = session("u-sv", Role::Sv);
        let request = created(&service, &dv, complete_details()).await;
        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();
        service
            .apply(&sv, &request.id, RequestAction::Reject, Decision::default())
            .await
            .unwrap();

        let err = service
            .update_details(&dv, &request.id, complete_details())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            WorkflowError::Transition(TransitionError::InvalidTransition {
                role: Role::Dv,
                status: RequestStatus::Rejected,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_unknown_trainer_recommendation_is_rejected() {
        let (service, notifier) = service();
        let dv = session("u-dv", Role::Dv);
        let sv = session("u-sv", Role::Sv);
        let request = created(&service, &dv, complete_details()).await;
        service
            .apply(&dv, &request.id, RequestAction::Submit, Decision::default())
            .await
            .unwrap();

        for bogus in ["u-ghost", "u-pm"] {
            let recommend = Decision {
                trainer_id: Some(bogus.to_string()),
                ..Default::default()
            };
            let err = service
                .apply(&sv, &request.id, RequestAction::Approve, recommend)
                .await
                .unwrap_err();
            match err {
                WorkflowError::Validation(e) => assert!(e.has_error_for(Field::TrainerId)),
                other => panic!("expected validation error for {bogus}, got {other:?}"),
            }
        }

        let stored = service.fetch_visible(&sv, &request.id).await.unwrap();
        assert_eq!(stored.status, RequestStatus::PendingSvApproval);
        assert_eq!(stored.trainer_id, None);
        assert_eq!(notifier.events().len(), 1);
    }

    #[tokio::test]
    async fn test_assignees_must_hold_the_named_role() {
        let (service, _) = service();
        let dv = session("u-dv", Role::Dv);
        let draft = RequestDraft {
            title: "Technical Training".to_string(),
            details: complete_details(),
            supervisor_id: Some("u-pm".to_string()),
            program_manager_id: None,
        };
        let err = service.create_request(&dv, draft).await.unwrap_err();
        let WorkflowError::Validation(e) = err else {
            panic!("expected a validation error");
        };
        assert!(e.has_error_for(Field::SupervisorId));
        assert_eq!(e.errors[0].message, "u-pm is a Program Manager, not a Supervisor");

        let draft = RequestDraft {
            title: "Technical Training".to_string(),
            details: complete_details(),
            supervisor_id: None,
            program_manager_id: Some("u-nobody".to_string()),
        };
        let err = service.create_request(&dv, draft).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(e) if e.has_error_for(Field::ProgramManagerId)));

        assert!(service.list_visible(&dv).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_service_recommends_and_searches_trainers() {
        let store = Arc::new(InMemoryStore::with_users(demo_users()));
        let service =
            WorkflowService::new(store.clone(), store.clone(), Arc::new(RecordingNotifier::new()));
        let dv = session("u-dv-01", Role::Dv);
        let request = created(&service, &dv, complete_details()).await;

        let ranked = service.recommended_trainers(&dv, &request.id).await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Ahmed Hassan"]);

        // Not visible to an unrelated requester
        let other = session("u-dv-02", Role::Dv);
        let err = service.recommended_trainers(&other, &request.id).await.unwrap_err();
        assert!(matches!(err, WorkflowError::NotFound { .. }));

        let found = service.find_trainers("ALEX").await.unwrap();
        let names: Vec<&str> = found.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Sara Mohamed", "Omar Khaled"]);
        assert_eq!(service.find_trainers("  ").await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_failed_sync_keeps_the_queue_in_order() {
        let mut store = MockRequestStore::new();
        let mut data = StoreData::default();
        let mut calls = 0;
        store.expect_create_request().times(3).returning(move |new| {
            calls += 1;
            if calls == 1 {
                return Err(StoreError::Corrupt {
                    reason: "backend unavailable".to_string(),
                });
            }
            Ok(data.insert(new, Utc::now()))
        });

        let service = WorkflowService::new(
            Arc::new(store),
            Arc::new(InMemoryStore::new()),
            Arc::new(RecordingNotifier::new()),
        );
        let online = session("u-dv", Role::Dv);
        let offline = online.clone().offline();
        for title in ["first", "second"] {
            let draft = RequestDraft {
                title: title.to_string(),
                ..Default::default()
            };
            service.create_request(&offline, draft).await.unwrap();
        }

        let err = service.sync(&online).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Store(StoreError::Corrupt { .. })));
        assert_eq!(service.pending_sync().await, 2);
        assert_eq!(service.sync_status().await, SyncStatus::Error);

        let created = service.sync(&online).await.unwrap();
        let titles: Vec<&str> = created.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert_eq!(service.pending_sync().await, 0);
        assert_eq!(service.sync_status().await, SyncStatus::Synced);
    }
}
