//! Controller tests driving `handle_message` and `handle_key` directly
//! with synthesised results; no commands are executed.

use crossterm::event::KeyCode;
use rstest::{fixture, rstest};

use crate::git::{CheckoutError, CheckoutStep};
use crate::platform::{
    Host, MergeRequest, MergeRequestDetail, PlatformError, RepositoryInfo, RequestStatus,
};
use crate::process::ProcessError;
use crate::tui::components::CheckoutState;
use crate::tui::input::key;
use crate::tui::messages::AppMsg;

use super::{ActiveModal, Dashboard, PendingCheckout, Tab};

fn request(number: u64, title: &str, branch: &str) -> MergeRequest {
    MergeRequest {
        number,
        title: title.to_owned(),
        branch: branch.to_owned(),
        status: RequestStatus::Open,
        url: format!("https://example.com/{number}"),
    }
}

fn repository(default_branch: &str) -> RepositoryInfo {
    RepositoryInfo {
        name: "widget".to_owned(),
        description: "Widgets".to_owned(),
        default_branch: default_branch.to_owned(),
    }
}

fn process_failure() -> ProcessError {
    ProcessError::Failed {
        command: "git status --porcelain".to_owned(),
        message: "boom".to_owned(),
    }
}

#[fixture]
fn dashboard() -> Dashboard {
    Dashboard::new(Some(Host::GitHub))
}

/// Dashboard with a loaded request list and repository, no modal.
#[fixture]
fn loaded() -> Dashboard {
    let mut d = Dashboard::new(Some(Host::GitHub));
    d.handle_message(AppMsg::RepositoryLoaded(Ok(repository("main"))));
    d.handle_message(AppMsg::BranchLoaded(Ok("feat/other".to_owned())));
    d.handle_message(AppMsg::RequestsLoaded(Ok(vec![
        request(1, "Fix login crash", "fix/login"),
        request(2, "Add search endpoint", "feat/search"),
    ])));
    d
}

fn checkout_state(d: &Dashboard) -> Option<&CheckoutState> {
    match &d.modal {
        Some(ActiveModal::Checkout(modal)) => Some(modal.state()),
        _ => None,
    }
}

mod loads {
    use super::*;

    #[rstest]
    fn starts_loading_with_the_self_filter(dashboard: Dashboard) {
        assert_eq!(dashboard.author, "@me");
        assert!(dashboard.loading);
        assert!(dashboard.modal.is_none());
    }

    #[rstest]
    fn completed_list_load_replaces_the_snapshot(mut dashboard: Dashboard) {
        dashboard.handle_message(AppMsg::RequestsLoaded(Ok(vec![request(
            7,
            "Seven",
            "feat/seven",
        )])));
        assert!(!dashboard.loading);
        assert!(dashboard.error.is_none());
        assert_eq!(
            dashboard.request_list.selected().map(|r| r.number),
            Some(7)
        );
    }

    #[rstest]
    fn applying_the_same_load_twice_equals_applying_it_once(mut dashboard: Dashboard) {
        let msg = AppMsg::RequestsLoaded(Ok(vec![request(1, "One", "b/one")]));
        dashboard.handle_message(msg.clone());
        dashboard.handle_message(msg);
        assert_eq!(dashboard.request_list.visible_len(), 1);
        assert!(!dashboard.loading);
    }

    #[rstest]
    fn failed_list_load_records_the_error_in_place(mut dashboard: Dashboard) {
        dashboard.handle_message(AppMsg::RequestsLoaded(Err(PlatformError::Decode {
            message: "bad payload".to_owned(),
        })));
        assert!(!dashboard.loading);
        assert!(
            dashboard
                .error
                .as_deref()
                .is_some_and(|e| e.contains("bad payload"))
        );
    }

    #[rstest]
    fn failed_branch_load_is_tolerated(mut dashboard: Dashboard) {
        dashboard.handle_message(AppMsg::BranchLoaded(Err(process_failure())));
        assert!(dashboard.current_branch.is_none());
    }

    #[rstest]
    fn refresh_is_ignored_while_a_load_is_in_flight(mut loaded: Dashboard) {
        assert!(loaded.handle_key(&key(KeyCode::Char('r'))).is_some());
        assert!(loaded.loading);
        // A second refresh while loading must not dispatch another load.
        assert!(loaded.handle_key(&key(KeyCode::Char('r'))).is_none());
    }

    #[rstest]
    fn spinner_tick_always_rearms_the_timer(mut dashboard: Dashboard) {
        assert!(dashboard.handle_message(AppMsg::SpinnerTick).is_some());
    }
}

mod detail {
    use super::*;

    fn detail_payload(number: u64) -> MergeRequestDetail {
        MergeRequestDetail {
            number,
            title: "Fix login crash".to_owned(),
            body: "Fixes the crash.".to_owned(),
            files: Vec::new(),
            additions: 1,
            deletions: 0,
        }
    }

    #[rstest]
    fn enter_opens_the_detail_modal_and_dispatches_the_load(mut loaded: Dashboard) {
        let cmd = loaded.handle_key(&key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert!(matches!(
            &loaded.modal,
            Some(ActiveModal::Detail(modal)) if modal.number() == 1
        ));
    }

    #[rstest]
    fn matching_result_fills_the_open_modal(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        loaded.handle_message(AppMsg::DetailLoaded {
            number: 1,
            result: Ok(detail_payload(1)),
        });
        match &loaded.modal {
            Some(ActiveModal::Detail(modal)) => assert!(!modal.is_loading()),
            other => panic!("expected detail modal, got {other:?}"),
        }
    }

    #[rstest]
    fn result_for_another_request_is_dropped(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        loaded.handle_message(AppMsg::DetailLoaded {
            number: 99,
            result: Ok(detail_payload(99)),
        });
        match &loaded.modal {
            Some(ActiveModal::Detail(modal)) => assert!(modal.is_loading()),
            other => panic!("expected detail modal, got {other:?}"),
        }
    }

    #[rstest]
    fn result_after_dismissal_is_a_no_op(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        loaded.handle_key(&key(KeyCode::Esc));
        assert!(loaded.modal.is_none());
        loaded.handle_message(AppMsg::DetailLoaded {
            number: 1,
            result: Ok(detail_payload(1)),
        });
        assert!(loaded.modal.is_none());
    }

    #[rstest]
    fn commits_result_is_gated_on_the_request_number(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        let cmd = loaded.handle_key(&key(KeyCode::Char('c')));
        assert!(cmd.is_some());
        loaded.handle_message(AppMsg::CommitsLoaded {
            number: 99,
            result: Ok(Vec::new()),
        });
        match &loaded.modal {
            Some(ActiveModal::Detail(modal)) => assert!(modal.is_loading()),
            other => panic!("expected detail modal, got {other:?}"),
        }
    }
}

mod author_filter {
    use super::*;
    use crate::platform::Author;

    #[rstest]
    fn selecting_an_author_clears_the_list_and_reloads(mut loaded: Dashboard) {
        loaded.handle_message(AppMsg::AuthorsLoaded(Ok(vec![Author {
            username: "alice".to_owned(),
            name: "Alice Example".to_owned(),
        }])));
        loaded.handle_key(&key(KeyCode::Char('a')));
        assert!(matches!(loaded.modal, Some(ActiveModal::AuthorPicker(_))));

        // Cursor row 1 is alice (row 0 is the @me sentinel).
        loaded.handle_key(&key(KeyCode::Char('j')));
        let cmd = loaded.handle_key(&key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(loaded.author, "alice");
        assert!(loaded.loading);
        assert_eq!(loaded.request_list.visible_len(), 0);
        assert!(loaded.modal.is_none());
    }

    #[rstest]
    fn dismissing_the_picker_keeps_the_current_filter(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Char('a')));
        let cmd = loaded.handle_key(&key(KeyCode::Esc));
        assert!(cmd.is_none());
        assert_eq!(loaded.author, "@me");
        assert!(loaded.modal.is_none());
        assert!(!loaded.loading);
    }

    #[rstest]
    fn failed_author_load_leaves_the_sentinel_available(mut loaded: Dashboard) {
        loaded.handle_message(AppMsg::AuthorsLoaded(Err(PlatformError::Decode {
            message: "bad payload".to_owned(),
        })));
        loaded.handle_key(&key(KeyCode::Char('a')));
        match &loaded.modal {
            Some(ActiveModal::AuthorPicker(picker)) => {
                assert_eq!(picker.selected_username(), "@me");
            }
            other => panic!("expected author picker, got {other:?}"),
        }
    }
}

mod checkout {
    use super::*;

    /// Repository whose default branch differs from the current one, with
    /// the checkout intent already issued via `m`.
    #[fixture]
    fn intent() -> Dashboard {
        let mut d = Dashboard::new(Some(Host::GitHub));
        d.handle_message(AppMsg::RepositoryLoaded(Ok(repository("release/2.0"))));
        d.handle_message(AppMsg::BranchLoaded(Ok("main".to_owned())));
        d.handle_message(AppMsg::RequestsLoaded(Ok(Vec::new())));
        let cmd = d.handle_key(&key(KeyCode::Char('m')));
        assert!(cmd.is_some(), "intent should dispatch the dirty check");
        d
    }

    #[rstest]
    fn intent_records_the_pending_target(intent: Dashboard) {
        assert_eq!(
            intent.pending_checkout,
            Some(PendingCheckout {
                branch: "release/2.0".to_owned(),
                request: None,
            })
        );
    }

    #[rstest]
    fn clean_tree_starts_the_checkout_immediately(mut intent: Dashboard) {
        let cmd = intent.handle_message(AppMsg::DirtyChecked(Ok(false)));
        assert!(cmd.is_some());
        assert!(intent.pending_checkout.is_none());
        assert_eq!(checkout_state(&intent), Some(&CheckoutState::Running));
    }

    #[rstest]
    fn failed_dirty_check_proceeds_as_if_clean(mut intent: Dashboard) {
        let cmd = intent.handle_message(AppMsg::DirtyChecked(Err(process_failure())));
        assert!(cmd.is_some());
        assert_eq!(checkout_state(&intent), Some(&CheckoutState::Running));
    }

    #[rstest]
    fn dirty_tree_raises_the_confirmation_prompt(mut intent: Dashboard) {
        let cmd = intent.handle_message(AppMsg::DirtyChecked(Ok(true)));
        assert!(cmd.is_none());
        match &intent.modal {
            Some(ActiveModal::DirtyConfirm(confirm)) => {
                assert_eq!(confirm.branch(), "release/2.0");
            }
            other => panic!("expected confirmation prompt, got {other:?}"),
        }
        assert!(intent.pending_checkout.is_some());
    }

    #[rstest]
    fn confirming_checks_out_the_stored_target(mut intent: Dashboard) {
        intent.handle_message(AppMsg::DirtyChecked(Ok(true)));
        let cmd = intent.handle_key(&key(KeyCode::Char('y')));
        assert!(cmd.is_some());
        assert!(intent.pending_checkout.is_none());
        match &intent.modal {
            Some(ActiveModal::Checkout(modal)) => assert_eq!(modal.branch(), "release/2.0"),
            other => panic!("expected checkout modal, got {other:?}"),
        }
    }

    #[rstest]
    fn cancelling_discards_the_pending_checkout(mut intent: Dashboard) {
        intent.handle_message(AppMsg::DirtyChecked(Ok(true)));
        let cmd = intent.handle_key(&key(KeyCode::Char('n')));
        assert!(cmd.is_none());
        assert!(intent.pending_checkout.is_none());
        assert!(intent.modal.is_none());
    }

    #[rstest]
    fn success_reaches_a_terminal_state_and_any_key_reloads_the_branch(mut intent: Dashboard) {
        intent.handle_message(AppMsg::DirtyChecked(Ok(false)));
        intent.handle_message(AppMsg::CheckoutFinished(Ok(())));
        assert_eq!(checkout_state(&intent), Some(&CheckoutState::Succeeded));

        let cmd = intent.handle_key(&key(KeyCode::Char('x')));
        assert!(cmd.is_some(), "acknowledgement should reload the branch");
        assert!(intent.modal.is_none());
    }

    #[rstest]
    fn failure_is_attributed_to_the_step(mut intent: Dashboard) {
        intent.handle_message(AppMsg::DirtyChecked(Ok(false)));
        intent.handle_message(AppMsg::CheckoutFinished(Err(CheckoutError {
            step: CheckoutStep::Pull,
            source: process_failure(),
        })));
        match checkout_state(&intent) {
            Some(CheckoutState::Failed(message)) => assert!(message.starts_with("pull:")),
            other => panic!("expected failed state, got {other:?}"),
        }
    }

    #[rstest]
    fn escape_mid_flight_dismisses_and_the_late_result_is_stale(mut intent: Dashboard) {
        intent.handle_message(AppMsg::DirtyChecked(Ok(false)));
        intent.handle_key(&key(KeyCode::Esc));
        assert!(intent.modal.is_none());

        intent.handle_message(AppMsg::CheckoutFinished(Ok(())));
        assert!(intent.modal.is_none());
    }

    #[rstest]
    fn dirty_result_without_a_pending_checkout_is_stale(mut loaded: Dashboard) {
        loaded.handle_message(AppMsg::DirtyChecked(Ok(true)));
        assert!(loaded.modal.is_none());
    }

    #[rstest]
    fn default_branch_checkout_is_a_no_op_when_already_there(mut dashboard: Dashboard) {
        dashboard.handle_message(AppMsg::RepositoryLoaded(Ok(repository("main"))));
        dashboard.handle_message(AppMsg::BranchLoaded(Ok("main".to_owned())));
        assert!(dashboard.handle_key(&key(KeyCode::Char('m'))).is_none());
        assert!(dashboard.pending_checkout.is_none());
    }

    #[rstest]
    fn default_branch_checkout_requires_repository_info(mut dashboard: Dashboard) {
        assert!(dashboard.handle_key(&key(KeyCode::Char('m'))).is_none());
        assert!(dashboard.pending_checkout.is_none());
    }

    #[rstest]
    fn a_new_intent_supersedes_the_old_one(mut intent: Dashboard) {
        intent.request_checkout("fix/login".to_owned(), None);
        assert_eq!(
            intent.pending_checkout,
            Some(PendingCheckout {
                branch: "fix/login".to_owned(),
                request: None,
            })
        );
    }

    #[rstest]
    fn checkout_from_the_detail_modal_targets_its_branch(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        let cmd = loaded.handle_key(&key(KeyCode::Char('m')));
        assert!(cmd.is_some());
        assert_eq!(
            loaded.pending_checkout,
            Some(PendingCheckout {
                branch: "fix/login".to_owned(),
                request: Some(request(1, "Fix login crash", "fix/login")),
            })
        );
        // The detail modal stays visible until the guard resolves.
        assert!(matches!(loaded.modal, Some(ActiveModal::Detail(_))));

        loaded.handle_message(AppMsg::DirtyChecked(Ok(false)));
        assert_eq!(checkout_state(&loaded), Some(&CheckoutState::Running));
        // The progress modal is labelled with the originating request.
        match &loaded.modal {
            Some(ActiveModal::Checkout(modal)) => {
                assert!(modal.view("*").contains("#1 Fix login crash"));
            }
            other => panic!("expected checkout modal, got {other:?}"),
        }
    }

    #[rstest]
    fn enter_in_the_detail_modal_raises_the_checkout_intent(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        let cmd = loaded.handle_key(&key(KeyCode::Enter));
        assert!(cmd.is_some());
        assert_eq!(
            loaded.pending_checkout.as_ref().map(|p| p.branch.as_str()),
            Some("fix/login")
        );
    }

    #[rstest]
    fn dismissing_the_detail_modal_drops_its_checkout_intent(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Enter));
        loaded.handle_key(&key(KeyCode::Char('m')));
        assert!(loaded.pending_checkout.is_some());

        loaded.handle_key(&key(KeyCode::Esc));
        assert!(loaded.pending_checkout.is_none());

        // The dirty check still in flight must not launch the checkout.
        loaded.handle_message(AppMsg::DirtyChecked(Ok(false)));
        assert!(loaded.modal.is_none());
    }
}

mod base_view {
    use super::*;

    #[rstest]
    fn tab_cycles_between_the_base_views(mut loaded: Dashboard) {
        assert_eq!(loaded.active_tab, Tab::Requests);
        loaded.handle_key(&key(KeyCode::Tab));
        assert_eq!(loaded.active_tab, Tab::Repository);
        loaded.handle_key(&key(KeyCode::Tab));
        assert_eq!(loaded.active_tab, Tab::Requests);
    }

    #[rstest]
    fn q_quits_only_outside_of_search(mut loaded: Dashboard) {
        loaded.handle_key(&key(KeyCode::Char('/')));
        assert!(loaded.handle_key(&key(KeyCode::Char('q'))).is_none());
        assert_eq!(loaded.request_list.query(), "q");

        loaded.handle_key(&key(KeyCode::Esc));
        assert!(loaded.handle_key(&key(KeyCode::Char('q'))).is_some());
    }

    #[rstest]
    fn browser_key_needs_a_selection(mut dashboard: Dashboard) {
        dashboard.handle_message(AppMsg::RequestsLoaded(Ok(Vec::new())));
        assert!(dashboard.handle_key(&key(KeyCode::Char('w'))).is_none());
    }

    #[rstest]
    fn view_renders_without_panicking_in_every_state(mut intent_like: Dashboard) {
        use bubbletea_rs::Model as _;
        assert!(!intent_like.view().is_empty());
        intent_like.handle_message(AppMsg::RepositoryLoaded(Ok(repository("main"))));
        intent_like.handle_message(AppMsg::RequestsLoaded(Ok(vec![request(
            1,
            "Fix login crash",
            "fix/login",
        )])));
        assert!(intent_like.view().contains("widget"));
        intent_like.handle_key(&key(KeyCode::Enter));
        assert!(!intent_like.view().is_empty());
    }

    #[fixture]
    fn intent_like() -> Dashboard {
        Dashboard::new(Some(Host::GitLab))
    }
}
