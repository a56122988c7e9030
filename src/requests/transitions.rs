// Transition engine: pure lookup of the next request status

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{RequestAction, RequestStatus};
use crate::roles::Role;

/// One row of the transition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRule {
    pub from: RequestStatus,
    pub role: Role,
    pub action: RequestAction,
    pub to: RequestStatus,
}

const fn rule(
    from: RequestStatus,
    role: Role,
    action: RequestAction,
    to: RequestStatus,
) -> TransitionRule {
    TransitionRule {
        from,
        role,
        action,
        to,
    }
}

/// Every valid transition. Anything not listed here is rejected.
pub const TRANSITIONS: [TransitionRule; 6] = [
    rule(
        RequestStatus::Draft,
        Role::Dv,
        RequestAction::Submit,
        RequestStatus::PendingSvApproval,
    ),
    rule(
        RequestStatus::PendingSvApproval,
        Role::Sv,
        RequestAction::Approve,
        RequestStatus::PendingPmApproval,
    ),
    rule(
        RequestStatus::PendingSvApproval,
        Role::Sv,
        RequestAction::Reject,
        RequestStatus::Rejected,
    ),
    rule(
        RequestStatus::PendingPmApproval,
        Role::Pm,
        RequestAction::Approve,
        RequestStatus::Approved,
    ),
    rule(
        RequestStatus::PendingPmApproval,
        Role::Pm,
        RequestAction::Reject,
        RequestStatus::Rejected,
    ),
    rule(
        RequestStatus::Approved,
        Role::Tr,
        RequestAction::Complete,
        RequestStatus::Completed,
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Invalid transition: cannot {action} a request that is {status} (role {role})")]
    InvalidTransition {
        role: Role,
        status: RequestStatus,
        action: RequestAction,
    },
    #[error("Unauthorized role: {role} may not {action} a request that is {status}")]
    UnauthorizedRole {
        role: Role,
        status: RequestStatus,
        action: RequestAction,
        /// Role bound to the status, if any
        expected: Option<Role>,
    },
}

/// Compute the status a request moves to when `role` performs `action` on it.
///
/// Checks run in a fixed order: read-only roles are refused outright, terminal
/// statuses admit nothing, the acting role must be the one bound to the current
/// status, and finally the action must have a table entry.
pub fn next_status(
    role: Role,
    status: RequestStatus,
    action: RequestAction,
) -> Result<RequestStatus, TransitionError> {
    let unauthorized = || TransitionError::UnauthorizedRole {
        role,
        status,
        action,
        expected: status.bound_role(),
    };
    let invalid = || TransitionError::InvalidTransition {
        role,
        status,
        action,
    };

    if role.is_read_only() {
        return Err(unauthorized());
    }
    if status.is_terminal() {
        return Err(invalid());
    }
    if status.bound_role() != Some(role) {
        return Err(unauthorized());
    }

    TRANSITIONS
        .iter()
        .find(|rule| rule.from == status && rule.role == role && rule.action == action)
        .map(|rule| rule.to)
        .ok_or_else(invalid)
}

/// Actions `role` can perform right now on a request in `status`
pub fn available_actions(role: Role, status: RequestStatus) -> Vec<RequestAction> {
    TRANSITIONS
        .iter()
        .filter(|rule| rule.from == status && rule.role == role)
        .map(|rule| rule.action)
        .collect()
}

/// Statuses directly reachable from `status`
pub fn successors(status: RequestStatus) -> Vec<RequestStatus> {
    let mut next: Vec<RequestStatus> = Vec::new();
    for rule in TRANSITIONS.iter().filter(|rule| rule.from == status) {
        if !next.contains(&rule.to) {
            next.push(rule.to);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_reaches_completed() {
        let path = [
            (Role::Dv, RequestAction::Submit, RequestStatus::PendingSvApproval),
            (Role::Sv, RequestAction::Approve, RequestStatus::PendingPmApproval),
            (Role::Pm, RequestAction::Approve, RequestStatus::Approved),
            (Role::Tr, RequestAction::Complete, RequestStatus::Completed),
        ];

        let mut status = RequestStatus::Draft;
        for (role, action, expected) in path {
            status = next_status(role, status, action).unwrap();
            assert_eq!(status, expected);
        }
        assert!(status.is_terminal());
    }

    #[test]
    fn test_supervisor_reject_is_terminal() {
        let status =
            next_status(Role::Sv, RequestStatus::PendingSvApproval, RequestAction::Reject).unwrap();
        assert_eq!(status, RequestStatus::Rejected);

        let err = next_status(Role::Pm, status, RequestAction::Approve).unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn test_wrong_role_for_status_is_unauthorized() {
        let err = next_status(Role::Pm, RequestStatus::Draft, RequestAction::Approve).unwrap_err();
        assert_eq!(
            err,
            TransitionError::UnauthorizedRole {
                role: Role::Pm,
                status: RequestStatus::Draft,
                action: RequestAction::Approve,
                expected: Some(Role::Dv),
            }
        );
    }

    #[test]
    fn test_resubmit_by_requester_is_unauthorized() {
        let status = next_status(Role::Dv, RequestStatus::Draft, RequestAction::Submit).unwrap();
        assert_eq!(status, RequestStatus::PendingSvApproval);

        let err = next_status(Role::Dv, status, RequestAction::Submit).unwrap_err();
        assert!(matches!(err, TransitionError::UnauthorizedRole { .. }));
    }

    #[test]
    fn test_bound_role_but_unknown_action_is_invalid() {
        let err =
            next_status(Role::Sv, RequestStatus::PendingSvApproval, RequestAction::Complete)
                .unwrap_err();
        assert!(matches!(err, TransitionError::InvalidTransition { .. }));
    }

    #[test]
    fn test_read_only_roles_never_mutate() {
        for role in [Role::Cc, Role::Mb] {
            for status in RequestStatus::ALL {
                for action in RequestAction::ALL {
                    let err = next_status(role, status, action).unwrap_err();
                    assert!(matches!(err, TransitionError::UnauthorizedRole { .. }));
                }
            }
        }
    }

    #[test]
    fn test_table_rows_match_bound_roles() {
        for rule in TRANSITIONS {
            assert_eq!(rule.from.bound_role(), Some(rule.role));
            assert!(rule.role.permitted_actions().contains(&rule.action));
        }
    }

    #[test]
    fn test_terminal_statuses_have_no_successors() {
        assert!(successors(RequestStatus::Rejected).is_empty());
        assert!(successors(RequestStatus::Completed).is_empty());
        assert_eq!(
            successors(RequestStatus::PendingPmApproval),
            vec![RequestStatus::Approved, RequestStatus::Rejected]
        );
    }

    #[test]
    fn test_available_actions() {
        assert_eq!(
            available_actions(Role::Sv, RequestStatus::PendingSvApproval),
            vec![RequestAction::Approve, RequestAction::Reject]
        );
        assert!(available_actions(Role::Sv, RequestStatus::Draft).is_empty());
        assert!(available_actions(Role::Mb, RequestStatus::Approved).is_empty());
    }
}
