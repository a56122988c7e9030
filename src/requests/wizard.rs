// Role-specific multi-step request wizard
//
// Each role walks its own list of steps (see `Role::wizard_steps`). The final
// decision is delegated to the transition engine; the wizard only enforces step
// order and per-step validation.

use serde::Serialize;
use statig::prelude::*;
use thiserror::Error;

use super::transitions::{next_status, TransitionError};
use super::types::{RequestAction, RequestStatus, TrainingDetails, TrainingRequest};
use super::validation::{validate_details, validate_fields, ValidationError};
use crate::roles::{Role, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    Next,
    Previous,
    Decide(RequestAction),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error("{action} is only available on the last step (currently on step {step} of {total})")]
    NotAtFinalStep {
        action: RequestAction,
        step: usize,
        total: usize,
    },
}

/// Result of a finished wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WizardOutcome {
    pub action: RequestAction,
    pub next_status: RequestStatus,
}

pub struct RequestWizard {
    role: Role,
    status: RequestStatus,
    details: TrainingDetails,
    step: usize,
    outcome: Option<WizardOutcome>,
    last_error: Option<WizardError>,
}

impl RequestWizard {
    pub fn new(role: Role, status: RequestStatus, details: TrainingDetails) -> Self {
        Self {
            role,
            status,
            details,
            step: 0,
            outcome: None,
            last_error: None,
        }
    }

    pub fn for_request(role: Role, request: &TrainingRequest) -> Self {
        Self::new(role, request.status, request.details.clone())
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn steps(&self) -> &'static [WizardStep] {
        self.role.wizard_steps()
    }

    pub fn current_step(&self) -> WizardStep {
        self.steps()[self.step]
    }

    /// One-based step number, as shown to the user
    pub fn step_number(&self) -> usize {
        self.step + 1
    }

    pub fn total_steps(&self) -> usize {
        self.steps().len()
    }

    pub fn is_final_step(&self) -> bool {
        self.step + 1 == self.total_steps()
    }

    pub fn details(&self) -> &TrainingDetails {
        &self.details
    }

    pub fn details_mut(&mut self) -> &mut TrainingDetails {
        &mut self.details
    }

    pub fn outcome(&self) -> Option<WizardOutcome> {
        self.outcome
    }

    pub fn last_error(&self) -> Option<&WizardError> {
        self.last_error.as_ref()
    }

    /// Drive the wizard through all of its steps and finish with `action`
    pub fn walk_to_decision(self, action: RequestAction) -> Result<WizardOutcome, WizardError> {
        let total = self.total_steps();
        let mut wizard = self.state_machine();

        for _ in 1..total {
            wizard.handle(&WizardEvent::Next);
            if let Some(err) = wizard.last_error() {
                return Err(err.clone());
            }
        }
        wizard.handle(&WizardEvent::Decide(action));

        match (wizard.outcome(), wizard.last_error()) {
            (Some(outcome), _) => Ok(outcome),
            (None, Some(err)) => Err(err.clone()),
            (None, None) => Err(WizardError::NotAtFinalStep {
                action,
                step: wizard.step_number(),
                total,
            }),
        }
    }

    fn accepts_decision(&self, action: RequestAction) -> bool {
        // Approvers may reject straight from the review step
        self.is_final_step()
            || (action == RequestAction::Reject && matches!(self.role, Role::Sv | Role::Pm))
    }

    fn decide(&self, action: RequestAction) -> Result<WizardOutcome, WizardError> {
        if !self.accepts_decision(action) {
            return Err(WizardError::NotAtFinalStep {
                action,
                step: self.step_number(),
                total: self.total_steps(),
            });
        }
        let next = next_status(self.role, self.status, action)?;
        if action == RequestAction::Submit {
            validate_details(&self.details)?;
        }
        Ok(WizardOutcome {
            action,
            next_status: next,
        })
    }
}

#[state_machine(initial = "State::editing()")]
impl RequestWizard {
    #[state]
    fn editing(&mut self, event: &WizardEvent) -> Outcome<State> {
        match event {
            WizardEvent::Next => {
                if self.is_final_step() {
                    return Handled;
                }
                match validate_fields(&self.details, self.current_step().fields()) {
                    Ok(()) => {
                        self.step += 1;
                        self.last_error = None;
                        tracing::debug!(
                            role = %self.role,
                            step = self.step_number(),
                            "Wizard advanced"
                        );
                    }
                    Err(e) => {
                        tracing::debug!(role = %self.role, error = %e, "Wizard step invalid");
                        self.last_error = Some(e.into());
                    }
                }
                Handled
            }
            WizardEvent::Previous => {
                self.step = self.step.saturating_sub(1);
                self.last_error = None;
                Handled
            }
            WizardEvent::Decide(action) => match self.decide(*action) {
                Ok(outcome) => {
                    tracing::info!(
                        role = %self.role,
                        action = %outcome.action,
                        next_status = %outcome.next_status,
                        "Wizard decided"
                    );
                    self.outcome = Some(outcome);
                    self.last_error = None;
                    Transition(State::decided())
                }
                Err(e) => {
                    tracing::warn!(role = %self.role, action = %action, error = %e, "Wizard decision refused");
                    self.last_error = Some(e);
                    Handled
                }
            },
        }
    }

    #[state]
    fn decided(&mut self, event: &WizardEvent) -> Outcome<State> {
        tracing::debug!(role = %self.role, event = ?event, "Wizard already decided, ignoring event");
        Handled
    }
}
