//! Tour session state machine.
//!
//! Defines a pure state transition function for an active product tour.
//! Side effects (persistence, target resolution, timers) are returned as
//! [`TourAction`]s and executed by the application layer.

use serde::{Deserialize, Serialize};

use crate::tour::{TourCatalog, TourId};

/// Tour session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TourState {
    /// No active tour.
    #[default]
    Idle,
    /// A step of `tour_id` is on screen.
    Active { tour_id: TourId, step_index: usize },
    /// The last step is still shown while the closing animation runs.
    /// Completion has already been persisted.
    Closing { tour_id: TourId, step_index: usize },
}

impl TourState {
    pub fn tour_id(&self) -> Option<TourId> {
        match self {
            TourState::Idle => None,
            TourState::Active { tour_id, .. } | TourState::Closing { tour_id, .. } => {
                Some(*tour_id)
            }
        }
    }

    pub fn step_index(&self) -> Option<usize> {
        match self {
            TourState::Idle => None,
            TourState::Active { step_index, .. } | TourState::Closing { step_index, .. } => {
                Some(*step_index)
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, TourState::Idle)
    }
}

/// Events that drive the tour session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "tour_id", rename_all = "snake_case")]
pub enum TourEvent {
    /// Start a tour from its first step, discarding any current session.
    Start(TourId),
    /// Advance; finishing the last step completes the tour immediately.
    Next,
    /// Advance; finishing the last step completes the tour but keeps it on
    /// screen until `CloseElapsed`.
    NextDeferred,
    Prev,
    /// Leave the tour; recorded as completed.
    Skip,
    /// Leave the tour without recording anything.
    End,
    /// The closing delay scheduled by `ScheduleClose` has run out.
    CloseElapsed,
}

/// Side-effects produced by state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TourAction {
    /// Tear down the previous step and resolve/place the given one.
    ActivateStep { tour_id: TourId, step_index: usize },
    /// Tear down the current step; nothing is shown afterwards.
    DeactivateStep,
    /// Persist `completed[tour_id] = true`.
    PersistTourCompleted { tour_id: TourId },
    /// Deliver `CloseElapsed` after the completion delay.
    ScheduleClose { tour_id: TourId },
}

/// Pure tour state machine.
pub struct TourStateMachine;

impl TourStateMachine {
    pub fn transition(
        state: TourState,
        event: TourEvent,
        catalog: &TourCatalog,
    ) -> (TourState, Vec<TourAction>) {
        match (state, event) {
            // ===== Start =====
            (state, TourEvent::Start(tour_id)) => {
                if catalog.step_count(tour_id) == 0 {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(%tour_id, "start requested for tour missing from catalog");
                    return (state, Vec::new());
                }
                (
                    TourState::Active {
                        tour_id,
                        step_index: 0,
                    },
                    vec![TourAction::ActivateStep {
                        tour_id,
                        step_index: 0,
                    }],
                )
            }

            // ===== Navigation =====
            (
                TourState::Active {
                    tour_id,
                    step_index,
                },
                event @ (TourEvent::Next | TourEvent::NextDeferred),
            ) => {
                let next_index = step_index + 1;
                if next_index < catalog.step_count(tour_id) {
                    return (
                        TourState::Active {
                            tour_id,
                            step_index: next_index,
                        },
                        vec![TourAction::ActivateStep {
                            tour_id,
                            step_index: next_index,
                        }],
                    );
                }
                if event == TourEvent::NextDeferred {
                    (
                        TourState::Closing {
                            tour_id,
                            step_index,
                        },
                        vec![
                            TourAction::PersistTourCompleted { tour_id },
                            TourAction::ScheduleClose { tour_id },
                        ],
                    )
                } else {
                    (
                        TourState::Idle,
                        vec![
                            TourAction::DeactivateStep,
                            TourAction::PersistTourCompleted { tour_id },
                        ],
                    )
                }
            }
            (
                TourState::Active {
                    tour_id,
                    step_index,
                },
                TourEvent::Prev,
            ) => {
                if step_index == 0 {
                    return (state, Vec::new());
                }
                (
                    TourState::Active {
                        tour_id,
                        step_index: step_index - 1,
                    },
                    vec![TourAction::ActivateStep {
                        tour_id,
                        step_index: step_index - 1,
                    }],
                )
            }

            // ===== Leaving =====
            (TourState::Active { tour_id, .. }, TourEvent::Skip) => (
                TourState::Idle,
                vec![
                    TourAction::DeactivateStep,
                    TourAction::PersistTourCompleted { tour_id },
                ],
            ),
            (TourState::Closing { .. }, TourEvent::Skip | TourEvent::CloseElapsed) => {
                (TourState::Idle, vec![TourAction::DeactivateStep])
            }
            (TourState::Active { .. } | TourState::Closing { .. }, TourEvent::End) => {
                (TourState::Idle, vec![TourAction::DeactivateStep])
            }

            (state, _event) => (state, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> TourCatalog {
        TourCatalog::builtin().unwrap()
    }

    fn active(tour_id: TourId, step_index: usize) -> TourState {
        TourState::Active {
            tour_id,
            step_index,
        }
    }

    #[test]
    fn tour_state_machine_idle_start_activates_first_step() {
        let (next, actions) =
            TourStateMachine::transition(TourState::Idle, TourEvent::Start(TourId::Leads), &catalog());
        assert_eq!(next, active(TourId::Leads, 0));
        assert_eq!(
            actions,
            vec![TourAction::ActivateStep {
                tour_id: TourId::Leads,
                step_index: 0
            }]
        );
    }

    #[test]
    fn tour_state_machine_start_discards_other_session_without_persisting() {
        let (next, actions) = TourStateMachine::transition(
            active(TourId::Campaign, 3),
            TourEvent::Start(TourId::Welcome),
            &catalog(),
        );
        assert_eq!(next, active(TourId::Welcome, 0));
        assert!(!actions
            .iter()
            .any(|a| matches!(a, TourAction::PersistTourCompleted { .. })));
    }

    #[test]
    fn tour_state_machine_next_advances_inside_tour() {
        let catalog = catalog();
        let n = catalog.step_count(TourId::Campaign);
        for i in 0..n - 1 {
            let (next, actions) =
                TourStateMachine::transition(active(TourId::Campaign, i), TourEvent::Next, &catalog);
            assert_eq!(next, active(TourId::Campaign, i + 1));
            assert_eq!(actions.len(), 1);
        }
    }

    #[test]
    fn tour_state_machine_next_on_last_step_completes_tour() {
        let catalog = catalog();
        let last = catalog.step_count(TourId::Leads) - 1;
        let (next, actions) =
            TourStateMachine::transition(active(TourId::Leads, last), TourEvent::Next, &catalog);
        assert_eq!(next, TourState::Idle);
        assert_eq!(
            actions,
            vec![
                TourAction::DeactivateStep,
                TourAction::PersistTourCompleted {
                    tour_id: TourId::Leads
                }
            ]
        );
    }

    #[test]
    fn tour_state_machine_deferred_next_on_last_step_enters_closing() {
        let catalog = catalog();
        let last = catalog.step_count(TourId::Leads) - 1;
        let (next, actions) = TourStateMachine::transition(
            active(TourId::Leads, last),
            TourEvent::NextDeferred,
            &catalog,
        );
        assert_eq!(
            next,
            TourState::Closing {
                tour_id: TourId::Leads,
                step_index: last
            }
        );
        assert_eq!(
            actions,
            vec![
                TourAction::PersistTourCompleted {
                    tour_id: TourId::Leads
                },
                TourAction::ScheduleClose {
                    tour_id: TourId::Leads
                }
            ]
        );

        let (after, actions) = TourStateMachine::transition(next, TourEvent::CloseElapsed, &catalog);
        assert_eq!(after, TourState::Idle);
        assert_eq!(actions, vec![TourAction::DeactivateStep]);

        let (again, actions) = TourStateMachine::transition(after, TourEvent::CloseElapsed, &catalog);
        assert_eq!(again, TourState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn tour_state_machine_closing_ignores_navigation() {
        let closing = TourState::Closing {
            tour_id: TourId::Leads,
            step_index: 2,
        };
        for event in [TourEvent::Next, TourEvent::NextDeferred, TourEvent::Prev] {
            let (next, actions) = TourStateMachine::transition(closing, event, &catalog());
            assert_eq!(next, closing);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn tour_state_machine_prev_at_first_step_is_noop() {
        let state = active(TourId::Welcome, 0);
        let (next, actions) = TourStateMachine::transition(state, TourEvent::Prev, &catalog());
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn tour_state_machine_prev_moves_back() {
        let (next, _) =
            TourStateMachine::transition(active(TourId::Welcome, 2), TourEvent::Prev, &catalog());
        assert_eq!(next, active(TourId::Welcome, 1));
    }

    #[test]
    fn tour_state_machine_skip_persists_completion_from_any_step() {
        let catalog = catalog();
        for i in 0..catalog.step_count(TourId::Templates) {
            let (next, actions) =
                TourStateMachine::transition(active(TourId::Templates, i), TourEvent::Skip, &catalog);
            assert_eq!(next, TourState::Idle);
            assert!(actions.contains(&TourAction::PersistTourCompleted {
                tour_id: TourId::Templates
            }));
        }
    }

    #[test]
    fn tour_state_machine_end_does_not_persist() {
        let (next, actions) =
            TourStateMachine::transition(active(TourId::Accounts, 1), TourEvent::End, &catalog());
        assert_eq!(next, TourState::Idle);
        assert_eq!(actions, vec![TourAction::DeactivateStep]);
    }

    #[test]
    fn tour_state_machine_idle_ignores_everything_but_start() {
        for event in [
            TourEvent::Next,
            TourEvent::NextDeferred,
            TourEvent::Prev,
            TourEvent::Skip,
            TourEvent::End,
            TourEvent::CloseElapsed,
        ] {
            let (next, actions) = TourStateMachine::transition(TourState::Idle, event, &catalog());
            assert_eq!(next, TourState::Idle);
            assert!(actions.is_empty());
        }
    }
}
