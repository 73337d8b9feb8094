use serde::{Deserialize, Serialize};

use game_core::{
    Command, CommandError, CommandReport, EnemyId, MoveReport, SessionDelta, StageTicket,
    TurnReport, Verdict,
};

/// Every command the worker ran, and every one it refused.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    CommandApplied {
        command: Command,
        delta: SessionDelta,
        report: CommandReport,
    },
    CommandRejected {
        command: Command,
        reason: CommandError,
    },
}

/// Battle milestones, derived from applied commands and stage bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    EncounterStarted { enemy: EnemyId, scale: f64 },
    TurnResolved(TurnReport),
    /// `verdict` is set when this turn ended the battle.
    TurnSettled { verdict: Option<Verdict> },
    BattleEnded { verdict: Verdict },
    /// A scheduled stage arrived after its turn was over.
    StageDiscarded { ticket: StageTicket },
}

impl CombatEvent {
    /// Combat events implied by an applied command's report, in publish order.
    pub fn from_report(report: &CommandReport) -> Vec<CombatEvent> {
        match report {
            CommandReport::Moved(MoveReport::Encounter { enemy, scale }) => {
                vec![CombatEvent::EncounterStarted {
                    enemy: enemy.clone(),
                    scale: *scale,
                }]
            }
            CommandReport::TurnResolved(turn) => vec![CombatEvent::TurnResolved(*turn)],
            CommandReport::TurnSettled { verdict } => {
                let mut events = vec![CombatEvent::TurnSettled { verdict: *verdict }];
                if let Some(verdict) = verdict {
                    events.push(CombatEvent::BattleEnded { verdict: *verdict });
                }
                events
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{Outcome, Position};

    #[test]
    fn settle_with_verdict_ends_the_battle() {
        let events = CombatEvent::from_report(&CommandReport::TurnSettled {
            verdict: Some(Verdict::Victory),
        });
        assert_eq!(
            events,
            vec![
                CombatEvent::TurnSettled {
                    verdict: Some(Verdict::Victory)
                },
                CombatEvent::BattleEnded {
                    verdict: Verdict::Victory
                },
            ]
        );
    }

    #[test]
    fn plain_reports_carry_no_combat_events() {
        let moved = CommandReport::Moved(MoveReport::Moved {
            position: Position::new(1, 1),
        });
        assert!(CombatEvent::from_report(&moved).is_empty());
        assert!(CombatEvent::from_report(&CommandReport::Reset).is_empty());

        let turn = TurnReport {
            outcome: Outcome::Draw,
            damage_to_enemy: 6,
            damage_to_player: 3,
            burst_fired: false,
            enemy_defeated: false,
            levels_gained: 0,
        };
        assert_eq!(
            CombatEvent::from_report(&CommandReport::TurnResolved(turn)),
            vec![CombatEvent::TurnResolved(turn)]
        );
    }
}
