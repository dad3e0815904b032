use crate::alarm::AlarmKind;
use crate::model::{Scene, SimState, StatKind, Tuning, Vitals};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerAction {
    Eat,
    Drink,
    Exercise,
    TriggerAlarm(AlarmKind),
    ResetFeedTimer,
    Nudge(StatKind, f32),
    ConsoleMove(i32),
    HelpToggle,
    Back,
    Quit,
}

impl SimState {
    pub(crate) fn apply(&mut self, action: PlayerAction, now_ms: u64) {
        match action {
            PlayerAction::Eat => {
                self.vitals.hunger = (self.vitals.hunger + 30.0).clamp(0.0, 100.0);
                self.stamps.last_fed_ms = now_ms;
                self.alarm.dismiss_matching(AlarmKind::Feed);
            }
            PlayerAction::Drink => {
                self.vitals.thirst = (self.vitals.thirst + 30.0).clamp(0.0, 100.0);
                self.stamps.last_drank_ms = now_ms;
                self.alarm.dismiss_matching(AlarmKind::Drink);
            }
            PlayerAction::Exercise => {
                self.vitals.hunger = (self.vitals.hunger - 8.0).clamp(0.0, 100.0);
                self.vitals.thirst = (self.vitals.thirst - 8.0).clamp(0.0, 100.0);
                self.vitals.health = (self.vitals.health + 10.0).clamp(0.0, 100.0);
                self.stamps.last_exercised_ms = now_ms;
                self.alarm.dismiss_matching(AlarmKind::Exercise);
            }
            PlayerAction::TriggerAlarm(kind) => {
                self.alarm.trigger(kind);
            }
            PlayerAction::ResetFeedTimer => {
                self.stamps.last_fed_ms = now_ms;
                self.alarm.dismiss();
            }
            PlayerAction::Nudge(kind, delta) => {
                self.vitals.adjust(kind, delta);
            }
            PlayerAction::ConsoleMove(delta) => {
                let len = StatKind::ALL.len() as i32;
                let mut next = self.console_cursor as i32 + delta;
                if next < 0 {
                    next = len - 1;
                } else if next >= len {
                    next = 0;
                }
                self.console_cursor = next as usize;
            }
            PlayerAction::HelpToggle => {
                self.scene = match self.scene {
                    Scene::Help => Scene::Main,
                    _ => Scene::Help,
                };
            }
            PlayerAction::Back => self.scene = Scene::Main,
            PlayerAction::Quit => {}
        }
    }

    pub(crate) fn tick(&mut self, tuning: &Tuning, now_ms: u64) {
        debug_assert!(now_ms >= self.last_now_ms, "tick clock ran backwards");
        self.last_now_ms = now_ms;
        self.ticks += 1;

        self.vitals.hunger = (self.vitals.hunger - tuning.decay_per_tick).max(0.0);
        self.vitals.thirst = (self.vitals.thirst - tuning.decay_per_tick).max(0.0);

        // penalties are judged on the freshly decayed values
        let readout = decay_readout(&self.vitals, tuning);
        self.vitals.health = (self.vitals.health - readout.rate).clamp(0.0, 100.0);

        self.alarm.maybe_fire(&self.stamps, tuning, now_ms);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DecayReadout {
    pub(crate) rate: f32,
    pub(crate) multiplier: f32,
    pub(crate) penalty_count: u32,
    pub(crate) warning: bool,
}

pub(crate) fn decay_readout(vitals: &Vitals, tuning: &Tuning) -> DecayReadout {
    let mut penalty_count = 0u32;
    if vitals.hunger < tuning.low_stat_threshold {
        penalty_count += 1;
    }
    if vitals.thirst < tuning.low_stat_threshold {
        penalty_count += 1;
    }
    let multiplier = 1.0 + tuning.health_decay_penalty * penalty_count as f32;
    let rate = tuning.health_decay_base * multiplier;
    let warning = rate > tuning.health_decay_base * tuning.warn_decay_factor || penalty_count > 0;
    DecayReadout {
        rate,
        multiplier,
        penalty_count,
        warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SimState;

    const EPS: f32 = 1e-4;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn first_tick_from_defaults() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);

        st.tick(&tuning, 0);

        assert_close(st.vitals.hunger, 59.99);
        assert_close(st.vitals.thirst, 59.99);
        assert_close(st.vitals.health, 79.995);
    }

    #[test]
    fn one_low_stat_doubles_health_decay() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);
        st.vitals.hunger = 40.0;
        let before = st.vitals.health;

        st.tick(&tuning, 0);

        assert_close(before - st.vitals.health, 0.01);
    }

    #[test]
    fn two_low_stats_triple_health_decay() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);
        st.vitals.hunger = 40.0;
        st.vitals.thirst = 40.0;
        let before = st.vitals.health;

        st.tick(&tuning, 0);

        assert_close(before - st.vitals.health, 0.015);
    }

    #[test]
    fn penalty_counts_the_freshly_decayed_value() {
        // hunger crosses the threshold during this very tick and already counts
        let tuning = Tuning::default();
        let mut st = SimState::new(0);
        st.vitals.hunger = 50.005;
        let before = st.vitals.health;

        st.tick(&tuning, 0);

        assert!(st.vitals.hunger < 50.0);
        assert_close(before - st.vitals.health, 0.01);
    }

    #[test]
    fn stat_exactly_on_threshold_carries_no_penalty() {
        let tuning = Tuning::default();
        let vitals = Vitals {
            hunger: 50.0,
            thirst: 60.0,
            health: 80.0,
        };
        let readout = decay_readout(&vitals, &tuning);
        assert_eq!(readout.penalty_count, 0);
        assert_close(readout.rate, 0.005);
        assert_close(readout.multiplier, 1.0);
        assert!(!readout.warning);
    }

    #[test]
    fn warning_raises_with_any_penalty() {
        let tuning = Tuning::default();
        let vitals = Vitals {
            hunger: 49.9,
            thirst: 60.0,
            health: 80.0,
        };
        let readout = decay_readout(&vitals, &tuning);
        assert_eq!(readout.penalty_count, 1);
        assert_close(readout.rate, 0.01);
        assert_close(readout.multiplier, 2.0);
        assert!(readout.warning);
    }

    #[test]
    fn readouts_are_idempotent() {
        let tuning = Tuning::default();
        let st = SimState::new(0);

        assert_eq!(st.vitals.rounded(), st.vitals.rounded());
        assert_eq!(
            decay_readout(&st.vitals, &tuning),
            decay_readout(&st.vitals, &tuning)
        );
        assert_eq!(st.alarm.showing(), st.alarm.showing());
    }

    #[test]
    fn hunger_and_thirst_floor_at_zero() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);
        st.vitals.hunger = 0.004;
        st.vitals.thirst = 0.0;

        st.tick(&tuning, 0);

        assert_eq!(st.vitals.hunger, 0.0);
        assert_eq!(st.vitals.thirst, 0.0);
    }

    #[test]
    fn eat_caps_hunger_at_one_hundred() {
        let mut st = SimState::new(0);
        st.vitals.hunger = 70.0;

        st.apply(PlayerAction::Eat, 5_000);

        assert_eq!(st.vitals.hunger, 100.0);
        assert_eq!(st.stamps.last_fed_ms, 5_000);
    }

    #[test]
    fn exercise_moves_all_three_stats() {
        let mut st = SimState::new(0);

        st.apply(PlayerAction::Exercise, 2_000);

        assert_close(st.vitals.hunger, 52.0);
        assert_close(st.vitals.thirst, 52.0);
        assert_close(st.vitals.health, 90.0);
        assert_eq!(st.stamps.last_exercised_ms, 2_000);
    }

    #[test]
    fn exercise_floors_hunger_and_thirst() {
        let mut st = SimState::new(0);
        st.vitals.hunger = 5.0;
        st.vitals.thirst = 3.0;
        st.vitals.health = 95.0;

        st.apply(PlayerAction::Exercise, 0);

        assert_eq!(st.vitals.hunger, 0.0);
        assert_eq!(st.vitals.thirst, 0.0);
        assert_eq!(st.vitals.health, 100.0);
    }

    #[test]
    fn actions_dismiss_only_their_own_alarm() {
        let mut st = SimState::new(0);
        st.apply(PlayerAction::TriggerAlarm(AlarmKind::Feed), 0);

        st.apply(PlayerAction::Drink, 100);
        assert_eq!(st.alarm.showing(), Some(AlarmKind::Feed));

        st.apply(PlayerAction::Eat, 200);
        assert_eq!(st.alarm.showing(), None);
    }

    #[test]
    fn reset_feed_timer_clears_any_alarm() {
        let mut st = SimState::new(0);
        st.apply(PlayerAction::TriggerAlarm(AlarmKind::Exercise), 5_000);

        st.apply(PlayerAction::ResetFeedTimer, 6_000);

        assert_eq!(st.alarm.showing(), None);
        assert_eq!(st.stamps.last_fed_ms, 6_000);
    }

    #[test]
    fn tick_drives_the_alarm_scheduler() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);

        for i in 1..=16u64 {
            st.tick(&tuning, i * 1_000);
        }
        assert_eq!(st.alarm.showing(), Some(AlarmKind::Feed));

        st.apply(PlayerAction::Eat, 16_000);
        assert_eq!(st.alarm.showing(), None);
    }

    #[test]
    fn console_cursor_wraps_both_ways() {
        let mut st = SimState::new(0);
        st.apply(PlayerAction::ConsoleMove(-1), 0);
        assert_eq!(st.console_cursor, 2);
        st.apply(PlayerAction::ConsoleMove(1), 0);
        assert_eq!(st.console_cursor, 0);
    }

    #[test]
    fn stats_stay_bounded_through_abuse() {
        let tuning = Tuning::default();
        let mut st = SimState::new(0);
        let mut now = 0u64;

        for round in 0..2_000u64 {
            now += 40;
            st.tick(&tuning, now);
            match round % 7 {
                0 => st.apply(PlayerAction::Eat, now),
                1 => st.apply(PlayerAction::Nudge(StatKind::Health, -5.0), now),
                2 => st.apply(PlayerAction::Exercise, now),
                3 => st.apply(PlayerAction::Nudge(StatKind::Hunger, 5.0), now),
                4 => st.apply(PlayerAction::Drink, now),
                5 => st.apply(PlayerAction::Nudge(StatKind::Thirst, -5.0), now),
                _ => {}
            }
            for kind in StatKind::ALL {
                let v = st.vitals.get(kind);
                assert!((0.0..=100.0).contains(&v), "{kind:?} out of range: {v}");
            }
        }
    }
}
