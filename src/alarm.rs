use crate::model::{ActionStamps, Tuning};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AlarmKind {
    Feed,
    Drink,
    Exercise,
}

impl AlarmKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            AlarmKind::Feed => "Feed",
            AlarmKind::Drink => "Drink",
            AlarmKind::Exercise => "Exercise",
        }
    }

    pub(crate) fn message(self) -> &'static str {
        match self {
            AlarmKind::Feed => "feed yourself and me as well",
            AlarmKind::Drink => "drink something now, please",
            AlarmKind::Exercise => "time to exercise!",
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct AlarmState {
    showing: Option<AlarmKind>,
    last_feed_fire_ms: Option<u64>,
    last_drink_fire_ms: Option<u64>,
    last_exercise_fire_ms: Option<u64>,
}

impl AlarmState {
    pub(crate) fn showing(&self) -> Option<AlarmKind> {
        self.showing
    }

    // Natural firing path, called once per tick. While a popup is up nothing
    // else may fire; otherwise the kinds are checked in fixed priority order
    // Feed, Drink, Exercise and the first one with both its action-age and
    // its own cooldown window expired fires. Firing arms that kind's cooldown.
    pub(crate) fn maybe_fire(
        &mut self,
        stamps: &ActionStamps,
        tuning: &Tuning,
        now_ms: u64,
    ) -> Option<AlarmKind> {
        if self.showing.is_some() {
            return None;
        }

        let interval = tuning.alarm_interval_ms;
        let due = |acted_ms: u64, fired_ms: Option<u64>| {
            now_ms.saturating_sub(acted_ms) > interval
                && fired_ms.map_or(true, |f| now_ms.saturating_sub(f) > interval)
        };

        if due(stamps.last_fed_ms, self.last_feed_fire_ms) {
            self.last_feed_fire_ms = Some(now_ms);
            self.showing = Some(AlarmKind::Feed);
        } else if due(stamps.last_drank_ms, self.last_drink_fire_ms) {
            self.last_drink_fire_ms = Some(now_ms);
            self.showing = Some(AlarmKind::Drink);
        } else if due(stamps.last_exercised_ms, self.last_exercise_fire_ms) {
            self.last_exercise_fire_ms = Some(now_ms);
            self.showing = Some(AlarmKind::Exercise);
        }

        self.showing
    }

    // Manual path (dev console): always takes effect, replaces whatever popup
    // is up, and leaves the cooldown clocks untouched.
    pub(crate) fn trigger(&mut self, kind: AlarmKind) {
        self.showing = Some(kind);
    }

    pub(crate) fn dismiss(&mut self) {
        self.showing = None;
    }

    pub(crate) fn dismiss_matching(&mut self, kind: AlarmKind) {
        if self.showing == Some(kind) {
            self.showing = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActionStamps, Tuning};

    const INTERVAL: u64 = 15_000;

    #[test]
    fn quiet_until_the_interval_strictly_elapses() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let stamps = ActionStamps::new(0);

        assert_eq!(alarm.maybe_fire(&stamps, &tuning, INTERVAL), None);
        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, INTERVAL + 1),
            Some(AlarmKind::Feed)
        );
    }

    #[test]
    fn feed_outranks_drink_and_exercise() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        // every action equally overdue
        let stamps = ActionStamps::new(0);

        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 60_000),
            Some(AlarmKind::Feed)
        );
        // one popup at a time: nothing further fires while it is up
        assert_eq!(alarm.maybe_fire(&stamps, &tuning, 60_001), None);
        assert_eq!(alarm.showing(), Some(AlarmKind::Feed));
    }

    #[test]
    fn drink_fires_when_feed_is_fresh() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let mut stamps = ActionStamps::new(0);
        stamps.last_fed_ms = 50_000;

        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 50_001),
            Some(AlarmKind::Drink)
        );
    }

    #[test]
    fn exercise_fires_last_in_priority() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let mut stamps = ActionStamps::new(0);
        stamps.last_fed_ms = 50_000;
        stamps.last_drank_ms = 50_000;

        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 50_001),
            Some(AlarmKind::Exercise)
        );
    }

    #[test]
    fn natural_firing_arms_the_cooldown() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let mut stamps = ActionStamps::new(0);
        // keep the other kinds permanently fresh
        stamps.last_drank_ms = 1_000_000;
        stamps.last_exercised_ms = 1_000_000;

        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 15_001),
            Some(AlarmKind::Feed)
        );
        alarm.dismiss();

        // the feed never happened, but the kind's own cooldown holds it back
        assert_eq!(alarm.maybe_fire(&stamps, &tuning, 20_000), None);
        assert_eq!(alarm.maybe_fire(&stamps, &tuning, 30_001), None);
        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 30_002),
            Some(AlarmKind::Feed)
        );
    }

    #[test]
    fn cooldown_of_one_kind_lets_the_next_through() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let stamps = ActionStamps::new(0);

        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 15_001),
            Some(AlarmKind::Feed)
        );
        alarm.dismiss();

        // feed is cooling down, drink is overdue and unfired
        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 16_000),
            Some(AlarmKind::Drink)
        );
    }

    #[test]
    fn manual_trigger_skips_cooldown_bookkeeping() {
        let tuning = Tuning::default();
        let mut alarm = AlarmState::default();
        let mut stamps = ActionStamps::new(0);
        stamps.last_drank_ms = 1_000_000;
        stamps.last_exercised_ms = 1_000_000;

        alarm.trigger(AlarmKind::Feed);
        assert_eq!(alarm.showing(), Some(AlarmKind::Feed));
        alarm.dismiss();

        // no cooldown was armed, so the natural path may fire immediately
        assert_eq!(
            alarm.maybe_fire(&stamps, &tuning, 15_001),
            Some(AlarmKind::Feed)
        );
    }

    #[test]
    fn manual_trigger_replaces_a_showing_popup() {
        let mut alarm = AlarmState::default();
        alarm.trigger(AlarmKind::Feed);
        alarm.trigger(AlarmKind::Exercise);
        assert_eq!(alarm.showing(), Some(AlarmKind::Exercise));
    }

    #[test]
    fn dismiss_matching_ignores_other_kinds() {
        let mut alarm = AlarmState::default();
        alarm.trigger(AlarmKind::Feed);
        alarm.dismiss_matching(AlarmKind::Drink);
        assert_eq!(alarm.showing(), Some(AlarmKind::Feed));
        alarm.dismiss_matching(AlarmKind::Feed);
        assert_eq!(alarm.showing(), None);
    }
}
