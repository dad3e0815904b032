use crate::alarm::AlarmState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Scene {
    Main,
    Help,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StatKind {
    Hunger,
    Thirst,
    Health,
}

impl StatKind {
    pub(crate) const ALL: [StatKind; 3] = [StatKind::Hunger, StatKind::Thirst, StatKind::Health];

    pub(crate) fn label(self) -> &'static str {
        match self {
            StatKind::Hunger => "Hunger",
            StatKind::Thirst => "Thirst",
            StatKind::Health => "Health",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Vitals {
    pub(crate) hunger: f32,
    pub(crate) thirst: f32,
    pub(crate) health: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            hunger: 60.0,
            thirst: 60.0,
            health: 80.0,
        }
    }
}

impl Vitals {
    pub(crate) fn get(&self, kind: StatKind) -> f32 {
        match kind {
            StatKind::Hunger => self.hunger,
            StatKind::Thirst => self.thirst,
            StatKind::Health => self.health,
        }
    }

    pub(crate) fn adjust(&mut self, kind: StatKind, delta: f32) {
        let v = match kind {
            StatKind::Hunger => &mut self.hunger,
            StatKind::Thirst => &mut self.thirst,
            StatKind::Health => &mut self.health,
        };
        *v = (*v + delta).clamp(0.0, 100.0);
    }

    // whole-point values for display
    pub(crate) fn rounded(&self) -> (i32, i32, i32) {
        (
            self.hunger.round() as i32,
            self.thirst.round() as i32,
            self.health.round() as i32,
        )
    }

    pub(crate) fn lowest(&self) -> f32 {
        self.hunger.min(self.thirst).min(self.health)
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ActionStamps {
    pub(crate) last_fed_ms: u64,
    pub(crate) last_drank_ms: u64,
    pub(crate) last_exercised_ms: u64,
}

impl ActionStamps {
    pub(crate) fn new(now_ms: u64) -> Self {
        Self {
            last_fed_ms: now_ms,
            last_drank_ms: now_ms,
            last_exercised_ms: now_ms,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Tuning {
    pub(crate) decay_per_tick: f32,
    pub(crate) health_decay_base: f32,
    pub(crate) health_decay_penalty: f32,
    pub(crate) low_stat_threshold: f32,
    pub(crate) alarm_interval_ms: u64,
    pub(crate) warn_decay_factor: f32,
    pub(crate) tick_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            decay_per_tick: 0.01,
            health_decay_base: 0.005,
            health_decay_penalty: 1.0,
            low_stat_threshold: 50.0,
            alarm_interval_ms: 15_000,
            warn_decay_factor: 1.5,
            tick_hz: 60,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct SimState {
    pub(crate) vitals: Vitals,
    pub(crate) stamps: ActionStamps,
    pub(crate) alarm: AlarmState,
    pub(crate) scene: Scene,
    pub(crate) console_cursor: usize,
    pub(crate) ticks: u64,
    pub(crate) last_now_ms: u64,
}

impl SimState {
    pub(crate) fn new(now_ms: u64) -> Self {
        Self {
            vitals: Vitals::default(),
            stamps: ActionStamps::new(now_ms),
            alarm: AlarmState::default(),
            scene: Scene::Main,
            console_cursor: 0,
            ticks: 0,
            last_now_ms: now_ms,
        }
    }
}
