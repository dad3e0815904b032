use crate::config::{load_settings, project_paths, save_settings_atomic, Settings};
use crate::input::{collect_input_nonblocking, map_key_to_action};
use crate::model::{Scene, SimState, Tuning};
use crate::render::{
    draw_action_hints, draw_alarm_popup, draw_box, draw_dev_console, draw_key_line, draw_pet,
    draw_stat_bars, draw_text, draw_title, pet_bounce_offset, Terminal, BARS_W, CONSOLE_W, PET_H,
};
use crate::sim::PlayerAction;
use std::cmp::min;
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    tuning: Tuning,
    state: SimState,
    paths: crate::config::Paths,
    term: Terminal,
    session_start: Instant,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths()?;
        let settings = load_settings(&paths.settings_path);
        let tuning = Tuning::default();

        // fresh pet every launch; the session clock starts at zero
        let state = SimState::new(0);

        let term = Terminal::begin()?;

        Ok(Self {
            settings,
            tuning,
            state,
            paths,
            term,
            session_start: Instant::now(),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.max(10).min(240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let sim_step = Duration::from_secs_f32(1.0 / self.tuning.tick_hz as f32);

        let mut last_frame = Instant::now();
        let mut sim_accum = Duration::ZERO;

        while !self.should_quit {
            let _resized = self.term.resize_if_needed()?;

            let now_ms = self.session_start.elapsed().as_millis() as u64;

            // input
            let keys = collect_input_nonblocking(frame_dt)?;
            for key in keys {
                if let Some(action) = map_key_to_action(&self.state, key) {
                    match action {
                        PlayerAction::Quit => {
                            self.should_quit = true;
                            break;
                        }
                        _ => self.state.apply(action, now_ms),
                    }
                }
            }

            // sim fixed-step
            let now = Instant::now();
            let real_dt = now.saturating_duration_since(last_frame);
            last_frame = now;
            sim_accum = sim_accum.saturating_add(real_dt);

            while sim_accum >= sim_step {
                self.state.tick(&self.tuning, now_ms);
                sim_accum = sim_accum.saturating_sub(sim_step);
            }

            // render
            self.render_frame()?;

            // frame cap
            spin_sleep(frame_dt, Instant::now());
        }

        self.term.end()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let bg = crossterm::style::Color::Black;
        self.term.cur.clear(bg);

        let color_on = self.settings.enable_color;
        let cols = self.term.cols as i32;
        let rows = self.term.rows as i32;

        draw_title(&mut self.term.cur, &self.state, color_on);
        draw_stat_bars(&mut self.term.cur, &self.state, 1, 2, color_on);

        let console_x = (cols - CONSOLE_W as i32 - 1).max(BARS_W + 3) as u16;
        draw_dev_console(
            &mut self.term.cur,
            &self.state,
            &self.tuning,
            console_x,
            2,
            color_on,
        );

        // pet sits between the two panels
        let left_edge = BARS_W + 2;
        let right_edge = console_x as i32;
        let cx = left_edge + (right_edge - left_edge) / 2;
        let cy = rows / 2;
        let bounce = pet_bounce_offset(&self.state);
        draw_pet(&mut self.term.cur, &self.state, cx + bounce.0, cy + bounce.1);
        draw_action_hints(
            &mut self.term.cur,
            cx,
            (cy + PET_H / 2 + 2).clamp(0, rows - 1) as u16,
        );

        if let Some(kind) = self.state.alarm.showing() {
            draw_alarm_popup(&mut self.term.cur, kind, color_on);
        }

        draw_key_line(&mut self.term.cur, &self.state);

        if let Scene::Help = self.state.scene {
            self.draw_center_box(
                "How to play",
                "Tilo gets hungry and thirsty over time.\n\
    When either runs low, health drains faster.\n\n\
    E Eat: +30 hunger.\n\
    D Drink: +30 thirst.\n\
    X Exercise: +10 health, costs hunger and thirst.\n\n\
    Reminders pop up when an action is overdue.\n\
    Doing that action clears its popup.\n\n\
    Dev console: Up/Down select, +/- nudge,\n\
    1/2/3 trigger alarms, R resets the feed timer.\n\n\
    Esc or H to close help.",
            )?;
        }

        self.term.present(true)?;
        Ok(())
    }

    fn draw_center_box(&mut self, title: &str, body: &str) -> anyhow::Result<()> {
        let w = self.term.cols;
        let h = self.term.rows;

        let bw = min(56, w.saturating_sub(4));
        let bh = min(18, h.saturating_sub(4));

        let x0 = (w - bw) / 2;
        let y0 = (h - bh) / 2;

        draw_box(
            &mut self.term.cur,
            x0,
            y0,
            bw,
            bh,
            crossterm::style::Color::White,
            crossterm::style::Color::Black,
        );

        draw_text(
            &mut self.term.cur,
            x0 + 2,
            y0 + 1,
            title,
            crossterm::style::Color::White,
            crossterm::style::Color::Black,
        );

        let mut yy = y0 + 3;
        for line in body.lines() {
            if yy >= y0 + bh - 1 {
                break;
            }
            draw_text(
                &mut self.term.cur,
                x0 + 2,
                yy,
                line,
                crossterm::style::Color::White,
                crossterm::style::Color::Black,
            );
            yy += 1;
        }

        Ok(())
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    app.run()?;
    Ok(())
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
