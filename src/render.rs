use crate::alarm::AlarmKind;
use crate::model::{SimState, StatKind, Tuning};
use crate::sim::decay_readout;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self, bg: Color) {
        for c in &mut self.cells {
            c.ch = ' ';
            c.fg = Color::White;
            c.bg = bg;
        }
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        let prev = CellBuffer::new(cols, rows);
        let cur = CellBuffer::new(cols, rows);

        Ok(Self {
            out,
            cols,
            rows,
            prev,
            cur,
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        Ok(true)
    }

    pub(crate) fn present(&mut self, diff_only: bool) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;

        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if diff_only && c == self.prev.cells[i] {
                    continue;
                }

                queue!(self.out, cursor::MoveTo(x, y))?;

                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }

                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   Text and box primitives
------------------------------ */

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

pub(crate) fn draw_box(buf: &mut CellBuffer, x: u16, y: u16, w: u16, h: u16, fg: Color, bg: Color) {
    if w < 2 || h < 2 {
        return;
    }
    for xx in x..x + w {
        buf.set(xx, y, Cell { ch: '─', fg, bg });
        buf.set(xx, y + h - 1, Cell { ch: '─', fg, bg });
    }
    for yy in y..y + h {
        buf.set(x, yy, Cell { ch: '│', fg, bg });
        buf.set(x + w - 1, yy, Cell { ch: '│', fg, bg });
    }
    for yy in y + 1..y + h - 1 {
        for xx in x + 1..x + w - 1 {
            buf.set(xx, yy, Cell { ch: ' ', fg, bg });
        }
    }
    buf.set(x, y, Cell { ch: '┌', fg, bg });
    buf.set(x + w - 1, y, Cell { ch: '┐', fg, bg });
    buf.set(x, y + h - 1, Cell { ch: '└', fg, bg });
    buf.set(x + w - 1, y + h - 1, Cell { ch: '┘', fg, bg });
}

fn accent(color_on: bool, c: Color) -> Color {
    if color_on {
        c
    } else {
        Color::White
    }
}

/* -----------------------------
   Tilo sprite
------------------------------ */

pub(crate) const PET_W: i32 = 15;
pub(crate) const PET_H: i32 = 8;

pub(crate) fn draw_pet(buf: &mut CellBuffer, st: &SimState, cx: i32, cy: i32) {
    let bg = Color::Black;
    let fg = Color::White;

    let x0 = cx - PET_W / 2;
    let y0 = cy - PET_H / 2;

    let mut grid = [
        "   /\\_____/\\   ",
        "  /  o   o  \\  ",
        " |     ^     | ",
        " |   \\___/   | ",
        "  \\         /  ",
        "   \\_______/   ",
        "    _|   |_    ",
        "   (_)   (_)   ",
    ];

    // droopy variant once any stat sits at or below the low line
    if st.vitals.lowest() <= 50.0 {
        grid[1] = "  /  -   -  \\  ";
        grid[3] = " |   /___\\   | ";
    }

    for (yy, line) in grid.iter().enumerate() {
        let y = y0 + yy as i32;
        if y < 0 || y >= buf.h as i32 {
            continue;
        }
        let mut x = x0;
        for ch in line.chars() {
            if x >= 0 && x < buf.w as i32 {
                buf.set(x as u16, y as u16, Cell { ch, fg, bg });
            }
            x += 1;
        }
    }

    if st.alarm.showing().is_some() {
        let ay = y0 - 2;
        if ay >= 0 && ay < buf.h as i32 && cx >= 0 && cx < buf.w as i32 {
            buf.set(
                cx as u16,
                ay as u16,
                Cell {
                    ch: '!',
                    fg: Color::Red,
                    bg,
                },
            );
        }
    }
}

pub(crate) fn pet_bounce_offset(st: &SimState) -> (i32, i32) {
    let t = st.ticks as f32 * 0.08;
    let x = (t.cos() * 1.4).round() as i32;
    let y = t.sin().round() as i32;
    (x, y)
}

/* -----------------------------
   Panels
------------------------------ */

pub(crate) fn draw_title(buf: &mut CellBuffer, st: &SimState, color_on: bool) {
    let bg = Color::Black;
    let feeling = if st.vitals.lowest() <= 50.0 {
        "sad"
    } else {
        "content"
    };
    let title = format!("Tilo  |  feeling: {feeling}");
    let fg = if st.vitals.lowest() <= 50.0 {
        accent(color_on, Color::Red)
    } else {
        Color::White
    };
    draw_text(buf, 1, 0, &title, fg, bg);
}

fn bar_color(kind: StatKind, value: f32, color_on: bool) -> Color {
    if !color_on {
        return Color::White;
    }
    if value <= 50.0 {
        Color::Red
    } else if kind == StatKind::Health {
        Color::Cyan
    } else {
        Color::Yellow
    }
}

pub(crate) const BAR_INNER: usize = 14;
// "Hunger [##############] 100"
pub(crate) const BARS_W: i32 = 6 + 2 + BAR_INNER as i32 + 2 + 3;

pub(crate) fn draw_stat_bars(buf: &mut CellBuffer, st: &SimState, x: u16, y: u16, color_on: bool) {
    let bg = Color::Black;
    let fg = Color::White;

    for (i, kind) in StatKind::ALL.into_iter().enumerate() {
        let yy = y + i as u16;
        let value = st.vitals.get(kind);
        let fill = (value / 100.0 * BAR_INNER as f32 + 0.5) as usize;
        let col = bar_color(kind, value, color_on);

        draw_text(buf, x, yy, &format!("{:<6}", kind.label()), fg, bg);
        let bx = x + 6;
        draw_text(buf, bx, yy, "[", fg, bg);
        for j in 0..BAR_INNER {
            let ch = if j < fill { '█' } else { ' ' };
            buf.set(
                bx + 1 + j as u16,
                yy,
                Cell {
                    ch,
                    fg: col,
                    bg,
                },
            );
        }
        draw_text(buf, bx + 1 + BAR_INNER as u16, yy, "]", fg, bg);
        let shown = value.round() as i32;
        draw_text(
            buf,
            bx + 3 + BAR_INNER as u16,
            yy,
            &format!("{shown:>3}"),
            fg,
            bg,
        );
    }
}

pub(crate) const CONSOLE_W: u16 = 27;

pub(crate) fn draw_dev_console(
    buf: &mut CellBuffer,
    st: &SimState,
    tuning: &Tuning,
    x: u16,
    y: u16,
    color_on: bool,
) {
    let bg = Color::Black;
    let fg = Color::White;
    let hi = accent(color_on, Color::Yellow);
    let dim = accent(color_on, Color::DarkGrey);

    draw_text(buf, x, y, "DEV CONSOLE", fg, bg);

    let readout = decay_readout(&st.vitals, tuning);
    if readout.warning {
        let warn_bg = if color_on { Color::DarkRed } else { Color::Black };
        draw_text(buf, x, y + 1, "WARNING: high health decay", fg, warn_bg);
        let detail = format!("{:.4} (x{:.2})", readout.rate, readout.multiplier);
        draw_text(buf, x, y + 2, &format!("{detail:<26}"), fg, warn_bg);
    }

    let (h, t, hp) = st.vitals.rounded();
    let rows = [
        (StatKind::Hunger, h),
        (StatKind::Thirst, t),
        (StatKind::Health, hp),
    ];
    for (i, (kind, value)) in rows.into_iter().enumerate() {
        let selected = st.console_cursor == i;
        let marker = if selected { '>' } else { ' ' };
        let line = format!("{marker} {:<8}{value:>4}", kind.label());
        draw_text(buf, x, y + 4 + i as u16, &line, if selected { hi } else { fg }, bg);
    }

    let decay_col = if readout.penalty_count > 0 {
        accent(color_on, Color::Yellow)
    } else {
        accent(color_on, Color::Cyan)
    };
    draw_text(buf, x, y + 8, "Decay", fg, bg);
    draw_text(
        buf,
        x + 6,
        y + 8,
        &format!("{:.4} (x{:.2})", readout.rate, readout.multiplier),
        decay_col,
        bg,
    );

    draw_text(buf, x, y + 10, "1/2/3 trigger alarms", dim, bg);
    draw_text(buf, x, y + 11, "r     reset feed timer", dim, bg);
    draw_text(buf, x, y + 12, "+/-   adjust selected", dim, bg);
}

pub(crate) fn draw_alarm_popup(buf: &mut CellBuffer, kind: AlarmKind, color_on: bool) {
    let bg = Color::Black;
    let fg = Color::White;
    let border = accent(color_on, Color::Red);

    let title = format!("ALARM: {}", kind.label());
    let message = kind.message();
    let inner = title.chars().count().max(message.chars().count()) as u16;
    let w = inner + 4;
    let h = 4u16;

    // pinned to the left edge, vertically centered
    let x = 2u16.min(buf.w.saturating_sub(1));
    let y = (buf.h.saturating_sub(h)) / 2;

    draw_box(buf, x, y, w, h, border, bg);
    draw_text(buf, x + 2, y + 1, &title, border, bg);
    draw_text(buf, x + 2, y + 2, message, fg, bg);
}

pub(crate) fn draw_action_hints(buf: &mut CellBuffer, cx: i32, y: u16) {
    let bg = Color::Black;
    let fg = Color::White;
    let hints = "[E]at    [D]rink    e[X]ercise";
    let x = (cx - hints.chars().count() as i32 / 2).max(0) as u16;
    draw_text(buf, x, y, hints, fg, bg);
}

pub(crate) fn draw_key_line(buf: &mut CellBuffer, st: &SimState) {
    let bg = Color::Black;
    let fg = Color::White;
    let help = match st.scene {
        crate::model::Scene::Main => {
            "Keys: e eat | d drink | x exercise | up/down +/- console | 1/2/3 alarms | r reset | h help | q quit"
        }
        crate::model::Scene::Help => "Help: esc or h to close | q quit",
    };
    draw_text(buf, 1, buf.h.saturating_sub(1), help, fg, bg);
}
