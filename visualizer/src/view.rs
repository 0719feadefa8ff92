//! Drawing: the grid, the side panel and the status line.

use std::collections::HashSet;

use pathlab_core::{Canvas, Cell, Color, Glyph, Point, Style};
use pathlab_search::Algorithm;

use crate::colors::*;
use crate::logging;
use crate::model::{CELL_WIDTH, PANEL_MIN_HEIGHT, PANEL_WIDTH, Visualizer};

const KEYS: [(&str, &str); 4] = [
    ("r", "Reset search"),
    ("space", "Clear grid"),
    ("g", "Scatter walls"),
    ("q", "Quit"),
];

const CONTROLS: [(&str, &str); 3] = [
    ("Left click", "start / end / wall"),
    ("Left drag", "paint walls"),
    ("Right click", "remove"),
];

fn text(fg: Color, bg: Color) -> Style {
    Style::default().with_fg(fg).with_bg(bg)
}

impl Visualizer {
    fn cell_color(&self, c: Cell, path: &HashSet<Cell>) -> Color {
        let board = self.ctx.board();
        let state = self.ctx.state();
        if board.start() == Some(c) {
            START
        } else if board.end() == Some(c) {
            END
        } else if board.is_wall(c) {
            WALL
        } else if path.contains(&c) {
            PATH
        } else if state.is_explored(c) {
            EXPLORED
        } else if state.is_frontier(c) {
            FRONTIER
        } else {
            FREE
        }
    }

    pub(crate) fn draw_grid(&self, canvas: &mut Canvas) {
        let path: HashSet<Cell> = self.ctx.state().path().iter().copied().collect();
        for c in self.ctx.board().bounds() {
            let bg = self.cell_color(c, &path);
            let g = Glyph::new(' ', Style::default().with_bg(bg));
            canvas.fill_rect(Point::new(c.col * CELL_WIDTH, c.row), CELL_WIDTH, 1, g);
        }
    }

    pub(crate) fn draw_panel(&self, canvas: &mut Canvas) {
        let x = self.panel_x();
        let height = self.height() - 1;
        canvas.fill_rect(
            Point::new(x - 1, 0),
            PANEL_WIDTH + 1,
            height,
            Glyph::new(' ', Style::default().with_bg(PANEL_BG)),
        );

        let title = text(TEXT, PANEL_BG).with_bold(true);
        let dim = text(TEXT_DIM, PANEL_BG);
        let normal = text(TEXT, PANEL_BG);
        let left = x + 1;
        let mut y = 0;

        canvas.print(Point::new(left, y), "pathlab", title);
        y += 1;
        canvas.print(Point::new(left, y), "Uninformed search", dim);
        y += 2;

        canvas.print(Point::new(left, y), "ALGORITHMS", dim);
        y += 1;
        let active = self.ctx.status().algorithm();
        for (i, algorithm) in Algorithm::ALL.into_iter().enumerate() {
            let bg = if active == Some(algorithm) {
                BTN_ACTIVE
            } else {
                BTN_IDLE
            };
            canvas.fill_rect(
                Point::new(left, y),
                PANEL_WIDTH - 3,
                1,
                Glyph::new(' ', Style::default().with_bg(bg)),
            );
            canvas.print(
                Point::new(left + 1, y),
                &format!("{}  {}", i + 1, algorithm),
                text(TEXT, bg).with_bold(true),
            );
            y += 1;
        }
        y += 1;

        let state = self.ctx.state();
        canvas.print(
            Point::new(left, y),
            &format!("Explored: {}", state.explored().len()),
            normal,
        );
        y += 1;
        canvas.print(
            Point::new(left, y),
            &format!("Path: {} steps", state.path_len()),
            normal,
        );
        y += 1;
        if state.path_len() > 0 {
            canvas.print(
                Point::new(left, y),
                &format!("Cost: {:.3}", state.path_cost()),
                normal,
            );
        }
        y += 2;

        for (key, what) in KEYS {
            canvas.print(Point::new(left, y), key, title);
            canvas.print(Point::new(left + 7, y), what, normal);
            y += 1;
        }
        y += 1;

        canvas.print(Point::new(left, y), "CONTROLS", dim);
        y += 1;
        for (input, what) in CONTROLS {
            canvas.print(Point::new(left, y), input, dim);
            canvas.print(Point::new(left + 12, y), what, normal);
            y += 1;
        }
        y += 1;
        debug_assert!(y < PANEL_MIN_HEIGHT);

        canvas.print(Point::new(left, y), "LOG", dim);
        y += 1;
        let room = (height - y).max(0) as usize;
        for message in logging::get_logger().recent(room) {
            canvas.print(
                Point::new(left, y),
                &message.text,
                text(log_color(message.level), PANEL_BG),
            );
            y += 1;
        }
    }

    pub(crate) fn draw_status(&self, canvas: &mut Canvas) {
        let y = self.height() - 1;
        let status = self.ctx.status();
        canvas.fill_rect(
            Point::new(0, y),
            canvas.width(),
            1,
            Glyph::new(' ', Style::default().with_bg(STATUS_BG)),
        );
        let fg = if status.is_found() {
            STATUS_FOUND
        } else if status.is_not_found() {
            STATUS_NOT_FOUND
        } else {
            TEXT_DIM
        };
        canvas.print(Point::new(1, y), &status.to_string(), text(fg, STATUS_BG));
    }
}
