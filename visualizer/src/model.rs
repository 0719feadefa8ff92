//! Elm-architecture Model implementation.

use std::time::Duration;

use pathlab_core::{Canvas, Cell, Effect, EditOp, Key, Marker, Model, MouseAction, Msg, Point};
use pathlab_search::{Algorithm, SearchContext};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Settings;

/// Terminal columns per grid cell.
pub const CELL_WIDTH: i32 = 2;
/// Width of the side panel, in columns.
pub const PANEL_WIDTH: i32 = 32;
/// Rows the side panel needs before its log section.
pub const PANEL_MIN_HEIGHT: i32 = 28;

/// The interactive search workbench.
pub struct Visualizer {
    pub(crate) ctx: SearchContext,
    step_delay: Duration,
    density: f64,
    rng: StdRng,
    painting: bool,
}

impl Visualizer {
    pub fn new(settings: &Settings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        let mut ctx = SearchContext::new(settings.bounds);
        ctx.set_depth_limit(settings.depth_limit);
        Self {
            ctx,
            step_delay: settings.step_delay,
            density: settings.density,
            rng,
            painting: false,
        }
    }

    pub fn context(&self) -> &SearchContext {
        &self.ctx
    }

    /// Canvas width: the grid, a gap, and the panel.
    pub fn width(&self) -> i32 {
        self.panel_x() + PANEL_WIDTH
    }

    /// Canvas height: the grid or the panel, whichever is taller, plus the
    /// status line.
    pub fn height(&self) -> i32 {
        self.ctx.board().bounds().rows.max(PANEL_MIN_HEIGHT) + 1
    }

    pub(crate) fn panel_x(&self) -> i32 {
        self.ctx.board().bounds().cols * CELL_WIDTH + 1
    }

    /// The grid cell under screen position `pos`, if any.
    pub fn cell_at(&self, pos: Point) -> Option<Cell> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        let cell = Cell::new(pos.y, pos.x / CELL_WIDTH);
        self.ctx.board().bounds().contains(cell).then_some(cell)
    }

    // -------------------------------------------------------------------
    // Update
    // -------------------------------------------------------------------

    fn handle_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Char(c @ '1'..='6') => {
                let algorithm = Algorithm::ALL[(c as u8 - b'1') as usize];
                let limit = self.ctx.depth_limit();
                if let Err(e) = self.ctx.begin(algorithm, limit) {
                    log::warn!("{e}");
                }
            }
            Key::Char('r') => self.ctx.reset_search(),
            Key::Space => {
                self.ctx.clear_grid();
                log::info!("grid cleared");
            }
            Key::Char('g') => {
                let placed = self
                    .ctx
                    .board_mut()
                    .scatter_walls(&mut self.rng, self.density);
                log::info!("placed {placed} walls");
            }
            Key::Char('q') | Key::Escape => return Some(Effect::End),
            _ => {}
        }
        None
    }

    fn handle_mouse(&mut self, action: MouseAction, pos: Point) {
        if action == MouseAction::Release {
            self.painting = false;
            return;
        }
        let Some(cell) = self.cell_at(pos) else {
            return;
        };
        match action {
            MouseAction::Main => {
                self.painting = true;
                self.place(cell);
            }
            MouseAction::Drag if self.painting => self.paint(cell),
            MouseAction::Secondary => self.remove(cell),
            _ => {}
        }
    }

    /// Left click: start first, then end, then walls.
    fn place(&mut self, cell: Cell) {
        let board = self.ctx.board();
        let op = if board.start().is_none() {
            EditOp::SetStart
        } else if board.end().is_none() && board.start() != Some(cell) {
            EditOp::SetEnd
        } else {
            self.paint(cell);
            return;
        };
        self.edit(cell, op);
    }

    /// Wall a free cell. Markers and existing walls are left alone.
    fn paint(&mut self, cell: Cell) {
        let board = self.ctx.board();
        if board.marker_at(cell).is_none() && !board.is_wall(cell) {
            self.edit(cell, EditOp::SetWall);
        }
    }

    /// Right click: remove whatever is on the cell.
    fn remove(&mut self, cell: Cell) {
        let board = self.ctx.board();
        let op = match board.marker_at(cell) {
            Some(Marker::Start) => EditOp::ClearStart,
            Some(Marker::End) => EditOp::ClearEnd,
            None if board.is_wall(cell) => EditOp::ClearWall,
            None => return,
        };
        self.edit(cell, op);
    }

    fn edit(&mut self, cell: Cell, op: EditOp) {
        if let Err(e) = self.ctx.edit(cell, op) {
            log::debug!("edit {op:?} rejected: {e}");
        }
    }
}

impl Model for Visualizer {
    fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                log::info!(
                    "{} grid, depth limit {}",
                    self.ctx.board().bounds(),
                    self.ctx.depth_limit()
                );
                None
            }
            Msg::KeyDown { key, .. } => self.handle_key(key),
            Msg::Mouse { action, pos, .. } => {
                self.handle_mouse(action, pos);
                None
            }
            Msg::Tick(_) => {
                self.ctx.step();
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Screen { .. } => None,
        }
    }

    fn draw(&self, canvas: &mut Canvas) {
        self.draw_grid(canvas);
        self.draw_panel(canvas);
        self.draw_status(canvas);
    }

    fn tick_rate(&self) -> Option<Duration> {
        self.ctx.is_running().then_some(self.step_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_search::Status;

    fn visualizer(rows: i32, cols: i32) -> Visualizer {
        let settings = Settings {
            bounds: pathlab_core::Bounds::new(rows, cols),
            seed: Some(7),
            ..Settings::default()
        };
        Visualizer::new(&settings)
    }

    fn click(v: &mut Visualizer, action: MouseAction, row: i32, col: i32) {
        v.update(Msg::mouse(action, Point::new(col * CELL_WIDTH, row)));
    }

    fn press(v: &mut Visualizer, c: char) -> Option<Effect> {
        v.update(Msg::key(Key::Char(c)))
    }

    #[test]
    fn two_columns_per_cell() {
        let v = visualizer(5, 5);
        assert_eq!(v.cell_at(Point::new(0, 0)), Some(Cell::new(0, 0)));
        assert_eq!(v.cell_at(Point::new(1, 0)), Some(Cell::new(0, 0)));
        assert_eq!(v.cell_at(Point::new(2, 3)), Some(Cell::new(3, 1)));
        assert_eq!(v.cell_at(Point::new(10, 0)), None);
        assert_eq!(v.cell_at(Point::new(0, 5)), None);
        assert_eq!(v.cell_at(Point::new(-1, 0)), None);
    }

    #[test]
    fn left_clicks_place_start_end_then_walls() {
        let mut v = visualizer(5, 5);
        click(&mut v, MouseAction::Main, 0, 0);
        // Clicking the start again does not make it the end.
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Main, 4, 4);
        click(&mut v, MouseAction::Main, 2, 2);
        let board = v.context().board();
        assert_eq!(board.start(), Some(Cell::new(0, 0)));
        assert_eq!(board.end(), Some(Cell::new(4, 4)));
        assert!(board.is_wall(Cell::new(2, 2)));
        assert_eq!(board.wall_count(), 1);
    }

    #[test]
    fn drag_paints_until_release() {
        let mut v = visualizer(5, 5);
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Drag, 0, 1);
        click(&mut v, MouseAction::Drag, 0, 2);
        click(&mut v, MouseAction::Release, 0, 2);
        click(&mut v, MouseAction::Drag, 0, 3);
        let board = v.context().board();
        // The first click placed the start; drags paint walls.
        assert_eq!(board.start(), Some(Cell::new(0, 0)));
        assert!(board.is_wall(Cell::new(0, 1)));
        assert!(board.is_wall(Cell::new(0, 2)));
        assert!(!board.is_wall(Cell::new(0, 3)));
    }

    #[test]
    fn right_click_removes() {
        let mut v = visualizer(5, 5);
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Main, 1, 1);
        click(&mut v, MouseAction::Main, 2, 2);
        click(&mut v, MouseAction::Secondary, 2, 2);
        click(&mut v, MouseAction::Secondary, 0, 0);
        let board = v.context().board();
        assert_eq!(board.wall_count(), 0);
        assert_eq!(board.start(), None);
        assert_eq!(board.end(), Some(Cell::new(1, 1)));
    }

    #[test]
    fn keys_run_and_ticks_step() {
        let mut v = visualizer(3, 3);
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Main, 2, 2);
        assert_eq!(v.tick_rate(), None);

        press(&mut v, '1');
        assert_eq!(v.context().active(), Some(Algorithm::Bfs));
        assert!(v.tick_rate().is_some());
        let mut ticks = 0;
        while v.context().is_running() {
            v.update(Msg::Tick(std::time::Instant::now()));
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(v.context().status().is_found());
        assert_eq!(v.context().state().path_len(), 2);
        assert_eq!(v.tick_rate(), None);
    }

    #[test]
    fn run_without_endpoints_reports() {
        let mut v = visualizer(3, 3);
        press(&mut v, '4');
        assert_eq!(
            *v.context().status(),
            Status::MissingEndpoints(Algorithm::Dls)
        );
        assert!(!v.context().is_running());
    }

    #[test]
    fn edit_while_running_cancels() {
        let mut v = visualizer(4, 4);
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Main, 3, 3);
        press(&mut v, '2');
        v.update(Msg::Tick(std::time::Instant::now()));
        click(&mut v, MouseAction::Main, 1, 2);
        assert!(!v.context().is_running());
        assert_eq!(*v.context().status(), Status::Cancelled(Algorithm::Dfs));
    }

    #[test]
    fn reset_clear_and_scatter() {
        let mut v = visualizer(10, 10);
        click(&mut v, MouseAction::Main, 0, 0);
        click(&mut v, MouseAction::Main, 9, 9);
        press(&mut v, 'g');
        let walls = v.context().board().wall_count();
        assert!(walls > 0);
        assert_eq!(v.context().board().start(), Some(Cell::new(0, 0)));

        press(&mut v, '3');
        press(&mut v, 'r');
        assert!(!v.context().is_running());
        assert_eq!(*v.context().status(), Status::Idle);
        assert_eq!(v.context().board().wall_count(), walls);

        v.update(Msg::key(Key::Space));
        assert_eq!(v.context().board().wall_count(), 0);
        assert_eq!(v.context().board().endpoints(), None);
    }

    #[test]
    fn quit_keys() {
        let mut v = visualizer(3, 3);
        assert_eq!(press(&mut v, 'q'), Some(Effect::End));
        assert_eq!(v.update(Msg::key(Key::Escape)), Some(Effect::End));
        assert_eq!(press(&mut v, 'x'), None);
    }
}
