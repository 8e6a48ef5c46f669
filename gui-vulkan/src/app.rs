use std::time::{Duration, Instant};

use life::pattern::DEFAULT_SEED;
use life::{Cell, Session};
use winit::dpi::PhysicalSize;

use crate::font::{draw_text, push_rect, text_height, text_width, to_ndc, to_ndc_y, Rect};
use crate::renderer::{CellInstance, Vertex};

pub const GRID_SIZE: usize = 100;
const STEP_INTERVAL: Duration = Duration::from_millis(200);
const UI_HEIGHT: f32 = 90.0;
const BUTTON_WIDTH: f32 = 150.0;
const BUTTON_HEIGHT: f32 = 44.0;
const BUTTON_PADDING: f32 = 24.0;
const BUTTON_VERTICAL_OFFSET: f32 = 12.0;
const TEXT_SCALE_HEADING: f32 = 5.0;
const TEXT_SCALE_STATUS: f32 = 2.0;
const TEXT_SCALE_BUTTON: f32 = 3.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    ToggleRunning,
    Step,
    Restart,
    Clear,
}

/// Where the grid sits inside the window, in pixels.
struct GridLayout {
    origin: [f32; 2],
    cell_size: f32,
}

impl GridLayout {
    fn new(window_size: [f32; 2], cells: usize) -> Self {
        let [width, height] = window_size;
        let usable_height = (height - UI_HEIGHT).max(1.0);
        let cell_size = (width / cells as f32).min(usable_height / cells as f32).max(1.0);
        let extent = cell_size * cells as f32;
        Self {
            origin: [(width - extent) * 0.5, UI_HEIGHT + (usable_height - extent) * 0.5],
            cell_size,
        }
    }

    /// The `(x, y)` grid position under `point`. Rows run down the window.
    fn cell_at(&self, point: [f32; 2]) -> (isize, isize) {
        let x = ((point[1] - self.origin[1]) / self.cell_size).floor() as isize;
        let y = ((point[0] - self.origin[0]) / self.cell_size).floor() as isize;
        (x, y)
    }

    fn cell_rect(&self, x: usize, y: usize) -> Rect {
        let left = self.origin[0] + y as f32 * self.cell_size;
        let top = self.origin[1] + x as f32 * self.cell_size;
        Rect {
            min: [left, top],
            max: [left + self.cell_size, top + self.cell_size],
        }
    }
}

pub struct GameOfLifeApp {
    session: Session,
    last_step: Instant,
    window_size: PhysicalSize<u32>,
    pub cursor_position: Option<[f32; 2]>,
    instances: Vec<CellInstance>,
    ui_vertices: Vec<Vertex>,
}

impl GameOfLifeApp {
    pub fn new(window_size: PhysicalSize<u32>) -> anyhow::Result<Self> {
        Ok(Self {
            session: Session::new(GRID_SIZE, &DEFAULT_SEED)?,
            last_step: Instant::now(),
            window_size,
            cursor_position: None,
            instances: Vec::with_capacity(GRID_SIZE * GRID_SIZE),
            ui_vertices: Vec::with_capacity(2048),
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        self.window_size = size;
    }

    pub fn update(&mut self) {
        if self.last_step.elapsed() >= STEP_INTERVAL {
            self.session.tick();
            self.last_step = Instant::now();
        }
    }

    pub fn perform(&mut self, action: Action) {
        match action {
            Action::ToggleRunning => {
                self.session.toggle_running();
                self.last_step = Instant::now();
            }
            Action::Step => self.session.step(),
            Action::Restart => self.session.restart(),
            Action::Clear => self.session.clear(),
        }
    }

    pub fn handle_click(&mut self, position: [f32; 2]) {
        let pressed = self
            .buttons()
            .into_iter()
            .find(|(_, _, rect)| rect.contains(position))
            .map(|(action, _, _)| action);
        if let Some(action) = pressed {
            self.perform(action);
            return;
        }

        let layout = self.layout();
        let (x, y) = layout.cell_at(position);
        match self.session.toggle_cell(x, y) {
            Ok(cell) => log::debug!("cell ({x}, {y}) is now {cell:?}"),
            // clicks beside the grid land here
            Err(err) => log::trace!("ignored click: {err}"),
        }
    }

    fn window_extent(&self) -> [f32; 2] {
        [self.window_size.width.max(1) as f32, self.window_size.height.max(1) as f32]
    }

    fn layout(&self) -> GridLayout {
        GridLayout::new(self.window_extent(), self.session.grid().size())
    }

    /// Header buttons laid out right to left.
    fn buttons(&self) -> Vec<(Action, &'static str, Rect)> {
        let play_label = if self.session.is_running() { "Stop" } else { "Start" };
        let entries = [
            (Action::Clear, "Clear"),
            (Action::Restart, "Restart"),
            (Action::Step, "Step"),
            (Action::ToggleRunning, play_label),
        ];

        let right = self.window_extent()[0] - BUTTON_PADDING;
        let top = BUTTON_PADDING + BUTTON_VERTICAL_OFFSET;
        entries
            .into_iter()
            .enumerate()
            .map(|(index, (action, label))| {
                let max_x = right - index as f32 * (BUTTON_WIDTH + BUTTON_PADDING);
                let rect = Rect {
                    min: [max_x - BUTTON_WIDTH, top],
                    max: [max_x, top + BUTTON_HEIGHT],
                };
                (action, label, rect)
            })
            .collect()
    }

    pub fn build_frame(&mut self) -> (&[CellInstance], &[Vertex]) {
        self.instances.clear();
        self.ui_vertices.clear();

        let window = self.window_extent();
        let [width, height] = window;
        let layout = self.layout();

        for (x, y, cell) in self.session.grid().iter() {
            let rect = layout.cell_rect(x, y);
            let color = match cell {
                Cell::Alive => [0.95, 0.95, 0.95],
                Cell::Dead => [0.18, 0.18, 0.22],
            };
            self.instances.push(CellInstance {
                min: [to_ndc(rect.min[0], width), to_ndc_y(rect.min[1], height)],
                max: [to_ndc(rect.max[0], width), to_ndc_y(rect.max[1], height)],
                color,
                _pad: 0.0,
            });
        }

        let header_line = Rect {
            min: [0.0, UI_HEIGHT - 4.0],
            max: [width, UI_HEIGHT],
        };
        push_rect(&mut self.ui_vertices, header_line, [0.15, 0.15, 0.2], window);

        draw_text(
            &mut self.ui_vertices,
            "Game of Life",
            [BUTTON_PADDING, BUTTON_PADDING],
            TEXT_SCALE_HEADING,
            [0.9, 0.9, 0.95],
            window,
        );
        let status = format!("Gen {}", self.session.generation());
        draw_text(
            &mut self.ui_vertices,
            &status,
            [BUTTON_PADDING, BUTTON_PADDING + (text_height() + 2.0) * TEXT_SCALE_HEADING],
            TEXT_SCALE_STATUS,
            [0.6, 0.6, 0.7],
            window,
        );

        for (_, label, rect) in self.buttons() {
            let hovered = self.cursor_position.is_some_and(|pos| rect.contains(pos));
            let color = if hovered { [0.35, 0.45, 0.75] } else { [0.25, 0.33, 0.55] };
            push_rect(&mut self.ui_vertices, rect, color, window);

            let origin_x = rect.min[0] + (rect.width() - text_width(label) * TEXT_SCALE_BUTTON) * 0.5;
            let origin_y = rect.min[1] + (rect.height() - text_height() * TEXT_SCALE_BUTTON) * 0.5;
            draw_text(
                &mut self.ui_vertices,
                label,
                [origin_x, origin_y],
                TEXT_SCALE_BUTTON,
                [0.95, 0.95, 0.98],
                window,
            );
        }

        (&self.instances, &self.ui_vertices)
    }
}
