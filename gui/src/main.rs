use eframe::egui;
use eframe::egui::{ScrollArea, Ui};
use eframe::run_native;
use life::pattern::{DEFAULT_SEED, PATTERNS};
use life::Session;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const GRID_SIZE: usize = 50;
const CELL_SIZE: f32 = 20.0;
const STEP_INTERVAL: Duration = Duration::from_millis(200);
const RANDOM_DENSITY: f64 = 0.3;

fn main() -> eframe::Result {
    env_logger::init();

    let session = Session::new(GRID_SIZE, &DEFAULT_SEED)
        .map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
    // Shared between the UI and the ticking thread, so edits never race a step
    let shared_session = Arc::new(Mutex::new(session));

    run_native(
        "Game of Life",
        eframe::NativeOptions::default(),
        Box::new(|cc| {
            let ctx = cc.egui_ctx.clone();
            let session_clone = Arc::clone(&shared_session);

            // Advance the grid in the background while the game is running
            thread::spawn(move || loop {
                thread::sleep(STEP_INTERVAL);
                let Ok(mut session) = session_clone.lock() else {
                    log::error!("session lock poisoned, stopping the ticker");
                    break;
                };
                if session.tick() {
                    ctx.request_repaint();
                }
            });

            Ok(Box::new(GuiOfLife::new(cc, shared_session)))
        }),
    )
}

struct GuiOfLife {
    session: Arc<Mutex<Session>>,
}

impl GuiOfLife {
    fn new(_cc: &eframe::CreationContext<'_>, session: Arc<Mutex<Session>>) -> Self {
        Self { session }
    }

    fn controls(session: &mut Session, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui.button("Start").clicked() {
                session.start();
            }
            if ui.button("Stop").clicked() {
                session.stop();
            }
            if ui.button("Next").clicked() {
                session.step();
            }
            if ui.button("Restart").clicked() {
                session.restart();
            }
            if ui.button("Randomize").clicked() {
                session.randomize(RANDOM_DENSITY);
            }
            if ui.button("Clear").clicked() {
                session.clear();
            }

            let current = session.seed();
            egui::ComboBox::from_label("Seed")
                .selected_text(current.name)
                .show_ui(ui, |ui| {
                    for pattern in PATTERNS {
                        let clicked = ui.selectable_label(pattern.name == current.name, pattern.name).clicked();
                        if clicked && pattern.name != current.name {
                            if let Err(err) = session.set_seed(pattern) {
                                log::warn!("cannot seed {}: {err}", pattern.name);
                            }
                        }
                    }
                });
        });

        let status = if session.is_running() { "Game Started" } else { "Game Stopped" };
        ui.label(format!(
            "{status} | generation {} | {} alive",
            session.generation(),
            session.grid().population()
        ));
    }

    fn draw_grid(session: &mut Session, ui: &mut Ui) {
        let size = session.grid().size();

        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(CELL_SIZE * size as f32, CELL_SIZE * size as f32),
            egui::Sense::click(),
        );

        // x picks the row, y the column
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let offset = pos - rect.min;
                let x = (offset.y / CELL_SIZE).floor() as isize;
                let y = (offset.x / CELL_SIZE).floor() as isize;
                if let Err(err) = session.toggle_cell(x, y) {
                    log::warn!("ignored click: {err}");
                }
            }
        }

        let painter = ui.painter();
        for (x, y, cell) in session.grid().iter() {
            let pos = rect.min + egui::vec2(y as f32 * CELL_SIZE, x as f32 * CELL_SIZE);

            let color = if cell.is_alive() {
                egui::Color32::BLACK
            } else {
                egui::Color32::WHITE
            };

            let square = egui::Rect::from_min_size(pos, egui::vec2(CELL_SIZE, CELL_SIZE));
            painter.rect_filled(square, 0.0, color);
            painter.rect_stroke(square, 0.0, egui::Stroke::new(1.0, egui::Color32::BLACK));
        }
    }
}

impl eframe::App for GuiOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let Ok(mut session) = self.session.lock() else {
            log::error!("session lock poisoned, nothing to draw");
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::both().show(ui, |ui| {
                ui.heading("Game of Life");
                Self::controls(&mut session, ui);
                Self::draw_grid(&mut session, ui);
            });
        });
    }
}
