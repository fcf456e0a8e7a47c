use arboard::Clipboard;
use astar_sandbox::action_log::{Action, ActionLog};
use astar_sandbox::config::Config;
use astar_sandbox::{CellId, Mark, Role, RunOutcome, Sandbox, Tool};
use log::{debug, error, info, warn};
use macroquad::prelude::*;

const TOOLBAR_HEIGHT: f32 = 56.0;

/// Visualization state
struct AppState {
    sandbox: Sandbox,
    config: Config,
    action_log: ActionLog,
    /// Last cell touched during the current drag, so a held button paints each cell once
    last_painted: Option<CellId>,
    status: String,
}

impl AppState {
    fn new(config: Config) -> Result<Self, astar_sandbox::GridError> {
        let sandbox = Sandbox::new(config.grid.cols, config.grid.rows)?
            .with_frontier(config.search.frontier);

        Ok(AppState {
            sandbox,
            config,
            action_log: ActionLog::new(),
            last_painted: None,
            status: "Pick a tool with 1-4 and paint".to_string(),
        })
    }

    fn cell_under_mouse(&self) -> Option<CellId> {
        let (mouse_x, mouse_y) = mouse_position();
        let cell_size = self.config.grid.cell_size;
        if mouse_x < 0.0 || mouse_y < 0.0 {
            return None;
        }

        let id = CellId::new((mouse_x / cell_size) as i32, (mouse_y / cell_size) as i32);
        self.sandbox.grid().contains(id).then_some(id)
    }

    fn select_tool(&mut self, tool: Tool) {
        self.sandbox.select_tool(tool);
        self.action_log.log_finish(Action::SelectTool { tool });
        self.status = format!("Tool: {}", tool.name());
    }

    fn handle_mouse(&mut self) {
        if is_mouse_button_released(MouseButton::Left) {
            self.last_painted = None;
            return;
        }

        let tool = self.sandbox.tool();
        let pressed = is_mouse_button_pressed(MouseButton::Left);
        let dragging = is_mouse_button_down(MouseButton::Left) && tool.paints_on_drag();
        if !pressed && !dragging {
            return;
        }

        let Some(id) = self.cell_under_mouse() else {
            return;
        };
        if self.last_painted == Some(id) {
            return;
        }
        self.last_painted = Some(id);

        let action = Action::Paint { x: id.x, y: id.y, tool };
        self.action_log.log_start(action.clone());
        match self.sandbox.paint(id) {
            Ok(changed) => self.action_log.log_finish_with(action, changed.to_string()),
            Err(e) => warn!("Paint failed at {}: {}", id, e),
        }
    }

    fn run_search(&mut self) {
        let action = Action::FindPath {
            start: self.sandbox.start(),
            end: self.sandbox.end(),
        };
        self.action_log.log_start(action.clone());

        self.status = match self.sandbox.run() {
            Ok(RunOutcome::Found(path)) => {
                self.action_log
                    .log_finish_with(action, format!("{} cells", path.len()));
                format!("Path found: {} cells", path.len())
            }
            Ok(RunOutcome::NoPath) => {
                self.action_log.log_finish_with(action, "no path");
                "No path exists".to_string()
            }
            Ok(RunOutcome::MissingEndpoints) => {
                self.action_log.log_finish_with(action, "missing endpoints");
                "Place a start and an end first".to_string()
            }
            Err(e) => {
                error!("Search failed: {}", e);
                format!("Search failed: {}", e)
            }
        };
    }

    fn clear_marks(&mut self) {
        self.sandbox.clear_marks();
        self.action_log.log_finish(Action::ClearMarks);
        self.status = "Marks cleared".to_string();
    }

    fn reset(&mut self) {
        self.action_log.log_start(Action::Reset);
        match self.sandbox.reset() {
            Ok(()) => {
                self.action_log.log_finish(Action::Reset);
                self.status = "Grid reset".to_string();
            }
            Err(e) => error!("Reset failed: {}", e),
        }
    }

    fn copy_to_clipboard(&mut self) {
        let grid_string = self.sandbox.grid().render_ascii();
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&grid_string) {
                    warn!("Failed to copy to clipboard: {}", e);
                } else {
                    info!("Grid layout copied to clipboard");
                    self.action_log.log_finish(Action::CopyGrid);
                    self.status = "Grid copied to clipboard".to_string();
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => warn!("Failed to access clipboard: {}", e),
        }
    }

    fn cell_color(&self, id: CellId) -> Color {
        let Some(cell) = self.sandbox.grid().cell(id) else {
            return BLACK;
        };

        if cell.is_frame() {
            return Color::from_rgba(90, 90, 90, 255);
        }
        match (cell.role(), cell.mark()) {
            (Role::Start, _) => BLUE,
            (Role::End, _) => RED,
            (Role::Wall, _) => WHITE,
            (_, Mark::Path) => GREEN,
            (_, Mark::Visited) if self.config.visual.show_visited => YELLOW,
            _ => Color::from_rgba(45, 45, 50, 255),
        }
    }

    fn draw(&self) {
        let visual = &self.config.visual;
        clear_background(Color::from_rgba(
            visual.background_r,
            visual.background_g,
            visual.background_b,
            255,
        ));

        let grid = self.sandbox.grid();
        let cell_size = self.config.grid.cell_size;
        for cell in grid.cells() {
            let id = cell.id();
            draw_rectangle(
                id.x as f32 * cell_size,
                id.y as f32 * cell_size,
                cell_size - 1.0,
                cell_size - 1.0,
                self.cell_color(id),
            );
        }

        let toolbar_y = grid.height() as f32 * cell_size;
        let tools = Tool::ALL
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if *t == self.sandbox.tool() {
                    format!("[{} {}]", i + 1, t.name())
                } else {
                    format!(" {} {} ", i + 1, t.name())
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        draw_text(
            &format!("{}   Space: run  X: clear  R: reset  C: copy  Esc: quit", tools),
            10.0,
            toolbar_y + 22.0,
            20.0,
            WHITE,
        );
        draw_text(&self.status, 10.0, toolbar_y + 46.0, 20.0, LIGHTGRAY);
    }

    fn finish(&self) {
        if self.action_log.actions().is_empty() {
            info!("No actions recorded this session");
            return;
        }

        info!("{}", self.action_log.summary());
        for (action, ms) in self.action_log.durations() {
            debug!("{:?} took {}ms", action, ms);
        }
        if self.config.logging.enable_action_log {
            if let Err(e) = self
                .action_log
                .save_to_file(&self.config.logging.action_log_path)
            {
                warn!("Failed to save action log: {}", e);
            }
        }
    }
}

fn window_conf() -> Conf {
    // Runs before main, so this is where logging gets installed
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let config = Config::load();
    Conf {
        window_title: config.visual.window_title.clone(),
        window_width: (config.grid.cols as f32 * config.grid.cell_size) as i32,
        window_height: (config.grid.rows as f32 * config.grid.cell_size + TOOLBAR_HEIGHT) as i32,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut state = match AppState::new(Config::load()) {
        Ok(state) => state,
        Err(e) => {
            error!("Cannot start sandbox: {}", e);
            return;
        }
    };

    let tool_keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];

    loop {
        for (key, tool) in tool_keys.iter().zip(Tool::ALL) {
            if is_key_pressed(*key) {
                state.select_tool(tool);
            }
        }

        state.handle_mouse();

        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter) {
            state.run_search();
        }
        if is_key_pressed(KeyCode::X) {
            state.clear_marks();
        }
        if is_key_pressed(KeyCode::R) {
            state.reset();
        }
        if is_key_pressed(KeyCode::C) {
            state.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        state.draw();

        next_frame().await
    }

    state.finish();
}
