/**
 * PostCraft Review Window - Main Entry Point
 *
 * Native egui window for selective enhancement: pick a span of the draft,
 * ask the rewrite service for a better version, review the inline diff and
 * accept or reject it.
 *
 * Usage: postcraft_app [draft.txt]
 */
use eframe::egui;
use postcraft::client::Config;
use postcraft::egui_app::{state::ReviewState, theme::styles, views};

const SAMPLE_DRAFT: &str = "I love AI. It helps me write posts faster.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&env_filter))
        .init();

    let config = Config::load()?;
    tracing::info!("[STARTUP] Rewrite service at {}", config.enhance_url());

    let draft = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)?,
        None => SAMPLE_DRAFT.to_string(),
    };

    // Rewrite requests run here; egui owns the main thread
    let runtime = tokio::runtime::Runtime::new()?;
    let state = ReviewState::new(config, runtime.handle().clone(), draft)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PostCraft - Enhance",
        options,
        Box::new(move |cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(ReviewApp { state }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct ReviewApp {
    state: ReviewState,
}

impl eframe::App for ReviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_rewrite_results();

        views::render_top_bar(ctx, &self.state);
        views::render_main_panel(ctx, &mut self.state);

        if self.state.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
