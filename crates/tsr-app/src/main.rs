// ABOUTME: Main application entry point.
// ABOUTME: Builds the pane layout, follows terminal resizes and prints pane geometry.

mod screen;

use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use tsr_core::{Config, Geometry};
use tsr_layout::{LayoutContext, PaneId, RedrawScheduler, Skeleton};

/// Rows the message line grows to when a long message is shown
const LONG_MESSAGE_ROWS: u16 = 3;

/// Pending repaint work, filled in by reflow reports
#[derive(Debug, Default)]
struct RedrawState {
    full: bool,
    flow: bool,
}

impl RedrawScheduler for RedrawState {
    fn mark_full(&mut self) {
        self.full = true;
    }

    fn mark_flow(&mut self) {
        self.flow = true;
    }
}

#[derive(Serialize)]
struct PaneSnapshot<'a> {
    name: &'a str,
    depth: usize,
    visible: bool,
    geometry: Geometry,
}

struct App {
    config: Config,
    layout: LayoutContext,
    skeleton: Skeleton,
    redraw: RedrawState,
    json: bool,
}

impl App {
    fn new(json: bool) -> Result<Self> {
        let config = Config::load_or_default();
        tracing::info!(
            "Loaded config: help={}, sidebar_visible={}, wrap={}",
            config.layout.help,
            config.layout.sidebar_visible,
            config.wrap
        );

        let mut layout = LayoutContext::new();
        let skeleton = Skeleton::build(&mut layout, &config.layout)?;

        Ok(Self {
            config,
            layout,
            skeleton,
            redraw: RedrawState::default(),
            json,
        })
    }

    fn resize(&mut self) {
        let (rows, cols) = screen::terminal_size();
        if let Some(report) = self.layout.resize(rows, cols) {
            tracing::info!(
                "Resized to {}x{}, {} panes changed",
                cols,
                rows,
                report.changed.len()
            );
            report.schedule(&mut self.redraw);
        }
    }

    fn reload_config(&mut self) -> Result<()> {
        let config = Config::load_or_default();
        if config == self.config {
            tracing::info!("Config unchanged");
            return Ok(());
        }

        self.skeleton.apply(&mut self.layout, &config.layout)?;
        self.config = config;
        let report = self.layout.reflow(self.layout.root());
        tracing::info!("Config reloaded, {} panes changed", report.changed.len());
        report.schedule(&mut self.redraw);
        Ok(())
    }

    fn toggle_pager(&mut self) {
        let showing = self.layout.is_visible(self.skeleton.pager_panel);
        self.skeleton.show_pager(&mut self.layout, !showing);
        let report = self.layout.reflow(self.skeleton.panels);
        report.schedule(&mut self.redraw);
    }

    fn show_long_message(&mut self) {
        let report = self
            .skeleton
            .reflow_message_rows(&mut self.layout, LONG_MESSAGE_ROWS);
        report.schedule(&mut self.redraw);
    }

    fn depth(&self, id: PaneId) -> usize {
        let mut depth = 0;
        let mut cursor = self.layout.parent(id);
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.layout.parent(parent);
        }
        depth
    }

    fn draw(&mut self) -> Result<()> {
        if !self.redraw.full {
            return Ok(());
        }

        let snapshots: Vec<PaneSnapshot> = self
            .layout
            .walk(self.layout.root())
            .into_iter()
            .filter_map(|id| {
                let pane = self.layout.pane(id)?;
                Some(PaneSnapshot {
                    name: pane.name(),
                    depth: self.depth(id),
                    visible: pane.is_visible(),
                    geometry: pane.geometry(),
                })
            })
            .collect();

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if self.json {
            writeln!(out, "{}", serde_json::to_string_pretty(&snapshots)?)?;
        } else {
            for snap in &snapshots {
                let g = snap.geometry;
                writeln!(
                    out,
                    "{:indent$}{:<14} {:>3}x{:<3} @ {},{}{}",
                    "",
                    snap.name,
                    g.cols,
                    g.rows,
                    g.row_offset,
                    g.col_offset,
                    if snap.visible { "" } else { " (hidden)" },
                    indent = snap.depth * 2
                )?;
            }
        }

        if self.redraw.flow {
            let content = self.skeleton.content(&self.layout);
            if let Some(wrap) = self.layout.wrap_cols(content, self.config.wrap) {
                writeln!(out, "wrap column: {}", wrap)?;
            }
        }
        out.flush()?;

        self.redraw = RedrawState::default();
        Ok(())
    }
}

#[cfg(unix)]
async fn run(app: &mut App) -> Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut winch = signal(SignalKind::window_change())?;
    let mut hangup = signal(SignalKind::hangup())?;
    let mut usr1 = signal(SignalKind::user_defined1())?;
    let mut usr2 = signal(SignalKind::user_defined2())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    // No SIGWINCH is delivered while stopped, so resuming re-reads the size
    let mut cont = signal(SignalKind::from_raw(libc::SIGCONT))?;

    loop {
        tokio::select! {
            _ = winch.recv() => app.resize(),
            _ = cont.recv() => app.resize(),
            _ = hangup.recv() => app.reload_config()?,
            _ = usr1.recv() => app.toggle_pager(),
            _ = usr2.recv() => app.show_long_message(),
            _ = interrupt.recv() => {
                tracing::info!("Interrupted, exiting");
                break;
            }
        }
        app.draw()?;
    }
    Ok(())
}

#[cfg(not(unix))]
async fn run(_app: &mut App) -> Result<()> {
    tokio::signal::ctrl_c().await?;
    tracing::info!("Interrupted, exiting");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    tracing::info!("Starting tessera");

    let json = std::env::args().skip(1).any(|arg| arg == "--json");
    let mut app = App::new(json)?;
    app.resize();
    app.draw()?;

    run(&mut app).await?;

    app.layout.free_all();
    Ok(())
}
