//! src/app.rs
//!
//! Live bandwidth monitor.
//!
//! Builds the shared monitor state, starts the sampling thread, and runs
//! either the full-screen UI or the compact header loop until the user quits.
//!
//! # Keyboard Controls
//!
//! - **q** / **Esc** / **Ctrl+C**: quit and restore the terminal.
//! - **p** / **space**: pause or resume sampling into the chart.
//! - **r**: clear the chart and the session statistics.
//! - **s**: show or hide the status bar.
//! - **m**: toggle split and overlay layouts.
//! - **l**: cycle linear, logarithmic and square-root scaling.
//! - **t**: cycle the time window (1, 3, 5, 10, 15, 30, 60 minutes).
//!
//! # Compact Mode
//!
//! `netpeaks --compact` pins a `--size`-line chart to the top of the terminal
//! and confines scrolling to the rows below it. Only the quit keys apply.

use std::io::{Write, stdout};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, queue, style::Print, terminal};
use ratatui::layout::Constraint;

use crate::chart::MIN_CHART_HEIGHT;
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::monitor::{MonitorShared, SharedMonitor, history_capacity, spawn_sampler};
use crate::panels::{ChartPanel, HELP_HEIGHT, HelpPanel, STATUS_BAR_HEIGHT, StatusPanel};
use crate::sampler::{DemoSampler, NetworkSampler, Sampler};
use crate::ui::{Node, leaf, rows};

/// What the main loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Apply one key press to the monitor.
pub fn handle_key(monitor: &mut MonitorShared, key: KeyEvent) -> KeyAction {
    if key.kind != KeyEventKind::Press {
        return KeyAction::Continue;
    }
    if is_quit(&key) {
        return KeyAction::Quit;
    }
    match key.code {
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            monitor.toggle_pause();
        }
        KeyCode::Char('r') => monitor.reset(),
        KeyCode::Char('s') => monitor.show_statusbar = !monitor.show_statusbar,
        KeyCode::Char('m') => {
            let mode = monitor.chart.toggle_display_mode();
            tracing::info!(mode = mode.name(), "display mode changed");
        }
        KeyCode::Char('l') => {
            let mode = monitor.chart.cycle_scaling_mode();
            tracing::info!(mode = mode.name(), "scaling mode changed");
        }
        KeyCode::Char('t') => {
            let scale = monitor.chart.cycle_time_scale();
            tracing::info!(scale = scale.name(), "time scale changed");
        }
        _ => {}
    }
    KeyAction::Continue
}

/// Chart rows left after the help line and optional status bar.
pub fn chart_height(terminal_height: u16, show_statusbar: bool) -> u16 {
    let status = if show_statusbar { STATUS_BAR_HEIGHT } else { 0 };
    terminal_height
        .saturating_sub(HELP_HEIGHT + status)
        .max(MIN_CHART_HEIGHT as u16)
}

fn layout(shared: &SharedMonitor, terminal_height: u16, show_statusbar: bool) -> Node {
    let mut children = vec![(
        Constraint::Length(chart_height(terminal_height, show_statusbar)),
        leaf(ChartPanel::new(shared.clone())),
    )];
    if show_statusbar {
        children.push((
            Constraint::Length(STATUS_BAR_HEIGHT),
            leaf(StatusPanel::new(shared.clone())),
        ));
    }
    children.push((Constraint::Length(HELP_HEIGHT), leaf(HelpPanel::new())));
    rows(children)
}

fn make_sampler(settings: &Settings) -> Box<dyn Sampler> {
    if settings.demo {
        tracing::info!("using demo sampler");
        Box::new(DemoSampler::new())
    } else {
        Box::new(NetworkSampler::new())
    }
}

/// Build the monitor from `settings` and run until the user quits.
pub fn run(settings: Settings) -> Result<()> {
    let shared = MonitorShared::new_shared(history_capacity(settings.interval), settings.interval);
    {
        let mut m = shared
            .write()
            .map_err(|_| Error::terminal("monitor state poisoned"))?;
        m.chart.set_display_mode(settings.display_mode);
        m.chart.set_scaling_mode(settings.scaling_mode);
        m.chart.set_time_scale(settings.time_scale);
        m.show_statusbar = settings.show_statusbar;
    }
    tracing::info!(?settings, "starting monitor");

    let stop = Arc::new(AtomicBool::new(false));
    let sampler = spawn_sampler(
        shared.clone(),
        make_sampler(&settings),
        settings.interval,
        stop.clone(),
    );

    let result = if settings.compact {
        run_compact(&shared, &settings)
    } else {
        run_tui(&shared, &settings)
    };

    stop.store(true, Ordering::Relaxed);
    if sampler.join().is_err() {
        tracing::error!("sampler thread panicked");
    }
    result
}

/// Wait up to `timeout` for input and apply every pending key.
fn drain_keys(shared: &SharedMonitor, timeout: Duration) -> Result<KeyAction> {
    let mut wait = timeout;
    while event::poll(wait)? {
        wait = Duration::ZERO;
        if let Event::Key(key) = event::read()? {
            let mut m = shared
                .write()
                .map_err(|_| Error::terminal("monitor state poisoned"))?;
            if handle_key(&mut m, key) == KeyAction::Quit {
                return Ok(KeyAction::Quit);
            }
        }
    }
    Ok(KeyAction::Continue)
}

fn run_tui(shared: &SharedMonitor, settings: &Settings) -> Result<()> {
    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        loop {
            let frame_start = Instant::now();
            let show_statusbar = shared
                .read()
                .map_err(|_| Error::terminal("monitor state poisoned"))?
                .show_statusbar;
            let height = terminal.size()?.height;
            let root = layout(shared, height, show_statusbar);
            terminal.draw(|f| root.draw(f, f.area()))?;

            let remaining = settings.interval.saturating_sub(frame_start.elapsed());
            if drain_keys(shared, remaining)? == KeyAction::Quit {
                return Ok(());
            }
        }
    })();
    ratatui::restore();
    result
}

/// Move the top `size` rows out of the scroll region and clear the screen.
fn reserve_header(out: &mut impl Write, size: u16, height: u16) -> Result<()> {
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        Print(format!("\x1b[{};{}r", size + 1, height)),
        cursor::MoveTo(0, size)
    )?;
    out.flush()?;
    Ok(())
}

fn release_header(out: &mut impl Write, size: u16, height: u16) -> Result<()> {
    queue!(out, Print(format!("\x1b[1;{height}r")))?;
    for row in 0..size {
        queue!(
            out,
            cursor::MoveTo(0, row),
            terminal::Clear(terminal::ClearType::CurrentLine)
        )?;
    }
    queue!(out, cursor::MoveTo(0, size))?;
    out.flush()?;
    Ok(())
}

fn paint_header(out: &mut impl Write, text: &str) -> Result<()> {
    queue!(out, cursor::SavePosition)?;
    for (row, line) in text.split('\n').enumerate() {
        queue!(
            out,
            cursor::MoveTo(0, row as u16),
            terminal::Clear(terminal::ClearType::CurrentLine),
            Print(line)
        )?;
    }
    queue!(out, cursor::RestorePosition)?;
    out.flush()?;
    Ok(())
}

fn run_compact(shared: &SharedMonitor, settings: &Settings) -> Result<()> {
    let size = settings.compact_size.min(u16::MAX as usize - 1) as u16;
    let mut out = stdout();
    let (mut width, mut height) = terminal::size()?;

    terminal::enable_raw_mode()?;
    reserve_header(&mut out, size, height)?;
    tracing::info!(size, width, height, "compact header reserved");

    let result = (|| -> Result<()> {
        loop {
            let frame_start = Instant::now();
            let text = shared
                .read()
                .map_err(|_| Error::terminal("monitor state poisoned"))?
                .chart
                .render_compact(width as usize, size as usize);
            paint_header(&mut out, &text)?;

            let mut wait = settings.interval.saturating_sub(frame_start.elapsed());
            while event::poll(wait)? {
                wait = Duration::ZERO;
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press && is_quit(&key) => {
                        return Ok(());
                    }
                    Event::Resize(w, h) => {
                        (width, height) = (w, h);
                        reserve_header(&mut out, size, height)?;
                    }
                    _ => {}
                }
            }
        }
    })();

    let restored = release_header(&mut out, size, height);
    terminal::disable_raw_mode()?;
    result.and(restored)
}
