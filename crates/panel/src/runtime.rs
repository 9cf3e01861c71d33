//! Tick loop: poll input, navigate, lay out, render, present.

use std::path::Path;
use std::time::Duration;

use platform::config::TICK_PERIOD_MS;
use platform::{DisplaySurface, InputEvent, SurfaceError, SurfaceStatus};
use settings_ui::{Activation, BuildError, Navigator, Screen, ScreenBuilder};
use thiserror::Error;
use tokio::time::MissedTickBehavior;
use touch_emulator::{Emulator, EmulatorError};
use touch_system::prelude::*;

use crate::bootstrap::Hal;
use crate::config::PanelConfig;

/// Runtime failures.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Presenting a frame failed.
    #[error("display: {0}")]
    Surface(#[from] SurfaceError),

    /// A tree operation failed while handling input.
    #[error("ui tree: {0}")]
    Tree(#[from] TreeError),

    /// The settings screen could not be assembled.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// The running panel: HAL, object tree and render state.
pub struct App<S, A> {
    hal: Hal<S>,
    tree: NodeTree,
    screen: Screen,
    navigator: Navigator,
    layout: LayoutMap,
    frame: Framebuffer,
    renderer: Renderer,
    assets: A,
    cursor: Option<ImageSource>,
    pointer: Option<Point>,
    redraw: bool,
    presented: u64,
}

impl<S: DisplaySurface, A: AssetResolver> App<S, A> {
    /// Builds the settings screen from `config` and attaches navigation.
    pub fn new(mut hal: Hal<S>, config: &PanelConfig, assets: A) -> Result<Self, RuntimeError> {
        let size = hal.surface.size();
        let mut tree = NodeTree::new();
        let descriptors = config.descriptors();
        let screen = ScreenBuilder::new()
            .caption(&config.caption)
            .row_style(config.row_variant.style())
            .build(&mut tree, &descriptors)?;

        let group = std::mem::take(&mut hal.group);
        let navigator = Navigator::new(&mut tree, &screen, group)?;
        let layout = compute_layout(&tree, size);
        tree.take_dirty();
        tracing::info!(rows = screen.len(), nodes = tree.len(), "settings screen ready");

        let cursor = hal.cursor().cloned();
        Ok(Self {
            hal,
            tree,
            screen,
            navigator,
            layout,
            frame: Framebuffer::new(size.width, size.height),
            renderer: Renderer::new(),
            assets,
            cursor,
            pointer: None,
            redraw: true,
            presented: 0,
        })
    }

    /// One 10 ms period: drains every device, then redraws if anything
    /// changed.
    pub fn tick(&mut self) -> Result<Vec<Activation>, RuntimeError> {
        let mut activations = Vec::new();

        for indev in &mut self.hal.indevs {
            while let Some(event) = indev.poll() {
                if matches!(event, InputEvent::Key { .. }) && !indev.is_group_bound() {
                    tracing::trace!(kind = indev.kind().name(), "key from ungrouped device dropped");
                    continue;
                }
                if let (InputEvent::Pointer { position, .. }, Some(_)) = (event, indev.cursor()) {
                    if self.pointer != Some(position) {
                        self.pointer = Some(position);
                        self.redraw = true;
                    }
                }

                if let Some(activation) = self.navigator.handle_event(&mut self.tree, &self.layout, event)? {
                    tracing::info!(index = activation.index, title = %activation.title, "setting selected");
                    activations.push(activation);
                }
                // Later events of this tick hit-test against what is now on screen.
                if self.tree.take_dirty() {
                    self.layout = compute_layout(&self.tree, self.hal.surface.size());
                    self.redraw = true;
                }
            }
        }

        if self.redraw {
            self.redraw = false;
            self.draw()?;
        }
        Ok(activations)
    }

    fn draw(&mut self) -> Result<(), RuntimeError> {
        let stats = self
            .renderer
            .render(&self.tree, &self.layout, &mut self.frame, &mut self.assets);
        if let (Some(cursor), Some(position)) = (&self.cursor, self.pointer) {
            self.renderer.draw_cursor(&mut self.frame, cursor, position, &mut self.assets);
        }
        self.hal.surface.present(&self.frame)?;
        self.presented += 1;
        tracing::debug!(
            frame = self.presented,
            nodes = stats.nodes_drawn,
            placeholders = stats.placeholders,
            "frame presented"
        );
        Ok(())
    }

    /// The object tree.
    pub fn tree(&self) -> &NodeTree {
        &self.tree
    }

    /// Handles of the assembled screen.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Focus and scroll state.
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Layout of the last presented frame.
    pub fn layout(&self) -> &LayoutMap {
        &self.layout
    }

    /// Last rendered frame.
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    /// The display surface.
    pub fn surface(&self) -> &S {
        &self.hal.surface
    }

    /// Frames presented so far.
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl<A: AssetResolver> App<Emulator, A> {
    /// Writes the last presented frame as PNG.
    pub fn screenshot(&self, path: &Path) -> Result<(), EmulatorError> {
        self.hal.surface.screenshot(path)
    }
}

/// Drives `app` every [`TICK_PERIOD_MS`] until the surface closes or
/// `max_ticks` have run. Returns the number of ticks.
///
/// Late ticks are skipped rather than bunched up.
pub async fn run<S: DisplaySurface, A: AssetResolver>(
    app: &mut App<S, A>,
    max_ticks: Option<u64>,
) -> Result<u64, RuntimeError> {
    let mut interval = tokio::time::interval(Duration::from_millis(TICK_PERIOD_MS));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut ticks = 0u64;
    loop {
        if max_ticks.is_some_and(|max| ticks >= max) {
            tracing::info!(ticks, "tick limit reached");
            break;
        }
        interval.tick().await;
        if app.hal.surface.pump(Duration::ZERO) == SurfaceStatus::Closed {
            tracing::info!(ticks, "display closed");
            break;
        }
        app.tick()?;
        ticks += 1;
    }
    Ok(ticks)
}
