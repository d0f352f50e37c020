//! The editor state machine.
//!
//! [`ImageEditor`] owns the drawing surface, the current [`FilterState`] and the
//! loaded image, and keeps the surface in sync with them.
//!
//! # Phases
//!
//! ```text
//! Idle --load--> Loaded --set_filter--> Editing --save--> Saved
//!                  ^                                        |
//!                  +-------------- load (any phase) --------+
//! ```
//!
//! Any parameter change from `Saved` re-renders and moves to `Editing`.
//!
//! # Overlapping Loads
//!
//! Reading a file is asynchronous on the host side, so two uploads can be in
//! flight at once. Each load is tagged with a [`LoadToken`] from
//! [`ImageEditor::begin_load`]; only the most recently started load may
//! complete, and results carrying an older token are discarded.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::EditorConfig;
use crate::decode::{decode_image, fit_within, DecodeError, DisplayGeometry, LoadedImage};
use crate::export::{export_surface, ExportError, ExportedImage};
use crate::filters::FilterChain;
use crate::render::render;
use crate::surface::{Surface, SurfaceError};
use crate::{FilterParam, FilterState, UnknownFilterError};

/// Errors reported by [`ImageEditor`] operations.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    UnknownFilter(#[from] UnknownFilterError),

    /// The value has no position in the parameter's range (NaN).
    #[error("Invalid value for {param}: {value}")]
    InvalidValue { param: FilterParam, value: f64 },
}

/// Where the editor is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorPhase {
    /// No image has been loaded.
    #[default]
    Idle,
    /// An image was just loaded and drawn.
    Loaded,
    /// A parameter changed since the last load or save.
    Editing,
    /// The image was exported; the surface is blank until the next change.
    Saved,
}

/// Generation tag handed out by [`ImageEditor::begin_load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of completing a load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOutcome {
    /// The image replaced the previous one and was drawn at this geometry.
    Loaded(DisplayGeometry),
    /// The user dismissed the file picker; nothing changed.
    NoSelection,
    /// A newer load was started in the meantime; this result was dropped.
    Superseded,
}

/// Interactive image editor bound to a drawing surface.
#[derive(Debug)]
pub struct ImageEditor<S: Surface> {
    surface: S,
    config: EditorConfig,
    filters: FilterState,
    image: Option<LoadedImage>,
    geometry: Option<DisplayGeometry>,
    phase: EditorPhase,
    generation: u64,
}

impl<S: Surface> ImageEditor<S> {
    /// Create an editor with the default config.
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, EditorConfig::default())
    }

    pub fn with_config(surface: S, config: EditorConfig) -> Self {
        Self {
            surface,
            config,
            filters: FilterState::initial(),
            image: None,
            geometry: None,
            phase: EditorPhase::Idle,
            generation: 0,
        }
    }

    /// Start a new load, superseding any load still in flight.
    pub fn begin_load(&mut self) -> LoadToken {
        self.generation += 1;
        LoadToken(self.generation)
    }

    /// Complete the load started with `token`.
    ///
    /// `bytes` is `None` when no file was selected. On a decode failure the
    /// error is returned and the editor is left exactly as it was. A decoded
    /// image becomes current before it is drawn, so if drawing fails the new
    /// image and geometry stay in place and the next change redraws them.
    pub fn finish_load(
        &mut self,
        token: LoadToken,
        bytes: Option<&[u8]>,
    ) -> Result<LoadOutcome, EditorError> {
        if token.0 != self.generation {
            warn!(
                "discarding load {} superseded by load {}",
                token.0, self.generation
            );
            return Ok(LoadOutcome::Superseded);
        }

        let Some(bytes) = bytes else {
            debug!("load {} finished without a file", token.0);
            return Ok(LoadOutcome::NoSelection);
        };

        let image = decode_image(bytes).inspect_err(|e| {
            warn!("failed to decode upload of {} bytes: {}", bytes.len(), e);
        })?;

        let geometry = fit_within(
            image.natural_width(),
            image.natural_height(),
            self.config.bounds(),
        );
        debug!(
            "loaded {}x{} image, displayed at {}x{}",
            image.natural_width(),
            image.natural_height(),
            geometry.width,
            geometry.height
        );

        self.image = Some(image);
        self.geometry = Some(geometry);
        self.phase = EditorPhase::Loaded;
        self.draw()?;
        Ok(LoadOutcome::Loaded(geometry))
    }

    /// Decode and display `bytes` in one step.
    pub fn load(&mut self, bytes: &[u8]) -> Result<LoadOutcome, EditorError> {
        let token = self.begin_load();
        self.finish_load(token, Some(bytes))
    }

    /// Set one parameter and redraw.
    ///
    /// The value is clamped into the parameter's range; the stored value is
    /// returned. Without an image only the state changes. The value stays
    /// stored even when the redraw fails.
    pub fn set_filter(&mut self, param: FilterParam, value: f64) -> Result<f64, EditorError> {
        let stored = self
            .filters
            .set(param, value)
            .ok_or(EditorError::InvalidValue { param, value })?;
        self.rerender()?;
        Ok(stored)
    }

    /// Set a parameter by its control name, e.g. `"brightness"`.
    pub fn set_filter_by_name(&mut self, name: &str, value: f64) -> Result<f64, EditorError> {
        let param: FilterParam = name.parse()?;
        self.set_filter(param, value)
    }

    /// Replace every parameter at once and redraw.
    pub fn set_filters(&mut self, filters: FilterState) -> Result<(), EditorError> {
        self.filters = filters;
        self.rerender()
    }

    /// Encode the current surface contents without changing any state.
    pub fn export(&self) -> Result<ExportedImage, EditorError> {
        Ok(export_surface(
            &self.surface,
            &self.config.file_name,
            self.config.format,
        )?)
    }

    /// Finish a save: blank the surface and reset the parameters.
    ///
    /// The loaded image is kept, so the next parameter change draws it again.
    pub fn complete_save(&mut self) {
        self.surface.clear();
        self.filters = FilterState::post_export();
        if self.image.is_some() {
            self.phase = EditorPhase::Saved;
        }
    }

    /// Export the surface, then blank it and reset the parameters.
    pub fn save(&mut self) -> Result<ExportedImage, EditorError> {
        let exported = self.export()?;
        self.complete_save();
        Ok(exported)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    /// Display geometry of the loaded image.
    pub fn geometry(&self) -> Option<DisplayGeometry> {
        self.geometry
    }

    /// Filter chain the current parameters compose to.
    pub fn filter_chain(&self) -> FilterChain {
        FilterChain::from_state(&self.filters)
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn rerender(&mut self) -> Result<(), EditorError> {
        if self.image.is_none() {
            return Ok(());
        }
        self.phase = EditorPhase::Editing;
        self.draw()
    }

    /// Draw the current image with the current parameters.
    fn draw(&mut self) -> Result<(), EditorError> {
        let Some(image) = &self.image else {
            return Ok(());
        };
        let geometry = render(&mut self.surface, image, &self.filters, self.config.bounds())?;
        self.geometry = Some(geometry);
        Ok(())
    }
}
