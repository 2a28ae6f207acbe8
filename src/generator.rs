//! Batch generation of invitation cards.
//!
//! [`GeneratorBuilder`] collects the runtime knobs (fonts, paper presets,
//! overflow policy, executor) and produces a [`CardGenerator`]. The generator
//! resolves the paper size and plans the card once per batch, then renders
//! each participant as an independent job owning its own canvas.

use crate::config::EventConfig;
use crate::error::PipelineError;
use crate::output::{card_path, ensure_output_dir};
use cardfit_executor::ExecutorImpl;
use cardfit_layout::{
    FontLibrary, LayoutConfig, LayoutEngine, LayoutPlan, OverflowPolicy, PaperProfile,
    PaperSizeRegistry, PaperSpec, ScaleProfile,
};
use cardfit_render::RasterCanvas;
use cardfit_traits::{Executor, FontProvider};
use cardfit_types::{CardContent, Participant, Size};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// A card that was written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCard {
    pub participant: String,
    pub file_path: PathBuf,
    pub width_px: u32,
    pub height_px: u32,
}

impl RenderedCard {
    pub fn size(&self) -> Size {
        Size::new(self.width_px, self.height_px)
    }
}

/// A participant whose card could not be produced.
#[derive(Debug)]
pub struct CardFailure {
    pub participant: String,
    pub error: PipelineError,
}

/// Outcome of one batch. Cards and failures keep the participants' order.
#[derive(Debug)]
pub struct BatchReport {
    pub paper: PaperProfile,
    pub output_folder: PathBuf,
    pub cards: Vec<RenderedCard>,
    pub failures: Vec<CardFailure>,
}

impl BatchReport {
    /// Number of cards written.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Dimensions shared by every card of the batch, if any was written.
    pub fn card_size(&self) -> Option<Size> {
        self.cards.first().map(RenderedCard::size)
    }
}

/// Builds a [`CardGenerator`].
#[derive(Debug)]
pub struct GeneratorBuilder {
    registry: PaperSizeRegistry,
    providers: Vec<Arc<dyn FontProvider>>,
    font_dirs: Vec<PathBuf>,
    system_fonts: bool,
    layout: LayoutConfig,
    executor: ExecutorImpl,
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self {
            registry: PaperSizeRegistry::default(),
            providers: Vec::new(),
            font_dirs: Vec::new(),
            system_fonts: false,
            layout: LayoutConfig::default(),
            executor: ExecutorImpl::default(),
        }
    }
}

impl GeneratorBuilder {
    /// Starts with the built-in paper presets, no fonts and the default executor.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces the paper presets, e.g. with one extended through
    /// [`PaperSizeRegistry::with_preset`].
    pub fn with_paper_registry(mut self, registry: PaperSizeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Scans the host for installed fonts when the generator is built.
    pub fn with_system_fonts(mut self, system_fonts: bool) -> Self {
        self.system_fonts = system_fonts;
        self
    }

    /// Adds every font file under `path`.
    pub fn with_font_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.font_dirs.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds a font provider consulted before any font directory.
    pub fn with_font_provider(mut self, provider: Arc<dyn FontProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn with_overflow_policy(mut self, overflow: OverflowPolicy) -> Self {
        self.layout.overflow = overflow;
        self
    }

    pub fn with_executor(mut self, executor: ExecutorImpl) -> Self {
        self.executor = executor;
        self
    }

    pub fn build(self) -> CardGenerator {
        let fonts = self
            .providers
            .into_iter()
            .fold(FontLibrary::new(), FontLibrary::with_provider);
        let fonts = load_font_files(fonts, self.system_fonts, &self.font_dirs);

        CardGenerator {
            registry: self.registry,
            engine: Arc::new(LayoutEngine::new(fonts).with_config(self.layout)),
            executor: self.executor,
        }
    }
}

#[cfg(feature = "system-fonts")]
fn load_font_files(fonts: FontLibrary, system_fonts: bool, dirs: &[PathBuf]) -> FontLibrary {
    dirs.iter()
        .fold(fonts.with_system_fonts(system_fonts), |fonts, dir| fonts.with_font_dir(dir))
}

#[cfg(not(feature = "system-fonts"))]
fn load_font_files(fonts: FontLibrary, system_fonts: bool, dirs: &[PathBuf]) -> FontLibrary {
    if system_fonts || !dirs.is_empty() {
        log::warn!("Built without the `system-fonts` feature; font files are ignored");
    }
    fonts
}

/// Renders cards for many participants with one shared layout engine.
#[derive(Debug, Clone)]
pub struct CardGenerator {
    registry: PaperSizeRegistry,
    engine: Arc<LayoutEngine>,
    executor: ExecutorImpl,
}

impl CardGenerator {
    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn registry(&self) -> &PaperSizeRegistry {
        &self.registry
    }

    /// Resolves `paper` and plans a card for `content`. Every participant of a
    /// batch shares this plan.
    pub fn plan(
        &self,
        content: &CardContent,
        paper: &PaperSpec,
    ) -> Result<(PaperProfile, LayoutPlan), PipelineError> {
        let paper = self.registry.resolve(paper)?;
        let profile = ScaleProfile::derive(i64::from(paper.width_px()))?;
        let plan = LayoutPlan::new(profile, content)?;
        Ok((paper, plan))
    }

    /// Lays out and paints one card in memory.
    pub fn render_card(
        &self,
        plan: &LayoutPlan,
        content: &CardContent,
        participant: &Participant,
    ) -> Result<RasterCanvas, PipelineError> {
        render_to_canvas(&self.engine, plan, content, participant)
    }

    /// Renders every participant's card into `output_folder`.
    ///
    /// Paper, profile and content errors abort the batch before any job runs.
    /// Failures of individual participants are collected in the report.
    pub fn generate_all(
        &self,
        participants: &[Participant],
        content: &CardContent,
        paper: &PaperSpec,
        output_folder: &Path,
    ) -> Result<BatchReport, PipelineError> {
        let (paper, plan) = self.plan(content, paper)?;
        self.engine.preflight(&plan, content)?;

        log::info!(
            "Generating {} cards on {} ({}x{} px) with {} ({} workers) into '{}'",
            participants.len(),
            paper.name(),
            plan.width(),
            plan.height(),
            self.executor.name(),
            self.executor.parallelism(),
            output_folder.display()
        );
        let start = Instant::now();

        let job = CardJob {
            engine: Arc::clone(&self.engine),
            content: Arc::new(content.clone()),
            plan,
            paper: paper.clone(),
            output_folder: output_folder.to_path_buf(),
        };
        let results = self
            .executor
            .execute_all(participants.to_vec(), move |participant| {
                let result = job.run(&participant);
                (participant, result)
            });

        let mut cards = Vec::with_capacity(results.len());
        let mut failures = Vec::new();
        for (participant, result) in results {
            match result {
                Ok(card) => {
                    log::info!("Created invitation for {}", participant.display_name);
                    cards.push(card);
                }
                Err(error) => {
                    log::warn!(
                        "Failed to create invitation for {}: {}",
                        participant.display_name,
                        error
                    );
                    failures.push(CardFailure {
                        participant: participant.display_name,
                        error,
                    });
                }
            }
        }
        log::info!(
            "Batch finished in {:.2?}: {} written, {} failed",
            start.elapsed(),
            cards.len(),
            failures.len()
        );

        Ok(BatchReport {
            paper,
            output_folder: output_folder.to_path_buf(),
            cards,
            failures,
        })
    }

    /// Runs the batch a configuration file describes.
    pub fn generate_from_config(&self, config: &EventConfig) -> Result<BatchReport, PipelineError> {
        let content = config.card_content()?;
        self.generate_all(
            &config.participants(),
            &content,
            &config.paper_size,
            &config.output_folder,
        )
    }
}

/// Everything one participant's render needs, shared read-only across jobs.
#[derive(Clone)]
struct CardJob {
    engine: Arc<LayoutEngine>,
    content: Arc<CardContent>,
    plan: LayoutPlan,
    paper: PaperProfile,
    output_folder: PathBuf,
}

impl CardJob {
    fn run(&self, participant: &Participant) -> Result<RenderedCard, PipelineError> {
        let path = card_path(&self.output_folder, participant, &self.paper)?;
        let canvas = render_to_canvas(&self.engine, &self.plan, &self.content, participant)?;
        ensure_output_dir(&self.output_folder)?;
        canvas.save_png(&path)?;
        Ok(RenderedCard {
            participant: participant.display_name.clone(),
            file_path: path,
            width_px: self.plan.width(),
            height_px: self.plan.height(),
        })
    }
}

fn render_to_canvas(
    engine: &LayoutEngine,
    plan: &LayoutPlan,
    content: &CardContent,
    participant: &Participant,
) -> Result<RasterCanvas, PipelineError> {
    let mut canvas = RasterCanvas::new(plan.size())?;
    engine.render(plan, content, participant, &mut canvas)?;
    Ok(canvas)
}
