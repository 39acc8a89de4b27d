use shapes::{
    config::GenerationConfig,
    rng::UniformSource,
    sample::Sampler,
    table::{MetadataTable, Schema, format_filename},
};
use tracing::info;

use crate::{error::GenResult, io::ArchiveWriter, render::Rasterizer};

/// Progress callback cadence, in samples.
pub const PROGRESS_EVERY: u32 = 100;

/// One finished batch run: encoded images plus the parallel metadata table.
/// Everything stays in memory until packaging, so a failed run never leaves
/// partial output behind.
pub struct Dataset {
    pub images: Vec<(String, Vec<u8>)>,
    pub metadata: MetadataTable,
}

impl Dataset {
    /// Streams the archive layout (metadata.csv, then images/) into a sink.
    pub fn write_to(&self, sink: &mut dyn ArchiveWriter) -> GenResult<()> {
        sink.add_file("metadata.csv", self.metadata.to_csv().as_bytes())?;
        for (name, bytes) in &self.images {
            sink.add_file(&format!("images/{name}"), bytes)?;
        }
        sink.finish()?;
        Ok(())
    }
}

/// Renders a whole run as one continuous pseudo-random stream: a single
/// source resolved up front and threaded through every sample, never
/// re-seeded.
pub struct BatchPipeline<'a> {
    cfg: &'a GenerationConfig,
    sampler: Sampler<'a>,
    rasterizer: Rasterizer,
}

impl<'a> BatchPipeline<'a> {
    pub fn new(cfg: &'a GenerationConfig) -> GenResult<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            sampler: Sampler::new(cfg),
            rasterizer: Rasterizer::new(cfg.canvas()),
        })
    }

    pub fn run(&self, mut progress: impl FnMut(u32, u32)) -> GenResult<Dataset> {
        let total = self.cfg.samples;
        let mut src = UniformSource::resolve(self.cfg.seed);
        match self.cfg.seed {
            Some(seed) => info!(total, seed, "starting seeded batch run"),
            None => info!(total, "starting non-reproducible batch run"),
        }

        let mut images = Vec::with_capacity(total as usize);
        let mut metadata = MetadataTable::new(Schema::from_config(self.cfg));

        for i in 1..=total {
            let record = self.sampler.draw(&mut src);
            let png = self.rasterizer.encode_png(&record)?;
            let filename = format_filename(i, total);
            metadata.push(filename.clone(), record);
            images.push((filename, png));

            if i % PROGRESS_EVERY == 0 || i == total {
                progress(i, total);
                // Suspension point between chunks; an interactive host
                // repaints here, the CLI just logs.
                std::thread::yield_now();
            }
        }

        info!(total, "batch run complete");
        Ok(Dataset { images, metadata })
    }
}
