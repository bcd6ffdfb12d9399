//! End-to-end conversion of one band.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use gdal::raster::GdalType;
use geotiff_writer::{write_with_geotransform, Geotransform};
use hdf5_reader::{extract_band, with_band_array, BandPrompt, ElementType};
use ndarray::{ArrayD, Axis, Ix2, Ix3};
use tracing::{info, info_span};

use crate::cog::{convert_to_cog, CogEncoder};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::splitter::split_and_convert;
use crate::workspace::JobWorkspace;

/// Artifacts of a finished conversion.
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub job_id: String,
    pub band: String,
    pub shape: Vec<usize>,
    pub element_type: ElementType,
    /// `<band>_COG.tif`
    pub primary: PathBuf,
    /// `<band>_band_<i>_COG.tif` for 3-D bands, in slice order; empty for 2-D
    pub slices: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl ConversionOutput {
    /// File name of the primary artifact.
    pub fn primary_file_name(&self) -> String {
        format!("{}_COG.tif", self.band)
    }
}

/// Band extraction, raster writing and COG encoding for one container.
#[derive(Clone)]
pub struct Pipeline {
    encoder: Arc<dyn CogEncoder>,
    geotransform: Geotransform,
}

impl Pipeline {
    pub fn new(encoder: Arc<dyn CogEncoder>) -> Self {
        Self {
            encoder,
            geotransform: Geotransform::PLACEHOLDER,
        }
    }

    pub fn with_geotransform(mut self, geotransform: Geotransform) -> Self {
        self.geotransform = geotransform;
        self
    }

    /// Build a pipeline with the configured `gdal_translate` encoder.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        Ok(Self::new(config.build_encoder()?).with_geotransform(config.geotransform))
    }

    pub fn geotransform(&self) -> &Geotransform {
        &self.geotransform
    }

    /// Convert one band of `container` into COG artifacts inside `workspace`.
    ///
    /// A 2-D band yields `<band>.tif` and `<band>_COG.tif`. A 3-D band yields
    /// one intermediate and one COG per slice along axis 0, and its primary
    /// `<band>_COG.tif` holds the last slice.
    pub fn process(
        &self,
        container: &Path,
        band: Option<&str>,
        prompt: Option<&dyn BandPrompt>,
        workspace: &JobWorkspace,
    ) -> Result<ConversionOutput> {
        let span = info_span!("convert", job = %workspace.id());
        let _guard = span.enter();
        let start = Instant::now();

        let extracted = extract_band(container, band, prompt)?;
        let shape = extracted.array.shape().to_vec();
        let element_type = extracted.array.element_type();

        let (primary, slices) = with_band_array!(&extracted.array, |arr| {
            self.convert_array(arr, &extracted.name, workspace)
        })?;

        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            band = %extracted.name,
            shape = ?shape,
            band_type = element_type.gdal_name(),
            slices = slices.len(),
            output = %primary.display(),
            duration_ms,
            "Conversion complete"
        );

        Ok(ConversionOutput {
            job_id: workspace.id().to_string(),
            band: extracted.name,
            shape,
            element_type,
            primary,
            slices,
            duration_ms,
        })
    }

    fn convert_array<T>(
        &self,
        array: &ArrayD<T>,
        band: &str,
        workspace: &JobWorkspace,
    ) -> Result<(PathBuf, Vec<PathBuf>)>
    where
        T: GdalType + Copy,
    {
        let encoder = self.encoder.as_ref();
        let raster = workspace.raster_path(band);

        match array.ndim() {
            2 => {
                let plane = array.view().into_dimensionality::<Ix2>()?;
                write_with_geotransform(plane, &raster, &self.geotransform)?;
                let primary = convert_to_cog(encoder, &raster, band, workspace)?;
                Ok((primary, Vec::new()))
            }
            3 => {
                let stack = array.view().into_dimensionality::<Ix3>()?;
                let count = stack.len_of(Axis(0));
                if count == 0 {
                    return Err(PipelineError::EmptyStack(band.to_string()));
                }

                let slices =
                    split_and_convert(stack, band, &self.geotransform, workspace, encoder)?;

                let last = stack.index_axis(Axis(0), count - 1);
                write_with_geotransform(last, &raster, &self.geotransform)?;
                let primary = convert_to_cog(encoder, &raster, band, workspace)?;
                Ok((primary, slices))
            }
            _ => Err(hdf5_reader::ExtractError::UnsupportedShape {
                band: band.to_string(),
                shape: array.shape().to_vec(),
            }
            .into()),
        }
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("geotransform", &self.geotransform)
            .finish_non_exhaustive()
    }
}
