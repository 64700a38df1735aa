// SPDX-License-Identifier: GPL-3.0-or-later
use anyhow::Context as _;
use image::RgbImage;
use rgb::FromSlice;
use tracing::debug;

/// How much to enlarge the sensor grid by before the final stretch to the surface.
pub(crate) const INTERPOLATION_FACTOR: usize = 10;

/// Different resampling methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Method {
    /// Nearest neighbor sampling, leaving every sensor pixel a hard-edged block.
    Nearest,

    /// Catmull-Rom (aka bicubic) sampling.
    CatmullRom,
}

impl Default for Method {
    fn default() -> Self {
        Self::CatmullRom
    }
}

impl From<Method> for resize::Type {
    fn from(method: Method) -> Self {
        match method {
            Method::Nearest => resize::Type::Point,
            Method::CatmullRom => resize::Type::Catrom,
        }
    }
}

type RgbResizer = resize::Resizer<resize::formats::Rgb<u8, u8>>;

/// One resize context along with the dimensions it was built for.
///
/// Building a resizer precomputes filter coefficients, so contexts are kept between frames
/// and only rebuilt when the dimensions change.
#[derive(Debug)]
struct ResizerState {
    resizer: RgbResizer,
    source: (usize, usize),
    destination: (usize, usize),
}

impl ResizerState {
    fn new(
        source: (usize, usize),
        destination: (usize, usize),
        method: Method,
    ) -> anyhow::Result<Self> {
        debug!(
            source_width = source.0,
            source_height = source.1,
            destination_width = destination.0,
            destination_height = destination.1,
            ?method,
            "Creating new resizer"
        );
        let resizer = RgbResizer::new(
            source.0,
            source.1,
            destination.0,
            destination.1,
            resize::Pixel::RGB8,
            method.into(),
        )
        .context("Resizer rejected the requested dimensions")?;
        Ok(Self {
            resizer,
            source,
            destination,
        })
    }

    fn run(&mut self, source: &RgbImage) -> anyhow::Result<RgbImage> {
        let mut destination = RgbImage::new(self.destination.0 as u32, self.destination.1 as u32);
        self.resizer
            .resize(source.as_rgb(), destination.as_rgb_mut())
            .context("Error resampling image")?;
        Ok(destination)
    }
}

/// Expands the sensor-resolution color grid to fill the presentation surface.
///
/// Two stages: a smoothing enlargement by a fixed integer factor, then a stretch to the
/// surface's exact pixel size. The stretch is point-sampled and anisotropic; the surface
/// dimensions are authoritative and aspect ratio is not preserved. All the visual smoothing
/// comes from the first stage, so disabling it leaves the blocky nearest-neighbor look.
#[derive(Debug)]
pub(crate) struct Upsampler {
    method: Method,
    factor: usize,
    enlarge_state: Option<ResizerState>,
    fit_state: Option<ResizerState>,
}

impl Upsampler {
    pub(crate) fn new(method: Method, factor: usize) -> Self {
        Self {
            method,
            factor,
            enlarge_state: None,
            fit_state: None,
        }
    }

    /// Resample the color grid up by the configured factor.
    ///
    /// When the method is [`Method::Nearest`] or the factor is 1 there is nothing to smooth,
    /// and the grid passes through untouched (the stretch stage is already point-sampled).
    pub(crate) fn enlarge(&mut self, grid: &RgbImage) -> anyhow::Result<RgbImage> {
        if self.method == Method::Nearest || self.factor <= 1 {
            return Ok(grid.clone());
        }
        let source = (grid.width() as usize, grid.height() as usize);
        let destination = (source.0 * self.factor, source.1 * self.factor);
        let method = self.method;
        let state = Self::state_for(&mut self.enlarge_state, source, destination, method)?;
        state.run(grid)
    }

    /// Stretch an image to exactly the surface's pixel dimensions.
    pub(crate) fn fit(
        &mut self,
        image: &RgbImage,
        surface: (u32, u32),
    ) -> anyhow::Result<RgbImage> {
        if (image.width(), image.height()) == surface {
            return Ok(image.clone());
        }
        let source = (image.width() as usize, image.height() as usize);
        let destination = (surface.0 as usize, surface.1 as usize);
        let state = Self::state_for(&mut self.fit_state, source, destination, Method::Nearest)?;
        state.run(image)
    }

    /// Both stages back to back: enlarge, then fit to the surface.
    pub(crate) fn upsample(
        &mut self,
        grid: &RgbImage,
        surface: (u32, u32),
    ) -> anyhow::Result<RgbImage> {
        let enlarged = self.enlarge(grid)?;
        self.fit(&enlarged, surface)
    }

    /// Fetch the cached context for a stage, rebuilding it if the dimensions changed (the
    /// surface can differ between cycles in windowed mode).
    fn state_for<'a>(
        slot: &'a mut Option<ResizerState>,
        source: (usize, usize),
        destination: (usize, usize),
        method: Method,
    ) -> anyhow::Result<&'a mut ResizerState> {
        let state = match slot.take() {
            Some(state) if state.source == source && state.destination == destination => state,
            previous => {
                if previous.is_some() {
                    debug!("Image dimensions changed, recreating resizer");
                }
                ResizerState::new(source, destination, method)?
            }
        };
        Ok(slot.insert(state))
    }
}
