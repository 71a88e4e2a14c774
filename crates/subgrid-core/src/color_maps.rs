//! Color map system for property visualization.
//!
//! Color maps turn a normalized property value into an RGB color; the
//! [`ValueDecoder`] goes the other way for colormap-textured bitmap layers,
//! recovering a physical property value from RGB-encoded image channels.

use std::collections::HashMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A color map for mapping scalar values to colors.
#[derive(Debug, Clone)]
pub struct ColorMap {
    /// Color map name.
    pub name: String,
    /// Color samples (evenly spaced from 0 to 1).
    pub colors: Vec<Vec3>,
}

impl ColorMap {
    /// Creates a new color map.
    pub fn new(name: impl Into<String>, colors: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            colors,
        }
    }

    /// Samples the color map at a given value (0 to 1).
    #[must_use]
    pub fn sample(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);

        if self.colors.is_empty() {
            return Vec3::ZERO;
        }

        if self.colors.len() == 1 {
            return self.colors[0];
        }

        let n = self.colors.len() - 1;
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let idx = ((t * n as f32).floor() as usize).min(n - 1);
        #[allow(clippy::cast_precision_loss)]
        let frac = t * n as f32 - idx as f32;

        self.colors[idx].lerp(self.colors[idx + 1], frac)
    }

    /// Samples the color map for a value within the given `[min, max]` range.
    ///
    /// Values outside the range are clamped; a degenerate range maps
    /// everything to the low end.
    #[must_use]
    pub fn sample_in_range(&self, value: f32, range: [f32; 2]) -> Vec3 {
        let span = range[1] - range[0];
        let t = if span > 0.0 { (value - range[0]) / span } else { 0.0 };
        self.sample(t)
    }
}

/// Registry for managing color maps.
#[derive(Default)]
pub struct ColorMapRegistry {
    color_maps: HashMap<String, ColorMap>,
}

impl ColorMapRegistry {
    /// Creates a new color map registry with default color maps.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::default();
        registry.register_defaults();
        registry
    }

    fn register_defaults(&mut self) {
        // Viridis color map
        self.register(ColorMap::new(
            "viridis",
            vec![
                Vec3::new(0.267, 0.004, 0.329),
                Vec3::new(0.282, 0.140, 0.457),
                Vec3::new(0.253, 0.265, 0.529),
                Vec3::new(0.206, 0.371, 0.553),
                Vec3::new(0.163, 0.471, 0.558),
                Vec3::new(0.127, 0.566, 0.550),
                Vec3::new(0.134, 0.658, 0.517),
                Vec3::new(0.266, 0.749, 0.440),
                Vec3::new(0.477, 0.821, 0.318),
                Vec3::new(0.741, 0.873, 0.150),
                Vec3::new(0.993, 0.906, 0.144),
            ],
        ));

        // Seismic (blue - white - red), symmetric around the midpoint
        self.register(ColorMap::new(
            "seismic",
            vec![
                Vec3::new(0.000, 0.000, 0.300),
                Vec3::new(0.000, 0.000, 1.000),
                Vec3::new(1.000, 1.000, 1.000),
                Vec3::new(1.000, 0.000, 0.000),
                Vec3::new(0.500, 0.000, 0.000),
            ],
        ));

        // Terrain color map for depth/elevation surfaces
        self.register(ColorMap::new(
            "terrain",
            vec![
                Vec3::new(0.200, 0.200, 0.600),
                Vec3::new(0.000, 0.600, 1.000),
                Vec3::new(0.000, 0.800, 0.400),
                Vec3::new(1.000, 1.000, 0.600),
                Vec3::new(0.500, 0.360, 0.330),
                Vec3::new(1.000, 1.000, 1.000),
            ],
        ));
    }

    /// Registers a color map, replacing any existing one with the same name.
    pub fn register(&mut self, color_map: ColorMap) {
        self.color_maps.insert(color_map.name.clone(), color_map);
    }

    /// Returns the color map with the given name, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.get(name)
    }

    /// Returns the registered color map names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.color_maps.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Decodes property values from RGB-encoded bitmap channels.
///
/// Map layers encode a float property into 24 bits across the R, G and B
/// channels of a texture. Given normalized channel values in `[0, 1]`, the
/// decoder reconstructs `(r·65536 + g·256 + b)·255` scaled back into the
/// property's physical range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueDecoder {
    /// Per-channel scale applied before recombining (usually all ones).
    pub rgb_scaler: [f32; 3],
    /// Scale from the combined 24-bit integer to the physical value.
    pub float_scaler: f32,
    /// Offset added to the combined integer before scaling.
    pub offset: f32,
    /// Quantization step in physical units; `0` disables quantization.
    pub step: f32,
}

impl Default for ValueDecoder {
    fn default() -> Self {
        Self {
            rgb_scaler: [1.0, 1.0, 1.0],
            // Scale [0, 256*256*256 - 1] to [0, 1]
            float_scaler: 1.0 / (256.0 * 256.0 * 256.0 - 1.0),
            offset: 0.0,
            step: 0.0,
        }
    }
}

impl ValueDecoder {
    /// Decodes one pixel's normalized `[0, 1]` RGB channels into a value.
    #[must_use]
    pub fn decode(&self, r: f32, g: f32, b: f32) -> f32 {
        let combined = r * self.rgb_scaler[0] * (255.0 * 256.0 * 256.0)
            + g * self.rgb_scaler[1] * (255.0 * 256.0)
            + b * self.rgb_scaler[2] * 255.0;
        let value = (combined + self.offset) * self.float_scaler;
        if self.step > 0.0 {
            (value / self.step + 0.5).floor() * self.step
        } else {
            value
        }
    }
}
