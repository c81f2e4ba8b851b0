//! Biome classification.
//!
//! Each cell's height, temperature and rainfall are reduced to category
//! labels, and a caller-supplied [`PhysicalTemplate`] turns the label triple
//! into a biome. The template owns every naming decision; the classifier has
//! no fallback of its own.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;
use crate::grid::{
    map_altitude_to_category, map_moisture_to_category, map_temperature_to_category, AltitudeCategory,
    MoistureCategory, TemperatureCategory,
};
use crate::pipeline::Generator;
use crate::world::{BiomeCell, HeightCell, HeightWorld, RainfallCell, TemperatureCell};

/// A named biome. Biomes with equal names are interchangeable.
pub trait Biome: Clone + Eq + Hash {
    fn name(&self) -> &str;
}

/// A biome that is nothing but its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SimpleBiome {
    name: String,
}

impl SimpleBiome {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Biome for SimpleBiome {
    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for SimpleBiome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for SimpleBiome {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Maps a category triple to a biome.
pub trait PhysicalTemplate<B>: Send + Sync {
    fn biome_for(
        &self,
        altitude: AltitudeCategory,
        temperature: TemperatureCategory,
        moisture: MoistureCategory,
    ) -> B;
}

impl<B, F> PhysicalTemplate<B> for F
where
    F: Fn(AltitudeCategory, TemperatureCategory, MoistureCategory) -> B + Send + Sync,
{
    fn biome_for(
        &self,
        altitude: AltitudeCategory,
        temperature: TemperatureCategory,
        moisture: MoistureCategory,
    ) -> B {
        self(altitude, temperature, moisture)
    }
}

/// Category triple of one cell.
pub fn classify_cell(
    height: f32,
    temperature: f32,
    rainfall: f32,
    max_elevation: f32,
    sea_level: f32,
) -> (AltitudeCategory, TemperatureCategory, MoistureCategory) {
    (
        map_altitude_to_category(height, max_elevation, sea_level),
        map_temperature_to_category(temperature),
        map_moisture_to_category(rainfall),
    )
}

/// Assigns every cell the biome its template picks.
pub struct BiomeSelector<T, B> {
    template: T,
    _biome: PhantomData<fn() -> B>,
}

impl<T, B> BiomeSelector<T, B>
where
    T: PhysicalTemplate<B>,
{
    pub fn new(template: T) -> Self {
        Self {
            template,
            _biome: PhantomData,
        }
    }

    pub fn template(&self) -> &T {
        &self.template
    }
}

impl<W, T, B> Generator<W> for BiomeSelector<T, B>
where
    W: HeightWorld,
    W::Cell: HeightCell + TemperatureCell + RainfallCell + BiomeCell<B>,
    T: PhysicalTemplate<B>,
{
    fn name(&self) -> &str {
        "Simple Biome Selector"
    }

    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError> {
        let max_elevation = world.max_elevation();
        let sea_level = world.sea_level();

        for y in 0..world.height() {
            for x in 0..world.width() {
                let cell = world.cell_mut(x, y);
                let (altitude, temperature, moisture) = classify_cell(
                    cell.height(),
                    cell.temperature(),
                    cell.rainfall(),
                    max_elevation,
                    sea_level,
                );
                cell.set_biome(self.template.biome_for(altitude, temperature, moisture));
            }
        }
        Ok(())
    }
}

/// Most common biome among `cells`; ties go to the biome that reached the
/// winning count first. Cells without a biome are skipped.
pub fn dominant_biome_in<'a, C, B>(cells: impl IntoIterator<Item = &'a C>) -> Option<B>
where
    C: BiomeCell<B> + 'a,
    B: Biome,
{
    let mut counts: HashMap<&B, usize> = HashMap::new();
    let mut best: Option<(&B, usize)> = None;

    for biome in cells.into_iter().filter_map(|c| c.biome()) {
        let count = counts.entry(biome).or_insert(0);
        *count += 1;
        match best {
            Some((_, best_count)) if *count <= best_count => {}
            _ => best = Some((biome, *count)),
        }
    }

    best.map(|(biome, _)| biome.clone())
}
