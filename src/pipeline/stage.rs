//! Generation pass trait and pipeline orchestration.

use std::time::Instant;

use log::info;

use crate::error::{GenerationError, PipelineError};
use crate::world::World;

/// Trait for implementing generation passes.
///
/// Each pass reads the fields written by earlier passes and writes its own
/// into the world's cells. Passes bound `W` by the capabilities they touch,
/// so a pipeline only accepts passes its world can actually serve.
pub trait Generator<W: World>: Send + Sync {
    /// Returns a human-readable name for the pass.
    fn name(&self) -> &str;

    /// Executes the pass, modifying the world in place.
    fn run_generation(&self, world: &mut W) -> Result<(), GenerationError>;
}

/// Runs an ordered list of generation passes against one world.
pub struct WorldGenerator<W: World> {
    generators: Vec<Box<dyn Generator<W>>>,
}

impl<W: World> Default for WorldGenerator<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: World> WorldGenerator<W> {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Appends a pass; passes run in insertion order.
    pub fn add_generator<G: Generator<W> + 'static>(&mut self, generator: G) -> &mut Self {
        self.generators.push(Box::new(generator));
        self
    }

    /// Returns the number of passes in the pipeline.
    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    /// Names of the passes, in run order.
    pub fn generator_names(&self) -> Vec<&str> {
        self.generators.iter().map(|g| g.name()).collect()
    }

    /// Executes every pass in order.
    pub fn run(&self, world: &mut W) -> Result<(), PipelineError> {
        self.run_with_log(world, |_| {})
    }

    /// Executes every pass in order, reporting each pass name before it runs
    /// and its elapsed time after it finishes.
    ///
    /// The first failing pass aborts the run; later passes are not started.
    pub fn run_with_log<F>(&self, world: &mut W, mut on_log: F) -> Result<(), PipelineError>
    where
        F: FnMut(&str),
    {
        for generator in &self.generators {
            let name = generator.name();
            let message = format!("Running {}...", name);
            info!("{}", message);
            on_log(&message);

            let start = Instant::now();
            generator
                .run_generation(world)
                .map_err(|source| PipelineError::GeneratorFailed {
                    generator: name.to_string(),
                    source,
                })?;

            let message = format!("Done ({:?} elapsed)", start.elapsed());
            info!("{}: {}", name, message);
            on_log(&message);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::world::{GridWorld, HeightCell};

    struct Raise(f32);

    impl Generator<GridWorld> for Raise {
        fn name(&self) -> &str {
            "Raise"
        }

        fn run_generation(&self, world: &mut GridWorld) -> Result<(), GenerationError> {
            for (x, y) in world.coords().collect::<Vec<_>>() {
                let cell = world.cell_mut(x, y);
                cell.set_height(cell.height() + self.0);
            }
            Ok(())
        }
    }

    struct Fail;

    impl Generator<GridWorld> for Fail {
        fn name(&self) -> &str {
            "Fail"
        }

        fn run_generation(&self, _world: &mut GridWorld) -> Result<(), GenerationError> {
            Err(GridError::Degenerate { value: 0.0 }.into())
        }
    }

    #[test]
    fn test_pipeline_execution_order() {
        let mut pipeline = WorldGenerator::new();
        pipeline.add_generator(Raise(1.0)).add_generator(Raise(2.0));
        assert_eq!(pipeline.generator_count(), 2);

        let mut world: GridWorld = GridWorld::new(4, 4, 1, 100.0, 50.0);
        pipeline.run(&mut world).unwrap();
        assert_eq!(world.cell(2, 3).height, 3.0);
    }

    #[test]
    fn test_pipeline_with_log() {
        let mut pipeline = WorldGenerator::new();
        pipeline.add_generator(Raise(1.0));

        let mut world: GridWorld = GridWorld::new(2, 2, 1, 100.0, 50.0);
        let mut messages = Vec::new();
        pipeline
            .run_with_log(&mut world, |m| messages.push(m.to_string()))
            .unwrap();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0], "Running Raise...");
        assert!(messages[1].starts_with("Done ("));
        assert!(messages[1].ends_with(" elapsed)"));
    }

    #[test]
    fn test_failure_aborts_remaining_passes() {
        let mut pipeline = WorldGenerator::new();
        pipeline
            .add_generator(Raise(1.0))
            .add_generator(Fail)
            .add_generator(Raise(5.0));

        let mut world: GridWorld = GridWorld::new(2, 2, 1, 100.0, 50.0);
        let mut messages = Vec::new();
        let err = pipeline
            .run_with_log(&mut world, |m| messages.push(m.to_string()))
            .unwrap_err();

        let PipelineError::GeneratorFailed { generator, source } = err;
        assert_eq!(generator, "Fail");
        assert_eq!(source, GenerationError::Grid(GridError::Degenerate { value: 0.0 }));
        assert_eq!(world.cell(0, 0).height, 1.0);
        assert_eq!(messages.last().map(String::as_str), Some("Running Fail..."));
    }

    #[test]
    fn test_empty_pipeline_is_a_no_op() {
        let pipeline: WorldGenerator<GridWorld> = WorldGenerator::default();
        let mut world: GridWorld = GridWorld::new(2, 2, 1, 100.0, 50.0);
        pipeline.run(&mut world).unwrap();
        assert_eq!(world.cell(1, 1).height, 0.0);
    }
}
