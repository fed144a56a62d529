use std::num::NonZeroUsize;

use pokerga_engine::vm::{Interpreter, InterpreterConfig, InterpreterConfigError};
use serde::{Deserialize, Serialize};

use crate::operator::{FilterSpec, MutatorSpec, OperatorPipeline, SelectorSpec};

/// Number of nibbles in one VM instruction (opcode and operand).
pub const INSTRUCTION_UNIT: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    #[display("population size must be positive")]
    EmptyPopulation,
    #[display("chromosome length must be a positive multiple of {INSTRUCTION_UNIT} but was {length}")]
    InvalidChromosomeLength { length: usize },
    #[display("number of generations must be positive")]
    NoGenerations,
    #[display("at least one selector is required")]
    NoSelectors,
    #[display("at least one mutator is required")]
    NoMutators,
    #[display("{name} must be a percentage in [0, 100] but was {value}")]
    InvalidChance { name: &'static str, value: u8 },
    #[display("{_0}")]
    #[from]
    Interpreter(InterpreterConfigError),
}

/// Parameters of a training run.
///
/// Missing fields take their [`Default`] values when deserialized, so a
/// configuration file only needs to list what it changes:
///
/// ```
/// use pokerga_training::TrainingConfig;
///
/// let config: TrainingConfig = serde_json::from_str(r#"{"generations": 10}"#).unwrap();
/// assert_eq!(config.generations, 10);
/// assert_eq!(config.population_size, 100);
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub population_size: usize,
    pub chromosome_length: usize,
    pub generations: usize,
    pub max_stack: usize,
    pub max_loop_depth: usize,
    /// Worker threads for evaluation. `None` uses the available parallelism.
    pub threads: Option<NonZeroUsize>,
    pub filters: Vec<FilterSpec>,
    pub selectors: Vec<SelectorSpec>,
    pub mutators: Vec<MutatorSpec>,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let interpreter = InterpreterConfig::default();
        Self {
            population_size: 100,
            chromosome_length: 256,
            generations: 50,
            max_stack: interpreter.max_stack,
            max_loop_depth: interpreter.max_loop_depth,
            threads: None,
            filters: vec![FilterSpec::DuplicateEliminator],
            selectors: vec![
                SelectorSpec::Elitist { count: 10 },
                SelectorSpec::Random { count: 40 },
            ],
            mutators: vec![
                MutatorSpec::Crossover { max_parents: 20 },
                MutatorSpec::Random {
                    organism_chance: 50,
                    gene_chance: 5,
                },
            ],
        }
    }
}

impl TrainingConfig {
    #[must_use]
    pub fn interpreter_config(&self) -> InterpreterConfig {
        InterpreterConfig {
            max_stack: self.max_stack,
            max_loop_depth: self.max_loop_depth,
        }
    }

    /// Checks every parameter, reporting the first invalid one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.chromosome_length == 0 || self.chromosome_length % INSTRUCTION_UNIT != 0 {
            return Err(ConfigError::InvalidChromosomeLength {
                length: self.chromosome_length,
            });
        }
        if self.generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if self.selectors.is_empty() {
            return Err(ConfigError::NoSelectors);
        }
        if self.mutators.is_empty() {
            return Err(ConfigError::NoMutators);
        }
        for mutator in &self.mutators {
            if let MutatorSpec::Random {
                organism_chance,
                gene_chance,
            } = *mutator
            {
                check_chance("organism_chance", organism_chance)?;
                check_chance("gene_chance", gene_chance)?;
            }
        }
        Interpreter::new(self.interpreter_config())?;
        Ok(())
    }

    /// Builds the interpreter described by this configuration.
    pub fn build_interpreter(&self) -> Result<Interpreter, ConfigError> {
        Ok(Interpreter::new(self.interpreter_config())?)
    }

    #[must_use]
    pub fn build_operators(&self) -> OperatorPipeline {
        OperatorPipeline::from_specs(
            &self.filters,
            &self.selectors,
            &self.mutators,
            self.population_size,
        )
    }
}

fn check_chance(name: &'static str, value: u8) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::InvalidChance { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(TrainingConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_each_invalid_field() {
        let cases: [(fn(&mut TrainingConfig), ConfigError); 8] = [
            (|c: &mut TrainingConfig| c.population_size = 0, ConfigError::EmptyPopulation),
            (
                |c: &mut TrainingConfig| c.chromosome_length = 0,
                ConfigError::InvalidChromosomeLength { length: 0 },
            ),
            (
                |c: &mut TrainingConfig| c.chromosome_length = 255,
                ConfigError::InvalidChromosomeLength { length: 255 },
            ),
            (|c: &mut TrainingConfig| c.generations = 0, ConfigError::NoGenerations),
            (|c: &mut TrainingConfig| c.selectors.clear(), ConfigError::NoSelectors),
            (|c: &mut TrainingConfig| c.mutators.clear(), ConfigError::NoMutators),
            (
                |c: &mut TrainingConfig| {
                    c.mutators = vec![MutatorSpec::Random {
                        organism_chance: 50,
                        gene_chance: 101,
                    }];
                },
                ConfigError::InvalidChance {
                    name: "gene_chance",
                    value: 101,
                },
            ),
            (
                |c: &mut TrainingConfig| c.max_stack = 0,
                ConfigError::Interpreter(InterpreterConfigError::InvalidStackSize {
                    size: 0,
                    max: pokerga_engine::vm::STACK_CAPACITY,
                }),
            ),
        ];
        for (mutate, expected) in cases {
            let mut config = TrainingConfig::default();
            mutate(&mut config);
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn test_json_roundtrip_keeps_operators() {
        let config = TrainingConfig {
            threads: NonZeroUsize::new(4),
            ..TrainingConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<TrainingConfig>(&json).unwrap(), config);
    }
}
