use std::env;
use std::process::ExitCode;

use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};

use perceptron_loo::{
    train_loop, ActivationFunction, CrossValidator, HabermanDataSet, Network, NetworkError,
    RunConfig, TrainConfig, ValidationSummary,
};

const USAGE: &str = "usage: perceptron-loo <validate|predict> <data.csv> [config.json]";

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let (mode, data_path, config_path) = match args.as_slice() {
        [mode, data] => (mode.as_str(), data.as_str(), None),
        [mode, data, config] => (mode.as_str(), data.as_str(), Some(config.as_str())),
        _ => {
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(mode, data_path, config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(mode: &str, data_path: &str, config_path: Option<&str>) -> Result<(), NetworkError> {
    let config = match config_path {
        Some(path) => RunConfig::load_json(path)?,
        None => RunConfig::default(),
    };

    let mut dataset = HabermanDataSet::load(data_path, config.separator)?;
    if config.normalize {
        dataset = dataset.normalized();
    }
    info!("loaded {} samples from {data_path}", dataset.len());

    let seed = config.seed.unwrap_or_else(rand::random);
    info!("weight seed {seed}");
    let samples = dataset.training_data(config.encoding);

    match mode {
        "validate" => {
            let validator = CrossValidator::new(config.network.clone(), samples)?
                .with_epochs(config.epochs)?;
            let errors = if config.parallel {
                validator.validate_parallel(seed)?
            } else {
                validator.validate_seeded(seed)?
            };

            for (i, error) in errors.iter().enumerate() {
                println!("{i}\t{error:.6}");
            }
            let summary = ValidationSummary::from_errors(&errors);
            println!(
                "folds: {}  mse: {:.6}  mae: {:.6}  max |error|: {:.6}",
                summary.folds, summary.mse, summary.mae, summary.max_abs
            );
        }
        "predict" => {
            let mut network = Network::from_params(&config.network, &mut StdRng::seed_from_u64(seed))?;
            let train_config = TrainConfig::new(config.epochs).with_log_every(config.log_every);
            let history = train_loop(&mut network, &samples, &train_config)?;
            if let Some(last) = history.last() {
                println!("final training loss: {:.6}", last.train_loss);
            }

            let decision = ActivationFunction::Unipolar { threshold: 0.5 };
            for sample in &samples {
                let output = network.predict(&sample.vector_in)?;
                println!(
                    "{:?} -> {:?} (class {:?}, target {:?})",
                    sample.vector_in,
                    output,
                    decision.apply(&output),
                    sample.vector_out
                );
            }
        }
        other => {
            return Err(NetworkError::Configuration(format!(
                "unknown mode '{other}'; {USAGE}"
            )));
        }
    }

    Ok(())
}
