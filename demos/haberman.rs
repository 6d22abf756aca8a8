use perceptron_loo::{
    train_network, CrossValidator, HabermanDataSet, Network, NetworkInitParameters,
    TargetEncoding, ValidationSummary,
};
use rand::{rngs::StdRng, SeedableRng};

// A handful of records in the survival data's raw layout:
// age, year of operation, positive nodes, status (1 = survived, 2 = died).
const RECORDS: &str = "\
age,year,nodes,status
30,64,1,1
30,62,3,1
31,59,2,1
33,58,10,1
34,59,0,2
34,66,9,2
38,69,21,2
41,60,23,2
45,65,6,1
52,61,0,1
";

fn main() -> Result<(), perceptron_loo::NetworkError> {
    let data = HabermanDataSet::from_csv_str(RECORDS, ',')?.normalized();
    let samples = data.training_data(TargetEncoding::Survival);
    let params = NetworkInitParameters::new(3, 1, vec![5]);

    let mut rng = StdRng::seed_from_u64(1);
    let mut network = Network::from_params(&params, &mut rng)?;
    for epoch in 0..2000 {
        let loss = train_network(&mut network, &samples)?;
        if epoch % 500 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    for sample in &samples {
        println!(
            "Input: {:.3?} -> Output: {:.4} (target {})",
            sample.vector_in,
            network.predict(&sample.vector_in)?[0],
            sample.vector_out[0]
        );
    }

    let errors = CrossValidator::new(params, samples)?
        .with_epochs(200)?
        .validate_parallel(1)?;
    let summary = ValidationSummary::from_errors(&errors);
    println!("leave-one-out: mse = {:.4}, mae = {:.4}", summary.mse, summary.mae);

    Ok(())
}
