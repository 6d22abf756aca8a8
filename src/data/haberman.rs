use serde::{Serialize, Deserialize};

use crate::data::csv::{parse_floats, parse_rows, CsvParseError};
use crate::error::Result;
use crate::network::training_data::TrainingData;

/// One patient record from Haberman's breast-cancer surgery survival study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HabermanSample {
    /// Age of patient at time of operation.
    pub age: f64,
    /// Year of operation (year - 1900).
    pub surgery_year: f64,
    /// Number of positive axillary nodes detected.
    pub positive_axillary_nodes: f64,
    /// 1.0 if the patient survived 5 years or longer, else 0.0.
    pub survived: f64,
}

/// How a sample's outcome becomes a target vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEncoding {
    /// `[survived]`
    Survival,
    /// `[died, survived]`
    TwoClass,
}

impl TargetEncoding {
    pub fn output_size(self) -> usize {
        match self {
            TargetEncoding::Survival => 1,
            TargetEncoding::TwoClass => 2,
        }
    }
}

impl HabermanSample {
    pub fn input(&self) -> Vec<f64> {
        vec![self.age, self.surgery_year, self.positive_axillary_nodes]
    }

    pub fn target(&self, encoding: TargetEncoding) -> Vec<f64> {
        match encoding {
            TargetEncoding::Survival => vec![self.survived],
            TargetEncoding::TwoClass => vec![1.0 - self.survived, self.survived],
        }
    }

    pub fn to_training_data(&self, encoding: TargetEncoding) -> TrainingData {
        TrainingData::new(self.input(), self.target(encoding))
    }
}

/// Ordered collection of survival samples.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabermanDataSet {
    pub samples: Vec<HabermanSample>,
}

impl HabermanDataSet {
    /// Parses rows of `age, year, nodes, status`; extra columns are ignored.
    ///
    /// Status accepts the raw study codes (1 = survived, 2 = died) as well as
    /// an already normalised 0/1 survival flag.
    pub fn from_csv_str(text: &str, separator: char) -> Result<Self> {
        let rows = parse_rows(text, separator)?;
        let mut samples = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if row.len() < 4 {
                return Err(CsvParseError(format!(
                    "Row {}: expected at least 4 columns (age, year, nodes, status), got {}",
                    i + 1,
                    row.len()
                )).into());
            }
            let values = parse_floats(&row[..4], i + 1)?;
            samples.push(HabermanSample {
                age: values[0],
                surgery_year: values[1],
                positive_axillary_nodes: values[2],
                survived: survival_flag(values[3], i + 1)?,
            });
        }

        Ok(HabermanDataSet { samples })
    }

    /// Reads and parses a dataset file.
    pub fn load(path: &str, separator: char) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_csv_str(&text, separator)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Min-max scales age, year and node count to [0, 1]. A feature that is
    /// constant across the set maps to 0.
    pub fn normalized(&self) -> Self {
        let age = min_max(self.samples.iter().map(|s| s.age));
        let year = min_max(self.samples.iter().map(|s| s.surgery_year));
        let nodes = min_max(self.samples.iter().map(|s| s.positive_axillary_nodes));

        HabermanDataSet {
            samples: self.samples
                .iter()
                .map(|s| HabermanSample {
                    age: age(s.age),
                    surgery_year: year(s.surgery_year),
                    positive_axillary_nodes: nodes(s.positive_axillary_nodes),
                    survived: s.survived,
                })
                .collect(),
        }
    }

    pub fn training_data(&self, encoding: TargetEncoding) -> Vec<TrainingData> {
        self.samples.iter().map(|s| s.to_training_data(encoding)).collect()
    }
}

/// Scaler mapping the observed range of `values` onto [0, 1].
fn min_max(values: impl Iterator<Item = f64>) -> impl Fn(f64) -> f64 {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    move |v| if max > min { (v - min) / (max - min) } else { 0.0 }
}

fn survival_flag(status: f64, row_num: usize) -> std::result::Result<f64, CsvParseError> {
    match status {
        s if s == 0.0 || s == 2.0 => Ok(0.0),
        s if s == 1.0 => Ok(1.0),
        other => Err(CsvParseError(format!(
            "Row {row_num}: survival status {other} is not 0, 1 or 2"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = "30,64,1,1\n30,62,3,1\n34,59,0,2\n38,69,21,2\n";

    #[test]
    fn parses_raw_status_codes() {
        let data = HabermanDataSet::from_csv_str(RAW, ',').unwrap();
        assert_eq!(data.len(), 4);
        assert_eq!(data.samples[0], HabermanSample {
            age: 30.0,
            surgery_year: 64.0,
            positive_axillary_nodes: 1.0,
            survived: 1.0,
        });
        assert_eq!(data.samples[2].survived, 0.0);
    }

    #[test]
    fn accepts_normalised_rows_with_extra_columns() {
        let text = "0.509433962264151;0.272727272727273;0.961538461538462;0;1\n";
        let data = HabermanDataSet::from_csv_str(text, ';').unwrap();
        assert_eq!(data.samples[0].survived, 0.0);
        assert!((data.samples[0].age - 0.509433962264151).abs() < 1e-15);
    }

    #[test]
    fn rejects_unknown_status_and_short_rows() {
        assert!(HabermanDataSet::from_csv_str("30,64,1,3\n", ',').is_err());
        assert!(HabermanDataSet::from_csv_str("30,64,1\n", ',').is_err());
    }

    #[test]
    fn normalized_features_span_unit_interval() {
        let data = HabermanDataSet::from_csv_str(RAW, ',').unwrap().normalized();
        let ages: Vec<f64> = data.samples.iter().map(|s| s.age).collect();
        assert_eq!(ages, vec![0.0, 0.0, 0.5, 1.0]);
        assert_eq!(data.samples[3].positive_axillary_nodes, 1.0);
        assert_eq!(data.samples[2].positive_axillary_nodes, 0.0);
        assert_eq!(data.samples[1].survived, 1.0);
    }

    #[test]
    fn target_encodings() {
        let data = HabermanDataSet::from_csv_str(RAW, ',').unwrap();
        let survival = data.training_data(TargetEncoding::Survival);
        assert_eq!(survival[0].vector_in, vec![30.0, 64.0, 1.0]);
        assert_eq!(survival[0].vector_out, vec![1.0]);
        let two_class = data.training_data(TargetEncoding::TwoClass);
        assert_eq!(two_class[2].vector_out, vec![1.0, 0.0]);
        assert_eq!(TargetEncoding::TwoClass.output_size(), 2);
    }
}
